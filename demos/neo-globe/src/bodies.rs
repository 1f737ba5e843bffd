/// Near-Earth object catalog: static orbital parameters and marker visuals.
///
/// The built-in catalog ships as JSON next to the crate; a host may replace
/// it through `game_load_data` before init.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orbit::OrbitError;

/// Radius markers are anchored to before their height offset is added.
pub const MARKER_BASE_RADIUS: f64 = 0.4;

/// Marker colour (#999999) and shininess shared by every body.
pub const MARKER_COLOR: &str = "#999999";
pub const MARKER_SHININESS: f32 = 1.0;

const DEFAULT_CATALOG: &str = include_str!("../data/neo_catalog.json");

/// Static description of one body. Only the phase changes at runtime and
/// that lives in the scheduler, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    #[serde(alias = "full_name")]
    pub name: String,
    /// Semi-major axis.
    pub a: f64,
    /// Eccentricity, in [0, 1).
    pub e: f64,
    /// Inclination in degrees.
    pub i: f64,
    /// Radial offset above the marker base radius.
    #[serde(default)]
    pub height: f64,
    /// Marker sphere radius.
    pub size: f64,
    /// Degrees added to the phase each frame.
    pub velocity: f64,
    /// Resource opened when the marker is clicked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl BodyDesc {
    pub fn new(name: impl Into<String>, a: f64, e: f64, i: f64, height: f64, size: f64, velocity: f64) -> Self {
        Self {
            name: name.into(),
            a,
            e,
            i,
            height,
            size,
            velocity,
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Check the parameters the transforms need. Runs once at registration.
    pub fn validate(&self, base_radius: f64) -> Result<(), OrbitError> {
        let reject = |reason: &str| {
            Err(OrbitError::InvalidOrbitalParameters {
                name: self.name.clone(),
                reason: reason.to_string(),
            })
        };

        let values = [self.a, self.e, self.i, self.height, self.size, self.velocity];
        if values.iter().any(|v| !v.is_finite()) {
            return reject("parameters must be finite");
        }
        if self.a <= 0.0 {
            return reject("semi-major axis must be positive");
        }
        if self.e < 0.0 {
            return reject("eccentricity must not be negative");
        }
        if self.e >= 1.0 {
            return reject("eccentricity must be below 1 (closed orbit)");
        }
        if self.size <= 0.0 {
            return reject("marker size must be positive");
        }
        if base_radius + self.height <= 0.0 {
            return reject("marker would sit at or below the globe centre");
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate body name: {0}")]
    DuplicateName(String),
}

/// Ordered list of bodies. Order is the animation order.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCatalog {
    bodies: Vec<BodyDesc>,
}

impl BodyCatalog {
    /// Parse a JSON array of body records. Names must be unique.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let bodies: Vec<BodyDesc> = serde_json::from_str(json)?;
        for (idx, body) in bodies.iter().enumerate() {
            if bodies[..idx].iter().any(|b| b.name == body.name) {
                return Err(CatalogError::DuplicateName(body.name.clone()));
            }
        }
        Ok(Self { bodies })
    }

    /// The catalog bundled with the crate.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG)
    }

    pub fn bodies(&self) -> &[BodyDesc] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for BodyCatalog {
    /// The bundled catalog, or an empty one if it fails to parse.
    fn default() -> Self {
        match Self::load() {
            Ok(catalog) => catalog,
            Err(err) => {
                log::warn!("Bundled catalog rejected: {err}");
                Self { bodies: Vec::new() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_has_the_five_bodies() {
        let catalog = BodyCatalog::load().unwrap();
        let names: Vec<&str> = catalog.bodies().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Atira", "'Aylo'chaxnim", "TG45", "XZ130", "Moon"]);

        let with_url: Vec<&str> = catalog
            .bodies()
            .iter()
            .filter(|b| b.url.is_some())
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(with_url, ["TG45", "Moon"]);
    }

    #[test]
    fn bundled_bodies_are_valid() {
        for body in BodyCatalog::default().bodies() {
            assert!(body.validate(MARKER_BASE_RADIUS).is_ok(), "{} rejected", body.name);
        }
    }

    #[test]
    fn accepts_name_or_full_name_and_defaults_height() {
        let json = r#"[
            {"name": "A", "a": 1.0, "e": 0.1, "i": 3.0, "size": 0.02, "velocity": 1.0},
            {"full_name": "B", "a": 2.0, "e": 0.2, "i": -3.0, "height": 0.5, "size": 0.02, "velocity": -1.0}
        ]"#;
        let catalog = BodyCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.bodies()[0].height, 0.0);
        assert_eq!(catalog.bodies()[1].name, "B");
        assert_eq!(catalog.bodies()[1].url, None);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let json = r#"[
            {"name": "Dup", "a": 1.0, "e": 0.1, "i": 0.0, "size": 0.02, "velocity": 1.0},
            {"name": "Dup", "a": 2.0, "e": 0.1, "i": 0.0, "size": 0.02, "velocity": 1.0}
        ]"#;
        match BodyCatalog::from_json(json) {
            Err(CatalogError::DuplicateName(name)) => assert_eq!(name, "Dup"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(BodyCatalog::from_json("{not json"), Err(CatalogError::Json(_))));
        assert!(matches!(
            BodyCatalog::from_json(r#"[{"name": "NoAxis", "e": 0.1}]"#),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn validation_rejects_bad_parameters() {
        let ok = BodyDesc::new("ok", 1.0, 0.5, 10.0, 0.2, 0.03, 1.0);
        assert!(ok.validate(0.4).is_ok());

        let cases = [
            BodyDesc { e: 1.0, ..ok.clone() },
            BodyDesc { e: 1.5, ..ok.clone() },
            BodyDesc { e: -0.1, ..ok.clone() },
            BodyDesc { a: 0.0, ..ok.clone() },
            BodyDesc { a: -2.0, ..ok.clone() },
            BodyDesc { size: 0.0, ..ok.clone() },
            BodyDesc { i: f64::NAN, ..ok.clone() },
            BodyDesc { velocity: f64::INFINITY, ..ok.clone() },
            BodyDesc { height: -0.4, ..ok.clone() },
        ];
        for desc in cases {
            match desc.validate(0.4) {
                Err(OrbitError::InvalidOrbitalParameters { name, .. }) => assert_eq!(name, "ok"),
                other => panic!("{desc:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn negative_height_above_centre_is_allowed() {
        let desc = BodyDesc::new("low", 1.0, 0.0, 0.0, -0.1, 0.03, 1.0);
        assert!(desc.validate(0.4).is_ok());
    }
}
