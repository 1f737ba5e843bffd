//! Orbit-to-surface coordinate transforms. Pure math, no engine dependencies.
//!
//! A body's phase is used directly as the true anomaly and advanced
//! linearly per frame; there is no Kepler solve. The orbit-plane point is
//! then reinterpreted as a geographic coordinate and reprojected onto the
//! globe, so markers trace orbit-shaped tracks across the surface.
//!
//! f64 throughout; only the final marker position is narrowed to f32.

use glam::DVec3;
use thiserror::Error;

use crate::bodies::BodyDesc;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    /// Rejected at registration; the body never enters the animation loop.
    #[error("invalid orbital parameters for {name}: {reason}")]
    InvalidOrbitalParameters { name: String, reason: String },
    /// The point is the origin, so latitude is undefined.
    #[error("degenerate vector: latitude is undefined at the origin")]
    DegenerateVector,
}

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geographic {
    pub latitude: f64,
    pub longitude: f64,
}

/// Point on the conic `r = a(1 - e²) / (1 + e·cos θ)`, tilted by `i` about x.
/// Angles in degrees. Undefined for `e >= 1` or `a <= 0`.
pub fn orbital_position(a: f64, e: f64, i: f64, theta: f64) -> DVec3 {
    let i = i * DEG_TO_RAD;
    let theta = theta * DEG_TO_RAD;

    let p = a * (1.0 - e * e);
    let r = p / (1.0 + e * theta.cos());

    let x = r * theta.cos();
    let y_plane = r * theta.sin();

    DVec3::new(x, y_plane * i.cos(), y_plane * i.sin())
}

/// Read an ecliptic-frame point (z up) as latitude/longitude.
///
/// On the polar axis (`x = y = 0` up to rounding) longitude is reported as 0.
pub fn to_geographic(point: DVec3) -> Result<Geographic, OrbitError> {
    let r = point.length();
    // Also catches NaN.
    if !(r > 0.0) {
        return Err(OrbitError::DegenerateVector);
    }

    let latitude = (point.z / r).clamp(-1.0, 1.0).asin() * RAD_TO_DEG;
    let horizontal = point.x.hypot(point.y);
    let longitude = if horizontal <= r * f64::EPSILON {
        0.0
    } else {
        point.y.atan2(point.x) * RAD_TO_DEG
    };

    Ok(Geographic { latitude, longitude })
}

/// Place a geographic coordinate on the globe (y up).
///
/// The 180° longitude shift and the mirrored x axis match the seam of the
/// globe texture; changing either rotates markers against the surface.
pub fn surface_placement(latitude: f64, longitude: f64, base_radius: f64, height_offset: f64) -> DVec3 {
    let phi = latitude * DEG_TO_RAD;
    let lambda = (longitude - 180.0) * DEG_TO_RAD;
    let rho = base_radius + height_offset;

    DVec3::new(
        -rho * phi.cos() * lambda.cos(),
        rho * phi.sin(),
        rho * phi.cos() * lambda.sin(),
    )
}

/// Inverse of [`surface_placement`]: map the globe frame back onto the
/// ecliptic axes and read it geographically.
pub fn surface_to_geographic(point: DVec3) -> Result<Geographic, OrbitError> {
    to_geographic(DVec3::new(point.x, -point.z, point.y))
}

/// Surface position of a body at `phase`:
/// orbit point → geographic reading → globe placement.
pub fn place_body(desc: &BodyDesc, phase: f64, base_radius: f64) -> Result<DVec3, OrbitError> {
    let point = orbital_position(desc.a, desc.e, desc.i, phase);
    let geo = to_geographic(point)?;
    Ok(surface_placement(geo.latitude, geo.longitude, base_radius, desc.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn circular_untilted_at_zero_phase() {
        let p = orbital_position(1.0, 0.0, 0.0, 0.0);
        assert_eq!(p, DVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn polar_orbit_quarter_turn_points_up() {
        let p = orbital_position(1.0, 0.0, 90.0, 90.0);
        assert!(p.x.abs() < EPS && p.y.abs() < EPS, "p = {p}");
        assert!(close(p.z, 1.0));

        let geo = to_geographic(p).unwrap();
        assert!(close(geo.latitude, 90.0), "lat = {}", geo.latitude);
        assert_eq!(geo.longitude, 0.0);
    }

    #[test]
    fn radius_follows_conic_equation() {
        for &(a, e, i, theta) in &[
            (0.7, 0.3322, 25.62, 0.0),
            (0.55, 0.177, -15.8, 123.0),
            (2.1, 0.37, 23.33, 180.0),
            (4.0, 0.1, 5.1, 271.5),
            (1.0, 0.99, 0.0, 45.0),
        ] {
            let p = orbital_position(a, e, i, theta);
            let expected = a * (1.0 - e * e) / (1.0 + e * (theta * DEG_TO_RAD).cos());
            assert!(p.is_finite());
            assert!(
                (p.length() - expected).abs() < 1e-9 * expected.max(1.0),
                "a={a} e={e} i={i} theta={theta}: |p|={} expected {expected}",
                p.length()
            );
        }
    }

    #[test]
    fn inclination_tilts_about_x() {
        let flat = orbital_position(1.0, 0.2, 0.0, 60.0);
        let tilted = orbital_position(1.0, 0.2, 30.0, 60.0);
        assert!(close(flat.x, tilted.x));
        assert!(close(flat.y * (30.0 * DEG_TO_RAD).cos(), tilted.y));
        assert!(tilted.z > 0.0);

        let reversed = orbital_position(1.0, 0.2, -30.0, 60.0);
        assert!(close(reversed.z, -tilted.z));
    }

    #[test]
    fn origin_is_degenerate() {
        assert_eq!(to_geographic(DVec3::ZERO), Err(OrbitError::DegenerateVector));
        assert_eq!(
            to_geographic(DVec3::new(f64::NAN, 0.0, 0.0)),
            Err(OrbitError::DegenerateVector)
        );
    }

    #[test]
    fn geographic_reads_equator_and_quadrants() {
        let geo = to_geographic(DVec3::new(0.0, 2.0, 0.0)).unwrap();
        assert!(close(geo.latitude, 0.0));
        assert!(close(geo.longitude, 90.0));

        let geo = to_geographic(DVec3::new(-1.0, -1.0, 0.0)).unwrap();
        assert!(close(geo.longitude, -135.0));
    }

    #[test]
    fn south_pole_longitude_is_zero() {
        let geo = to_geographic(DVec3::new(0.0, 0.0, -3.0)).unwrap();
        assert!(close(geo.latitude, -90.0));
        assert_eq!(geo.longitude, 0.0);
    }

    #[test]
    fn surface_placement_seam_convention() {
        // lon 0 on the equator lands on +x after the 180° shift and mirror.
        let p = surface_placement(0.0, 0.0, 0.4, 0.1);
        assert!(close(p.x, 0.5) && close(p.y, 0.0) && p.z.abs() < EPS, "p = {p}");

        // lon 90 lands on -z.
        let p = surface_placement(0.0, 90.0, 1.0, 0.0);
        assert!(p.x.abs() < EPS && close(p.z, -1.0), "p = {p}");

        // North pole is +y.
        let p = surface_placement(90.0, 37.0, 1.0, 0.0);
        assert!(close(p.y, 1.0));
    }

    #[test]
    fn surface_placement_radius_includes_height() {
        let p = surface_placement(33.0, -71.0, 0.4, 1.4);
        assert!(close(p.length(), 1.8));
    }

    #[test]
    fn surface_round_trip_recovers_coordinates() {
        for &(lat, lon) in &[(0.0, 0.0), (45.0, 120.0), (-60.5, -170.25), (89.0, 179.0), (-12.0, 33.0)] {
            let p = surface_placement(lat, lon, 0.5, 0.0);
            let geo = surface_to_geographic(p).unwrap();
            assert!((geo.latitude - lat).abs() < 1e-9, "lat {lat} -> {}", geo.latitude);
            assert!((geo.longitude - lon).abs() < 1e-9, "lon {lon} -> {}", geo.longitude);
        }
    }

    #[test]
    fn place_body_composes_the_three_steps() {
        let desc = BodyDesc::new("Atira", 0.7, 0.3322, 25.62, 1.4, 0.03, 1.0);
        let phase = 42.0;

        let point = orbital_position(desc.a, desc.e, desc.i, phase);
        let geo = to_geographic(point).unwrap();
        let expected = surface_placement(geo.latitude, geo.longitude, 0.4, desc.height);

        let placed = place_body(&desc, phase, 0.4).unwrap();
        assert!((placed - expected).length() < EPS);
        assert!(close(placed.length(), 1.8));
    }

    #[test]
    fn untilted_body_stays_on_equator() {
        let desc = BodyDesc::new("flat", 1.0, 0.5, 0.0, 0.0, 0.05, 1.0);
        for phase in [0.0, 90.0, 200.0, 359.0] {
            let p = place_body(&desc, phase, 0.4).unwrap();
            assert!(p.y.abs() < EPS, "phase {phase}: y = {}", p.y);
        }
    }
}
