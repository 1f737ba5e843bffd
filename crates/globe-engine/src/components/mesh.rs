/// RGB color for marker meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl MarkerColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string. Returns None on malformed input.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(digits.get(range)?, 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl Default for MarkerColor {
    fn default() -> Self {
        // #999999
        Self { r: 0.6, g: 0.6, b: 0.6 }
    }
}

/// Marker shape primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerShape {
    Sphere { radius: f32 },
}

/// Component for sphere-shaped marker meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MarkerShape,
    pub color: MarkerColor,
    /// Phong specular exponent (default: 1.0).
    pub shininess: f32,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: MarkerShape::Sphere { radius: 0.05 },
            color: MarkerColor::default(),
            shininess: 1.0,
        }
    }
}

impl MeshComponent {
    pub fn new(shape: MarkerShape, color: MarkerColor) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    pub fn sphere(radius: f32, color: MarkerColor) -> Self {
        Self::new(MarkerShape::Sphere { radius }, color)
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Radius of the sphere enclosing the shape, in local units.
    pub fn bounding_radius(&self) -> f32 {
        match self.shape {
            MarkerShape::Sphere { radius } => radius,
        }
    }
}
