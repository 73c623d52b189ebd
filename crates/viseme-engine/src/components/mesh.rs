/// RGB base color, 0..1 per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Primitive shape with explicit dimensions, in model units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
}

impl Shape {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Shape::Box { width, height, depth }
    }

    pub fn sphere(radius: f32, segments: u32) -> Self {
        Shape::Sphere {
            radius,
            width_segments: segments,
            height_segments: segments,
        }
    }

    /// Wire code for the page renderer (0 = box, 1 = sphere).
    pub fn code(&self) -> f32 {
        match self {
            Shape::Box { .. } => 0.0,
            Shape::Sphere { .. } => 1.0,
        }
    }

    /// Dimensions packed as three floats.
    /// Box: width, height, depth. Sphere: radius, width segments, height segments.
    pub fn dims(&self) -> [f32; 3] {
        match *self {
            Shape::Box { width, height, depth } => [width, height, depth],
            Shape::Sphere { radius, width_segments, height_segments } => {
                [radius, width_segments as f32, height_segments as f32]
            }
        }
    }
}

/// Phong surface appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    /// Phong specular exponent (default: 30.0).
    pub shininess: f32,
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self { color, shininess: 30.0 }
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

/// Component for drawable parts. Group nodes have none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub material: Material,
    pub casts_shadow: bool,
}

impl MeshComponent {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self {
            shape,
            material,
            casts_shadow: false,
        }
    }

    pub fn with_shadow(mut self) -> Self {
        self.casts_shadow = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_decodes_channels() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn shape_dims_pack_sphere_segments() {
        let s = Shape::sphere(0.15, 16);
        assert_eq!(s.dims(), [0.15, 16.0, 16.0]);
        assert_eq!(s.code(), 1.0);
        assert_eq!(Shape::cuboid(1.0, 2.0, 3.0).code(), 0.0);
    }

    #[test]
    fn material_defaults_to_phong_shininess() {
        let m = Material::new(Color::WHITE);
        assert_eq!(m.shininess, 30.0);
    }
}
