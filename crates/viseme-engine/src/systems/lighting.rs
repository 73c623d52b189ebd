//! Fixed studio lighting for the mouth model.
//!
//! Key, fill and back directional lights plus one ambient term.
//! Built once at mount and never changed.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::components::mesh::Color;

/// Light kind codes on the wire.
pub const LIGHT_DIRECTIONAL: f32 = 0.0;
pub const LIGHT_AMBIENT: f32 = 1.0;

/// A single light.
///
/// Wire format (12 floats / 48 bytes):
/// `[kind, x, y, z, r, g, b, intensity, casts_shadow, pad, pad, pad]`
///
/// For directional lights `x, y, z` is the light's position; it shines toward
/// the origin. Ambient lights ignore it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Light {
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    pub casts_shadow: f32,
    pub _pad: [f32; 3],
}

impl Light {
    pub const FLOATS: usize = 12;

    /// Directional light placed at `pos`, aimed at the origin.
    pub fn directional(pos: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            kind: LIGHT_DIRECTIONAL,
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            ..Default::default()
        }
    }

    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            kind: LIGHT_AMBIENT,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            ..Default::default()
        }
    }

    pub fn with_shadow(mut self) -> Self {
        self.casts_shadow = 1.0;
        self
    }

    pub fn is_ambient(&self) -> bool {
        self.kind == LIGHT_AMBIENT
    }

    /// Unit vector the light travels along (from its position to the origin).
    pub fn direction(&self) -> Vec3 {
        (-Vec3::new(self.x, self.y, self.z)).normalize_or_zero()
    }
}

/// The scene's lights.
pub struct LightRig {
    lights: Vec<Light>,
}

impl LightRig {
    /// Key, fill, back and ambient.
    pub fn studio() -> Self {
        Self {
            lights: vec![
                Light::directional(Vec3::new(3.0, 3.0, 5.0), Color::WHITE, 1.2).with_shadow(),
                Light::directional(Vec3::new(-3.0, 2.0, 3.0), Color::WHITE, 0.6),
                Light::directional(Vec3::new(0.0, -2.0, -3.0), Color::WHITE, 0.4),
                Light::ambient(Color::WHITE, 0.8),
            ],
        }
    }

    pub fn as_slice(&self) -> &[Light] {
        &self.lights
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::studio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_is_12_floats() {
        assert_eq!(std::mem::size_of::<Light>(), Light::FLOATS * 4);
    }

    #[test]
    fn studio_rig_has_four_lights() {
        let rig = LightRig::studio();
        assert_eq!(rig.count(), 4);
        assert_eq!(rig.iter().filter(|l| l.is_ambient()).count(), 1);
    }

    #[test]
    fn only_key_light_casts_shadow() {
        let rig = LightRig::studio();
        let shadowed: Vec<&Light> = rig.iter().filter(|l| l.casts_shadow > 0.0).collect();
        assert_eq!(shadowed.len(), 1);
        assert_eq!(shadowed[0].intensity, 1.2);
    }

    #[test]
    fn key_light_points_at_origin() {
        let key = LightRig::studio().as_slice()[0];
        let dir = key.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x < 0.0 && dir.y < 0.0 && dir.z < 0.0);
    }
}
