use glam::{vec3, Vec3};

// orthographic window of the reference render, in world units
pub const LEFT: f32 = -10.0;
pub const BOTTOM: f32 = -10.0;
pub const WIDTH: f32 = 20.0;
pub const HEIGHT: f32 = 20.0;
pub const NEAR: f32 = -10.0;
pub const FAR: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// distance to the closest accepted hit so far
    pub max_t: f32,
}

/// Camera looking down +Z where every pixel gets a parallel ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        OrthoCamera {
            left: LEFT,
            bottom: BOTTOM,
            width: WIDTH,
            height: HEIGHT,
            near: NEAR,
            far: FAR,
        }
    }
}

impl OrthoCamera {
    /// Builds the ray through the center of pixel `(i, j)` of an
    /// `image_width` x `image_height` image.
    pub fn ray_for_pixel(&self, i: u32, j: u32, image_width: u32, image_height: u32) -> Ray {
        let x = self.left + (self.width / image_width as f32) * (i as f32 + 0.5);
        let y = self.bottom + (self.height / image_height as f32) * (j as f32 + 0.5);

        Ray {
            origin: vec3(x, y, self.near),
            direction: Vec3::Z,
            max_t: self.far - self.near,
        }
    }
}
