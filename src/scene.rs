use glam::Vec3;

use crate::sphere::Sphere;

/// Color of pixels whose ray does not resolve to a sphere.
pub const BACKGROUND_COLOR: Vec3 = Vec3::splat(0.1);

#[derive(Debug, Clone, PartialEq)]
pub struct RenderScene {
    pub spheres: Vec<Sphere>,
}

impl RenderScene {
    pub fn new(spheres: Vec<Sphere>) -> RenderScene {
        RenderScene { spheres }
    }
}
