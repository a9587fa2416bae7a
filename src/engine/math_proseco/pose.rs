use glam::DVec2;
use serde::{Deserialize, Serialize};
use crate::Angle;

// A rigid 2D transform: a position and the heading of the local +X axis
#[derive(Debug, Default, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Pose
{
    pub position: DVec2,
    pub heading: Angle,
}
impl Pose
{
    #[inline] #[must_use]
    pub const fn new(position: DVec2, heading: Angle) -> Self { Self { position, heading } }

    #[inline] #[must_use]
    pub const fn from_xy_heading(x: f64, y: f64, heading_radians: f64) -> Self
    {
        Self::new(DVec2::new(x, y), Angle::from_radians(heading_radians))
    }

    #[inline] #[must_use] pub fn forward(&self) -> DVec2 { self.heading.direction() }
    #[inline] #[must_use] pub fn backward(&self) -> DVec2 { -self.forward() }
    #[inline] #[must_use] pub fn left(&self) -> DVec2 { self.heading.normal() }
    #[inline] #[must_use] pub fn right(&self) -> DVec2 { -self.left() }

    #[inline] #[must_use]
    pub fn is_finite(&self) -> bool { self.position.is_finite() && self.heading.is_finite() }

    // Local coordinates are (longitudinal, lateral)
    #[inline] #[must_use]
    pub fn to_world(&self, local: DVec2) -> DVec2
    {
        self.position + self.forward() * local.x + self.left() * local.y
    }

    #[inline] #[must_use]
    pub fn to_local(&self, world: DVec2) -> DVec2
    {
        let rel = world - self.position;
        DVec2::new(rel.dot(self.forward()), rel.dot(self.left()))
    }
}

impl From<(DVec2, Angle)> for Pose
{
    fn from((position, heading): (DVec2, Angle)) -> Self
    {
        Pose { position, heading }
    }
}
