use glam::DVec2;
use crate::{IsOnOrInside, Pose};

// A rectangle centered on (and aligned with) a pose. half_extents is (longitudinal, lateral)
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect
{
    pub pose: Pose,
    pub half_extents: DVec2,
}
impl OrientedRect
{
    #[inline] #[must_use]
    pub fn new(pose: Pose, length: f64, width: f64) -> Self
    {
        Self { pose, half_extents: DVec2::new(length, width) / 2.0 }
    }

    #[inline] #[must_use] pub fn size(&self) -> DVec2 { self.half_extents * 2.0 }
    #[inline] #[must_use] pub fn center(&self) -> DVec2 { self.pose.position }
    #[inline] #[must_use]
    pub fn area(&self) -> f64
    {
        let size = self.size();
        size.x * size.y
    }

    // Half of the diagonal, the radius of the smallest circle enclosing the rect
    #[inline] #[must_use]
    pub fn circumradius(&self) -> f64 { self.half_extents.length() }

    // rear-right, front-right, front-left, rear-left (counter-clockwise)
    #[must_use]
    pub fn corners(&self) -> [DVec2; 4]
    {
        const SIGNS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        SIGNS.map(|(lon, lat)| self.pose.to_world(DVec2::new(lon, lat) * self.half_extents))
    }
}
impl IsOnOrInside<DVec2> for OrientedRect
{
    fn rhs_is_on_or_inside(&self, other: DVec2) -> bool
    {
        let local = self.pose.to_local(other);
        local.abs().cmple(self.half_extents).all()
    }
}
