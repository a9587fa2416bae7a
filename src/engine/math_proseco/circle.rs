use std::fmt::{Debug, Formatter};
use glam::DVec2;
use nab_proseco::utils::ShortTypeName;
use crate::{CenterDistance, Intersection, Intersects, IsOnOrInside};

#[derive(Default, Clone, Copy, PartialEq)]
pub struct Circle
{
    center: DVec2,
    radius: f64,
}
impl Circle
{
    pub const EMPTY: Self = Self { center: DVec2::ZERO, radius: 0.0 };

    #[inline] #[must_use] pub const fn new(center: DVec2, radius: f64) -> Self
    {
        Self { center, radius }
    }

    #[inline] #[must_use] pub fn center(&self) -> DVec2 { self.center }
    #[inline] #[must_use] pub fn radius(&self) -> f64 { self.radius }
    #[inline] #[must_use] pub fn radius_squared(&self) -> f64 { self.radius * self.radius }

    #[inline] #[must_use]
    pub fn expanded(self, add_radius: f64) -> Self
    {
        Self::new(self.center, self.radius + add_radius)
    }

    // Closed disk test, touching counts. hypot keeps huge circles from overflowing
    #[inline] #[must_use]
    pub fn overlaps(&self, other: &Circle) -> bool
    {
        let delta = other.center - self.center;
        delta.x.hypot(delta.y) <= self.radius + other.radius
    }
}
impl Debug for Circle
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        f.debug_struct(Self::short_type_name())
            .field("center", &self.center)
            .field("radius", &self.radius)
            .finish()
    }
}
impl Intersects<DVec2> for Circle
{
    fn get_intersection(&self, other: DVec2) -> Intersection
    {
        match self.rhs_is_on_or_inside(other)
        {
            true => Intersection::FullyContained,
            false => Intersection::None,
        }
    }
}
impl Intersects<Circle> for Circle
{
    fn get_intersection(&self, other: Circle) -> Intersection
    {
        if self.rhs_is_on_or_inside(other)
        {
            Intersection::FullyContained
        }
        else if self.overlaps(&other)
        {
            Intersection::Overlapping
        }
        else
        {
            Intersection::None
        }
    }
}
impl IsOnOrInside<DVec2> for Circle
{
    fn rhs_is_on_or_inside(&self, other: DVec2) -> bool
    {
        self.center.distance_squared(other) <= self.radius_squared()
    }
}
impl IsOnOrInside<Circle> for Circle
{
    fn rhs_is_on_or_inside(&self, other: Circle) -> bool
    {
        self.center.distance(other.center) + other.radius <= self.radius
    }
}
impl CenterDistance<Circle> for Circle
{
    fn center_distance_sq(&self, other: Circle) -> f64 { self.center.distance_squared(other.center) }
}
impl CenterDistance<DVec2> for Circle
{
    fn center_distance_sq(&self, other: DVec2) -> f64 { self.center.distance_squared(other) }
}
impl std::ops::Add<DVec2> for Circle
{
    type Output = Circle;
    fn add(self, other: DVec2) -> Circle
    {
        Circle::new(self.center + other, self.radius)
    }
}
impl std::ops::Sub<DVec2> for Circle
{
    type Output = Circle;
    fn sub(self, other: DVec2) -> Circle
    {
        Circle::new(self.center - other, self.radius)
    }
}

#[cfg(test)]
mod tests
{
    use approx::assert_relative_eq;
    use super::*;

    #[test]
    fn basics()
    {
        let circle = Circle::new(DVec2::new(0.0, 2.0), 5.0);
        assert_eq!(circle.center(), DVec2::new(0.0, 2.0));
        assert_eq!(circle.radius(), 5.0);
        assert_eq!(circle.radius_squared(), 5.0 * 5.0);
        assert_eq!(format!("{circle:?}"), "Circle { center: DVec2(0.0, 2.0), radius: 5.0 }");
    }

    #[test]
    fn math()
    {
        let circle_a = Circle::new(DVec2::new(0.0, 2.0), 5.0);

        let circle_b = circle_a + DVec2::new(1.0, 0.0);
        assert_eq!(circle_b.center(), DVec2::new(1.0, 2.0));
        assert_eq!(circle_b.radius(), 5.0);

        let circle_c = circle_b - DVec2::new(4.0, 0.0);
        assert_eq!(circle_c.center(), DVec2::new(-3.0, 2.0));
        assert_eq!(circle_c.radius(), 5.0);

        let circle_d = circle_c.expanded(3.0);
        assert_eq!(circle_d.center(), DVec2::new(-3.0, 2.0));
        assert_eq!(circle_d.radius(), 8.0);
    }

    #[test]
    fn point_intersections()
    {
        let circle = Circle::new(DVec2::new(0.0, 2.0), 5.0);

        assert_eq!(circle.get_intersection(DVec2::ZERO), Intersection::FullyContained);
        assert!(circle.rhs_is_on_or_inside(DVec2::ZERO));

        // on the edge
        assert_eq!(circle.get_intersection(DVec2::new(0.0, 7.0)), Intersection::FullyContained);
        assert!(circle.rhs_is_on_or_inside(DVec2::new(0.0, 7.0)));

        assert_eq!(circle.get_intersection(DVec2::new(0.0, 10.0)), Intersection::None);
        assert!(!circle.rhs_is_on_or_inside(DVec2::new(0.0, 10.0)));
    }

    #[test]
    fn circle_intersections()
    {
        let circle = Circle::new(DVec2::new(0.0, 2.0), 5.0);

        let inside = Circle::new(DVec2::new(0.0, 4.0), 3.0);
        assert_eq!(circle.get_intersection(inside), Intersection::FullyContained);
        assert!(circle.overlaps(&inside));

        let partial = Circle::new(DVec2::new(0.0, 10.0), 3.0);
        assert_eq!(circle.get_intersection(partial), Intersection::Overlapping);
        assert!(circle.intersects(partial));

        let touching = Circle::new(DVec2::new(8.0, 2.0), 3.0);
        assert_eq!(circle.get_intersection(touching), Intersection::Overlapping);
        assert!(touching.overlaps(&circle));

        let far = Circle::new(DVec2::new(0.0, 100.0), 3.0);
        assert_eq!(circle.get_intersection(far), Intersection::None);
        assert!(!circle.overlaps(&far));
        assert!(!far.overlaps(&circle));
    }

    #[test]
    fn coincident_centers_overlap()
    {
        let a = Circle::new(DVec2::new(1.0, 1.0), 0.5);
        let b = Circle::new(DVec2::new(1.0, 1.0), 2.0);
        assert!(a.overlaps(&b));
        assert!(b.rhs_is_on_or_inside(a));
        assert!(!a.rhs_is_on_or_inside(b));
    }

    #[test]
    fn huge_circles_do_not_overflow()
    {
        let a = Circle::new(DVec2::ZERO, 1e200);
        let far = Circle::new(DVec2::new(1e300, 0.0), 1e200);
        assert!(!a.overlaps(&far));
        assert!(!far.overlaps(&a));

        let near = Circle::new(DVec2::new(1e200, 1e200), 1e200);
        assert!(a.overlaps(&near));
    }

    #[test]
    fn center_distances()
    {
        let a = Circle::new(DVec2::new(0.0, 0.0), 1.0);
        let b = Circle::new(DVec2::new(3.0, 4.0), 1.0);
        assert_relative_eq!(a.center_distance(b), 5.0);
        assert_relative_eq!(a.center_distance_sq(DVec2::new(1.0, 1.0)), 2.0);
    }
}
