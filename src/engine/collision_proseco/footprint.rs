use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use glam::DVec2;
use math_proseco::{Angle, OrientedRect, Pose};
use crate::ShapeDecompositions;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidGeometry
{
    NonPositiveLength(f64),
    NonPositiveWidth(f64),
    NonFiniteDimensions
    {
        length: f64,
        width: f64,
    },
    NonFinitePosition
    {
        x: f64,
        y: f64,
    },
    NonFiniteHeading(f64),
}
impl Display for InvalidGeometry
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { Debug::fmt(self, f) }
}
impl Error for InvalidGeometry { }

// The pose is the rectangle's center, the heading points along its length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintModel
{
    pose: Pose,
    length: f64,
    width: f64,
}
impl FootprintModel
{
    pub fn new(x: f64, y: f64, heading: f64, length: f64, width: f64) -> Result<Self, InvalidGeometry>
    {
        Self::from_pose(Pose::from_xy_heading(x, y, heading), length, width)
    }

    pub fn from_pose(pose: Pose, length: f64, width: f64) -> Result<Self, InvalidGeometry>
    {
        if !length.is_finite() || !width.is_finite()
        {
            return Err(InvalidGeometry::NonFiniteDimensions { length, width });
        }
        if length <= 0.0
        {
            return Err(InvalidGeometry::NonPositiveLength(length));
        }
        if width <= 0.0
        {
            return Err(InvalidGeometry::NonPositiveWidth(width));
        }
        Self::validate_pose(&pose)?;

        Ok(Self { pose, length, width })
    }

    // Same shape at a different pose
    pub fn with_pose(&self, pose: Pose) -> Result<Self, InvalidGeometry>
    {
        Self::validate_pose(&pose)?;
        Ok(Self { pose, ..*self })
    }

    fn validate_pose(pose: &Pose) -> Result<(), InvalidGeometry>
    {
        if !pose.position.is_finite()
        {
            return Err(InvalidGeometry::NonFinitePosition { x: pose.position.x, y: pose.position.y });
        }
        if !pose.heading.is_finite()
        {
            return Err(InvalidGeometry::NonFiniteHeading(pose.heading.to_radians()));
        }
        Ok(())
    }

    #[inline] #[must_use] pub fn x(&self) -> f64 { self.pose.position.x }
    #[inline] #[must_use] pub fn y(&self) -> f64 { self.pose.position.y }
    #[inline] #[must_use] pub fn position(&self) -> DVec2 { self.pose.position }
    // radians
    #[inline] #[must_use] pub fn heading(&self) -> f64 { self.pose.heading.to_radians() }
    #[inline] #[must_use] pub fn heading_angle(&self) -> Angle { self.pose.heading }
    #[inline] #[must_use] pub fn pose(&self) -> Pose { self.pose }
    #[inline] #[must_use] pub fn length(&self) -> f64 { self.length }
    #[inline] #[must_use] pub fn width(&self) -> f64 { self.width }

    #[inline] #[must_use]
    pub fn rect(&self) -> OrientedRect { OrientedRect::new(self.pose, self.length, self.width) }

    #[inline] #[must_use]
    pub fn decompositions(&self) -> ShapeDecompositions { ShapeDecompositions::new(self.length, self.width) }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn accessors()
    {
        let footprint = FootprintModel::new(1.0, -2.0, 0.5, 4.0, 2.0).unwrap();
        assert_eq!(footprint.x(), 1.0);
        assert_eq!(footprint.y(), -2.0);
        assert_eq!(footprint.position(), DVec2::new(1.0, -2.0));
        assert_eq!(footprint.heading(), 0.5);
        assert_eq!(footprint.heading_angle(), Angle::from_radians(0.5));
        assert_eq!(footprint.length(), 4.0);
        assert_eq!(footprint.width(), 2.0);
        assert_eq!(footprint.rect().size(), DVec2::new(4.0, 2.0));
    }

    #[test]
    fn rejects_bad_dimensions()
    {
        assert_eq!(FootprintModel::new(0.0, 0.0, 0.0, 0.0, 2.0), Err(InvalidGeometry::NonPositiveLength(0.0)));
        assert_eq!(FootprintModel::new(0.0, 0.0, 0.0, -3.0, 2.0), Err(InvalidGeometry::NonPositiveLength(-3.0)));
        assert_eq!(FootprintModel::new(0.0, 0.0, 0.0, 4.0, -1.0), Err(InvalidGeometry::NonPositiveWidth(-1.0)));
        assert_eq!(FootprintModel::new(0.0, 0.0, 0.0, 4.0, 0.0), Err(InvalidGeometry::NonPositiveWidth(0.0)));
        assert!(matches!(FootprintModel::new(0.0, 0.0, 0.0, f64::NAN, 2.0), Err(InvalidGeometry::NonFiniteDimensions { .. })));
        assert!(matches!(FootprintModel::new(0.0, 0.0, 0.0, 4.0, f64::INFINITY), Err(InvalidGeometry::NonFiniteDimensions { .. })));
    }

    #[test]
    fn rejects_bad_pose()
    {
        assert!(matches!(FootprintModel::new(f64::NAN, 0.0, 0.0, 4.0, 2.0), Err(InvalidGeometry::NonFinitePosition { .. })));
        assert!(matches!(FootprintModel::new(0.0, f64::NEG_INFINITY, 0.0, 4.0, 2.0), Err(InvalidGeometry::NonFinitePosition { .. })));
        assert!(matches!(FootprintModel::new(0.0, 0.0, f64::NAN, 4.0, 2.0), Err(InvalidGeometry::NonFiniteHeading(_))));
    }

    #[test]
    fn reposing_keeps_shape()
    {
        let footprint = FootprintModel::new(0.0, 0.0, 0.0, 4.0, 2.0).unwrap();
        let moved = footprint.with_pose(Pose::from_xy_heading(10.0, 3.0, 1.0)).unwrap();
        assert_eq!(moved.length(), 4.0);
        assert_eq!(moved.width(), 2.0);
        assert_eq!(moved.position(), DVec2::new(10.0, 3.0));

        assert!(footprint.with_pose(Pose::from_xy_heading(0.0, 0.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn errors_display()
    {
        let err = FootprintModel::new(0.0, 0.0, 0.0, 0.0, 2.0).unwrap_err();
        assert_eq!(err.to_string(), "NonPositiveLength(0.0)");
    }
}
