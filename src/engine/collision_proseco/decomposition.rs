use std::error::Error;
use std::fmt::{Display, Formatter};
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use math_proseco::{Circle, Pose};
use crate::FootprintModel;

pub const MAX_CIRCLES: usize = RefinementLevel::FINEST.circle_count();

// Each finer level covers the rectangle with more, smaller circles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RefinementLevel
{
    L1,
    L2,
    L3,
}
impl RefinementLevel
{
    pub const ALL: [Self; 3] = [Self::L1, Self::L2, Self::L3];
    pub const COARSEST: Self = Self::L1;
    pub const FINEST: Self = Self::L3;

    #[inline] #[must_use]
    pub const fn circle_count(self) -> usize
    {
        match self
        {
            Self::L1 => 1,
            Self::L2 => 3,
            Self::L3 => 7,
        }
    }

    #[inline] #[must_use]
    pub const fn index(self) -> usize { self as usize }

    #[must_use]
    pub const fn from_circle_count(count: usize) -> Option<Self>
    {
        match count
        {
            1 => Some(Self::L1),
            3 => Some(Self::L2),
            7 => Some(Self::L3),
            _ => None,
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self>
    {
        match self
        {
            Self::L1 => Some(Self::L2),
            Self::L2 => Some(Self::L3),
            Self::L3 => None,
        }
    }
}
impl Display for RefinementLevel
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{:?} ({} circles)", self, self.circle_count())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRefinementLevel(pub u32);
impl Display for InvalidRefinementLevel
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{} is not a circle count of any refinement level (expected 1, 3, or 7)", self.0)
    }
}
impl Error for InvalidRefinementLevel { }

// Levels are written as their circle count in config files
impl TryFrom<u32> for RefinementLevel
{
    type Error = InvalidRefinementLevel;
    fn try_from(count: u32) -> Result<Self, Self::Error>
    {
        Self::from_circle_count(count as usize).ok_or(InvalidRefinementLevel(count))
    }
}
impl From<RefinementLevel> for u32
{
    fn from(level: RefinementLevel) -> Self { level.circle_count() as u32 }
}

// n equal cells along the length, each covered by the circle through its corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleDecomposition
{
    level: RefinementLevel,
    length: f64,
    radius: f64,
    spacing: f64,
}
impl RectangleDecomposition
{
    #[must_use]
    pub fn new(length: f64, width: f64, level: RefinementLevel) -> Self
    {
        let spacing = length / level.circle_count() as f64;
        let radius = (width / 2.0).hypot(spacing / 2.0);
        Self { level, length, radius, spacing }
    }

    #[inline] #[must_use] pub fn level(&self) -> RefinementLevel { self.level }
    #[inline] #[must_use] pub fn radius(&self) -> f64 { self.radius }
    // distance between neighboring circle centers
    #[inline] #[must_use] pub fn spacing(&self) -> f64 { self.spacing }
    #[inline] #[must_use] pub fn circle_count(&self) -> usize { self.level.circle_count() }

    // Longitudinal offset of circle `index` from the rectangle center, rear to front
    #[inline] #[must_use]
    pub fn offset(&self, index: usize) -> f64
    {
        -self.length / 2.0 + self.spacing * (index as f64 + 0.5)
    }

    #[must_use]
    pub fn place(&self, pose: &Pose) -> CircleSet
    {
        let forward = pose.forward();
        let circles = (0..self.circle_count())
            .map(|i| Circle::new(pose.position + forward * self.offset(i), self.radius))
            .collect();
        CircleSet { level: self.level, circles }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDecompositions([RectangleDecomposition; 3]);
impl ShapeDecompositions
{
    #[must_use]
    pub fn new(length: f64, width: f64) -> Self
    {
        Self(RefinementLevel::ALL.map(|level| RectangleDecomposition::new(length, width, level)))
    }

    #[inline] #[must_use]
    pub fn get(&self, level: RefinementLevel) -> &RectangleDecomposition { &self.0[level.index()] }
}

// ordered rear to front
#[derive(Debug, Clone, PartialEq)]
pub struct CircleSet
{
    level: RefinementLevel,
    circles: ArrayVec<Circle, MAX_CIRCLES>,
}
impl CircleSet
{
    #[inline] #[must_use] pub fn level(&self) -> RefinementLevel { self.level }
    #[inline] #[must_use] pub fn circles(&self) -> &[Circle] { &self.circles }
    #[inline] #[must_use] pub fn len(&self) -> usize { self.circles.len() }
    #[inline] #[must_use] pub fn is_empty(&self) -> bool { self.circles.is_empty() }
    #[inline] pub fn iter(&self) -> impl Iterator<Item = &Circle> { self.circles.iter() }

    // `safety_distance` grows the circles of `self` only
    #[must_use]
    pub fn overlaps_any(&self, other: &CircleSet, safety_distance: f64) -> bool
    {
        self.circles.iter().any(|a|
        {
            let grown = a.expanded(safety_distance);
            other.circles.iter().any(|b| grown.overlaps(b))
        })
    }
}

pub struct CircleApproximationBuilder;
impl CircleApproximationBuilder
{
    #[must_use]
    pub fn build(footprint: &FootprintModel, level: RefinementLevel) -> CircleSet
    {
        RectangleDecomposition::new(footprint.length(), footprint.width(), level).place(&footprint.pose())
    }
}
