use std::fmt::{Display, Formatter};
use std::ops::Neg;

use glam::DVec2;
use serde::{Deserialize, Serialize};

// Angle, stored as radians internally. Zero points along +X, positive is counter-clockwise
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64);
impl Angle
{
    pub const ZERO: Self = Self::from_radians(0.0);
    pub const PI: Self = Self::from_radians(std::f64::consts::PI);
    pub const TWO_PI: Self = Self::from_radians(std::f64::consts::TAU);
    pub const PI_OVER_TWO: Self = Self::from_radians(std::f64::consts::FRAC_PI_2);
    pub const PI_OVER_FOUR: Self = Self::from_radians(std::f64::consts::FRAC_PI_4);

    #[inline] #[must_use]
    pub const fn from_radians(radians: f64) -> Self { Self(radians) }
    #[inline] #[must_use]
    pub const fn from_degrees(degrees: f64) -> Self { Self(degrees.to_radians()) }

    #[inline] #[must_use]
    pub const fn to_radians(self) -> f64 { self.0 }
    #[inline] #[must_use]
    pub const fn to_degrees(self) -> f64 { self.0.to_degrees() }

    #[inline] #[must_use]
    pub fn is_finite(self) -> bool { self.0.is_finite() }

    // Unit vector pointing along this angle
    #[inline] #[must_use]
    pub fn direction(self) -> DVec2
    {
        let (sin, cos) = self.0.sin_cos();
        DVec2::new(cos, sin)
    }

    // Unit vector perpendicular to direction(), rotated a quarter turn counter-clockwise
    #[inline] #[must_use]
    pub fn normal(self) -> DVec2
    {
        let (sin, cos) = self.0.sin_cos();
        DVec2::new(-sin, cos)
    }
}
// Display the angle, by default as radians, alternatively as degrees
impl Display for Angle
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        if f.alternate()
        {
            f.write_fmt(format_args!("{:.1}deg", self.to_degrees()))
        }
        else
        {
            f.write_fmt(format_args!("{:.3}rad", self.to_radians()))
        }
    }
}
impl Neg for Angle
{
    type Output = Self;
    fn neg(self) -> Self { Self(-self.0) }
}
impl From<f64> for Angle
{
    fn from(radians: f64) -> Self { Self::from_radians(radians) }
}
