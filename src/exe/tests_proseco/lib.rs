mod exact;
mod scenarios;
mod properties;
mod tracing;

use collision_proseco::FootprintModel;
use rand::rngs::StdRng;
use rand::Rng;

// the car used throughout: 4 long, 2 wide
pub fn car(x: f64, y: f64, heading: f64) -> FootprintModel
{
    FootprintModel::new(x, y, heading, 4.0, 2.0).unwrap()
}

pub fn random_footprint(rng: &mut StdRng, spread: f64) -> FootprintModel
{
    FootprintModel::new(
        rng.random_range(-spread..spread),
        rng.random_range(-spread..spread),
        rng.random_range(-std::f64::consts::PI..std::f64::consts::PI),
        rng.random_range(0.5..6.0),
        rng.random_range(0.3..3.0)).unwrap()
}
