use glam::DVec2;
use collision_proseco::FootprintModel;

fn project(corners: &[DVec2; 4], axis: DVec2) -> (f64, f64)
{
    corners.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c|
    {
        let dot = c.dot(axis);
        (lo.min(dot), hi.max(dot))
    })
}

/// Separating axis test of the true rectangles. Touching counts as overlap
pub fn rects_overlap(a: &FootprintModel, b: &FootprintModel) -> bool
{
    let corners_a = a.rect().corners();
    let corners_b = b.rect().corners();
    for corners in [&corners_a, &corners_b]
    {
        // opposite edges share an axis
        for i in 0..2
        {
            let axis = (corners[i + 1] - corners[i]).perp();
            let (min_a, max_a) = project(&corners_a, axis);
            let (min_b, max_b) = project(&corners_b, axis);
            if max_a < min_b || max_b < min_a
            {
                return false;
            }
        }
    }
    true
}

#[test]
fn oracle_sanity()
{
    use crate::car;

    assert!(rects_overlap(&car(0.0, 0.0, 0.0), &car(3.9, 1.9, 0.0)));
    assert!(rects_overlap(&car(0.0, 0.0, 0.0), &car(3.4, 2.4, std::f64::consts::FRAC_PI_4)));
    assert!(!rects_overlap(&car(0.0, 0.0, 0.0), &car(2.6, 2.2, 0.0)));
    assert!(!rects_overlap(&car(0.0, 0.0, 0.0), &car(4.1, 1.9, 0.0)));
    assert!(!rects_overlap(&car(0.0, 0.0, 0.0), &car(20.0, 0.0, 0.0)));
    // diagonal near miss that only a rotated axis separates
    assert!(!rects_overlap(&car(0.0, 0.0, std::f64::consts::FRAC_PI_4), &car(2.2, 2.2, std::f64::consts::FRAC_PI_4 + std::f64::consts::FRAC_PI_2)));
}
