use approx::assert_relative_eq;
use collision_proseco::{CircleApproximationBuilder, CollisionOutcome, FootprintModel, HierarchicalCollisionChecker, InvalidGeometry, RefinementLevel};
use crate::car;
use crate::exact::rects_overlap;

fn levels(outcome: &CollisionOutcome) -> [Option<bool>; 3]
{
    RefinementLevel::ALL.map(|level| outcome.per_level.get(level))
}

#[test]
fn corner_overlap()
{
    let (a, b) = (car(0.0, 0.0, 0.0), car(3.9, 1.9, 0.0));
    let outcome = HierarchicalCollisionChecker::new().check(&a, &b);
    assert_eq!(levels(&outcome), [Some(true), Some(true), Some(true)]);
    assert!(outcome.final_result);
    assert!(rects_overlap(&a, &b));
}

#[test]
fn corner_near_miss()
{
    let (a, b) = (car(0.0, 0.0, 0.0), car(2.6, 2.2, 0.0));
    let outcome = HierarchicalCollisionChecker::new().check(&a, &b);
    assert_eq!(levels(&outcome), [Some(true), Some(true), Some(false)]);
    assert!(!outcome.final_result);
    assert!(!rects_overlap(&a, &b));
}

#[test]
fn side_by_side_near_miss()
{
    let (a, b) = (car(0.0, 0.0, 0.0), car(1.0, 2.2, 0.0));
    let outcome = HierarchicalCollisionChecker::new().check(&a, &b);
    assert_eq!(levels(&outcome), [Some(true), Some(true), Some(false)]);
    assert!(!rects_overlap(&a, &b));
}

#[test]
fn far_apart()
{
    let outcome = HierarchicalCollisionChecker::new().check(&car(0.0, 0.0, 0.0), &car(20.0, 0.0, 0.0));
    assert_eq!(levels(&outcome), [Some(false), None, None]);
    assert!(!outcome.final_result);
}

#[test]
fn identical_pose()
{
    let a = car(-3.0, 7.0, 2.0);
    let outcome = HierarchicalCollisionChecker::new().check(&a, &a);
    assert_eq!(levels(&outcome), [Some(true), Some(true), Some(true)]);
}

#[test]
fn rotated_overlap()
{
    let (a, b) = (car(0.0, 0.0, 0.0), car(3.4, 2.4, std::f64::consts::FRAC_PI_4));
    let outcome = HierarchicalCollisionChecker::new().check(&a, &b);
    assert_eq!(levels(&outcome), [Some(true), Some(true), Some(true)]);
    assert!(rects_overlap(&a, &b));
}

#[test]
fn coarse_miss_is_final()
{
    // the single circles miss by a hair while the finer circles would touch,
    // the rectangles themselves are apart so stopping early is still right
    let (a, b) = (car(0.0, 0.0, 0.0), car(4.1, 1.9, 0.0));
    let outcome = HierarchicalCollisionChecker::new().check(&a, &b);
    assert_eq!(levels(&outcome), [Some(false), None, None]);

    let fine_a = CircleApproximationBuilder::build(&a, RefinementLevel::L3);
    let fine_b = CircleApproximationBuilder::build(&b, RefinementLevel::L3);
    assert!(fine_a.overlaps_any(&fine_b, 0.0));
    assert!(!rects_overlap(&a, &b));
}

#[test]
fn capped_levels()
{
    let checker = HierarchicalCollisionChecker::new();
    let (a, b) = (car(0.0, 0.0, 0.0), car(2.6, 2.2, 0.0));

    let l1 = checker.check_up_to(&a, &b, RefinementLevel::L1);
    assert_eq!(levels(&l1), [Some(true), None, None]);
    assert!(l1.final_result);

    let l2 = checker.check_up_to(&a, &b, RefinementLevel::L2);
    assert_eq!(levels(&l2), [Some(true), Some(true), None]);
    assert!(l2.final_result);

    // a level that misses still stops the query below the cap
    let far = checker.check_up_to(&a, &car(20.0, 0.0, 0.0), RefinementLevel::L2);
    assert_eq!(levels(&far), [Some(false), None, None]);
}

#[test]
fn safety_distance()
{
    let (a, b) = (car(0.0, 0.0, 0.0), car(1.0, 2.2, 0.0));
    // finest circles miss by ~0.125
    for (safety, expected) in [(0.0, false), (0.1, false), (0.15, true), (1.0, true)]
    {
        let checker = HierarchicalCollisionChecker::new().with_safety_distance(safety).unwrap();
        assert_eq!(checker.check(&a, &b).final_result, expected, "safety {safety}");
    }
}

#[test]
fn invalid_geometry()
{
    assert_eq!(FootprintModel::new(0.0, 0.0, 0.0, 0.0, 2.0), Err(InvalidGeometry::NonPositiveLength(0.0)));
    assert_eq!(FootprintModel::new(0.0, 0.0, 0.0, 4.0, -1.0), Err(InvalidGeometry::NonPositiveWidth(-1.0)));
    assert!(matches!(FootprintModel::new(0.0, 0.0, f64::NAN, 4.0, 2.0), Err(InvalidGeometry::NonFiniteHeading(h)) if h.is_nan()));
}

#[test]
fn radii_per_level()
{
    let footprint = car(0.0, 0.0, 0.0);
    let radii = RefinementLevel::ALL.map(|level| CircleApproximationBuilder::build(&footprint, level).circles()[0].radius());
    assert_relative_eq!(radii[0], 2.2360680, epsilon = 1e-7);
    assert_relative_eq!(radii[1], 1.2018504, epsilon = 1e-7);
    assert_relative_eq!(radii[2], 1.0400157, epsilon = 1e-7);
}
