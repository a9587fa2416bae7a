use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use collision_proseco::{CircleApproximationBuilder, HierarchicalCollisionChecker, RefinementLevel};
use math_proseco::IsOnOrInside;
use crate::exact::rects_overlap;
use crate::random_footprint;

#[test]
fn circles_cover_footprint()
{
    let mut rng = StdRng::seed_from_u64(0x5eed_c1c1e);
    for _ in 0..200
    {
        let footprint = random_footprint(&mut rng, 50.0);
        let half = DVec2::new(footprint.length(), footprint.width()) / 2.0;

        let shape = footprint.decompositions();
        let [r1, r2, r3] = RefinementLevel::ALL.map(|level| shape.get(level).radius());
        assert!(r1 > r2 && r2 > r3, "radii {r1} {r2} {r3} of {footprint:?} do not shrink");

        for level in RefinementLevel::ALL
        {
            let set = CircleApproximationBuilder::build(&footprint, level);
            let mut points = Vec::from(footprint.rect().corners());
            points.extend((0..32).map(|_|
                footprint.pose().to_world(DVec2::new(rng.random_range(-half.x..=half.x), rng.random_range(-half.y..=half.y)))));

            for p in points
            {
                assert!(set.iter().any(|c| c.expanded(1e-9).rhs_is_on_or_inside(p)),
                    "{p} not covered by {level} circles of {footprint:?}");
            }
        }
    }
}

#[test]
fn no_collision_means_apart()
{
    let checker = HierarchicalCollisionChecker::new();
    let mut rng = StdRng::seed_from_u64(42);
    let mut overlapping = 0;
    let mut near_misses = 0;
    for _ in 0..5000
    {
        let a = random_footprint(&mut rng, 6.0);
        let b = random_footprint(&mut rng, 6.0);
        let outcome = checker.check(&a, &b);
        let exact = rects_overlap(&a, &b);

        // any level reporting a miss is conclusive
        for (level, collision) in outcome.per_level.iter()
        {
            assert!(collision || !exact, "{level} missed overlapping {a:?} and {b:?}");
        }
        if exact
        {
            assert!(outcome.final_result);
            overlapping += 1;
        }
        else if outcome.per_level.get(RefinementLevel::L1) == Some(true)
        {
            near_misses += 1;
        }
    }
    // the sample should exercise both sides
    assert!(overlapping > 100, "only {overlapping} overlapping pairs");
    assert!(near_misses > 100, "only {near_misses} near misses");
}

#[test]
fn symmetric()
{
    let checker = HierarchicalCollisionChecker::new();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2000
    {
        let a = random_footprint(&mut rng, 6.0);
        let b = random_footprint(&mut rng, 6.0);
        assert_eq!(checker.check(&a, &b), checker.check(&b, &a));
    }
}

#[test]
fn deterministic()
{
    let checker = HierarchicalCollisionChecker::new().with_safety_distance(0.3).unwrap();
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..500
    {
        let a = random_footprint(&mut rng, 6.0);
        let b = random_footprint(&mut rng, 6.0);
        let first = checker.check(&a, &b);
        for _ in 0..3
        {
            assert_eq!(checker.check(&a, &b), first);
        }
    }
}

#[test]
fn more_safety_never_clears()
{
    let mut rng = StdRng::seed_from_u64(99);
    let tight = HierarchicalCollisionChecker::new();
    let loose = HierarchicalCollisionChecker::new().with_safety_distance(0.5).unwrap();
    for _ in 0..2000
    {
        let a = random_footprint(&mut rng, 8.0);
        let b = random_footprint(&mut rng, 8.0);
        if tight.check(&a, &b).final_result
        {
            assert!(loose.check(&a, &b).final_result, "{a:?} {b:?}");
        }
    }
}

#[test]
fn shared_between_threads()
{
    let checker = HierarchicalCollisionChecker::new();
    let mut rng = StdRng::seed_from_u64(2024);
    let pairs: Vec<_> = (0..400).map(|_| (random_footprint(&mut rng, 6.0), random_footprint(&mut rng, 6.0))).collect();
    let expected: Vec<_> = pairs.iter().map(|(a, b)| checker.check(a, b)).collect();

    std::thread::scope(|scope|
    {
        let workers: Vec<_> = (0..8).map(|t|
        {
            let pairs = &pairs;
            let checker = &checker;
            // each thread walks the pairs from a different start
            scope.spawn(move || (0..pairs.len())
                .map(|i| (i + t * 50) % pairs.len())
                .map(|i| (i, checker.check(&pairs[i].0, &pairs[i].1)))
                .collect::<Vec<_>>())
        }).collect();

        for worker in workers
        {
            for (i, outcome) in worker.join().unwrap()
            {
                assert_eq!(outcome, expected[i]);
            }
        }
    });
}
