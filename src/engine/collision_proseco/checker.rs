use arrayvec::ArrayVec;
use crate::config::ConfigError;
use crate::trace::{DebugTrace, LevelTrace, QueryTrace};
use crate::{FootprintModel, RefinementLevel, ShapeDecompositions};

// `None` for levels that were skipped
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutcomes([Option<bool>; 3]);
impl LevelOutcomes
{
    #[inline] #[must_use]
    pub fn get(&self, level: RefinementLevel) -> Option<bool> { self.0[level.index()] }

    #[inline]
    fn set(&mut self, level: RefinementLevel, collision: bool) { self.0[level.index()] = Some(collision); }

    // evaluated levels, coarsest first
    pub fn iter(&self) -> impl Iterator<Item = (RefinementLevel, bool)> + '_
    {
        RefinementLevel::ALL.into_iter().filter_map(|level| self.get(level).map(|c| (level, c)))
    }

    #[must_use]
    pub fn finest_evaluated(&self) -> Option<RefinementLevel>
    {
        self.iter().last().map(|(level, _)| level)
    }

    #[must_use]
    pub fn evaluated_count(&self) -> usize { self.0.iter().flatten().count() }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionOutcome
{
    pub per_level: LevelOutcomes,
    pub final_result: bool,
}
impl CollisionOutcome
{
    #[inline] #[must_use]
    pub fn is_collision(&self) -> bool { self.final_result }

    #[inline] #[must_use]
    pub fn resolved_at(&self) -> RefinementLevel
    {
        self.per_level.finest_evaluated().unwrap_or(RefinementLevel::COARSEST)
    }
}

/// Coarsest level first. A level without contact is final, otherwise the next finer one
/// is tried until `max_level`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HierarchicalCollisionChecker
{
    safety_distance: f64,
    max_level: RefinementLevel,
}
impl Default for HierarchicalCollisionChecker
{
    fn default() -> Self { Self::new() }
}
impl HierarchicalCollisionChecker
{
    #[must_use]
    pub const fn new() -> Self
    {
        Self { safety_distance: 0.0, max_level: RefinementLevel::FINEST }
    }

    pub fn with_safety_distance(self, safety_distance: f64) -> Result<Self, ConfigError>
    {
        if !safety_distance.is_finite() || safety_distance < 0.0
        {
            return Err(ConfigError::InvalidSafetyDistance(safety_distance));
        }
        Ok(Self { safety_distance, ..self })
    }

    #[must_use]
    pub const fn with_max_level(self, max_level: RefinementLevel) -> Self
    {
        Self { max_level, ..self }
    }

    #[inline] #[must_use] pub fn safety_distance(&self) -> f64 { self.safety_distance }
    #[inline] #[must_use] pub fn max_level(&self) -> RefinementLevel { self.max_level }

    #[must_use]
    pub fn check(&self, a: &FootprintModel, b: &FootprintModel) -> CollisionOutcome
    {
        self.check_up_to(a, b, self.max_level)
    }

    #[must_use]
    pub fn check_up_to(&self, a: &FootprintModel, b: &FootprintModel, max_level: RefinementLevel) -> CollisionOutcome
    {
        self.evaluate(a, &a.decompositions(), b, &b.decompositions(), max_level, None)
    }

    // sink failures are only logged
    pub fn check_traced(
        &self,
        a: &FootprintModel,
        b: &FootprintModel,
        max_level: RefinementLevel,
        frame: usize,
        sink: &dyn DebugTrace) -> CollisionOutcome
    {
        self.evaluate_traced(a, &a.decompositions(), b, &b.decompositions(), max_level, frame, Some(sink))
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn evaluate_traced(
        &self,
        a: &FootprintModel,
        a_shape: &ShapeDecompositions,
        b: &FootprintModel,
        b_shape: &ShapeDecompositions,
        max_level: RefinementLevel,
        frame: usize,
        sink: Option<&dyn DebugTrace>) -> CollisionOutcome
    {
        let Some(sink) = sink else
        {
            return self.evaluate(a, a_shape, b, b_shape, max_level, None);
        };

        let mut levels = ArrayVec::new();
        let outcome = self.evaluate(a, a_shape, b, b_shape, max_level, Some(&mut levels));
        let trace = QueryTrace { frame, footprints: [*a, *b], levels };
        if let Err(err) = sink.record(&trace)
        {
            log::warn!("Failed to record collision trace for frame {frame}: {err}");
        }
        outcome
    }

    fn evaluate(
        &self,
        a: &FootprintModel,
        a_shape: &ShapeDecompositions,
        b: &FootprintModel,
        b_shape: &ShapeDecompositions,
        max_level: RefinementLevel,
        mut trace: Option<&mut ArrayVec<LevelTrace, 3>>) -> CollisionOutcome
    {
        let mut outcome = CollisionOutcome::default();
        let mut level = RefinementLevel::COARSEST;
        loop
        {
            let circles_a = a_shape.get(level).place(&a.pose());
            let circles_b = b_shape.get(level).place(&b.pose());
            let collision = circles_a.overlaps_any(&circles_b, self.safety_distance);

            outcome.per_level.set(level, collision);
            outcome.final_result = collision;
            log::trace!("{level}: collision={collision}");

            if let Some(levels) = trace.as_deref_mut()
            {
                levels.push(LevelTrace { level, circles: [circles_a, circles_b], collision });
            }

            if !collision
            {
                break;
            }
            match level.next()
            {
                Some(next) if next <= max_level => level = next,
                _ => break,
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::trace::{TraceBuffer, TraceError};

    fn footprint(x: f64, y: f64, heading: f64) -> FootprintModel
    {
        FootprintModel::new(x, y, heading, 4.0, 2.0).unwrap()
    }

    fn levels_of(outcome: &CollisionOutcome) -> [Option<bool>; 3]
    {
        RefinementLevel::ALL.map(|level| outcome.per_level.get(level))
    }

    #[test]
    fn defaults()
    {
        let checker = HierarchicalCollisionChecker::default();
        assert_eq!(checker.safety_distance(), 0.0);
        assert_eq!(checker.max_level(), RefinementLevel::L3);
        assert_eq!(checker, HierarchicalCollisionChecker::new());
    }

    #[test]
    fn far_apart_stops_at_first_level()
    {
        let outcome = HierarchicalCollisionChecker::new().check(&footprint(0.0, 0.0, 0.0), &footprint(20.0, 0.0, 0.0));
        assert_eq!(levels_of(&outcome), [Some(false), None, None]);
        assert!(!outcome.is_collision());
        assert_eq!(outcome.resolved_at(), RefinementLevel::L1);
        assert_eq!(outcome.per_level.evaluated_count(), 1);
    }

    #[test]
    fn corner_overlap_collides_at_every_level()
    {
        let outcome = HierarchicalCollisionChecker::new().check(&footprint(0.0, 0.0, 0.0), &footprint(3.9, 1.9, 0.0));
        assert_eq!(levels_of(&outcome), [Some(true), Some(true), Some(true)]);
        assert!(outcome.is_collision());
        assert_eq!(outcome.resolved_at(), RefinementLevel::L3);
    }

    #[test]
    fn near_miss_resolved_by_finest_level()
    {
        let outcome = HierarchicalCollisionChecker::new().check(&footprint(0.0, 0.0, 0.0), &footprint(2.6, 2.2, 0.0));
        assert_eq!(levels_of(&outcome), [Some(true), Some(true), Some(false)]);
        assert!(!outcome.final_result);
    }

    #[test]
    fn capped_level_keeps_coarse_verdict()
    {
        let checker = HierarchicalCollisionChecker::new();
        let a = footprint(0.0, 0.0, 0.0);
        let b = footprint(2.6, 2.2, 0.0);

        let outcome = checker.check_up_to(&a, &b, RefinementLevel::L1);
        assert_eq!(levels_of(&outcome), [Some(true), None, None]);
        assert!(outcome.final_result);

        let outcome = checker.with_max_level(RefinementLevel::L2).check(&a, &b);
        assert_eq!(levels_of(&outcome), [Some(true), Some(true), None]);
        assert!(outcome.final_result);
        assert_eq!(outcome.resolved_at(), RefinementLevel::L2);
    }

    #[test]
    fn identical_footprints_collide()
    {
        let a = footprint(5.0, -3.0, 1.1);
        let outcome = HierarchicalCollisionChecker::new().check(&a, &a);
        assert_eq!(levels_of(&outcome), [Some(true), Some(true), Some(true)]);
    }

    #[test]
    fn safety_distance_grows_contact()
    {
        let a = footprint(0.0, 0.0, 0.0);
        let b = footprint(2.6, 2.2, 0.0);
        // finest level misses by ~0.135
        let checker = HierarchicalCollisionChecker::new().with_safety_distance(0.2).unwrap();
        assert!(checker.check(&a, &b).final_result);

        let checker = HierarchicalCollisionChecker::new().with_safety_distance(0.1).unwrap();
        assert!(!checker.check(&a, &b).final_result);

        assert!(matches!(HierarchicalCollisionChecker::new().with_safety_distance(-0.5), Err(ConfigError::InvalidSafetyDistance(_))));
        assert!(HierarchicalCollisionChecker::new().with_safety_distance(f64::NAN).is_err());
    }

    #[test]
    fn symmetric()
    {
        let checker = HierarchicalCollisionChecker::new();
        let a = footprint(0.0, 0.0, 0.0);
        for b in [footprint(2.6, 2.2, 0.0), footprint(3.4, 2.4, std::f64::consts::FRAC_PI_4), footprint(1.0, 2.2, 0.0), footprint(-8.0, 1.0, 2.0)]
        {
            assert_eq!(checker.check(&a, &b), checker.check(&b, &a));
        }
    }

    #[test]
    fn traced_matches_untraced()
    {
        let checker = HierarchicalCollisionChecker::new();
        let buffer = TraceBuffer::new();
        let a = footprint(0.0, 0.0, 0.0);
        let b = footprint(2.6, 2.2, 0.0);

        let traced = checker.check_traced(&a, &b, RefinementLevel::L3, 4, &buffer);
        assert_eq!(traced, checker.check(&a, &b));

        let traces = buffer.take();
        assert_eq!(traces.len(), 1);
        let trace = &traces[0];
        assert_eq!(trace.frame, 4);
        assert_eq!(trace.footprints, [a, b]);
        assert_eq!(trace.levels.iter().map(|l| (l.level, l.collision)).collect::<Vec<_>>(),
            vec![(RefinementLevel::L1, true), (RefinementLevel::L2, true), (RefinementLevel::L3, false)]);
        for level in &trace.levels
        {
            assert_eq!(level.circles[0].len(), level.level.circle_count());
            assert_eq!(level.circles[1].len(), level.level.circle_count());
        }
    }

    #[test]
    fn huge_footprints_far_apart()
    {
        let a = FootprintModel::new(0.0, 0.0, 0.0, 4.0, 1e200).unwrap();
        let b = FootprintModel::new(1e300, 0.0, 0.0, 4.0, 1e200).unwrap();
        assert!(a.decompositions().get(RefinementLevel::L1).radius().is_finite());

        let outcome = HierarchicalCollisionChecker::new().check(&a, &b);
        assert_eq!(levels_of(&outcome), [Some(false), None, None]);
        assert!(!outcome.final_result);
    }

    struct FailingSink;
    impl DebugTrace for FailingSink
    {
        fn record(&self, _trace: &QueryTrace) -> Result<(), TraceError>
        {
            Err(TraceError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn failing_sink_does_not_change_outcome()
    {
        let checker = HierarchicalCollisionChecker::new();
        let a = footprint(0.0, 0.0, 0.0);
        let b = footprint(3.9, 1.9, 0.0);
        assert_eq!(checker.check_traced(&a, &b, RefinementLevel::L3, 0, &FailingSink), checker.check(&a, &b));
    }
}
