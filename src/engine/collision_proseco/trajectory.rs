use math_proseco::Pose;
use crate::trace::DebugTrace;
use crate::{CollisionOutcome, FootprintModel, HierarchicalCollisionChecker, InvalidGeometry, ShapeDecompositions};

// The rectangle is decomposed once and reused for every step
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory
{
    footprints: Vec<FootprintModel>,
    shape: ShapeDecompositions,
}
impl Trajectory
{
    pub fn new(length: f64, width: f64, poses: impl IntoIterator<Item = Pose>) -> Result<Self, InvalidGeometry>
    {
        let footprints = poses.into_iter()
            .map(|pose| FootprintModel::from_pose(pose, length, width))
            .collect::<Result<Vec<_>, _>>()?;

        if footprints.is_empty()
        {
            // still validate the shape
            FootprintModel::from_pose(Pose::default(), length, width)?;
        }
        Ok(Self { footprints, shape: ShapeDecompositions::new(length, width) })
    }

    // A vehicle standing still for `steps` steps
    #[must_use]
    pub fn stationary(footprint: FootprintModel, steps: usize) -> Self
    {
        Self
        {
            footprints: vec![footprint; steps],
            shape: footprint.decompositions(),
        }
    }

    #[inline] #[must_use] pub fn len(&self) -> usize { self.footprints.len() }
    #[inline] #[must_use] pub fn is_empty(&self) -> bool { self.footprints.is_empty() }
    #[inline] #[must_use] pub fn footprints(&self) -> &[FootprintModel] { &self.footprints }
    #[inline] #[must_use] pub fn get(&self, step: usize) -> Option<&FootprintModel> { self.footprints.get(step) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectoryCollision
{
    pub step: usize,
    pub outcome: CollisionOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleCollision
{
    pub step: usize,
    pub obstacle_index: usize,
    pub outcome: CollisionOutcome,
}

impl HierarchicalCollisionChecker
{
    /// Step by step over the shorter trajectory, stopping at the first collision
    pub fn check_trajectories(&self, a: &Trajectory, b: &Trajectory, sink: Option<&dyn DebugTrace>) -> Option<TrajectoryCollision>
    {
        puffin::profile_function!();

        if a.len() != b.len()
        {
            log::debug!("Comparing trajectories of different lengths ({} and {}), extra steps are ignored", a.len(), b.len());
        }

        for (step, (fa, fb)) in a.footprints.iter().zip(b.footprints.iter()).enumerate()
        {
            let outcome = self.evaluate_traced(fa, &a.shape, fb, &b.shape, self.max_level(), step, sink);
            if outcome.final_result
            {
                log::debug!("Trajectories collide at step {step} ({})", outcome.resolved_at());
                return Some(TrajectoryCollision { step, outcome });
            }
        }
        None
    }

    // queries are traced as successive frames
    pub fn check_trajectory_against_obstacles(
        &self,
        trajectory: &Trajectory,
        obstacles: &[FootprintModel],
        sink: Option<&dyn DebugTrace>) -> Option<ObstacleCollision>
    {
        puffin::profile_function!();

        let obstacle_shapes: Vec<_> = obstacles.iter().map(FootprintModel::decompositions).collect();
        let mut frame = 0;
        for (step, footprint) in trajectory.footprints.iter().enumerate()
        {
            for (obstacle_index, (obstacle, obstacle_shape)) in obstacles.iter().zip(&obstacle_shapes).enumerate()
            {
                let outcome = self.evaluate_traced(footprint, &trajectory.shape, obstacle, obstacle_shape, self.max_level(), frame, sink);
                frame += 1;
                if outcome.final_result
                {
                    log::debug!("Trajectory hits obstacle {obstacle_index} at step {step} ({})", outcome.resolved_at());
                    return Some(ObstacleCollision { step, obstacle_index, outcome });
                }
            }
        }
        None
    }

    /// The index of the first obstacle `footprint` collides with
    #[must_use]
    pub fn check_obstacles(&self, footprint: &FootprintModel, obstacles: &[FootprintModel]) -> Option<usize>
    {
        puffin::profile_function!();

        let shape = footprint.decompositions();
        obstacles.iter().position(|obstacle|
            self.evaluate_traced(footprint, &shape, obstacle, &obstacle.decompositions(), self.max_level(), 0, None).final_result)
    }
}
