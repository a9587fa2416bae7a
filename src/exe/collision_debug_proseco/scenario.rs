use serde::Deserialize;
use collision_proseco::config::{CollisionCheckerConfig, TomlRead};
use collision_proseco::csv_trace::CsvTraceWriter;
use collision_proseco::trace::DebugTrace;
use collision_proseco::{FootprintModel, HierarchicalCollisionChecker, InvalidGeometry, ObstacleCollision, Trajectory, TrajectoryCollision};
use math_proseco::Pose;

#[derive(Debug, Deserialize)]
pub struct VehicleTrack
{
    pub name: String,
    pub length: f64,
    pub width: f64,
    pub poses: Vec<Pose>,
}

#[derive(Debug, Deserialize)]
pub struct Obstacle
{
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub heading: f64,
    pub length: f64,
    pub width: f64,
}
impl Obstacle
{
    pub fn footprint(&self) -> Result<FootprintModel, InvalidGeometry>
    {
        FootprintModel::new(self.x, self.y, self.heading, self.length, self.width)
    }
}

#[derive(Debug, Deserialize)]
pub struct Scenario
{
    #[serde(default)]
    pub checker: CollisionCheckerConfig,
    #[serde(default)]
    pub vehicles: Vec<VehicleTrack>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}
impl TomlRead for Scenario { }

#[derive(Debug)]
pub enum SweepResult<'s>
{
    Vehicles
    {
        a: &'s str,
        b: &'s str,
        hit: Option<TrajectoryCollision>,
    },
    Obstacles
    {
        vehicle: &'s str,
        hit: Option<ObstacleCollision>,
        obstacle: Option<&'s str>,
    },
}

impl Scenario
{
    // every pair of vehicles, then every vehicle against the obstacles, each sweep tracing into its own subdirectory
    pub fn run(&self, checker: &HierarchicalCollisionChecker, trace: Option<&CsvTraceWriter>) -> Result<Vec<SweepResult<'_>>, InvalidGeometry>
    {
        let trajectories = self.vehicles.iter()
            .map(|v| Trajectory::new(v.length, v.width, v.poses.iter().copied()))
            .collect::<Result<Vec<_>, _>>()?;
        let obstacles = self.obstacles.iter()
            .map(Obstacle::footprint)
            .collect::<Result<Vec<_>, _>>()?;

        let mut results = Vec::new();
        for (i, (va, ta)) in self.vehicles.iter().zip(&trajectories).enumerate()
        {
            for (vb, tb) in self.vehicles.iter().zip(&trajectories).skip(i + 1)
            {
                let writer = trace.map(|w| w.in_subdirectory(format!("{}-{}", va.name, vb.name)));
                let hit = checker.check_trajectories(ta, tb, writer.as_ref().map(|w| w as &dyn DebugTrace));
                results.push(SweepResult::Vehicles { a: &va.name, b: &vb.name, hit });
            }
        }

        if !obstacles.is_empty()
        {
            for (vehicle, trajectory) in self.vehicles.iter().zip(&trajectories)
            {
                let writer = trace.map(|w| w.in_subdirectory(format!("{}-obstacles", vehicle.name)));
                let hit = checker.check_trajectory_against_obstacles(trajectory, &obstacles, writer.as_ref().map(|w| w as &dyn DebugTrace));
                let obstacle = hit.map(|h| self.obstacles[h.obstacle_index].name.as_str());
                results.push(SweepResult::Obstacles { vehicle: &vehicle.name, hit, obstacle });
            }
        }

        Ok(results)
    }
}
