mod scenario;

use std::fs::File;
use std::path::{Path, PathBuf};
use clap::{Parser, Subcommand};
use collision_proseco::config::{create_collision_checker, ConfigError, TomlRead, CIRCLE_APPROXIMATION};
use collision_proseco::csv_trace::CsvTraceWriter;
use collision_proseco::{FootprintModel, RefinementLevel};
use nab_proseco::app::{set_panic_hook, AppRun, ExitReason};
use crate::scenario::{Scenario, SweepResult};

fn parse_footprint(arg: &str) -> Result<FootprintModel, String>
{
    let values = arg.split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    let [x, y, heading, length, width] = values[..] else
    {
        return Err(format!("expected x,y,heading,length,width but got {} values", values.len()));
    };
    FootprintModel::new(x, y, heading, length, width).map_err(|e| e.to_string())
}

fn parse_level(arg: &str) -> Result<RefinementLevel, String>
{
    let count = arg.parse::<u32>().map_err(|e| e.to_string())?;
    RefinementLevel::try_from(count).map_err(|e| e.to_string())
}

#[derive(Debug, Subcommand)]
pub enum CliCommands
{
    #[clap(about = "Check two footprints against each other and print the verdict of each level")]
    Check
    {
        // x,y,heading,length,width
        #[arg(long, value_parser = parse_footprint, allow_hyphen_values = true)]
        a: FootprintModel,
        #[arg(long, value_parser = parse_footprint, allow_hyphen_values = true)]
        b: FootprintModel,

        #[arg(long, default_value_t = 0.0)]
        safety_distance: f64,

        // circle count of the finest level: 1, 3, or 7
        #[arg(long, default_value = "7", value_parser = parse_level)]
        max_level: RefinementLevel,

        #[arg(long)]
        trace_dir: Option<PathBuf>,
    },
    #[clap(about = "Replay the trajectories and obstacles of a scenario file")]
    Replay
    {
        scenario: PathBuf,

        // overrides the scenario's trace config
        #[arg(long)]
        trace_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Parser)]
struct CliArgs
{
    #[command(subcommand)]
    command: CliCommands,
}

fn check(a: &FootprintModel, b: &FootprintModel, safety_distance: f64, max_level: RefinementLevel, trace_dir: Option<&Path>) -> Result<(), ConfigError>
{
    let checker = create_collision_checker(CIRCLE_APPROXIMATION, safety_distance)?;
    let outcome = match trace_dir
    {
        Some(dir) => checker.check_traced(a, b, max_level, 0, &CsvTraceWriter::new(dir)),
        None => checker.check_up_to(a, b, max_level),
    };

    for (level, collision) in outcome.per_level.iter()
    {
        println!("{level}: {}", if collision { "collision" } else { "clear" });
    }
    println!("=> {} (resolved at {})", if outcome.final_result { "COLLISION" } else { "no collision" }, outcome.resolved_at());
    Ok(())
}

fn replay(scenario_path: &Path, trace_dir: Option<&Path>) -> Result<(), ConfigError>
{
    let scenario = Scenario::load(&mut File::open(scenario_path)?)?;
    let checker = scenario.checker.create_checker()?;
    let trace = match trace_dir
    {
        Some(dir) => Some(CsvTraceWriter::new(dir)),
        None => scenario.checker.create_trace_writer(),
    };
    log::debug!("Replaying {scenario_path:?} with {checker:?}, tracing to {:?}", trace.as_ref().map(CsvTraceWriter::directory));

    for result in scenario.run(&checker, trace.as_ref())?
    {
        match result
        {
            SweepResult::Vehicles { a, b, hit: Some(hit) } =>
                println!("{a} and {b} collide at step {} (resolved at {})", hit.step, hit.outcome.resolved_at()),
            SweepResult::Vehicles { a, b, hit: None } =>
                println!("{a} and {b} stay clear"),
            SweepResult::Obstacles { vehicle, hit: Some(hit), obstacle } =>
                println!("{vehicle} hits obstacle {} {:?} at step {}", hit.obstacle_index, obstacle.unwrap_or_default(), hit.step),
            SweepResult::Obstacles { vehicle, hit: None, .. } =>
                println!("{vehicle} clears all obstacles"),
        }
    }
    Ok(())
}

fn main() -> ExitReason
{
    let app_run = AppRun::<CliArgs>::startup("Collision Debug", env!("CARGO_PKG_VERSION"));
    set_panic_hook(false);

    let result = match &app_run.args.command
    {
        CliCommands::Check { a, b, safety_distance, max_level, trace_dir } =>
            check(a, b, *safety_distance, *max_level, trace_dir.as_deref()),
        CliCommands::Replay { scenario, trace_dir } =>
            replay(scenario, trace_dir.as_deref()),
    };

    if let Err(err) = result
    {
        log::error!("{err}");
        app_run.set_exit_reason(ExitReason::Failure);
    }
    app_run.get_exit_reason()
}
