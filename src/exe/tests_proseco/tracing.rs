use std::path::PathBuf;
use collision_proseco::config::{CollisionCheckerConfig, TomlRead};
use collision_proseco::csv_trace::CsvTraceWriter;
use collision_proseco::trace::{DebugTrace, QueryTrace, TraceBuffer, TraceError};
use collision_proseco::{HierarchicalCollisionChecker, RefinementLevel, Trajectory};
use math_proseco::Pose;
use crate::car;

fn scratch_dir(name: &str) -> PathBuf
{
    let dir = std::env::temp_dir().join(format!("tests_proseco_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn closing_in() -> (Trajectory, Trajectory)
{
    // the gap between bumpers shrinks by 2 each step and closes at step 8
    let a = Trajectory::new(4.0, 2.0, (0..12).map(|i| Pose::from_xy_heading(i as f64, 0.0, 0.0))).unwrap();
    let b = Trajectory::new(4.0, 2.0, (0..12).map(|i| Pose::from_xy_heading(20.0 - i as f64, 0.0, std::f64::consts::PI))).unwrap();
    (a, b)
}

#[test]
fn csv_per_evaluated_frame()
{
    let dir = scratch_dir("csv_frames");
    let writer = CsvTraceWriter::new(&dir);
    let (a, b) = closing_in();

    let hit = HierarchicalCollisionChecker::new().check_trajectories(&a, &b, Some(&writer)).unwrap();
    assert_eq!(hit.step, 8);

    for frame in 0..=8
    {
        let path = dir.join(format!("debugCircleApproximation{frame}.csv"));
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().ends_with("vehicle width1,collision"));

        let rows: Vec<_> = lines.collect();
        if frame < 8
        {
            // far apart, only the single circles were checked
            assert_eq!(rows.len(), 1, "frame {frame}");
            assert!(rows[0].ends_with(",0"));
        }
        else
        {
            assert_eq!(rows.len(), 1 + 3 + 7);
            assert!(rows.iter().all(|r| r.ends_with(",1")));
        }
    }
    // nothing past the first collision
    assert!(!dir.join("debugCircleApproximation9.csv").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn buffered_traces_match_outcomes()
{
    let buffer = TraceBuffer::new();
    let (a, b) = closing_in();
    let checker = HierarchicalCollisionChecker::new();
    let hit = checker.check_trajectories(&a, &b, Some(&buffer)).unwrap();

    let traces = buffer.take();
    assert_eq!(traces.len(), hit.step + 1);
    for (step, trace) in traces.iter().enumerate()
    {
        let outcome = checker.check(&a.footprints()[step], &b.footprints()[step]);
        assert_eq!(trace.frame, step);
        assert_eq!(trace.final_result(), Some(outcome.final_result));
        assert_eq!(trace.levels.len(), outcome.per_level.evaluated_count());
    }
}

struct BrokenDisk;
impl DebugTrace for BrokenDisk
{
    fn record(&self, _trace: &QueryTrace) -> Result<(), TraceError>
    {
        Err(std::io::Error::new(std::io::ErrorKind::StorageFull, "no space left").into())
    }
}

#[test]
fn failing_sink_is_ignored()
{
    let checker = HierarchicalCollisionChecker::new();
    let (a, b) = closing_in();
    assert_eq!(checker.check_trajectories(&a, &b, Some(&BrokenDisk)), checker.check_trajectories(&a, &b, None));

    let (x, y) = (car(0.0, 0.0, 0.0), car(2.6, 2.2, 0.0));
    assert_eq!(checker.check_traced(&x, &y, RefinementLevel::L3, 0, &BrokenDisk), checker.check(&x, &y));
}

#[test]
fn config_from_file()
{
    let dir = scratch_dir("config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("checker.toml");
    std::fs::write(&path, format!(
        "safety_distance = 0.15\nmax_level = 7\n\n[trace]\ndirectory = {:?}\nbase_name = \"run\"\n",
        dir.join("traces").to_string_lossy())).unwrap();

    let config = CollisionCheckerConfig::load(&mut std::fs::File::open(&path).unwrap()).unwrap();
    let checker = config.create_checker().unwrap();
    let writer = config.create_trace_writer().unwrap();

    // the side by side near miss only collides thanks to the margin
    let (a, b) = (car(0.0, 0.0, 0.0), car(1.0, 2.2, 0.0));
    assert!(checker.check_traced(&a, &b, checker.max_level(), 5, &writer).final_result);
    assert!(dir.join("traces").join("run5.csv").exists());

    let _ = std::fs::remove_dir_all(&dir);
}
