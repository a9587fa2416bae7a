use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use crate::trace::{DebugTrace, QueryTrace, TraceError};

pub const DEFAULT_TRACE_BASE_NAME: &str = "debugCircleApproximation";

/// Writes each traced query to `<directory>/<base_name><frame>.csv`, one row per circle per evaluated level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTraceWriter
{
    directory: PathBuf,
    base_name: String,
}
impl CsvTraceWriter
{
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self
    {
        Self { directory: directory.into(), base_name: DEFAULT_TRACE_BASE_NAME.to_string() }
    }

    #[must_use]
    pub fn with_base_name(self, base_name: impl Into<String>) -> Self
    {
        Self { base_name: base_name.into(), ..self }
    }

    // Same naming, writing into `<directory>/<name>`
    #[must_use]
    pub fn in_subdirectory(&self, name: impl AsRef<Path>) -> Self
    {
        Self { directory: self.directory.join(name), base_name: self.base_name.clone() }
    }

    #[inline] #[must_use] pub fn directory(&self) -> &Path { &self.directory }
    #[inline] #[must_use] pub fn base_name(&self) -> &str { &self.base_name }

    #[must_use]
    pub fn file_path(&self, frame: usize) -> PathBuf
    {
        self.directory.join(format!("{}{}.csv", self.base_name, frame))
    }

    pub fn write_csv(trace: &QueryTrace, writer: &mut impl Write) -> std::io::Result<()>
    {
        for i in 0..trace.footprints.len()
        {
            write!(writer,
                "circleCenterX{i},circleCenterY{i},radius{i},vehicle center x{i},vehicle center y{i},vehicle heading {i},vehicle length{i},vehicle width{i},")?;
        }
        writeln!(writer, "collision")?;

        for level in &trace.levels
        {
            for row in 0..level.level.circle_count()
            {
                for (circles, footprint) in level.circles.iter().zip(&trace.footprints)
                {
                    let Some(circle) = circles.circles().get(row) else { continue };
                    write!(writer, "{},{},{},{},{},{},{},{},",
                        circle.center().x,
                        circle.center().y,
                        circle.radius(),
                        footprint.x(),
                        footprint.y(),
                        footprint.heading(),
                        footprint.length(),
                        footprint.width())?;
                }
                writeln!(writer, "{}", u8::from(level.collision))?;
            }
        }
        Ok(())
    }
}
impl DebugTrace for CsvTraceWriter
{
    fn record(&self, trace: &QueryTrace) -> Result<(), TraceError>
    {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.file_path(trace.frame);
        let mut writer = BufWriter::new(File::create(&path)?);
        Self::write_csv(trace, &mut writer)?;
        writer.flush()?;
        log::trace!("Wrote collision trace {path:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{FootprintModel, HierarchicalCollisionChecker, RefinementLevel};
    use crate::trace::TraceBuffer;

    fn traced(b: FootprintModel) -> QueryTrace
    {
        let a = FootprintModel::new(0.0, 0.0, 0.0, 4.0, 2.0).unwrap();
        let buffer = TraceBuffer::new();
        let _ = HierarchicalCollisionChecker::new().check_traced(&a, &b, RefinementLevel::L3, 0, &buffer);
        buffer.take().remove(0)
    }

    #[test]
    fn file_names()
    {
        let writer = CsvTraceWriter::new("out");
        assert_eq!(writer.base_name(), DEFAULT_TRACE_BASE_NAME);
        assert_eq!(writer.file_path(12), Path::new("out").join("debugCircleApproximation12.csv"));

        let writer = writer.with_base_name("run_");
        assert_eq!(writer.directory(), Path::new("out"));
        assert_eq!(writer.file_path(0), Path::new("out").join("run_0.csv"));

        let nested = writer.in_subdirectory("ego");
        assert_eq!(nested.file_path(1), Path::new("out").join("ego").join("run_1.csv"));
    }

    #[test]
    fn header_and_rows()
    {
        let trace = traced(FootprintModel::new(2.6, 2.2, 0.0, 4.0, 2.0).unwrap());
        let mut out = Vec::new();
        CsvTraceWriter::write_csv(&trace, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0],
            "circleCenterX0,circleCenterY0,radius0,vehicle center x0,vehicle center y0,vehicle heading 0,vehicle length0,vehicle width0,\
            circleCenterX1,circleCenterY1,radius1,vehicle center x1,vehicle center y1,vehicle heading 1,vehicle length1,vehicle width1,\
            collision");

        // 1 + 3 + 7 circle rows
        assert_eq!(lines.len(), 1 + 11);
        assert!(lines.iter().skip(1).all(|l| l.split(',').count() == 17));

        // the single L1 circle sits at each footprint's center
        assert_eq!(lines[1], format!("0,0,{r},0,0,0,4,2,2.6,2.2,{r},2.6,2.2,0,4,2,1", r = 5.0f64.sqrt()));
        assert!(lines[2..5].iter().all(|l| l.ends_with(",1")));
        assert!(lines[5..].iter().all(|l| l.ends_with(",0")));
    }

    #[test]
    fn early_exit_writes_one_level()
    {
        let trace = traced(FootprintModel::new(20.0, 0.0, 0.0, 4.0, 2.0).unwrap());
        let mut out = Vec::new();
        CsvTraceWriter::write_csv(&trace, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with(",0\n"));
    }

    #[test]
    fn records_to_disk()
    {
        let dir = std::env::temp_dir().join(format!("collision_proseco_csv_{}", std::process::id()));
        let writer = CsvTraceWriter::new(&dir);
        let mut trace = traced(FootprintModel::new(3.9, 1.9, 0.0, 4.0, 2.0).unwrap());
        trace.frame = 3;

        writer.record(&trace).unwrap();
        let written = std::fs::read_to_string(dir.join("debugCircleApproximation3.csv")).unwrap();
        assert_eq!(written.lines().count(), 12);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
