use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::io::Read;
use std::path::PathBuf;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use crate::csv_trace::{CsvTraceWriter, DEFAULT_TRACE_BASE_NAME};
use crate::{HierarchicalCollisionChecker, InvalidGeometry, RefinementLevel};

/// The only checker type currently available
pub const CIRCLE_APPROXIMATION: &str = "circleApproximation";

#[derive(Debug)]
pub enum ConfigError
{
    Io(std::io::Error),
    Parse(toml::de::Error),
    UnknownCheckerType(String),
    InvalidSafetyDistance(f64),
    Geometry(InvalidGeometry),
}
impl Display for ConfigError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { Debug::fmt(self, f) }
}
impl Error for ConfigError { }
impl From<std::io::Error> for ConfigError
{
    fn from(err: std::io::Error) -> Self { Self::Io(err) }
}
impl From<toml::de::Error> for ConfigError
{
    fn from(err: toml::de::Error) -> Self { Self::Parse(err) }
}
impl From<InvalidGeometry> for ConfigError
{
    fn from(err: InvalidGeometry) -> Self { Self::Geometry(err) }
}

pub trait TomlRead: DeserializeOwned
{
    fn load(reader: &mut impl Read) -> Result<Self, ConfigError>
    {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::from_toml_str(&buf)
    }

    fn from_toml_str(toml: &str) -> Result<Self, ConfigError>
    {
        Ok(toml::from_str(toml)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig
{
    pub directory: PathBuf,
    #[serde(default = "default_base_name")]
    pub base_name: String,
}
fn default_base_name() -> String { DEFAULT_TRACE_BASE_NAME.to_string() }
impl TraceConfig
{
    #[must_use]
    pub fn create_writer(&self) -> CsvTraceWriter
    {
        CsvTraceWriter::new(&self.directory).with_base_name(&self.base_name)
    }
}

/// ```toml
/// checker_type = "circleApproximation"
/// safety_distance = 0.25
/// max_level = 7 # circle count of the finest level to evaluate: 1, 3, or 7
///
/// [trace]
/// directory = "traces"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionCheckerConfig
{
    pub checker_type: String,
    pub safety_distance: f64,
    pub max_level: RefinementLevel,
    pub trace: Option<TraceConfig>,
}
impl Default for CollisionCheckerConfig
{
    fn default() -> Self
    {
        Self
        {
            checker_type: CIRCLE_APPROXIMATION.to_string(),
            safety_distance: 0.0,
            max_level: RefinementLevel::FINEST,
            trace: None,
        }
    }
}
impl TomlRead for CollisionCheckerConfig { }
impl CollisionCheckerConfig
{
    pub fn create_checker(&self) -> Result<HierarchicalCollisionChecker, ConfigError>
    {
        Ok(create_collision_checker(&self.checker_type, self.safety_distance)?.with_max_level(self.max_level))
    }

    #[must_use]
    pub fn create_trace_writer(&self) -> Option<CsvTraceWriter>
    {
        self.trace.as_ref().map(TraceConfig::create_writer)
    }
}

/// Create a checker by name
pub fn create_collision_checker(checker_type: &str, safety_distance: f64) -> Result<HierarchicalCollisionChecker, ConfigError>
{
    match checker_type
    {
        CIRCLE_APPROXIMATION =>
        {
            log::debug!("Creating {checker_type} collision checker with a safety distance of {safety_distance}");
            HierarchicalCollisionChecker::new().with_safety_distance(safety_distance)
        }
        _ => Err(ConfigError::UnknownCheckerType(checker_type.to_string())),
    }
}
