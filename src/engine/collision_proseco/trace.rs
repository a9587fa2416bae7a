use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use arrayvec::ArrayVec;
use parking_lot::Mutex;
use crate::{CircleSet, FootprintModel, RefinementLevel};

#[derive(Debug)]
pub enum TraceError
{
    Io(std::io::Error),
}
impl Display for TraceError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { Debug::fmt(self, f) }
}
impl Error for TraceError { }
impl From<std::io::Error> for TraceError
{
    fn from(err: std::io::Error) -> Self { Self::Io(err) }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelTrace
{
    pub level: RefinementLevel,
    pub circles: [CircleSet; 2],
    pub collision: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryTrace
{
    // successive queries recorded by a sweep get successive frames, starting at 0
    pub frame: usize,
    pub footprints: [FootprintModel; 2],
    pub levels: ArrayVec<LevelTrace, 3>,
}
impl QueryTrace
{
    #[must_use]
    pub fn final_result(&self) -> Option<bool> { self.levels.last().map(|l| l.collision) }
}

// A failing sink never changes the outcome of the query
pub trait DebugTrace: Send + Sync
{
    fn record(&self, trace: &QueryTrace) -> Result<(), TraceError>;
}

#[derive(Debug, Default)]
pub struct TraceBuffer
{
    traces: Mutex<Vec<QueryTrace>>,
}
impl TraceBuffer
{
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use] pub fn len(&self) -> usize { self.traces.lock().len() }
    #[must_use] pub fn is_empty(&self) -> bool { self.traces.lock().is_empty() }

    #[must_use]
    pub fn snapshot(&self) -> Vec<QueryTrace> { self.traces.lock().clone() }

    // Remove and return everything recorded so far
    pub fn take(&self) -> Vec<QueryTrace> { std::mem::take(&mut *self.traces.lock()) }
}
impl DebugTrace for TraceBuffer
{
    fn record(&self, trace: &QueryTrace) -> Result<(), TraceError>
    {
        self.traces.lock().push(trace.clone());
        Ok(())
    }
}
