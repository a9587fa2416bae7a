mod footprint;
pub use footprint::*;

mod decomposition;
pub use decomposition::*;

mod checker;
pub use checker::*;

mod trajectory;
pub use trajectory::*;

pub mod trace;
pub mod csv_trace;
pub mod config;
