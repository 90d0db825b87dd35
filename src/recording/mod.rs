//! Sample collection driven by a per-frame scheduler
//!
//! - `scheduler`: the tick source abstraction and a display-rate ticker
//! - `collector`: one snapshot per tick, appended to the session
//! - `status`: live and final status lines
//! - `recorder`: the task tying session, collector and controls together

pub mod collector;
pub mod recorder;
pub mod scheduler;
pub mod status;

pub use collector::{SampleCollector, TickOutcome};
pub use recorder::{Control, Recorder};
pub use scheduler::{FrameTicker, TickSource};
pub use status::{ConsoleStatus, StatusSink, StatusUpdate};
