pub mod constraint;
pub mod exercise;
pub mod metrics;
pub mod sentiment;
pub mod transcribe;

pub use constraint::*;
pub use exercise::*;
pub use metrics::*;
pub use sentiment::*;
pub use transcribe::*;
