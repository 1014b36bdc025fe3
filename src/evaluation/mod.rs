pub mod constraints;
pub mod exercise;
pub mod presentation;

pub use constraints::*;
pub use exercise::*;
pub use presentation::*;
