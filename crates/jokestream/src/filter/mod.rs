//! State of the content filter owned by the application: user settings and
//! the statistics of the filter decisions.
mod settings;
mod stats;

pub use settings::*;
pub use stats::*;
