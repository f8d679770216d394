//! Wistia API model types.

mod account;
mod media;
mod project;
mod stats;

pub use account::*;
pub use media::*;
pub use project::*;
pub use stats::*;
