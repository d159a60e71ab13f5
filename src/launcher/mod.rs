pub mod commands;
pub mod executor;
pub mod model;
pub mod render;
pub mod session;

pub use session::{run, Exit, Pauses, SessionError};
