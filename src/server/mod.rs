//! Connection dispatch: the accept loop and the supervisor that owns every
//! worker it spawns.

pub mod listener;

pub use listener::{Server, run};
