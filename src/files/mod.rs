//! Mapping request targets onto the server root and turning files into
//! responses.
//!
//! - **`resolver`**: pure `(root, target)` to path mapping with the default-document rule
//! - **`responder`**: reads the resolved file and builds a 200, or a 404 on any access failure

pub mod resolver;
pub mod responder;

pub use resolver::{Resolved, Resolver};
pub use responder::serve_file;
