// Application layer: use cases, configuration and reporting on top of the
// pure domain functions.

pub mod config;
pub mod error;
pub mod reporting;
pub mod service;

pub use config::*;
pub use error::*;
pub use reporting::*;
pub use service::*;
