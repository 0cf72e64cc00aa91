//! Application wiring and process lifetime.

mod orchestrator;

pub use orchestrator::App;
