//! The deployment run: signer selection, best-effort checks, and the ordered
//! deployment of the contract suite.

mod console;
mod error;
mod events;
mod orchestrator;

pub use console::ConsoleReporter;
pub use error::{FatalError, RunFailure};
pub use events::{Advisory, Reporter, RunEvent};
pub use orchestrator::{RunOptions, run};
