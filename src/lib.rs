#![warn(missing_docs)]

//! Intercepts chat and console commands for a game server, resolves them against a declared
//! command tree, runs the matching actions and reports failures back to whoever sent them.
//!
//! Text that does not name a declared command is left alone so other handlers can pick it up.

mod arg;
mod color;
mod command;
mod config;
mod dispatcher;
mod error;
mod invocation;
mod listener;
mod output;
mod registry;
mod sender;
mod translate;

pub use quartz_interceptor_macros::FromArgument;

pub use arg::*;
pub use color::*;
pub use command::*;
pub use config::*;
pub use dispatcher::*;
pub use error::*;
pub use invocation::*;
pub use listener::*;
pub use output::*;
pub use registry::*;
pub use sender::*;
pub use translate::*;
