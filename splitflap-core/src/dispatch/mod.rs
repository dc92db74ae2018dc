//! Command dispatch
//!
//! Turns decoded control requests into display motion and a reply.

pub mod counter;
pub mod dispatcher;

pub use counter::Counter;
pub use dispatcher::{Activity, BootReport, CommandDispatcher, Handled};
