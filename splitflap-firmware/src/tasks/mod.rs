//! Embassy async tasks

pub mod bridge;

pub use bridge::bridge_task;
