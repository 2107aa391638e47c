//! Backend bridge: commands queued by the UI and the worker that serves them.

pub mod commands;
pub mod runtime;
