//! Bridge between the terminal thread and the session worker.

pub mod commands;
pub mod runtime;
