//! Controller layer: terminal input parsing, backend events, and command orchestration.

pub mod events;
pub mod input;
pub mod orchestration;
