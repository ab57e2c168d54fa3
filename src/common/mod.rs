//! Small numeric helpers shared across the engine.

pub mod math;
