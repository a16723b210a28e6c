//! Adapters between the planner and the outside world.

pub mod csv;
