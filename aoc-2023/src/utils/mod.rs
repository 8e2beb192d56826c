//! Helpers shared between solutions.

pub mod dp_cache;
pub mod grid;
pub mod interval_tree;
pub mod math;
