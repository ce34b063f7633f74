/// Color and geometry primitives.
pub mod core;
/// Error and result types.
pub mod error;
pub(crate) mod math;
