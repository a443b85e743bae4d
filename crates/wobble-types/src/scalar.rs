//! Scalar type alias for the simulation.
//!
//! Render buffers are handed to graphics APIs as `f32`, so the whole
//! pipeline runs in single precision.

/// The floating-point type used throughout the simulation.
pub type Scalar = f32;
