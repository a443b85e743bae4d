//! # wobble-math
//!
//! Vector and orientation primitives for the Wobble simulator.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat3`, `Quat`, `EulerRot`)
//! - [`Vector3`], the particle-state vector with separate value-returning
//!   and in-place operation sets
//! - Orientation helpers used by the settle phase (landmark basis,
//!   Y-X-Z Euler decomposition, leveling, angular distance)

pub mod orientation;
pub mod vector;

pub use orientation::EulerAngles;
pub use vector::Vector3;

// Re-export glam types as the canonical rotation types for Wobble.
pub use glam::{EulerRot, Mat3, Quat, Vec3};
