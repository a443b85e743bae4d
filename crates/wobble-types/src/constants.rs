//! Physical constants and simulation defaults.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.8;

/// Default fixed simulation timestep (seconds).
pub const DEFAULT_DT: f32 = 0.016;

/// Default half-extent of the collision cube centered at the origin.
pub const DEFAULT_HALF_EXTENT: f32 = 1.0;

/// Default kinetic energy below which a grounded body starts settling.
pub const DEFAULT_SETTLE_ENERGY: f32 = 0.001;

/// Default lowest-particle height at which a body counts as grounded.
pub const DEFAULT_SETTLE_GROUND: f32 = -0.95;

/// Default remaining angle (radians) at which settling completes.
pub const DEFAULT_SETTLE_EPSILON: f32 = 0.01;

/// Default settle slerp rate (fraction per second).
pub const DEFAULT_SETTLE_SPEED: f32 = 2.0;

/// Squared-length threshold below which a vector is treated as zero.
pub const EPSILON: f32 = 1.0e-12;
