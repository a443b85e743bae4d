//! Simulation configuration.
//!
//! Every physical parameter the caller may tune. There is no persistence
//! format of its own; the struct is serde-friendly so surfaces such as the
//! CLI can read it from TOML. Missing fields take their defaults.

use serde::{Deserialize, Serialize};
use wobble_types::constants;
use wobble_types::{WobbleError, WobbleResult};

/// Physical parameters for the mass-spring simulation.
///
/// Explicit integration is only conditionally stable: raising `stiffness`
/// requires lowering `dt` (or raising `particle_mass`) to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed timestep (seconds) used by drivers that do not pass their own.
    pub dt: f32,

    /// Gravity acceleration vector [gx, gy, gz].
    pub gravity: [f32; 3],

    /// Mass shared by every particle. Must be positive.
    pub particle_mass: f32,

    /// Spring stiffness `k`.
    pub stiffness: f32,

    /// Damping coefficient `c` applied to relative particle velocity.
    pub damping: f32,

    /// Extra multiplier on `damping`.
    pub damping_scale: f32,

    /// Fraction of velocity kept (sign-flipped) on a wall hit, in [0, 1].
    pub restitution: f32,

    /// Half-extent of the collision cube centered at the origin.
    pub half_extent: f32,

    /// Settle detection and blending.
    pub settle: SettleConfig,
}

/// Parameters of the settle phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleConfig {
    /// Total kinetic energy below which a grounded body may settle.
    pub energy_threshold: f32,

    /// A body is grounded when its lowest particle is at or below this Y.
    pub ground_threshold: f32,

    /// Remaining orientation error (radians) at which settling completes.
    pub angular_epsilon: f32,

    /// Slerp rate: each step blends `min(speed * dt, 1)` of the way.
    pub speed: f32,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            energy_threshold: constants::DEFAULT_SETTLE_ENERGY,
            ground_threshold: constants::DEFAULT_SETTLE_GROUND,
            angular_epsilon: constants::DEFAULT_SETTLE_EPSILON,
            speed: constants::DEFAULT_SETTLE_SPEED,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: constants::DEFAULT_DT,
            gravity: [0.0, -constants::GRAVITY, 0.0],
            particle_mass: 0.1,
            stiffness: 20.0,
            damping: 0.2,
            damping_scale: 1.0,
            restitution: 0.3,
            half_extent: constants::DEFAULT_HALF_EXTENT,
            settle: SettleConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Creates a config with gravity switched off.
    pub fn weightless() -> Self {
        Self {
            gravity: [0.0, 0.0, 0.0],
            ..Default::default()
        }
    }

    /// Creates a stiffer, more heavily damped config.
    pub fn firm() -> Self {
        Self {
            stiffness: 60.0,
            damping: 0.4,
            ..Default::default()
        }
    }

    /// Parses a TOML document and validates the result.
    pub fn from_toml_str(source: &str) -> WobbleResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| WobbleError::Serialization(format!("TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config as TOML.
    pub fn to_toml_string(&self) -> WobbleResult<String> {
        toml::to_string(self).map_err(|e| WobbleError::Serialization(format!("TOML config: {e}")))
    }

    /// Checks every parameter, failing fast on values that would turn the
    /// simulation into NaN/Infinity or make it meaningless.
    pub fn validate(&self) -> WobbleResult<()> {
        if !(self.particle_mass.is_finite() && self.particle_mass > 0.0) {
            return Err(WobbleError::InvalidConfig(format!(
                "particle_mass must be positive and finite, got {}",
                self.particle_mass
            )));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(WobbleError::InvalidConfig(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(WobbleError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        non_negative("stiffness", self.stiffness)?;
        non_negative("damping", self.damping)?;
        non_negative("damping_scale", self.damping_scale)?;
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(WobbleError::InvalidConfig(format!(
                "restitution must lie in [0, 1], got {}",
                self.restitution
            )));
        }
        if !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(WobbleError::InvalidConfig(format!(
                "half_extent must be positive and finite, got {}",
                self.half_extent
            )));
        }
        self.settle.validate()
    }
}

impl SettleConfig {
    /// Checks the settle parameters.
    pub fn validate(&self) -> WobbleResult<()> {
        non_negative("settle.energy_threshold", self.energy_threshold)?;
        if !self.ground_threshold.is_finite() {
            return Err(WobbleError::InvalidConfig(format!(
                "settle.ground_threshold must be finite, got {}",
                self.ground_threshold
            )));
        }
        if !(self.angular_epsilon.is_finite() && self.angular_epsilon > 0.0) {
            return Err(WobbleError::InvalidConfig(format!(
                "settle.angular_epsilon must be positive, got {}",
                self.angular_epsilon
            )));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(WobbleError::InvalidConfig(format!(
                "settle.speed must be positive, got {}",
                self.speed
            )));
        }
        Ok(())
    }
}

fn non_negative(name: &str, value: f32) -> WobbleResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(WobbleError::InvalidConfig(format!(
            "{name} must be non-negative and finite, got {value}"
        )))
    }
}
