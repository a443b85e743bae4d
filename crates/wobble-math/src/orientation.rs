//! Orientation estimation and blending for the settle phase.
//!
//! The body's orientation is estimated from three landmark particles
//! (first, middle, last) rather than a best-fit over all particles.
//! Resting orientations keep only the heading (yaw) of the estimate.

use glam::{EulerRot, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::vector::Vector3;

/// Euler angles in radians, applied in Y-X-Z order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation about Y (heading).
    pub yaw: f32,
    /// Rotation about X.
    pub pitch: f32,
    /// Rotation about Z.
    pub roll: f32,
}

impl EulerAngles {
    /// Decomposes a rotation into Y-X-Z Euler angles.
    pub fn from_quat(rotation: Quat) -> Self {
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        Self { yaw, pitch, roll }
    }

    /// Composes the rotation `Ry(yaw) * Rx(pitch) * Rz(roll)`.
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }

    /// Same heading, zero pitch and roll.
    pub fn leveled(self) -> Self {
        Self {
            yaw: self.yaw,
            pitch: 0.0,
            roll: 0.0,
        }
    }
}

/// Mean of all positions. An empty slice yields the origin.
pub fn centroid(positions: &[Vector3]) -> Vector3 {
    if positions.is_empty() {
        return Vector3::ZERO;
    }
    let sum: Vector3 = positions.iter().copied().sum();
    sum / positions.len() as f32
}

/// Builds an orthonormal basis (columns x, y, z) from landmark particles.
///
/// - `x` is the direction from `center` to the first particle.
/// - `z` is `x` crossed with the direction to the middle particle (index
///   `n / 2`); when those are parallel the last particle is tried instead.
/// - `y = z × x`.
///
/// The middle particle comes first because in generated and scanned meshes
/// the last vertex often sits next to the first one (closing a ring or a
/// strip), which makes `first × last` short and noisy. Halfway through the
/// vertex list is usually across the body, giving a well-conditioned `z`.
///
/// Returns `None` when no non-degenerate basis can be formed.
pub fn landmark_basis(positions: &[Vector3], center: Vector3) -> Option<Mat3> {
    let n = positions.len();
    if n == 0 {
        return None;
    }

    let first = positions[0] - center;
    let x_axis = first.normalized();
    if x_axis.is_near_zero() {
        return None;
    }

    let mut z_axis = first.cross(positions[n / 2] - center).normalized();
    if z_axis.is_near_zero() {
        z_axis = first.cross(positions[n - 1] - center).normalized();
    }
    if z_axis.is_near_zero() {
        return None;
    }

    let y_axis = z_axis.cross(x_axis);
    Some(Mat3::from_cols(
        Vec3::from(x_axis),
        Vec3::from(y_axis),
        Vec3::from(z_axis),
    ))
}

/// Estimates the body orientation from its landmark particles.
///
/// Falls back to the identity when the landmarks are degenerate
/// (fewer than three distinct, non-collinear points).
pub fn estimate_orientation(positions: &[Vector3], center: Vector3) -> Quat {
    match landmark_basis(positions, center) {
        Some(basis) => Quat::from_mat3(&basis).normalize(),
        None => Quat::IDENTITY,
    }
}

/// The resting orientation for `rotation`: same yaw, zero pitch and roll.
pub fn leveled(rotation: Quat) -> Quat {
    EulerAngles::from_quat(rotation).leveled().to_quat()
}

/// Angle (radians) of the shortest rotation taking `a` to `b`.
///
/// `q` and `-q` describe the same rotation, so the result lies in `[0, π]`.
pub fn angular_distance(a: Quat, b: Quat) -> f32 {
    let d = a.dot(b).abs().min(1.0);
    2.0 * d.acos()
}
