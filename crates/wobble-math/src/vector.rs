//! Three-component vector used for all per-particle state.
//!
//! Operations come in two sets that never overlap:
//!
//! - **Value-returning**: `a + b`, `a - b`, `a * s`, `a / s`, `-a`,
//!   [`Vector3::dot`], [`Vector3::cross`], [`Vector3::normalized`],
//!   [`Vector3::rotated`]. `self` is left untouched.
//! - **In-place**: `a += b`, `a -= b`, `a *= s`,
//!   [`Vector3::normalize_mut`], [`Vector3::rotate_mut`]. These take
//!   `&mut self` and return nothing.
//!
//! Force accumulators are built with the in-place set only, so a
//! temporary is never confused with the accumulator it came from.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use wobble_types::constants::EPSILON;
use wobble_types::Scalar;

/// A 3D vector of [`Scalar`] components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_array(self) -> [Scalar; 3] {
        [self.x, self.y, self.z]
    }

    // ─── Value-returning operations ───────────────────────────

    #[inline]
    pub fn dot(self, other: Self) -> Scalar {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length_squared(self) -> Scalar {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> Scalar {
        self.length_squared().sqrt()
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(self, other: Self) -> Scalar {
        (other - self).length()
    }

    /// Returns the unit vector in the same direction.
    ///
    /// A zero (or numerically zero) vector yields [`Vector3::ZERO`]
    /// instead of NaN components.
    #[inline]
    pub fn normalized(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > EPSILON {
            self * (1.0 / len_sq.sqrt())
        } else {
            Self::ZERO
        }
    }

    /// Returns this vector rotated by the unit quaternion `rotation`.
    #[inline]
    pub fn rotated(self, rotation: Quat) -> Self {
        (rotation * Vec3::from(self)).into()
    }

    /// Returns true if the vector is zero within [`EPSILON`].
    #[inline]
    pub fn is_near_zero(self) -> bool {
        self.length_squared() <= EPSILON
    }

    // ─── In-place operations ──────────────────────────────────

    /// Normalizes this vector in place (zero stays zero).
    #[inline]
    pub fn normalize_mut(&mut self) {
        *self = self.normalized();
    }

    /// Rotates this vector in place by the unit quaternion `rotation`.
    #[inline]
    pub fn rotate_mut(&mut self, rotation: Quat) {
        *self = self.rotated(rotation);
    }
}

// ─── Value-returning operators ────────────────────────────────

impl Add for Vector3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<Scalar> for Vector3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Scalar) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<Scalar> for Vector3 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Scalar) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// ─── In-place operators ───────────────────────────────────────

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl SubAssign for Vector3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl MulAssign<Scalar> for Vector3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Scalar) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Sum for Vector3 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut total = Self::ZERO;
        for v in iter {
            total += v;
        }
        total
    }
}

// ─── Conversions ──────────────────────────────────────────────

impl From<Vec3> for Vector3 {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for Vec3 {
    #[inline]
    fn from(v: Vector3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<[Scalar; 3]> for Vector3 {
    #[inline]
    fn from(a: [Scalar; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<Vector3> for [Scalar; 3] {
    #[inline]
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}
