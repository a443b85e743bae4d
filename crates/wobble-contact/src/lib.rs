//! # wobble-contact
//!
//! Collision handling for the soft body.
//!
//! The body lives inside a closed, axis-aligned cube centered at the origin.
//! After the integrator moves the particles, the collider clamps every
//! coordinate back into the cube and reflects the offending velocity
//! component, scaled by the restitution coefficient.
//!
//! Colliders implement [`Collider`], so the controller can swap the box for
//! a different boundary without touching the step loop.

pub mod box_collider;
pub mod response;

pub use box_collider::BoxCollider;
pub use response::{Collider, ContactResult, NullCollider};
