use thiserror::Error;

use crate::types::{BodyHandle, ColliderHandle, JointHandle};

/// Errors raised when a handle no longer refers to a live engine object.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("body handle {0:?} is stale")]
    StaleBody(BodyHandle),
    #[error("collider handle {0:?} is stale")]
    StaleCollider(ColliderHandle),
    #[error("joint handle {0:?} is stale")]
    StaleJoint(JointHandle),
}
