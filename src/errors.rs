//! Error types for tracked async operations

use std::any::Any;

/// Failure stored in the `error` slot of an async resource.
///
/// Every way a run can go wrong ends up here, and all variants are treated the
/// same by the state machine: loading stops, `error` is written, `result` is
/// left alone.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceError<E> {
    /// The computation settled with a failure.
    #[error("computation failed: {0}")]
    Failed(E),
    /// The producer panicked while being invoked, or its computation panicked while running.
    #[error("computation panicked: {0}")]
    Panicked(String),
    /// The spawner refused to run the settlement task.
    #[error("failed to spawn computation: {0}")]
    SpawnFailed(String),
}

impl<E> ResourceError<E> {
    /// Build a `Panicked` error from a caught panic payload.
    pub(crate) fn panicked(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        ResourceError::Panicked(message)
    }

    /// The failure value produced by the computation, if that is what happened.
    pub fn failure(&self) -> Option<&E> {
        match self {
            ResourceError::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Unwraps into the computation's own failure value, if that is what happened.
    pub fn into_failure(self) -> Option<E> {
        match self {
            ResourceError::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Result type for values produced by tracked computations
pub type ResourceResult<T, E> = Result<T, ResourceError<E>>;
