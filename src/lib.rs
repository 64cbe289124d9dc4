#![doc = include_str!("../README.md")]

// Core modules
pub mod config;
pub mod errors;
pub mod hooks;
mod log_utils;
pub mod resource;
pub mod runtime;
pub mod state;
pub mod tracking;
pub mod types;

// Re-export commonly used items at crate root for convenience
pub use config::{ResourceConfig, ResourceMode};
pub use resource::AsyncResource;

pub mod prelude {
    //! The prelude exports all the most common types and functions for using dioxus-async-resource.

    // The hooks and their handle
    pub use crate::hooks::{
        UseAsyncResource, use_async_resource, use_promise, use_promise_on_callback,
    };

    // The framework-independent primitive and its executors
    pub use crate::resource::AsyncResource;
    pub use crate::runtime::{Spawner, TokioLocalSpawner};

    // The state types, needed for matching
    pub use crate::state::{AsyncState, Generation, OperationState, Phase};

    // Configuration
    pub use crate::config::{ResourceConfig, ResourceMode};

    // Error types
    pub use crate::errors::{ResourceError, ResourceResult};
}
