//! Async resource hooks for Dioxus applications

mod resource;

pub use resource::*;
