//! Common trait bounds used throughout dioxus-async-resource

/// Common trait bounds for values produced by a tracked computation
pub trait ResourceOutputBounds: Clone + 'static {}
impl<T> ResourceOutputBounds for T where T: Clone + 'static {}

/// Common trait bounds for failures produced by a tracked computation
pub trait ResourceErrorBounds: Clone + 'static {}
impl<T> ResourceErrorBounds for T where T: Clone + 'static {}

/// Common trait bounds for dependency values
///
/// Tuples, `Vec`s and arrays compare element-wise, which is the shallow
/// comparison used to decide whether to re-run.
pub trait DependencyBounds: PartialEq + 'static {}
impl<T> DependencyBounds for T where T: PartialEq + 'static {}
