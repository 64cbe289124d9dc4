//! # Async Resource Hooks
//!
//! Hooks that track one asynchronous operation per component.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dioxus::prelude::*;
//! use dioxus_async_resource::prelude::*;
//!
//! async fn fetch_user(id: u32) -> Result<String, String> {
//!     Ok(format!("User {}", id))
//! }
//!
//! async fn delete_user(_id: u32) -> Result<(), String> {
//!     Ok(())
//! }
//!
//! #[component]
//! fn ShowUser(user_id: u32) -> Element {
//!     let user = use_promise(user_id, move || fetch_user(user_id));
//!     let delete = use_promise_on_callback(move || delete_user(user_id));
//!
//!     rsx! {
//!         if user.is_loading() { p { "Loading data..." } }
//!         if user.error().is_some() { p { "An error occurred" } }
//!         if let Some(name) = user.result() {
//!             div { "{name}" }
//!             button { onclick: move |_| { delete.trigger(); }, "Delete user {user_id}" }
//!         }
//!     }
//! }
//! ```

use dioxus::prelude::*;
use std::{
    cell::{Cell, RefCell},
    future::Future,
    rc::Rc,
};

use crate::{
    config::ResourceConfig,
    errors::ResourceError,
    runtime::computation::{self, Computation},
    state::{Generation, OperationState},
    tracking::{DependencySnapshot, Subscription},
    types::{DependencyBounds, ResourceErrorBounds, ResourceOutputBounds},
};

/// Signal holding the state of a hook-managed resource
pub type ResourceSignal<T, E> = Signal<OperationState<T, ResourceError<E>>>;

/// Handle returned by the async resource hooks
///
/// Reading through the handle subscribes the component to state changes, like
/// reading any other signal. The handle is `Copy` and can be moved into event
/// handlers freely.
pub struct UseAsyncResource<T: 'static, E: 'static> {
    state: ResourceSignal<T, E>,
    start: Callback<(), Option<Generation>>,
}

impl<T: 'static, E: 'static> Clone for UseAsyncResource<T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static, E: 'static> Copy for UseAsyncResource<T, E> {}

impl<T: 'static, E: 'static> UseAsyncResource<T, E> {
    /// Start a new generation, making every earlier one stale.
    ///
    /// Returns `None` if the owning component has already been unmounted.
    pub fn trigger(&self) -> Option<Generation> {
        if self.state.try_peek().is_err() {
            return None;
        }
        self.start.call(())
    }

    /// The underlying state signal.
    pub fn signal(&self) -> ResourceSignal<T, E> {
        self.state
    }

    /// Borrow the state, subscribing the component to changes.
    pub fn read(&self) -> ReadableRef<'_, ResourceSignal<T, E>> {
        self.state.read()
    }

    /// True while the current generation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading()
    }

    /// The current generation.
    pub fn generation(&self) -> Generation {
        self.state.read().generation()
    }
}

impl<T: Clone + 'static, E: Clone + 'static> UseAsyncResource<T, E> {
    /// A snapshot of the whole state.
    pub fn state(&self) -> OperationState<T, ResourceError<E>> {
        self.state.read().clone()
    }

    /// The last successfully produced value.
    pub fn result(&self) -> Option<T> {
        self.state.read().result().cloned()
    }

    /// The last failure.
    pub fn error(&self) -> Option<ResourceError<E>> {
        self.state.read().error().cloned()
    }
}

/// Configurable async resource hook
///
/// `dependencies` is compared with `PartialEq` against the value from the
/// previous render. In auto mode the producer runs on mount and on every
/// change; in manual mode it runs only on [`UseAsyncResource::trigger`].
///
/// The producer is refreshed on every render, so it may capture the current
/// props. Settlement tasks are not tied to the component: after unmount they
/// still run to completion, and their outcome is dropped.
pub fn use_async_resource<T, E, D, F, Fut>(
    config: ResourceConfig,
    dependencies: D,
    mut producer: F,
) -> UseAsyncResource<T, E>
where
    T: ResourceOutputBounds,
    E: ResourceErrorBounds,
    D: DependencyBounds,
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let mut state: ResourceSignal<T, E> = use_signal(OperationState::new);
    let subscription = use_hook(Subscription::new);
    let snapshot = use_hook(|| Rc::new(RefCell::new(DependencySnapshot::<D>::new())));
    let latest = use_hook(|| Rc::new(Cell::new(Generation::ZERO)));

    let run: Callback<(), Computation<T, E>> =
        use_callback(move |()| computation::invoke(&mut producer));

    let label = config.label().to_string();
    let start_subscription = subscription.clone();
    let start_latest = latest.clone();
    let start = use_callback(move |()| {
        if !start_subscription.is_active() {
            return None;
        }

        let generation = state.write().begin();
        start_latest.set(generation);
        crate::log_generation_start!("{} starting {}", label, generation);

        let settle = settle_into_signal(
            state,
            start_subscription.clone(),
            label.clone(),
            generation,
            run.call(()),
        );
        let _task = dioxus::core::spawn_forever(settle);
        Some(generation)
    });

    let drop_subscription = subscription.clone();
    let drop_label = config.label().to_string();
    use_drop(move || {
        if drop_subscription.cancel() {
            crate::log_unsubscribed!(
                "{} unmounted at {}, pending settlements are now inert",
                drop_label,
                latest.get()
            );
        }
    });

    let changed = snapshot.borrow_mut().observe(dependencies);
    if changed && config.mode().follows_dependencies() {
        start.call(());
    }

    UseAsyncResource { state, start }
}

async fn settle_into_signal<T: 'static, E: 'static>(
    mut state: ResourceSignal<T, E>,
    subscription: Subscription,
    label: String,
    generation: Generation,
    pending: Computation<T, E>,
) {
    let outcome = pending.await;
    if !subscription.is_active() {
        crate::log_unsubscribed!("{} {} settled after unmount, discarding", label, generation);
        return;
    }

    match state.try_write() {
        Ok(mut current) => {
            computation::apply_outcome(&label, &mut current, generation, outcome);
        }
        Err(_) => {
            crate::log_unsubscribed!("{} {} settled after its state was dropped", label, generation);
        }
    }
}

/// Dependency-driven async resource hook
///
/// Runs `producer` on mount and whenever `dependencies` changes. Earlier runs
/// that are still in flight become stale.
///
/// ```rust,no_run
/// use dioxus::prelude::*;
/// use dioxus_async_resource::prelude::*;
///
/// #[component]
/// fn Greeting(name: String) -> Element {
///     let greeting = use_promise(name.clone(), move || {
///         let name = name.clone();
///         async move { Ok::<_, String>(format!("Hello, {name}!")) }
///     });
///     let text = greeting.result().unwrap_or_default();
///     rsx! { "{text}" }
/// }
/// ```
pub fn use_promise<T, E, D, F, Fut>(dependencies: D, producer: F) -> UseAsyncResource<T, E>
where
    T: ResourceOutputBounds,
    E: ResourceErrorBounds,
    D: DependencyBounds,
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    use_async_resource(ResourceConfig::auto(), dependencies, producer)
}

/// Manually triggered async resource hook
///
/// Nothing runs until [`UseAsyncResource::trigger`] is called. Each call starts
/// a new run and makes every earlier one stale.
pub fn use_promise_on_callback<T, E, F, Fut>(producer: F) -> UseAsyncResource<T, E>
where
    T: ResourceOutputBounds,
    E: ResourceErrorBounds,
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    use_async_resource(ResourceConfig::manual(), (), producer)
}
