//! # Async Resource
//!
//! `AsyncResource` tracks one asynchronous operation outside of any UI
//! framework. It holds the latest outcome, starts a new generation when its
//! dependencies change (auto mode) or when `trigger` is called, and drops every
//! settlement that does not belong to the current generation or that arrives
//! after `unsubscribe`.
//!
//! ## Example
//!
//! ```rust
//! use dioxus_async_resource::prelude::*;
//! use futures::executor::LocalPool;
//!
//! let mut pool = LocalPool::new();
//! let resource = AsyncResource::auto(
//!     1_u32,
//!     || async { Ok::<_, String>("hello".to_string()) },
//!     pool.spawner(),
//! );
//! assert!(resource.is_loading());
//!
//! pool.run_until_stalled();
//! assert_eq!(resource.state().result().map(String::as_str), Some("hello"));
//! ```

use futures::FutureExt;
use std::{
    cell::RefCell,
    future::Future,
    rc::{Rc, Weak},
};

use crate::{
    config::ResourceConfig,
    errors::{ResourceError, ResourceResult},
    runtime::{
        Spawner,
        computation::{self, Computation},
    },
    state::{Generation, OperationState},
    tracking::{DependencySnapshot, Subscription},
};

type Producer<T, E> = Box<dyn FnMut() -> Computation<T, E>>;
type Listener<T, E> = Box<dyn FnMut(&OperationState<T, ResourceError<E>>)>;

struct Core<T, E, D> {
    state: OperationState<T, ResourceError<E>>,
    snapshot: DependencySnapshot<D>,
    trigger_count: u64,
}

struct Shared<T, E, D> {
    config: ResourceConfig,
    spawner: Box<dyn Spawner>,
    subscription: Subscription,
    producer: RefCell<Producer<T, E>>,
    core: RefCell<Core<T, E, D>>,
    listeners: RefCell<Vec<Listener<T, E>>>,
}

/// One tracked async operation with generation-based staleness checks.
///
/// The resource is the single owner of its state. In-flight settlements only
/// hold a weak reference, so dropping the resource has the same effect as
/// [`AsyncResource::unsubscribe`].
pub struct AsyncResource<T: 'static, E: 'static, D: 'static = ()> {
    shared: Rc<Shared<T, E, D>>,
}

impl<T: 'static, E: 'static> AsyncResource<T, E, ()> {
    /// A resource that only runs when [`AsyncResource::trigger`] is called.
    pub fn manual<F, Fut>(producer: F, spawner: impl Spawner + 'static) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        Self::new(ResourceConfig::manual(), (), producer, spawner)
    }
}

impl<T: 'static, E: 'static, D: PartialEq + 'static> AsyncResource<T, E, D> {
    /// A resource that runs now and whenever its dependencies change.
    pub fn auto<F, Fut>(dependencies: D, producer: F, spawner: impl Spawner + 'static) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        Self::new(ResourceConfig::auto(), dependencies, producer, spawner)
    }

    /// Create a resource. In auto mode the first generation starts immediately.
    pub fn new<F, Fut>(
        config: ResourceConfig,
        dependencies: D,
        mut producer: F,
        spawner: impl Spawner + 'static,
    ) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let producer: Producer<T, E> = Box::new(move || computation::invoke(&mut producer));
        let resource = Self {
            shared: Rc::new(Shared {
                config,
                spawner: Box::new(spawner),
                subscription: Subscription::new(),
                producer: RefCell::new(producer),
                core: RefCell::new(Core {
                    state: OperationState::new(),
                    snapshot: DependencySnapshot::new(),
                    trigger_count: 0,
                }),
                listeners: RefCell::new(Vec::new()),
            }),
        };
        resource.set_dependencies(dependencies);
        resource
    }

    /// Report the current dependency value.
    ///
    /// Returns the started generation if the value differs from the previous
    /// one and the resource follows its dependencies. Equal values never start
    /// a run.
    pub fn set_dependencies(&self, dependencies: D) -> Option<Generation> {
        let changed = self.shared.core.borrow_mut().snapshot.observe(dependencies);
        if changed && self.shared.config.mode().follows_dependencies() {
            Shared::start(&self.shared)
        } else {
            None
        }
    }

    /// Start a new generation regardless of dependencies.
    ///
    /// Every earlier generation of this resource becomes stale. Returns `None`
    /// once the resource has been unsubscribed.
    pub fn trigger(&self) -> Option<Generation> {
        if !self.shared.subscription.is_active() {
            return None;
        }
        self.shared.core.borrow_mut().trigger_count += 1;
        Shared::start(&self.shared)
    }

    /// Tear down: pending settlements become inert and loading stops.
    pub fn unsubscribe(&self) {
        if self.shared.subscription.cancel() {
            {
                let mut core = self.shared.core.borrow_mut();
                core.state.detach();
                crate::log_unsubscribed!(
                    "{} unsubscribed at {}",
                    self.shared.config.label(),
                    core.state.generation()
                );
            }
            self.shared.notify();
        }
    }

    /// Register a listener called after every observable state change.
    ///
    /// Listeners may read the resource but must not trigger it or change its
    /// dependencies from inside the callback.
    pub fn on_update(&self, listener: impl FnMut(&OperationState<T, ResourceError<E>>) + 'static) {
        self.shared.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Run `f` against the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&OperationState<T, ResourceError<E>>) -> R) -> R {
        f(&self.shared.core.borrow().state)
    }

    /// A cloned snapshot of the current state.
    pub fn state(&self) -> OperationState<T, ResourceError<E>>
    where
        T: Clone,
        E: Clone,
    {
        self.with_state(|state| state.clone())
    }

    /// True while the current generation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.with_state(|state| state.is_loading())
    }

    /// The current generation.
    pub fn generation(&self) -> Generation {
        self.with_state(|state| state.generation())
    }

    /// How many times `trigger` started a run.
    pub fn trigger_count(&self) -> u64 {
        self.shared.core.borrow().trigger_count
    }

    /// False once `unsubscribe` has been called.
    pub fn is_subscribed(&self) -> bool {
        self.shared.subscription.is_active()
    }

    /// The configuration this resource was created with.
    pub fn config(&self) -> &ResourceConfig {
        &self.shared.config
    }
}

impl<T: 'static, E: 'static, D: 'static> Shared<T, E, D> {
    fn start(shared: &Rc<Self>) -> Option<Generation> {
        if !shared.subscription.is_active() {
            return None;
        }

        let generation = shared.core.borrow_mut().state.begin();
        crate::log_generation_start!("{} starting {}", shared.config.label(), generation);
        shared.notify();

        let pending = {
            let mut producer = shared.producer.borrow_mut();
            (*producer)()
        };
        let label = shared.config.label().to_string();
        let settle = Self::settle(Rc::downgrade(shared), label, generation, pending);
        if let Err(error) = shared.spawner.spawn_local(settle.boxed_local()) {
            shared.apply(generation, Err(ResourceError::SpawnFailed(error.to_string())));
        }
        Some(generation)
    }

    async fn settle(
        weak: Weak<Self>,
        label: String,
        generation: Generation,
        pending: Computation<T, E>,
    ) {
        let outcome = pending.await;
        match weak.upgrade() {
            Some(shared) => shared.apply(generation, outcome),
            None => {
                crate::log_unsubscribed!(
                    "{} {} settled after its resource was dropped",
                    label,
                    generation
                );
            }
        }
    }

    fn apply(&self, generation: Generation, outcome: ResourceResult<T, E>) {
        let label = self.config.label();
        if !self.subscription.is_active() {
            crate::log_unsubscribed!("{} {} settled after unsubscribe, discarding", label, generation);
            return;
        }

        let changed = {
            let mut core = self.core.borrow_mut();
            computation::apply_outcome(label, &mut core.state, generation, outcome)
        };
        if changed {
            self.notify();
        }
    }

    fn notify(&self) {
        let core = self.core.borrow();
        for listener in self.listeners.borrow_mut().iter_mut() {
            listener(&core.state);
        }
    }
}
