//! State: the observable state of one tracked async operation
//!
//! This module provides `OperationState`, the `Generation` counter used to tell
//! current settlements from stale ones, and the `AsyncState` trait for querying
//! loading, success, and error states.

use std::fmt;

/// Common trait for async state types that represent loading, success, and error states
///
/// This trait provides a unified interface for working with async state types
/// in dioxus-async-resource, such as `OperationState`.
pub trait AsyncState {
    /// The type of successful data
    type Data;
    /// The type of error
    type Error;

    /// Returns true if the state is currently loading
    fn is_loading(&self) -> bool;

    /// Returns true if the most recent settlement produced data
    fn is_success(&self) -> bool;

    /// Returns true if the most recent settlement produced an error
    fn is_error(&self) -> bool;

    /// Returns the last successfully produced data, if any
    fn data(&self) -> Option<&Self::Data>;

    /// Returns the last error, if any
    fn error(&self) -> Option<&Self::Error>;
}

/// Identifier of one attempt of the tracked operation.
///
/// Generations increase by one every time the operation is (re-)started.
/// `Generation::ZERO` means nothing has been started yet.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Generation(u64);

impl Generation {
    /// The generation before the first run.
    pub const ZERO: Generation = Generation(0);

    /// The generation following this one.
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse lifecycle phase of the current generation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Nothing has been started yet.
    Idle,
    /// The current generation has been started and has not settled.
    Loading,
    /// The current generation settled with data.
    Succeeded,
    /// The current generation settled with an error.
    Failed,
}

/// Outcome of offering a settlement to an `OperationState`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Settlement {
    /// The settlement belonged to the current generation and was written.
    Applied,
    /// The settlement belonged to an older generation (or the current one already
    /// settled) and was dropped.
    Stale,
}

/// Which field the most recent settlement wrote.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LastOutcome {
    Success,
    Failure,
}

/// Represents the state of one tracked async operation
///
/// A new generation does not clear `result` or `error`; the previous values stay
/// visible while the next run is loading. A successful settlement writes
/// `result` and leaves `error` alone, a failed one writes `error` and leaves
/// `result` alone. Use [`OperationState::latest`] to look only at what the most
/// recent settlement produced.
#[derive(Clone, PartialEq, Debug)]
pub struct OperationState<T, E> {
    result: Option<T>,
    error: Option<E>,
    is_loading: bool,
    generation: Generation,
    result_generation: Generation,
    error_generation: Generation,
    last: Option<LastOutcome>,
    settled: bool,
}

impl<T, E> Default for OperationState<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> OperationState<T, E> {
    /// Fresh state: not loading, no result, no error, generation zero.
    pub fn new() -> Self {
        Self {
            result: None,
            error: None,
            is_loading: false,
            generation: Generation::ZERO,
            result_generation: Generation::ZERO,
            error_generation: Generation::ZERO,
            last: None,
            settled: false,
        }
    }

    /// The last successfully produced value.
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// The last failure.
    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// True while the current generation is outstanding and the owner is subscribed.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The current generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Generation whose settlement wrote `result`, `ZERO` if never written.
    pub fn result_generation(&self) -> Generation {
        self.result_generation
    }

    /// Generation whose settlement wrote `error`, `ZERO` if never written.
    pub fn error_generation(&self) -> Generation {
        self.error_generation
    }

    /// The value written by the most recent settlement, exclusively data or error.
    pub fn latest(&self) -> Option<Result<&T, &E>> {
        match self.last? {
            LastOutcome::Success => self.result.as_ref().map(Ok),
            LastOutcome::Failure => self.error.as_ref().map(Err),
        }
    }

    /// Lifecycle phase of the current generation.
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            return Phase::Loading;
        }
        match (self.settled, self.last) {
            (true, Some(LastOutcome::Success)) => Phase::Succeeded,
            (true, Some(LastOutcome::Failure)) => Phase::Failed,
            _ => Phase::Idle,
        }
    }

    /// Start a new generation. Previous `result`/`error` stay in place.
    pub(crate) fn begin(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.is_loading = true;
        self.settled = false;
        self.generation
    }

    /// Offer the outcome of `generation`. Anything but the current, unsettled
    /// generation is dropped without touching the state.
    pub(crate) fn settle(&mut self, generation: Generation, outcome: Result<T, E>) -> Settlement {
        if generation != self.generation || self.settled {
            return Settlement::Stale;
        }

        self.is_loading = false;
        self.settled = true;
        match outcome {
            Ok(value) => {
                self.result = Some(value);
                self.result_generation = generation;
                self.last = Some(LastOutcome::Success);
            }
            Err(error) => {
                self.error = Some(error);
                self.error_generation = generation;
                self.last = Some(LastOutcome::Failure);
            }
        }
        Settlement::Applied
    }

    /// The owner went away: stop reporting a load that nobody will observe.
    pub(crate) fn detach(&mut self) {
        self.is_loading = false;
    }

    /// Maps the contained data by applying a function to it, keeping everything else.
    pub fn map<U, F>(self, op: F) -> OperationState<U, E>
    where
        F: FnOnce(T) -> U,
    {
        OperationState {
            result: self.result.map(op),
            error: self.error,
            is_loading: self.is_loading,
            generation: self.generation,
            result_generation: self.result_generation,
            error_generation: self.error_generation,
            last: self.last,
            settled: self.settled,
        }
    }

    /// Maps the contained error by applying a function to it, keeping everything else.
    pub fn map_err<F, O>(self, op: O) -> OperationState<T, F>
    where
        O: FnOnce(E) -> F,
    {
        OperationState {
            result: self.result,
            error: self.error.map(op),
            is_loading: self.is_loading,
            generation: self.generation,
            result_generation: self.result_generation,
            error_generation: self.error_generation,
            last: self.last,
            settled: self.settled,
        }
    }
}

impl<T, E> AsyncState for OperationState<T, E> {
    type Data = T;
    type Error = E;

    fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn is_success(&self) -> bool {
        matches!(self.latest(), Some(Ok(_)))
    }

    fn is_error(&self) -> bool {
        matches!(self.latest(), Some(Err(_)))
    }

    fn data(&self) -> Option<&T> {
        self.result()
    }

    fn error(&self) -> Option<&E> {
        OperationState::error(self)
    }
}
