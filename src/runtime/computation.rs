//! Invoking producers and applying their outcomes.

use futures::{
    FutureExt,
    future::{self, LocalBoxFuture},
};
use std::{
    future::Future,
    panic::{self, AssertUnwindSafe},
};

use crate::{
    errors::{ResourceError, ResourceResult},
    state::{Generation, OperationState, Settlement},
};

/// A started computation with failures already normalized.
pub(crate) type Computation<T, E> = LocalBoxFuture<'static, ResourceResult<T, E>>;

/// Call `producer` and normalize everything that can go wrong.
///
/// A panic while calling the producer, a panic while polling its future, and a
/// regular `Err` all come out as `Err(ResourceError)`.
pub(crate) fn invoke<T, E, F, Fut>(producer: &mut F) -> Computation<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>> + 'static,
    T: 'static,
    E: 'static,
{
    match panic::catch_unwind(AssertUnwindSafe(producer)) {
        Ok(computation) => AssertUnwindSafe(computation)
            .catch_unwind()
            .map(|caught| match caught {
                Ok(outcome) => outcome.map_err(ResourceError::Failed),
                Err(payload) => Err(ResourceError::panicked(payload)),
            })
            .boxed_local(),
        Err(payload) => future::ready(Err(ResourceError::panicked(payload))).boxed_local(),
    }
}

/// Offer one outcome to `state`, logging what happened. Returns true if the
/// state changed.
pub(crate) fn apply_outcome<T, E>(
    label: &str,
    state: &mut OperationState<T, ResourceError<E>>,
    generation: Generation,
    outcome: ResourceResult<T, E>,
) -> bool {
    let succeeded = outcome.is_ok();
    match state.settle(generation, outcome) {
        Settlement::Applied => {
            if succeeded {
                crate::log_settle_success!("{} {} settled with a result", label, generation);
            } else {
                crate::log_settle_error!("{} {} settled with an error", label, generation);
            }
            true
        }
        Settlement::Stale => {
            crate::log_stale_discard!(
                "{} {} settled after {} started, discarding",
                label,
                generation,
                state.generation()
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_invoke_passes_success_through() {
        let mut producer = || async { Ok::<_, String>(5) };
        assert_eq!(block_on(invoke(&mut producer)), Ok(5));
    }

    #[test]
    fn test_invoke_wraps_failure() {
        let mut producer = || async { Err::<u32, _>("boom".to_string()) };
        assert_eq!(
            block_on(invoke(&mut producer)),
            Err(ResourceError::Failed("boom".to_string()))
        );
    }

    #[test]
    #[allow(unreachable_code)]
    fn test_invoke_catches_panicking_producer() {
        let mut producer = || -> future::Ready<Result<u32, String>> { panic!("no future for you") };
        assert_eq!(
            block_on(invoke(&mut producer)),
            Err(ResourceError::Panicked("no future for you".to_string()))
        );
    }

    #[test]
    fn test_invoke_catches_panicking_computation() {
        let mut producer = || async {
            if true {
                panic!("mid-flight");
            }
            Ok::<u32, String>(1)
        };
        assert_eq!(
            block_on(invoke(&mut producer)),
            Err(ResourceError::Panicked("mid-flight".to_string()))
        );
    }

    #[test]
    fn test_apply_outcome_reports_changes() {
        let mut state = OperationState::<u32, ResourceError<String>>::new();
        let first = state.begin();
        let second = state.begin();

        assert!(!apply_outcome("test", &mut state, first, Ok(1)));
        assert!(apply_outcome("test", &mut state, second, Ok(2)));
        assert_eq!(state.result(), Some(&2));
    }
}
