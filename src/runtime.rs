//! Executors that drive settlement tasks.
//!
//! A resource never awaits anything itself. Each run produces a settlement task
//! that awaits the computation and then offers its outcome to the state; the
//! `Spawner` decides where that task runs. All implementations are local
//! (single-threaded), so settlements are serialized with every other state
//! mutation.

pub(crate) mod computation;

use futures::{
    executor::LocalSpawner,
    future::LocalBoxFuture,
    task::{LocalSpawnExt, SpawnError},
};

/// Somewhere to run settlement tasks.
pub trait Spawner {
    /// Queue `task` on the local executor.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) -> Result<(), SpawnError>;
}

impl Spawner for LocalSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) -> Result<(), SpawnError> {
        LocalSpawnExt::spawn_local(self, task)
    }
}

/// Spawns onto the current tokio `LocalSet`.
///
/// Must be used from inside `LocalSet::run_until` (or a task spawned on one);
/// tokio panics otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLocalSpawner;

impl Spawner for TokioLocalSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) -> Result<(), SpawnError> {
        drop(tokio::task::spawn_local(task));
        Ok(())
    }
}
