//! Single-threaded driver tying the handler to the worker.
//!
//! [`Session`] owns the [`AppState`], the [`Worker`] and the set of in-flight
//! effect futures. Events go in through [`Session::dispatch`]; completions come
//! out of [`Session::next_completion`] in arrival order and are fed back
//! through the handler. The state is never touched concurrently.

use super::handler::{handle_event, Event};
use super::state::AppState;
use crate::domain::error::Result;
use crate::ui::UIViewModel;
use crate::worker::{Worker, WorkerResponse};
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};

/// The running coordinator.
pub struct Session {
    state: AppState,
    worker: Worker,
    pending: FuturesUnordered<BoxFuture<'static, WorkerResponse>>,
}

impl Session {
    #[must_use]
    pub fn new(state: AppState, worker: Worker) -> Self {
        Self {
            state,
            worker,
            pending: FuturesUnordered::new(),
        }
    }

    /// Handles one event and starts any effects it requests.
    ///
    /// Returns whether the view model changed.
    ///
    /// # Errors
    ///
    /// Propagates rejected manual input from [`handle_event`].
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let (render, actions) = handle_event(&mut self.state, &event)?;
        for action in actions {
            tracing::trace!(action = ?action, "starting effect");
            self.pending.push(self.worker.execute(action));
        }
        Ok(render)
    }

    /// Waits for the next effect to finish and applies it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Result<bool>> {
        let response = self.pending.next().await?;
        Some(self.dispatch(Event::Worker(response)))
    }

    /// Applies completions until nothing is in flight, including effects that
    /// completions themselves start.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while applying a completion.
    pub async fn settle(&mut self) -> Result<()> {
        while let Some(outcome) = self.next_completion().await {
            outcome?;
        }
        Ok(())
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn viewmodel(&self) -> UIViewModel {
        self.state.compute_viewmodel()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.state.phase)
            .field("in_flight", &self.pending.len())
            .finish_non_exhaustive()
    }
}
