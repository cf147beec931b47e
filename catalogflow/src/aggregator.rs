//! Fan-out / fan-in aggregation.
//!
//! An [`Aggregator`] holds one fetch per field of an aggregate record.
//! [`Aggregator::run`] spawns every fetch onto the runtime before awaiting
//! any of them, then awaits the task handles in registration order and folds
//! each success into the accumulator. The first error seen in that order
//! ends the run; the remaining tasks are detached, not aborted, and their
//! results are dropped.
//!
//! The surfaced error therefore belongs to the earliest *declared* failing
//! fetch, even when a later one failed first in wall-clock time.

use crate::errors::{Cause, ErrorKind};
use crate::outcome::{DomainResult, Outcome};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Writes one fetched payload into the accumulator.
type Fold<A> = Box<dyn FnOnce(&mut A) + Send>;

struct Slot<A> {
    name: String,
    task: BoxFuture<'static, Outcome<Fold<A>>>,
}

/// Folds several concurrently fetched payloads into one record.
///
/// ```rust,ignore
/// let collection = Aggregator::new("tv_collection", TvCollection::default())
///     .fetch("popular", repo.get_popular(), |acc, page| acc.popular = page.shows)
///     .fetch("trending", repo.get_trending(), |acc, page| acc.trending = page.shows)
///     .run()
///     .await;
/// ```
pub struct Aggregator<A> {
    name: String,
    seed: A,
    slots: Vec<Slot<A>>,
}

impl<A> Aggregator<A>
where
    A: Send + 'static,
{
    /// Creates an aggregator starting from `seed`.
    #[must_use]
    pub fn new(name: impl Into<String>, seed: A) -> Self {
        Self {
            name: name.into(),
            seed,
            slots: Vec::new(),
        }
    }

    /// Registers a fetch and the fold that stores its payload.
    ///
    /// Nothing runs until [`run`](Self::run); registration order is the
    /// order results are checked in.
    #[must_use]
    pub fn fetch<P, Fut, F>(mut self, slot: impl Into<String>, operation: Fut, fold: F) -> Self
    where
        P: Send + 'static,
        Fut: Future<Output = Outcome<P>> + Send + 'static,
        F: FnOnce(&mut A, P) + Send + 'static,
    {
        let task = async move {
            operation
                .await
                .map(|payload| -> Fold<A> { Box::new(move |acc: &mut A| fold(acc, payload)) })
        }
        .boxed();

        self.slots.push(Slot {
            name: slot.into(),
            task,
        });
        self
    }

    /// Returns the aggregate name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slot names in declared order.
    #[must_use]
    pub fn slot_names(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.name.as_str()).collect()
    }

    /// Returns the number of registered fetches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true when no fetch is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Launches every fetch, then folds the results in declared order.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run(self) -> DomainResult<A> {
        let Self { name, seed, slots } = self;
        let run_id = Uuid::new_v4();
        let span = info_span!("aggregate", aggregate = %name, run_id = %run_id);

        async move {
            let total = slots.len();

            let handles: Vec<(String, JoinHandle<Outcome<Fold<A>>>)> = slots
                .into_iter()
                .map(|slot| (slot.name, tokio::spawn(slot.task)))
                .collect();
            debug!(slots = total, "launched fetches");

            let mut accumulator = seed;
            for (index, (slot, handle)) in handles.into_iter().enumerate() {
                let error = match handle.await {
                    Ok(Outcome::Success(fold)) => {
                        fold(&mut accumulator);
                        debug!(slot = %slot, "folded fetch result");
                        continue;
                    }
                    Ok(Outcome::Error(error)) => error,
                    Err(join_error) => ErrorKind::unknown(Cause::new(join_error)),
                };

                // Dropping the remaining handles detaches their tasks.
                warn!(
                    slot = %slot,
                    error_kind = error.kind_name(),
                    error = %error,
                    abandoned = total - index - 1,
                    "aggregate short-circuited"
                );
                return DomainResult::Error(error);
            }

            info!(slots = total, "aggregate complete");
            DomainResult::Success(accumulator)
        }
        .instrument(span)
        .await
    }
}

impl<A> std::fmt::Debug for Aggregator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("name", &self.name)
            .field(
                "slots",
                &self.slots.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
