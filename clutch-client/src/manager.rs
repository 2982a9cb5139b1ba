//! List manager
//!
//! Owns the ordered view of one collection and drives the reorder protocol:
//!
//! 1. swap the two rows locally so the admin sees the move immediately
//! 2. write the new ranks, all requests in flight together, and wait for
//!    every one of them to settle
//! 3. on success record the ranks, wait `reconcile_delay`, reload
//! 4. on failure raise a notice and reload at once
//!
//! Recovery always goes through a reload from the backend; the optimistic
//! swap is never undone in memory. Only one reorder per collection may be in
//! flight; a second gesture is refused with [`ListError::ReorderBusy`] until
//! the first one has reloaded.

use crate::config::{ClientConfig, RankStrategy};
use crate::error::{ListError, ListResult};
use crate::notice::{Notice, NoticeBoard};
use crate::phase::{ReorderEvent, ReorderPhase};
use crate::plan::{Direction, MovePlan, plan_move, target_index};
use crate::store::ListStore;
use crate::view::OrderedView;
use futures::future::join_all;
use shared::Collection;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// Result of a move request that was not rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Row already at the boundary; nothing sent
    Unchanged,
    /// Ranks persisted and the view reconciled
    Moved(MovePlan),
}

/// Mutable state behind the manager's lock
#[derive(Debug)]
struct ListState<T> {
    view: OrderedView<T>,
    filter: String,
    phase: ReorderPhase,
    notices: NoticeBoard,
}

impl<T> ListState<T> {
    fn advance(&mut self, event: ReorderEvent) {
        match self.phase.next(event) {
            Ok(next) => self.phase = next,
            Err(e) => tracing::warn!(error = %e, "Ignoring reorder event"),
        }
    }
}

/// Clears the in-flight flag when the gesture ends, however it ends
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Admin list for one collection
pub struct ListManager<T: Collection, S: ListStore<T>> {
    store: S,
    strategy: RankStrategy,
    reconcile_delay: Duration,
    state: RwLock<ListState<T>>,
    in_flight: AtomicBool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Collection, S: ListStore<T>> ListManager<T, S> {
    pub fn new(store: S, config: &ClientConfig) -> Self {
        Self {
            store,
            strategy: config.rank_strategy,
            reconcile_delay: config.reconcile_delay,
            state: RwLock::new(ListState {
                view: OrderedView::default(),
                filter: String::new(),
                phase: ReorderPhase::Idle,
                notices: NoticeBoard::new(config.notice_ttl),
            }),
            in_flight: AtomicBool::new(false),
            _marker: PhantomData,
        }
    }

    // ========== Snapshots ==========

    /// Full ordered view
    pub async fn items(&self) -> Vec<T> {
        self.state.read().await.view.items().to_vec()
    }

    pub async fn ids(&self) -> Vec<String> {
        let state = self.state.read().await;
        state.view.ids().into_iter().map(str::to_string).collect()
    }

    /// Rows matching the current filter, with their index in the full view
    pub async fn visible(&self) -> Vec<(usize, T)> {
        let state = self.state.read().await;
        state
            .view
            .visible(&state.filter)
            .into_iter()
            .map(|(index, item)| (index, item.clone()))
            .collect()
    }

    pub async fn phase(&self) -> ReorderPhase {
        self.state.read().await.phase
    }

    pub fn is_reordering(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Live notices, expired ones pruned
    pub async fn notices(&self) -> Vec<Notice> {
        self.state.write().await.notices.active()
    }

    pub async fn dismiss_notice(&self, id: u64) -> bool {
        self.state.write().await.notices.dismiss(id)
    }

    // ========== Filter ==========

    pub async fn set_filter(&self, query: impl Into<String>) {
        self.state.write().await.filter = query.into();
    }

    pub async fn clear_filter(&self) {
        self.state.write().await.filter.clear();
    }

    pub async fn filter(&self) -> String {
        self.state.read().await.filter.clone()
    }

    // ========== Load ==========

    /// Fetch the collection and rebuild the view
    ///
    /// On failure the previous view is kept and a notice is raised.
    pub async fn load(&self) -> ListResult<()> {
        let fetched = self.store.fetch_all().await;
        let mut state = self.state.write().await;

        let records = match fetched {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(collection = T::PATH, error = %e, "Failed to load collection");
                state.notices.error(format!("Failed to load {}", T::PATH));
                return Err(ListError::LoadFailed(e));
            }
        };

        match OrderedView::from_records(records) {
            Ok(view) => {
                tracing::debug!(collection = T::PATH, count = view.len(), "Collection loaded");
                state.view = view;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(collection = T::PATH, error = %e, "Rejected collection payload");
                state.notices.error(format!("Failed to load {}", T::PATH));
                Err(ListError::InvalidRecord(e))
            }
        }
    }

    // ========== Reorder ==========

    /// Whether the up/down control for `index` should be enabled
    pub async fn can_move(&self, index: usize, direction: Direction) -> bool {
        if self.is_reordering() {
            return false;
        }
        let state = self.state.read().await;
        state.filter.is_empty()
            && index < state.view.len()
            && target_index(index, state.view.len(), direction).is_some()
    }

    /// Move the row at `index` one slot in `direction`
    ///
    /// Resolves once the gesture has settled: ranks persisted and the view
    /// reloaded, or the failure reported and the view reloaded.
    pub async fn move_item(&self, index: usize, direction: Direction) -> ListResult<MoveOutcome> {
        let Some(_guard) = InFlight::try_acquire(&self.in_flight) else {
            return Err(ListError::ReorderBusy);
        };

        let plan = {
            let mut state = self.state.write().await;

            if state.phase.is_busy() {
                // Left behind by a gesture whose future was dropped mid-flight
                tracing::warn!(phase = ?state.phase, "Resetting stale reorder phase");
                state.phase = ReorderPhase::Idle;
            }

            if !state.filter.is_empty() {
                state.advance(ReorderEvent::MoveBlocked);
                state
                    .notices
                    .error("Cannot reorder while a search filter is active");
                return Err(ListError::ReorderBlocked);
            }

            let Some(plan) = plan_move(&state.view, index, direction, self.strategy)? else {
                return Ok(MoveOutcome::Unchanged);
            };

            state.view.swap(plan.index, plan.target);
            state.advance(ReorderEvent::MoveAccepted);
            plan
        };

        tracing::debug!(
            collection = T::PATH,
            index = plan.index,
            target = plan.target,
            writes = plan.assignments.len(),
            "Reorder applied optimistically"
        );

        let writes = plan
            .assignments
            .iter()
            .map(|a| self.store.persist_rank(&a.id, a.rank));

        // Wait for every write to settle so the reload sees the final state
        let failure = join_all(writes).await.into_iter().find_map(Result::err);

        match failure {
            None => {
                {
                    let mut state = self.state.write().await;
                    for a in &plan.assignments {
                        state.view.set_rank(&a.id, a.rank);
                    }
                    state.advance(ReorderEvent::PersistSucceeded);
                }

                tokio::time::sleep(self.reconcile_delay).await;
                // A failed reconcile leaves the confirmed local order in place;
                // load() has already raised its own notice.
                let _ = self.load().await;
                self.state.write().await.advance(ReorderEvent::ReloadFinished);

                tracing::info!(collection = T::PATH, index, target = plan.target, "Reorder persisted");
                Ok(MoveOutcome::Moved(plan))
            }
            Some(e) => {
                tracing::warn!(collection = T::PATH, error = %e, "Reorder failed, reloading");
                {
                    let mut state = self.state.write().await;
                    state.advance(ReorderEvent::PersistFailed);
                    state.notices.error("Failed to update order");
                }

                let _ = self.load().await;
                self.state.write().await.advance(ReorderEvent::ReloadFinished);
                Err(ListError::ReorderPersistFailed(e))
            }
        }
    }

    // ========== Record maintenance ==========

    /// Create a listing
    ///
    /// The draft is checked locally first. The stored record goes ahead of
    /// every row with the same or a higher rank, so an unranked listing shows
    /// at the top until the next reload places it.
    pub async fn create(&self, draft: &T::Draft) -> ListResult<T> {
        if let Err(e) = T::validate_draft(draft) {
            tracing::warn!(collection = T::PATH, error = %e, "Rejected new listing");
            self.state.write().await.notices.error(e.to_string());
            return Err(ListError::InvalidRecord(e));
        }

        match self.store.create(draft).await {
            Ok(record) => {
                let mut state = self.state.write().await;
                match state.view.insert(record.clone()) {
                    Ok(index) => {
                        tracing::debug!(collection = T::PATH, item_id = record.id(), index, "Listing added")
                    }
                    Err(e) => {
                        tracing::warn!(collection = T::PATH, error = %e, "Created listing not added to view")
                    }
                }
                state.notices.success(format!("{} added", T::DISPLAY_NAME));
                Ok(record)
            }
            Err(source) => {
                tracing::warn!(collection = T::PATH, error = %source, "Create failed");
                self.state
                    .write()
                    .await
                    .notices
                    .error(format!("Failed to add {}", T::DISPLAY_NAME.to_lowercase()));
                Err(ListError::CreateFailed(source))
            }
        }
    }

    /// Update one record; the returned record replaces the local one in place
    pub async fn update(&self, id: &str, patch: &T::Patch) -> ListResult<T> {
        match self.store.update(id, patch).await {
            Ok(record) => {
                let mut state = self.state.write().await;
                if !state.view.replace(record.clone()) {
                    tracing::debug!(collection = T::PATH, item_id = id, "Updated record not in view");
                }
                state.notices.success(format!("{} updated", T::DISPLAY_NAME));
                Ok(record)
            }
            Err(source) => {
                tracing::warn!(collection = T::PATH, item_id = id, error = %source, "Update failed");
                let mut state = self.state.write().await;
                state
                    .notices
                    .error(format!("Failed to update {}", T::DISPLAY_NAME.to_lowercase()));
                Err(ListError::UpdateFailed {
                    id: id.to_string(),
                    source,
                })
            }
        }
    }

    /// Delete one record and drop it from the view
    pub async fn remove(&self, id: &str) -> ListResult<()> {
        match self.store.remove(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.view.remove(id);
                state.notices.success(format!("{} deleted", T::DISPLAY_NAME));
                Ok(())
            }
            Err(source) => {
                tracing::warn!(collection = T::PATH, item_id = id, error = %source, "Delete failed");
                let mut state = self.state.write().await;
                state
                    .notices
                    .error(format!("Failed to delete {}", T::DISPLAY_NAME.to_lowercase()));
                Err(ListError::RemoveFailed {
                    id: id.to_string(),
                    source,
                })
            }
        }
    }
}
