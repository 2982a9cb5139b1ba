//! In-memory tables behind the mock API

use shared::{Car, Collection, Property, ReorderRequest};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// One collection's records plus its injected faults
#[derive(Debug)]
pub struct Table<T: Collection> {
    records: RwLock<Vec<T>>,
    failing_reorders: RwLock<HashSet<String>>,
    fail_loads: AtomicBool,
    reorder_delay: RwLock<Option<Duration>>,
    reorder_log: RwLock<Vec<ReorderRequest>>,
    loads: AtomicUsize,
    next_id: AtomicU64,
}

impl<T: Collection> Default for Table<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            failing_reorders: RwLock::new(HashSet::new()),
            fail_loads: AtomicBool::new(false),
            reorder_delay: RwLock::new(None),
            reorder_log: RwLock::new(Vec::new()),
            loads: AtomicUsize::new(0),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<T: Collection> Table<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Default::default()
        }
    }

    /// Records sorted by rank, ties kept in insertion order
    pub async fn list(&self) -> Vec<T> {
        let mut records = self.records.read().await.clone();
        records.sort_by_key(|r| r.rank());
        records
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    /// `(id, rank)` pairs in server order
    pub async fn ranks(&self) -> Vec<(String, i64)> {
        self.list()
            .await
            .iter()
            .map(|r| (r.id().to_string(), r.rank()))
            .collect()
    }

    pub(crate) async fn log_reorder(&self, request: &ReorderRequest) {
        self.reorder_log.write().await.push(request.clone());
    }

    /// Returns false when the request names an unknown id
    pub(crate) async fn set_rank(&self, request: &ReorderRequest) -> bool {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == request.item_id) {
            Some(record) => {
                record.set_rank(request.new_order);
                true
            }
            None => false,
        }
    }

    /// Store a new record at the end, without a rank
    pub(crate) async fn insert(&self, draft: T::Draft) -> T {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = T::from_draft(format!("{}-new-{n}", T::PATH), draft);
        self.records.write().await.push(record.clone());
        record
    }

    pub(crate) async fn update(&self, id: &str, patch: T::Patch) -> Option<T> {
        let mut records = self.records.write().await;
        let record = records.iter_mut().find(|r| r.id() == id)?;
        record.apply_patch(patch);
        Some(record.clone())
    }

    pub(crate) async fn remove(&self, id: &str) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        records.len() != before
    }

    /// Make every reorder request naming `id` fail with a 500
    pub async fn fail_reorder_for(&self, id: impl Into<String>) {
        self.failing_reorders.write().await.insert(id.into());
    }

    pub(crate) async fn reorder_fails(&self, id: &str) -> bool {
        self.failing_reorders.read().await.contains(id)
    }

    /// Make `GET /{collection}` fail with a 500
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn loads_fail(&self) -> bool {
        self.fail_loads.load(Ordering::SeqCst)
    }

    /// Hold every reorder request for `delay` before answering
    pub async fn delay_reorders(&self, delay: Duration) {
        *self.reorder_delay.write().await = Some(delay);
    }

    pub(crate) async fn reorder_delay(&self) -> Option<Duration> {
        *self.reorder_delay.read().await
    }

    pub async fn clear_faults(&self) {
        self.failing_reorders.write().await.clear();
        *self.reorder_delay.write().await = None;
        self.fail_loads(false);
    }

    pub(crate) fn count_load(&self) {
        self.loads.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of `GET /{collection}` requests served, failed ones included
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Every reorder request received so far, including rejected ones
    pub async fn reorder_log(&self) -> Vec<ReorderRequest> {
        self.reorder_log.read().await.clone()
    }
}

/// Shared state of the mock server
#[derive(Debug, Default)]
pub struct MockState {
    pub cars: Arc<Table<Car>>,
    pub properties: Arc<Table<Property>>,
    /// Bearer token required on `/api` routes, if any
    pub token: Option<String>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cars(mut self, cars: Vec<Car>) -> Self {
        self.cars = Arc::new(Table::new(cars));
        self
    }

    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = Arc::new(Table::new(properties));
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{CarCreate, Ranked};

    #[tokio::test]
    async fn test_list_sorts_by_rank_keeping_ties_stable() {
        let table = Table::new(vec![
            Car::new("b").with_rank(1),
            Car::new("a").with_rank(0),
            Car::new("c"),
        ]);

        let ids: Vec<String> = table.ranks().await.into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn test_set_rank_rejects_unknown_ids() {
        let table = Table::new(vec![Car::new("a")]);

        assert!(table.set_rank(&ReorderRequest::new("a", 4)).await);
        assert!(!table.set_rank(&ReorderRequest::new("zz", 1)).await);

        assert_eq!(table.get("a").await.map(|c| c.rank()), Some(4));
    }

    #[tokio::test]
    async fn test_faults_can_be_cleared() {
        let table: Table<Property> = Table::default();
        table.fail_reorder_for("p1").await;
        table.fail_loads(true);
        table.delay_reorders(Duration::from_secs(2)).await;
        assert!(table.reorder_fails("p1").await);
        assert!(table.loads_fail());
        assert_eq!(table.reorder_delay().await, Some(Duration::from_secs(2)));

        table.clear_faults().await;
        assert!(!table.reorder_fails("p1").await);
        assert!(!table.loads_fail());
        assert_eq!(table.reorder_delay().await, None);
    }

    #[tokio::test]
    async fn test_insert_appends_unranked_with_fresh_ids() {
        let table = Table::new(vec![Car::new("a").with_rank(0)]);
        let first = table
            .insert(CarCreate {
                title: "Rio".into(),
                ..Default::default()
            })
            .await;
        let second = table.insert(CarCreate::default()).await;

        assert_eq!(first.id, "cars-new-1");
        assert_eq!(second.id, "cars-new-2");
        assert_eq!(first.rank(), 0);
        assert_eq!(table.ranks().await.len(), 3);
        assert_eq!(table.list().await[1].id, "cars-new-1");
    }
}
