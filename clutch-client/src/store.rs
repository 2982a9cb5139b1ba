//! Backing store seam
//!
//! The list manager talks to the backend only through [`ListStore`], so the
//! reordering protocol runs the same against the HTTP API and against an
//! in-memory store in tests.

use crate::http::{HttpClient, ensure_acknowledged};
use crate::ClientResult;
use async_trait::async_trait;
use serde_json::Value;
use shared::{Collection, ReorderRequest};

/// Remote collection operations used by the list manager
#[async_trait]
pub trait ListStore<T: Collection>: Send + Sync {
    /// `GET /{collection}` in server order
    async fn fetch_all(&self) -> ClientResult<Vec<T>>;

    /// `POST /{collection}/reorder`, unconditional "set rank to X"
    async fn persist_rank(&self, id: &str, rank: i64) -> ClientResult<()>;

    /// `POST /{collection}`, returns the stored record
    async fn create(&self, draft: &T::Draft) -> ClientResult<T>;

    /// `PUT /{collection}/{id}`
    async fn update(&self, id: &str, patch: &T::Patch) -> ClientResult<T>;

    /// `DELETE /{collection}/{id}`
    async fn remove(&self, id: &str) -> ClientResult<()>;
}

#[async_trait]
impl<T: Collection> ListStore<T> for HttpClient {
    async fn fetch_all(&self) -> ClientResult<Vec<T>> {
        self.get(T::PATH).await
    }

    async fn persist_rank(&self, id: &str, rank: i64) -> ClientResult<()> {
        let body = ReorderRequest::new(id, rank).to_body(T::REORDER_ID_FIELD);
        let ack: Value = self.post(&format!("{}/reorder", T::PATH), &body).await?;
        ensure_acknowledged(&ack)
    }

    async fn create(&self, draft: &T::Draft) -> ClientResult<T> {
        self.post(T::PATH, draft).await
    }

    async fn update(&self, id: &str, patch: &T::Patch) -> ClientResult<T> {
        self.put(&format!("{}/{}", T::PATH, id), patch).await
    }

    async fn remove(&self, id: &str) -> ClientResult<()> {
        let ack: Value = self.delete(&format!("{}/{}", T::PATH, id)).await?;
        ensure_acknowledged(&ack)
    }
}
