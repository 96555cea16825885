// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The authoritative local workout collection, synchronized with the API.
//!
//! Every mutation is a remote round trip followed by reconciliation of
//! exactly the affected record (create: insert, update: replace by id,
//! delete: remove by id) — never an optimistic local write that could
//! diverge from what the server actually persisted. The analytics snapshot
//! is recomputed in full after every successful mutation.
//!
//! Concurrent mutations against the same record are resolved by a
//! per-record request sequence: each update/delete takes a monotonically
//! increasing token before its round trip, and a response only reconciles
//! if its token is still current when it lands. Stale responses are
//! discarded instead of letting the last response win.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::error::{AppError, Result};
use crate::models::{compute_snapshot, AnalyticsSnapshot, WorkoutDraft, WorkoutRecord};
use crate::services::{GymApiClient, SessionManager};
use crate::time_utils;

/// Local cache of the current user's workouts plus derived analytics.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct WorkoutStore {
    api: GymApiClient,
    session: SessionManager,
    records: Arc<RwLock<Vec<WorkoutRecord>>>,
    snapshot: Arc<RwLock<AnalyticsSnapshot>>,
    /// Id of the record an edit is in progress for, if any
    editing: Arc<RwLock<Option<u64>>>,
    /// Per-record request sequence for discarding stale responses
    seq: Arc<DashMap<u64, u64>>,
    daily_goal_minutes: u32,
    today_source: fn() -> NaiveDate,
}

impl WorkoutStore {
    pub fn new(api: GymApiClient, session: SessionManager, daily_goal_minutes: u32) -> Self {
        Self::with_today_source(api, session, daily_goal_minutes, time_utils::today)
    }

    /// Construct with an explicit "today" source, so analytics windows are
    /// deterministic under test.
    pub fn with_today_source(
        api: GymApiClient,
        session: SessionManager,
        daily_goal_minutes: u32,
        today_source: fn() -> NaiveDate,
    ) -> Self {
        let snapshot = compute_snapshot(&[], today_source(), daily_goal_minutes);
        Self {
            api,
            session,
            records: Arc::new(RwLock::new(Vec::new())),
            snapshot: Arc::new(RwLock::new(snapshot)),
            editing: Arc::new(RwLock::new(None)),
            seq: Arc::new(DashMap::new()),
            daily_goal_minutes,
            today_source,
        }
    }

    // ─── Synchronized Operations ─────────────────────────────────────────────

    /// Hydrate the store, replacing the entire local collection with the
    /// server's. Runs on session establishment and on demand.
    pub async fn load(&self) -> Result<Vec<WorkoutRecord>> {
        let token = self.require_token().await?;

        let fetched = match self.api.list_workouts(&token).await {
            Ok(records) => records,
            Err(e) => return Err(self.handle_remote_error(e).await),
        };

        {
            let mut records = self.records.write().await;
            *records = fetched.clone();
        }
        self.seq.clear();

        // An edit whose target did not survive the reload is dangling
        let mut editing = self.editing.write().await;
        if let Some(id) = *editing {
            if !fetched.iter().any(|r| r.id == id) {
                *editing = None;
            }
        }
        drop(editing);

        self.recompute().await;
        tracing::debug!(count = fetched.len(), "Workout collection hydrated");
        Ok(fetched)
    }

    /// Create a workout and append the server-assigned record.
    pub async fn create(&self, draft: &WorkoutDraft) -> Result<WorkoutRecord> {
        let payload = draft.validate()?;
        let token = self.require_token().await?;

        let created = match self.api.create_workout(&token, &payload).await {
            Ok(record) => record,
            Err(e) => return Err(self.handle_remote_error(e).await),
        };

        {
            let mut records = self.records.write().await;
            // The id stays unique even if a concurrent load already brought
            // this record in
            if let Some(existing) = records.iter_mut().find(|r| r.id == created.id) {
                *existing = created.clone();
            } else {
                records.push(created.clone());
            }
        }
        self.recompute().await;

        tracing::debug!(id = created.id, "Workout created");
        Ok(created)
    }

    /// Update a workout, replacing the local entry with the server's
    /// returned representation.
    ///
    /// An id the store does not currently track is not a precondition
    /// failure: the local collection may be momentarily behind the server,
    /// so the call is issued anyway and a successful result is reconciled
    /// by insertion.
    pub async fn update(&self, id: u64, draft: &WorkoutDraft) -> Result<WorkoutRecord> {
        let payload = draft.validate()?;
        let token = self.require_token().await?;
        let request = self.begin_request(id);

        let updated = match self.api.update_workout(&token, id, &payload).await {
            Ok(record) => record,
            Err(e) => return Err(self.handle_remote_error(e).await),
        };

        if self.is_current(id, request) {
            {
                let mut records = self.records.write().await;
                if let Some(existing) = records.iter_mut().find(|r| r.id == updated.id) {
                    *existing = updated.clone();
                } else {
                    records.push(updated.clone());
                }
            }

            let mut editing = self.editing.write().await;
            if *editing == Some(id) {
                *editing = None;
            }
            drop(editing);

            self.recompute().await;
            tracing::debug!(id, "Workout updated");
        } else {
            tracing::debug!(id, "Discarding stale update response");
        }

        Ok(updated)
    }

    /// Delete a workout and remove the local entry by id.
    pub async fn delete(&self, id: u64) -> Result<()> {
        let token = self.require_token().await?;
        let request = self.begin_request(id);

        if let Err(e) = self.api.delete_workout(&token, id).await {
            return Err(self.handle_remote_error(e).await);
        }

        if self.is_current(id, request) {
            // Drop the sequence entry: any straggler response for this id
            // is stale by construction
            self.seq.remove(&id);

            {
                let mut records = self.records.write().await;
                records.retain(|r| r.id != id);
            }

            // No edit may reference a deleted record
            let mut editing = self.editing.write().await;
            if *editing == Some(id) {
                *editing = None;
            }
            drop(editing);

            self.recompute().await;
            tracing::debug!(id, "Workout deleted");
        } else {
            tracing::debug!(id, "Discarding stale delete response");
        }

        Ok(())
    }

    /// Discard all local state. Used on logout and forced teardown.
    pub async fn clear(&self) {
        self.records.write().await.clear();
        self.seq.clear();
        *self.editing.write().await = None;
        self.recompute().await;
    }

    // ─── Edit Intent ─────────────────────────────────────────────────────────

    /// Start editing a locally-tracked record; returns a prefilled draft.
    pub async fn begin_edit(&self, id: u64) -> Option<WorkoutDraft> {
        let draft = {
            let records = self.records.read().await;
            records
                .iter()
                .find(|r| r.id == id)
                .map(WorkoutDraft::from_record)?
        };

        *self.editing.write().await = Some(id);
        Some(draft)
    }

    pub async fn cancel_edit(&self) {
        *self.editing.write().await = None;
    }

    /// Id of the record currently being edited, if any.
    pub async fn editing(&self) -> Option<u64> {
        *self.editing.read().await
    }

    // ─── Read Models ─────────────────────────────────────────────────────────

    /// The current collection, in store order.
    pub async fn records(&self) -> Vec<WorkoutRecord> {
        self.records.read().await.clone()
    }

    /// The analytics snapshot derived from the current collection.
    pub async fn snapshot(&self) -> AnalyticsSnapshot {
        self.snapshot.read().await.clone()
    }

    // ─── Internals ───────────────────────────────────────────────────────────

    async fn require_token(&self) -> Result<String> {
        self.session
            .credential()
            .await
            .ok_or(AppError::Unauthenticated)
    }

    /// On a credential rejection, tear the session down and empty the store
    /// before surfacing the error; other failures pass through untouched.
    async fn handle_remote_error(&self, err: AppError) -> AppError {
        if err.is_auth_error() {
            self.session.on_unauthorized().await;
            self.clear().await;
        }
        err
    }

    async fn recompute(&self) {
        let snapshot = {
            let records = self.records.read().await;
            compute_snapshot(&records, (self.today_source)(), self.daily_goal_minutes)
        };
        *self.snapshot.write().await = snapshot;
    }

    fn begin_request(&self, id: u64) -> u64 {
        let mut entry = self.seq.entry(id).or_insert(0);
        *entry += 1;
        *entry
    }

    fn is_current(&self, id: u64, token: u64) -> bool {
        self.seq.get(&id).map_or(false, |current| *current == token)
    }
}
