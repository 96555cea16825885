// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OctoGym client engine: session and workout-state synchronization.
//!
//! This crate owns the authoritative in-memory view of the current user's
//! workouts, keeps it consistent with the OctoGym API across mutations,
//! reacts to authentication expiry, and recomputes derived training
//! analytics after every change. Rendering is left to the embedding
//! application; it consumes the read models and drives the intents exposed
//! here.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use error::Result;
use services::{GymApiClient, SessionManager, WorkoutStore};

/// The engine context: configuration plus the two stateful components.
///
/// One `Engine` per process. Components are individually cloneable and
/// share state, so the view layer can hold whichever handles it needs.
pub struct Engine {
    pub config: Config,
    pub session: SessionManager,
    pub workouts: WorkoutStore,
}

impl Engine {
    /// Build the engine and restore any persisted session.
    ///
    /// The workout collection is not hydrated here; call
    /// [`WorkoutStore::load`] (or let the sign-in flows do it) once the
    /// caller is ready for network traffic.
    pub async fn init(config: Config) -> Self {
        let api = GymApiClient::new(config.api_base_url.clone());
        let session = SessionManager::new(api.clone(), config.session_file.clone());
        session.restore().await;

        let workouts = WorkoutStore::new(api, session.clone(), config.daily_goal_minutes);

        Self {
            config,
            session,
            workouts,
        }
    }

    /// Register, then log in, then hydrate the store.
    ///
    /// Both steps of the sign-up must fully succeed; a failed registration
    /// never attempts the login.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        self.session.register(email, password).await?;
        self.sign_in(email, password).await
    }

    /// Log in and hydrate the store.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        self.session.login(email, password).await?;
        self.workouts.load().await?;
        Ok(())
    }

    /// Log out and discard the local collection, so no stale data is
    /// visible for a different or absent identity.
    pub async fn sign_out(&self) {
        self.session.logout().await;
        self.workouts.clear().await;
    }
}
