// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session, store, and API client.

pub mod api;
pub mod session;
pub mod store;

pub use api::GymApiClient;
pub use session::{Session, SessionManager};
pub use store::WorkoutStore;
