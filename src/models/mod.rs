// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the engine.

pub mod analytics;
pub mod template;
pub mod workout;

pub use analytics::{compute_snapshot, AnalyticsSnapshot, DayMinutes, Intensity, IntensityMinutes};
pub use template::{templates, WorkoutTemplate};
pub use workout::{WorkoutDraft, WorkoutPayload, WorkoutRecord};
