// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record and form-input models.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A workout record as held in the store and on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Server-assigned ID, unique within the store
    pub id: u64,
    /// Activity label ("Jogging", "Yoga", ...)
    #[serde(rename = "type")]
    pub workout_type: String,
    /// Duration in whole minutes
    pub duration_minutes: u32,
    /// Free-text intensity label, classified by the analytics engine
    pub intensity: String,
    /// Calendar date as `YYYY-MM-DD`; the server defaults it when absent
    #[serde(default)]
    pub date: Option<String>,
}

/// Form-shaped workout input, before validation.
///
/// `duration_minutes` is text because that is what a form field yields; it
/// is coerced to a number by [`WorkoutDraft::validate`].
#[derive(Debug, Clone, Default)]
pub struct WorkoutDraft {
    pub workout_type: String,
    pub duration_minutes: String,
    pub intensity: String,
    pub date: Option<String>,
}

/// Validated request body for workout create/update calls.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutPayload {
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration_minutes: u32,
    pub intensity: String,
    /// Serialized as `null` when absent; the server then picks today
    pub date: Option<String>,
}

impl WorkoutDraft {
    /// Build a draft from an existing record, for editing.
    pub fn from_record(record: &WorkoutRecord) -> Self {
        Self {
            workout_type: record.workout_type.clone(),
            duration_minutes: record.duration_minutes.to_string(),
            intensity: record.intensity.clone(),
            date: record.date.clone(),
        }
    }

    /// Validate the draft and coerce it into a request payload.
    ///
    /// Type, duration, and intensity are required; duration must parse as a
    /// non-negative whole number of minutes. An empty date is treated as
    /// absent so the server fills in today.
    pub fn validate(&self) -> Result<WorkoutPayload> {
        let workout_type = self.workout_type.trim();
        let duration = self.duration_minutes.trim();
        let intensity = self.intensity.trim();

        if workout_type.is_empty() || duration.is_empty() || intensity.is_empty() {
            return Err(AppError::Validation(
                "type, duration, and intensity are required".to_string(),
            ));
        }

        let duration_minutes: u32 = duration.parse().map_err(|_| {
            AppError::Validation(format!(
                "duration must be a whole number of minutes, got {duration:?}"
            ))
        })?;

        let date = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        Ok(WorkoutPayload {
            workout_type: workout_type.to_string(),
            duration_minutes,
            intensity: intensity.to_string(),
            date,
        })
    }
}
