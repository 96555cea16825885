// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quick-entry workout templates.

use crate::models::WorkoutDraft;

/// A preset that prefills the workout form.
#[derive(Debug, Clone, Copy)]
pub struct WorkoutTemplate {
    pub label: &'static str,
    pub workout_type: &'static str,
    pub duration_minutes: u32,
    pub intensity: &'static str,
}

/// The built-in template set. Static data, no I/O.
pub const TEMPLATES: &[WorkoutTemplate] = &[
    WorkoutTemplate {
        label: "Jogging 30 min (Medium)",
        workout_type: "Jogging",
        duration_minutes: 30,
        intensity: "Medium",
    },
    WorkoutTemplate {
        label: "Weights 45 min (High)",
        workout_type: "Weightlifting",
        duration_minutes: 45,
        intensity: "High",
    },
    WorkoutTemplate {
        label: "Yoga 20 min (Low)",
        workout_type: "Yoga",
        duration_minutes: 20,
        intensity: "Low",
    },
];

/// All available templates, in display order.
pub fn templates() -> &'static [WorkoutTemplate] {
    TEMPLATES
}

impl WorkoutTemplate {
    /// Prefill a draft with this template.
    ///
    /// Overwrites type, duration, and intensity but leaves an already-chosen
    /// date in place.
    pub fn apply_to(&self, draft: &mut WorkoutDraft) {
        draft.workout_type = self.workout_type.to_string();
        draft.duration_minutes = self.duration_minutes.to_string();
        draft.intensity = self.intensity.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_validate_as_drafts() {
        for template in templates() {
            let mut draft = WorkoutDraft::default();
            template.apply_to(&mut draft);

            let payload = draft.validate().expect("template should be valid");
            assert_eq!(payload.duration_minutes, template.duration_minutes);
        }
    }

    #[test]
    fn test_apply_preserves_chosen_date() {
        let mut draft = WorkoutDraft {
            date: Some("2025-03-01".to_string()),
            ..WorkoutDraft::default()
        };

        templates()[0].apply_to(&mut draft);

        assert_eq!(draft.workout_type, "Jogging");
        assert_eq!(draft.duration_minutes, "30");
        assert_eq!(draft.date.as_deref(), Some("2025-03-01"));
    }
}
