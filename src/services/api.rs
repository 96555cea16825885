// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OctoGym API client.
//!
//! Handles:
//! - Account registration and login
//! - Workout listing and create/update/delete
//! - Mapping HTTP failures onto the engine error taxonomy

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{WorkoutPayload, WorkoutRecord};

/// OctoGym API client.
#[derive(Clone)]
pub struct GymApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl GymApiClient {
    /// Create a new client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    // ─── Auth Endpoints ──────────────────────────────────────────────────────

    /// Register a new account. Success establishes nothing; the caller still
    /// has to log in.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), AppError> {
        let url = format!("{}/auth/register", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response(response).await
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let url = format!("{}/auth/login-json", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        // A 401 here means wrong credentials, not an expired session: there
        // is no session yet to tear down.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::InvalidCredentials);
        }

        let token: TokenResponse = self.check_response_json(response).await?;
        Ok(token.access_token)
    }

    // ─── Workout Endpoints ───────────────────────────────────────────────────

    /// Fetch the full workout collection for the authenticated user.
    pub async fn list_workouts(&self, access_token: &str) -> Result<Vec<WorkoutRecord>, AppError> {
        let url = format!("{}/workouts", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Create a workout; returns the server-assigned record.
    pub async fn create_workout(
        &self,
        access_token: &str,
        payload: &WorkoutPayload,
    ) -> Result<WorkoutRecord, AppError> {
        let url = format!("{}/workouts", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Update a workout by id; returns the server's resulting record.
    pub async fn update_workout(
        &self,
        access_token: &str,
        id: u64,
        payload: &WorkoutPayload,
    ) -> Result<WorkoutRecord, AppError> {
        let url = format!("{}/workouts/{}", self.base_url, id);

        let response = self
            .http
            .put(&url)
            .bearer_auth(access_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Delete a workout by id.
    pub async fn delete_workout(&self, access_token: &str, id: u64) -> Result<(), AppError> {
        let url = format!("{}/workouts/{}", self.base_url, id);

        let response = self
            .http
            .delete(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response(response).await
    }

    // ─── Response Handling ───────────────────────────────────────────────────

    /// Check response status and return an error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(rejection(status, &body))
    }

    /// Check response and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                return Err(AppError::Unauthorized);
            }

            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Api(format!("JSON parse error: {}", e)))
    }
}

/// Map a non-401 failure status onto the error taxonomy, surfacing the
/// server's `detail` message verbatim when the body carries one.
fn rejection(status: StatusCode, body: &str) -> AppError {
    if status.is_client_error() {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail);
        return match detail {
            Some(detail) => AppError::Rejected(detail),
            None => AppError::Rejected(format!("HTTP {}", status)),
        };
    }

    tracing::warn!(status = %status, "OctoGym API server error");
    AppError::Api(format!("HTTP {}: {}", status, body))
}

/// Request body for both auth endpoints.
#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Token response from login.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Error body shape used by the backend for 4xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}
