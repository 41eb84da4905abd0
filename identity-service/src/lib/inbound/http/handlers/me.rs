use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::AccountView;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Return the profile of the account resolved by the auth gate.
///
/// This is a profile lookup, not an authentication re-check: the gate has
/// already accepted the credential by the time this runs.
pub async fn me(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    state
        .auth_service
        .account(&authenticated.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AccountView> for MeResponseData {
    fn from(view: &AccountView) -> Self {
        Self {
            id: view.id.to_string(),
            email: view.email.clone(),
            first_name: view.first_name.clone(),
            last_name: view.last_name.clone(),
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}
