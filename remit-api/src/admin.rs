use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use remit_accounts::Account;
use remit_core::GatewaySettings;
use remit_order::{preview_orders, PreviewEntry};
use remit_shared::models::events::GatewayEvent;
use remit_store::AccountForm;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountsResponse {
    pub accounts: Vec<Account>,
    /// The same accounts laid out as the editable table
    pub form: AccountForm,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UninstallResponse {
    pub wiped: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/gateway/settings", get(get_settings).put(save_settings))
        .route("/admin/gateway/accounts", get(get_accounts).put(save_accounts))
        .route("/admin/gateway/preview", get(preview))
        .route("/admin/gateway/uninstall", post(uninstall))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /admin/gateway/settings
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<GatewaySettings>, AppError> {
    Ok(Json(state.settings.load_settings().await?))
}

/// PUT /admin/gateway/settings
/// Keys the form does not know about are carried over from the stored object
pub async fn save_settings(
    State(state): State<AppState>,
    Json(mut req): Json<GatewaySettings>,
) -> Result<Json<GatewaySettings>, AppError> {
    let current = state.settings.load_settings().await?;
    for (key, value) in current.extra {
        req.extra.entry(key).or_insert(value);
    }

    state.settings.save_settings(&req).await?;
    let accounts = state.settings.load_accounts().await?;
    let _ = state
        .events_tx
        .send(GatewayEvent::settings_saved(state.settings.gateway_id(), accounts.len()));
    Ok(Json(req))
}

/// GET /admin/gateway/accounts
pub async fn get_accounts(State(state): State<AppState>) -> Result<Json<AccountsResponse>, AppError> {
    let accounts = state.settings.load_accounts().await?;
    let form = AccountForm::from_accounts(&accounts);
    Ok(Json(AccountsResponse { accounts, form }))
}

/// PUT /admin/gateway/accounts
/// Replaces the whole account table with the posted rows
pub async fn save_accounts(
    State(state): State<AppState>,
    Json(form): Json<AccountForm>,
) -> Result<Json<AccountsResponse>, AppError> {
    let accounts = form.into_accounts();
    state.settings.save_accounts(&accounts).await?;
    let _ = state
        .events_tx
        .send(GatewayEvent::settings_saved(state.settings.gateway_id(), accounts.len()));

    let form = AccountForm::from_accounts(&accounts);
    Ok(Json(AccountsResponse { accounts, form }))
}

/// GET /admin/gateway/preview
pub async fn preview(State(state): State<AppState>) -> Result<Json<Vec<PreviewEntry>>, AppError> {
    let entries = preview_orders(
        state.orders.as_ref(),
        &state.orchestrator,
        state.settings.gateway_id(),
        state.gateway.preview_limit,
    )
    .await?;
    Ok(Json(entries))
}

/// POST /admin/gateway/uninstall
pub async fn uninstall(State(state): State<AppState>) -> Result<Json<UninstallResponse>, AppError> {
    let wiped = state.settings.uninstall().await?;
    if wiped {
        let _ = state
            .events_tx
            .send(GatewayEvent::configuration_wiped(state.settings.gateway_id()));
    }
    Ok(Json(UninstallResponse { wiped }))
}
