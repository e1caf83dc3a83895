use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use remit_order::PaymentOutcome;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct EmailQuery {
    #[serde(default)]
    pub plain_text: bool,
    #[serde(default)]
    pub sent_to_admin: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders/{id}/pay", post(pay_order))
        .route("/orders/{id}/received", get(thankyou_page))
        .route("/orders/{id}/payment-details", get(payment_details))
        .route("/orders/{id}/email", get(email_instructions))
}

/// POST /orders/{id}/pay
/// Checkout submitted with bank transfer as the payment method
pub async fn pay_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<PaymentOutcome>, AppError> {
    let outcome = state.orchestrator.process_payment(order_id).await?;
    Ok(Json(outcome))
}

/// GET /orders/{id}/received
/// Payment-details block for the thank-you page; 204 when there is nothing to show
pub async fn thankyou_page(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Response, AppError> {
    Ok(match state.details.thankyou_page(order_id).await? {
        Some(html) => Html(html).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /orders/{id}/payment-details
/// The selected accounts as data, for storefronts that render their own markup
pub async fn payment_details(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Response, AppError> {
    Ok(match state.details.selection_for(order_id).await? {
        Some(selection) => Json(selection).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /orders/{id}/email?plain_text=&sent_to_admin=
/// Block the mailer inserts before the order table
pub async fn email_instructions(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Query(query): Query<EmailQuery>,
) -> Result<Response, AppError> {
    let order = match state.orders.get_order(order_id).await? {
        Some(order) => order,
        None => return Ok(StatusCode::NO_CONTENT.into_response()),
    };

    let block = state
        .details
        .email_instructions(&order, query.sent_to_admin, query.plain_text)
        .await?;

    Ok(match block {
        Some(text) if query.plain_text => {
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
        }
        Some(html) => Html(html).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
