use axum::{extract::State, routing::get, Json, Router};

use remit_order::PaymentMethodInfo;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/checkout/payment-method", get(payment_method))
}

/// GET /checkout/payment-method
/// Title, description and icon for the checkout page; 404 while disabled
pub async fn payment_method(State(state): State<AppState>) -> Result<Json<PaymentMethodInfo>, AppError> {
    state
        .details
        .method_info()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError("Payment method disabled".to_string()))
}
