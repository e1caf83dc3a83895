use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use remit_accounts::LocaleTable;
use remit_api::{app, AppState};
use remit_order::{BillingAddress, InMemoryOrderStore, Order, OrderStatus, OrderStore};
use remit_shared::models::events::GatewayEvent;
use remit_store::app_config::{Config, GatewayConfig};
use remit_store::MemorySettingsStore;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn gateway() -> GatewayConfig {
    GatewayConfig {
        id: "bank_transfer".to_string(),
        return_url_base: "https://shop.example".to_string(),
        hold_status: "on-hold".to_string(),
        preview_limit: 25,
        icon_url: None,
    }
}

fn setup(locale: LocaleTable) -> (AppState, Arc<InMemoryOrderStore>) {
    let orders = Arc::new(InMemoryOrderStore::new());
    let state = AppState::build(gateway(), Arc::new(MemorySettingsStore::new()), orders.clone(), locale).unwrap();
    (state, orders)
}

async fn place_order(state: &AppState, country: &str, currency: &str, total: i64) -> Uuid {
    let billing = BillingAddress {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        country: country.to_string(),
    };
    state
        .orders
        .insert(Order::new("bank_transfer", total, currency, billing))
        .await
        .unwrap()
}

async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app(state.clone()).oneshot(req).await.unwrap()
}

async fn text(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn configure(state: &AppState) {
    let resp = send(
        state,
        "PUT",
        "/admin/gateway/settings",
        Some(json!({
            "enabled": "yes",
            "title": "Bank transfer",
            "instructions": "Use your order number as reference.",
            "account_holder": "Acme Ltd",
            "wipe_data": "yes"
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(
        state,
        "PUT",
        "/admin/gateway/accounts",
        Some(json!({
            "account_scope": ["US", "EU", ""],
            "account_currency": ["", "EUR", ""],
            "account_number": ["8310788830", "", ""],
            "routing_number": ["026073150", "", ""],
            "iban": ["", "BE68 5390 0754 7034", "GB33BUKB20201555555555"],
            "bic": ["CMFGUS33", "TRWIBEB1XXX", ""],
            "branch": ["", "", ""],
            "remarks": ["", "", "Any currency"]
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_checkout_to_email_flow() {
    let (state, orders) = setup(LocaleTable::builtin());
    let mut events = state.events_tx.subscribe();
    configure(&state).await;

    let resp = send(&state, "GET", "/checkout/payment-method", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let info: Value = serde_json::from_str(&text(resp).await).unwrap();
    assert_eq!(info["title"], "Bank transfer");

    let id = place_order(&state, "us", "usd", 12_500).await;
    let resp = send(&state, "POST", &format!("/orders/{}/pay", id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = serde_json::from_str(&text(resp).await).unwrap();
    assert_eq!(outcome["result"], "success");
    assert_eq!(
        outcome["redirect"],
        format!("https://shop.example/checkout/order-received/{}", id)
    );
    assert_eq!(orders.get_order(id).await.unwrap().unwrap().status, OrderStatus::OnHold);

    let resp = send(&state, "GET", &format!("/orders/{}/received", id), None).await;
    let html = text(resp).await;
    assert!(html.contains("Beneficiary: <strong>Acme Ltd</strong>"));
    assert!(html.contains("Routing number: <strong>026073150</strong>"));
    assert!(html.contains("BIC: <strong>CMFGUS33</strong>"));
    assert!(!html.contains("GB33BUKB20201555555555"));

    let resp = send(&state, "GET", &format!("/orders/{}/email?plain_text=true", id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(text(resp).await.contains("Account number: 8310788830"));

    let saved: Vec<GatewayEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert!(saved.iter().any(|e| matches!(e, GatewayEvent::SettingsSaved(s) if s.accounts == 3)));
    assert!(saved.iter().any(|e| matches!(e, GatewayEvent::OrderOnHold(h) if h.order_id == id)));
}

#[tokio::test]
async fn test_continent_and_global_fallback() {
    let (state, _) = setup(LocaleTable::builtin());
    configure(&state).await;

    // Belgium resolves to the EU account through its continent
    let be = place_order(&state, "BE", "EUR", 100).await;
    let resp = send(&state, "GET", &format!("/orders/{}/payment-details", be), None).await;
    let details: Value = serde_json::from_str(&text(resp).await).unwrap();
    assert_eq!(details["bucket"], "local");
    assert_eq!(details["accounts"].as_array().unwrap().len(), 1);
    assert_eq!(details["accounts"][0]["index"], 1);

    // Japan in yen matches nothing local and falls back to the unscoped account
    let jp = place_order(&state, "JP", "JPY", 100).await;
    let resp = send(&state, "GET", &format!("/orders/{}/payment-details", jp), None).await;
    let details: Value = serde_json::from_str(&text(resp).await).unwrap();
    assert_eq!(details["bucket"], "global");
    assert_eq!(details["accounts"][0]["index"], 2);
}

#[tokio::test]
async fn test_configured_locale_label() {
    let config = Config::from_toml(
        r#"
        [server]
        port = 8080

        [gateway]
        return_url_base = "https://shop.example"

        [locale.US]
        routing_number = "ABA"
        "#,
    )
    .unwrap();
    let (state, _) = setup(LocaleTable::builtin().with_overrides(config.locale));
    configure(&state).await;

    let id = place_order(&state, "US", "USD", 100).await;
    let resp = send(&state, "GET", &format!("/orders/{}/received", id), None).await;
    let html = text(resp).await;
    assert!(html.contains("ABA: <strong>026073150</strong>"));
    assert!(html.contains("BIC: <strong>CMFGUS33</strong>"));
}

#[tokio::test]
async fn test_free_order_and_repeat_payment() {
    let (state, orders) = setup(LocaleTable::builtin());
    configure(&state).await;

    let id = place_order(&state, "US", "USD", 0).await;
    let resp = send(&state, "POST", &format!("/orders/{}/pay", id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(orders.get_order(id).await.unwrap().unwrap().status, OrderStatus::Paid);

    let resp = send(&state, "GET", &format!("/orders/{}/email", id), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&state, "POST", &format!("/orders/{}/pay", id), None).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_preview_and_uninstall() {
    let (state, _) = setup(LocaleTable::builtin());
    configure(&state).await;
    let id = place_order(&state, "US", "USD", 100).await;

    let resp = send(&state, "GET", "/admin/gateway/preview", None).await;
    let entries: Value = serde_json::from_str(&text(resp).await).unwrap();
    assert_eq!(
        entries[0]["label"],
        format!("[{}][USD] Grace Hopper - grace@example.com", id)
    );

    let resp = send(&state, "POST", "/admin/gateway/uninstall", None).await;
    let body: Value = serde_json::from_str(&text(resp).await).unwrap();
    assert_eq!(body["wiped"], true);

    let resp = send(&state, "GET", "/checkout/payment-method", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
