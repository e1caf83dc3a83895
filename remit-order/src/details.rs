use remit_accounts::render::escape_html;
use remit_accounts::{AccountSelector, PaymentDetailsRenderer, RenderContext, Selection};
use remit_core::{CoreResult, OrderProvider};
use remit_store::SettingsRepository;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Order, OrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsFormat {
    Html,
    PlainText,
}

/// What checkout shows for this payment method
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaymentMethodInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon_html: Option<String>,
}

/// Renders the payment-details block for thank-you pages and customer emails.
pub struct PaymentDetailsService {
    settings: SettingsRepository,
    orders: Arc<dyn OrderProvider>,
    selector: AccountSelector,
    renderer: PaymentDetailsRenderer,
    hold_status: OrderStatus,
    icon_html: Option<String>,
}

impl PaymentDetailsService {
    pub fn new(
        settings: SettingsRepository,
        orders: Arc<dyn OrderProvider>,
        selector: AccountSelector,
        hold_status: OrderStatus,
    ) -> Self {
        Self {
            settings,
            orders,
            selector,
            renderer: PaymentDetailsRenderer::new(),
            hold_status,
            icon_html: None,
        }
    }

    pub fn with_icon_url(mut self, icon_url: Option<&str>) -> Self {
        self.icon_html = icon_url.map(|url| {
            format!(
                "<img src=\"{}\" alt=\"Bank transfer\" title=\"Bank transfer\" style=\"max-width:100px\" />",
                escape_html(url)
            )
        });
        self
    }

    pub fn gateway_id(&self) -> &str {
        self.settings.gateway_id()
    }

    /// Checkout presentation, `None` while the gateway is disabled
    pub async fn method_info(&self) -> CoreResult<Option<PaymentMethodInfo>> {
        let settings = self.settings.load_settings().await?;
        if !settings.enabled {
            return Ok(None);
        }
        Ok(Some(PaymentMethodInfo {
            id: self.gateway_id().to_string(),
            title: settings.title,
            description: settings.description,
            icon_html: self.icon_html.clone(),
        }))
    }

    /// Accounts to show for an order. `None` when there are no accounts configured or
    /// the order cannot be resolved.
    pub async fn selection_for(&self, order_id: Uuid) -> CoreResult<Option<Selection>> {
        let accounts = self.settings.load_accounts().await?;
        if accounts.is_empty() {
            debug!("No accounts configured, nothing to show for order {}", order_id);
            return Ok(None);
        }

        let ctx = match self.orders.resolve(order_id).await? {
            Some(ctx) => ctx,
            None => {
                warn!("Order {} not found, skipping payment details", order_id);
                return Ok(None);
            }
        };

        let continent = self.orders.continent_for(&ctx.billing_country);
        Ok(Some(self.selector.select(&ctx, continent.as_deref(), &accounts)))
    }

    /// The full payment-details block for an order, or `None` when nothing should show
    pub async fn bank_details(&self, order_id: Uuid, format: DetailsFormat) -> CoreResult<Option<String>> {
        let selection = match self.selection_for(order_id).await? {
            Some(selection) => selection,
            None => return Ok(None),
        };

        let settings = self.settings.load_settings().await?;
        let ctx = RenderContext {
            instructions: settings.instructions,
            account_holder: settings.account_holder,
            icon_html: self.icon_html.clone(),
        };

        Ok(match format {
            DetailsFormat::Html => self.renderer.html(&ctx, &selection),
            DetailsFormat::PlainText => self.renderer.plain_text(&ctx, &selection),
        })
    }

    /// Order-received page
    pub async fn thankyou_page(&self, order_id: Uuid) -> CoreResult<Option<String>> {
        self.bank_details(order_id, DetailsFormat::Html).await
    }

    /// Block for an outgoing order email. Only customer emails for orders paid with this
    /// gateway and still waiting for the transfer carry it.
    pub async fn email_instructions(
        &self,
        order: &Order,
        sent_to_admin: bool,
        plain_text: bool,
    ) -> CoreResult<Option<String>> {
        if sent_to_admin
            || order.payment_method != self.gateway_id()
            || !order.has_status(&self.hold_status)
        {
            return Ok(None);
        }

        let format = if plain_text {
            DetailsFormat::PlainText
        } else {
            DetailsFormat::Html
        };
        self.bank_details(order.id, format).await
    }
}
