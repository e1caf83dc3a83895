use std::fmt::Write;

use crate::selector::{AccountDetails, Selection};

const HEADING: &str = "Payment details";

/// Shop-level text that surrounds the account list
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub instructions: String,
    pub account_holder: String,
    /// Pre-built `<img>` tag, trusted as-is
    pub icon_html: Option<String>,
}

/// Turns a selection into the payment-details block for web pages and emails.
#[derive(Debug, Clone, Default)]
pub struct PaymentDetailsRenderer;

impl PaymentDetailsRenderer {
    pub fn new() -> Self {
        Self
    }

    /// HTML block, or `None` when the selection has nothing to show
    pub fn html(&self, ctx: &RenderContext, selection: &Selection) -> Option<String> {
        let accounts = match selection {
            Selection::Details { accounts, .. } => accounts,
            Selection::NoDetails => return None,
        };

        let mut out = String::from("<section class=\"remit-bank-details\">\n");
        if let Some(icon) = &ctx.icon_html {
            out.push_str(icon);
            out.push('\n');
        }
        let _ = writeln!(out, "<h2 class=\"remit-bank-details-heading\">{}</h2>", HEADING);

        if !ctx.instructions.trim().is_empty() {
            out.push_str(&autop(&ctx.instructions));
        }
        if !ctx.account_holder.trim().is_empty() {
            let _ = writeln!(
                out,
                "<p class=\"remit-beneficiary\">Beneficiary: <strong>{}</strong></p>",
                escape_html(ctx.account_holder.trim())
            );
        }
        for account in accounts {
            out.push_str(&account_html(account));
        }
        out.push_str("</section>\n");
        Some(out)
    }

    /// Plain-text block for text emails, or `None` when the selection has nothing to show
    pub fn plain_text(&self, ctx: &RenderContext, selection: &Selection) -> Option<String> {
        let accounts = match selection {
            Selection::Details { accounts, .. } => accounts,
            Selection::NoDetails => return None,
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}\n", HEADING.to_uppercase());
        if !ctx.instructions.trim().is_empty() {
            let _ = writeln!(out, "{}\n", ctx.instructions.trim());
        }
        if !ctx.account_holder.trim().is_empty() {
            let _ = writeln!(out, "Beneficiary: {}\n", ctx.account_holder.trim());
        }
        for account in accounts {
            for field in &account.fields {
                let _ = writeln!(out, "{}: {}", field.label, field.value.trim());
            }
            out.push('\n');
        }
        Some(out)
    }
}

fn account_html(account: &AccountDetails) -> String {
    let mut out = String::from("<ul class=\"remit-bank-details order_details\">\n");
    for field in &account.fields {
        let _ = writeln!(
            out,
            "<li class=\"{}\">{}: <strong>{}</strong></li>",
            field.key.as_str(),
            escape_html(&field.label),
            escape_html(field.value.trim()).replace('\n', "<br />\n")
        );
    }
    out.push_str("</ul>\n");
    out
}

/// Blank lines split paragraphs, single newlines become line breaks.
fn autop(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let mut out = String::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in normalized.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !paragraph.is_empty() {
                let body: Vec<String> = paragraph.iter().map(|l| escape_html(l.trim())).collect();
                let _ = writeln!(out, "<p>{}</p>", body.join("<br />\n"));
                paragraph.clear();
            }
        } else {
            paragraph.push(line);
        }
    }
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
