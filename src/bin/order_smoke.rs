//! Sends one mock order to a running intake service, the same way the
//! storefront form does: fill a draft, compute the price locally, package
//! everything as multipart and post it.
//!
//! Usage: `order_smoke [api-url]` (defaults to the local dev server).

use anyhow::{bail, Context, Result};
use reqwest::multipart::{Form, Part};

use skinshop_backend::entities::order::{OrderDraft, PaymentMethod};
use skinshop_backend::pricing::{Part as SkinPart, Scale, ServiceTier};

#[tokio::main]
async fn main() -> Result<()> {
    let api_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:3000/api/order".to_string());

    let mut draft = OrderDraft::default();
    draft.customer_name = "Test User".to_string();
    draft.contact_handle = "test#1234".to_string();
    draft.set_service_tier(ServiceTier::Standard);
    if !draft.set_scale(Scale::X64) {
        bail!("scale 64 rejected for the standard tier");
    }
    draft.part = Some(SkinPart::Full);
    draft.payment_method = Some(PaymentMethod::Bank);
    draft.payment_proof = Some("test_slip.txt".to_string());

    draft
        .validate_required()
        .map_err(|e| anyhow::anyhow!("draft failed validation: {e}"))?;
    if !draft.is_sendable() {
        bail!("draft is not sendable (payment method or proof missing)");
    }

    let price = draft.price().context("no price preview for the draft")?;
    let scale_label = draft.scale.map(|s| s.label()).unwrap_or("Figura Model");
    let part_label = draft.part.map(|p| p.label()).unwrap_or("-");
    let method_label = draft
        .payment_method
        .map(|m| m.label())
        .context("payment method missing")?;

    let slip = Part::bytes(b"dummy slip content".to_vec())
        .file_name("test_slip.txt")
        .mime_str("text/plain")?;

    let form = Form::new()
        .text("name", draft.customer_name.clone())
        .text("discordId", draft.contact_handle.clone())
        .text("scale", scale_label)
        .text("part", part_label)
        .text("price", price.to_string())
        .text("paymentMethod", method_label)
        .part("slip", slip);

    println!("🚀 Sending test order to {api_url} ...");

    let response = reqwest::Client::new()
        .post(&api_url)
        .multipart(form)
        .send()
        .await
        .context("request failed")?;

    let status = response.status();
    let body = response.text().await.context("reading response body")?;
    println!("Status: {status}");
    println!("Response: {body}");

    let json: serde_json::Value = serde_json::from_str(&body).context("invalid JSON response")?;
    if json["success"].as_bool() == Some(true) {
        println!("✅ SUCCESS: Order created!");
        Ok(())
    } else {
        bail!("server returned an error");
    }
}
