use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{post, web, HttpResponse, Responder};

use crate::domain::entities::order::{OrderSubmission, MAX_REFERENCE_IMAGES};
use crate::infrastructure::uploads;
use crate::AppState;

/// Multipart shape of one storefront submission. Field names are the wire
/// contract with the order form; text values pass through into the summary
/// verbatim.
#[derive(Debug, MultipartForm)]
pub struct OrderUpload {
    #[multipart(rename = "name")]
    pub name: Text<String>,

    #[multipart(rename = "discordId")]
    pub discord_id: Text<String>,

    #[multipart(rename = "scale")]
    pub scale: Option<Text<String>>,

    #[multipart(rename = "part")]
    pub part: Option<Text<String>>,

    #[multipart(rename = "price")]
    pub price: Text<String>,

    #[multipart(rename = "paymentMethod")]
    pub payment_method: Text<String>,

    #[multipart(rename = "slip", limit = "10MB")]
    pub slip: TempFile,

    #[multipart(rename = "references", limit = "10MB")]
    pub references: Vec<TempFile>,
}

#[post("/order")]
pub async fn create_order(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<OrderUpload>,
) -> impl Responder {
    tracing::info!("📥 Received order request");

    let mut references: Vec<&TempFile> = form.references.iter().collect();
    if references.len() > MAX_REFERENCE_IMAGES {
        tracing::warn!(
            "dropping {} reference image(s) beyond the cap of {}",
            references.len() - MAX_REFERENCE_IMAGES,
            MAX_REFERENCE_IMAGES
        );
        references.truncate(MAX_REFERENCE_IMAGES);
    }

    // Slip first, then references, so the summary message leads with the
    // payment proof.
    let mut files: Vec<&TempFile> = vec![&form.slip];
    files.extend(references);

    let stored = match uploads::store_all(&state.config.uploads_dir, &files).await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::error!("❌ Failed to store order uploads: {e}");
            return e.to_response(state.config.expose_error_detail);
        }
    };

    let submission = OrderSubmission {
        name: form.name.into_inner(),
        discord_id: form.discord_id.into_inner(),
        scale: form.scale.map(Text::into_inner).unwrap_or_default(),
        part: form
            .part
            .map(Text::into_inner)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "full".to_string()),
        price: form.price.into_inner(),
        payment_method: form.payment_method.into_inner(),
    };

    match state.order_handler.place_order(submission, stored).await {
        Ok(ticket) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "channelId": ticket.channel_id,
            "message": "Ticket created successfully"
        })),
        Err(e) => {
            tracing::error!("❌ Error creating order: {e:?}");
            e.to_response(state.config.expose_error_detail)
        }
    }
}
