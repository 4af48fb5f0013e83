use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use actix_multipart::MultipartError;
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Failure taxonomy of the order flow. Everything except `ValidationError`
/// and `BadUpload` is fatal for the request and maps to a 500, matching the
/// single status code the storefront client expects.
#[derive(Debug, Display)]
pub enum OrderError {
    #[display("Missing Discord Configuration")]
    MissingConfiguration,

    #[display("Chat platform connection is not ready yet")]
    PlatformNotReady,

    #[display("Resolution failed: {_0}")]
    Resolution(String),

    #[display("Platform operation failed: {_0}")]
    PlatformOperation(String),

    #[display("Validation failed")]
    ValidationError(Vec<FieldError>),

    #[display("Rejected upload: {_0}")]
    BadUpload(String),

    #[display("Upload storage failed: {_0}")]
    UploadStorage(String),
}

impl OrderError {
    /// Stable machine-readable discriminator carried in failure responses.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::MissingConfiguration => "missing_configuration",
            OrderError::PlatformNotReady => "platform_not_ready",
            OrderError::Resolution(_) => "resolution_failed",
            OrderError::PlatformOperation(_) => "platform_operation_failed",
            OrderError::ValidationError(_) => "validation_failed",
            OrderError::BadUpload(_) => "bad_upload",
            OrderError::UploadStorage(_) => "upload_storage_failed",
        }
    }

    /// Failure body in the storefront contract: `success:false` plus a safe
    /// message and the kind. The error source chain is attached only when the
    /// deployment opts in; it is always logged server-side regardless.
    pub fn to_response(&self, expose_detail: bool) -> HttpResponse {
        let mut body = match self {
            OrderError::ValidationError(errors) => serde_json::json!({
                "success": false,
                "error": "Validation failed",
                "kind": self.kind(),
                "fields": errors,
            }),
            _ => serde_json::json!({
                "success": false,
                "error": self.to_string(),
                "kind": self.kind(),
            }),
        };

        if expose_detail {
            body["detail"] = serde_json::Value::String(format!("{self:?}"));
        }

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }
}

impl ResponseError for OrderError {
    fn error_response(&self) -> HttpResponse {
        self.to_response(false)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            OrderError::ValidationError(_) | OrderError::BadUpload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn field_errors_from(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(|e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            })
        })
        .collect()
}

impl From<ValidationErrors> for OrderError {
    fn from(errors: ValidationErrors) -> Self {
        OrderError::ValidationError(field_errors_from(&errors))
    }
}

impl From<std::io::Error> for OrderError {
    fn from(err: std::io::Error) -> Self {
        OrderError::UploadStorage(err.to_string())
    }
}

impl From<MultipartError> for OrderError {
    fn from(err: MultipartError) -> Self {
        match err {
            MultipartError::ContentTypeIncompatible => {
                OrderError::BadUpload("Content type incompatible".to_string())
            }
            MultipartError::Payload(_) => OrderError::BadUpload("File too large".to_string()),
            _ => OrderError::BadUpload(err.to_string()),
        }
    }
}
