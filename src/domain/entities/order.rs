use serde::Serialize;
use validator::Validate;

use crate::domain::pricing::{self, Part, Scale, ServiceTier};
use crate::errors::{FieldError, OrderError};

/// Hard cap on reference images; extras are dropped on every intake path.
pub const MAX_REFERENCE_IMAGES: usize = 5;

/// How the customer pays. The label is what ends up in the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    PromptPay,
    Bank,
    TrueMoney,
}

impl PaymentMethod {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "promptpay" => Some(PaymentMethod::PromptPay),
            "bank" => Some(PaymentMethod::Bank),
            "truemoney" => Some(PaymentMethod::TrueMoney),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::PromptPay => "promptpay",
            PaymentMethod::Bank => "bank",
            PaymentMethod::TrueMoney => "truemoney",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::PromptPay => "PromptPay",
            PaymentMethod::Bank => "โอนผ่านธนาคาร",
            PaymentMethod::TrueMoney => "True Money Wallet",
        }
    }
}

/// Client-side form state for one order, alive only between the first
/// keystroke and a successful submission.
///
/// Pricing is always derived through [`pricing::quote`]; the draft never
/// stores a user-supplied amount.
#[derive(Debug, Default, Validate)]
pub struct OrderDraft {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,

    #[validate(length(min = 1, message = "Discord ID or tag is required"))]
    pub contact_handle: String,

    pub service_tier: Option<ServiceTier>,
    pub scale: Option<Scale>,
    pub part: Option<Part>,

    pub payment_method: Option<PaymentMethod>,
    pub payment_proof: Option<String>,
    references: Vec<String>,
}

impl OrderDraft {
    /// Applies the tier edge-case policy: picking the custom-model tier
    /// clears and disables the scale/part selection; any other tier restores
    /// table-driven pricing (dropping a scale the tier no longer offers).
    pub fn set_service_tier(&mut self, tier: ServiceTier) {
        self.service_tier = Some(tier);
        if tier.is_custom_model() {
            self.scale = None;
            self.part = None;
        } else if let Some(scale) = self.scale {
            if !tier.allows(scale) {
                self.scale = None;
            }
        }
    }

    pub fn set_scale(&mut self, scale: Scale) -> bool {
        match self.service_tier {
            Some(tier) if tier.allows(scale) => {
                self.scale = Some(scale);
                true
            }
            _ => false,
        }
    }

    /// Adds a reference image, silently ignoring anything past the cap.
    /// Returns whether the image was kept.
    pub fn add_reference(&mut self, file_name: impl Into<String>) -> bool {
        if self.references.len() >= MAX_REFERENCE_IMAGES {
            return false;
        }
        self.references.push(file_name.into());
        true
    }

    pub fn remove_reference(&mut self, file_name: &str) {
        self.references.retain(|r| r != file_name);
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Live price preview; `None` while no price can be shown yet.
    pub fn price(&self) -> Option<u32> {
        let tier = self.service_tier?;
        pricing::quote(tier, self.scale, self.part)
    }

    /// Per-field required check, reported individually so the form can
    /// highlight each offender.
    pub fn validate_required(&self) -> Result<(), OrderError> {
        let mut fields: Vec<FieldError> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => crate::errors::field_errors_from(&errors),
        };

        if self.customer_name.trim().is_empty() && !self.customer_name.is_empty() {
            fields.push(FieldError {
                field: "customer_name".to_string(),
                message: "Customer name is required".to_string(),
            });
        }
        if self.contact_handle.trim().is_empty() && !self.contact_handle.is_empty() {
            fields.push(FieldError {
                field: "contact_handle".to_string(),
                message: "Discord ID or tag is required".to_string(),
            });
        }

        match self.service_tier {
            None => fields.push(FieldError {
                field: "service_tier".to_string(),
                message: "Service type is required".to_string(),
            }),
            Some(tier) if !tier.is_custom_model() && self.scale.is_none() => {
                fields.push(FieldError {
                    field: "scale".to_string(),
                    message: "Scale is required".to_string(),
                });
            }
            Some(_) => {}
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(OrderError::ValidationError(fields))
        }
    }

    /// A draft is sendable once it validates and both payment method and
    /// payment proof are set. Nothing leaves the client before this holds.
    pub fn is_sendable(&self) -> bool {
        self.validate_required().is_ok()
            && self.payment_method.is_some()
            && self.payment_proof.is_some()
    }
}

/// Text fields of one intake request, passed through verbatim into the order
/// summary. The server deliberately does not re-validate what the client
/// already enforced.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    pub name: String,
    pub discord_id: String,
    pub scale: String,
    pub part: String,
    pub price: String,
    pub payment_method: String,
}

/// Result of a fully processed order: the ticket channel that now exists on
/// the chat platform.
#[derive(Debug, Clone, Serialize)]
pub struct OrderTicket {
    #[serde(rename = "channelId")]
    pub channel_id: String,
}
