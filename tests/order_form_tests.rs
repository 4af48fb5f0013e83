use skinshop_backend::entities::order::{OrderDraft, PaymentMethod, MAX_REFERENCE_IMAGES};
use skinshop_backend::errors::OrderError;
use skinshop_backend::pricing::{Part, Scale, ServiceTier, CUSTOM_MODEL_PRICE};

fn filled_draft() -> OrderDraft {
    let mut draft = OrderDraft::default();
    draft.customer_name = "Somchai".to_string();
    draft.contact_handle = "123456789012345678".to_string();
    draft.set_service_tier(ServiceTier::Hd);
    assert!(draft.set_scale(Scale::X512));
    draft.part = Some(Part::Body);
    draft
}

#[test]
fn custom_model_tier_clears_scale_and_part() {
    let mut draft = filled_draft();
    draft.set_service_tier(ServiceTier::Figura);

    assert_eq!(draft.scale, None);
    assert_eq!(draft.part, None);
    assert_eq!(draft.price(), Some(CUSTOM_MODEL_PRICE));

    // No scale can be picked while the custom tier is active.
    assert!(!draft.set_scale(Scale::X512));
}

#[test]
fn leaving_custom_model_restores_table_pricing() {
    let mut draft = filled_draft();
    draft.set_service_tier(ServiceTier::Figura);
    draft.set_service_tier(ServiceTier::Hd);

    // Selection starts over; the preview hides until a scale is picked.
    assert_eq!(draft.price(), None);
    assert!(draft.set_scale(Scale::X512));
    assert_eq!(draft.price(), Some(140));
}

#[test]
fn switching_tier_drops_a_scale_it_no_longer_offers() {
    let mut draft = filled_draft();
    draft.set_service_tier(ServiceTier::Standard);
    assert_eq!(draft.scale, None);

    assert!(!draft.set_scale(Scale::X512));
    assert!(draft.set_scale(Scale::X64));
}

#[test]
fn reference_cap_holds_across_mixed_add_paths() {
    let mut draft = filled_draft();

    // Picker batch of three, then a drag-and-drop batch of four.
    for i in 0..3 {
        assert!(draft.add_reference(format!("picker-{i}.png")));
    }
    let dropped: Vec<bool> = (0..4)
        .map(|i| draft.add_reference(format!("drop-{i}.png")))
        .collect();

    assert_eq!(dropped, vec![true, true, false, false]);
    assert_eq!(draft.references().len(), MAX_REFERENCE_IMAGES);

    // Removing one frees a slot again.
    draft.remove_reference("picker-0.png");
    assert!(draft.add_reference("late.png"));
    assert!(!draft.add_reference("too-late.png"));
}

#[test]
fn missing_required_fields_are_reported_individually() {
    let mut draft = OrderDraft::default();
    draft.set_service_tier(ServiceTier::Standard);

    let err = draft.validate_required().expect_err("empty draft must fail");
    let fields = match err {
        OrderError::ValidationError(fields) => fields,
        other => panic!("unexpected error: {other:?}"),
    };

    let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
    assert!(names.contains(&"customer_name"));
    assert!(names.contains(&"contact_handle"));
    assert!(names.contains(&"scale"));
}

#[test]
fn whitespace_only_name_is_invalid() {
    let mut draft = filled_draft();
    draft.customer_name = "   ".to_string();

    let err = draft.validate_required().expect_err("blank name must fail");
    match err {
        OrderError::ValidationError(fields) => {
            assert!(fields.iter().any(|f| f.field == "customer_name"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn custom_model_tier_needs_no_scale() {
    let mut draft = OrderDraft::default();
    draft.customer_name = "Somchai".to_string();
    draft.contact_handle = "friendtag#0001".to_string();
    draft.set_service_tier(ServiceTier::Figura);

    assert!(draft.validate_required().is_ok());
}

#[test]
fn draft_is_sendable_only_with_payment_method_and_proof() {
    let mut draft = filled_draft();
    assert!(!draft.is_sendable());

    draft.payment_method = Some(PaymentMethod::Bank);
    assert!(!draft.is_sendable());

    draft.payment_proof = Some("slip.png".to_string());
    assert!(draft.is_sendable());
}

#[test]
fn payment_method_labels() {
    assert_eq!(PaymentMethod::parse("promptpay"), Some(PaymentMethod::PromptPay));
    assert_eq!(PaymentMethod::parse("cash"), None);
    assert_eq!(PaymentMethod::PromptPay.label(), "PromptPay");
    assert_eq!(PaymentMethod::Bank.label(), "โอนผ่านธนาคาร");
    assert_eq!(PaymentMethod::TrueMoney.label(), "True Money Wallet");
}
