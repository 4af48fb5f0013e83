use skinshop_backend::pricing::{
    price_for, quote, Part, Scale, ServiceTier, CUSTOM_MODEL_PRICE, DEFAULT_PRICE,
};

#[test]
fn table_prices_are_exact() {
    let expected = [
        (Scale::X64, 30, 15),
        (Scale::X128, 40, 20),
        (Scale::X512, 140, 70),
        (Scale::X1024, 200, 110),
        (Scale::X2048, 280, 150),
    ];

    for (scale, full, partial) in expected {
        assert_eq!(price_for(scale, Part::Full), full, "{scale} full");
        assert_eq!(price_for(scale, Part::Head), partial, "{scale} head");
        assert_eq!(price_for(scale, Part::Body), partial, "{scale} body");
    }
}

#[test]
fn unmapped_pair_falls_back_to_default() {
    // 256 has no table row.
    assert_eq!(price_for(Scale::X256, Part::Full), DEFAULT_PRICE);
    assert_eq!(price_for(Scale::X256, Part::Head), DEFAULT_PRICE);
    assert_eq!(price_for(Scale::X256, Part::Body), DEFAULT_PRICE);
}

#[test]
fn figura_is_flat_regardless_of_part() {
    for part in [Part::Full, Part::Head, Part::Body] {
        assert_eq!(price_for(Scale::Figura, part), CUSTOM_MODEL_PRICE);
    }
}

#[test]
fn quote_forces_flat_price_for_custom_model_tier() {
    // Even with stale scale/part state the flat price wins.
    assert_eq!(
        quote(ServiceTier::Figura, Some(Scale::X2048), Some(Part::Head)),
        Some(CUSTOM_MODEL_PRICE)
    );
    assert_eq!(quote(ServiceTier::Figura, None, None), Some(CUSTOM_MODEL_PRICE));
}

#[test]
fn quote_hides_preview_until_scale_is_picked() {
    assert_eq!(quote(ServiceTier::Standard, None, None), None);
    assert_eq!(
        quote(ServiceTier::Standard, Some(Scale::X64), None),
        Some(30)
    );
    assert_eq!(
        quote(ServiceTier::Hd, Some(Scale::X512), Some(Part::Body)),
        Some(70)
    );
}

#[test]
fn tiers_gate_their_scales() {
    assert!(ServiceTier::Standard.allows(Scale::X64));
    assert!(ServiceTier::Standard.allows(Scale::X128));
    assert!(!ServiceTier::Standard.allows(Scale::X512));

    assert!(ServiceTier::Hd.allows(Scale::X256));
    assert!(ServiceTier::Hd.allows(Scale::X512));
    assert!(!ServiceTier::Hd.allows(Scale::X64));

    assert!(ServiceTier::UltraHd.allows(Scale::X1024));
    assert!(ServiceTier::UltraHd.allows(Scale::X2048));
    assert!(!ServiceTier::UltraHd.allows(Scale::X256));

    for scale in [
        Scale::X64,
        Scale::X128,
        Scale::X256,
        Scale::X512,
        Scale::X1024,
        Scale::X2048,
        Scale::Figura,
    ] {
        assert!(!ServiceTier::Figura.allows(scale));
    }
}

#[test]
fn parsing_round_trips_raw_values() {
    for raw in ["64", "128", "256", "512", "1024", "2048", "figura"] {
        let scale = Scale::parse(raw).expect("known scale");
        assert_eq!(scale.as_str(), raw);
    }
    assert_eq!(Scale::parse(" 512 "), Some(Scale::X512));
    assert_eq!(Scale::parse("4096"), None);

    assert_eq!(Part::parse("head"), Some(Part::Head));
    assert_eq!(Part::parse("torso"), None);
    assert_eq!(Part::default(), Part::Full);
}

#[test]
fn labels_match_the_storefront() {
    assert_eq!(Scale::X64.label(), "64x64");
    assert_eq!(Scale::Figura.label(), "Figura Model");
    assert_eq!(Part::Full.label(), "ทั้งตัว");
    assert_eq!(Part::Head.label(), "หัว");
    assert_eq!(Part::Body.label(), "ตัว");
}
