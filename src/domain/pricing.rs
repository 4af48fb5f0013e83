//! Fixed price table for commission orders.
//!
//! Prices are keyed by (scale, part) and never accepted from user input. The
//! custom 3D model ("figura") tier bypasses the table entirely at a flat rate,
//! and any pair missing from the table falls back to the documented default.

use std::fmt;

/// Flat price for a bespoke Figura model, regardless of part.
pub const CUSTOM_MODEL_PRICE: u32 = 100;

/// Fallback for (scale, part) pairs absent from the table.
pub const DEFAULT_PRICE: u32 = 30;

/// Requested texture resolution bucket, or the custom-model marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    X64,
    X128,
    X256,
    X512,
    X1024,
    X2048,
    Figura,
}

impl Scale {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "64" => Some(Scale::X64),
            "128" => Some(Scale::X128),
            "256" => Some(Scale::X256),
            "512" => Some(Scale::X512),
            "1024" => Some(Scale::X1024),
            "2048" => Some(Scale::X2048),
            "figura" => Some(Scale::Figura),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::X64 => "64",
            Scale::X128 => "128",
            Scale::X256 => "256",
            Scale::X512 => "512",
            Scale::X1024 => "1024",
            Scale::X2048 => "2048",
            Scale::Figura => "figura",
        }
    }

    /// Human label shown in summaries ("64x64", "Figura Model").
    pub fn label(&self) -> &'static str {
        match self {
            Scale::X64 => "64x64",
            Scale::X128 => "128x128",
            Scale::X256 => "256x256",
            Scale::X512 => "512x512",
            Scale::X1024 => "1024x1024",
            Scale::X2048 => "2048x2048",
            Scale::Figura => "Figura Model",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which portion of the skin is commissioned. Defaults to the full skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Part {
    #[default]
    Full,
    Head,
    Body,
}

impl Part {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "full" => Some(Part::Full),
            "head" => Some(Part::Head),
            "body" => Some(Part::Body),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Part::Full => "full",
            Part::Head => "head",
            Part::Body => "body",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Part::Full => "ทั้งตัว",
            Part::Head => "หัว",
            Part::Body => "ตัว",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service tier picked on the order form. Constrains which scales are
/// offered; the Figura tier drops the scale/part selection entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceTier {
    Standard,
    Hd,
    UltraHd,
    Figura,
}

impl ServiceTier {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "standard" => Some(ServiceTier::Standard),
            "hd" => Some(ServiceTier::Hd),
            "ultra-hd" => Some(ServiceTier::UltraHd),
            "figura" => Some(ServiceTier::Figura),
            _ => None,
        }
    }

    /// Whether a scale is selectable under this tier. The Figura tier offers
    /// no scales at all.
    pub fn allows(&self, scale: Scale) -> bool {
        match self {
            ServiceTier::Standard => matches!(scale, Scale::X64 | Scale::X128),
            ServiceTier::Hd => matches!(scale, Scale::X256 | Scale::X512),
            ServiceTier::UltraHd => matches!(scale, Scale::X1024 | Scale::X2048),
            ServiceTier::Figura => false,
        }
    }

    pub fn is_custom_model(&self) -> bool {
        *self == ServiceTier::Figura
    }
}

/// Tabulated price for a (scale, part) pair. Figura is always flat; the
/// 256 bucket has no table row and takes the default.
pub fn price_for(scale: Scale, part: Part) -> u32 {
    if scale == Scale::Figura {
        return CUSTOM_MODEL_PRICE;
    }

    match (scale, part) {
        (Scale::X64, Part::Full) => 30,
        (Scale::X64, Part::Head | Part::Body) => 15,
        (Scale::X128, Part::Full) => 40,
        (Scale::X128, Part::Head | Part::Body) => 20,
        (Scale::X512, Part::Full) => 140,
        (Scale::X512, Part::Head | Part::Body) => 70,
        (Scale::X1024, Part::Full) => 200,
        (Scale::X1024, Part::Head | Part::Body) => 110,
        (Scale::X2048, Part::Full) => 280,
        (Scale::X2048, Part::Head | Part::Body) => 150,
        _ => DEFAULT_PRICE,
    }
}

/// Live price preview for the current form state. `None` means the preview
/// stays hidden (no scale picked yet on a table-driven tier).
pub fn quote(tier: ServiceTier, scale: Option<Scale>, part: Option<Part>) -> Option<u32> {
    if tier.is_custom_model() {
        return Some(CUSTOM_MODEL_PRICE);
    }
    scale.map(|s| price_for(s, part.unwrap_or_default()))
}
