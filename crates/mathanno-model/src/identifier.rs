//! Identifier keys.
//!
//! A math identifier is keyed by the lowercase hexadecimal encoding of the
//! UTF-8 bytes of its rendered text plus a style variant. The hex string,
//! not the glyph, is the map key everywhere in the data model; decoding it
//! back to text is a display-boundary concern only.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt::{self, Write as _};
use std::str::FromStr;

// ============================================================================
// Identifier hex
// ============================================================================

/// Opaque byte-string identity of an identifier's rendered text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentifierHex(String);

impl IdentifierHex {
    /// Encode rendered text into its hex identity.
    pub fn from_text(text: &str) -> Self {
        let mut hex = String::with_capacity(text.len() * 2);
        for byte in text.as_bytes() {
            let _ = write!(hex, "{byte:02x}");
        }
        IdentifierHex(hex)
    }

    /// Wrap an already-encoded hex string (e.g. a dictionary key).
    pub fn from_hex(hex: impl Into<String>) -> Self {
        IdentifierHex(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to the rendered text. `None` when the hex string is not
    /// well-formed UTF-8; only reachable with hand-edited data files.
    pub fn decode_text(&self) -> Option<String> {
        if self.0.len() % 2 != 0 {
            return None;
        }
        let mut bytes = Vec::with_capacity(self.0.len() / 2);
        for i in (0..self.0.len()).step_by(2) {
            bytes.push(u8::from_str_radix(&self.0[i..i + 2], 16).ok()?);
        }
        String::from_utf8(bytes).ok()
    }
}

impl fmt::Display for IdentifierHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Style variant
// ============================================================================

/// Style variant of an identifier, derived from the `mathvariant` markup
/// attribute. Unrecognized attribute values pass through unchanged so that
/// round-tripping a data file never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdfVariant {
    Default,
    Roman,
    Bold,
    Italic,
    BoldItalic,
    DoubleStruck,
    Script,
    Fraktur,
    SansSerif,
    Monospace,
    Other(String),
}

impl IdfVariant {
    /// Derive the variant from a `mathvariant` attribute value: absence
    /// maps to `Default` and the literal `normal` is normalized to `Roman`.
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr {
            None => IdfVariant::Default,
            Some("normal") => IdfVariant::Roman,
            Some(other) => Self::from_name(other),
        }
    }

    fn from_name(s: &str) -> Self {
        match s {
            "default" => IdfVariant::Default,
            "roman" => IdfVariant::Roman,
            "bold" => IdfVariant::Bold,
            "italic" => IdfVariant::Italic,
            "bold-italic" => IdfVariant::BoldItalic,
            "double-struck" => IdfVariant::DoubleStruck,
            "script" => IdfVariant::Script,
            "fraktur" => IdfVariant::Fraktur,
            "sans-serif" => IdfVariant::SansSerif,
            "monospace" => IdfVariant::Monospace,
            other => IdfVariant::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IdfVariant::Default => "default",
            IdfVariant::Roman => "roman",
            IdfVariant::Bold => "bold",
            IdfVariant::Italic => "italic",
            IdfVariant::BoldItalic => "bold-italic",
            IdfVariant::DoubleStruck => "double-struck",
            IdfVariant::Script => "script",
            IdfVariant::Fraktur => "fraktur",
            IdfVariant::SansSerif => "sans-serif",
            IdfVariant::Monospace => "monospace",
            IdfVariant::Other(s) => s,
        }
    }
}

impl FromStr for IdfVariant {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Infallible> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for IdfVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IdfVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IdfVariant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(IdfVariant::from_name(&s))
    }
}

// ============================================================================
// Identifier key
// ============================================================================

/// The full identity of a math identifier: hex encoding of its rendered
/// text plus its style variant. Two keys are equal iff both fields match
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdentifierKey {
    pub hex: IdentifierHex,
    pub variant: IdfVariant,
}

impl IdentifierKey {
    pub fn new(hex: IdentifierHex, variant: IdfVariant) -> Self {
        Self { hex, variant }
    }

    pub fn from_text(text: &str, variant: IdfVariant) -> Self {
        Self {
            hex: IdentifierHex::from_text(text),
            variant,
        }
    }
}

impl fmt::Display for IdentifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hex, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_encodes_utf8_bytes_lowercase() {
        assert_eq!(IdentifierHex::from_text("x").as_str(), "78");
        // α is 0xCE 0xB1 in UTF-8
        assert_eq!(IdentifierHex::from_text("α").as_str(), "ceb1");
    }

    #[test]
    fn hex_decodes_back_to_text() {
        assert_eq!(
            IdentifierHex::from_hex("ceb1").decode_text().as_deref(),
            Some("α")
        );
        assert_eq!(IdentifierHex::from_hex("zz").decode_text(), None);
        assert_eq!(IdentifierHex::from_hex("abc").decode_text(), None);
    }

    #[test]
    fn variant_attr_normalization() {
        assert_eq!(IdfVariant::from_attr(None), IdfVariant::Default);
        assert_eq!(IdfVariant::from_attr(Some("normal")), IdfVariant::Roman);
        assert_eq!(IdfVariant::from_attr(Some("bold")), IdfVariant::Bold);
        assert_eq!(
            IdfVariant::from_attr(Some("initial")),
            IdfVariant::Other("initial".to_string())
        );
    }

    #[test]
    fn variant_wire_name_round_trip() {
        for name in ["default", "roman", "bold-italic", "double-struck", "weird"] {
            let variant: IdfVariant = name.parse().unwrap();
            assert_eq!(variant.as_str(), name);
        }
    }

    #[test]
    fn keys_equal_iff_both_fields_match() {
        let a = IdentifierKey::from_text("x", IdfVariant::Default);
        let b = IdentifierKey::from_text("x", IdfVariant::Default);
        let c = IdentifierKey::from_text("x", IdfVariant::Roman);
        let d = IdentifierKey::from_text("y", IdfVariant::Default);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
