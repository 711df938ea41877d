//! Math concepts and the affix vocabulary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Affixes
// ============================================================================

/// Structural tag describing how an identifier is decorated or applied when
/// it carries a given concept. Closed vocabulary; the wire form uses the
/// space-separated names (e.g. `"over right arrow"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Affix {
    Subscript,
    Superscript,
    Comma,
    Semicolon,
    Colon,
    Prime,
    Asterisk,
    Circle,
    Hat,
    Tilde,
    Bar,
    Over,
    OverRightArrow,
    OverLeftArrow,
    Dot,
    DoubleDot,
    OpenParenthesis,
    CloseParenthesis,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    VerticalBar,
    LeftsideArgument,
    RightsideArgument,
    LeftsideBase,
}

impl Affix {
    pub const ALL: [Affix; 26] = [
        Affix::Subscript,
        Affix::Superscript,
        Affix::Comma,
        Affix::Semicolon,
        Affix::Colon,
        Affix::Prime,
        Affix::Asterisk,
        Affix::Circle,
        Affix::Hat,
        Affix::Tilde,
        Affix::Bar,
        Affix::Over,
        Affix::OverRightArrow,
        Affix::OverLeftArrow,
        Affix::Dot,
        Affix::DoubleDot,
        Affix::OpenParenthesis,
        Affix::CloseParenthesis,
        Affix::OpenBracket,
        Affix::CloseBracket,
        Affix::OpenBrace,
        Affix::CloseBrace,
        Affix::VerticalBar,
        Affix::LeftsideArgument,
        Affix::RightsideArgument,
        Affix::LeftsideBase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Affix::Subscript => "subscript",
            Affix::Superscript => "superscript",
            Affix::Comma => "comma",
            Affix::Semicolon => "semicolon",
            Affix::Colon => "colon",
            Affix::Prime => "prime",
            Affix::Asterisk => "asterisk",
            Affix::Circle => "circle",
            Affix::Hat => "hat",
            Affix::Tilde => "tilde",
            Affix::Bar => "bar",
            Affix::Over => "over",
            Affix::OverRightArrow => "over right arrow",
            Affix::OverLeftArrow => "over left arrow",
            Affix::Dot => "dot",
            Affix::DoubleDot => "double dot",
            Affix::OpenParenthesis => "open parenthesis",
            Affix::CloseParenthesis => "close parenthesis",
            Affix::OpenBracket => "open bracket",
            Affix::CloseBracket => "close bracket",
            Affix::OpenBrace => "open brace",
            Affix::CloseBrace => "close brace",
            Affix::VerticalBar => "vertical bar",
            Affix::LeftsideArgument => "leftside argument",
            Affix::RightsideArgument => "rightside argument",
            Affix::LeftsideBase => "leftside base",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAffix(pub String);

impl fmt::Display for UnknownAffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown affix: {}", self.0)
    }
}

impl std::error::Error for UnknownAffix {}

impl FromStr for Affix {
    type Err = UnknownAffix;

    fn from_str(s: &str) -> Result<Self, UnknownAffix> {
        Affix::ALL
            .iter()
            .find(|a| a.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownAffix(s.to_string()))
    }
}

impl fmt::Display for Affix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Affix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Affix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Concepts
// ============================================================================

/// One sense of an identifier+variant.
///
/// Concepts for a given key form an ordered list in the dictionary; the
/// list index is the `concept_id` referenced by annotation records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathConcept {
    /// Free text; may embed `$...$` shorthand markup expanded by the
    /// rendering layer. Opaque here.
    pub description: String,
    pub arity: u32,
    pub affixes: Vec<Affix>,
}

impl MathConcept {
    pub fn new(description: impl Into<String>, arity: u32, affixes: Vec<Affix>) -> Self {
        Self {
            description: description.into(),
            arity,
            affixes,
        }
    }
}

/// Displayable form of an identifier; metadata, never a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub text: String,
    /// Unicode character name, recorded for single-character identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode_name: Option<String>,
}

impl Surface {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            unicode_name: None,
        }
    }
}
