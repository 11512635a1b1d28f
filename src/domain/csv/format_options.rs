// ============================================================
// FORMAT OPTIONS
// ============================================================
// Delimiter, quoting, header and encoding settings for CSV output

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::error::{AppError, Result};

pub const DEFAULT_ENCODING: &str = "WINDOWS-1252";
pub const DEFAULT_DELIMITER: Delimiter = Delimiter::SEMICOLON;

/// Single character separating cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DelimiterInput", into = "String")]
pub struct Delimiter(char);

impl Delimiter {
    pub const SEMICOLON: Delimiter = Delimiter(';');
    pub const COMMA: Delimiter = Delimiter(',');
    pub const TAB: Delimiter = Delimiter('\t');
    pub const PIPE: Delimiter = Delimiter('|');

    pub const fn new(c: char) -> Self {
        Delimiter(c)
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<char> for Delimiter {
    fn from(c: char) -> Self {
        Delimiter(c)
    }
}

impl TryFrom<String> for Delimiter {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Delimiter(c)),
            _ => Err(AppError::ValidationError(format!(
                "Delimiter must be exactly one character, got {:?}",
                value
            ))),
        }
    }
}

impl From<Delimiter> for String {
    fn from(delimiter: Delimiter) -> Self {
        delimiter.to_string()
    }
}

/// Environment providers hand digits over as numbers, not strings
#[derive(Deserialize)]
#[serde(untagged)]
enum DelimiterInput {
    Text(String),
    Digit(u64),
}

impl TryFrom<DelimiterInput> for Delimiter {
    type Error = AppError;

    fn try_from(input: DelimiterInput) -> Result<Self> {
        match input {
            DelimiterInput::Text(text) => Delimiter::try_from(text),
            DelimiterInput::Digit(digit) => Delimiter::try_from(digit.to_string()),
        }
    }
}

/// Resolved options for one formatting call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Target character encoding label (default: WINDOWS-1252)
    pub encoding: String,

    /// Cell separator (default: semicolon)
    pub delimiter: Delimiter,

    /// Wrap every cell in double quotes (default: true)
    pub quoted: bool,

    /// Emit a header line when the first row is keyed (default: true)
    pub include_header: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            delimiter: DEFAULT_DELIMITER,
            quoted: true,
            include_header: true,
        }
    }
}

impl FormatOptions {
    /// Merge overrides onto the defaults, key by key
    pub fn resolve(overrides: &FormatOverrides) -> Self {
        overrides.apply_to(Self::default())
    }
}

/// Caller supplied overrides; unset fields keep the base value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<Delimiter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_header: Option<bool>,
}

impl FormatOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dynamic override map, rejecting unknown keys
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| AppError::ValidationError(format!("Invalid CSV options: {}", e)))
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn quoted(mut self, quoted: bool) -> Self {
        self.quoted = Some(quoted);
        self
    }

    pub fn include_header(mut self, include_header: bool) -> Self {
        self.include_header = Some(include_header);
        self
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn merge(&self, other: &FormatOverrides) -> FormatOverrides {
        FormatOverrides {
            encoding: other.encoding.clone().or_else(|| self.encoding.clone()),
            delimiter: other.delimiter.or(self.delimiter),
            quoted: other.quoted.or(self.quoted),
            include_header: other.include_header.or(self.include_header),
        }
    }

    pub fn apply_to(&self, base: FormatOptions) -> FormatOptions {
        FormatOptions {
            encoding: self.encoding.clone().unwrap_or(base.encoding),
            delimiter: self.delimiter.unwrap_or(base.delimiter),
            quoted: self.quoted.unwrap_or(base.quoted),
            include_header: self.include_header.unwrap_or(base.include_header),
        }
    }
}
