use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Opaque identifier assigned once when a descriptor is created.
///
/// The token never changes for the lifetime of the descriptor; session
/// operations restore it after edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId(String);

impl FieldId {
    /// Generate a fresh 7-hex-char token from a process counter and the
    /// wall clock.
    pub fn generate() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);

        let mut hasher = blake3::Hasher::new();
        hasher.update(&seq.to_le_bytes());
        hasher.update(&nanos.to_le_bytes());
        let hex = hasher.finalize().to_hex();
        Self(hex.as_str()[..7].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of control kinds the compiler understands.
///
/// `Unrecognized` is never authored directly; it only appears when a
/// persisted descriptor carries a token from a newer tool, and it compiles
/// with the text mapping so compilation stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Choice,
    MultilineText,
    Unrecognized,
}

impl FieldKind {
    /// Wire token for the kind.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Choice => "choice",
            Self::MultilineText => "multiline-text",
            // Unrecognized descriptors re-serialize as the kind they compile to.
            Self::Unrecognized => "text",
        }
    }

    /// Parse a wire token, degrading unknown tokens instead of failing.
    pub fn from_token(raw: &str) -> Self {
        match raw {
            "text" => Self::Text,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "choice" => Self::Choice,
            "multiline-text" => Self::MultilineText,
            _ => Self::Unrecognized,
        }
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_token(&raw))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A single authored field descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    pub kind: FieldKind,
    /// Data-schema property key. Unique within the list; duplicates degrade
    /// to last-wins during compilation.
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_variant: Option<String>,
    #[serde(default)]
    pub inline: bool,
    #[serde(default)]
    pub disabled: bool,
    /// Percentage of row width, 0–100. Absent means full width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_fraction: Option<u8>,
}

impl Field {
    /// Create a descriptor with the authoring defaults for `kind`.
    pub fn new(kind: FieldKind) -> Self {
        let id = FieldId::generate();
        let name = format!("{}_{}", kind.token().replace('-', "_"), id);
        let title = match kind {
            FieldKind::Text | FieldKind::Unrecognized => "Text field",
            FieldKind::Number => "Number field",
            FieldKind::Boolean => "Boolean field",
            FieldKind::Choice => "Choice field",
            FieldKind::MultilineText => "Text area",
        };

        Self {
            id,
            kind,
            name,
            title: title.to_string(),
            description: None,
            help_text: None,
            required: false,
            choices: match kind {
                FieldKind::Choice => Some(vec!["Option 1".to_string(), "Option 2".to_string()]),
                _ => None,
            },
            placeholder: match kind {
                FieldKind::Text | FieldKind::MultilineText => Some(String::new()),
                _ => None,
            },
            default_value: match kind {
                FieldKind::Boolean => Some(Value::Bool(false)),
                _ => None,
            },
            minimum: None,
            maximum: None,
            row_count: None,
            widget_variant: None,
            inline: false,
            disabled: false,
            width_fraction: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = Some(choices);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_width(mut self, fraction: u8) -> Self {
        self.width_fraction = Some(fraction);
        self
    }
}
