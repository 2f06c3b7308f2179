use crate::tools::core::{ToolError, ToolInput};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub const REQUIRED_FIELDS: &[&str] = &["to", "subject", "body"];

/// Message fields as they arrive. Values stay untyped until presence has
/// been checked.
#[derive(Debug, Default, Deserialize)]
#[serde(expecting = "an object of email fields")]
pub struct RawMessageFields {
    #[serde(default)]
    pub to: Option<Value>,
    #[serde(default)]
    pub subject: Option<Value>,
    #[serde(default)]
    pub body: Option<Value>,
}

/// Recipient, subject and body, all present and non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFields {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl TryFrom<RawMessageFields> for MessageFields {
    type Error = ToolError;

    fn try_from(raw: RawMessageFields) -> Result<Self, Self::Error> {
        match (given(raw.to), given(raw.subject), given(raw.body)) {
            (Some(to), Some(subject), Some(body)) => Ok(Self {
                to: read_field("to", to)?,
                subject: read_field("subject", subject)?,
                body: read_field("body", body)?,
            }),
            _ => Err(ToolError::MissingRequiredFields(REQUIRED_FIELDS)),
        }
    }
}

impl ToolInput for MessageFields {
    type Raw = RawMessageFields;

    fn validate(raw: Self::Raw) -> Result<Self, ToolError> {
        Self::try_from(raw)
    }
}

/// Drops values that count as not given: `null`, `false`, `0` and `""`
pub fn given(value: Option<Value>) -> Option<Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Read a present value as its declared type
pub fn read_field<T: DeserializeOwned>(field: &'static str, value: Value) -> Result<T, ToolError> {
    serde_json::from_value(value).map_err(|source| ToolError::InvalidField { field, source })
}
