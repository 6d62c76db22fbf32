//! Tool trait, parameter descriptors, and the invocation result envelope.
//!
//! Every operation the gateway exposes implements [`Tool`]: a stable name, a
//! short caller-facing description, and a static parameter table the
//! dispatcher validates arguments against before the handler runs. The
//! parameter table is declared once per tool as a `const` slice; the
//! JSON-schema-shaped catalog entry served to remote callers is derived from
//! it, never hand-written.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Semantic type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Integer,
    Float,
    Text,
    List,
    Map,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Integer => "integer",
            ParamKind::Float => "number",
            ParamKind::Text => "string",
            ParamKind::List => "array",
            ParamKind::Map => "object",
        }
    }
}

/// Default value a parameter falls back to when the caller omits it.
///
/// Kept const-constructible so parameter tables can live in statics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    Int(i64),
    Float(f64),
    Text(&'static str),
}

impl ParamDefault {
    pub fn to_value(self) -> serde_json::Value {
        match self {
            ParamDefault::Int(n) => json!(n),
            ParamDefault::Float(f) => json!(f),
            ParamDefault::Text(s) => json!(s),
        }
    }
}

/// One named parameter in a tool's argument contract.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    /// Rejected as missing when true and no default is declared.
    pub required: bool,
    pub default: Option<ParamDefault>,
    /// Inclusive numeric bound, checked for `Integer` and `Float` kinds.
    pub bound: Option<(f64, f64)>,
    pub doc: &'static str,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind, doc: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            bound: None,
            doc,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind, doc: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            bound: None,
            doc,
        }
    }

    pub const fn with_default(mut self, default: ParamDefault) -> Self {
        self.default = Some(default);
        self.required = false;
        self
    }

    pub const fn with_bound(mut self, min: f64, max: f64) -> Self {
        self.bound = Some((min, max));
        self
    }
}

/// Serialized catalog entry for one tool, consumed by remote callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// Whether invoking this tool may suspend (awaits the device or a timer).
    pub may_suspend: bool,
    pub parameters: serde_json::Value,
}

/// Success payload of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ToolPayload {
    Integer(i64),
    Text(String),
    Lines(Vec<String>),
    Map(serde_json::Map<String, serde_json::Value>),
    Image { media_type: String, base64: String },
}

/// Result envelope every invocation resolves to.
///
/// Handlers return `Failure` for expected faults (session state, transport);
/// the dispatcher converts unexpected handler errors into `Failure` as well,
/// so callers always receive one of these two shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResult {
    Success { payload: ToolPayload },
    Failure { message: String },
}

impl ToolResult {
    pub fn text(message: impl Into<String>) -> Self {
        ToolResult::Success {
            payload: ToolPayload::Text(message.into()),
        }
    }

    pub fn integer(value: i64) -> Self {
        ToolResult::Success {
            payload: ToolPayload::Integer(value),
        }
    }

    pub fn lines(lines: Vec<String>) -> Self {
        ToolResult::Success {
            payload: ToolPayload::Lines(lines),
        }
    }

    pub fn map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        ToolResult::Success {
            payload: ToolPayload::Map(map),
        }
    }

    pub fn image(media_type: impl Into<String>, base64: impl Into<String>) -> Self {
        ToolResult::Success {
            payload: ToolPayload::Image {
                media_type: media_type.into(),
                base64: base64.into(),
            },
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ToolResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success { .. })
    }

    /// Failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ToolResult::Failure { message } => Some(message),
            ToolResult::Success { .. } => None,
        }
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// The argument contract the dispatcher validates against.
    fn parameters(&self) -> &'static [ParamSpec];

    /// Whether `execute` may suspend mid-invocation.
    fn may_suspend(&self) -> bool {
        false
    }

    /// Runs the tool. `args` has already been validated and defaulted by the
    /// dispatcher. Expected faults come back as `ToolResult::Failure`; an
    /// `Err` here is an unexpected fault the dispatcher converts at its
    /// boundary.
    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult>;

    /// Catalog entry derived from the parameter table.
    fn spec(&self) -> ToolSpec {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for param in self.parameters() {
            let mut prop = serde_json::Map::new();
            prop.insert("type".into(), json!(param.kind.as_str()));
            prop.insert("description".into(), json!(param.doc));
            if let Some((min, max)) = param.bound {
                prop.insert("minimum".into(), json!(min));
                prop.insert("maximum".into(), json!(max));
            }
            if let Some(default) = param.default {
                prop.insert("default".into(), default.to_value());
            }
            properties.insert(param.name.to_string(), serde_json::Value::Object(prop));
            if param.required {
                required.push(param.name);
            }
        }
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            may_suspend: self.may_suspend(),
            parameters: json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        }
    }
}
