//! Tool registry and invocation dispatcher.
//!
//! The registry owns the process-wide catalog of tools. `invoke` is the one
//! boundary every remote call crosses: name lookup, table-driven argument
//! validation (before any side effect), handler execution, and conversion of
//! handler faults into failure envelopes. A handler fault never takes the
//! process down.

use std::collections::BTreeMap;

use thiserror::Error;

use super::traits::{ParamKind, ParamSpec, Tool, ToolResult, ToolSpec};

/// Errors raised by the dispatcher itself, before any handler runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unknown tool `{name}`")]
    UnknownTool { name: String },
    #[error("a tool named `{name}` is already registered")]
    DuplicateName { name: String },
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument { param: String, reason: String },
}

/// Process-wide catalog of named operations.
///
/// Populated once at startup; immutable afterwards. Iteration order (and the
/// catalog served to callers) is name order.
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), DispatchError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(DispatchError::DuplicateName { name });
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Catalog surface for remote discovery, in name order.
    pub fn catalog(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|tool| tool.spec()).collect()
    }

    /// Dispatches one invocation. Always resolves to an envelope: dispatcher
    /// rejections and handler faults alike come back as `Failure`.
    pub async fn invoke(&self, name: &str, args: serde_json::Value) -> ToolResult {
        let Some(tool) = self.tools.get(name) else {
            return ToolResult::failure(
                DispatchError::UnknownTool {
                    name: name.to_string(),
                }
                .to_string(),
            );
        };

        let args = match validate_args(tool.parameters(), args) {
            Ok(args) => args,
            Err(e) => return ToolResult::failure(e.to_string()),
        };

        match tool.execute(serde_json::Value::Object(args)).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool handler fault");
                ToolResult::failure(format!("{name} failed: {e}"))
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks supplied arguments against the declared table and fills defaults.
///
/// Rejections name the offending parameter and happen before the handler is
/// reached, so a validation failure can never leave a partial side effect.
pub fn validate_args(
    params: &'static [ParamSpec],
    args: serde_json::Value,
) -> Result<serde_json::Map<String, serde_json::Value>, DispatchError> {
    let supplied = match args {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => serde_json::Map::new(),
        other => {
            return Err(DispatchError::InvalidArgument {
                param: "arguments".into(),
                reason: format!("expected an object of named arguments, got {}", kind_of(&other)),
            })
        }
    };

    for key in supplied.keys() {
        if !params.iter().any(|p| p.name == key) {
            return Err(DispatchError::InvalidArgument {
                param: key.clone(),
                reason: "unknown parameter".into(),
            });
        }
    }

    let mut validated = serde_json::Map::new();
    for param in params {
        match supplied.get(param.name) {
            Some(value) => {
                check_kind(param, value)?;
                check_bound(param, value)?;
                validated.insert(param.name.to_string(), value.clone());
            }
            None => {
                if let Some(default) = param.default {
                    validated.insert(param.name.to_string(), default.to_value());
                } else if param.required {
                    return Err(DispatchError::InvalidArgument {
                        param: param.name.to_string(),
                        reason: "required parameter is missing".into(),
                    });
                }
            }
        }
    }
    Ok(validated)
}

fn check_kind(param: &ParamSpec, value: &serde_json::Value) -> Result<(), DispatchError> {
    let ok = match param.kind {
        ParamKind::Integer => value.as_i64().is_some(),
        ParamKind::Float => value.as_f64().is_some(),
        ParamKind::Text => value.is_string(),
        ParamKind::List => value.is_array(),
        ParamKind::Map => value.is_object(),
    };
    if ok {
        Ok(())
    } else {
        Err(DispatchError::InvalidArgument {
            param: param.name.to_string(),
            reason: format!(
                "expected {}, got {}",
                param.kind.as_str(),
                kind_of(value)
            ),
        })
    }
}

fn check_bound(param: &ParamSpec, value: &serde_json::Value) -> Result<(), DispatchError> {
    let Some((min, max)) = param.bound else {
        return Ok(());
    };
    // Kind check has already run, so numeric extraction succeeds here.
    let Some(n) = value.as_f64() else {
        return Ok(());
    };
    if n < min || n > max {
        return Err(DispatchError::InvalidArgument {
            param: param.name.to_string(),
            reason: format!("{n} is outside the allowed range [{min}, {max}]"),
        });
    }
    Ok(())
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
