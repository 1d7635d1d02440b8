//! # Default Config Generation
//!
//! Per field, in order:
//!
//! 1. an explicit `default` key (even `null`) is returned verbatim;
//! 2. the conditional and UI-aware hooks may supply a value;
//! 3. otherwise dispatch on the resolved [`FieldKind`]:
//!
//! | kind    | value                                                     |
//! |---------|-----------------------------------------------------------|
//! | string  | placeholder hook, else `""`                               |
//! | number  | `0`                                                       |
//! | boolean | `false`                                                   |
//! | enum    | first option, else `null` + warning                       |
//! | array   | array-template hook, else `[]` (non-array hook → warning) |
//! | object  | children recursively, `{}` when none                      |
//!
//! A field that cannot be generated at all (not an object, a hook error,
//! nesting deeper than [`MAX_DEPTH`]) becomes `null` plus a warning at that
//! field's path. Its siblings are unaffected.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use gcd_core::{FieldKind, FieldPath};

use crate::field::{field_id, SchemaField};
use crate::hooks::{
    ArrayTemplateArgs, ConditionalDefaultArgs, DefaultHooks, HookError, NoopHooks,
    PlaceholderArgs, UiAwareDefaultArgs,
};

/// Deepest field path the generator will descend to.
pub const MAX_DEPTH: usize = 64;

/// A diagnostic emitted during generation. Never blocks output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultConfigWarning {
    /// Field the warning refers to (`<root>` for schema-level warnings).
    pub path: FieldPath,
    pub message: String,
    /// The offending field definition (or the whole schema at the root).
    pub field_meta: Value,
}

/// Generated configuration plus every warning raised while building it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultConfigResult {
    /// Always an object.
    pub config: Value,
    /// Possibly empty; always present.
    pub warnings: Vec<DefaultConfigWarning>,
}

/// Caller-supplied knobs for one generation run.
#[derive(Clone, Copy, Default)]
pub struct GenerateOptions<'a> {
    /// Hook overrides; [`NoopHooks`] when `None`.
    pub hooks: Option<&'a dyn DefaultHooks>,
    /// Passed through to [`DefaultHooks::ui_aware_default`].
    pub ui_context: Option<&'a Value>,
}

impl<'a> GenerateOptions<'a> {
    pub fn with_hooks(mut self, hooks: &'a dyn DefaultHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn with_ui_context(mut self, ui_context: &'a Value) -> Self {
        self.ui_context = Some(ui_context);
        self
    }
}

impl std::fmt::Debug for GenerateOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateOptions")
            .field("hooks", &self.hooks.map(|_| "custom"))
            .field("ui_context", &self.ui_context)
            .finish()
    }
}

/// Why one field fell back to `null`.
#[derive(Error, Debug)]
enum FieldError {
    #[error("field definition is not an object")]
    NotAnObject,

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error("nesting exceeds maximum depth {max}")]
    DepthExceeded { max: usize },
}

/// Generate the default configuration for `schema`.
///
/// Never fails. `schema` is expected in normalized form (root `fields` is
/// an ordered list of field definitions).
pub fn generate_default_config(schema: &Value, options: &GenerateOptions<'_>) -> DefaultConfigResult {
    let noop = NoopHooks;
    let hooks: &dyn DefaultHooks = match options.hooks {
        Some(hooks) => hooks,
        None => &noop,
    };
    let mut ctx = Generator {
        hooks,
        ui_context: options.ui_context,
        warnings: Vec::new(),
    };

    let config = ctx.generate_root(schema);
    tracing::debug!(warnings = ctx.warnings.len(), "default config generated");

    DefaultConfigResult {
        config,
        warnings: ctx.warnings,
    }
}

/// Per-call generation state.
struct Generator<'a> {
    hooks: &'a dyn DefaultHooks,
    ui_context: Option<&'a Value>,
    warnings: Vec<DefaultConfigWarning>,
}

impl Generator<'_> {
    fn warn(&mut self, path: &FieldPath, message: impl Into<String>, field_meta: &Value) {
        let message = message.into();
        tracing::debug!(path = %path, %message, "default generation warning");
        self.warnings.push(DefaultConfigWarning {
            path: path.clone(),
            message,
            field_meta: field_meta.clone(),
        });
    }

    fn generate_root(&mut self, schema: &Value) -> Value {
        if !schema.is_object() {
            self.warn(
                &FieldPath::root(),
                "Schema is missing or not an object; returning empty config fallback.",
                schema,
            );
            return Value::Object(Map::new());
        }

        let fields = match schema.get("fields") {
            Some(Value::Array(fields)) if !fields.is_empty() => fields,
            _ => {
                self.warn(
                    &FieldPath::root(),
                    "Schema contains no fields; returning empty config.",
                    schema,
                );
                return Value::Object(Map::new());
            }
        };

        Value::Object(self.generate_children(fields, &FieldPath::root()))
    }

    fn generate_children(&mut self, fields: &[Value], parent: &FieldPath) -> Map<String, Value> {
        let mut output = Map::new();

        for (index, field) in fields.iter().enumerate() {
            let id = field_id(field, index);
            let path = parent.join(id.as_str());

            let value = match self.generate_field(field, &path, &output) {
                Ok(value) => value,
                Err(err) => {
                    let message = if parent.is_root() {
                        format!("Failed to generate field '{id}' ({err}); using null fallback.")
                    } else {
                        format!("Failed to generate nested field '{id}' ({err}); using null fallback.")
                    };
                    self.warn(&path, message, field);
                    Value::Null
                }
            };
            output.insert(id, value);
        }

        output
    }

    fn generate_field(
        &mut self,
        value: &Value,
        path: &FieldPath,
        parent: &Map<String, Value>,
    ) -> Result<Value, FieldError> {
        if path.depth() > MAX_DEPTH {
            return Err(FieldError::DepthExceeded { max: MAX_DEPTH });
        }

        let field = SchemaField::from_value(value).ok_or(FieldError::NotAnObject)?;

        if let Some(default) = field.explicit_default() {
            return Ok(default.clone());
        }

        if let Some(v) = self.hooks.conditional_default(ConditionalDefaultArgs {
            field: value,
            path,
            current_parent_value: parent,
        })? {
            return Ok(v);
        }

        if let Some(v) = self.hooks.ui_aware_default(UiAwareDefaultArgs {
            field: value,
            path,
            ui_context: self.ui_context,
        })? {
            return Ok(v);
        }

        match field.resolved_kind() {
            FieldKind::String => Ok(self
                .hooks
                .infer_placeholder(PlaceholderArgs {
                    field: value,
                    path,
                    parent_value: parent,
                })?
                .unwrap_or_else(|| Value::String(String::new()))),
            FieldKind::Number => Ok(Value::from(0)),
            FieldKind::Boolean => Ok(Value::Bool(false)),
            FieldKind::Enum => Ok(self.enum_default(field, path)),
            FieldKind::Array => self.array_default(value, path),
            FieldKind::Object => Ok(self.object_default(field, path)),
            FieldKind::Unknown(_) => {
                self.warn(path, "Unknown or unsupported field type; using null placeholder.", value);
                Ok(Value::Null)
            }
        }
    }

    fn enum_default(&mut self, field: SchemaField<'_>, path: &FieldPath) -> Value {
        match field.options().and_then(|options| options.first()) {
            Some(first) => first.clone(),
            None => {
                self.warn(
                    path,
                    "Enum/select field has no valid options; using null fallback.",
                    &Value::Object(field.raw().clone()),
                );
                Value::Null
            }
        }
    }

    fn array_default(&mut self, value: &Value, path: &FieldPath) -> Result<Value, FieldError> {
        match self
            .hooks
            .array_template_default(ArrayTemplateArgs { field: value, path })?
        {
            Some(Value::Array(items)) => Ok(Value::Array(items)),
            Some(_) => {
                self.warn(
                    path,
                    "Array default is not an array; using empty array instead.",
                    value,
                );
                Ok(Value::Array(Vec::new()))
            }
            None => Ok(Value::Array(Vec::new())),
        }
    }

    fn object_default(&mut self, field: SchemaField<'_>, path: &FieldPath) -> Value {
        match field.children() {
            None => Value::Object(Map::new()),
            Some(Value::Array(children)) => Value::Object(self.generate_children(children, path)),
            Some(_) => {
                self.warn(
                    path,
                    "Object field has non-array 'fields' metadata; using {} fallback.",
                    &Value::Object(field.raw().clone()),
                );
                Value::Object(Map::new())
            }
        }
    }
}
