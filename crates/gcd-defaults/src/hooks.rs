//! # Defaulting Hooks
//!
//! Extension points consulted while generating a field with no explicit
//! `default`. Each hook returns:
//!
//! - `Ok(None)`: no opinion, fall through to the built-in rule;
//! - `Ok(Some(value))`: use `value`;
//! - `Err(HookError)`: the field fails; the generator records a warning and
//!   emits `null` for that field only.
//!
//! Call order per field: [`DefaultHooks::conditional_default`], then
//! [`DefaultHooks::ui_aware_default`], then the kind-specific hook
//! ([`DefaultHooks::infer_placeholder`] for strings,
//! [`DefaultHooks::array_template_default`] for arrays).

use serde_json::{Map, Value};
use thiserror::Error;

use gcd_core::FieldPath;

/// A hook could not produce a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{hook} hook failed: {reason}")]
pub struct HookError {
    /// Name of the failing hook.
    pub hook: &'static str,
    pub reason: String,
}

impl HookError {
    pub fn new(hook: &'static str, reason: impl Into<String>) -> Self {
        Self {
            hook,
            reason: reason.into(),
        }
    }
}

/// Arguments to [`DefaultHooks::infer_placeholder`].
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderArgs<'a> {
    pub field: &'a Value,
    pub path: &'a FieldPath,
    /// Siblings generated so far.
    pub parent_value: &'a Map<String, Value>,
}

/// Arguments to [`DefaultHooks::ui_aware_default`].
#[derive(Debug, Clone, Copy)]
pub struct UiAwareDefaultArgs<'a> {
    pub field: &'a Value,
    pub path: &'a FieldPath,
    /// Caller-supplied UI context, if any.
    pub ui_context: Option<&'a Value>,
}

/// Arguments to [`DefaultHooks::conditional_default`].
#[derive(Debug, Clone, Copy)]
pub struct ConditionalDefaultArgs<'a> {
    pub field: &'a Value,
    pub path: &'a FieldPath,
    /// Siblings generated so far.
    pub current_parent_value: &'a Map<String, Value>,
}

/// Arguments to [`DefaultHooks::array_template_default`].
#[derive(Debug, Clone, Copy)]
pub struct ArrayTemplateArgs<'a> {
    pub field: &'a Value,
    pub path: &'a FieldPath,
}

/// Pluggable defaulting behavior. Every method defaults to "no opinion".
pub trait DefaultHooks {
    /// Placeholder for a string field.
    fn infer_placeholder(&self, _args: PlaceholderArgs<'_>) -> Result<Option<Value>, HookError> {
        Ok(None)
    }

    /// Default derived from the UI context.
    fn ui_aware_default(&self, _args: UiAwareDefaultArgs<'_>) -> Result<Option<Value>, HookError> {
        Ok(None)
    }

    /// Default that depends on sibling values.
    fn conditional_default(
        &self,
        _args: ConditionalDefaultArgs<'_>,
    ) -> Result<Option<Value>, HookError> {
        Ok(None)
    }

    /// Template list for an array field. A non-array result is discarded
    /// with a warning.
    fn array_template_default(
        &self,
        _args: ArrayTemplateArgs<'_>,
    ) -> Result<Option<Value>, HookError> {
        Ok(None)
    }
}

/// The inert hook set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl DefaultHooks for NoopHooks {}
