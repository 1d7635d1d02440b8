//! # Field Paths
//!
//! Locators for nodes inside a module descriptor or a generated config.
//! A path is an ordered list of segments; rendering happens only in
//! [`FieldPath::render`] so the validator and the generator can never
//! drift apart in formatting.
//!
//! Rendering rules:
//! - keys are joined with `.` (`fields.title.default`);
//! - indices are appended as `[i]` without a separator (`items[2]`,
//!   `fields.mode.options[0]`);
//! - the root renders as the empty string, and [`Display`](std::fmt::Display)
//!   shows it as `<root>`.

use std::fmt;

use serde::{Serialize, Serializer};

/// Placeholder shown for the root path in human-facing output.
pub const ROOT_LABEL: &str = "<root>";

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key or field identifier.
    Key(String),
    /// Array position.
    Index(usize),
}

/// Ordered sequence of [`PathSegment`]s from the root to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// A single-key path.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(key.into())],
        }
    }

    /// Returns a new path extended by an object key.
    pub fn join(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Key(key.into()));
        next
    }

    /// Returns a new path extended by an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Index(index));
        next
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Borrow the segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Render to the dotted/bracketed form. The root renders as `""`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(ROOT_LABEL)
        } else {
            f.write_str(&self.render())
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
