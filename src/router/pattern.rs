//! Pattern compiler - converts route patterns into reusable matchers.
//!
//! A route pattern is a `/`-separated string. A segment beginning with `:`
//! is a variable segment named by the remainder; every other segment is a
//! literal that must match exactly. Patterns are compiled once, at
//! registration time, into a structured segment list plus an anchored regex
//! that is reused on every resolution.

use crate::error::RouterError;
use crate::router::core::VarVec;
use regex::RegexBuilder;
use std::sync::Arc;

/// Character class a variable segment value may draw from.
///
/// A hash segment containing any character outside this set cannot satisfy
/// a variable segment.
pub const VAR_CHAR_CLASS: &str = "[A-Za-z0-9_-]";

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of segments in a pattern.
const MAX_PATTERN_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text matched exactly.
    Literal(String),
    /// Named variable capturing one-or-more characters from
    /// [`VAR_CHAR_CLASS`].
    Variable(String),
}

/// A route pattern compiled into a reusable matcher.
///
/// Splitting on `/` preserves separators: a leading `/` produces an empty
/// literal segment that contributes no text, so the compiled regex for
/// `/home/:id` is `^/home/([A-Za-z0-9_-]+)$`. The whole expression is
/// anchored; a hash with extra segments does not match.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The pattern string exactly as registered.
    pattern: String,
    /// Parsed segments in order.
    segments: Vec<Segment>,
    /// Anchored regex compiled from the segments.
    regex: regex::Regex,
    /// Variable names in capture-group order.
    var_names: Vec<Arc<str>>,
}

impl CompiledPattern {
    /// Compiles a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if the pattern exceeds the
    /// length or segment limits, or compiles to an invalid regex.
    pub fn compile(pattern: &str) -> Result<Self, RouterError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(RouterError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: format!(
                    "pattern length {} exceeds maximum of {} bytes",
                    pattern.len(),
                    MAX_PATTERN_LENGTH
                ),
            });
        }

        let raw_segments: Vec<&str> = pattern.split('/').collect();
        if raw_segments.len() > MAX_PATTERN_SEGMENTS {
            return Err(RouterError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: format!(
                    "pattern has {} segments, exceeding maximum of {}",
                    raw_segments.len(),
                    MAX_PATTERN_SEGMENTS
                ),
            });
        }

        let mut regex_str = String::with_capacity(pattern.len() + 16);
        regex_str.push('^');
        let mut segments = Vec::with_capacity(raw_segments.len());
        let mut var_names = Vec::new();

        for (i, raw) in raw_segments.iter().enumerate() {
            if i > 0 {
                regex_str.push('/');
            }
            if let Some(name) = raw.strip_prefix(':') {
                var_names.push(Arc::from(name));
                segments.push(Segment::Variable(name.to_string()));
                regex_str.push('(');
                regex_str.push_str(VAR_CHAR_CLASS);
                regex_str.push_str("+)");
            } else {
                segments.push(Segment::Literal((*raw).to_string()));
                regex_str.push_str(&regex::escape(raw));
            }
        }
        regex_str.push('$');

        let regex = RegexBuilder::new(&regex_str)
            .size_limit(MAX_REGEX_SIZE)
            .build()
            .map_err(|e| RouterError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: format!("failed to compile pattern regex: {}", e),
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
            regex,
            var_names,
        })
    }

    /// Returns the pattern string exactly as registered.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parsed segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the variable names in capture order.
    #[must_use]
    pub fn var_names(&self) -> &[Arc<str>] {
        &self.var_names
    }

    /// Returns whether the pattern contains any variable segments.
    #[must_use]
    pub fn has_vars(&self) -> bool {
        !self.var_names.is_empty()
    }

    /// Attempts to match a hash against this pattern's matcher.
    ///
    /// Returns the variable bindings in capture order on success. Duplicate
    /// variable names within one pattern each produce a binding; lookups on
    /// the binding vector use last-write-wins.
    #[must_use]
    pub fn matches(&self, hash: &str) -> Option<VarVec> {
        let caps = self.regex.captures(hash)?;
        let mut vars = VarVec::new();
        for (idx, name) in self.var_names.iter().enumerate() {
            if let Some(m) = caps.get(idx + 1) {
                vars.push((Arc::clone(name), m.as_str().to_string()));
            }
        }
        Some(vars)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for CompiledPattern {}

impl std::fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}
