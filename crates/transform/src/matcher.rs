//! Compiled path patterns
//!
//! A rule targets payload nodes by matching their dotted path against a
//! regular expression. Patterns are anchored at both ends: the FULL path
//! must match, so `hearing\.prosecutionCases\.\d+` matches
//! `hearing.prosecutionCases.0` and nothing deeper, and a substring hit
//! never counts. Array indices appear in paths as decimal segments.
//!
//! Patterns are compiled exactly once, when the registry is built. Matching
//! an event touches only the precompiled automaton.

use docket_core::NodePath;
use regex::Regex;
use thiserror::Error;

/// Pattern compilation failure
#[derive(Debug, Error)]
#[error("invalid path pattern '{pattern}': {source}")]
pub struct PatternError {
    /// The pattern as written
    pub pattern: String,
    /// Underlying regex error
    #[source]
    pub source: regex::Error,
}

/// A compiled, fully-anchored path pattern
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compile a pattern
    ///
    /// The pattern is wrapped in `^(?:...)$` before compilation, so authors
    /// write the path shape without anchors.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(PathPattern {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written (without the added anchors)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match a node path
    pub fn matches(&self, path: &NodePath) -> bool {
        self.regex.is_match(&path.render())
    }

    /// Match an already-rendered dotted path
    pub fn matches_str(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}
