//! Node paths within payload trees
//!
//! A node path identifies one node of a payload document as the sequence of
//! object keys and array indices leading to it from the root. Paths render
//! dotted, with array indices as decimal segments:
//!
//! ```text
//! hearing.prosecutionCases.0.defendants.1
//! ```
//!
//! The empty path is the document root. Tree walks maintain a single path by
//! push/pop, so the segment stack is a `SmallVec` sized for typical payload
//! depth.

use smallvec::SmallVec;
use std::fmt;

/// One step of a node path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Path from the document root to one node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    segments: SmallVec<[PathSegment; 8]>,
}

impl NodePath {
    /// The document root (empty path)
    pub fn root() -> Self {
        NodePath {
            segments: SmallVec::new(),
        }
    }

    /// Parse a dotted path
    ///
    /// All-decimal segments parse as array indices, everything else as keys.
    /// The empty string parses as the root path.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return NodePath::root();
        }
        let segments = dotted
            .split('.')
            .map(|part| {
                let all_digits = !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
                match part.parse::<usize>() {
                    Ok(index) if all_digits => PathSegment::Index(index),
                    _ => PathSegment::Key(part.to_string()),
                }
            })
            .collect();
        NodePath { segments }
    }

    /// True for the document root
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the path has no segments (same as [`is_root`](Self::is_root))
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Descend into an object key
    pub fn push_key(&mut self, key: &str) {
        self.segments.push(PathSegment::Key(key.to_string()));
    }

    /// Descend into an array index
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Ascend one level
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// Segments in root-to-node order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Render the dotted form
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match segment {
                PathSegment::Key(key) => out.push_str(key),
                PathSegment::Index(index) => {
                    out.push_str(&index.to_string());
                }
            }
        }
        out
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
