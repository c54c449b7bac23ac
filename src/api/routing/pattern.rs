//! Declarative route patterns with named segments

use std::collections::HashMap;

/// One `/`-delimited piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Path template made of literal and `{name}` segments.
///
/// Matching requires equal segment counts: no wildcards, no optional
/// segments, no trailing-slash normalization. `/v1/games` and
/// `/v1/games/{id}` are distinct patterns.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .map(|piece| {
                match piece
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                {
                    Some(name) => Segment::Param(name.to_string()),
                    None => Segment::Literal(piece.to_string()),
                }
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `path` matches this pattern. Literals compare byte-equal and
    /// case-sensitive; a `{name}` segment accepts any single non-empty
    /// segment.
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(&parts)
            .all(|(segment, part)| match segment {
                Segment::Literal(literal) => literal.as_str() == *part,
                Segment::Param(_) => !part.is_empty(),
            })
    }

    /// Named segment values from `path`, verbatim — no decoding beyond what
    /// the transport already performed. Assumes a prior successful
    /// [`matches`](Self::matches); on arity mismatch the shorter side wins.
    pub fn extract_params(&self, path: &str) -> HashMap<String, String> {
        self.segments
            .iter()
            .zip(path.split('/'))
            .filter_map(|(segment, part)| match segment {
                Segment::Param(name) => Some((name.clone(), part.to_string())),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}
