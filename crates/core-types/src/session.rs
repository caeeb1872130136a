use std::collections::HashSet;
use std::fmt;

use uuid::Uuid;

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FillPassId(pub String);

impl FillPassId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for FillPassId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FillPassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Write-once bookkeeping for a single fill pass.
///
/// An identifier is recorded at most once; the order of first success is kept
/// so reports list fields the way they were committed.
#[derive(Debug, Default)]
pub struct FillSession {
    pass_id: FillPassId,
    filled: Vec<String>,
    seen: HashSet<String>,
    misses: usize,
}

impl FillSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pass_id(&self) -> &FillPassId {
        &self.pass_id
    }

    pub fn is_filled(&self, identifier: &str) -> bool {
        self.seen.contains(identifier)
    }

    /// Returns `false` when the identifier was already recorded.
    pub fn mark_filled(&mut self, identifier: &str) -> bool {
        if !self.seen.insert(identifier.to_string()) {
            return false;
        }
        self.filled.push(identifier.to_string());
        true
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn filled(&self) -> &[String] {
        &self.filled
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.filled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filled.is_empty()
    }

    pub fn into_parts(self) -> (FillPassId, Vec<String>, usize) {
        (self.pass_id, self.filled, self.misses)
    }
}
