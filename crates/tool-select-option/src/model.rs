/// Matching tiers, strictest first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MatchTier {
    /// Trimmed, case-folded option text equals the target.
    Exact,
    /// Option text contains the target.
    Contains,
    /// Target contains the option text, or the option text contains the
    /// target's first token.
    Loose,
}

impl MatchTier {
    pub fn label(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Contains => "contains",
            MatchTier::Loose => "loose",
        }
    }

    pub fn all() -> Vec<MatchTier> {
        vec![MatchTier::Exact, MatchTier::Contains, MatchTier::Loose]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionMatch {
    pub index: usize,
    pub value: String,
    pub text: String,
    pub tier: MatchTier,
}

/// What a successful selection committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOutcome {
    pub value: String,
    pub text: String,
    pub tier: MatchTier,
}

impl From<OptionMatch> for SelectOutcome {
    fn from(found: OptionMatch) -> Self {
        Self {
            value: found.value,
            text: found.text,
            tier: found.tier,
        }
    }
}
