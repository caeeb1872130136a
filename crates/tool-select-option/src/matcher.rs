//! Tiered option matching.
//!
//! Dropdown labels rarely equal the semantic value verbatim, so looser tiers
//! are consulted only after every option failed the stricter ones.

use autofill_core_types::SelectOption;

use crate::model::{MatchTier, OptionMatch};

/// Pick the option for `target`, strictest tier first.
pub fn match_option(options: &[SelectOption], target: &str) -> Option<OptionMatch> {
    let folded = target.to_lowercase();
    let first_token = folded.split_whitespace().next().unwrap_or("");

    MatchTier::all()
        .into_iter()
        .find_map(|tier| {
            options
                .iter()
                .position(|option| tier_matches(tier, &option.text, &folded, first_token))
                .map(|index| OptionMatch {
                    index,
                    value: options[index].value.clone(),
                    text: options[index].text.clone(),
                    tier,
                })
        })
}

fn tier_matches(tier: MatchTier, option_text: &str, target: &str, first_token: &str) -> bool {
    let text = option_text.to_lowercase();
    match tier {
        MatchTier::Exact => text.trim() == target,
        MatchTier::Contains => text.contains(target),
        MatchTier::Loose => target.contains(&text) || text.contains(first_token),
    }
}
