use std::cmp::Reverse;

use super::types::{DateCandidate, SelectedDate};

/// Pick the winning candidate: highest tier first, earliest offset within it.
/// Returns `None` when there are no candidates at all.
pub fn select<I>(candidates: I) -> Option<SelectedDate>
where
    I: IntoIterator<Item = DateCandidate>,
{
    candidates
        .into_iter()
        .max_by_key(|c| (c.tier, Reverse(c.offset)))
        .map(SelectedDate::from)
}
