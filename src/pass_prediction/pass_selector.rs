use super::pass_candidate::{PassCandidate, SelectedPass};

/// Picks the pass to track.
///
/// Returns the candidate with the smallest `start_time` strictly after `now`.
/// Equal start times resolve to the one listed first, so for an earliest-first
/// list this is the first future candidate. `None` means every candidate has
/// already risen, which callers answer with a fresh lookup.
pub fn select(now: i64, candidates: &[PassCandidate]) -> Option<SelectedPass> {
    candidates
        .iter()
        .filter(|c| c.start_time() > now)
        .min_by_key(|c| c.start_time())
        .copied()
        .map(SelectedPass::from)
}
