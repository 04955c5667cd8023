/// Upper bound on the number of recommendations returned per request.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// A job's position in the snapshot together with its two ranking keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub index: usize,
    pub match_count: usize,
    pub similarity: f64,
}

/// Orders candidates by match count, then similarity, both descending.
///
/// Jobs with no exact skill match are never returned, however similar their
/// text is. The sort is stable, so exact ties keep snapshot order.
pub fn rank<I>(candidates: I, limit: usize) -> Vec<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut ranked: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.match_count > 0)
        .collect();

    ranked.sort_by(|a, b| {
        b.match_count
            .cmp(&a.match_count)
            .then_with(|| b.similarity.total_cmp(&a.similarity))
    });
    ranked.truncate(limit);
    ranked
}
