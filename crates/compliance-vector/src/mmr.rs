//! Maximum marginal relevance re-ranking over vector-search candidates.
use compliance_core::types::ScoredChunk;

pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut na, mut nb) = (0f32, 0f32, 0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

/// Greedily pick up to `k` candidates maximizing
/// `lambda * sim(query, c) - (1 - lambda) * max(sim(c, already picked))`.
///
/// The first pick is always the candidate most similar to the query. Output
/// order is selection order. Candidate `score`s are recomputed against
/// `query_vec`.
pub fn select(query_vec: &[f32], candidates: Vec<ScoredChunk>, k: usize, lambda: f32) -> Vec<ScoredChunk> {
    let mut pool: Vec<ScoredChunk> = candidates
        .into_iter()
        .map(|mut c| {
            c.score = cosine(query_vec, &c.vector);
            c
        })
        .collect();
    let mut selected: Vec<ScoredChunk> = Vec::with_capacity(k.min(pool.len()));
    while selected.len() < k && !pool.is_empty() {
        let mut best_idx = 0;
        let mut best_value = f32::NEG_INFINITY;
        for (i, cand) in pool.iter().enumerate() {
            let redundancy = selected
                .iter()
                .map(|s| cosine(&cand.vector, &s.vector))
                .fold(f32::NEG_INFINITY, f32::max);
            let redundancy = if selected.is_empty() { 0.0 } else { redundancy };
            let value = lambda * cand.score - (1.0 - lambda) * redundancy;
            if value > best_value {
                best_value = value;
                best_idx = i;
            }
        }
        selected.push(pool.swap_remove(best_idx));
    }
    selected
}
