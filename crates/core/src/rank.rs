use crate::chunk::Chunk;
use crate::embedding::{cosine_similarity, Embedder};
use crate::error::Result;

pub const DEFAULT_TOP_K: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Scores the pooled chunks against the query embedding and returns the
/// `top_k` best, ordered by descending score.
///
/// Ties are broken by pooled order: the sort is stable, so chunks with equal
/// scores keep their document-then-page-then-paragraph position. This is a
/// guarantee callers may rely on, not an accident of the sort in use.
pub fn rank_chunks<E: Embedder + ?Sized>(
    embedder: &E,
    chunks: Vec<Chunk>,
    query_embedding: &[f32],
    top_k: usize,
) -> Result<Vec<ScoredChunk>> {
    let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
    let embeddings = embedder.encode_batch(&texts)?;
    let mut scored: Vec<ScoredChunk> = chunks
        .into_iter()
        .zip(embeddings)
        .map(|(chunk, embedding)| ScoredChunk {
            score: cosine_similarity(&embedding, query_embedding),
            chunk,
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_k);
    Ok(scored)
}
