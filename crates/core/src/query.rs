use crate::embedding::Embedder;
use crate::error::Result;

pub fn compose_query(persona: &str, job: &str) -> String {
    format!("{persona}. Task: {job}")
}

pub fn encode_query<E: Embedder + ?Sized>(
    embedder: &E,
    persona: &str,
    job: &str,
) -> Result<Vec<f32>> {
    embedder.encode(&compose_query(persona, job))
}
