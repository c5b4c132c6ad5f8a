use tracing::info;

use super::traits::{Embedder, EmbeddingError};

/// Embed `texts` in sequential batches of at most `batch_size`, returning
/// one vector per text in input order.
///
/// Batches run one after another; the first failing batch aborts the rest.
pub async fn embed_in_batches(
    embedder: &dyn Embedder,
    texts: &[&str],
    batch_size: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let batch_size = batch_size.max(1);
    let total_batches = texts.len().div_ceil(batch_size);
    let mut embeddings: Vec<Vec<f32>> = Vec::with_capacity(texts.len());

    for (i, batch) in texts.chunks(batch_size).enumerate() {
        info!(
            "Embedding batch {}/{} ({} chunks)",
            i + 1,
            total_batches,
            batch.len()
        );
        let batch_embeddings = embedder.embed_batch(batch).await?;
        if batch_embeddings.len() != batch.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: batch.len(),
                actual: batch_embeddings.len(),
            });
        }
        embeddings.extend(batch_embeddings);
    }

    Ok(embeddings)
}
