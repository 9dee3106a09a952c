// Resume analysis: section splitting, per-section semantic scoring,
// weighted aggregation, and model feedback.
// Embedding and chat calls go through the `Embedder` / `ChatCompleter`
// traits only; nothing here talks HTTP directly.

pub mod feedback;
pub mod handlers;
pub mod pipeline;
pub mod scoring;
pub mod sections;
