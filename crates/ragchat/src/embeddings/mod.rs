//! Embedding generation with provider batching

mod batch;

pub use batch::BatchEmbedder;
