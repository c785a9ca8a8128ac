mod chunk;
mod collection;
mod discover;
mod embedding;
mod error;
mod extract;
mod normalization;
mod query;
mod rank;
mod report;

pub use chunk::{Chunk, ChunkConfig, ChunkExtractor, MIN_CHUNK_CHARS};
pub use collection::{
    CollectionConfig, CollectionOutcome, CollectionProcessor, DocumentSkip, ProcessorOptions,
};
pub use discover::{
    discover_collections, list_documents, CollectionDescriptor, CONFIG_FILE, DOCS_DIR, REPORT_FILE,
};
pub use embedding::{cosine_similarity, Embedder, HashEmbedder, HashEmbedderConfig};
pub use error::{Result, SiftError};
pub use extract::{supported_extension, FileExtractor, PageExtractor, PageText};
pub use normalization::{collapse_lines, split_paragraphs};
pub use query::{compose_query, encode_query};
pub use rank::{rank_chunks, ScoredChunk, DEFAULT_TOP_K};
pub use report::{
    assemble_report, ExtractedSection, Report, ReportMetadata, SubsectionAnalysis,
    SECTION_TITLE_CHARS,
};
