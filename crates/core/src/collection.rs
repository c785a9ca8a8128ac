use std::fs;
use std::path::Path;

use chrono::Local;
use rayon::prelude::*;
use serde::Deserialize;
use tracing::warn;

use crate::chunk::{Chunk, ChunkConfig, ChunkExtractor};
use crate::discover::{list_documents, CollectionDescriptor};
use crate::embedding::Embedder;
use crate::error::{Result, SiftError};
use crate::extract::PageExtractor;
use crate::query::encode_query;
use crate::rank::{rank_chunks, DEFAULT_TOP_K};
use crate::report::{assemble_report, Report};

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    pub persona: String,
    pub job: String,
}

impl CollectionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| SiftError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| SiftError::Config(format!("invalid {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.persona.trim().is_empty() {
            return Err(SiftError::Config("persona must not be empty".to_string()));
        }
        if self.job.trim().is_empty() {
            return Err(SiftError::Config("job must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProcessorOptions {
    pub top_k: usize,
    pub chunk: ChunkConfig,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            chunk: ChunkConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentSkip {
    pub document: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct CollectionOutcome {
    pub report: Report,
    pub skipped: Vec<DocumentSkip>,
}

pub struct CollectionProcessor<'a> {
    extractor: &'a dyn PageExtractor,
    embedder: &'a dyn Embedder,
    options: ProcessorOptions,
}

impl<'a> CollectionProcessor<'a> {
    pub fn new(
        extractor: &'a dyn PageExtractor,
        embedder: &'a dyn Embedder,
        options: ProcessorOptions,
    ) -> Self {
        Self {
            extractor,
            embedder,
            options,
        }
    }

    pub fn process(&self, collection: &CollectionDescriptor) -> Result<CollectionOutcome> {
        let config = CollectionConfig::load(&collection.config_path())?;
        self.process_with_config(collection, &config)
    }

    pub fn process_with_config(
        &self,
        collection: &CollectionDescriptor,
        config: &CollectionConfig,
    ) -> Result<CollectionOutcome> {
        let documents = list_documents(&collection.docs_dir())?;
        let chunker = ChunkExtractor::new(self.options.chunk);

        // Documents are independent; extraction fans out, pooling re-joins
        // in document order so ranking ties stay deterministic.
        let extracted: Vec<(String, Result<Vec<Chunk>>)> = documents
            .par_iter()
            .map(|path| {
                let document = document_id(path);
                let chunks = self
                    .extractor
                    .extract_pages(path)
                    .map(|pages| chunker.chunk_pages(&document, &pages));
                (document, chunks)
            })
            .collect();

        let mut pooled = Vec::new();
        let mut skipped = Vec::new();
        for (document, result) in extracted {
            match result {
                Ok(chunks) => pooled.extend(chunks),
                Err(SiftError::Extraction { reason, .. }) => {
                    warn!(document = %document, reason = %reason, "skipping document");
                    skipped.push(DocumentSkip { document, reason });
                }
                Err(SiftError::UnsupportedInput(path)) => {
                    let reason = format!("unsupported input format: {}", path.display());
                    warn!(document = %document, reason = %reason, "skipping document");
                    skipped.push(DocumentSkip { document, reason });
                }
                Err(other) => return Err(other),
            }
        }

        let query_embedding = encode_query(self.embedder, &config.persona, &config.job)?;
        let ranked = rank_chunks(self.embedder, pooled, &query_embedding, self.options.top_k)?;

        let input_documents = documents.iter().map(|path| document_id(path)).collect();
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let report = assemble_report(config, input_documents, &ranked, timestamp);
        Ok(CollectionOutcome { report, skipped })
    }
}

fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
