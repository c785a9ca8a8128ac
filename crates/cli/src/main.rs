use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rayon::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use docsift_core::{
    discover_collections, ChunkConfig, CollectionDescriptor, CollectionProcessor, FileExtractor,
    ProcessorOptions, SiftError, DEFAULT_TOP_K, MIN_CHUNK_CHARS,
};
use docsift_embed::EmbeddingClient;

#[derive(Parser, Debug)]
#[command(
    name = "docsift",
    version,
    about = "Persona-driven passage ranking over document collections"
)]
struct Cli {
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Run {
        root: PathBuf,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
        #[arg(long, default_value_t = MIN_CHUNK_CHARS)]
        min_chars: usize,
        #[arg(long)]
        jobs: Option<usize>,
    },
    List { root: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Run {
            root,
            top_k,
            min_chars,
            jobs,
        } => run(&root, top_k, min_chars, jobs),
        Commands::List { root } => list(&root),
    }
}

fn run(root: &Path, top_k: usize, min_chars: usize, jobs: Option<usize>) -> Result<()> {
    if let Some(jobs) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("failed to configure worker pool")?;
    }
    let collections = discover_collections(root)
        .with_context(|| format!("failed to scan {}", root.display()))?;
    if collections.is_empty() {
        bail!("no collections found under {}", root.display());
    }
    let embedder =
        EmbeddingClient::from_env().context("failed to initialize embedding backend")?;
    let extractor = FileExtractor;
    let options = ProcessorOptions {
        top_k,
        chunk: ChunkConfig { min_chars },
    };
    let processor = CollectionProcessor::new(&extractor, &embedder, options);

    let results: Vec<(String, docsift_core::Result<usize>)> = collections
        .par_iter()
        .map(|collection| {
            (
                collection.name.clone(),
                process_collection(&processor, collection),
            )
        })
        .collect();

    let mut failed = 0usize;
    for (name, result) in results {
        match result {
            Ok(sections) => {
                info!(collection = %name, sections, "report written");
            }
            Err(SiftError::Embedding(reason)) => {
                return Err(anyhow!("embedding backend failed: {reason}"));
            }
            Err(err) => {
                error!(collection = %name, error = %err, "collection failed");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        warn!(failed, "some collections did not produce a report");
    }
    Ok(())
}

fn process_collection(
    processor: &CollectionProcessor<'_>,
    collection: &CollectionDescriptor,
) -> docsift_core::Result<usize> {
    let outcome = processor.process(collection)?;
    for skip in &outcome.skipped {
        warn!(
            collection = %collection.name,
            document = %skip.document,
            reason = %skip.reason,
            "document skipped"
        );
    }
    let file = File::create(collection.report_path())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &outcome.report)?;
    writer.flush()?;
    Ok(outcome.report.extracted_sections.len())
}

fn list(root: &Path) -> Result<()> {
    let collections = discover_collections(root)
        .with_context(|| format!("failed to scan {}", root.display()))?;
    if collections.is_empty() {
        warn!("no collections found under {}", root.display());
        return Ok(());
    }
    for collection in &collections {
        println!("{}\t{}", collection.name, collection.root.display());
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
