//! Thin CLI over the retrieval core: rebuild the index, or run one query.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use coach_rag::openai::{OpenAiEmbeddingProvider, OpenAiParaphraseGenerator};
use coach_rag::{RetrievalConfig, RetrievalPipeline};

/// Retrieval tooling for the career-guidance corpus.
#[derive(Parser, Debug)]
#[command(name = "coach", version, about, long_about = None)]
struct Args {
    /// Directory containing the corpus of markdown/plain-text documents
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Directory holding the persisted index artifacts
    #[arg(long, default_value = "./data/vector_db")]
    index_dir: PathBuf,

    /// Embedding model identifier
    #[arg(long, default_value = "text-embedding-3-small")]
    model: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rebuild the index from the corpus directory
    Index {
        /// Maximum chunk size in characters
        #[arg(long, default_value_t = 1000)]
        chunk_size: usize,
        /// Overlap between consecutive chunks in characters
        #[arg(long, default_value_t = 200)]
        chunk_overlap: usize,
    },
    /// Run a single ad hoc query against the index
    Query {
        /// The query text
        query: String,
        /// Number of results to return
        #[arg(short = 'k', long, default_value_t = 5)]
        top_k: usize,
        /// Broaden recall with best-effort query paraphrasing
        #[arg(long)]
        expand: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Index { chunk_size, chunk_overlap } => {
            let config = RetrievalConfig::builder()
                .data_dir(&args.data_dir)
                .vector_db_path(&args.index_dir)
                .chunk_size(chunk_size)
                .chunk_overlap(chunk_overlap)
                .embedding_model(&args.model)
                .build()?;
            let embedder =
                OpenAiEmbeddingProvider::from_env()?.with_model(&config.embedding_model);

            let pipeline = RetrievalPipeline::builder()
                .config(config)
                .embedding_provider(Arc::new(embedder))
                .build()?;

            let stats = pipeline.build_index_from_corpus().await?;
            println!(
                "Indexed {} chunks from {} documents into {}",
                stats.chunks,
                stats.documents,
                args.index_dir.display()
            );
        }
        Commands::Query { query, top_k, expand } => {
            let config = RetrievalConfig::builder()
                .data_dir(&args.data_dir)
                .vector_db_path(&args.index_dir)
                .embedding_model(&args.model)
                .top_k_results(top_k)
                .build()?;
            let embedder =
                OpenAiEmbeddingProvider::from_env()?.with_model(&config.embedding_model);

            let mut builder = RetrievalPipeline::builder()
                .config(config)
                .embedding_provider(Arc::new(embedder));
            if expand {
                builder = builder
                    .paraphrase_generator(Arc::new(OpenAiParaphraseGenerator::from_env()?));
            }
            let pipeline = builder.build()?;

            let results = pipeline.retrieve(&query, top_k).await?;
            if results.is_empty() {
                println!("No results.");
            }
            for result in results {
                let preview: String = result.chunk_text.chars().take(200).collect();
                println!(
                    "[{}#{}] score={:.2}\n{}...\n",
                    result.metadata.file, result.metadata.chunk_id, result.score, preview
                );
            }
        }
    }

    Ok(())
}
