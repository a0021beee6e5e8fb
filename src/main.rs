//! seshat CLI: semantic triple resolution engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use seshat::error::PipelineError;
use seshat::export;
use seshat::extract;
use seshat::lexicon::{RuleLemmatizer, StaticSynonyms};
use seshat::ontology::{MemoryOntology, OntologySource, RdfOntology};
use seshat::pipeline::Pipeline;
use seshat::registry::Registry;
use seshat::resolve::{CategoryResolver, DictionaryResolver};

#[derive(Parser)]
#[command(name = "seshat", version, about = "Semantic triple resolution engine")]
struct Cli {
    /// Registry override file (TOML).
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a batch of records and serialize the resulting graph.
    Ingest {
        /// Input file, one record per line.
        file: PathBuf,

        /// Output Turtle file. Prints to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Use the timestamped ingestion path (mandatory timestamps,
        /// category resolution, provenance stamps).
        #[arg(long)]
        timestamped: bool,

        /// External ontology file for class lookups (Turtle/RDF-XML/N-Triples).
        #[arg(long)]
        ontology: Option<PathBuf>,

        /// Emit the processing report as JSON on stdout.
        #[arg(long)]
        json: bool,
    },

    /// Show how a predicate resolves, with per-category scores.
    Resolve {
        /// The free-text predicate to resolve.
        predicate: String,

        /// Use the direct dictionary strategy instead of category scoring.
        #[arg(long)]
        dictionary: bool,
    },

    /// Show the candidate triples extracted from a raw record.
    Extract {
        /// The raw record text.
        record: String,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let registry = match &cli.registry {
        Some(path) => Registry::from_path(path)?,
        None => Registry::builtin(),
    };
    if let Err(defect) = registry.check() {
        tracing::warn!(%defect, "registry configuration defect");
    }

    match cli.command {
        Commands::Ingest {
            file,
            output,
            timestamped,
            ontology,
            json,
        } => ingest(&registry, &file, output, timestamped, ontology, json),
        Commands::Resolve {
            predicate,
            dictionary,
        } => {
            resolve(&registry, &predicate, dictionary);
            Ok(())
        }
        Commands::Extract { record } => {
            show_extraction(&record);
            Ok(())
        }
    }
}

fn ingest(
    registry: &Registry,
    file: &PathBuf,
    output: Option<PathBuf>,
    timestamped: bool,
    ontology: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(file).map_err(|e| PipelineError::InputSource {
        path: file.display().to_string(),
        source: e,
    })?;

    let ontology: Box<dyn OntologySource> = match ontology {
        Some(path) => Box::new(RdfOntology::load_or_empty(&path)),
        None => Box::new(MemoryOntology::default()),
    };

    let lemmatizer = RuleLemmatizer::new();
    let synonyms = StaticSynonyms::builtin();
    let mut pipeline = Pipeline::new(registry, &lemmatizer, &synonyms, ontology.as_ref());

    let records = content.lines().filter(|line| !line.trim().is_empty());
    if timestamped {
        pipeline.run_timestamped(records);
    } else {
        pipeline.run_plain(records);
    }

    let (graph, report) = pipeline.finish();

    match output {
        Some(path) => {
            let mut out = std::fs::File::create(&path)
                .map(std::io::BufWriter::new)
                .into_diagnostic()?;
            export::write_turtle(&graph, &mut out)?;
            tracing::info!(path = %path.display(), statements = graph.len(), "graph written");
        }
        None => {
            print!("{}", export::turtle_string(&graph));
        }
    }

    if json {
        println!("{}", export::report_json(&report)?);
    } else {
        eprint!("{report}");
    }
    Ok(())
}

fn resolve(registry: &Registry, predicate: &str, dictionary: bool) {
    let lemmatizer = RuleLemmatizer::new();

    if dictionary {
        let resolver = DictionaryResolver::new(registry);
        let term = resolver.resolve(predicate, &lemmatizer);
        println!("{predicate} -> {term} <{}>", term.iri());
        return;
    }

    let synonyms = StaticSynonyms::builtin();
    let resolver = CategoryResolver::new(registry, &lemmatizer, &synonyms);
    for (category, score) in resolver.score_categories(predicate) {
        println!("{category:>12}: {score}");
    }
    match resolver.resolve(predicate) {
        Some(resolution) => {
            println!(
                "{predicate} -> {} (category {}, role {}, score {}{})",
                resolution.term,
                resolution.category,
                resolution.property_role,
                resolution.property_score,
                if resolution.generic_fallback {
                    ", generic fallback"
                } else {
                    ""
                }
            );
        }
        None => println!("{predicate} -> no property (category has no generic fallback)"),
    }
}

fn show_extraction(record: &str) {
    match extract::extract_record(record) {
        Some(parsed) => {
            println!("subject:    {}", parsed.triple.subject);
            println!("predicate:  {}", parsed.triple.predicate);
            println!("object:     {}", parsed.triple.object);
            if let Some(timestamp) = &parsed.timestamp {
                println!("timestamp:  {timestamp}");
            }
            for attribute in &parsed.attributes {
                println!("attribute:  {attribute}");
            }
        }
        None => {
            let triples = extract::extract_triples(record);
            if triples.is_empty() {
                println!("no triple found");
            }
            for triple in triples {
                println!(
                    "({}, {}, {})",
                    triple.subject, triple.predicate, triple.object
                );
            }
        }
    }
}
