use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use grant_extractor::config::Settings;
use grant_extractor::{extract_from, ProjectRecord, TextFile};

#[derive(Parser)]
#[command(name = "grant_extractor", about = "Structured extraction of grant applications")]
struct Cli {
    /// TOML settings file (GRANT_* environment variables override it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one plain-text application into JSON
    Extract {
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract every .txt file in a directory into the output directory
    Batch {
        dir: PathBuf,
        /// Max files to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Set additional-file links in an extracted record, by file id
    Link {
        json: PathBuf,
        #[arg(long = "id", required = true)]
        ids: Vec<String>,
        #[arg(long = "url", required = true)]
        urls: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;

    match cli.command {
        Commands::Extract { input, output } => {
            let record = extract_from(&TextFile::new(&input))?;
            let json = render(&record, settings.pretty)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(input = %input.display(), output = %path.display(), "extracted");
                }
                None => println!("{}", json),
            }
        }
        Commands::Batch { dir, limit } => {
            let inputs = list_inputs(&dir, limit)?;
            if inputs.is_empty() {
                println!("No .txt files in {}.", dir.display());
                return Ok(());
            }
            std::fs::create_dir_all(&settings.output_dir)
                .with_context(|| format!("creating {}", settings.output_dir.display()))?;
            println!("Extracting {} applications...", inputs.len());
            let counts = run_batch(&inputs, &settings)?;
            println!(
                "Done: {} files ({} ok, {} errors) in {:.1}s",
                inputs.len(),
                counts.ok,
                counts.errors,
                t0.elapsed().as_secs_f64()
            );
        }
        Commands::Link { json, ids, urls } => {
            let text = std::fs::read_to_string(&json)
                .with_context(|| format!("reading {}", json.display()))?;
            let mut record = ProjectRecord::from_json(&text)?;
            record.attach_file_links(&ids, &urls)?;
            std::fs::write(&json, render(&record, settings.pretty)?)
                .with_context(|| format!("writing {}", json.display()))?;
            info!(record = %json.display(), links = ids.len(), "file links attached");
        }
    }

    Ok(())
}

fn render(record: &ProjectRecord, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    Ok(json)
}

fn list_inputs(dir: &Path, limit: Option<usize>) -> anyhow::Result<Vec<PathBuf>> {
    let mut inputs: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    inputs.sort();
    if let Some(n) = limit {
        inputs.truncate(n);
    }
    Ok(inputs)
}

struct BatchCounts {
    ok: usize,
    errors: usize,
}

fn run_batch(inputs: &[PathBuf], settings: &Settings) -> anyhow::Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads)
        .build()
        .context("building worker pool")?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let results: Vec<anyhow::Result<()>> = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| {
                let outcome = extract_one(input, settings);
                pb.inc(1);
                outcome
            })
            .collect()
    });
    pb.finish_and_clear();

    let mut counts = BatchCounts { ok: 0, errors: 0 };
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(()) => counts.ok += 1,
            Err(e) => {
                warn!(input = %input.display(), error = %e, "extraction failed");
                counts.errors += 1;
            }
        }
    }
    Ok(counts)
}

fn extract_one(input: &Path, settings: &Settings) -> anyhow::Result<()> {
    let record = extract_from(&TextFile::new(input))?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "record".to_string());
    let output = settings.output_dir.join(format!("{}.json", stem));
    std::fs::write(&output, render(&record, settings.pretty)?)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}
