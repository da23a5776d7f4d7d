//! Parody CLI — turn a lyrics file into a thematic parody, generate a
//! keyword vocabulary from free-text subjects, or benchmark the pipeline
//! against a local completer backend.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use parody_core::completer::ollama::{OllamaCompleter, OllamaConfig};
use parody_core::{generate, KeywordMap, ParodyConfig, RunHooks, TextCompleter};

#[derive(Parser)]
#[command(name = "parody", about = "Prosody-preserving lyric parody generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a parody of a lyrics file
    Parody(ParodyArgs),
    /// Generate a keyword vocabulary from free-text subjects
    KeywordGen(KeywordGenArgs),
    /// Time the generation pipeline against the configured backend
    Benchmark(BenchmarkArgs),
}

#[derive(Parser, Debug)]
struct BackendArgs {
    /// Ollama-compatible backend base URL
    #[arg(long, default_value = "http://localhost:11434")]
    base_url: String,

    /// Model name to request
    #[arg(long, default_value = "llama3")]
    model: String,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Disable on-disk completion caching
    #[arg(long, default_value_t = false)]
    no_cache: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Generate a parody of a lyrics file")]
struct ParodyArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// Input lyrics file
    input: PathBuf,

    /// Keywords file (`keyword: definition` per line)
    #[arg(long)]
    keywords: PathBuf,

    /// Output file; defaults to stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Total refinement passes per line (word-syllable pass is always one of these)
    #[arg(long, default_value_t = 2)]
    refinement_passes: usize,
}

#[derive(Parser, Debug)]
#[command(about = "Generate a keyword vocabulary from free-text subjects")]
struct KeywordGenArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// Subjects to generate keywords about
    #[arg(required = true)]
    subjects: Vec<String>,

    /// Number of keyword:definition lines to request
    #[arg(long, default_value_t = 10)]
    count: u32,

    /// Output file; defaults to stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Time the generation pipeline against the configured backend")]
struct BenchmarkArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// Input lyrics file
    input: PathBuf,

    /// Keywords file (`keyword: definition` per line)
    #[arg(long)]
    keywords: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Command::Parody(a) => a.backend.verbose,
        Command::KeywordGen(a) => a.backend.verbose,
        Command::Benchmark(a) => a.backend.verbose,
    };
    let log_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Parody(args) => run_parody(args),
        Command::KeywordGen(args) => run_keyword_gen(args),
        Command::Benchmark(args) => run_benchmark(args),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn build_completer(backend: &BackendArgs) -> Box<dyn TextCompleter> {
    let config = OllamaConfig {
        base_url: backend.base_url.clone(),
        model: backend.model.clone(),
        ..OllamaConfig::default()
    };
    let ollama = OllamaCompleter::new(config);
    if backend.no_cache {
        Box::new(ollama)
    } else {
        Box::new(parody_core::cache::CachingCompleter::new(ollama, backend.model.clone()))
    }
}

fn read_lyrics(path: &std::path::Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lyrics file: {}", path.display()))?;
    Ok(text.lines().map(|l| l.trim().to_string()).collect())
}

fn read_keywords(path: &std::path::Path) -> Result<KeywordMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read keywords file: {}", path.display()))?;
    let map = parody_core::keyword::parse_keywords(&text);
    if map.is_empty() {
        bail!("Keywords file produced no usable keyword: definition pairs: {}", path.display());
    }
    Ok(map)
}

fn write_output(output: &Option<PathBuf>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn run_parody(args: ParodyArgs) -> Result<()> {
    let lines = read_lyrics(&args.input)?;
    let keywords = read_keywords(&args.keywords)?;
    let completer = build_completer(&args.backend);

    let config = ParodyConfig {
        refinement_passes: args.refinement_passes,
    };

    let total = lines.iter().filter(|l| !l.trim().is_empty()).count();
    let mut progress = |done: usize, total: usize| {
        log::info!("Generated line {done}/{total}");
    };
    let hooks = RunHooks {
        progress: Some(&mut progress),
        cancelled: None,
    };

    log::info!("Generating parody for {} line(s) ({total} non-blank)", lines.len());
    let output = generate(&lines, &keywords, &config, completer.as_ref(), hooks)
        .context("Parody generation failed")?;

    write_output(&args.output, &output.join("\n"))
}

fn run_keyword_gen(args: KeywordGenArgs) -> Result<()> {
    if !(1..=100).contains(&args.count) {
        bail!("count must be between 1 and 100, got {}", args.count);
    }

    let completer = build_completer(&args.backend);
    completer.verify().map_err(|e| anyhow::anyhow!("Backend unavailable: {e}"))?;

    let map = parody_core::keyword::generate_keywords(completer.as_ref(), &args.subjects, args.count)
        .context("Keyword generation failed")?;

    let text = map.iter().map(|(k, v)| format!("{k}: {v}")).collect::<Vec<_>>().join("\n");
    write_output(&args.output, &text)
}

fn run_benchmark(args: BenchmarkArgs) -> Result<()> {
    let lines = read_lyrics(&args.input)?;
    let keywords = read_keywords(&args.keywords)?;
    let completer = build_completer(&args.backend);

    let started = Instant::now();
    let output = generate(&lines, &keywords, &ParodyConfig::default(), completer.as_ref(), RunHooks::default())
        .context("Benchmark run failed")?;
    let elapsed = started.elapsed();

    let non_blank = output.iter().filter(|l| !l.is_empty()).count();
    println!("Generated {non_blank} non-blank line(s) in {:.2?}", elapsed);
    if non_blank > 0 {
        println!("Average per line: {:.2?}", elapsed / non_blank as u32);
    }

    Ok(())
}
