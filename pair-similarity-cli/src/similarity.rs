use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lsh::HashMethod;
use pair_similarity::{Algorithm, Similarity, SimilarityOptions};

#[derive(Parser, Debug)]
#[clap(
    name = "pair-similarity",
    about = "A program to compute the similarity of two texts or two integer sets."
)]
struct Args {
    /// First text, or file path with --files.
    lhs: String,

    /// Second text, or file path with --files.
    rhs: String,

    /// Similarity algorithm: jaccard, minhash or lsh.
    #[clap(short = 'a', long, default_value = "jaccard")]
    algorithm: Algorithm,

    /// Reads the inputs from the files at the given paths.
    #[clap(short = 'f', long)]
    files: bool,

    /// Parses the inputs as integers separated by commas or whitespace.
    #[clap(short = 'S', long)]
    sets: bool,

    /// JSON file of options. Options given as flags override it.
    #[clap(short = 'o', long)]
    options: Option<PathBuf>,

    /// Number of characters per shingle (must be more than 0).
    #[clap(short = 'k', long)]
    shingle_length: Option<usize>,

    /// Number of distinct elements in both sets (must be more than 1).
    /// If None, the size of the union of the inputs is used.
    #[clap(short = 'u', long)]
    universe_size: Option<usize>,

    /// Signature length of the MinHash algorithm.
    #[clap(short = 'm', long)]
    signature_size: Option<usize>,

    /// Number of LSH bands.
    #[clap(short = 'b', long)]
    band_count: Option<usize>,

    /// Modulus of LSH band bucket values.
    #[clap(short = 'r', long)]
    row_count: Option<usize>,

    /// LSH threshold in the range of (0,1).
    #[clap(short = 't', long)]
    threshold: Option<f64>,

    /// Hash family for shingle signatures: murmur3, murmur3-km, city64, farm64 or xx64.
    #[clap(long)]
    hash_method: Option<HashMethod>,

    /// Seed value for the universal hash coefficients of sets.
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// Number of worker threads.
    #[clap(short = 'j', long)]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = load_options(&args)?;
    let similarity = Similarity::new(args.algorithm, options)?;

    let (lhs, rhs) = if args.files {
        (
            fs::read_to_string(&args.lhs).with_context(|| format!("reading {}", args.lhs))?,
            fs::read_to_string(&args.rhs).with_context(|| format!("reading {}", args.rhs))?,
        )
    } else {
        (args.lhs.clone(), args.rhs.clone())
    };

    let start = Instant::now();
    let score = if args.sets {
        similarity.of_sets(&parse_set(&lhs)?, &parse_set(&rhs)?)?
    } else {
        similarity.of_strings(&lhs, &rhs)?
    };
    tracing::info!(
        algorithm = %args.algorithm,
        elapsed_sec = start.elapsed().as_secs_f64(),
        "compared"
    );

    println!("{score}");
    Ok(())
}

fn load_options(args: &Args) -> Result<SimilarityOptions> {
    let mut options = match &args.options {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimilarityOptions::default(),
    };
    if let Some(k) = args.shingle_length {
        options = options.with_shingle_length(k);
    }
    if let Some(n) = args.universe_size {
        options = options.with_universe_size(n);
    }
    if let Some(m) = args.signature_size {
        options = options.with_signature_size(m);
    }
    if let Some(b) = args.band_count {
        options = options.with_band_count(b);
    }
    if let Some(r) = args.row_count {
        options = options.with_row_count(r);
    }
    if let Some(t) = args.threshold {
        options = options.with_threshold(t);
    }
    if let Some(h) = args.hash_method {
        options = options.with_hash_method(h);
    }
    if let Some(s) = args.seed {
        options = options.with_seed(s);
    }
    if let Some(j) = args.worker_threads {
        options = options.with_worker_threads(j);
    }
    Ok(options)
}

fn parse_set(text: &str) -> Result<Vec<i64>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<i64>()
                .map_err(|e| anyhow!("invalid integer {t:?}: {e}"))
        })
        .collect()
}
