use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use lsh::{HashMethod, SetMinHasher, ShingleMinHasher, Signature};
use pair_similarity::jaccard::{set_jaccard, shingle_jaccard};
use pair_similarity::shingling::Shingler;

#[derive(Parser, Debug)]
#[clap(
    name = "pair-similarity-minhash_acc",
    about = "A program to test mean absolute errors of MinHash against the exact Jaccard index."
)]
struct Args {
    /// File path to a document file of one text (or one integer set with --sets) per line.
    /// Empty lines must not be included.
    #[clap(short = 'i', long)]
    document_path: PathBuf,

    /// Parses each line as integers separated by commas or whitespace.
    #[clap(short = 'S', long)]
    sets: bool,

    /// Number of characters per shingle (must be more than 0).
    #[clap(short = 'k', long, default_value = "2")]
    shingle_length: usize,

    /// Hash family for shingle signatures.
    #[clap(long, default_value = "murmur3")]
    hash_method: HashMethod,

    /// Largest signature length to evaluate.
    #[clap(short = 'm', long, default_value = "200")]
    max_signature_size: usize,

    /// Increment between evaluated signature lengths.
    #[clap(long, default_value = "10")]
    step: usize,

    /// Seed value for the universal hash coefficients of sets.
    #[clap(short = 's', long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.max_signature_size == 0 || args.step == 0 {
        bail!("max_signature_size and step must not be 0.");
    }

    let mut lines = vec![];
    for line in BufReader::new(File::open(&args.document_path)?).lines() {
        let line = line?;
        if line.is_empty() {
            bail!("Input document must not be empty.");
        }
        lines.push(line);
    }
    let n = lines.len();
    if n < 2 {
        bail!("At least two lines are needed, but got {n}.");
    }
    tracing::info!(texts = n, pairs = n * (n - 1) / 2, "loaded");

    let (signatures, exacts) = if args.sets {
        sets_signatures(&args, &lines)?
    } else {
        strings_signatures(&args, &lines)?
    };

    tracing::info!("computing mean absolute errors");
    println!("signature_size,mean_absolute_error");
    let mut sig_size = args.step.min(args.max_signature_size);
    while sig_size <= args.max_signature_size {
        let mut sum_error = 0.;
        let mut exact_iter = exacts.iter();
        for i in 0..n {
            let x = &signatures[i][..sig_size];
            for y in &signatures[i + 1..] {
                let exact = exact_iter
                    .next()
                    .ok_or_else(|| anyhow!("missing exact Jaccard index"))?;
                sum_error += (exact - lsh::signature_index(x, &y[..sig_size])).abs();
            }
        }
        let mae = sum_error / exacts.len() as f64;
        println!("{sig_size},{mae}");
        sig_size += args.step;
    }

    Ok(())
}

fn strings_signatures(args: &Args, lines: &[String]) -> Result<(Vec<Signature>, Vec<f64>)> {
    let shingler = Shingler::new(args.shingle_length)?;
    let hasher = ShingleMinHasher::new(args.hash_method, args.max_signature_size)?;

    let start = Instant::now();
    let shingles: Vec<_> = lines.par_iter().map(|l| shingler.shingles(l)).collect();
    let signatures = shingles.par_iter().map(|s| hasher.signature(s)).collect();
    tracing::info!(elapsed_sec = start.elapsed().as_secs_f64(), "signatures");

    let start = Instant::now();
    let exacts = all_pairs(shingles.len())
        .into_par_iter()
        .map(|(i, j)| shingle_jaccard(&shingles[i], &shingles[j]))
        .collect();
    tracing::info!(elapsed_sec = start.elapsed().as_secs_f64(), "exact");
    Ok((signatures, exacts))
}

fn sets_signatures(args: &Args, lines: &[String]) -> Result<(Vec<Signature>, Vec<f64>)> {
    let sets = lines
        .iter()
        .map(|l| parse_set(l))
        .collect::<Result<Vec<_>>>()?;
    let mut universe: Vec<i64> = sets.iter().flatten().copied().collect();
    universe.sort_unstable();
    universe.dedup();
    let universe_size = universe.len().max(2);
    let hasher = match args.seed {
        Some(seed) => SetMinHasher::with_seed(universe_size, args.max_signature_size, seed)?,
        None => SetMinHasher::new(universe_size, args.max_signature_size)?,
    };

    let start = Instant::now();
    let signatures = sets.par_iter().map(|s| hasher.signature(s)).collect();
    tracing::info!(
        universe_size,
        elapsed_sec = start.elapsed().as_secs_f64(),
        "signatures"
    );

    let exacts = all_pairs(sets.len())
        .into_par_iter()
        .map(|(i, j)| set_jaccard(&sets[i], &sets[j]))
        .collect();
    Ok((signatures, exacts))
}

fn all_pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).collect()
}

fn parse_set(line: &str) -> Result<Vec<i64>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<i64>()
                .map_err(|e| anyhow!("invalid integer {t:?}: {e}"))
        })
        .collect()
}
