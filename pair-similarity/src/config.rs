//! Algorithm selection and comparison options.
use std::fmt;
use std::str::FromStr;

use lsh::HashMethod;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimilarityError};

/// Similarity algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Exact Jaccard index.
    #[default]
    Jaccard,
    /// Fraction of equal MinHash signature slots.
    MinHash,
    /// Exact Jaccard index for LSH candidate pairs, 0 otherwise.
    Lsh,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Jaccard => "jaccard",
            Self::MinHash => "minhash",
            Self::Lsh => "lsh",
        })
    }
}

impl FromStr for Algorithm {
    type Err = &'static str;
    fn from_str(algorithm: &str) -> Result<Self, Self::Err> {
        match algorithm {
            "jaccard" => Ok(Self::Jaccard),
            "minhash" => Ok(Self::MinHash),
            "lsh" => Ok(Self::Lsh),
            _ => Err("Could not parse an algorithm"),
        }
    }
}

/// Options of a comparison.
///
/// The defaults suit short strings (shorter than an email) and small
/// collections (10 to 40 elements).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityOptions {
    /// Number of characters per shingle (strings only).
    pub shingle_length: usize,
    /// Number of distinct elements in both sets (sets only).
    ///
    /// When `None`, it is the size of the union of the compared sets.
    pub universe_size: Option<usize>,
    /// Signature length of the MinHash algorithm.
    pub signature_size: usize,
    /// Number of LSH bands.
    pub band_count: usize,
    /// Modulus of LSH band bucket values.
    ///
    /// It does not affect the LSH signature length, which is derived from
    /// `band_count` and `threshold`.
    pub row_count: usize,
    /// LSH threshold in `(0, 1)` balancing false positives and false negatives.
    pub threshold: f64,
    /// Hash family for shingle signatures (strings only).
    pub hash_method: HashMethod,
    /// Seed of the universal hash coefficients (sets only).
    ///
    /// When `None`, coefficients come from the operating system's secure generator.
    pub seed: Option<u64>,
    /// Number of threads of the pool created for a call when none is injected.
    pub worker_threads: usize,
}

impl SimilarityOptions {
    /// Creates options with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shingle length.
    pub fn with_shingle_length(mut self, shingle_length: usize) -> Self {
        self.shingle_length = shingle_length;
        self
    }

    /// Sets the number of distinct elements in both sets.
    pub fn with_universe_size(mut self, universe_size: usize) -> Self {
        self.universe_size = Some(universe_size);
        self
    }

    /// Sets the MinHash signature length.
    pub fn with_signature_size(mut self, signature_size: usize) -> Self {
        self.signature_size = signature_size;
        self
    }

    /// Sets the number of LSH bands.
    pub fn with_band_count(mut self, band_count: usize) -> Self {
        self.band_count = band_count;
        self
    }

    /// Sets the modulus of LSH band bucket values.
    pub fn with_row_count(mut self, row_count: usize) -> Self {
        self.row_count = row_count;
        self
    }

    /// Sets the LSH threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the hash family for shingle signatures.
    pub fn with_hash_method(mut self, hash_method: HashMethod) -> Self {
        self.hash_method = hash_method;
        self
    }

    /// Sets the seed of the universal hash coefficients.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the size of call-local worker pools.
    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<()> {
        if self.shingle_length == 0 {
            return Err(SimilarityError::input("Shingle length must not be 0."));
        }
        if let Some(n) = self.universe_size {
            if n <= 1 {
                return Err(SimilarityError::input(format!(
                    "Universe size must be more than 1, but got {n}."
                )));
            }
        }
        if self.signature_size == 0 {
            return Err(SimilarityError::input("Signature size must not be 0."));
        }
        if self.band_count == 0 {
            return Err(SimilarityError::input("Band count must not be 0."));
        }
        if self.row_count == 0 {
            return Err(SimilarityError::input("Row count must not be 0."));
        }
        if !(self.threshold > 0. && self.threshold < 1.) {
            return Err(SimilarityError::input(format!(
                "Threshold must be in (0, 1), but got {}.",
                self.threshold
            )));
        }
        if self.signature_size > MAX_SIGNATURE_SIZE {
            return Err(SimilarityError::input(format!(
                "Signature size must not exceed {MAX_SIGNATURE_SIZE}, but got {}.",
                self.signature_size
            )));
        }
        let lsh_size = self.lsh_signature_size()?;
        if lsh_size > MAX_SIGNATURE_SIZE {
            return Err(SimilarityError::input(format!(
                "LSH signature size derived from {} bands and threshold {} must not exceed \
                 {MAX_SIGNATURE_SIZE}, but got {lsh_size}.",
                self.band_count, self.threshold
            )));
        }
        if self.worker_threads == 0 {
            return Err(SimilarityError::input("Worker threads must not be 0."));
        }
        Ok(())
    }

    /// Gets the LSH signature length derived from the band count and threshold.
    ///
    /// # Errors
    ///
    /// An error is returned if the length does not fit in `usize`.
    pub fn lsh_signature_size(&self) -> Result<usize> {
        lsh_signature_size(self.band_count, self.threshold).ok_or_else(|| {
            SimilarityError::input(format!(
                "LSH signature size overflows for {} bands and threshold {}.",
                self.band_count, self.threshold
            ))
        })
    }
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self {
            shingle_length: 2,
            universe_size: None,
            signature_size: 100,
            band_count: 20,
            row_count: 5,
            threshold: 0.5,
            hash_method: HashMethod::Murmur3,
            seed: None,
            worker_threads: 2,
        }
    }
}

/// Largest accepted signature length.
pub const MAX_SIGNATURE_SIZE: usize = 1 << 20;

/// Derives the LSH signature length from `b` bands and threshold `s`:
///
/// ```text
/// rows = ceil(ln(1/b) / ln(s)) + 1
/// sig_size = rows * b
/// ```
///
/// A pair with Jaccard index `s` then collides in some band with probability
/// `1 - (1 - s^rows)^b`. `b` must be more than 0 and `s` in `(0, 1)`.
/// `None` is returned if the length does not fit in `usize`.
///
/// # Examples
///
/// ```
/// use pair_similarity::config::lsh_signature_size;
///
/// assert_eq!(lsh_signature_size(20, 0.5), Some(120));
/// assert_eq!(lsh_signature_size(1, 0.5), Some(1));
/// assert_eq!(lsh_signature_size(10_000, 1. - 1e-15), None);
/// ```
pub fn lsh_signature_size(band_count: usize, threshold: f64) -> Option<usize> {
    let b = band_count as f64;
    let rows = ((1. / b).ln() / threshold.ln()).ceil();
    if !(rows >= 0. && rows < usize::MAX as f64) {
        return None;
    }
    (rows as usize).checked_add(1)?.checked_mul(band_count)
}
