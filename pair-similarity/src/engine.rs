//! Similarity engines running the shingle, signature, band and exact stages.
use std::hash::Hash;
use std::sync::Arc;

use hashbrown::HashSet;
use lsh::{BandHasher, SetMinHasher, ShingleMinHasher, Signature};
use num_traits::PrimInt;
use rayon::ThreadPool;

use crate::config::{Algorithm, SimilarityOptions};
use crate::errors::Result;
use crate::executor::{with_executor, Executor, Stage};
use crate::jaccard::{set_jaccard, shingle_jaccard};
use crate::shingling::{Shingler, StopFilter};

#[derive(Clone, Debug)]
enum Engine {
    Jaccard,
    MinHash {
        hasher: ShingleMinHasher,
    },
    Lsh {
        hasher: ShingleMinHasher,
        bands: BandHasher,
    },
}

/// Comparator of two strings or two integer sets under one algorithm.
///
/// Options are validated and the hash functions prepared at construction,
/// so one instance serves any number of comparisons, also concurrently.
///
/// # Examples
///
/// ```
/// use pair_similarity::{Algorithm, Similarity, SimilarityOptions};
///
/// let options = SimilarityOptions::new().with_shingle_length(3);
/// let similarity = Similarity::new(Algorithm::Jaccard, options).unwrap();
///
/// let s1 = "is the of the 100-eyed giant in Greek mythology.";
/// let s3 = "Argus Panoptes is the name of the 100-eyed giant in Norse mythology.";
/// assert_eq!(similarity.of_strings(s1, s1).unwrap(), 1.0);
/// assert_eq!(similarity.of_strings(s1, s3).unwrap(), 0.6825396825396826);
/// ```
#[derive(Clone, Debug)]
pub struct Similarity {
    algorithm: Algorithm,
    options: SimilarityOptions,
    engine: Engine,
    shingler: Shingler,
    set_hasher: Option<SetMinHasher>,
    pool: Option<Arc<ThreadPool>>,
}

impl Similarity {
    /// Creates an instance.
    ///
    /// # Errors
    ///
    /// An error is returned if the options are invalid.
    pub fn new(algorithm: Algorithm, options: SimilarityOptions) -> Result<Self> {
        options.validate()?;
        let engine = match algorithm {
            Algorithm::Jaccard => Engine::Jaccard,
            Algorithm::MinHash => Engine::MinHash {
                hasher: ShingleMinHasher::new(options.hash_method, options.signature_size)?,
            },
            Algorithm::Lsh => Engine::Lsh {
                hasher: ShingleMinHasher::new(options.hash_method, options.lsh_signature_size()?)?,
                bands: BandHasher::new(options.band_count, options.row_count)?,
            },
        };
        let shingler = Shingler::new(options.shingle_length)?;
        let set_hasher = match (options.universe_size, &engine) {
            (Some(n), Engine::MinHash { hasher } | Engine::Lsh { hasher, .. }) => {
                Some(build_set_hasher(n, hasher.sig_size(), options.seed)?)
            }
            _ => None,
        };
        tracing::debug!(
            %algorithm,
            shingle_length = options.shingle_length,
            sig_size = engine.sig_size(),
            "similarity_created"
        );
        Ok(Self {
            algorithm,
            options,
            engine,
            shingler,
            set_hasher,
            pool: None,
        })
    }

    /// Runs all stages on `pool` instead of a pool created for each call.
    pub fn with_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Omits the shingles for which `stop_filter` returns true.
    pub fn with_stop_filter(mut self, stop_filter: StopFilter) -> Self {
        self.shingler = self.shingler.with_stop_filter(stop_filter);
        self
    }

    /// Gets the algorithm.
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Gets the options.
    pub const fn options(&self) -> &SimilarityOptions {
        &self.options
    }

    /// Computes the similarity of two strings in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// An error is returned if a stage fails.
    pub fn of_strings(&self, a: &str, b: &str) -> Result<f64> {
        tracing::debug!(
            algorithm = %self.algorithm,
            len_a = a.len(),
            len_b = b.len(),
            "compare_strings"
        );
        with_executor(self.pool.as_deref(), self.options.worker_threads, |exec| {
            let (xa, xb) = exec.both(
                Stage::Shingle,
                || self.shingler.shingles(a),
                || self.shingler.shingles(b),
            )?;
            let score = match &self.engine {
                Engine::Jaccard => shingle_jaccard(&xa, &xb),
                Engine::MinHash { hasher } | Engine::Lsh { hasher, .. } => {
                    let (sa, sb) = exec.both(
                        Stage::Signature,
                        || hasher.signature(&xa),
                        || hasher.signature(&xb),
                    )?;
                    self.score(exec, &sa, &sb, || shingle_jaccard(&xa, &xb))?
                }
            };
            tracing::debug!(score, "compare_done");
            Ok(score)
        })
    }

    /// Computes the similarity of two integer collections in `[0, 1]`.
    ///
    /// Duplicated elements are ignored. Two empty collections score 1 under
    /// every algorithm. When [`SimilarityOptions::universe_size`] is `None`,
    /// the universal hash functions are drawn for this call over the size of
    /// the union of both collections.
    ///
    /// # Errors
    ///
    /// An error is returned if a stage fails.
    pub fn of_sets<T>(&self, a: &[T], b: &[T]) -> Result<f64>
    where
        T: PrimInt + Hash + Send + Sync,
    {
        tracing::debug!(
            algorithm = %self.algorithm,
            len_a = a.len(),
            len_b = b.len(),
            "compare_sets"
        );
        if a.is_empty() && b.is_empty() {
            tracing::debug!("empty_union");
            return Ok(1.);
        }
        let sig_size = match &self.engine {
            Engine::Jaccard => return Ok(set_jaccard(a, b)),
            Engine::MinHash { hasher } | Engine::Lsh { hasher, .. } => hasher.sig_size(),
        };
        let derived;
        let set_hasher = match &self.set_hasher {
            Some(set_hasher) => set_hasher,
            None => {
                let n = union_size(a, b).max(2);
                tracing::debug!(universe_size = n, "universe_derived");
                derived = build_set_hasher(n, sig_size, self.options.seed)?;
                &derived
            }
        };
        with_executor(self.pool.as_deref(), self.options.worker_threads, |exec| {
            let (sa, sb) = exec.both(
                Stage::Signature,
                || set_hasher.signature(a),
                || set_hasher.signature(b),
            )?;
            let score = self.score(exec, &sa, &sb, || set_jaccard(a, b))?;
            tracing::debug!(score, "compare_done");
            Ok(score)
        })
    }

    // Turns two signatures into the score of a MinHash or LSH engine.
    fn score<F>(&self, exec: Executor<'_>, sa: &Signature, sb: &Signature, exact: F) -> Result<f64>
    where
        F: FnOnce() -> f64 + Send,
    {
        match &self.engine {
            Engine::Jaccard => Ok(exact()),
            Engine::MinHash { .. } => Ok(lsh::signature_index(sa, sb)),
            Engine::Lsh { bands, .. } => {
                let (ba, bb) = exec.both(Stage::Band, || bands.bands(sa), || bands.bands(sb))?;
                let candidate = lsh::is_candidate_pair(&ba?, &bb?);
                tracing::debug!(candidate, "lsh_decision");
                if candidate {
                    exec.run(Stage::Exact, exact)
                } else {
                    Ok(0.)
                }
            }
        }
    }
}

impl Engine {
    fn sig_size(&self) -> usize {
        match self {
            Self::Jaccard => 0,
            Self::MinHash { hasher } | Self::Lsh { hasher, .. } => hasher.sig_size(),
        }
    }
}

fn build_set_hasher(n: usize, sig_size: usize, seed: Option<u64>) -> Result<SetMinHasher> {
    let hasher = match seed {
        Some(seed) => SetMinHasher::with_seed(n, sig_size, seed)?,
        None => SetMinHasher::new(n, sig_size)?,
    };
    Ok(hasher)
}

fn union_size<T>(a: &[T], b: &[T]) -> usize
where
    T: Hash + Eq,
{
    a.iter().chain(b).collect::<HashSet<_>>().len()
}

/// Computes the similarity of two strings with a one-off [`Similarity`].
///
/// # Errors
///
/// An error is returned if the options are invalid or a stage fails.
pub fn similarity_of_strings(
    a: &str,
    b: &str,
    algorithm: Algorithm,
    options: &SimilarityOptions,
) -> Result<f64> {
    Similarity::new(algorithm, options.clone())?.of_strings(a, b)
}

/// Computes the similarity of two integer collections with a one-off [`Similarity`].
///
/// # Errors
///
/// An error is returned if the options are invalid or a stage fails.
pub fn similarity_of_sets<T>(
    a: &[T],
    b: &[T],
    algorithm: Algorithm,
    options: &SimilarityOptions,
) -> Result<f64>
where
    T: PrimInt + Hash + Send + Sync,
{
    Similarity::new(algorithm, options.clone())?.of_sets(a, b)
}
