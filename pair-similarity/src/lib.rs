//! Jaccard, MinHash and LSH similarity between two texts or two integer sets.
//!
//! Texts are compared through their character k-shingles and integer
//! collections through their elements. Three algorithms are provided:
//!
//!  - [`Algorithm::Jaccard`] computes the exact Jaccard index.
//!  - [`Algorithm::MinHash`] estimates it as the fraction of equal MinHash signature slots.
//!  - [`Algorithm::Lsh`] returns the exact Jaccard index of pairs colliding in some
//!    LSH band, and 0 for the others.
//!
//! Per comparison, the two inputs go through each stage in parallel on a
//! [`rayon`] worker pool, either injected with [`Similarity::with_pool`] or
//! created and torn down within the call.
//!
//! # Examples
//!
//! ```
//! use pair_similarity::{similarity_of_sets, Algorithm, SimilarityOptions};
//!
//! let c1 = [0, 1, 2, 3, 4, 5, 6, 7, 8];
//! let c3 = [-1, 1, 2, 3, 4, 5, 6, 7, 8, 9];
//!
//! let options = SimilarityOptions::default();
//! let score = similarity_of_sets(&c1, &c3, Algorithm::Jaccard, &options).unwrap();
//! assert_eq!(score, 0.7272727272727273);
//!
//! let score = similarity_of_sets(&c1, &c3, Algorithm::Lsh, &options).unwrap();
//! assert!(score == 0. || score == 0.7272727272727273);
//! ```
#![deny(missing_docs)]

pub mod config;
pub mod engine;
pub mod errors;
pub mod executor;
pub mod jaccard;
pub mod shingling;

pub use config::{Algorithm, SimilarityOptions};
pub use engine::{similarity_of_sets, similarity_of_strings, Similarity};
pub use errors::{Result, SimilarityError};
pub use lsh::HashMethod;
pub use shingling::StopFilter;
