//! MinHash signatures, universal hashing and LSH banding for comparing pairs
//! of shingle sequences or integer sets.
#![deny(missing_docs)]

pub mod bands;
pub mod errors;
pub mod hash;
pub mod minhash;

use std::hash::Hash;

use hashbrown::HashSet;

pub use bands::BandHasher;
pub use errors::LshError;
pub use hash::{HashFamily, HashMethod};
pub use minhash::{SetMinHasher, ShingleMinHasher};

/// Prime shared by the universal hash functions and the band folding.
pub const LARGE_PRIME: i64 = 433494437;

/// Initial value of every signature slot.
pub const SIGNATURE_INIT: i64 = i32::MAX as i64;

/// MinHash signature, one minimum per hash function.
pub type Signature = Vec<i64>;

/// Band bucket values of a signature.
pub type Bands = Vec<i64>;

/// Computes the Jaccard index of two collections under set semantics,
/// or `None` if both are empty.
///
/// # Examples
///
/// ```
/// use lsh::jaccard_index;
///
/// let x = vec![1, 2, 4];
/// let y = vec![1, 2, 5, 7];
/// assert_eq!(jaccard_index(x, y), Some(0.4));
/// ```
pub fn jaccard_index<I, T>(lhs: I, rhs: I) -> Option<f64>
where
    I: IntoIterator<Item = T>,
    T: Hash + Eq,
{
    let a = HashSet::<T>::from_iter(lhs);
    let b = HashSet::<T>::from_iter(rhs);
    let union = a.union(&b).count();
    if union == 0 {
        return None;
    }
    Some(a.intersection(&b).count() as f64 / union as f64)
}

/// Computes the fraction of signature slots holding equal values.
///
/// An empty pair scores 1.
///
/// # Panics
///
/// It panics if the signatures have different lengths.
pub fn signature_index(lhs: &[i64], rhs: &[i64]) -> f64 {
    assert_eq!(lhs.len(), rhs.len());
    if lhs.is_empty() {
        return 1.;
    }
    let matches = lhs.iter().zip(rhs).filter(|(x, y)| x == y).count();
    matches as f64 / lhs.len() as f64
}

/// Checks if two band vectors collide in at least one band.
pub fn is_candidate_pair(lhs: &[i64], rhs: &[i64]) -> bool {
    lhs.iter().zip(rhs).any(|(x, y)| x == y)
}
