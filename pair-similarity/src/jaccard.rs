//! Exact Jaccard indexes of shingle sequences and integer sets.
use std::hash::Hash;

use crate::shingling::occurrences;

/// Computes the Jaccard index of two shingle sequences from their occurrence vectors.
///
/// The vectors are compared position by position: a position counts toward the
/// union if either count is nonzero and toward the intersection if both are.
/// Position `i` holds the `i`-th distinct shingle *of each text*, so the result
/// equals the multiset Jaccard index only when both texts discover their
/// shingles in the same order, as near-duplicates do. Two empty sequences
/// score 1.
pub fn shingle_jaccard<S>(lhs: &[S], rhs: &[S]) -> f64
where
    S: AsRef<str>,
{
    let x = occurrences(lhs);
    let y = occurrences(rhs);
    let mut intersection = 0;
    let mut union = 0;
    for i in 0..x.len().max(y.len()) {
        let cx = x.get(i).copied().unwrap_or(0);
        let cy = y.get(i).copied().unwrap_or(0);
        if cx != 0 || cy != 0 {
            union += 1;
        }
        if cx != 0 && cy != 0 {
            intersection += 1;
        }
    }
    ratio(intersection, union)
}

/// Computes the Jaccard index of two integer collections under set semantics.
///
/// Two empty collections score 1.
pub fn set_jaccard<T>(lhs: &[T], rhs: &[T]) -> f64
where
    T: Hash + Eq,
{
    lsh::jaccard_index(lhs, rhs).unwrap_or(1.)
}

fn ratio(intersection: usize, union: usize) -> f64 {
    if union == 0 {
        1.
    } else {
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shingling::Shingler;

    const S1: &str = "is the of the 100-eyed giant in Greek mythology.";
    const S3: &str = "Argus Panoptes is the name of the 100-eyed giant in Norse mythology.";
    const S4: &str = "is the of the 100-eyed giant in Greek mythology .";

    fn jaccard(a: &str, b: &str, k: usize) -> f64 {
        let shingler = Shingler::new(k).unwrap();
        shingle_jaccard(&shingler.shingles(a), &shingler.shingles(b))
    }

    #[test]
    fn test_strings() {
        assert_eq!(jaccard(S1, S1, 3), 1.0);
        assert_eq!(jaccard(S1, S3, 3), 0.6825396825396826);
        assert_eq!(jaccard(S1, S4, 3), 0.9772727272727273);
    }

    #[test]
    fn test_positional() {
        // Same distinct shingles discovered in a different order still align.
        assert_eq!(shingle_jaccard(&["ab", "cd"], &["cd", "ab"]), 1.0);
        // 2 distinct vs 3 distinct: positions 0 and 1 shared, 2 only on the right.
        assert_eq!(shingle_jaccard(&["ab", "ab", "cd"], &["xy", "zw", "uv"]), 2. / 3.);
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(jaccard("a", "b", 2), 1.0);
        assert_eq!(jaccard("a", "bcd", 2), 0.0);
    }

    #[test]
    fn test_sets() {
        let c1 = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        let c3 = [-1, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let c4 = [18, 1, 2, 3, 4, 10, 6, 7, 8];
        assert_eq!(set_jaccard(&c1, &c1), 1.0);
        assert_eq!(set_jaccard(&c1, &c3), 0.7272727272727273);
        assert_eq!(set_jaccard(&c1, &c4), 0.6363636363636364);
        assert_eq!(set_jaccard(&c3, &c1), 0.7272727272727273);
    }

    #[test]
    fn test_empty_sets() {
        let empty: [i32; 0] = [];
        assert_eq!(set_jaccard(&empty, &empty), 1.0);
        assert_eq!(set_jaccard(&empty, &[1]), 0.0);
    }
}
