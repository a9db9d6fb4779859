//! Extraction of character k-shingles.
use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::errors::{Result, SimilarityError};

/// Predicate telling which shingles to omit.
pub type StopFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Contiguous substring of `k` characters, borrowed from the input text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shingle<'a> {
    /// Character offset of the first character.
    pub start: usize,
    /// Text of the shingle.
    pub text: &'a str,
}

impl AsRef<str> for Shingle<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

/// Iterator over the shingles of a text in left-to-right order.
pub struct ShingleIter<'a> {
    text: &'a str,
    // Byte offsets of character boundaries, including text.len().
    bounds: Vec<usize>,
    window_size: usize,
    position: usize,
}

impl<'a> ShingleIter<'a> {
    /// Creates an iterator of shingles of `window_size` characters.
    ///
    /// # Panics
    ///
    /// It panics if `window_size` is 0. [`Shingler::new`] checks it instead.
    pub fn new(text: &'a str, window_size: usize) -> Self {
        assert!(window_size >= 1);
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        Self {
            text,
            bounds,
            window_size,
            position: 0,
        }
    }
}

impl<'a> Iterator for ShingleIter<'a> {
    type Item = Shingle<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.position + self.window_size;
        if end >= self.bounds.len() {
            return None;
        }
        let shingle = Shingle {
            start: self.position,
            text: &self.text[self.bounds[self.position]..self.bounds[end]],
        };
        self.position += 1;
        Some(shingle)
    }
}

/// Shingle extractor with an optional stop filter.
#[derive(Clone)]
pub struct Shingler {
    k: usize,
    stop_filter: Option<StopFilter>,
}

impl Shingler {
    /// Creates an extractor of `k`-character shingles (must be more than 0).
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(SimilarityError::input("Shingle length must not be 0."));
        }
        Ok(Self {
            k,
            stop_filter: None,
        })
    }

    /// Omits the shingles for which `stop_filter` returns true.
    pub fn with_stop_filter(mut self, stop_filter: StopFilter) -> Self {
        self.stop_filter = Some(stop_filter);
        self
    }

    /// Gets the shingle length.
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Extracts the shingles of `text`, keeping duplicates and scan order.
    ///
    /// A text shorter than `k` characters has no shingles.
    pub fn shingles<'a>(&self, text: &'a str) -> Vec<Shingle<'a>> {
        let iter = ShingleIter::new(text, self.k);
        match &self.stop_filter {
            Some(stop) => iter.filter(|s| !stop(s.text)).collect(),
            None => iter.collect(),
        }
    }
}

impl fmt::Debug for Shingler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Shingler")
            .field("k", &self.k)
            .field("stop_filter", &self.stop_filter.is_some())
            .finish()
    }
}

/// Counts the occurrences of each distinct shingle, in the order the shingles
/// are first encountered.
pub fn occurrences<S>(shingles: &[S]) -> Vec<usize>
where
    S: AsRef<str>,
{
    let mut positions = HashMap::<&str, usize>::with_capacity(shingles.len());
    let mut counts = vec![];
    for s in shingles {
        let pos = *positions.entry(s.as_ref()).or_insert_with(|| {
            counts.push(0);
            counts.len() - 1
        });
        counts[pos] += 1;
    }
    counts
}
