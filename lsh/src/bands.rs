//! Folding of MinHash signatures into LSH band buckets.
use crate::errors::{LshError, Result};
use crate::{Bands, LARGE_PRIME};

/// Folds signatures into `num_bands` bucket values modulo `num_rows`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandHasher {
    num_bands: usize,
    num_rows: i64,
}

impl BandHasher {
    /// Creates an instance.
    ///
    /// # Arguments
    ///
    /// * `num_bands` - Number of bands (must be more than 0).
    /// * `num_rows` - Modulus of the bucket values (must be more than 0).
    pub fn new(num_bands: usize, num_rows: usize) -> Result<Self> {
        if num_bands == 0 {
            return Err(LshError::input("Number of bands must not be 0."));
        }
        if num_rows == 0 {
            return Err(LshError::input("Number of rows must not be 0."));
        }
        let num_rows = i64::try_from(num_rows)
            .map_err(|_| LshError::input("Number of rows must fit in 64 bits."))?;
        Ok(Self {
            num_bands,
            num_rows,
        })
    }

    /// Gets the number of bands.
    pub const fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Computes the bands of a signature.
    ///
    /// Each band covers `signature.len() / num_bands` consecutive slots, and the
    /// last band also absorbs the remaining slots.
    pub fn bands(&self, signature: &[i64]) -> Result<Bands> {
        let rows_per_band = signature.len() / self.num_bands;
        if rows_per_band == 0 {
            return Err(LshError::input(format!(
                "Signature of length {} cannot be split into {} bands.",
                signature.len(),
                self.num_bands
            )));
        }
        let mut bands: Bands = vec![0; self.num_bands];
        for (i, &value) in signature.iter().enumerate() {
            let band = (i / rows_per_band).min(self.num_bands - 1);
            bands[band] = bands[band]
                .wrapping_add(value.wrapping_mul(LARGE_PRIME))
                % self.num_rows;
        }
        Ok(bands)
    }
}
