//! MinHash signature generators for shingle sequences and integer sets.
use num_traits::PrimInt;
use rand::rngs::OsRng;
use rand::{Rng, SeedableRng};

use crate::errors::{LshError, Result};
use crate::hash::{HashFamily, HashMethod};
use crate::{Signature, LARGE_PRIME, SIGNATURE_INIT};

/// Seed space of the hash family used for shingles.
const SHINGLE_SEED_SPACE: u32 = i32::MAX as u32;

/// Generator of MinHash signatures for shingle sequences,
/// using `sig_size` functions of a seeded hash family.
#[derive(Clone, Debug)]
pub struct ShingleMinHasher<H = HashMethod> {
    family: H,
    sig_size: usize,
}

impl<H> ShingleMinHasher<H>
where
    H: HashFamily,
{
    /// Creates an instance.
    ///
    /// # Arguments
    ///
    /// * `family` - Hash family whose `sig_size` outputs fill the signature slots.
    /// * `sig_size` - Length of signatures (must be more than 0).
    pub fn new(family: H, sig_size: usize) -> Result<Self> {
        if sig_size == 0 {
            return Err(LshError::input("Signature size must not be 0."));
        }
        Ok(Self { family, sig_size })
    }

    /// Gets the length of produced signatures.
    pub const fn sig_size(&self) -> usize {
        self.sig_size
    }

    /// Computes the signature of a shingle sequence.
    ///
    /// Slot `i` holds the minimum of the `i`-th hash output over all shingles,
    /// or [`SIGNATURE_INIT`] if the sequence is empty.
    pub fn signature<S>(&self, shingles: &[S]) -> Signature
    where
        S: AsRef<str>,
    {
        let mut texts: Vec<&str> = shingles.iter().map(|s| s.as_ref()).collect();
        texts.sort_unstable();

        let mut sig = vec![SIGNATURE_INIT; self.sig_size];
        for text in texts {
            let hashes = self
                .family
                .hash(text.as_bytes(), SHINGLE_SEED_SPACE, self.sig_size);
            for (slot, h) in sig.iter_mut().zip(hashes) {
                *slot = (*slot).min(i64::from(h));
            }
        }
        sig
    }
}

/// Generator of MinHash signatures for integer sets,
/// using `sig_size` universal hash functions `((a*x + b) mod P) mod n`.
///
/// The coefficients are drawn once at construction and only read afterwards,
/// so a single instance can be shared by concurrent tasks.
#[derive(Clone, Debug)]
pub struct SetMinHasher {
    n: i64,
    a: Vec<i64>,
    b: Vec<i64>,
}

impl SetMinHasher {
    /// Creates an instance whose coefficients are drawn from the operating system's
    /// cryptographically secure generator.
    ///
    /// # Arguments
    ///
    /// * `n` - Number of distinct elements in the compared sets (must be more than 1).
    /// * `sig_size` - Length of signatures (must be more than 0).
    pub fn new(n: usize, sig_size: usize) -> Result<Self> {
        Self::with_rng(n, sig_size, &mut OsRng)
    }

    /// Creates an instance whose coefficients are reproducible from `seed`.
    pub fn with_seed(n: usize, sig_size: usize, seed: u64) -> Result<Self> {
        let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(seed);
        Self::with_rng(n, sig_size, &mut rng)
    }

    /// Creates an instance whose coefficients are drawn from `rng`.
    pub fn with_rng<R>(n: usize, sig_size: usize, rng: &mut R) -> Result<Self>
    where
        R: Rng,
    {
        if n <= 1 {
            return Err(LshError::input(format!(
                "Number of elements must be more than 1, but got {n}."
            )));
        }
        if sig_size == 0 {
            return Err(LshError::input("Signature size must not be 0."));
        }
        let n = i64::try_from(n)
            .map_err(|_| LshError::input("Number of elements must fit in 64 bits."))?;
        let a = (0..sig_size).map(|_| rng.gen_range(1..n)).collect();
        let b = (0..sig_size).map(|_| rng.gen_range(0..n)).collect();
        Ok(Self { n, a, b })
    }

    /// Gets the length of produced signatures.
    pub fn sig_size(&self) -> usize {
        self.a.len()
    }

    /// Gets the number of elements the hash functions map into.
    pub const fn num_elements(&self) -> i64 {
        self.n
    }

    /// Computes the signature of an integer collection.
    ///
    /// Slot `i` holds the minimum of `h_i(x)` over all elements,
    /// or [`SIGNATURE_INIT`] if the collection is empty.
    pub fn signature<T>(&self, set: &[T]) -> Signature
    where
        T: PrimInt,
    {
        let mut elems: Vec<i64> = set.iter().map(|x| to_i64(*x)).collect();
        elems.sort_unstable();

        let mut sig = vec![SIGNATURE_INIT; self.sig_size()];
        for x in elems {
            for (i, slot) in sig.iter_mut().enumerate() {
                *slot = (*slot).min(self.universal_hash(i, x));
            }
        }
        sig
    }

    /// `%` truncates toward zero, so negative elements can yield negative values.
    #[inline(always)]
    fn universal_hash(&self, i: usize, x: i64) -> i64 {
        self.a[i].wrapping_mul(x).wrapping_add(self.b[i]) % LARGE_PRIME % self.n
    }
}

/// Converts an integer element, wrapping values outside the 64-bit signed range.
#[inline(always)]
fn to_i64<T>(x: T) -> i64
where
    T: PrimInt,
{
    x.to_i64()
        .or_else(|| x.to_u64().map(|u| u as i64))
        .unwrap_or_default()
}
