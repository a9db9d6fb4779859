//! Seeded hash families producing several hash values per key.
use std::fmt;
use std::str::FromStr;

use fasthash::{city, farm, murmur3, xx};
use serde::{Deserialize, Serialize};

/// A family of hash functions that maps a key to `count` values in `[0, seed_space)`.
///
/// Output `i` always comes from the same function of the family, so two calls with
/// the same key, seed space and count return identical vectors.
pub trait HashFamily {
    /// Hashes `bytes` into `count` values in `[0, seed_space)`.
    ///
    /// `seed_space` must be in `[1, i32::MAX]`.
    fn hash(&self, bytes: &[u8], seed_space: u32, count: usize) -> Vec<u32>;
}

/// Hash algorithms available for hashing shingles into signatures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashMethod {
    /// 32-bit MurmurHash3, re-seeded with its own previous output and
    /// rejection-sampled into the seed space.
    #[default]
    Murmur3,
    /// 128-bit MurmurHash3 whose two halves are combined as `h1 + i*h2`.
    #[serde(rename = "murmur3-km")]
    Murmur3KirschMitzenmacher,
    /// CityHash64 seeded with the output index.
    City64,
    /// FarmHash64 seeded with the output index.
    Farm64,
    /// xxHash64 seeded with the output index.
    Xx64,
}

impl HashMethod {
    /// Gets the name used by [`FromStr`] and [`fmt::Display`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Murmur3 => "murmur3",
            Self::Murmur3KirschMitzenmacher => "murmur3-km",
            Self::City64 => "city64",
            Self::Farm64 => "farm64",
            Self::Xx64 => "xx64",
        }
    }
}

impl fmt::Display for HashMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashMethod {
    type Err = &'static str;
    fn from_str(method: &str) -> Result<Self, Self::Err> {
        match method {
            "murmur3" => Ok(Self::Murmur3),
            "murmur3-km" => Ok(Self::Murmur3KirschMitzenmacher),
            "city64" => Ok(Self::City64),
            "farm64" => Ok(Self::Farm64),
            "xx64" => Ok(Self::Xx64),
            _ => Err("Could not parse a hash method"),
        }
    }
}

impl HashFamily for HashMethod {
    fn hash(&self, bytes: &[u8], seed_space: u32, count: usize) -> Vec<u32> {
        debug_assert!((1..=i32::MAX as u32).contains(&seed_space));
        match self {
            Self::Murmur3 => murmur3_chained(bytes, seed_space, count),
            Self::Murmur3KirschMitzenmacher => {
                let h = murmur3::hash128_with_seed(bytes, 0);
                let h1 = h as u64;
                let h2 = (h >> 64) as u64;
                (0..count as u64)
                    .map(|i| (h1.wrapping_add(i.wrapping_mul(h2)) % u64::from(seed_space)) as u32)
                    .collect()
            }
            Self::City64 => seeded64(bytes, seed_space, count, |b, i| city::hash64_with_seed(b, i)),
            Self::Farm64 => seeded64(bytes, seed_space, count, |b, i| farm::hash64_with_seed(b, i)),
            Self::Xx64 => seeded64(bytes, seed_space, count, |b, i| xx::hash64_with_seed(b, i)),
        }
    }
}

fn murmur3_chained(bytes: &[u8], seed_space: u32, count: usize) -> Vec<u32> {
    let mut hashes = Vec::with_capacity(count);
    let mut seed = 0i32;
    while hashes.len() < count {
        seed = murmur3::hash32_with_seed(bytes, seed as u32) as i32;
        if let Some(h) = rejection_sample(seed, seed_space) {
            hashes.push(h);
        }
    }
    hashes
}

/// Maps a signed 32-bit value uniformly into `[0, m)`, or rejects it.
#[inline(always)]
fn rejection_sample(random: i32, m: u32) -> Option<u32> {
    if random == i32::MIN {
        return None;
    }
    let random = random.unsigned_abs();
    let max = i32::MAX as u32;
    if random > max - max % m {
        None
    } else {
        Some(random % m)
    }
}

#[inline(always)]
fn seeded64(bytes: &[u8], seed_space: u32, count: usize, f: fn(&[u8], u64) -> u64) -> Vec<u32> {
    (0..count as u64)
        .map(|i| (f(bytes, i) % u64::from(seed_space)) as u32)
        .collect()
}
