use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the bag's random number generator. Equal seeds produce
/// equal piece sequences, which makes bag behavior reproducible in tests and
/// lets players replay a run. Serializes as a 32-character hex string, and
/// parses from the same format (e.g. a `--seed` command line argument).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagSeed([u8; 16]);

impl fmt::Display for BagSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Error parsing a [`BagSeed`] from text.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("bag seed must be a 32-character hex string")]
pub struct ParseBagSeedError;

impl FromStr for BagSeed {
    type Err = ParseBagSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseBagSeedError);
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseBagSeedError)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BagSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BagSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid bag seed: {hex_str}")))
    }
}

/// Allows generating random `BagSeed` values with `rng.random()`.
impl Distribution<BagSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BagSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BagSeed(seed)
    }
}

/// 7-bag piece randomizer.
///
/// The bag holds one uniformly shuffled permutation of all 7 piece kinds and
/// is consumed to exhaustion before it is refilled with a fresh permutation,
/// so no kind is drawn twice before all other 6 have been drawn.
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    bag: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBag {
    /// Creates a bag with a random seed.
    ///
    /// For deterministic sequences use [`Self::with_seed`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but seeded for a reproducible piece sequence.
    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            bag: ArrayVec::new(),
        }
    }

    fn refill(&mut self) {
        debug_assert!(self.bag.is_empty());
        let mut kinds = PieceKind::ALL;
        kinds.shuffle(&mut self.rng);
        self.bag.extend(kinds);
    }

    /// Draws the next piece kind, refilling the bag first if it is empty.
    pub fn draw(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        self.bag.pop().expect("bag was just refilled")
    }
}
