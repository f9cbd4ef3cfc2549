//! RNG module - piece kind selection
//!
//! The simulation asks a [`PieceSource`] for the next kind whenever it spawns.
//! Three sources are provided:
//!
//! - [`UniformSource`]: independent uniform draws (the classic behaviour)
//! - [`BagSource`]: "7-bag" draws, every kind once per bag of seven
//! - [`ScriptedSource`]: a fixed cycle, for tests and replays
//!
//! [`Randomizer`] picks between the two random sources at runtime.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Supplies the kind of each newly spawned piece
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

impl<S: PieceSource + ?Sized> PieceSource for &mut S {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Uniform random choice among the 7 kinds, independent draws
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: StdRng,
}

impl UniformSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagSource {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    rng: StdRng,
}

impl BagSource {
    pub fn new(seed: u64) -> Self {
        Self {
            bag: PieceKind::ALL,
            // Force a shuffle on the first draw
            bag_index: 7,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.bag_index = 0;
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index.min(7)..]
    }
}

impl PieceSource for BagSource {
    fn next_kind(&mut self) -> PieceKind {
        if self.bag_index >= 7 {
            self.refill_bag();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }
}

/// Repeats a fixed sequence of kinds forever
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl ScriptedSource {
    /// An empty sequence falls back to cycling through every kind in table order.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds = PieceKind::ALL.to_vec();
        }
        Self { kinds, next: 0 }
    }

    /// Always the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.next % self.kinds.len()];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

/// Which random source a game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomizerKind {
    #[default]
    Uniform,
    Bag,
}

impl RandomizerKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniform" | "random" => Some(RandomizerKind::Uniform),
            "bag" | "bag7" | "7bag" => Some(RandomizerKind::Bag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RandomizerKind::Uniform => "uniform",
            RandomizerKind::Bag => "bag",
        }
    }
}

/// Runtime-selected random source
#[derive(Debug, Clone)]
pub enum Randomizer {
    Uniform(UniformSource),
    Bag(BagSource),
}

impl Randomizer {
    pub fn new(kind: RandomizerKind, seed: u64) -> Self {
        match kind {
            RandomizerKind::Uniform => Randomizer::Uniform(UniformSource::new(seed)),
            RandomizerKind::Bag => Randomizer::Bag(BagSource::new(seed)),
        }
    }

    pub fn kind(&self) -> RandomizerKind {
        match self {
            Randomizer::Uniform(_) => RandomizerKind::Uniform,
            Randomizer::Bag(_) => RandomizerKind::Bag,
        }
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(RandomizerKind::Uniform, 1)
    }
}

impl PieceSource for Randomizer {
    fn next_kind(&mut self) -> PieceKind {
        match self {
            Randomizer::Uniform(s) => s.next_kind(),
            Randomizer::Bag(s) => s.next_kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_deterministic() {
        let mut a = UniformSource::new(12345);
        let mut b = UniformSource::new(12345);

        for _ in 0..100 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_uniform_draws_every_kind() {
        let mut source = UniformSource::new(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[source.next_kind().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {seen:?}");
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut source = BagSource::new(1);

        let mut drawn: Vec<PieceKind> = (0..7).map(|_| source.next_kind()).collect();
        drawn.sort_by_key(|k| k.index());
        assert_eq!(drawn, PieceKind::ALL.to_vec());
        assert!(source.remaining().is_empty());
    }

    #[test]
    fn test_bag_auto_refill() {
        let mut source = BagSource::new(1);
        for _ in 0..7 {
            source.next_kind();
        }
        source.next_kind();
        assert_eq!(source.remaining().len(), 6);
    }

    #[test]
    fn test_scripted_cycles() {
        let mut source = ScriptedSource::new([PieceKind::O, PieceKind::T]);
        assert_eq!(source.next_kind(), PieceKind::O);
        assert_eq!(source.next_kind(), PieceKind::T);
        assert_eq!(source.next_kind(), PieceKind::O);
    }

    #[test]
    fn test_scripted_empty_falls_back_to_all_kinds() {
        let mut source = ScriptedSource::new(Vec::new());
        let drawn: Vec<PieceKind> = (0..7).map(|_| source.next_kind()).collect();
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }

    #[test]
    fn test_mut_ref_is_a_source() {
        fn draw<S: PieceSource>(mut source: S) -> PieceKind {
            source.next_kind()
        }

        let mut inner = ScriptedSource::new([PieceKind::Z, PieceKind::S]);
        assert_eq!(draw(&mut inner), PieceKind::Z);
        assert_eq!(draw(&mut inner), PieceKind::S);
    }

    #[test]
    fn test_randomizer_kind_parsing() {
        assert_eq!(RandomizerKind::from_str("Bag"), Some(RandomizerKind::Bag));
        assert_eq!(RandomizerKind::from_str("uniform"), Some(RandomizerKind::Uniform));
        assert_eq!(RandomizerKind::from_str("nope"), None);
        assert_eq!(Randomizer::new(RandomizerKind::Bag, 3).kind(), RandomizerKind::Bag);
    }
}
