use rand::{RngCore, SeedableRng, rngs::StdRng};

/// A bounded random-number source that game logic takes as an
/// injected dependency, so tests can script every roll.
pub trait Dice {
    /// Produces a value in `[0, bound)`.
    fn roll(&mut self, bound: u32) -> u32;
}

/// Production dice backed by a seeded generator.
pub struct SeededDice(StdRng);

impl SeededDice {
    /// Seeds from an explicit seed, or from the process id when none
    /// is given.
    pub fn new(seed: Option<u64>) -> SeededDice {
        let seed = seed.unwrap_or_else(|| std::process::id() as u64);
        log::debug!("dice seeded with {seed}");
        SeededDice(StdRng::seed_from_u64(seed))
    }
}

impl Dice for SeededDice {
    /// The classic `rand() % n` construction, modulo bias included,
    /// so that one seed always replays the same game.
    fn roll(&mut self, bound: u32) -> u32 {
        self.0.next_u32() % bound
    }
}

/// Replays a fixed script of rolls; panics when the script runs dry.
#[cfg(test)]
pub(crate) struct ScriptedDice {
    rolls: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedDice {
    pub(crate) fn new(rolls: &[u32]) -> ScriptedDice {
        ScriptedDice { rolls: rolls.iter().copied().collect() }
    }
}

#[cfg(test)]
impl Dice for ScriptedDice {
    fn roll(&mut self, _bound: u32) -> u32 {
        self.rolls.pop_front().expect("dice script exhausted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_replay() {
        let mut first = SeededDice::new(Some(42));
        let mut second = SeededDice::new(Some(42));
        for _ in 0..100 {
            assert_eq!(first.roll(1000), second.roll(1000));
        }
    }

    #[test]
    fn rolls_respect_bound() {
        let mut dice = SeededDice::new(Some(7));
        for _ in 0..1000 {
            assert!(dice.roll(5) < 5);
        }
    }
}
