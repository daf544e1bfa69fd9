use crate::nuggets::prelude::*;

/// The ordered gold piles in play. Piles are consumed in index order
/// as `*` markers are stepped on, independent of which marker it was;
/// a marker can therefore be worth zero nuggets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoldPiles {
    values: Vec<u32>,
    found: usize,
    remaining: u32,
}

impl GoldPiles {
    /// Deals [`GOLD_TOTAL`] nuggets into a rolled number of piles.
    ///
    /// The pile count is `GOLD_MIN_PILES + roll(GOLD_MAX_PILES −
    /// GOLD_MIN_PILES)`; nuggets are then added round-robin in
    /// `roll(5)` increments until the running sum reaches the total,
    /// with the final increment truncated to land exactly on it.
    pub fn distribute(dice: &mut dyn Dice) -> GoldPiles {
        let count = GOLD_MIN_PILES + dice.roll((GOLD_MAX_PILES - GOLD_MIN_PILES) as u32) as usize;
        let mut values = vec![0u32; count];

        let mut dealt = 0;
        while dealt < GOLD_TOTAL {
            for value in values.iter_mut() {
                let mut drop = dice.roll(5);
                if dealt + drop > GOLD_TOTAL {
                    drop = GOLD_TOTAL - dealt;
                }
                *value += drop;
                dealt += drop;
                if dealt == GOLD_TOTAL {
                    break;
                }
            }
        }

        GoldPiles::from_values(values)
    }

    /// Wraps an explicit pile sequence.
    pub fn from_values(values: Vec<u32>) -> GoldPiles {
        let remaining = values.iter().sum();
        GoldPiles { values, found: 0, remaining }
    }

    /// Claims the next unclaimed pile, in index order.
    pub fn claim_next(&mut self) -> u32 {
        let Some(&value) = self.values.get(self.found) else {
            log::warn!("pile claimed with every pile already found");
            return 0;
        };
        self.found += 1;
        self.remaining -= value;
        value
    }

    /// Number of piles, i.e. the number of `*` markers on the map.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Number of piles claimed so far.
    pub fn found(&self) -> usize {
        self.found
    }

    /// Nuggets still unclaimed.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nuggets::dice::{ScriptedDice, SeededDice};

    #[test]
    fn distribution_lands_on_total() {
        let mut dice = SeededDice::new(Some(99));
        let piles = GoldPiles::distribute(&mut dice);
        assert_eq!(piles.values.iter().sum::<u32>(), GOLD_TOTAL);
        assert_eq!(piles.remaining(), GOLD_TOTAL);
        assert!(piles.count() >= GOLD_MIN_PILES);
        assert!(piles.count() < GOLD_MAX_PILES);
    }

    #[test]
    fn distribution_is_deterministic() {
        let first = GoldPiles::distribute(&mut SeededDice::new(Some(7)));
        let second = GoldPiles::distribute(&mut SeededDice::new(Some(7)));
        assert_eq!(first, second);
    }

    #[test]
    fn round_robin_dealing() {
        // ten piles, every increment 4: seven full rounds deal 280,
        // then five more increments land exactly on 300.
        let mut rolls = vec![0];
        rolls.extend(std::iter::repeat(4).take(75));
        let piles = GoldPiles::distribute(&mut ScriptedDice::new(&rolls));

        assert_eq!(piles.count(), 10);
        assert_eq!(piles.values[..5], [32, 32, 32, 32, 32]);
        assert_eq!(piles.values[5..], [28, 28, 28, 28, 28]);
    }

    #[test]
    fn final_increment_truncates() {
        // ten piles of 4s leave 280 dealt after seven rounds; rolling
        // 3s afterwards would overshoot at the seventh pile, so its
        // increment is clipped to 2.
        let mut rolls = vec![0];
        rolls.extend(std::iter::repeat(4).take(70));
        rolls.extend(std::iter::repeat(3).take(7));
        let piles = GoldPiles::distribute(&mut ScriptedDice::new(&rolls));

        assert_eq!(piles.values.iter().sum::<u32>(), GOLD_TOTAL);
        assert_eq!(piles.values[5], 28 + 3);
        assert_eq!(piles.values[6], 28 + 2);
        assert_eq!(piles.values[7], 28);
    }

    #[test]
    fn claims_run_in_index_order() {
        let mut piles = GoldPiles::from_values(vec![10, 0, 290]);
        assert_eq!(piles.remaining(), 300);

        assert_eq!(piles.claim_next(), 10);
        assert_eq!(piles.claim_next(), 0);
        assert_eq!(piles.found(), 2);
        assert_eq!(piles.remaining(), 290);

        assert_eq!(piles.claim_next(), 290);
        assert_eq!(piles.remaining(), 0);

        // exhausted piles claim nothing
        assert_eq!(piles.claim_next(), 0);
        assert_eq!(piles.found(), 3);
    }
}
