use bon::Builder;
use log::debug;
use rand::rngs::ThreadRng;
use rand::{thread_rng, RngCore};

use crate::analyzer::ResultAnalyzer;
use crate::die::WeightedDie;
use crate::game::DiceGame;
use crate::table::WideTable;
use crate::value::Face;
use crate::{Result, DEFAULT_ROLLS};

/// Repeatable game runs driven by one generator.
///
/// ```
/// use montecarlo::{DiceGame, Simulation, WeightedDie};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let dice = [WeightedDie::numeric(6)?, WeightedDie::numeric(6)?];
/// let mut game = DiceGame::new(dice)?;
/// let mut sim = Simulation::builder().rolls(100).build(StdRng::seed_from_u64(1));
/// let jackpots = sim.analyze(&mut game, |a| a.count_jackpots())?;
/// assert!(jackpots <= 100);
/// # Ok::<(), montecarlo::Error>(())
/// ```
#[derive(Debug, Builder)]
pub struct Simulation<G = ThreadRng>
where
    G: RngCore,
{
    #[builder(finish_fn)]
    rng: G,
    #[builder(default = DEFAULT_ROLLS)]
    rolls: usize,
}

impl Default for Simulation<ThreadRng> {
    fn default() -> Self {
        Self::builder().build(thread_rng())
    }
}

impl<G> Simulation<G>
where
    G: RngCore,
{
    #[must_use]
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    pub fn rng(&mut self) -> &mut G {
        &mut self.rng
    }

    pub fn roll_die<T>(&mut self, die: &WeightedDie<T>) -> Result<Vec<T>>
    where
        T: Face,
    {
        die.roll_rng(self.rolls, &mut self.rng)
    }

    pub fn run<'g, T>(&mut self, game: &'g mut DiceGame<T>) -> Result<&'g WideTable<T>>
    where
        T: Face,
    {
        debug!("simulating {} rolls", self.rolls);
        game.play_rng(self.rolls, &mut self.rng)
    }

    /// Plays `game` and hands an analyzer over the fresh results to `op`.
    pub fn analyze<T, F, R>(&mut self, game: &mut DiceGame<T>, op: F) -> Result<R>
    where
        T: Face,
        F: FnOnce(&ResultAnalyzer<'_, T>) -> Result<R>,
    {
        self.run(game)?;
        op(&ResultAnalyzer::new(game))
    }
}
