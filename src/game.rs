use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use rand::{thread_rng, RngCore};

use crate::die::WeightedDie;
use crate::table::{die_label, NarrowTable, ResultTable, WideTable};
use crate::value::{DefaultFace, Face};
use crate::{Error, Result};

/// Shape of the table returned by [`DiceGame::display_results`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultFormat {
    #[default]
    Wide,
    Narrow,
}

impl FromStr for ResultFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wide" => Ok(ResultFormat::Wide),
            "narrow" => Ok(ResultFormat::Narrow),
            other => Err(Error::InvalidFormat(other.to_owned())),
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultFormat::Wide => write!(f, "wide"),
            ResultFormat::Narrow => write!(f, "narrow"),
        }
    }
}

/// A set of dice with identical faces, rolled together.
///
/// The game holds handles to the caller's dice, so weight changes made on a
/// die after the game is built apply to the next [`play`](Self::play).
#[derive(Debug, Clone)]
pub struct DiceGame<T = DefaultFace>
where
    T: Face,
{
    dice: Vec<WeightedDie<T>>,
    results: Option<WideTable<T>>,
}

impl<T> DiceGame<T>
where
    T: Face,
{
    /// # Errors
    /// [`Error::EmptyGame`] without dice, [`Error::MismatchedFaces`] if a
    /// die's face set differs from the first die's.
    pub fn new<I>(dice: I) -> Result<Self>
    where
        I: IntoIterator<Item = WeightedDie<T>>,
    {
        let dice = dice.into_iter().collect_vec();
        let first = dice.first().ok_or(Error::EmptyGame)?;
        if let Some(pos) = dice.iter().position(|d| !d.same_faces(first)) {
            return Err(Error::MismatchedFaces { die: pos + 1 });
        }
        debug!("new game with {} dice of {} faces", dice.len(), first.len());
        Ok(Self {
            dice,
            results: None,
        })
    }

    #[must_use]
    pub fn dice(&self) -> &[WeightedDie<T>] {
        &self.dice
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Face domain shared by every die, sorted ascending.
    #[must_use]
    pub fn faces(&self) -> Vec<T> {
        self.dice
            .first()
            .map(|d| d.faces().into_iter().sorted().collect())
            .unwrap_or_default()
    }

    /// Rolls every die `rolls` times and replaces the stored results.
    ///
    /// # Errors
    /// [`Error::InvalidRollCount`] for zero rolls,
    /// [`Error::ZeroTotalWeight`] if some die cannot be rolled. Previous
    /// results survive a failed call.
    pub fn play_rng<G>(&mut self, rolls: usize, rng: &mut G) -> Result<&WideTable<T>>
    where
        G: RngCore,
    {
        if rolls == 0 {
            return Err(Error::InvalidRollCount);
        }
        let columns = self
            .dice
            .iter()
            .map(|d| d.roll_rng(rolls, rng))
            .collect::<Result<Vec<_>>>()?;
        let table = WideTable::from_columns(columns)?;
        debug!("played {} rolls of {} dice", table.n_rolls(), table.n_dice());
        Ok(self.results.insert(table))
    }

    pub fn play(&mut self, rolls: usize) -> Result<&WideTable<T>> {
        let mut rng = thread_rng();
        self.play_rng(rolls, &mut rng)
    }

    /// Installs a prepared wide table as the game's results.
    ///
    /// # Errors
    /// [`Error::MalformedResults`] if the table width differs from the number
    /// of dice or an outcome is not one of the dice's faces.
    pub fn load_results(&mut self, table: WideTable<T>) -> Result<()> {
        if table.n_dice() != self.dice.len() {
            return Err(Error::MalformedResults(format!(
                "table has {} columns for {} dice",
                table.n_dice(),
                self.dice.len()
            )));
        }
        let faces = self.faces();
        for (roll, outcomes) in table.rows() {
            if let Some((i, o)) = outcomes
                .iter()
                .enumerate()
                .find(|(_, o)| faces.binary_search(o).is_err())
            {
                return Err(Error::MalformedResults(format!(
                    "roll {roll}, {}: {o} is not a face",
                    die_label(i + 1)
                )));
            }
        }
        debug!("loaded {} rolls of {} dice", table.n_rolls(), table.n_dice());
        self.results = Some(table);
        Ok(())
    }

    /// Results of the latest play, if any.
    #[must_use]
    pub fn results(&self) -> Option<&WideTable<T>> {
        self.results.as_ref()
    }

    pub(crate) fn require_results(&self) -> Result<&WideTable<T>> {
        self.results.as_ref().ok_or(Error::NoResultsAvailable)
    }

    /// Copy of the latest results in the requested shape.
    pub fn results_as(&self, format: ResultFormat) -> Result<ResultTable<T>> {
        let results = self.require_results()?;
        Ok(match format {
            ResultFormat::Wide => ResultTable::Wide(results.clone()),
            ResultFormat::Narrow => ResultTable::Narrow(results.to_narrow()),
        })
    }

    /// Copy of the latest results, `format` being `"wide"` or `"narrow"`.
    ///
    /// # Errors
    /// [`Error::InvalidFormat`] for any other format, whether or not the game
    /// was played, then [`Error::NoResultsAvailable`] before the first play.
    pub fn display_results(&self, format: &str) -> Result<ResultTable<T>> {
        self.results_as(format.parse()?)
    }

    pub fn wide(&self) -> Result<WideTable<T>> {
        self.require_results().cloned()
    }

    pub fn narrow(&self) -> Result<NarrowTable<T>> {
        self.require_results().map(WideTable::to_narrow)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn d6_pair() -> DiceGame {
        let a = WeightedDie::numeric(6).unwrap();
        let b = WeightedDie::numeric(6).unwrap();
        DiceGame::new([a, b]).unwrap()
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("wide".parse::<ResultFormat>(), Ok(ResultFormat::Wide));
        assert_eq!("narrow".parse::<ResultFormat>(), Ok(ResultFormat::Narrow));
        assert_eq!(
            "Wide".parse::<ResultFormat>(),
            Err(Error::InvalidFormat("Wide".into()))
        );
        assert_eq!(ResultFormat::default().to_string(), "wide");
    }

    #[test]
    fn test_new_rejects_empty() {
        let err = DiceGame::<i32>::new(Vec::new()).unwrap_err();
        assert_eq!(err, Error::EmptyGame);
    }

    #[test]
    fn test_new_reports_mismatched_die() {
        let a = WeightedDie::new([1, 2, 3]).unwrap();
        let b = WeightedDie::new([3, 2, 1]).unwrap();
        let c = WeightedDie::new([1, 2, 4]).unwrap();
        let err = DiceGame::new([a, b, c]).unwrap_err();
        assert_eq!(err, Error::MismatchedFaces { die: 3 });
    }

    #[test]
    fn test_play_zero_rejected() {
        let mut game = d6_pair();
        assert_eq!(game.play(0).unwrap_err(), Error::InvalidRollCount);
        assert!(game.results().is_none());
    }

    #[test]
    fn test_play_replaces_results() {
        let mut game = d6_pair();
        let mut rng = StdRng::seed_from_u64(3);
        game.play_rng(5, &mut rng).unwrap();
        assert_eq!(game.wide().unwrap().n_rolls(), 5);
        game.play_rng(2, &mut rng).unwrap();
        assert_eq!(game.wide().unwrap().n_rolls(), 2);
    }

    #[test]
    fn test_failed_play_keeps_previous_results() {
        let die = WeightedDie::new([1, 2]).unwrap();
        let mut game = DiceGame::new([die.clone()]).unwrap();
        game.play(4).unwrap();
        die.adjust_weight(&1, 0).unwrap();
        die.adjust_weight(&2, 0).unwrap();
        assert_eq!(game.play(4).unwrap_err(), Error::ZeroTotalWeight);
        assert_eq!(game.wide().unwrap().n_rolls(), 4);
    }

    #[test]
    fn test_play_with_huge_weights() {
        let a = WeightedDie::new([1, 2]).unwrap();
        let b = WeightedDie::new([1, 2]).unwrap();
        for die in [&a, &b] {
            die.adjust_weight(&1, "1e308").unwrap();
            die.adjust_weight(&2, "1e308").unwrap();
        }
        let mut game = DiceGame::new([a, b]).unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        let results = game.play_rng(10, &mut rng).unwrap();
        assert_eq!(results.n_rolls(), 10);
    }

    #[test]
    fn test_faces_sorted() {
        let die = WeightedDie::new(["c", "a", "b"]).unwrap();
        let game = DiceGame::new([die]).unwrap();
        assert_eq!(game.faces(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_results_checks_shape_and_faces() {
        let mut game = d6_pair();
        let narrow = WideTable::from_columns(vec![vec![1, 2]]).unwrap();
        assert!(matches!(
            game.load_results(narrow),
            Err(Error::MalformedResults(_))
        ));

        let off_die = WideTable::from_columns(vec![vec![1, 2], vec![3, 7]]).unwrap();
        assert_eq!(
            game.load_results(off_die),
            Err(Error::MalformedResults("roll 2, Die 2: 7 is not a face".into()))
        );
        assert!(game.results().is_none());
    }

    #[test]
    fn test_display_before_play() {
        let game = d6_pair();
        assert_eq!(
            game.display_results("wide").unwrap_err(),
            Error::NoResultsAvailable
        );
        assert_eq!(
            game.display_results("bogus").unwrap_err(),
            Error::InvalidFormat("bogus".into())
        );
    }
}
