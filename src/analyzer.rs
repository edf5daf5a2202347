use itertools::Itertools;

use crate::game::DiceGame;
use crate::table::{
    FaceCounts, Tally, COMBINATION_COLUMN, COMBINATION_INDEX, PERMUTATION_COLUMN,
    PERMUTATION_INDEX,
};
use crate::value::{DefaultFace, Face};
use crate::{Error, Result};

/// Statistics over the results of a [`DiceGame`].
///
/// The analyzer borrows the game and reads its results each time a method
/// runs. Every method fails with [`Error::NoResultsAvailable`](crate::Error::NoResultsAvailable)
/// if the game was never played.
#[derive(Debug, Clone)]
pub struct ResultAnalyzer<'a, T = DefaultFace>
where
    T: Face,
{
    game: &'a DiceGame<T>,
}

impl<'a, T> ResultAnalyzer<'a, T>
where
    T: Face,
{
    #[must_use]
    pub fn new(game: &'a DiceGame<T>) -> Self {
        Self { game }
    }

    #[must_use]
    pub fn game(&self) -> &'a DiceGame<T> {
        self.game
    }

    /// Number of rolls in which every die shows the same face.
    pub fn count_jackpots(&self) -> Result<usize> {
        Ok(self.jackpot_rolls()?.len())
    }

    /// Roll numbers of the jackpots, ascending.
    pub fn jackpot_rolls(&self) -> Result<Vec<usize>> {
        let results = self.game.require_results()?;
        Ok(results
            .rows()
            .filter(|(_, outcomes)| outcomes.iter().all_equal())
            .map(|(roll, _)| roll)
            .collect())
    }

    pub fn faces_per_roll(&self) -> Result<FaceCounts<T>> {
        let results = self.game.require_results()?;
        let faces = self.game.faces();
        let counts = results
            .rows()
            .map(|(roll, outcomes)| count_faces(&faces, roll, outcomes))
            .collect::<Result<Vec<_>>>()?;
        Ok(FaceCounts::new(faces, counts))
    }

    /// Order-independent outcome tallies.
    pub fn combinations(&self) -> Result<Tally<T>> {
        let results = self.game.require_results()?;
        Ok(Tally::from_keys(
            COMBINATION_INDEX,
            COMBINATION_COLUMN,
            results
                .rows()
                .map(|(_, outcomes)| outcomes.iter().cloned().sorted().collect()),
        ))
    }

    /// Outcome tallies where die order matters.
    pub fn permutations(&self) -> Result<Tally<T>> {
        let results = self.game.require_results()?;
        Ok(Tally::from_keys(
            PERMUTATION_INDEX,
            PERMUTATION_COLUMN,
            results.rows().map(|(_, outcomes)| outcomes.to_vec()),
        ))
    }
}

/// Occurrences of each of the sorted `faces` among one roll's outcomes.
fn count_faces<T>(faces: &[T], roll: usize, outcomes: &[T]) -> Result<Vec<usize>>
where
    T: Face,
{
    let mut row = vec![0; faces.len()];
    for o in outcomes {
        let i = faces
            .binary_search(o)
            .map_err(|_| Error::MalformedResults(format!("roll {roll}: {o} is not a face")))?;
        row[i] += 1;
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::table::WideTable;
    use crate::WeightedDie;

    fn game_with(columns: Vec<Vec<i32>>) -> DiceGame {
        let dice = (0..columns.len())
            .map(|_| WeightedDie::numeric(6).unwrap())
            .collect_vec();
        let mut game = DiceGame::new(dice).unwrap();
        game.load_results(WideTable::from_columns(columns).unwrap())
            .unwrap();
        game
    }

    #[test]
    fn test_unplayed_game() {
        let game = DiceGame::new([WeightedDie::numeric(6).unwrap()]).unwrap();
        let analyzer = ResultAnalyzer::new(&game);
        assert_eq!(analyzer.count_jackpots(), Err(Error::NoResultsAvailable));
        assert_eq!(analyzer.faces_per_roll(), Err(Error::NoResultsAvailable));
        assert_eq!(analyzer.combinations(), Err(Error::NoResultsAvailable));
        assert_eq!(analyzer.permutations(), Err(Error::NoResultsAvailable));
    }

    #[test]
    fn test_jackpot_rolls() {
        let game = game_with(vec![vec![1, 2, 3, 1, 5], vec![1, 2, 4, 1, 6]]);
        let analyzer = ResultAnalyzer::new(&game);
        assert_eq!(analyzer.jackpot_rolls().unwrap(), vec![1, 2, 4]);
        assert_eq!(analyzer.count_jackpots().unwrap(), 3);
    }

    #[test]
    fn test_no_jackpots() {
        let game = game_with(vec![vec![1, 2], vec![2, 1]]);
        assert_eq!(ResultAnalyzer::new(&game).count_jackpots().unwrap(), 0);
    }

    #[test]
    fn test_single_die_is_always_jackpot() {
        let game = game_with(vec![vec![4, 5, 6]]);
        assert_eq!(ResultAnalyzer::new(&game).count_jackpots().unwrap(), 3);
    }

    #[test]
    fn test_faces_per_roll_uses_declared_faces() {
        let game = game_with(vec![vec![1, 2, 3, 4, 5], vec![6, 5, 4, 3, 2]]);
        let counts = ResultAnalyzer::new(&game).faces_per_roll().unwrap();
        assert_eq!(counts.faces(), &[1, 2, 3, 4, 5, 6]);
        let rows = counts.rows().map(|(_, r)| r.to_vec()).collect_vec();
        assert_eq!(
            rows,
            vec![
                vec![1, 0, 0, 0, 0, 1],
                vec![0, 1, 0, 0, 1, 0],
                vec![0, 0, 1, 1, 0, 0],
                vec![0, 0, 1, 1, 0, 0],
                vec![0, 1, 0, 0, 1, 0],
            ]
        );
    }

    #[test]
    fn test_faces_per_roll_text_faces() {
        let coin = || WeightedDie::new(["tails", "heads"]).unwrap();
        let mut game = DiceGame::new([coin(), coin(), coin()]).unwrap();
        game.load_results(
            WideTable::from_rows(vec![vec!["heads", "heads", "tails"]]).unwrap(),
        )
        .unwrap();
        let counts = ResultAnalyzer::new(&game).faces_per_roll().unwrap();
        assert_eq!(counts.faces(), &["heads", "tails"]);
        assert_eq!(counts.row(1), Some(&[2, 1][..]));
    }

    #[test]
    fn test_count_faces_rejects_unknown_outcome() {
        assert_eq!(count_faces(&[1, 2, 3], 1, &[3, 1, 3]), Ok(vec![1, 0, 2]));
        assert_eq!(
            count_faces(&[1, 2, 3], 4, &[2, 9]),
            Err(Error::MalformedResults("roll 4: 9 is not a face".into()))
        );
    }

    #[test]
    fn test_combinations_sort_outcomes() {
        let game = game_with(vec![vec![6, 1, 3], vec![1, 6, 3]]);
        let combos = ResultAnalyzer::new(&game).combinations().unwrap();
        assert_eq!(combos.len(), 2);
        assert_eq!(combos.get(&[1, 6]), Some(2));
        assert_eq!(combos.get(&[3, 3]), Some(1));
        assert_eq!(combos.column(), "Number");
    }

    #[test]
    fn test_permutations_keep_order() {
        let game = game_with(vec![vec![6, 1, 3], vec![1, 6, 3]]);
        let perms = ResultAnalyzer::new(&game).permutations().unwrap();
        assert_eq!(perms.len(), 3);
        assert_eq!(perms.get(&[6, 1]), Some(1));
        assert_eq!(perms.get(&[1, 6]), Some(1));
        assert_eq!(perms.column(), "Count");
    }
}
