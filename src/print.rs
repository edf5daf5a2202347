use std::fmt::Display;

use comfy_table::presets::UTF8_NO_BORDERS;
use comfy_table::{Cell, ContentArrangement, Table};
use itertools::Itertools;

use crate::table::{
    DieState, FaceCounts, NarrowTable, ResultTable, Tally, WideTable, DIE_INDEX, OUTCOME_COLUMN,
    ROLL_INDEX, WEIGHT_COLUMN,
};
use crate::value::Face;

pub trait PrintExt {
    fn table(&self) -> String;

    fn print_table(&self) {
        print!("{}", self.table());
    }
}

fn new_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Display,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_NO_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.into_iter().map(Cell::new));
    table
}

fn render(table: &Table) -> String {
    format!("{table}\n")
}

impl<T> PrintExt for DieState<T>
where
    T: Face,
{
    fn table(&self) -> String {
        let mut table = new_table(["face", WEIGHT_COLUMN]);
        for (face, weight) in self.iter() {
            table.add_row(vec![Cell::new(face), Cell::new(format!("{weight:.3}"))]);
        }
        render(&table)
    }
}

impl<T> PrintExt for WideTable<T>
where
    T: Face,
{
    fn table(&self) -> String {
        let mut table = new_table(std::iter::once("Roll".to_owned()).chain(self.columns()));
        for (roll, outcomes) in self.rows() {
            table.add_row(std::iter::once(Cell::new(roll)).chain(outcomes.iter().map(Cell::new)));
        }
        render(&table)
    }
}

impl<T> PrintExt for NarrowTable<T>
where
    T: Face,
{
    fn table(&self) -> String {
        let mut table = new_table([ROLL_INDEX, DIE_INDEX, OUTCOME_COLUMN]);
        for row in self.iter() {
            table.add_row(vec![
                Cell::new(row.roll),
                Cell::new(row.die),
                Cell::new(&row.outcome),
            ]);
        }
        render(&table)
    }
}

impl<T> PrintExt for ResultTable<T>
where
    T: Face,
{
    fn table(&self) -> String {
        match self {
            ResultTable::Wide(t) => t.table(),
            ResultTable::Narrow(t) => t.table(),
        }
    }
}

impl<T> PrintExt for FaceCounts<T>
where
    T: Face,
{
    fn table(&self) -> String {
        let header = std::iter::once(self.index_name().to_owned())
            .chain(self.faces().iter().map(ToString::to_string));
        let mut table = new_table(header);
        for (roll, counts) in self.rows() {
            table.add_row(std::iter::once(Cell::new(roll)).chain(counts.iter().map(Cell::new)));
        }
        render(&table)
    }
}

impl<T> PrintExt for Tally<T>
where
    T: Face,
{
    fn table(&self) -> String {
        let mut table = new_table([self.index_name(), self.column()]);
        for (key, count) in self.iter() {
            table.add_row(vec![
                Cell::new(format!("({})", key.iter().join(", "))),
                Cell::new(count),
            ]);
        }
        render(&table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiceGame, ResultAnalyzer, WeightedDie};

    #[test]
    fn test_wide_table_headers() {
        let table = WideTable::from_columns(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let text = table.table();
        assert!(text.contains("Roll"));
        assert!(text.contains("Die 1"));
        assert!(text.contains("Die 2"));
    }

    #[test]
    fn test_tally_renders_tuples() {
        let dice = [
            WeightedDie::numeric(6).unwrap(),
            WeightedDie::numeric(6).unwrap(),
        ];
        let mut game = DiceGame::new(dice).unwrap();
        game.load_results(WideTable::from_columns(vec![vec![2], vec![5]]).unwrap())
            .unwrap();
        let text = ResultAnalyzer::new(&game).permutations().unwrap().table();
        assert!(text.contains("Permutation"));
        assert!(text.contains("(2, 5)"));
    }

    #[test]
    fn test_die_state_weights() {
        let die = WeightedDie::new(['x', 'y']).unwrap();
        die.adjust_weight(&'y', 2.5).unwrap();
        let text = die.show_state().table();
        assert!(text.contains("weight"));
        assert!(text.contains("2.500"));
    }
}
