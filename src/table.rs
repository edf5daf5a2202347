//! Result tables produced by [`DiceGame`](crate::DiceGame) and
//! [`ResultAnalyzer`](crate::ResultAnalyzer).
//!
//! Rolls and dice are numbered from 1 everywhere a table exposes an index.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use itertools::Itertools;

use crate::value::Face;
use crate::weight::Weight;
use crate::{Error, Result};

pub const ROLL_INDEX: &str = "roll";
pub const DIE_INDEX: &str = "die";
pub const OUTCOME_COLUMN: &str = "outcome";
pub const WEIGHT_COLUMN: &str = "weight";
pub const FACE_COUNTS_INDEX: &str = "Roll Number";
pub const COMBINATION_INDEX: &str = "Combination";
pub const COMBINATION_COLUMN: &str = "Number";
pub const PERMUTATION_INDEX: &str = "Permutation";
pub const PERMUTATION_COLUMN: &str = "Count";

#[must_use]
pub fn die_label(die: usize) -> String {
    format!("Die {die}")
}

/// Face/weight pairs of a die in declared face order.
#[derive(Debug, Clone, PartialEq)]
pub struct DieState<T> {
    entries: Vec<(T, Weight)>,
}

impl<T> DieState<T>
where
    T: Face,
{
    pub(crate) fn new(entries: Vec<(T, Weight)>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn faces(&self) -> Vec<&T> {
        self.entries.iter().map(|(f, _)| f).collect()
    }

    #[must_use]
    pub fn weights(&self) -> Vec<Weight> {
        self.entries.iter().map(|(_, w)| *w).collect()
    }

    #[must_use]
    pub fn weight(&self, face: &T) -> Option<Weight> {
        self.entries
            .iter()
            .find_map(|(f, w)| (f == face).then_some(*w))
    }

    /// Edits this snapshot only. Returns `false` if the face is absent.
    pub fn set_weight(&mut self, face: &T, weight: Weight) -> bool {
        match self.entries.iter_mut().find(|(f, _)| f == face) {
            Some(entry) => {
                entry.1 = weight;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, Weight)> {
        self.entries.iter().map(|(f, w)| (f, *w))
    }
}

/// One row per roll, one column per die.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable<T> {
    rows: Vec<Vec<T>>,
    n_dice: usize,
}

impl<T> WideTable<T>
where
    T: Face,
{
    /// Builds a table from per-roll rows. Every row must have the same,
    /// non-zero width.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let Some(n_dice) = rows.first().map(Vec::len) else {
            return Err(Error::MalformedResults("table has no rows".into()));
        };
        if n_dice == 0 {
            return Err(Error::MalformedResults("table has no columns".into()));
        }
        if let Some(pos) = rows.iter().position(|r| r.len() != n_dice) {
            return Err(Error::MalformedResults(format!(
                "roll {} has {} outcomes, expected {n_dice}",
                pos + 1,
                rows[pos].len()
            )));
        }
        Ok(Self { rows, n_dice })
    }

    /// Builds a table from per-die outcome columns. Every column must have
    /// the same length.
    pub fn from_columns(columns: Vec<Vec<T>>) -> Result<Self> {
        let Some(n_rolls) = columns.first().map(Vec::len) else {
            return Err(Error::MalformedResults("table has no columns".into()));
        };
        if n_rolls == 0 {
            return Err(Error::MalformedResults("table has no rows".into()));
        }
        if let Some(pos) = columns.iter().position(|c| c.len() != n_rolls) {
            return Err(Error::MalformedResults(format!(
                "{} has {} outcomes, expected {n_rolls}",
                die_label(pos + 1),
                columns[pos].len()
            )));
        }
        let n_dice = columns.len();
        let mut iters = columns.into_iter().map(Vec::into_iter).collect_vec();
        let rows = (0..n_rolls)
            .map(|_| iters.iter_mut().filter_map(Iterator::next).collect_vec())
            .collect_vec();
        Ok(Self { rows, n_dice })
    }

    #[must_use]
    pub fn n_rolls(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn n_dice(&self) -> usize {
        self.n_dice
    }

    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        (1..=self.n_dice).map(die_label).collect()
    }

    #[must_use]
    pub fn row(&self, roll: usize) -> Option<&[T]> {
        roll.checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn get(&self, roll: usize, die: usize) -> Option<&T> {
        self.row(roll)?.get(die.checked_sub(1)?)
    }

    #[must_use]
    pub fn column(&self, die: usize) -> Option<Vec<&T>> {
        let i = die.checked_sub(1).filter(|&i| i < self.n_dice)?;
        Some(self.rows.iter().map(|r| &r[i]).collect())
    }

    /// Rows paired with their 1-based roll number.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[T])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| (i + 1, r.as_slice()))
    }

    /// Flattens row-major into one row per (roll, die) cell.
    #[must_use]
    pub fn to_narrow(&self) -> NarrowTable<T> {
        let rows = self
            .rows()
            .flat_map(|(roll, outcomes)| {
                outcomes.iter().enumerate().map(move |(i, o)| NarrowRow {
                    roll,
                    die: i + 1,
                    outcome: o.clone(),
                })
            })
            .collect();
        NarrowTable { rows }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrowRow<T> {
    pub roll: usize,
    pub die: usize,
    pub outcome: T,
}

/// One row per (roll, die) pair with a single outcome column.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrowTable<T> {
    rows: Vec<NarrowRow<T>>,
}

impl<T> NarrowTable<T> {
    #[must_use]
    pub fn index_names(&self) -> [&'static str; 2] {
        [ROLL_INDEX, DIE_INDEX]
    }

    #[must_use]
    pub fn columns(&self) -> [&'static str; 1] {
        [OUTCOME_COLUMN]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, roll: usize, die: usize) -> Option<&T> {
        self.rows
            .iter()
            .find(|r| r.roll == roll && r.die == die)
            .map(|r| &r.outcome)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NarrowRow<T>> {
        self.rows.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultTable<T> {
    Wide(WideTable<T>),
    Narrow(NarrowTable<T>),
}

impl<T> ResultTable<T>
where
    T: Face,
{
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ResultTable::Wide(t) => t.n_rolls(),
            ResultTable::Narrow(t) => t.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_wide(&self) -> Option<&WideTable<T>> {
        match self {
            ResultTable::Wide(t) => Some(t),
            ResultTable::Narrow(_) => None,
        }
    }

    #[must_use]
    pub fn as_narrow(&self) -> Option<&NarrowTable<T>> {
        match self {
            ResultTable::Narrow(t) => Some(t),
            ResultTable::Wide(_) => None,
        }
    }
}

/// Occurrences of every face in every roll. Columns are the sorted face
/// domain of the game, including faces no roll produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceCounts<T> {
    faces: Vec<T>,
    counts: Vec<Vec<usize>>,
}

impl<T> FaceCounts<T>
where
    T: Face,
{
    pub(crate) fn new(faces: Vec<T>, counts: Vec<Vec<usize>>) -> Self {
        Self { faces, counts }
    }

    #[must_use]
    pub fn index_name(&self) -> &'static str {
        FACE_COUNTS_INDEX
    }

    #[must_use]
    pub fn faces(&self) -> &[T] {
        &self.faces
    }

    #[must_use]
    pub fn n_rolls(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn row(&self, roll: usize) -> Option<&[usize]> {
        roll.checked_sub(1)
            .and_then(|i| self.counts.get(i))
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn count(&self, roll: usize, face: &T) -> Option<usize> {
        let i = self.faces.binary_search(face).ok()?;
        self.row(roll).map(|r| r[i])
    }

    pub fn rows(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, r)| (i + 1, r.as_slice()))
    }
}

/// Sparse frequency table keyed by outcome tuples, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally<T> {
    index_name: &'static str,
    column: &'static str,
    entries: Vec<(Vec<T>, usize)>,
}

impl<T> Tally<T>
where
    T: Face,
{
    pub(crate) fn from_keys<I>(index_name: &'static str, column: &'static str, keys: I) -> Self
    where
        I: IntoIterator<Item = Vec<T>>,
    {
        let mut positions = HashMap::<Vec<T>, usize>::new();
        let mut entries: Vec<(Vec<T>, usize)> = Vec::new();
        for key in keys {
            match positions.entry(key) {
                Entry::Vacant(e) => {
                    entries.push((e.key().clone(), 1));
                    e.insert(entries.len() - 1);
                }
                Entry::Occupied(e) => {
                    entries[*e.get()].1 += 1;
                }
            }
        }
        Self {
            index_name,
            column,
            entries,
        }
    }

    #[must_use]
    pub fn index_name(&self) -> &'static str {
        self.index_name
    }

    #[must_use]
    pub fn column(&self) -> &'static str {
        self.column
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &[T]) -> Option<usize> {
        self.entries
            .iter()
            .find_map(|(k, c)| (k.as_slice() == key).then_some(*c))
    }

    /// Sum of all counts, equal to the number of rolls tallied.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[T], usize)> {
        self.entries.iter().map(|(k, c)| (k.as_slice(), *c))
    }
}
