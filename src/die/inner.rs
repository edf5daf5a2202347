use std::collections::HashSet;

use itertools::Itertools;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::RngCore;

use crate::value::{DefaultFace, Face};
use crate::weight::{IntoWeight, Weight, DEFAULT_WEIGHT};
use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct DieInner<T = DefaultFace>
where
    T: Face,
{
    faces: Vec<T>,
    weights: Vec<Weight>,
}

impl<T> DieInner<T>
where
    T: Face,
{
    pub fn new<I>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let faces: Vec<T> = faces.into_iter().collect();
        let Some(first) = faces.first() else {
            return Err(Error::InvalidArgumentType(
                "faces must be a non-empty sequence".into(),
            ));
        };
        let kind = first.kind();
        if let Some(other) = faces.iter().find(|f| f.kind() != kind) {
            return Err(Error::InvalidArgumentType(format!(
                "faces must share one kind, {other} is {:?} but {first} is {kind:?}",
                other.kind()
            )));
        }
        if let Some(dup) = faces.iter().duplicates().next() {
            return Err(Error::DuplicateValue(dup.to_string()));
        }

        let n = faces.len();
        Ok(Self {
            faces,
            weights: vec![DEFAULT_WEIGHT; n],
        })
    }

    #[must_use]
    pub fn faces(&self) -> &[T] {
        &self.faces
    }

    #[must_use]
    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &Weight)> {
        self.faces.iter().zip(self.weights.iter())
    }

    fn position(&self, face: &T) -> Result<usize> {
        self.faces
            .iter()
            .position(|f| f == face)
            .ok_or_else(|| Error::UnknownFace(face.to_string()))
    }

    pub fn weight(&self, face: &T) -> Result<Weight> {
        self.position(face).map(|i| self.weights[i])
    }

    /// Returns the previous weight of `face`.
    pub fn adjust_weight<W>(&mut self, face: &T, weight: W) -> Result<Weight>
    where
        W: IntoWeight,
    {
        let i = self.position(face)?;
        let weight = weight.into_weight()?;
        Ok(std::mem::replace(&mut self.weights[i], weight))
    }

    /// Sum of the raw weights. May overflow to infinity for huge weights.
    #[must_use]
    pub fn total_weight(&self) -> Weight {
        self.weights.iter().sum()
    }

    /// Weights divided by the largest one, so their sum stays finite.
    fn scaled_weights(&self) -> Result<Vec<Weight>> {
        let weights = self.weights();
        let max = weights.iter().copied().fold(0.0, Weight::max);
        if max <= 0.0 {
            return Err(Error::ZeroTotalWeight);
        }
        Ok(weights.iter().map(|w| w / max).collect_vec())
    }

    pub fn probabilities(&self) -> Result<Vec<Weight>> {
        let scaled = self.scaled_weights()?;
        let total: Weight = scaled.iter().sum();
        Ok(scaled.iter().map(|w| w / total).collect_vec())
    }

    pub fn roll_rng<G>(&self, n: usize, rng: &mut G) -> Result<Vec<T>>
    where
        G: RngCore,
    {
        let index = WeightedIndex::new(self.scaled_weights()?).map_err(|e| match e {
            WeightedError::AllWeightsZero => Error::ZeroTotalWeight,
            other => Error::Sampling(other.to_string()),
        })?;
        Ok((0..n)
            .map(|_| self.faces[index.sample(rng)].clone())
            .collect())
    }

    #[must_use]
    pub fn same_faces(&self, other: &Self) -> bool {
        if self.faces.len() != other.faces.len() {
            return false;
        }
        let lhs: HashSet<&T> = self.faces.iter().collect();
        other.faces.iter().all(|f| lhs.contains(f))
    }
}

impl DieInner {
    /// Faces `1..=sides`; a zero is treated as one side.
    #[must_use]
    pub fn uniform(sides: u16) -> Self {
        let faces = (1..=DefaultFace::from(sides.max(1))).collect_vec();
        let n = faces.len();
        Self {
            faces,
            weights: vec![DEFAULT_WEIGHT; n],
        }
    }
}
