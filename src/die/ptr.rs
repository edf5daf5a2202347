use std::cell::{Ref, RefCell};
use std::fmt::{self, Debug};

use log::{debug, trace};
use rand::{thread_rng, RngCore};

use super::inner::DieInner;
use crate::table::DieState;
use crate::value::{DefaultFace, Face};
use crate::weight::{IntoWeight, Weight};
use crate::{Ptr, Result};

/// Shared handle to a weighted die.
///
/// Cloning the handle does not copy the die: every clone, and every game
/// holding one, sees the same weights.
#[derive(Clone)]
pub struct WeightedDie<T = DefaultFace>(Ptr<RefCell<DieInner<T>>>)
where
    T: Face;

impl WeightedDie {
    /// Fair die with faces `1..=sides`.
    ///
    /// # Errors
    /// [`Error::InvalidArgumentType`](crate::Error::InvalidArgumentType) if
    /// `sides` is not positive.
    pub fn numeric(sides: DefaultFace) -> Result<Self> {
        WeightedDie::new(1..=sides)
    }

    pub(crate) fn uniform(sides: u16) -> Self {
        Self(Ptr::new(RefCell::new(DieInner::uniform(sides))))
    }
}

impl<T> WeightedDie<T>
where
    T: Face,
{
    /// Builds a die with every weight set to 1.0.
    ///
    /// # Errors
    /// [`Error::InvalidArgumentType`](crate::Error::InvalidArgumentType) for an
    /// empty or mixed-kind sequence, [`Error::DuplicateValue`](crate::Error::DuplicateValue)
    /// if a face repeats.
    pub fn new<I>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Ok(Self(Ptr::new(RefCell::new(DieInner::new(faces)?))))
    }

    fn inner(&self) -> Ref<'_, DieInner<T>> {
        self.0.borrow()
    }

    #[must_use]
    pub fn faces(&self) -> Vec<T> {
        self.inner().faces().to_vec()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner().faces().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn weight(&self, face: &T) -> Result<Weight> {
        self.inner().weight(face)
    }

    /// Replaces the weight of one face.
    ///
    /// # Errors
    /// [`Error::UnknownFace`](crate::Error::UnknownFace) if the face is not on
    /// the die, [`Error::InvalidWeightType`](crate::Error::InvalidWeightType) if
    /// the weight does not parse as a number and
    /// [`Error::InvalidWeight`](crate::Error::InvalidWeight) if it is negative or
    /// not finite. The die is unchanged on error.
    pub fn adjust_weight<W>(&self, face: &T, weight: W) -> Result<()>
    where
        W: IntoWeight,
    {
        let old = self.0.borrow_mut().adjust_weight(face, weight)?;
        debug!("adjusted weight of face {face}: {old} -> {}", self.weight(face)?);
        Ok(())
    }

    pub fn probabilities(&self) -> Result<Vec<Weight>> {
        self.inner().probabilities()
    }

    pub fn roll_rng<G>(&self, n: usize, rng: &mut G) -> Result<Vec<T>>
    where
        G: RngCore,
    {
        let outcomes = self.inner().roll_rng(n, rng)?;
        trace!("rolled {n} times: {outcomes:?}");
        Ok(outcomes)
    }

    pub fn roll_once_rng<G>(&self, rng: &mut G) -> Result<T>
    where
        G: RngCore,
    {
        let mut outcomes = self.roll_rng(1, rng)?;
        Ok(outcomes.swap_remove(0))
    }

    pub fn roll(&self, n: usize) -> Result<Vec<T>> {
        let mut rng = thread_rng();
        self.roll_rng(n, &mut rng)
    }

    pub fn roll_once(&self) -> Result<T> {
        let mut rng = thread_rng();
        self.roll_once_rng(&mut rng)
    }

    /// Snapshot of the face/weight table, detached from the die.
    #[must_use]
    pub fn show_state(&self) -> DieState<T> {
        DieState::new(self.inner().iter().map(|(f, w)| (f.clone(), *w)).collect())
    }

    #[must_use]
    pub fn same_faces(&self, other: &Self) -> bool {
        Ptr::ptr_eq(&self.0, &other.0) || self.inner().same_faces(&other.inner())
    }

    /// True if both handles point at the same die.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Ptr::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Debug for WeightedDie<T>
where
    T: Face,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner().iter()).finish()
    }
}
