mod analyzer;
pub mod defs;
mod die;
mod error;
mod game;
pub mod print;
mod simulation;
pub mod table;
mod value;
mod weight;

use std::rc::Rc;

pub use analyzer::ResultAnalyzer;
pub use die::WeightedDie;
pub use error::{Error, Result};
pub use game::{DiceGame, ResultFormat};
pub use simulation::Simulation;
pub use value::{DefaultFace, Face, FaceKind, FaceValue};
pub use weight::{IntoWeight, Weight, DEFAULT_WEIGHT};

type Ptr<T> = Rc<T>;

pub const DEFAULT_ROLLS: usize = 1_000;
