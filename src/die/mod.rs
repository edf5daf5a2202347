mod inner;
mod ptr;

pub use ptr::WeightedDie;
