use thiserror::Error;

pub type Result<T> = ::core::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid argument type: {0}")]
    InvalidArgumentType(String),
    #[error("duplicate face value: {0}")]
    DuplicateValue(String),
    #[error("face not on die: {0}")]
    UnknownFace(String),
    #[error("weight is not numeric: {0:?}")]
    InvalidWeightType(String),
    #[error("weight must be finite and non-negative, got {0}")]
    InvalidWeight(f64),
    #[error("all face weights are zero")]
    ZeroTotalWeight,
    #[error("cannot sample from weights: {0}")]
    Sampling(String),
    #[error("a game needs at least one die")]
    EmptyGame,
    #[error("die {die} has a different face set than die 1")]
    MismatchedFaces { die: usize },
    #[error("roll count must be positive")]
    InvalidRollCount,
    #[error("unknown result format {0:?}, expected \"wide\" or \"narrow\"")]
    InvalidFormat(String),
    #[error("no results available, play the game first")]
    NoResultsAvailable,
    #[error("malformed results: {0}")]
    MalformedResults(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MismatchedFaces { die: 3 };
        assert_eq!(err.to_string(), "die 3 has a different face set than die 1");

        let err = Error::InvalidFormat("bogus".into());
        assert!(err.to_string().contains("\"bogus\""));
    }
}
