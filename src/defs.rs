//! Fair numeric dice. Each call builds a new die, so adjusting the weights
//! of one never affects another.

use crate::die::WeightedDie;

pub fn d2() -> WeightedDie {
    WeightedDie::uniform(2)
}

pub fn d4() -> WeightedDie {
    WeightedDie::uniform(4)
}

pub fn d6() -> WeightedDie {
    WeightedDie::uniform(6)
}

pub fn d8() -> WeightedDie {
    WeightedDie::uniform(8)
}

pub fn d10() -> WeightedDie {
    WeightedDie::uniform(10)
}

pub fn d12() -> WeightedDie {
    WeightedDie::uniform(12)
}

pub fn d20() -> WeightedDie {
    WeightedDie::uniform(20)
}

pub fn d100() -> WeightedDie {
    WeightedDie::uniform(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faces() {
        assert_eq!(d6().faces(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(d100().len(), 100);
    }

    #[test]
    fn test_calls_are_independent() {
        let a = d20();
        let b = d20();
        a.adjust_weight(&20, 10).unwrap();
        assert_eq!(b.weight(&20), Ok(1.0));
        assert!(!a.ptr_eq(&b));
        assert!(a.same_faces(&b));
    }
}
