//! Quantum numbers labeling bound eigenstates of hydrogen.

use std::fmt;
use crate::error::StateError;

pub type StateResult<T> = Result<T, StateError>;

/// A validated triple of quantum numbers *(n, l, m)*.
///
/// Construction guarantees `n ≥ 1`, `0 ≤ l ≤ n - 1`, and `-l ≤ m ≤ l`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuantumState {
    n: u32,
    l: u32,
    m: i32,
}

impl QuantumState {
    /// Create a new state, checking the quantum numbers against each other.
    ///
    /// ```
    /// use hydrogen::state::QuantumState;
    ///
    /// assert!(QuantumState::new(3, 2, -2).is_ok());
    /// assert!(QuantumState::new(0, 0, 0).is_err());
    /// assert!(QuantumState::new(2, 2, 0).is_err());
    /// assert!(QuantumState::new(2, 1, -2).is_err());
    /// ```
    pub fn new(n: u32, l: u32, m: i32) -> StateResult<Self> {
        StateError::check(n, l, m)?;
        Ok(Self { n, l, m })
    }

    /// Like [`Self::new`], but from a plain `(n, l, m)` tuple.
    pub fn from_tuple((n, l, m): (u32, u32, i32)) -> StateResult<Self> {
        Self::new(n, l, m)
    }

    /// Principal quantum number.
    pub fn n(&self) -> u32 { self.n }

    /// Orbital angular momentum quantum number.
    pub fn l(&self) -> u32 { self.l }

    /// Magnetic quantum number.
    pub fn m(&self) -> i32 { self.m }

    /// Spectroscopic letter for `l`.
    pub fn orbital_letter(&self) -> char {
        match self.l {
            0 => 's',
            1 => 'p',
            2 => 'd',
            3 => 'f',
            4 => 'g',
            5 => 'h',
            _ => '?',
        }
    }
}

impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{:+}", self.n, self.orbital_letter(), self.m)
    }
}

impl TryFrom<(u32, u32, i32)> for QuantumState {
    type Error = StateError;

    fn try_from(nlm: (u32, u32, i32)) -> StateResult<Self> {
        Self::from_tuple(nlm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_valid_triple() {
        for n in 1..=5_u32 {
            for l in 0..n {
                for m in -(l as i32)..=(l as i32) {
                    let s = QuantumState::new(n, l, m).unwrap();
                    assert_eq!((s.n(), s.l(), s.m()), (n, l, m));
                }
            }
        }
    }

    #[test]
    fn rejects_invalid_triples() {
        for &(n, l, m) in [(0, 0, 0), (1, 1, 0), (3, 3, 1), (3, 1, 2), (4, 2, -3)].iter() {
            let err = QuantumState::new(n, l, m).unwrap_err();
            assert_eq!((err.0, err.1, err.2), (n, l, m));
        }
    }

    #[test]
    fn display_name() {
        assert_eq!(QuantumState::new(1, 0, 0).unwrap().to_string(), "1s+0");
        assert_eq!(QuantumState::new(2, 1, -1).unwrap().to_string(), "2p-1");
        assert_eq!(QuantumState::new(4, 3, 2).unwrap().to_string(), "4f+2");
    }
}
