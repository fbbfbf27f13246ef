//! Question generation for Sequential and Mixed stage passes.
use core::fmt;

use crate::rng::RngOracle;

/// One multiplication question. Immutable once issued; never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Question {
    pub num1: u32,
    pub num2: u32,
    pub expected_answer: u32,
}

impl Question {
    /// Sequential-stage question: the multiplicand steps 1..10 in order,
    /// covering each exactly once per stage pass.
    pub fn sequential(level: u32, question_index: u32) -> Self {
        let num2 = (question_index % 10) + 1;
        Self::from_operands(level, num2)
    }

    /// Mixed-stage question: uniform random multiplicand in [1, 10].
    pub fn mixed(level: u32, rng: &dyn RngOracle, seed: u64) -> Self {
        let num2 = rng.range(seed, 1, 10);
        Self::from_operands(level, num2)
    }

    fn from_operands(num1: u32, num2: u32) -> Self {
        Self {
            num1,
            num2,
            expected_answer: num1 * num2,
        }
    }

    /// Judges a submitted answer. `None` models non-numeric input, which
    /// never matches any product.
    pub fn is_correct(&self, answer: Option<u32>) -> bool {
        answer == Some(self.expected_answer)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {} = ?", self.num1, self.num2)
    }
}
