// ABOUTME: Error types for the dicebag library.
// ABOUTME: Covers face-set validation, roll-method preconditions, and text decoding.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid die size: {0} (a standard die needs at least 2 faces)")]
    InvalidSize(usize),

    #[error("A die needs at least one face")]
    EmptyFaces,

    #[error("Count cannot be negative: {0}")]
    NegativeCount(i64),

    #[error("Cannot keep the best or worst of zero rolls")]
    ZeroCount,

    #[error("Unrecognized roll method '{0}'")]
    UnrecognizedMethod(String),

    #[error("Cannot explode at {0}: no rollable face is below it")]
    DegenerateExploding(i64),

    #[error("Reroll threshold {0} leaves no rollable face above it")]
    RerollThreshold(i64),

    #[error("Cannot keep {keep} of {count} rolls")]
    InvalidKeep { keep: i64, count: i64 },

    #[error("Expected {faces} weights, found {weights}")]
    WeightMismatch { faces: usize, weights: usize },

    #[error("Weights must not all be zero")]
    ZeroTotalWeight,

    #[error("Malformed die: {0}")]
    MalformedInput(String),

    #[error("Input is empty")]
    EmptyInput,

    #[error("Sum of exploding rolls does not fit in an i64")]
    Overflow,

    #[error("Index {index} out of bounds for a die with {size} faces")]
    IndexOutOfBounds { index: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
