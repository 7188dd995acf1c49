// ABOUTME: Parser for the delimited die format "f1,f2,...[:w1,w2,...]".
// ABOUTME: Builds plain or weighted FaceSets, and dice collections one die per line.

use crate::dice::Dice;
use crate::die::Die;
use crate::error::{Error, Result};
use crate::faces::FaceSet;
use std::str::FromStr;
use tracing::debug;

/// Parse the delimited form of a die into a face set.
///
/// `faces` alone gives an unweighted set. `faces:weights` gives a weighted
/// set when more than one weight is listed; a lone weight is ignored.
///
/// # Examples
///
/// ```
/// let set = dicebag::parser::parse_face_set("1,2,3:1,1,2").unwrap();
/// assert_eq!(set.faces(), &[1, 2, 3]);
/// assert_eq!(set.weights(), Some(&[1, 1, 2][..]));
/// ```
pub fn parse_face_set(input: &str) -> Result<FaceSet<i64>> {
    if input.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let sections: Vec<&str> = input.split(':').collect();
    let (faces, weights) = match sections.as_slice() {
        [faces] => (integers(faces)?, None),
        [faces, weights] => (integers(faces)?, Some(integers(weights)?)),
        _ => {
            return Err(Error::MalformedInput(format!(
                "expected at most one ':' in '{}'",
                input
            )))
        }
    };

    let set = match weights {
        Some(weights) if weights.len() > 1 => {
            let weights = weights
                .into_iter()
                .map(|w| {
                    u32::try_from(w)
                        .map_err(|_| Error::MalformedInput(format!("invalid weight {}", w)))
                })
                .collect::<Result<Vec<u32>>>()?;
            FaceSet::weighted(faces, weights).map_err(|e| Error::MalformedInput(e.to_string()))?
        }
        _ => FaceSet::new(faces)?,
    };

    debug!(input, faces = set.size(), weighted = set.is_weighted(), "parsed die");
    Ok(set)
}

fn integers(section: &str) -> Result<Vec<i64>> {
    section
        .split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<i64>()
                .map_err(|_| Error::MalformedInput(format!("'{}' is not an integer", token)))
        })
        .collect()
}

/// Parse the delimited form of a die.
pub fn parse(input: &str) -> Result<Die> {
    Ok(Die::from_faces(parse_face_set(input)?, None))
}

/// Parse the delimited form of a die, seeding its RNG.
pub fn parse_seeded(input: &str, seed: u64) -> Result<Die> {
    Ok(Die::from_faces(parse_face_set(input)?, Some(seed)))
}

/// Parse a collection: one delimited die per line.
///
/// Both `\n` and `\r\n` line endings are accepted. Every line, including a
/// blank one between dice, must hold a die.
pub fn parse_dice(input: &str) -> Result<Dice> {
    if input.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    input.lines().map(parse).collect()
}

impl FromStr for FaceSet<i64> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_face_set(s)
    }
}

impl FromStr for Die {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl FromStr for Dice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_dice(s)
    }
}
