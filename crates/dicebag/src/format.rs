// ABOUTME: Text interchange formats for dice: the delimited grammar and a JSON record.
// ABOUTME: The format is always an explicit argument; there is no global serializer config.

use crate::dice::Dice;
use crate::die::Die;
use crate::error::{Error, Result};
use crate::faces::FaceSet;
use crate::parser;
use crate::roller::FastRng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a die or a collection is written to and read from text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// `f1,f2,...[:w1,w2,...]`, one die per line. Faces and weights only.
    #[default]
    Delimited,
    /// Compact JSON: `{"faces":[...],"weights":[...],"seed":n}`.
    /// Faces, weights and seed.
    Json,
    /// Indented JSON, same fields as [`Format::Json`].
    JsonPretty,
}

#[derive(Serialize)]
struct DieRecordRef<'a, T> {
    faces: &'a [T],
    #[serde(skip_serializing_if = "Option::is_none")]
    weights: Option<&'a [u32]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DieRecord<T> {
    faces: Vec<T>,
    #[serde(default)]
    weights: Option<Vec<u32>>,
    #[serde(default)]
    seed: Option<u64>,
}

impl<'a, T, R> From<&'a Die<T, R>> for DieRecordRef<'a, T> {
    fn from(die: &'a Die<T, R>) -> Self {
        Self {
            faces: die.faces(),
            weights: die.weights(),
            seed: die.seed(),
        }
    }
}

impl<T> DieRecord<T> {
    fn into_die(self) -> Result<Die<T, FastRng>> {
        let faces = match self.weights {
            Some(weights) => FaceSet::weighted(self.faces, weights),
            None => FaceSet::new(self.faces),
        }
        .map_err(|e| Error::MalformedInput(e.to_string()))?;
        Ok(Die::from_faces(faces, self.seed))
    }
}

fn to_json<V: Serialize>(value: &V, pretty: bool) -> Result<String> {
    let written = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    written.map_err(|e| Error::MalformedInput(e.to_string()))
}

fn from_json<V: DeserializeOwned>(input: &str) -> Result<V> {
    if input.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    serde_json::from_str(input).map_err(|e| Error::MalformedInput(e.to_string()))
}

impl<T: Serialize, R> Die<T, R> {
    /// Write this die as a JSON record, including its seed if it has one.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        to_json(&DieRecordRef::from(self), pretty)
    }
}

impl<T: DeserializeOwned> Die<T, FastRng> {
    /// Read a die from a JSON record. A recorded seed is reapplied.
    pub fn from_json(input: &str) -> Result<Self> {
        let die = from_json::<DieRecord<T>>(input)?.into_die()?;
        debug!(faces = die.size(), seed = ?die.seed(), "decoded die record");
        Ok(die)
    }
}

impl Die {
    /// Write this die in `format`.
    pub fn encode(&self, format: Format) -> Result<String> {
        match format {
            Format::Delimited => Ok(self.to_string()),
            Format::Json => self.to_json(false),
            Format::JsonPretty => self.to_json(true),
        }
    }

    /// Read a die written in `format`.
    pub fn decode(input: &str, format: Format) -> Result<Self> {
        match format {
            Format::Delimited => parser::parse(input),
            Format::Json | Format::JsonPretty => Self::from_json(input),
        }
    }
}

impl<T: Serialize, R> Dice<T, R> {
    /// Write the collection as a JSON array of die records.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let records: Vec<DieRecordRef<'_, T>> = self.iter().map(DieRecordRef::from).collect();
        to_json(&records, pretty)
    }
}

impl<T: DeserializeOwned> Dice<T, FastRng> {
    /// Read a collection from a JSON array of die records.
    pub fn from_json(input: &str) -> Result<Self> {
        let records: Vec<DieRecord<T>> = from_json(input)?;
        let dice = records
            .into_iter()
            .map(DieRecord::into_die)
            .collect::<Result<Self>>()?;
        debug!(dice = dice.len(), "decoded dice records");
        Ok(dice)
    }
}

impl Dice {
    /// Write the collection in `format`.
    pub fn encode(&self, format: Format) -> Result<String> {
        match format {
            Format::Delimited => Ok(self.to_string()),
            Format::Json => self.to_json(false),
            Format::JsonPretty => self.to_json(true),
        }
    }

    /// Read a collection written in `format`.
    pub fn decode(input: &str, format: Format) -> Result<Self> {
        match format {
            Format::Delimited => parser::parse_dice(input),
            Format::Json | Format::JsonPretty => Self::from_json(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_record_fields() {
        let die: Die = Die::weighted_with_seed(vec![1, 2, 3], vec![1, 1, 2], 42).unwrap();
        assert_eq!(
            die.encode(Format::Json).unwrap(),
            r#"{"faces":[1,2,3],"weights":[1,1,2],"seed":42}"#
        );

        let plain: Die = Die::new(vec![4, 5]).unwrap();
        assert_eq!(plain.encode(Format::Json).unwrap(), r#"{"faces":[4,5]}"#);
    }

    #[test]
    fn test_json_round_trip_keeps_seed() {
        let mut original: Die = Die::weighted_with_seed(vec![1, 2, 3], vec![5, 0, 2], 7).unwrap();
        let text = original.encode(Format::JsonPretty).unwrap();
        let mut decoded = Die::decode(&text, Format::JsonPretty).unwrap();

        assert_eq!(decoded.face_set(), original.face_set());
        assert_eq!(decoded.seed(), Some(7));
        assert_eq!(decoded.roll_n(20).unwrap(), original.roll_n(20).unwrap());
    }

    #[test]
    fn test_json_null_seed() {
        let die = Die::decode(r#"{"faces":[1,2],"seed":null}"#, Format::Json).unwrap();
        assert_eq!(die.seed(), None);
    }

    #[test]
    fn test_json_malformed() {
        for input in [
            r#"{"seed":3}"#,
            r#"{"faces":"1,2,3"}"#,
            r#"{"faces":[1,"two"]}"#,
            r#"{"faces":[]}"#,
            r#"{"faces":[1,2],"weights":[1]}"#,
            r#"[1,2,3]"#,
        ] {
            assert!(
                matches!(Die::decode(input, Format::Json), Err(Error::MalformedInput(_))),
                "{input}"
            );
        }
        assert_eq!(Die::decode(" ", Format::Json).unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_generic_faces_json() {
        let die = Die::with_seed(vec!["red".to_string(), "blue".to_string()], 3).unwrap();
        let text = die.to_json(false).unwrap();
        let decoded: Die<String> = Die::from_json(&text).unwrap();
        assert_eq!(decoded.faces(), die.faces());
    }

    #[test]
    fn test_delimited_drops_seed() {
        let die: Die = Die::with_seed(vec![1, 2, 3], 11).unwrap();
        let decoded = Die::decode(&die.encode(Format::Delimited).unwrap(), Format::Delimited).unwrap();
        assert_eq!(decoded.faces(), die.faces());
        assert_eq!(decoded.seed(), None);
    }

    #[test]
    fn test_dice_formats() {
        let dice: Dice = vec![
            Die::standard_with_seed(4, 1).unwrap(),
            Die::weighted(vec![1, 2, 3], vec![1, 1, 2]).unwrap(),
        ]
        .into();

        for format in [Format::Delimited, Format::Json, Format::JsonPretty] {
            let decoded = Dice::decode(&dice.encode(format).unwrap(), format).unwrap();
            assert_eq!(decoded.len(), 2);
            assert_eq!(decoded[0].faces(), &[1, 2, 3, 4]);
            assert_eq!(decoded[1].weights(), Some(&[1, 1, 2][..]));
        }

        let decoded = Dice::decode(&dice.encode(Format::Json).unwrap(), Format::Json).unwrap();
        assert_eq!(decoded[0].seed(), Some(1));
    }
}
