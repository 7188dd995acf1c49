// ABOUTME: A single rollable die: a FaceSet plus its own RNG.
// ABOUTME: Provides uniform/weighted rolls, batch rolls, face statistics, and copy-on-write edits.

use crate::error::{Error, Result};
use crate::faces::FaceSet;
use crate::roller::{FastRng, Rng};
use std::fmt;

/// A die with faces of type `T`, rolled with its own RNG `R`.
///
/// Weighted and unweighted dice are the same type; whether a roll is
/// uniform or weighted depends on whether the [`FaceSet`] carries weights.
#[derive(Debug)]
pub struct Die<T = i64, R = FastRng> {
    faces: FaceSet<T>,
    seed: Option<u64>,
    rng: R,
}

impl<T> Die<T, FastRng> {
    /// Create an unweighted die with a randomly seeded RNG.
    pub fn new(faces: Vec<T>) -> Result<Self> {
        Ok(Self::from_faces(FaceSet::new(faces)?, None))
    }

    /// Create an unweighted die whose rolls are reproducible from `seed`.
    pub fn with_seed(faces: Vec<T>, seed: u64) -> Result<Self> {
        Ok(Self::from_faces(FaceSet::new(faces)?, Some(seed)))
    }

    /// Create a weighted die with a randomly seeded RNG.
    pub fn weighted(faces: Vec<T>, weights: Vec<u32>) -> Result<Self> {
        Ok(Self::from_faces(FaceSet::weighted(faces, weights)?, None))
    }

    /// Create a weighted die whose rolls are reproducible from `seed`.
    pub fn weighted_with_seed(faces: Vec<T>, weights: Vec<u32>, seed: u64) -> Result<Self> {
        Ok(Self::from_faces(FaceSet::weighted(faces, weights)?, Some(seed)))
    }

    /// Create a die from an already validated face set.
    pub fn from_faces(faces: FaceSet<T>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => FastRng::with_seed(seed),
            None => FastRng::new(),
        };
        Self { faces, seed, rng }
    }
}

impl Die<i64, FastRng> {
    /// Create a standard die with faces `1..=size`.
    pub fn standard(size: usize) -> Result<Self> {
        Ok(Self::from_faces(standard_faces(size)?, None))
    }

    /// Create a standard die with faces `1..=size`, seeded.
    pub fn standard_with_seed(size: usize, seed: u64) -> Result<Self> {
        Ok(Self::from_faces(standard_faces(size)?, Some(seed)))
    }
}

fn standard_faces(size: usize) -> Result<FaceSet<i64>> {
    if size < 2 {
        return Err(Error::InvalidSize(size));
    }
    FaceSet::new((1..=size as i64).collect())
}

impl<T, R: Rng> Die<T, R> {
    /// Create a die that draws from a caller-supplied RNG.
    pub fn from_face_set(faces: FaceSet<T>, rng: R) -> Self {
        Self {
            faces,
            seed: None,
            rng,
        }
    }

    /// Roll once.
    pub fn roll(&mut self) -> T
    where
        T: Clone,
    {
        self.faces.pick(&mut self.rng).clone()
    }

    /// Roll `n` times, in order.
    pub fn roll_n(&mut self, n: i64) -> Result<Vec<T>>
    where
        T: Clone,
    {
        let n = count(n)?;
        Ok((0..n).map(|_| self.roll()).collect())
    }
}

impl<T, R> Die<T, R> {
    pub fn face_set(&self) -> &FaceSet<T> {
        &self.faces
    }

    pub fn faces(&self) -> &[T] {
        self.faces.faces()
    }

    pub fn weights(&self) -> Option<&[u32]> {
        self.faces.weights()
    }

    /// Number of faces.
    pub fn size(&self) -> usize {
        self.faces.size()
    }

    /// The seed this die was built from, if it was seeded.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl<T: Clone, R> Die<T, R> {
    /// Append a face, keeping this die's RNG. See [`FaceSet::with_face`].
    pub fn with_face(self, face: T, weight: Option<u32>) -> Result<Self> {
        let faces = self.faces.with_face(face, weight)?;
        Ok(Self { faces, ..self })
    }

    /// Remove the face at `index`, keeping this die's RNG. See [`FaceSet::without_face`].
    pub fn without_face(self, index: usize) -> Result<Self> {
        let faces = self.faces.without_face(index)?;
        Ok(Self { faces, ..self })
    }
}

impl<R> Die<i64, R> {
    pub fn max(&self) -> i64 {
        self.faces.max()
    }

    pub fn min(&self) -> i64 {
        self.faces.min()
    }

    pub fn average(&self) -> f64 {
        self.faces.average()
    }
}

impl<T: fmt::Display, R> fmt::Display for Die<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.faces)
    }
}

/// Convert a signed repetition count, rejecting negatives.
pub(crate) fn count(n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| Error::NegativeCount(n))
}
