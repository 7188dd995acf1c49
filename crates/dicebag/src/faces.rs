// ABOUTME: Validated face lists with optional per-face weights.
// ABOUTME: Edits are copy-on-write so a FaceSet is always consistent when rolled.

use crate::error::{Error, Result};
use crate::roller::{pick_uniform, pick_weighted, Rng};
use std::fmt;

/// The faces of a die, plus an optional weight for each face.
///
/// A `FaceSet` is never empty, and when weights are present there is exactly
/// one per face and they do not sum to zero. Both properties are checked on
/// construction; edits return a new set rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceSet<T = i64> {
    faces: Vec<T>,
    weights: Option<Vec<u32>>,
}

impl<T> FaceSet<T> {
    /// Create an unweighted face set. Every face is equally likely.
    pub fn new(faces: Vec<T>) -> Result<Self> {
        if faces.is_empty() {
            return Err(Error::EmptyFaces);
        }
        Ok(Self {
            faces,
            weights: None,
        })
    }

    /// Create a weighted face set where `weights[i]` is the relative
    /// likelihood of `faces[i]`.
    ///
    /// A single face is always rolled, so its weight is dropped.
    pub fn weighted(faces: Vec<T>, weights: Vec<u32>) -> Result<Self> {
        if faces.is_empty() {
            return Err(Error::EmptyFaces);
        }
        if weights.len() != faces.len() {
            return Err(Error::WeightMismatch {
                faces: faces.len(),
                weights: weights.len(),
            });
        }
        if weights.iter().all(|&w| w == 0) {
            return Err(Error::ZeroTotalWeight);
        }
        if faces.len() == 1 {
            return Self::new(faces);
        }
        Ok(Self {
            faces,
            weights: Some(weights),
        })
    }

    pub fn faces(&self) -> &[T] {
        &self.faces
    }

    pub fn weights(&self) -> Option<&[u32]> {
        self.weights.as_deref()
    }

    /// Number of faces.
    pub fn size(&self) -> usize {
        self.faces.len()
    }

    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Faces that can actually come up: all of them for an unweighted set,
    /// only those with a positive weight otherwise.
    pub fn reachable(&self) -> impl Iterator<Item = &T> + '_ {
        self.faces.iter().enumerate().filter_map(move |(i, face)| {
            match &self.weights {
                Some(weights) if weights[i] == 0 => None,
                _ => Some(face),
            }
        })
    }

    /// Select one face using `rng`.
    pub(crate) fn pick(&self, rng: &mut impl Rng) -> &T {
        let index = match &self.weights {
            Some(weights) => pick_weighted(weights, rng),
            None => pick_uniform(self.faces.len(), rng),
        };
        &self.faces[index]
    }
}

impl<T: Clone> FaceSet<T> {
    /// Return a copy of this set with `face` appended.
    ///
    /// A weighted set needs a `weight` for the new face. Giving a weight to
    /// an unweighted set turns it into a weighted one where every existing
    /// face has weight 1.
    pub fn with_face(&self, face: T, weight: Option<u32>) -> Result<Self> {
        let mut faces = self.faces.clone();
        faces.push(face);

        match (&self.weights, weight) {
            (None, None) => Self::new(faces),
            (None, Some(weight)) => {
                let mut weights = vec![1; self.faces.len()];
                weights.push(weight);
                Self::weighted(faces, weights)
            }
            (Some(weights), Some(weight)) => {
                let mut weights = weights.clone();
                weights.push(weight);
                Self::weighted(faces, weights)
            }
            (Some(weights), None) => Err(Error::WeightMismatch {
                faces: faces.len(),
                weights: weights.len(),
            }),
        }
    }

    /// Return a copy of this set without the face (and weight) at `index`.
    pub fn without_face(&self, index: usize) -> Result<Self> {
        if index >= self.faces.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.faces.len(),
            });
        }

        let mut faces = self.faces.clone();
        faces.remove(index);

        match &self.weights {
            Some(weights) => {
                let mut weights = weights.clone();
                weights.remove(index);
                Self::weighted(faces, weights)
            }
            None => Self::new(faces),
        }
    }
}

impl FaceSet<i64> {
    /// Highest face value.
    pub fn max(&self) -> i64 {
        self.faces.iter().copied().fold(self.faces[0], i64::max)
    }

    /// Lowest face value.
    pub fn min(&self) -> i64 {
        self.faces.iter().copied().fold(self.faces[0], i64::min)
    }

    /// Mean of the face values, ignoring weights.
    pub fn average(&self) -> f64 {
        self.faces.iter().map(|&f| f as f64).sum::<f64>() / self.faces.len() as f64
    }
}

/// Writes the delimited form: `f1,f2,...` or `f1,f2,...:w1,w2,...`.
impl<T: fmt::Display> fmt::Display for FaceSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.faces)?;
        if let Some(weights) = &self.weights {
            write!(f, ":")?;
            write_joined(f, weights)?;
        }
        Ok(())
    }
}

fn write_joined<V: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[V]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(FaceSet::<i64>::new(vec![]), Err(Error::EmptyFaces));
    }

    #[test]
    fn test_weighted_validation() {
        assert_eq!(
            FaceSet::weighted(vec![1, 2, 3], vec![1, 1]),
            Err(Error::WeightMismatch { faces: 3, weights: 2 })
        );
        assert_eq!(
            FaceSet::weighted(vec![1, 2], vec![0, 0]),
            Err(Error::ZeroTotalWeight)
        );
        let set = FaceSet::weighted(vec![1, 2, 3], vec![1, 0, 2]).unwrap();
        assert_eq!(set.weights(), Some(&[1, 0, 2][..]));
    }

    #[test]
    fn test_single_weighted_face_is_plain() {
        let set = FaceSet::weighted(vec![4], vec![9]).unwrap();
        assert!(!set.is_weighted());
        assert_eq!(set.to_string(), "4");
    }

    #[test]
    fn test_stats() {
        let set: FaceSet = FaceSet::new(vec![1, 1, 2, 2, 3, 3]).unwrap();
        assert_eq!(set.min(), 1);
        assert_eq!(set.max(), 3);
        assert_eq!(set.average(), 2.0);
    }

    #[test]
    fn test_stats_ignore_weights() {
        let set: FaceSet = FaceSet::weighted(vec![1, 10], vec![100, 1]).unwrap();
        assert_eq!(set.average(), 5.5);
        assert_eq!(set.max(), 10);
    }

    #[test]
    fn test_reachable_skips_zero_weight() {
        let set = FaceSet::weighted(vec![1, 2, 3], vec![2, 0, 1]).unwrap();
        let reachable: Vec<i64> = set.reachable().copied().collect();
        assert_eq!(reachable, vec![1, 3]);
    }

    #[test]
    fn test_with_face_is_copy_on_write() {
        let set = FaceSet::new(vec![1, 2]).unwrap();
        let grown = set.with_face(3, None).unwrap();
        assert_eq!(set.faces(), &[1, 2]);
        assert_eq!(grown.faces(), &[1, 2, 3]);
    }

    #[test]
    fn test_with_face_promotes_to_weighted() {
        let set = FaceSet::new(vec![1, 2]).unwrap();
        let grown = set.with_face(3, Some(4)).unwrap();
        assert_eq!(grown.weights(), Some(&[1, 1, 4][..]));
    }

    #[test]
    fn test_with_face_weighted_needs_weight() {
        let set = FaceSet::weighted(vec![1, 2], vec![1, 3]).unwrap();
        assert_eq!(
            set.with_face(3, None),
            Err(Error::WeightMismatch { faces: 3, weights: 2 })
        );
        let grown = set.with_face(3, Some(5)).unwrap();
        assert_eq!(grown.to_string(), "1,2,3:1,3,5");
    }

    #[test]
    fn test_without_face() {
        let set = FaceSet::weighted(vec![1, 2, 3], vec![1, 2, 3]).unwrap();
        let shrunk = set.without_face(1).unwrap();
        assert_eq!(shrunk.to_string(), "1,3:1,3");
        assert_eq!(
            set.without_face(3),
            Err(Error::IndexOutOfBounds { index: 3, size: 3 })
        );
    }

    #[test]
    fn test_without_face_keeps_invariant() {
        let single = FaceSet::new(vec![7]).unwrap();
        assert_eq!(single.without_face(0), Err(Error::EmptyFaces));

        let set = FaceSet::weighted(vec![1, 2, 3], vec![0, 5, 0]).unwrap();
        assert_eq!(set.without_face(1), Err(Error::ZeroTotalWeight));
    }

    #[test]
    fn test_display() {
        assert_eq!(FaceSet::new(vec![-1, 0, 1]).unwrap().to_string(), "-1,0,1");
        assert_eq!(
            FaceSet::weighted(vec![1, 2, 3], vec![1, 1, 2]).unwrap().to_string(),
            "1,2,3:1,1,2"
        );
    }
}
