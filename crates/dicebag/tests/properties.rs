// ABOUTME: Property tests for dice rolling and the delimited text format.
// ABOUTME: Checks membership, round-trips, keep-best ordering, and exploding shape.

use dicebag::{Dice, Die, Error, FaceSet, Format, RollMethod};
use proptest::collection::vec;
use proptest::prelude::*;

fn faces_strategy() -> impl Strategy<Value = Vec<i64>> {
    vec(-50i64..50, 1..12)
}

fn weighted_strategy() -> impl Strategy<Value = (Vec<i64>, Vec<u32>)> {
    (2usize..10)
        .prop_flat_map(|n| (vec(-50i64..50, n), vec(0u32..20, n)))
        .prop_filter("weights must not all be zero", |(_, weights)| {
            weights.iter().any(|&w| w > 0)
        })
}

fn spread_faces_strategy() -> impl Strategy<Value = Vec<i64>> {
    faces_strategy().prop_filter("needs two distinct faces", |faces| {
        faces.iter().any(|&f| f != faces[0])
    })
}

proptest! {
    #[test]
    fn roll_is_always_a_face(faces in faces_strategy(), seed in any::<u64>()) {
        let mut die: Die = Die::with_seed(faces.clone(), seed).unwrap();
        for value in die.roll_n(50).unwrap() {
            prop_assert!(faces.contains(&value));
        }
    }

    #[test]
    fn weighted_roll_is_a_reachable_face((faces, weights) in weighted_strategy(), seed in any::<u64>()) {
        let mut die: Die = Die::weighted_with_seed(faces, weights, seed).unwrap();
        let reachable: Vec<i64> = die.face_set().reachable().copied().collect();
        for value in die.roll_n(50).unwrap() {
            prop_assert!(reachable.contains(&value));
        }
    }

    #[test]
    fn delimited_round_trip(faces in faces_strategy()) {
        let die: Die = Die::new(faces).unwrap();
        let parsed = dicebag::parse(&die.to_string()).unwrap();
        prop_assert_eq!(parsed.face_set(), die.face_set());
    }

    #[test]
    fn weighted_delimited_round_trip((faces, weights) in weighted_strategy()) {
        let die: Die = Die::weighted(faces, weights).unwrap();
        let parsed = Die::decode(&die.encode(Format::Delimited).unwrap(), Format::Delimited).unwrap();
        prop_assert_eq!(parsed.face_set(), die.face_set());
    }

    #[test]
    fn face_set_round_trip((faces, weights) in weighted_strategy()) {
        let set = FaceSet::weighted(faces, weights).unwrap();
        let parsed: FaceSet = set.to_string().parse().unwrap();
        prop_assert_eq!(parsed, set);
    }

    #[test]
    fn collection_round_trip(dice_faces in vec(faces_strategy(), 1..5)) {
        let dice: Dice = dice_faces
            .into_iter()
            .map(|faces| Die::new(faces).unwrap())
            .collect();
        let parsed: Dice = dice.to_string().parse().unwrap();
        prop_assert_eq!(parsed.len(), dice.len());
        for (left, right) in parsed.iter().zip(dice.iter()) {
            prop_assert_eq!(left.face_set(), right.face_set());
        }
    }

    #[test]
    fn advantage_bounds_the_same_rolls(faces in faces_strategy(), seed in any::<u64>(), n in 1i64..8) {
        // Three dice with one seed draw the same underlying rolls.
        let rolls = Die::with_seed(faces.clone(), seed).unwrap().roll_n(n).unwrap();
        let best = Die::with_seed(faces.clone(), seed).unwrap().advantage(n).unwrap();
        let worst = Die::with_seed(faces, seed).unwrap().disadvantage(n).unwrap();

        prop_assert!(best >= worst);
        prop_assert!(rolls.iter().all(|&roll| roll <= best && roll >= worst));
    }

    #[test]
    fn exploding_stops_below_max(faces in spread_faces_strategy(), seed in any::<u64>()) {
        let mut die: Die = Die::with_seed(faces, seed).unwrap();
        let max = die.max();
        let rolls = die.explode().unwrap();
        let (last, rest) = rolls.split_last().unwrap();

        prop_assert!(*last < max);
        prop_assert!(rest.iter().all(|&roll| roll == max));
    }

    #[test]
    fn exploding_requires_distinct_faces(face in -50i64..50, size in 1usize..6) {
        let mut die: Die = Die::new(vec![face; size]).unwrap();
        prop_assert_eq!(
            die.roll_with(RollMethod::Exploding),
            Err(Error::DegenerateExploding(face))
        );
    }

    #[test]
    fn negative_counts_rejected(faces in faces_strategy(), n in i64::MIN..0) {
        let mut die: Die = Die::new(faces).unwrap();
        prop_assert_eq!(die.roll_n(n), Err(Error::NegativeCount(n)));
        prop_assert_eq!(die.roll_n_with(n, RollMethod::Normal), Err(Error::NegativeCount(n)));
    }

    #[test]
    fn batch_length_matches_count(faces in spread_faces_strategy(), n in 0i64..20) {
        let mut die: Die = Die::new(faces).unwrap();
        for method in RollMethod::ALL {
            prop_assert_eq!(die.roll_n_with(n, method).unwrap().len(), n as usize);
        }
    }
}
