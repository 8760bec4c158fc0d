use std::collections::BTreeSet;

use flowset::{BoundedFlowSet, FlowSet, PackedSet, SparseSet, Universe};
use proptest::prelude::*;

const MAX_UNIVERSE: u32 = 300;

/// A universe size together with two subsets drawn from it.
fn arb_operands() -> impl Strategy<Value = (u32, Vec<u32>, Vec<u32>)> {
    (1..=MAX_UNIVERSE).prop_flat_map(|size| {
        let members = proptest::collection::vec(0..size, 0..=(size as usize));
        (Just(size), members.clone(), members)
    })
}

/// Like [`arb_operands`], but pinned to sizes around word boundaries.
fn arb_boundary_operands() -> impl Strategy<Value = (u32, Vec<u32>, Vec<u32>)> {
    prop::sample::select(vec![1u32, 31, 32, 33, 63, 64, 65, 127, 128, 129]).prop_flat_map(|size| {
        let members = proptest::collection::vec(0..size, 0..=(size as usize));
        (Just(size), members.clone(), members)
    })
}

fn packed(universe: &Universe<u32>, values: &[u32]) -> PackedSet<u32> {
    PackedSet::from_elements(universe, values.iter().copied()).unwrap()
}

fn sparse(values: &[u32]) -> SparseSet<u32> {
    values.iter().copied().collect()
}

fn sorted(values: &[u32]) -> Vec<u32> {
    values.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

proptest! {
    #[test]
    fn size_matches_to_list((size, a, _b) in arb_operands()) {
        let universe = Universe::new(0..size);
        let s = packed(&universe, &a);
        prop_assert_eq!(s.size(), s.to_list().len());
        prop_assert_eq!(s.to_list(), sorted(&a));
        prop_assert_eq!(s.is_empty(), a.is_empty());
    }

    #[test]
    fn full_range_matches_to_list((size, a, _b) in arb_operands()) {
        let universe = Universe::new(0..size);
        let s = packed(&universe, &a);
        prop_assert_eq!(s.to_list_range(0, size as usize - 1).unwrap(), s.to_list());
    }

    #[test]
    fn range_is_a_window(
        (size, a, _b) in arb_operands(),
        low in 0..MAX_UNIVERSE,
        high in 0..MAX_UNIVERSE,
    ) {
        let universe = Universe::new(0..size);
        let s = packed(&universe, &a);
        let high = high % size;
        let expected: Vec<u32> =
            s.to_list().into_iter().filter(|&v| low <= v && v <= high).collect();
        prop_assert_eq!(s.to_list_range(low as usize, high as usize).unwrap(), expected);
    }

    #[test]
    fn packed_matches_fallback((size, a, b) in arb_operands()) {
        let universe = Universe::new(0..size);
        let (pa, pb) = (packed(&universe, &a), packed(&universe, &b));
        let sb = sparse(&b);
        let mut fast = universe.empty_set();
        let mut slow = universe.empty_set();

        pa.union_into(&pb, &mut fast).unwrap();
        pa.union_into(&sb, &mut slow).unwrap();
        prop_assert_eq!(&fast, &slow);

        pa.intersection_into(&pb, &mut fast).unwrap();
        pa.intersection_into(&sb, &mut slow).unwrap();
        prop_assert_eq!(&fast, &slow);

        pa.difference_into(&pb, &mut fast).unwrap();
        pa.difference_into(&sb, &mut slow).unwrap();
        prop_assert_eq!(&fast, &slow);
    }

    #[test]
    fn in_place_matches_into((size, a, b) in arb_operands()) {
        let universe = Universe::new(0..size);
        let (pa, pb) = (packed(&universe, &a), packed(&universe, &b));
        let mut dest = universe.empty_set();

        pa.union_into(&pb, &mut dest).unwrap();
        let mut acc = pa.clone();
        let changed = acc.union_with(&pb).unwrap();
        prop_assert_eq!(&acc, &dest);
        prop_assert_eq!(changed, acc != pa);

        pa.difference_into(&pb, &mut dest).unwrap();
        let mut acc = pa.clone();
        let changed = acc.subtract_with(&pb).unwrap();
        prop_assert_eq!(&acc, &dest);
        prop_assert_eq!(changed, acc != pa);
    }

    #[test]
    fn complement_partitions_universe((size, a, _b) in arb_operands()) {
        let universe = Universe::new(0..size);
        let s = packed(&universe, &a);
        let mut complement = universe.empty_set();
        s.complement_into(&mut complement).unwrap();

        prop_assert_eq!(s.size() + complement.size(), size as usize);
        let mut overlap = universe.empty_set();
        s.intersection_into(&complement, &mut overlap).unwrap();
        prop_assert!(overlap.is_empty());

        let mut twice = universe.empty_set();
        complement.complement_into(&mut twice).unwrap();
        prop_assert_eq!(&twice, &s);
    }

    #[test]
    fn de_morgan((size, a, b) in arb_operands()) {
        let universe = Universe::new(0..size);
        let (pa, pb) = (packed(&universe, &a), packed(&universe, &b));

        let mut union = universe.empty_set();
        pa.union_into(&pb, &mut union).unwrap();
        union.complement_in_place();

        let (mut na, mut nb) = (pa.clone(), pb.clone());
        na.complement_in_place();
        nb.complement_in_place();
        let mut both = universe.empty_set();
        na.intersection_into(&nb, &mut both).unwrap();

        prop_assert_eq!(union, both);
    }

    #[test]
    fn equality_is_representation_blind((size, a, _b) in arb_operands()) {
        let universe = Universe::new(0..size);
        let s = packed(&universe, &a);
        let foreign = sparse(&a);
        prop_assert!(s.equals(&foreign));
        prop_assert!(foreign.equals(&s));

        let mut copy = Universe::new(0..size).empty_set();
        s.copy_into(&mut copy).unwrap();
        prop_assert!(copy.equals(&s));
    }

    #[test]
    fn cursor_removal_keeps_the_rest((size, a, b) in arb_operands()) {
        let universe = Universe::new(0..size);
        let mut s = packed(&universe, &a);
        let doomed = sparse(&b);

        let mut visited = Vec::new();
        let mut cursor = s.cursor();
        while let Some(value) = cursor.next() {
            visited.push(value);
            if doomed.contains(&value) {
                cursor.remove_current().unwrap();
            }
        }

        prop_assert_eq!(visited, sorted(&a));
        let expected: Vec<u32> = sorted(&a).into_iter().filter(|v| !b.contains(v)).collect();
        prop_assert_eq!(s.to_list(), expected);
    }

    #[test]
    fn algebra_matches_btreeset((size, a, b) in arb_boundary_operands()) {
        let universe = Universe::new(0..size);
        let (pa, pb) = (packed(&universe, &a), packed(&universe, &b));
        let (ta, tb): (BTreeSet<u32>, BTreeSet<u32>) =
            (a.iter().copied().collect(), b.iter().copied().collect());

        let mut union = universe.empty_set();
        let mut intersection = universe.empty_set();
        let mut difference = universe.empty_set();
        let mut complement = universe.empty_set();
        pa.union_into(&pb, &mut union).unwrap();
        pa.intersection_into(&pb, &mut intersection).unwrap();
        pa.difference_into(&pb, &mut difference).unwrap();
        pa.complement_into(&mut complement).unwrap();

        for e in 0..size {
            let (in_a, in_b) = (ta.contains(&e), tb.contains(&e));
            prop_assert_eq!(union.contains(&e), in_a || in_b, "union at {}", e);
            prop_assert_eq!(intersection.contains(&e), in_a && in_b, "intersection at {}", e);
            prop_assert_eq!(difference.contains(&e), in_a && !in_b, "difference at {}", e);
            prop_assert_eq!(complement.contains(&e), !in_a, "complement at {}", e);
        }

        prop_assert_eq!(union.to_list(), ta.union(&tb).copied().collect::<Vec<_>>());
        prop_assert_eq!(intersection.to_list(), ta.intersection(&tb).copied().collect::<Vec<_>>());
        prop_assert_eq!(difference.to_list(), ta.difference(&tb).copied().collect::<Vec<_>>());
        prop_assert_eq!(complement.size(), size as usize - ta.len());
    }
}
