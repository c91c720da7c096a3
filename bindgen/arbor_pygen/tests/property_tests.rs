#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Property-based tests for the flatten/unflatten engine.
//!
//! Random partitions of a fixed-length sequence into scalar and list
//! slots are flattened, and the emitted slice arithmetic is interpreted
//! over concrete values to verify that unflattening losslessly reproduces
//! the original per-slot grouping.

use arbor_pygen::flatten_inputs;
use arbor_schema::{ArgSlot, ElementType};
use proptest::prelude::*;
use rustc_hash::FxHashMap;

/// A value in the interpreted flat sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Item {
    Elem(u32),
    List(Vec<u32>),
}

/// `None` is a scalar slot; `Some(len)` is a list slot of that length.
type SlotShape = Option<usize>;

fn slot_shapes() -> impl Strategy<Value = Vec<SlotShape>> {
    prop::collection::vec(
        prop_oneof![Just(None), (0usize..4).prop_map(Some)],
        0..6,
    )
}

/// Interpret one emitted rewrite
/// `var = var[:i] + [var[i:i + size]] + var[i + size:]`
/// over a concrete sequence.
fn apply_slice_rewrite(sequence: &mut Vec<Item>, position: usize, size: usize) {
    let sub: Vec<u32> = sequence[position..position + size]
        .iter()
        .map(|item| match item {
            Item::Elem(value) => *value,
            Item::List(_) => panic!("list slot consumed twice"),
        })
        .collect();
    sequence.splice(position..position + size, [Item::List(sub)]);
}

fn check_round_trip(shapes: &[SlotShape]) {
    let slots: Vec<ArgSlot> = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| match shape {
            None => ArgSlot::fixed(format!("arg{i}"), ElementType::Int32),
            Some(_) => ArgSlot::typed(format!("arg{i}"), "T").with_number_attr(format!("N{i}")),
        })
        .collect();
    let slot_refs: Vec<&ArgSlot> = slots.iter().collect();
    let renames: Vec<String> = slots.iter().map(|slot| slot.name.clone()).collect();

    let flat = flatten_inputs(&slot_refs, &renames, None, &FxHashMap::default());

    // One size expression per slot, empty exactly for scalars.
    assert_eq!(flat.sizes.len(), shapes.len());
    for (shape, size) in shapes.iter().zip(&flat.sizes) {
        assert_eq!(shape.is_none(), size.is_empty());
    }
    // Every slot contributes to the flat expression exactly once.
    for rename in &renames {
        assert_eq!(flat.expr.matches(rename.as_str()).count(), 1);
    }
    if shapes.is_empty() {
        assert_eq!(flat.expr, "[]");
    }

    // Build the flat value sequence and the expected per-slot grouping.
    let mut sequence = Vec::new();
    let mut expected = Vec::new();
    let mut next = 0u32;
    for shape in shapes {
        match shape {
            None => {
                sequence.push(Item::Elem(next));
                expected.push(Item::Elem(next));
                next += 1;
            }
            Some(len) => {
                let elems: Vec<u32> = (next..next + *len as u32).collect();
                next += *len as u32;
                sequence.extend(elems.iter().map(|&value| Item::Elem(value)));
                expected.push(Item::List(elems));
            }
        }
    }

    // Unflatten: apply the emitted rewrites in slot order, resolving each
    // size expression to the length it denotes.
    for (position, size_expr) in flat.sizes.iter().enumerate() {
        if size_expr.is_empty() {
            continue;
        }
        assert_eq!(size_expr, &format!("_attr_N{position}"));
        let len = shapes[position].unwrap();
        apply_slice_rewrite(&mut sequence, position, len);
    }

    assert_eq!(sequence, expected);
}

proptest! {
    #[test]
    fn prop_flatten_unflatten_round_trip(shapes in slot_shapes()) {
        check_round_trip(&shapes);
    }
}

#[test]
fn test_round_trip_known_cases() {
    check_round_trip(&[]);
    check_round_trip(&[None, None]);
    check_round_trip(&[Some(3)]);
    check_round_trip(&[Some(0), None]);
    check_round_trip(&[None, Some(2), None, Some(1)]);
}
