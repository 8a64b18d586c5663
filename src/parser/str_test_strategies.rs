use proptest::prelude::*;
use crate::{Modifiers, Threshold};


pub(crate) fn reroll_strategy() -> impl Strategy<Value = Option<(Threshold, bool)>> {
    prop::option::of((
        prop_oneof![
            (1..100u32).prop_map(Threshold::AtMost),
            (1..100u32).prop_map(Threshold::AtLeast),
        ],
        any::<bool>()
    ))
}

pub(crate) fn success_strategy() -> impl Strategy<Value = Option<Threshold>> {
    prop::option::of(prop_oneof![
        (1..100u32).prop_map(Threshold::Below),
        (1..100u32).prop_map(Threshold::Above),
    ])
}

pub(crate) fn modifiers_strategy() -> impl Strategy<Value = Modifiers> {
    (
        any::<bool>(),
        prop::option::of(0..10usize),
        prop::option::of(0..10usize),
        prop::option::of(0..10usize),
        prop::option::of(0..10usize),
        reroll_strategy(),
        success_strategy()
    ).prop_map(|(explode, keep_high, keep_low, drop_high, drop_low, reroll, success)| {
        Modifiers {
            explode,
            keep_high,
            keep_low,
            drop_high,
            drop_low,
            reroll: reroll.map(|(threshold, _)| threshold),
            reroll_once: reroll.is_some_and(|(_, once)| once),
            success
        }
    })
}

pub(crate) fn flat_modifier_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (1..50i64).prop_map(|n| format!("+{n}")),
        (1..50i64).prop_map(|n| format!("-{n}")),
    ]
}

/// Notations that always pass validation with the default ceiling.
pub(crate) fn valid_notation_strategy() -> impl Strategy<Value = String> {
    (1..=20u32, 2..=20u32, flat_modifier_strategy(), modifiers_strategy())
        .prop_map(|(count, sides, flat, modifiers)| format!("{count}d{sides}{flat}{modifiers}"))
}
