use std::collections::VecDeque;
use proptest::prelude::*;
use crate::parser::str_test_strategies::modifiers_strategy;
use crate::roll::{DieSource, Dice, Roll};


/// Replays a fixed list of faces, ignoring the requested number of sides.
#[derive(Debug)]
pub(crate) struct Scripted {
    faces: VecDeque<u32>,
    draws: usize
}

impl Scripted {
    pub fn new(faces: &[u32]) -> Self {
        Self {
            faces: faces.iter().copied().collect(),
            draws: 0
        }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl DieSource for Scripted {
    fn draw(&mut self, _sides: u32) -> u32 {
        self.draws += 1;
        self.faces.pop_front().expect("scripted source ran out of faces")
    }
}


pub(crate) fn dice_strategy() -> impl Strategy<Value = Dice> {
    prop_oneof![
        4 => (2..=100u32).prop_map(Dice::Standard),
        1 => Just(Dice::Fudge),
    ]
}

pub(crate) fn roll_strategy() -> impl Strategy<Value = Roll> {
    (dice_strategy(), 1..=30u64, -20..=20i64, modifiers_strategy())
        .prop_map(|(dice, count, modifier, modifiers)| {
            Roll::builder(dice)
                .count(count)
                .modifier(modifier)
                .modifiers(modifiers)
                .build()
                .unwrap()
        })
}
