#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]

//! Tabletop dice notation, rolled and narrated.
//!
//! A notation like `4d6+2dl1` is split into a count, a die, a flat modifier
//! and a suffix of gameplay modifiers (explode, keep/drop, reroll, success
//! threshold), rolled into a [`RollResult`] and narrated with
//! [`format_result`].
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use rollcall::{narrate_with, RollConfig};
//!
//! let (result, text) = narrate_with("2d20+5k1", &RollConfig::default(), &mut StdRng::seed_from_u64(3)).unwrap();
//! assert_eq!(result.rolls().len(), 1);
//! assert!(text.starts_with("Rolled 2d20+5k1: "));
//! ```


#[cfg(test)]
mod roll_test_strategies;

mod config;
mod error;
mod evaluate;
mod format;
mod modifiers;
mod parser;
mod roll;

pub use config::{RollConfig, DEFAULT_MAX_DICE, DEFAULT_SHOW_INDIVIDUAL};
pub use error::Error;
pub use evaluate::{evaluate, evaluate_with, narrate, narrate_with};
pub use format::{format_result, SUMMARY_PLACEHOLDER};
pub use modifiers::{Modifiers, Threshold};
pub use parser::{parse_modifiers, Notation};
pub use roll::{explode, roll_fudge, roll_one, Dice, DieSource, Roll, RollBuilder, RollResult};
