use std::str::FromStr;
use std::sync::LazyLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{Dice, Error, Modifiers};
use crate::parser::Lexer;


// count, sides or `f`, optional sign and flat modifier, meta modifier suffix
static NOTATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([0-9]+)d([0-9]+|f)(?:([+-])([0-9]+))?(.*)$").unwrap());


/// A dice notation split into its parts, before any validation against a
/// dice ceiling.
///
/// # Examples
/// ```
/// use rollcall::{Dice, Notation};
///
/// let notation: Notation = "4d6+2dl1".parse().unwrap();
/// assert_eq!(notation.count, 4);
/// assert_eq!(notation.dice, Dice::Standard(6));
/// assert_eq!(notation.modifier, 2);
/// assert_eq!(notation.modifiers.drop_low, Some(1));
///
/// let fudge: Notation = "4DF".parse().unwrap();
/// assert_eq!(fudge.dice, Dice::Fudge);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notation {
    /// The notation as it was typed, minus surrounding whitespace.
    pub text: String,
    /// Number of dice. Counts too large to represent saturate at `u64::MAX`.
    pub count: u64,
    /// Kind of die rolled.
    pub dice: Dice,
    /// Flat amount added to the total, `0` when absent.
    pub modifier: i64,
    /// Gameplay modifiers read from the suffix.
    pub modifiers: Modifiers
}

impl Notation {
    /// Splits `input` into count, dice, flat modifier and meta modifiers.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNotation`] if `input` doesn't have the shape
    /// `<count>d<sides|F>[+/-<flat>][<modifiers>]`, or if the sides or flat
    /// modifier don't fit in their numeric types.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let text = input.trim();
        let invalid = || Error::InvalidNotation(text.to_string());

        let lowered = text.to_lowercase();
        let captures = NOTATION_REGEX.captures(&lowered).ok_or_else(invalid)?;

        let count = captures[1].parse().unwrap_or(u64::MAX);

        let dice = match &captures[2] {
            "f" => Dice::Fudge,
            sides => Dice::Standard(sides.parse().map_err(|_| invalid())?)
        };

        let modifier = match (captures.get(3), captures.get(4)) {
            (Some(sign), Some(flat)) => {
                let flat: i64 = flat.as_str().parse().map_err(|_| invalid())?;
                if sign.as_str() == "-" { -flat } else { flat }
            },
            _ => 0
        };

        let suffix = captures.get(5).map_or("", |m| m.as_str());
        let modifiers = Lexer::new(suffix).modifiers();

        debug!(notation = text, count, %dice, modifier, %modifiers, "parsed notation");

        Ok(Self {
            text: text.to_string(),
            count,
            dice,
            modifier,
            modifiers
        })
    }
}

impl FromStr for Notation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;
    use crate::Threshold;
    use crate::parser::str_test_strategies::*;


    proptest! {
        #[test]
        fn test_valid_notations_parse(input in valid_notation_strategy()) {
            let notation = Notation::parse(&input);
            prop_assert!(notation.is_ok(), "{input} failed: {notation:?}");
        }

        #[test]
        fn test_parts_recovered(
            count in 0..1000u64,
            sides in 0..1000u32,
            flat in -100..100i64,
            modifiers in modifiers_strategy()
        ) {
            let sign = if flat < 0 { "-" } else { "+" };
            let input = format!("{count}d{sides}{sign}{}{modifiers}", flat.abs());
            let notation = Notation::parse(&input).unwrap();

            prop_assert_eq!(notation.count, count);
            prop_assert_eq!(notation.dice, Dice::Standard(sides));
            prop_assert_eq!(notation.modifier, flat);
            prop_assert_eq!(notation.modifiers, modifiers);
        }
    }

    #[test]
    fn test_documented_examples() {
        for input in ["2d6", "4d6+2", "2d20k1", "4dF", "10d10!", "8d6d2", "6d10>7", "3d6ro<2"] {
            assert!(Notation::parse(input).is_ok(), "{input}");
        }
    }

    #[test]
    fn test_modifier_parts() {
        let notation = Notation::parse("8d6d2").unwrap();
        assert_eq!(notation.dice, Dice::Standard(6));
        assert_eq!(notation.modifiers.drop_low, Some(2));

        let notation = Notation::parse("6d10>7").unwrap();
        assert_eq!(notation.modifiers.success, Some(Threshold::Above(7)));

        let notation = Notation::parse("3d6-4ro<2").unwrap();
        assert_eq!(notation.modifier, -4);
        assert_eq!(notation.modifiers.reroll, Some(Threshold::AtMost(2)));
        assert!(notation.modifiers.reroll_once);
    }

    #[test]
    fn test_invalid_notations() {
        for input in ["garbage", "", "d6", "2d", "2x6", "-2d6", "2 d6", "٣d6", "３d6", "3d٦"] {
            assert!(matches!(Notation::parse(input), Err(Error::InvalidNotation(_))), "{input}");
        }
    }

    #[test]
    fn test_trailing_garbage_is_not_an_error() {
        for input in ["2d6.5", "2dF6", "2d6 please", "1d20??"] {
            assert!(Notation::parse(input).is_ok(), "{input}");
        }
    }

    #[test]
    fn test_case_and_whitespace() {
        let notation = Notation::parse("  2D20KH1 ").unwrap();
        assert_eq!(notation.text, "2D20KH1");
        assert_eq!(notation.dice, Dice::Standard(20));
        assert_eq!(notation.modifiers.keep_high, Some(1));
    }

    #[test]
    fn test_oversized_numbers() {
        let notation = Notation::parse("99999999999999999999999d6").unwrap();
        assert_eq!(notation.count, u64::MAX);

        assert!(matches!(
            Notation::parse("2d99999999999"),
            Err(Error::InvalidNotation(_))
        ));
        assert!(matches!(
            Notation::parse("2d6+99999999999999999999999"),
            Err(Error::InvalidNotation(_))
        ));
    }

    #[test]
    fn test_dangling_sign_is_a_modifier_character() {
        let notation = Notation::parse("2d6+").unwrap();
        assert_eq!(notation.modifier, 0);
        assert_eq!(notation.modifiers, Modifiers::default());
    }
}
