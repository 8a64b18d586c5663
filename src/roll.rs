use std::fmt::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use crate::{Error, Modifiers, Notation, Threshold};
use crate::config::DEFAULT_MAX_DICE;


/// Anything that can produce uniformly distributed die faces.
///
/// Every [`rand::Rng`] is a `DieSource`, so a seeded [`rand::rngs::StdRng`]
/// gives reproducible rolls. Each caller owns its source, which is why the
/// rest of the crate needs no locking.
pub trait DieSource {
    /// Returns a value in `[1, sides]`.
    fn draw(&mut self, sides: u32) -> u32;
}

impl<R: Rng + ?Sized> DieSource for R {
    fn draw(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }
}


/// The kind of die in a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dice {
    /// A die with faces numbered `1..=n`.
    Standard(u32),
    /// A Fudge/Fate die showing -1, 0 or +1.
    Fudge
}

impl Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dice::Standard(sides) => write!(f, "{sides}"),
            Dice::Fudge => write!(f, "F")
        }
    }
}


/// Rolls a single die with `sides` sides, applying the reroll rule in
/// `modifiers`.
///
/// When the reroll threshold matches both the lowest and highest face it
/// would match every face, so the first draw is kept instead of looping
/// forever. With [`Modifiers::reroll_once`] at most one redraw happens.
///
/// # Examples
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use rollcall::{roll_one, Modifiers, Threshold};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let modifiers = Modifiers { reroll: Some(Threshold::AtMost(2)), ..Default::default() };
///
/// for _ in 0..100 {
///     let value = roll_one(6, &modifiers, &mut rng);
///     assert!((3..=6).contains(&value));
/// }
/// ```
pub fn roll_one<S: DieSource + ?Sized>(sides: u32, modifiers: &Modifiers, source: &mut S) -> u32 {
    let mut value = source.draw(sides);

    let Some(reroll) = modifiers.reroll else {
        return value;
    };

    if reroll.covers_faces(sides) {
        debug!(sides, %reroll, "reroll matches every face, keeping first draw");
        return value;
    }

    while reroll.matches(value) {
        trace!(value, %reroll, "rerolling");
        value = source.draw(sides);

        if modifiers.reroll_once {
            break;
        }
    }

    value
}


/// Rolls the extra dice produced by exploding `values`.
///
/// Every value equal to `sides` adds one die; each pass only looks at the dice
/// the previous pass produced, until a pass shows no maximum face. Returns the
/// extra dice only, in the order they were rolled.
///
/// Dice with fewer than two sides never explode, and neither do dice whose
/// reroll rule only ever lets the maximum face through, since every extra die
/// would explode again.
pub fn explode<S: DieSource + ?Sized>(
    values: &[u32],
    sides: u32,
    modifiers: &Modifiers,
    source: &mut S
) -> Vec<u32> {
    let mut extra = Vec::new();

    if sides < 2 {
        return extra;
    }

    if modifiers.forces_max_face(sides) {
        debug!(sides, "every die would reroll to its maximum, not exploding");
        return extra;
    }

    let mut pending = values.iter().filter(|&&value| value == sides).count();
    let mut pass = 0usize;

    while pending > 0 {
        pass += 1;
        trace!(pass, pending, "exploding");

        let start = extra.len();
        for _ in 0..pending {
            extra.push(roll_one(sides, modifiers, source));
        }

        pending = extra[start..].iter().filter(|&&value| value == sides).count();
    }

    extra
}


/// Rolls `count` Fudge dice, each -1, 0 or +1.
pub fn roll_fudge<S: DieSource + ?Sized>(count: u32, source: &mut S) -> Vec<i64> {
    (0..count)
        .map(|_| i64::from(source.draw(3)) - 2)
        .collect()
}


/// A validated dice roll: count, die kind, flat modifier and gameplay
/// modifiers.
///
/// Built with [`Roll::builder()`] or from a parsed [`Notation`] with
/// [`Roll::from_notation()`]. Calling [`Roll::roll()`] produces a
/// [`RollResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    notation: String,
    count: u32,
    dice: Dice,
    modifier: i64,
    modifiers: Modifiers
}

impl Roll {
    /// Creates a new [`RollBuilder`] for the given die kind.
    ///
    /// # Examples
    /// ```
    /// use rollcall::{Dice, Modifiers, Roll};
    ///
    /// let roll = Roll::builder(Dice::Standard(6))
    ///     .count(4)
    ///     .modifier(2)
    ///     .modifiers(Modifiers { drop_low: Some(1), ..Default::default() })
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(roll.to_string(), "4d6+2dl1");
    /// ```
    pub fn builder(dice: Dice) -> RollBuilder {
        RollBuilder::new(dice)
    }

    /// Validates a parsed notation against a dice ceiling.
    ///
    /// The resulting roll keeps the notation's original text for its results.
    ///
    /// # Errors
    /// Same as [`RollBuilder::build()`].
    pub fn from_notation(notation: Notation, max_dice: u32) -> Result<Self, Error> {
        let mut roll = Self::builder(notation.dice)
            .count(notation.count)
            .modifier(notation.modifier)
            .modifiers(notation.modifiers)
            .max_dice(max_dice)
            .build()?;

        roll.notation = notation.text;
        Ok(roll)
    }

    /// Number of dice rolled before any explosion.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// The die kind.
    pub const fn dice(&self) -> Dice {
        self.dice
    }

    /// Flat amount added to the total.
    pub const fn modifier(&self) -> i64 {
        self.modifier
    }

    /// Gameplay modifiers. Ignored entirely for Fudge dice.
    pub const fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    /// The notation this roll reports in its results.
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// Rolls the dice.
    ///
    /// Standard dice are rolled one by one with the reroll rule, exploded if
    /// asked, sorted ascending and trimmed by the keep/drop counts. The kept
    /// dice are then summed or, with a success threshold, counted.
    ///
    /// # Examples
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use rollcall::{Dice, Roll};
    ///
    /// let roll = Roll::builder(Dice::Standard(6)).count(3).modifier(1).build().unwrap();
    /// let result = roll.roll(&mut StdRng::seed_from_u64(1));
    ///
    /// assert_eq!(result.rolls().len(), 3);
    /// assert_eq!(result.total(), result.rolls().iter().sum::<i64>());
    /// assert_eq!(result.modified_total(), result.total() + 1);
    /// ```
    pub fn roll<S: DieSource + ?Sized>(&self, source: &mut S) -> RollResult {
        let sides = match self.dice {
            Dice::Fudge => {
                let rolls = roll_fudge(self.count, source);
                return RollResult::fudge(self.notation.clone(), rolls, self.modifier);
            },
            Dice::Standard(sides) => sides
        };

        let mut values: Vec<u32> = (0..self.count)
            .map(|_| roll_one(sides, &self.modifiers, source))
            .collect();

        if self.modifiers.explode {
            let extra = explode(&values, sides, &self.modifiers, source);
            debug!(extra = extra.len(), "explosion finished");
            values.extend(extra);
        }

        let rolled = values.len();
        let kept = self.modifiers.select(values);

        let result = match self.modifiers.success {
            Some(threshold) => RollResult::successes(self.notation.clone(), kept, threshold, self.modifier),
            None => RollResult::sum(self.notation.clone(), kept, self.modifier)
        };

        result.with_dice_rolled(rolled)
    }

    /// Lowest and highest possible modified total, or `None` when exploding
    /// dice make the maximum unbounded. Faces a repeating reroll can never
    /// settle on are left out.
    ///
    /// # Examples
    /// ```
    /// use rollcall::{Dice, Modifiers, Roll};
    ///
    /// let roll = Roll::builder(Dice::Standard(6)).count(4).modifier(-1).build().unwrap();
    /// assert_eq!(roll.possible_values(), Some((3, 23)));
    ///
    /// let keep = Modifiers { keep_high: Some(1), ..Default::default() };
    /// let roll = Roll::builder(Dice::Standard(20)).count(2).modifiers(keep).build().unwrap();
    /// assert_eq!(roll.possible_values(), Some((1, 20)));
    ///
    /// let roll = Roll::builder(Dice::Fudge).count(4).build().unwrap();
    /// assert_eq!(roll.possible_values(), Some((-4, 4)));
    /// ```
    pub fn possible_values(&self) -> Option<(i64, i64)> {
        let (min, max) = match self.dice {
            Dice::Fudge => (-i64::from(self.count), i64::from(self.count)),
            Dice::Standard(_) if self.modifiers.explode => return None,
            Dice::Standard(sides) => {
                let kept = self.modifiers.kept_count(self.count as usize) as i64;
                let (lo, hi) = self.modifiers.face_range(sides);

                match self.modifiers.success {
                    Some(success) => match (success.matches(lo), success.matches(hi)) {
                        (true, true) => (kept, kept),
                        (false, false) => (0, 0),
                        _ => (0, kept)
                    },
                    None => (kept.saturating_mul(i64::from(lo)), kept.saturating_mul(i64::from(hi)))
                }
            }
        };

        Some((min.saturating_add(self.modifier), max.saturating_add(self.modifier)))
    }
}

impl Display for Roll {
    /// Formats the roll as canonical dice notation.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.dice)?;

        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }

        write!(f, "{}", self.modifiers)
    }
}


/// A builder for [`Roll`] instances.
///
/// Starts out as a single die with no modifiers and the default dice ceiling.
#[derive(Debug, Clone)]
pub struct RollBuilder {
    dice: Dice,
    count: u64,
    modifier: i64,
    modifiers: Modifiers,
    max_dice: u32
}

impl RollBuilder {
    fn new(dice: Dice) -> Self {
        Self {
            dice,
            count: 1,
            modifier: 0,
            modifiers: Modifiers::default(),
            max_dice: DEFAULT_MAX_DICE
        }
    }

    /// Sets the number of dice to roll.
    pub fn count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Sets the flat amount added to the total.
    pub fn modifier(mut self, modifier: i64) -> Self {
        self.modifier = modifier;
        self
    }

    /// Sets the gameplay modifiers.
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the most dice a single roll may ask for.
    pub fn max_dice(mut self, max_dice: u32) -> Self {
        self.max_dice = max_dice;
        self
    }

    /// Validates the configuration and builds a [`Roll`].
    ///
    /// # Errors
    /// - [`Error::TooManyDice`] if the count is above the ceiling.
    /// - [`Error::TooFewDice`] if the count is zero.
    /// - [`Error::InvalidSides`] if a standard die has fewer than 2 sides.
    ///
    /// # Examples
    /// ```
    /// use rollcall::{Dice, Error, Roll};
    ///
    /// let too_many = Roll::builder(Dice::Standard(6)).count(101).max_dice(100).build();
    /// assert_eq!(too_many, Err(Error::TooManyDice { max: 100 }));
    ///
    /// let too_few = Roll::builder(Dice::Standard(6)).count(0).build();
    /// assert_eq!(too_few, Err(Error::TooFewDice));
    ///
    /// let one_sided = Roll::builder(Dice::Standard(1)).count(2).build();
    /// assert_eq!(one_sided, Err(Error::InvalidSides(1)));
    /// ```
    pub fn build(self) -> Result<Roll, Error> {
        let count = match u32::try_from(self.count) {
            Ok(count) if count <= self.max_dice => count,
            _ => return Err(Error::TooManyDice { max: self.max_dice })
        };

        if count < 1 {
            return Err(Error::TooFewDice);
        }

        if let Dice::Standard(sides) = self.dice {
            if sides < 2 {
                return Err(Error::InvalidSides(sides));
            }
        }

        let mut roll = Roll {
            notation: String::new(),
            count,
            dice: self.dice,
            modifier: self.modifier,
            modifiers: self.modifiers
        };

        roll.notation = roll.to_string();
        Ok(roll)
    }
}


/// The outcome of one evaluated roll.
///
/// Totals are computed on construction and the result is read-only
/// afterwards: `modified_total` is always `total + modifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    rolls: Vec<i64>,
    total: i64,
    modifier: i64,
    modified_total: i64,
    notation: String,
    is_fudge: bool,
    success_count: Option<i64>,
    dice_rolled: usize
}

impl RollResult {
    /// A result whose total is the sum of `rolls`.
    pub fn sum(notation: impl Into<String>, rolls: Vec<u32>, modifier: i64) -> Self {
        let rolls: Vec<i64> = rolls.into_iter().map(i64::from).collect();
        let total = rolls.iter().sum();
        Self::new(notation.into(), rolls, total, modifier, false, None)
    }

    /// A dice pool result whose total is the number of `rolls` matching
    /// `threshold`.
    ///
    /// # Examples
    /// ```
    /// use rollcall::{RollResult, Threshold};
    ///
    /// let result = RollResult::successes("6d10>7", vec![8, 3, 9, 7, 2, 10], Threshold::Above(7), 0);
    /// assert_eq!(result.success_count(), Some(3));
    /// assert_eq!(result.total(), 3);
    /// ```
    pub fn successes(notation: impl Into<String>, rolls: Vec<u32>, threshold: Threshold, modifier: i64) -> Self {
        let count = rolls.iter().filter(|&&value| threshold.matches(value)).count() as i64;
        let rolls = rolls.into_iter().map(i64::from).collect();
        Self::new(notation.into(), rolls, count, modifier, false, Some(count))
    }

    /// A Fudge result whose total is the sum of `rolls`.
    pub fn fudge(notation: impl Into<String>, rolls: Vec<i64>, modifier: i64) -> Self {
        let total = rolls.iter().sum();
        Self::new(notation.into(), rolls, total, modifier, true, None)
    }

    fn new(
        notation: String,
        rolls: Vec<i64>,
        total: i64,
        modifier: i64,
        is_fudge: bool,
        success_count: Option<i64>
    ) -> Self {
        let rolls_len = rolls.len();

        Self {
            rolls,
            total,
            modifier,
            modified_total: total.saturating_add(modifier),
            notation,
            is_fudge,
            success_count,
            dice_rolled: rolls_len
        }
    }

    /// Records how many dice were rolled before keep/drop discarded any,
    /// including exploded dice. Defaults to the number of kept rolls.
    pub fn with_dice_rolled(mut self, dice_rolled: usize) -> Self {
        self.dice_rolled = dice_rolled;
        self
    }

    /// Kept face values in ascending order, including exploded dice. Fudge
    /// values stay in the order rolled.
    pub fn rolls(&self) -> &[i64] {
        &self.rolls
    }

    /// Sum of the kept dice, or the success count for dice pools.
    pub const fn total(&self) -> i64 {
        self.total
    }

    /// Flat modifier from the notation.
    pub const fn modifier(&self) -> i64 {
        self.modifier
    }

    /// `total + modifier`.
    pub const fn modified_total(&self) -> i64 {
        self.modified_total
    }

    /// The notation that produced this result.
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// Whether the dice were Fudge dice.
    pub const fn is_fudge(&self) -> bool {
        self.is_fudge
    }

    /// Number of successes when a success threshold was used.
    pub const fn success_count(&self) -> Option<i64> {
        self.success_count
    }

    /// Number of dice rolled, before keep/drop.
    pub const fn dice_rolled(&self) -> usize {
        self.dice_rolled
    }
}
