use tracing::debug;
use crate::{format_result, DieSource, Error, Notation, Roll, RollConfig, RollResult};


/// Parses, validates and rolls `notation` with the thread-local RNG.
///
/// # Errors
/// - [`Error::InvalidNotation`] if `notation` isn't dice notation.
/// - [`Error::TooManyDice`] if it asks for more than `config.max_dice` dice.
/// - [`Error::TooFewDice`] if it asks for zero dice.
/// - [`Error::InvalidSides`] if a standard die has fewer than 2 sides.
///
/// # Examples
/// ```
/// use rollcall::{evaluate, Error, RollConfig};
///
/// let config = RollConfig::default();
///
/// let result = evaluate("4d6dl1", &config).unwrap();
/// assert_eq!(result.rolls().len(), 3);
///
/// assert_eq!(evaluate("0d6", &config), Err(Error::TooFewDice));
/// assert_eq!(evaluate("101d6", &config), Err(Error::TooManyDice { max: 100 }));
/// assert_eq!(evaluate("2d1", &config), Err(Error::InvalidSides(1)));
/// assert!(matches!(evaluate("garbage", &config), Err(Error::InvalidNotation(_))));
/// ```
pub fn evaluate(notation: &str, config: &RollConfig) -> Result<RollResult, Error> {
    evaluate_with(notation, config, &mut rand::rng())
}

/// Like [`evaluate`], drawing dice from `source`.
///
/// # Errors
/// Same as [`evaluate`].
///
/// # Examples
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use rollcall::{evaluate_with, RollConfig};
///
/// let config = RollConfig::default();
/// let first = evaluate_with("10d10!", &config, &mut StdRng::seed_from_u64(42)).unwrap();
/// let second = evaluate_with("10d10!", &config, &mut StdRng::seed_from_u64(42)).unwrap();
/// assert_eq!(first, second);
/// ```
pub fn evaluate_with<S: DieSource + ?Sized>(
    notation: &str,
    config: &RollConfig,
    source: &mut S
) -> Result<RollResult, Error> {
    let notation = Notation::parse(notation)?;
    let roll = Roll::from_notation(notation, config.max_dice)?;
    let result = roll.roll(source);

    debug!(
        notation = result.notation(),
        dice = result.rolls().len(),
        total = result.total(),
        modified_total = result.modified_total(),
        "evaluated roll"
    );

    Ok(result)
}

/// Evaluates `notation` and narrates the outcome with
/// [`format_result`], using `config.show_individual` as the listing limit.
///
/// On error, the error's `Display` is the message to show instead.
///
/// # Errors
/// Same as [`evaluate`].
pub fn narrate(notation: &str, config: &RollConfig) -> Result<(RollResult, String), Error> {
    narrate_with(notation, config, &mut rand::rng())
}

/// Like [`narrate`], drawing dice from `source`.
///
/// # Errors
/// Same as [`evaluate`].
pub fn narrate_with<S: DieSource + ?Sized>(
    notation: &str,
    config: &RollConfig,
    source: &mut S
) -> Result<(RollResult, String), Error> {
    let result = evaluate_with(notation, config, source)?;
    let text = format_result(&result, config.show_individual);
    Ok((result, text))
}
