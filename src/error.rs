/// Reasons a notation can not be turned into a roll.
///
/// The `Display` output of every variant is written for the person who typed
/// the notation, so callers can relay it as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input doesn't have the shape of dice notation.
    #[error("I couldn't read `{0}` as a dice roll. Try something like `2d6`, `4d6+2`, `2d20k1`, `4dF`, `10d10!`, `6d10>7` or `3d6ro<2`.")]
    InvalidNotation(String),

    /// More dice than the configured ceiling.
    #[error("That's too many dice! You can roll at most {max} at once.")]
    TooManyDice {
        /// The ceiling that was exceeded.
        max: u32
    },

    /// Zero dice.
    #[error("You need to roll at least one die.")]
    TooFewDice,

    /// A standard die with fewer than 2 sides.
    #[error("A die needs at least 2 sides, got {0}.")]
    InvalidSides(u32)
}
