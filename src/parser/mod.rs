#[cfg(test)]
pub(crate) mod str_test_strategies;

mod lexer;
mod notation;

pub(crate) use lexer::Lexer;
pub use lexer::parse_modifiers;
pub use notation::Notation;
