use tracing::trace;
use crate::{Modifiers, Threshold};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Explode,
    Keep {
        highest: bool,
        n: usize
    },
    Drop {
        highest: bool,
        n: usize
    },
    Reroll {
        once: bool,
        threshold: Threshold
    },
    Success(Threshold),
    Skip(char),
}


/// Scans the modifier suffix of a notation one character at a time.
///
/// Nothing here fails: characters that don't start a complete modifier come
/// out as [`Token::Skip`] and only that single character is consumed.
#[derive(Debug)]
pub(crate) struct Lexer {
    input: Vec<char>,
    pub position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_lowercase().chars().collect(),
            position: 0,
        }
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let start = self.position;
        let ch = *self.input.get(start)?;
        self.position += 1;

        let token = match ch {
            '!' => Some(Token::Explode),
            'd' => {
                let highest = self.eat_one_of(&['l', 'h']) == Some('h');
                self.read_count().map(|n| Token::Drop { highest, n })
            }
            'k' => {
                let highest = self.eat_one_of(&['l', 'h']) != Some('l');
                self.read_count().map(|n| Token::Keep { highest, n })
            }
            'r' => self.read_reroll(),
            '<' => self.read_value().map(|n| Token::Success(Threshold::Below(n))),
            '>' => self.read_value().map(|n| Token::Success(Threshold::Above(n))),
            _ => None
        };

        Some(token.unwrap_or_else(|| {
            self.position = start + 1;
            Token::Skip(ch)
        }))
    }

    /// Folds every token into a [`Modifiers`]. Later modifiers of the same
    /// kind replace earlier ones.
    pub fn modifiers(mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();

        while let Some(token) = self.next_token() {
            match token {
                Token::Explode => modifiers.explode = true,
                Token::Keep { highest: true, n } => modifiers.keep_high = Some(n),
                Token::Keep { highest: false, n } => modifiers.keep_low = Some(n),
                Token::Drop { highest: true, n } => modifiers.drop_high = Some(n),
                Token::Drop { highest: false, n } => modifiers.drop_low = Some(n),
                Token::Reroll { once, threshold } => {
                    modifiers.reroll = Some(threshold);
                    modifiers.reroll_once = once;
                }
                Token::Success(threshold) => modifiers.success = Some(threshold),
                Token::Skip(ch) => trace!(%ch, position = self.position - 1, "skipping modifier character"),
            }
        }

        modifiers
    }

    fn read_reroll(&mut self) -> Option<Token> {
        let once = self.eat_one_of(&['o']).is_some();

        let threshold = match self.eat_one_of(&['<', '>'])? {
            '<' => Threshold::AtMost(self.read_value()?),
            _ => Threshold::AtLeast(self.read_value()?)
        };

        Some(Token::Reroll { once, threshold })
    }

    fn eat_one_of(&mut self, expected: &[char]) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        if expected.contains(&ch) {
            self.position += 1;
            Some(ch)
        } else {
            None
        }
    }

    fn read_digits(&mut self) -> Option<String> {
        let start = self.position;
        while self.position < self.input.len() && self.input[self.position].is_ascii_digit() {
            self.position += 1;
        }

        if start == self.position {
            return None;
        }

        Some(self.input[start..self.position].iter().collect())
    }

    /// Reads a keep/drop count, saturating on overflow.
    fn read_count(&mut self) -> Option<usize> {
        self.read_digits()
            .map(|digits| digits.parse().unwrap_or(usize::MAX))
    }

    /// Reads a threshold value, saturating on overflow.
    fn read_value(&mut self) -> Option<u32> {
        self.read_digits()
            .map(|digits| digits.parse().unwrap_or(u32::MAX))
    }
}


/// Reads a modifier suffix such as `dl1!` or `ro<2` into [`Modifiers`].
///
/// Unrecognised characters and modifiers missing their number are skipped
/// silently, so this never fails.
///
/// # Examples
/// ```
/// use rollcall::{parse_modifiers, Threshold};
///
/// let modifiers = parse_modifiers("kh3!>4");
/// assert_eq!(modifiers.keep_high, Some(3));
/// assert!(modifiers.explode);
/// assert_eq!(modifiers.success, Some(Threshold::Above(4)));
///
/// // `k` without a number is ignored, `x` is not a modifier at all
/// assert_eq!(parse_modifiers("kx"), Default::default());
/// ```
pub fn parse_modifiers(input: &str) -> Modifiers {
    Lexer::new(input).modifiers()
}


#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use crate::parser::str_test_strategies::*;


    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        std::iter::from_fn(|| lexer.next_token()).collect()
    }

    proptest! {
        #[test]
        fn test_keep_drop_tokens(letter in "[kd]", side in "(|l|h)", n in 0..1000usize) {
            let input = format!("{letter}{side}{n}");
            let highest = match (letter.as_str(), side.as_str()) {
                (_, "h") => true,
                (_, "l") => false,
                ("k", _) => true,
                _ => false
            };

            let expected = if letter == "k" {
                Token::Keep { highest, n }
            } else {
                Token::Drop { highest, n }
            };

            prop_assert_eq!(tokens(&input), vec![expected]);
        }

        #[test]
        fn test_reroll_tokens(once: bool, below: bool, n in 1..100u32) {
            let input = format!("r{}{}{n}", if once { "o" } else { "" }, if below { "<" } else { ">" });
            let threshold = if below { Threshold::AtMost(n) } else { Threshold::AtLeast(n) };

            prop_assert_eq!(tokens(&input), vec![Token::Reroll { once, threshold }]);
        }

        #[test]
        fn test_garbage_never_panics(input in "\\PC{0,40}") {
            let mut lexer = Lexer::new(&input);
            let mut count = 0;
            while lexer.next_token().is_some() {
                count += 1;
            }

            prop_assert!(count <= input.to_lowercase().chars().count());
        }

        #[test]
        fn test_display_lexes_back(modifiers in modifiers_strategy()) {
            prop_assert_eq!(parse_modifiers(&modifiers.to_string()), modifiers);
        }
    }

    #[test]
    fn test_explode_token() {
        assert_eq!(tokens("!"), vec![Token::Explode]);
        assert!(parse_modifiers("!").explode);
    }

    #[test]
    fn test_success_tokens() {
        assert_eq!(tokens(">7"), vec![Token::Success(Threshold::Above(7))]);
        assert_eq!(tokens("<3"), vec![Token::Success(Threshold::Below(3))]);
    }

    #[test]
    fn test_missing_digits_skip_single_character() {
        assert_eq!(tokens("kh"), vec![Token::Skip('k'), Token::Skip('h')]);
        assert_eq!(tokens("dh!"), vec![Token::Skip('d'), Token::Skip('h'), Token::Explode]);
        assert_eq!(
            tokens("ro>"),
            vec![Token::Skip('r'), Token::Skip('o'), Token::Skip('>')]
        );
    }

    #[test]
    fn test_incomplete_reroll_falls_through_to_success() {
        assert_eq!(
            tokens("r<2"),
            vec![Token::Reroll { once: false, threshold: Threshold::AtMost(2) }]
        );

        // `r` alone is skipped, leaving `<2` to read as a success threshold
        assert_eq!(
            tokens("rx<2"),
            vec![Token::Skip('r'), Token::Skip('x'), Token::Success(Threshold::Below(2))]
        );
    }

    #[test]
    fn test_unknown_characters_skipped() {
        let modifiers = parse_modifiers("zz!?kh2 ");
        assert!(modifiers.explode);
        assert_eq!(modifiers.keep_high, Some(2));
        assert_eq!(modifiers.keep_low, None);
    }

    #[test]
    fn test_last_write_wins() {
        let modifiers = parse_modifiers("kh1kh3ro<2r>5>4<2");
        assert_eq!(modifiers.keep_high, Some(3));
        assert_eq!(modifiers.reroll, Some(Threshold::AtLeast(5)));
        assert!(!modifiers.reroll_once);
        assert_eq!(modifiers.success, Some(Threshold::Below(2)));
    }

    #[test]
    fn test_default_sides() {
        assert_eq!(parse_modifiers("d2").drop_low, Some(2));
        assert_eq!(parse_modifiers("k1").keep_high, Some(1));
    }

    #[test]
    fn test_uppercase_modifiers() {
        let modifiers = parse_modifiers("KL2RO<1");
        assert_eq!(modifiers.keep_low, Some(2));
        assert_eq!(modifiers.reroll, Some(Threshold::AtMost(1)));
        assert!(modifiers.reroll_once);
    }

    #[test]
    fn test_oversized_numbers_saturate() {
        let modifiers = parse_modifiers("dl99999999999999999999999>99999999999");
        assert_eq!(modifiers.drop_low, Some(usize::MAX));
        assert_eq!(modifiers.success, Some(Threshold::Above(u32::MAX)));
    }
}
