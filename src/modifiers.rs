use std::fmt::Display;
use serde::{Deserialize, Serialize};


/// A comparison against a fixed face value, used both to decide which dice get
/// rerolled and which dice count as successes in a pool.
///
/// Rerolls are inclusive (`r<2` rerolls 1s and 2s) while success thresholds are
/// strict (`>7` on a d10 succeeds on 8, 9 and 10), so both flavours exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threshold {
    /// Matches values `<= n`.
    AtMost(u32),
    /// Matches values `>= n`.
    AtLeast(u32),
    /// Matches values `< n`.
    Below(u32),
    /// Matches values `> n`.
    Above(u32)
}

impl Threshold {
    /// Returns `true` if `value` satisfies the comparison.
    ///
    /// # Examples
    /// ```
    /// use rollcall::Threshold;
    ///
    /// assert!(Threshold::AtMost(2).matches(2));
    /// assert!(!Threshold::Above(7).matches(7));
    /// assert!(Threshold::Above(7).matches(8));
    /// ```
    pub const fn matches(&self, value: u32) -> bool {
        match *self {
            Threshold::AtMost(n) => value <= n,
            Threshold::AtLeast(n) => value >= n,
            Threshold::Below(n) => value < n,
            Threshold::Above(n) => value > n
        }
    }

    /// Returns `true` if the comparison matches both the lowest and the highest
    /// face of a die with `sides` sides.
    ///
    /// Thresholds are monotonic, so matching both extremes means every face
    /// matches. Used as the guard against rerolling forever.
    pub const fn covers_faces(&self, sides: u32) -> bool {
        self.matches(1) && self.matches(sides)
    }

    const fn symbol(&self) -> char {
        match self {
            Threshold::AtMost(_) | Threshold::Below(_) => '<',
            Threshold::AtLeast(_) | Threshold::Above(_) => '>'
        }
    }

    const fn value(&self) -> u32 {
        match *self {
            Threshold::AtMost(n)
            | Threshold::AtLeast(n)
            | Threshold::Below(n)
            | Threshold::Above(n) => n
        }
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.symbol(), self.value())
    }
}


/// Gameplay modifiers trailing a dice notation, e.g. the `dl1!` in `4d6dl1!`.
///
/// Every field is independent of the others. Keep and drop counts are applied
/// together in a fixed order (drop lowest, drop highest, keep lowest, keep
/// highest) on the sorted rolls, so combining them compounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Roll an extra die for every die showing its maximum face.
    pub explode: bool,
    /// Keep only this many of the highest dice.
    pub keep_high: Option<usize>,
    /// Keep only this many of the lowest dice.
    pub keep_low: Option<usize>,
    /// Discard this many of the highest dice.
    pub drop_high: Option<usize>,
    /// Discard this many of the lowest dice.
    pub drop_low: Option<usize>,
    /// Redraw a die while its value matches. `None` never rerolls.
    pub reroll: Option<Threshold>,
    /// Redraw at most once, even if the new value matches again.
    pub reroll_once: bool,
    /// Count matching dice as successes instead of summing the pool.
    pub success: Option<Threshold>
}

impl Modifiers {
    /// Returns `true` if rolling with these modifiers scores successes
    /// rather than a sum.
    pub const fn counts_successes(&self) -> bool {
        self.success.is_some()
    }

    /// Sorts `values` ascending and applies the keep/drop counts.
    ///
    /// Counts larger than what is left simply empty the sequence (for drops
    /// and `k0`) or leave it unchanged (for keeps).
    ///
    /// # Examples
    /// ```
    /// use rollcall::Modifiers;
    ///
    /// let modifiers = Modifiers { drop_low: Some(1), keep_high: Some(1), ..Default::default() };
    /// assert_eq!(modifiers.select(vec![3, 1, 4, 2]), vec![4]);
    /// ```
    pub fn select(&self, mut values: Vec<u32>) -> Vec<u32> {
        values.sort_unstable();

        if let Some(n) = self.drop_low {
            values.drain(..n.min(values.len()));
        }

        if let Some(n) = self.drop_high {
            values.truncate(values.len().saturating_sub(n));
        }

        if let Some(n) = self.keep_low {
            values.truncate(n);
        }

        if let Some(n) = self.keep_high {
            let start = values.len().saturating_sub(n);
            values.drain(..start);
        }

        values
    }

    /// Returns `true` if the reroll rule redraws every face of a `sides`-sided
    /// die except the highest, and keeps redrawing, so each die ends on its
    /// maximum.
    pub fn forces_max_face(&self, sides: u32) -> bool {
        match self.reroll {
            Some(reroll) if !self.reroll_once && sides >= 2 => {
                reroll.matches(sides - 1) && !reroll.matches(sides)
            },
            _ => false
        }
    }

    /// Lowest and highest face a `sides`-sided die can settle on once the
    /// reroll rule has run.
    ///
    /// # Examples
    /// ```
    /// use rollcall::{Modifiers, Threshold};
    ///
    /// let low = Modifiers { reroll: Some(Threshold::AtMost(2)), ..Default::default() };
    /// assert_eq!(low.face_range(6), (3, 6));
    ///
    /// let once = Modifiers { reroll_once: true, ..low };
    /// assert_eq!(once.face_range(6), (1, 6));
    /// ```
    pub fn face_range(&self, sides: u32) -> (u32, u32) {
        let (lo, hi) = (1, sides.max(1));

        match self.reroll {
            Some(reroll) if !self.reroll_once && !reroll.covers_faces(sides) => match reroll {
                Threshold::AtMost(n) => (lo.max(n.saturating_add(1)), hi),
                Threshold::Below(n) => (lo.max(n), hi),
                Threshold::AtLeast(n) => (lo, hi.min(n.saturating_sub(1))),
                Threshold::Above(n) => (lo, hi.min(n))
            },
            _ => (lo, hi)
        }
    }

    /// How many dice survive [`Modifiers::select`] out of `count`.
    pub fn kept_count(&self, count: usize) -> usize {
        let mut kept = count;
        kept = kept.saturating_sub(self.drop_low.unwrap_or(0));
        kept = kept.saturating_sub(self.drop_high.unwrap_or(0));

        if let Some(n) = self.keep_low {
            kept = kept.min(n);
        }

        if let Some(n) = self.keep_high {
            kept = kept.min(n);
        }

        kept
    }
}

impl Display for Modifiers {
    /// Formats the modifiers as a canonical notation suffix that lexes back
    /// to the same value.
    ///
    /// # Examples
    /// ```
    /// use rollcall::{Modifiers, Threshold};
    ///
    /// let modifiers = Modifiers {
    ///     explode: true,
    ///     drop_low: Some(1),
    ///     reroll: Some(Threshold::AtMost(2)),
    ///     reroll_once: true,
    ///     ..Default::default()
    /// };
    /// assert_eq!(modifiers.to_string(), "!dl1ro<2");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.explode {
            write!(f, "!")?;
        }

        if let Some(n) = self.drop_low {
            write!(f, "dl{n}")?;
        }

        if let Some(n) = self.drop_high {
            write!(f, "dh{n}")?;
        }

        if let Some(n) = self.keep_low {
            write!(f, "kl{n}")?;
        }

        if let Some(n) = self.keep_high {
            write!(f, "kh{n}")?;
        }

        if let Some(reroll) = self.reroll {
            write!(f, "r{}{reroll}", if self.reroll_once { "o" } else { "" })?;
        }

        if let Some(success) = self.success {
            write!(f, "{success}")?;
        }

        Ok(())
    }
}
