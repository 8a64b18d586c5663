use crate::RollResult;


/// Stands in for the list of dice when a roll has too many to show.
pub const SUMMARY_PLACEHOLDER: &str = "a whole bunch of dice";


/// Narrates a [`RollResult`] for the person who asked for it.
///
/// Rolls with at most `show_individual` dice list every die; bigger rolls
/// only say [`SUMMARY_PLACEHOLDER`]. Fudge dice are always listed as `+`,
/// `-` and `0`. A dice pool of a single rolled die says whether it hit
/// instead of counting successes. A nonzero flat modifier adds a second line
/// with the arithmetic.
///
/// # Examples
/// ```
/// use rollcall::{format_result, RollResult};
///
/// let result = RollResult::sum("2d6+2", vec![3, 5], 2);
/// assert_eq!(format_result(&result, 10), "Rolled 2d6+2: 3 and 5, for a total of 8.\n8 + 2 = 10");
/// ```
pub fn format_result(result: &RollResult, show_individual: usize) -> String {
    let notation = result.notation();
    let rolls = result.rolls();

    let mut text = if result.is_fudge() {
        let faces: Vec<&str> = rolls.iter().map(|&value| fudge_face(value)).collect();
        format!("Rolled {notation}: {}, for a total of {}.", faces.join(", "), result.total())
    } else {
        let listed = if rolls.len() > show_individual {
            SUMMARY_PLACEHOLDER.to_string()
        } else {
            list_rolls(rolls)
        };

        let single_die = result.dice_rolled() == 1;

        match result.success_count() {
            Some(1) if single_die => format!("Rolled {notation}: {listed}, a success!"),
            Some(_) if single_die => format!("Rolled {notation}: {listed}, no success."),
            Some(count) => {
                let noun = if count == 1 { "success" } else { "successes" };
                format!("Rolled {notation}: {listed}, for {count} {noun}.")
            },
            None if rolls.len() == 1 && rolls.len() <= show_individual => format!("Rolled {notation}: {listed}."),
            None => format!("Rolled {notation}: {listed}, for a total of {}.", result.total())
        }
    };

    let modifier = result.modifier();
    if modifier != 0 {
        let op = if modifier < 0 { '-' } else { '+' };
        text.push_str(&format!(
            "\n{} {op} {} = {}",
            result.total(),
            modifier.unsigned_abs(),
            result.modified_total()
        ));
    }

    text
}


/// Joins values as `1`, `1 and 2` or `1, 2 and 3`.
fn list_rolls(rolls: &[i64]) -> String {
    match rolls {
        [] => "no dice".to_string(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(i64::to_string).collect();
            format!("{} and {last}", init.join(", "))
        }
    }
}

fn fudge_face(value: i64) -> &'static str {
    match value {
        v if v > 0 => "+",
        v if v < 0 => "-",
        _ => "0"
    }
}
