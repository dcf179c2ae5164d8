//=========================================================================
// Score Formatting
//=========================================================================

/// Number of digits shown for scores.
pub const SCORE_DIGITS: usize = 5;

/// Renders a score the way the HUD shows it: floored, never negative,
/// zero-padded to five digits.
///
/// ```
/// use endless_runner::game::format_score;
///
/// assert_eq!(format_score(42.9), "00042");
/// ```
pub fn format_score(score: f32) -> String {
    format!("{:0width$}", final_score(score), width = SCORE_DIGITS)
}

/// Integer score reported at game over: the floor of the accumulated score.
///
/// Negative and NaN inputs give 0; values past `u32::MAX` saturate.
pub fn final_score(score: f32) -> u32 {
    // `as` saturates and maps NaN to 0
    score.floor() as u32
}
