use shared::{
    domain::{ScoreEntry, SCORE_MAX, SCORE_MIN},
    error::ValidationError,
};

/// Outcome of one pass over every indicator.
///
/// Both flags are computed over all values; [`ScoreCheck::verdict`] decides which one
/// the user hears about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCheck {
    pub all_filled: bool,
    pub range_error: bool,
}

impl ScoreCheck {
    pub fn run(scores: &ScoreEntry) -> Self {
        let mut check = Self {
            all_filled: true,
            range_error: false,
        };
        for (_, raw) in scores.iter() {
            if raw.is_empty() {
                check.all_filled = false;
            }
            if !is_score_in_range(coerce_number(raw)) {
                check.range_error = true;
            }
        }
        check
    }

    /// The empty-field notice wins over the range notice.
    pub fn verdict(self) -> Result<(), ValidationError> {
        if !self.all_filled {
            return Err(ValidationError::EmptyField);
        }
        if self.range_error {
            return Err(ValidationError::OutOfRange);
        }
        Ok(())
    }
}

pub fn validate_scores(scores: &ScoreEntry) -> Result<(), ValidationError> {
    ScoreCheck::run(scores).verdict()
}

fn is_score_in_range(value: f64) -> bool {
    value.is_finite()
        && value.fract() == 0.0
        && value >= f64::from(SCORE_MIN)
        && value <= f64::from(SCORE_MAX)
}

/// Number-input coercion of raw text: surrounding whitespace is ignored, blank text is
/// zero, unparsable text is NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // f64's parser also takes "inf" and "nan" spellings, which are not numbers here.
    let only_numeric = text
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'));
    if !only_numeric {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, ch| {
            ch.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
