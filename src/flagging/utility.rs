//! Basic statistics and rounding helpers for the aggregation step.

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the sample standard deviation given a pre-computed mean.
/// Returns `None` for fewer than 2 values (statistics undefined).
pub fn stddev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    Some(variance.sqrt())
}

/// Rounds to `digits` decimal places; negative `digits` rounds to the left
/// of the decimal point (-1 rounds to tens).
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Exponent of the least significant decimal digit of `v`:
/// 1.25 -> -2, 2.5 -> -1, 7 -> 0, 250 -> 1.
///
/// Works on the shortest round-trip decimal representation, which matches
/// how the values were written in the input file.
fn last_digit_exponent(v: f64) -> i32 {
    let s = format!("{}", v);
    let (mantissa, exp) = match s.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (s.as_str(), 0),
    };
    match mantissa.split_once('.') {
        Some((_, frac)) => exp - frac.len() as i32,
        None => {
            let digits = mantissa.trim_start_matches('-');
            let stripped = digits.trim_end_matches('0');
            if stripped.is_empty() {
                exp
            } else {
                exp + (digits.len() - stripped.len()) as i32
            }
        }
    }
}

/// Minimum last-digit exponent over a whole series, i.e. the most precise
/// digit position any input value uses. `None` for an empty series.
pub fn min_digit_exponent(values: impl IntoIterator<Item = f64>) -> Option<i32> {
    values.into_iter().map(last_digit_exponent).min()
}

/// Rounding precision (decimal digits) for all aggregate outputs of one
/// series: the minimal number of decimals that represents every input
/// value without loss. A negative result (inputs with trailing zeros)
/// is bumped by one so rounding never moves a value by more than one
/// unit in the last significant place.
pub fn series_rounding(values: impl IntoIterator<Item = f64>) -> i32 {
    let Some(mindig) = min_digit_exponent(values) else {
        return 0;
    };
    let mut rounding = -mindig;
    if rounding < 0 {
        rounding += 1;
    }
    rounding
}
