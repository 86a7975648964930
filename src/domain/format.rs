//! Display formatting for counts and percentages.

/// Unitless count with a magnitude suffix: 1.23B, 4.56M, 7.89K, else the
/// rounded integer. Magnitude is judged on the absolute value, so negative
/// amounts keep their sign.
pub fn count(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{value:.0}")
    }
}

/// Percentage with two decimals.
pub fn pct(value: f64) -> String {
    format!("{value:.2}%")
}

/// Percentage with an explicit leading sign: +1.23% or -4.56%.
pub fn signed_pct(value: f64) -> String {
    format!("{value:+.2}%")
}
