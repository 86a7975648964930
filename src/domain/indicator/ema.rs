//! Exponential moving average over a raw value slice.
//!
//! alpha = 2/(span+1), seed with the first value, then
//! ema[i] = x[i]*alpha + ema[i-1]*(1-alpha).
//!
//! Seeding with the first value (rather than an initial SMA) makes every
//! position defined, so composites built on top of it stay defined for any
//! non-empty input. Early positions lean heavily on the seed and converge
//! as the span fills with data.

pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || values.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = values[0];
    out.push(ema);
    for &value in &values[1..] {
        ema = value * alpha + ema * (1.0 - alpha);
        out.push(ema);
    }
    out
}
