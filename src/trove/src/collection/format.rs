//! "1 in N" odds strings

const SCALES: [(f64, f64, &str); 3] = [
    (1e6, 1e3, "k"),
    (1e9, 1e6, "M"),
    (1e12, 1e9, "B"),
];

/// Format `base * multiplier` as display odds.
///
/// Below 1,000 the raw value is rounded to an integer; k/M/B use one
/// decimal rounded half-up; anything from a trillion up is an integer
/// count of T. Negative and NaN inputs render as zero.
pub fn format_probability(base: f64, multiplier: f64) -> String {
    let n = base * multiplier;
    if n.is_infinite() && n > 0.0 {
        return "1 in ∞".to_string();
    }
    let n = if n.is_nan() || n < 0.0 { 0.0 } else { n };

    if n < 1_000.0 {
        return format!("1 in {}", n.round() as u64);
    }
    for (limit, unit, suffix) in SCALES {
        if n < limit {
            return format!("1 in {:.1}{}", round_tenths(n, unit), suffix);
        }
    }
    format!("1 in {}T", (n / 1e12).round() as u64)
}

/// `n / unit` rounded half-up to one decimal place. Dividing by a tenth of
/// the unit first keeps exact halves (1,050 → 10.5) exact.
fn round_tenths(n: f64, unit: f64) -> f64 {
    (n / (unit / 10.0)).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_tier() {
        assert_eq!(format_probability(999.0, 1.0), "1 in 999");
        assert_eq!(format_probability(2.0, 1.0), "1 in 2");
        assert_eq!(format_probability(999.4, 1.0), "1 in 999");
        assert_eq!(format_probability(0.0, 5.0), "1 in 0");
        // Rounds up to 1000 but stays below the k threshold
        assert_eq!(format_probability(999.5, 1.0), "1 in 1000");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(format_probability(1000.0, 1.0), "1 in 1.0k");
        assert_eq!(format_probability(1049.0, 1.0), "1 in 1.0k");
        assert_eq!(format_probability(1050.0, 1.0), "1 in 1.1k");
        assert_eq!(format_probability(250.0, 5.0), "1 in 1.3k");
        assert_eq!(format_probability(999_999.99, 1.0), "1 in 1000.0k");
    }

    #[test]
    fn test_millions_and_billions() {
        assert_eq!(format_probability(1_500_000.0, 1.0), "1 in 1.5M");
        assert_eq!(format_probability(1_000_000.0, 1.0), "1 in 1.0M");
        assert_eq!(format_probability(999_999_999.99, 1.0), "1 in 1000.0M");
        assert_eq!(format_probability(1_000_000_000.0, 1.0), "1 in 1.0B");
        assert_eq!(format_probability(2_000_000_000.0, 1.0), "1 in 2.0B");
        assert_eq!(format_probability(750_000_000.0, 100.0), "1 in 75.0B");
    }

    #[test]
    fn test_trillions() {
        assert_eq!(format_probability(999_999_999_999.99, 1.0), "1 in 1000.0B");
        assert_eq!(format_probability(1e12, 1.0), "1 in 1T");
        assert_eq!(format_probability(1e12, 2.5), "1 in 3T");
        assert_eq!(format_probability(1e12, 100.0), "1 in 100T");
    }

    #[test]
    fn test_multiplier_applied() {
        assert_eq!(format_probability(500.0, 2.0), "1 in 1.0k");
        assert_eq!(format_probability(200.0, 0.5), "1 in 100");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(format_probability(f64::NAN, 1.0), "1 in 0");
        assert_eq!(format_probability(-10.0, 1.0), "1 in 0");
        assert_eq!(format_probability(f64::INFINITY, 1.0), "1 in ∞");
    }
}
