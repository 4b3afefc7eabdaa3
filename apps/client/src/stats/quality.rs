use serde::Serialize;

/// `round(100 * count / total)` with round-half-up, in integer arithmetic.
/// A zero total yields 0; the result is always within 0..=100.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let count = count.min(total);
    let pct = (200 * count + total) / (2 * total);
    u32::try_from(pct).unwrap_or(100)
}

/// A [0, 1] score as a whole percentage. Out-of-range input is clamped, NaN reads as 0.
pub fn score_percent(score: f64) -> u32 {
    if !score.is_finite() {
        return 0;
    }
    // f64::round is half-away-from-zero, i.e. half-up for non-negative values
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QualityMetrics {
    pub skills_pct: u32,
    pub location_pct: u32,
    pub description_pct: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 3), 100);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn test_percentage_stays_in_range() {
        for total in 1..20 {
            for count in 0..=total + 2 {
                assert!(percentage(count, total) <= 100);
            }
        }
    }

    #[test]
    fn test_score_percent() {
        assert_eq!(score_percent(0.6167), 62);
        assert_eq!(score_percent(0.125), 13);
        assert_eq!(score_percent(1.4), 100);
        assert_eq!(score_percent(-0.2), 0);
        assert_eq!(score_percent(f64::NAN), 0);
    }
}
