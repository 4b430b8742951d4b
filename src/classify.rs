//! Metric classification: volatility magnitude and performance delta buckets.
//!
//! Both functions are pure and total. Cut points are exact: a volatility of
//! exactly 20/40/70 lands in the next band up (strict `<`), a performance of
//! exactly +/-2 stays neutral (strict `>` / `<`).

use crate::types::{PerformanceType, VolatilityLevel};

/// `<20 -> low`, `<40 -> medium`, `<70 -> high`, otherwise extreme.
pub fn volatility_level(volatility: f64) -> VolatilityLevel {
    if volatility < 20.0 {
        VolatilityLevel::Low
    } else if volatility < 40.0 {
        VolatilityLevel::Medium
    } else if volatility < 70.0 {
        VolatilityLevel::High
    } else {
        VolatilityLevel::Extreme
    }
}

/// `>2 -> bull`, `<-2 -> bear`, otherwise neutral.
pub fn performance_type(performance: f64) -> PerformanceType {
    if performance > 2.0 {
        PerformanceType::Bull
    } else if performance < -2.0 {
        PerformanceType::Bear
    } else {
        PerformanceType::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volatility_bands() {
        assert_eq!(volatility_level(0.0), VolatilityLevel::Low);
        assert_eq!(volatility_level(19.99), VolatilityLevel::Low);
        assert_eq!(volatility_level(25.0), VolatilityLevel::Medium);
        assert_eq!(volatility_level(55.0), VolatilityLevel::High);
        assert_eq!(volatility_level(99.0), VolatilityLevel::Extreme);
        // generator may exceed the conceptual 0-100 range
        assert_eq!(volatility_level(150.0), VolatilityLevel::Extreme);
    }

    #[test]
    fn test_volatility_boundaries_are_strict() {
        assert_eq!(volatility_level(20.0), VolatilityLevel::Medium);
        assert_eq!(volatility_level(40.0), VolatilityLevel::High);
        assert_eq!(volatility_level(70.0), VolatilityLevel::Extreme);
    }

    #[test]
    fn test_performance_bands() {
        assert_eq!(performance_type(5.0), PerformanceType::Bull);
        assert_eq!(performance_type(-5.0), PerformanceType::Bear);
        assert_eq!(performance_type(0.0), PerformanceType::Neutral);
    }

    #[test]
    fn test_performance_boundaries_are_strict() {
        assert_eq!(performance_type(2.0), PerformanceType::Neutral);
        assert_eq!(performance_type(2.01), PerformanceType::Bull);
        assert_eq!(performance_type(-2.0), PerformanceType::Neutral);
        assert_eq!(performance_type(-2.01), PerformanceType::Bear);
    }
}
