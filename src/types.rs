//! Core data model: per-day records, the day index, and grid cells.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One synthetic trading day for one symbol.
///
/// The generator samples `high`/`low` independently of `open`/`close`, so
/// `low <= open, close <= high` is NOT guaranteed. Out-of-order bounds are
/// accepted-but-flagged data (see [`DailyRecord::has_ordered_bounds`]), never
/// rejected input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Percentage, conceptually 0-100.
    pub volatility: f64,
    pub liquidity: f64,
    /// Signed percentage delta.
    pub performance: f64,
    pub market_cap: Option<f64>,
}

impl DailyRecord {
    /// Canonical `YYYY-MM-DD` day key.
    pub fn day_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// True when `low <= open, close <= high` holds.
    pub fn has_ordered_bounds(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }
}

/// Calendar day -> record lookup. At most one record per day; rebuilt
/// wholesale whenever the reference date or symbol changes, never mutated
/// in place.
pub type DayRecordIndex = BTreeMap<NaiveDate, DailyRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl VolatilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityLevel::Low => "low",
            VolatilityLevel::Medium => "medium",
            VolatilityLevel::High => "high",
            VolatilityLevel::Extreme => "extreme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceType {
    Bull,
    Bear,
    Neutral,
}

impl PerformanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceType::Bull => "bull",
            PerformanceType::Bear => "bear",
            PerformanceType::Neutral => "neutral",
        }
    }
}

/// Browsing granularity owned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Day,
    Week,
    Month,
}

/// One visual cell in the fixed 6x7 calendar grid.
///
/// `volatility_level` / `performance_type` are always derived from `record`
/// via the classifier (defaults `low`/`neutral` when no record exists for the
/// day), never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub record: Option<DailyRecord>,
    pub volatility_level: VolatilityLevel,
    pub performance_type: PerformanceType,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_in_current_month: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(open: f64, high: f64, low: f64, close: f64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            symbol: "BTC".to_string(),
            open,
            high,
            low,
            close,
            volume: 1.0,
            volatility: 10.0,
            liquidity: 1.0,
            performance: 0.0,
            market_cap: None,
        }
    }

    #[test]
    fn test_day_key_format() {
        let r = record(1.0, 2.0, 0.5, 1.5);
        assert_eq!(r.day_key(), "2024-01-05");
    }

    #[test]
    fn test_ordered_bounds_detection() {
        assert!(record(100.0, 110.0, 90.0, 105.0).has_ordered_bounds());
        // high sampled below close: flagged, not rejected
        assert!(!record(100.0, 101.0, 90.0, 102.0).has_ordered_bounds());
        assert!(!record(89.0, 110.0, 90.0, 105.0).has_ordered_bounds());
    }

    #[test]
    fn test_enum_serialization_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&VolatilityLevel::Extreme).unwrap(),
            "\"extreme\""
        );
        assert_eq!(
            serde_json::to_string(&PerformanceType::Bull).unwrap(),
            "\"bull\""
        );
        assert_eq!(serde_json::to_string(&Timeframe::Month).unwrap(), "\"month\"");
    }

    #[test]
    fn test_record_date_serializes_as_day_key() {
        let r = record(1.0, 2.0, 0.5, 1.5);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["date"], "2024-01-05");
    }
}
