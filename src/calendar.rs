//! Calendar-grid construction: mapping a reference month onto a fixed
//! 42-cell grid with Sunday-aligned weeks.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::classify;
use crate::types::{DayRecordIndex, GridCell, PerformanceType, VolatilityLevel};

/// 6 weeks x 7 days. Constant regardless of month length or alignment so the
/// grid height never shifts between months.
pub const GRID_CELLS: usize = 42;

// =============================================================================
// Day-granularity date helpers
// =============================================================================

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// Sunday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Saturday of the week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date)
        .checked_add_days(Days::new(6))
        .unwrap_or(date)
}

// =============================================================================
// Grid builder
// =============================================================================

/// Builds the 42-cell grid for the month containing `reference`.
///
/// Cells run from the Sunday of the week containing the 1st of the month
/// through the Saturday of the week containing its last day, padded with
/// consecutive days until exactly [`GRID_CELLS`] entries exist (a 28-day
/// month aligned to Sunday spans only 4 weeks). Dates increase strictly by
/// one day per cell. `today` is passed in rather than read from a clock so
/// the builder stays a pure function of its inputs.
pub fn build_grid(
    reference: NaiveDate,
    index: &DayRecordIndex,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<GridCell> {
    let grid_end = week_end(month_end(reference));

    let mut cells = Vec::with_capacity(GRID_CELLS);
    let mut day = week_start(month_start(reference));
    loop {
        cells.push(cell_for(day, reference, index, selected, today));
        if cells.len() >= GRID_CELLS && day >= grid_end {
            break;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    cells
}

fn cell_for(
    day: NaiveDate,
    reference: NaiveDate,
    index: &DayRecordIndex,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> GridCell {
    let record = index.get(&day).cloned();
    let (volatility_level, performance_type) = match &record {
        Some(rec) => (
            classify::volatility_level(rec.volatility),
            classify::performance_type(rec.performance),
        ),
        None => (VolatilityLevel::Low, PerformanceType::Neutral),
    };
    GridCell {
        date: day,
        record,
        volatility_level,
        performance_type,
        is_today: day == today,
        is_selected: selected.is_some_and(|sel| sel == day),
        is_in_current_month: day.month() == reference.month() && day.year() == reference.year(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DailyRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record_for(day: NaiveDate, volatility: f64, performance: f64) -> DailyRecord {
        DailyRecord {
            date: day,
            symbol: "BTC".to_string(),
            open: 45000.0,
            high: 46000.0,
            low: 44000.0,
            close: 45500.0,
            volume: 1e8,
            volatility,
            liquidity: 1e7,
            performance,
            market_cap: Some(1e11),
        }
    }

    fn assert_strictly_daily(cells: &[GridCell]) {
        assert_eq!(cells.len(), GRID_CELLS);
        for pair in cells.windows(2) {
            assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
        }
    }

    #[test]
    fn test_date_helpers() {
        assert_eq!(month_start(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(month_end(date(2024, 2, 17)), date(2024, 2, 29));
        assert_eq!(month_end(date(2023, 2, 17)), date(2023, 2, 28));
        // 2024-06-05 is a Wednesday
        assert_eq!(week_start(date(2024, 6, 5)), date(2024, 6, 2));
        assert_eq!(week_end(date(2024, 6, 5)), date(2024, 6, 8));
        // a Sunday is its own week start
        assert_eq!(week_start(date(2024, 6, 2)), date(2024, 6, 2));
    }

    #[test]
    fn test_grid_starts_on_week_of_month_start() {
        let index = DayRecordIndex::new();
        let cells = build_grid(date(2023, 2, 10), &index, None, date(2023, 2, 10));
        // Feb 1 2023 is a Wednesday; the containing week starts Sun Jan 29
        assert_eq!(cells[0].date, date(2023, 1, 29));
        assert_strictly_daily(&cells);
    }

    #[test]
    fn test_grid_pads_four_week_month_to_42_cells() {
        // Feb 2015: 28 days starting on a Sunday, exactly 4 enumerated weeks
        let index = DayRecordIndex::new();
        let cells = build_grid(date(2015, 2, 14), &index, None, date(2015, 2, 14));
        assert_strictly_daily(&cells);
        assert_eq!(cells[0].date, date(2015, 2, 1));
        assert_eq!(cells[27].date, date(2015, 2, 28));
        // padding continues past the last enumerated week
        assert_eq!(cells[28].date, date(2015, 3, 1));
        assert_eq!(cells[41].date, date(2015, 3, 14));
    }

    #[test]
    fn test_grid_handles_year_rollover() {
        let index = DayRecordIndex::new();
        let cells = build_grid(date(2024, 12, 25), &index, None, date(2024, 12, 25));
        assert_strictly_daily(&cells);
        let last = cells.last().unwrap();
        assert_eq!(last.date.year(), 2025);
        assert!(!last.is_in_current_month);
    }

    #[test]
    fn test_current_month_flags() {
        let index = DayRecordIndex::new();
        let reference = date(2023, 2, 10);
        let cells = build_grid(reference, &index, None, reference);
        let first_of_month = cells
            .iter()
            .find(|c| c.date == date(2023, 2, 1))
            .unwrap();
        assert!(first_of_month.is_in_current_month);
        assert!(!cells[0].is_in_current_month); // leading January cell
        assert!(cells.iter().any(|c| !c.is_in_current_month));
    }

    #[test]
    fn test_classification_derived_from_matched_record() {
        let mut index = DayRecordIndex::new();
        let day = date(2024, 3, 15);
        index.insert(day, record_for(day, 85.0, 4.2));
        let cells = build_grid(date(2024, 3, 1), &index, None, day);

        let hit = cells.iter().find(|c| c.date == day).unwrap();
        assert!(hit.record.is_some());
        assert_eq!(hit.volatility_level, VolatilityLevel::Extreme);
        assert_eq!(hit.performance_type, PerformanceType::Bull);

        // days without a record default low/neutral
        let miss = cells.iter().find(|c| c.date == date(2024, 3, 16)).unwrap();
        assert!(miss.record.is_none());
        assert_eq!(miss.volatility_level, VolatilityLevel::Low);
        assert_eq!(miss.performance_type, PerformanceType::Neutral);
    }

    #[test]
    fn test_selection_and_today_flags() {
        let index = DayRecordIndex::new();
        let reference = date(2024, 5, 1);
        let selected = date(2024, 5, 20);
        let today = date(2024, 5, 7);

        let cells = build_grid(reference, &index, Some(selected), today);
        assert_eq!(cells.iter().filter(|c| c.is_selected).count(), 1);
        assert_eq!(cells.iter().filter(|c| c.is_today).count(), 1);
        assert!(cells.iter().find(|c| c.date == selected).unwrap().is_selected);
        assert!(cells.iter().find(|c| c.date == today).unwrap().is_today);

        let none_selected = build_grid(reference, &index, None, today);
        assert!(none_selected.iter().all(|c| !c.is_selected));
    }

    #[test]
    fn test_build_grid_is_idempotent() {
        let mut index = DayRecordIndex::new();
        let day = date(2024, 7, 4);
        index.insert(day, record_for(day, 30.0, -3.0));
        let a = build_grid(date(2024, 7, 1), &index, Some(day), day);
        let b = build_grid(date(2024, 7, 1), &index, Some(day), day);
        assert_eq!(a, b);
    }
}
