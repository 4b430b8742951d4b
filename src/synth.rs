//! Synthetic time-series generation.
//!
//! One OHLCV-style record per calendar day, derived from the day's index in
//! the generated range: a smooth sine oscillation anchors the price while
//! every other field is an independent uniform draw. The RNG is injected so
//! tests can pin output; production callers use [`Synthesizer::from_entropy`].

use chrono::{Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::calendar::{month_end, month_start};
use crate::logging::{json_log, obj, v_num, v_str};
use crate::types::{DailyRecord, DayRecordIndex};

/// Months generated on each side of the reference month, so adjacent-month
/// navigation has data without regeneration.
pub const DEFAULT_MONTHS_AROUND: u32 = 3;

const BASE_PRICE: f64 = 45_000.0;
const BASE_AMPLITUDE: f64 = 5_000.0;
const BASE_FREQUENCY: f64 = 0.1;

pub struct Synthesizer<R: Rng> {
    rng: R,
}

impl Synthesizer<StdRng> {
    /// Synthesizer seeded from OS entropy. Runs are not reproducible; inject
    /// a seeded RNG via [`Synthesizer::with_rng`] when they need to be.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> Synthesizer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// One record per day in the inclusive `[start, end]` range.
    ///
    /// An inverted range (`end < start`) yields an empty index rather than an
    /// error; the grid builder tolerates empty indices.
    pub fn synthesize(&mut self, start: NaiveDate, end: NaiveDate, symbol: &str) -> DayRecordIndex {
        let mut index = DayRecordIndex::new();
        if end < start {
            json_log(
                "synth",
                obj(&[
                    ("event", v_str("empty_range")),
                    ("start", v_str(&start.to_string())),
                    ("end", v_str(&end.to_string())),
                ]),
            );
            return index;
        }

        let mut day = start;
        let mut i: u64 = 0;
        loop {
            index.insert(day, self.record_for(day, i, symbol));
            if day >= end {
                break;
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
            i += 1;
        }

        json_log(
            "synth",
            obj(&[
                ("event", v_str("index_built")),
                ("symbol", v_str(symbol)),
                ("start", v_str(&start.to_string())),
                ("end", v_str(&end.to_string())),
                ("days", v_num(index.len() as f64)),
            ]),
        );
        index
    }

    /// Window of `[month_start(reference) - months_around,
    /// month_end(reference) + months_around]`, delegating to [`synthesize`].
    ///
    /// [`synthesize`]: Synthesizer::synthesize
    pub fn synthesize_around_month(
        &mut self,
        reference: NaiveDate,
        months_around: u32,
        symbol: &str,
    ) -> DayRecordIndex {
        let (start, end) = month_window(reference, months_around);
        self.synthesize(start, end, symbol)
    }

    fn record_for(&mut self, date: NaiveDate, i: u64, symbol: &str) -> DailyRecord {
        let base = BASE_PRICE + BASE_AMPLITUDE * (i as f64 * BASE_FREQUENCY).sin();
        // high/low are sampled independently of open/close; they do not
        // bound them, and that looseness is part of the contract
        DailyRecord {
            date,
            symbol: symbol.to_string(),
            open: base + self.rng.gen_range(-1_000.0..1_000.0),
            high: base + self.rng.gen_range(0.0..3_000.0),
            low: base - self.rng.gen_range(0.0..2_000.0),
            close: base + self.rng.gen_range(-1_000.0..1_000.0),
            volume: self.rng.gen_range(0.0..1_000_000_000.0),
            volatility: self.rng.gen_range(0.0..100.0),
            liquidity: self.rng.gen_range(0.0..100_000_000.0),
            performance: self.rng.gen_range(-10.0..10.0),
            market_cap: Some(self.rng.gen_range(0.0..1_000_000_000_000.0)),
        }
    }
}

/// Generated window bounds for a reference month.
pub fn month_window(reference: NaiveDate, months_around: u32) -> (NaiveDate, NaiveDate) {
    let first = month_start(reference);
    let start = first
        .checked_sub_months(Months::new(months_around))
        .unwrap_or(first);
    let end = first
        .checked_add_months(Months::new(months_around))
        .map(month_end)
        .unwrap_or_else(|| month_end(reference));
    (start, end)
}
