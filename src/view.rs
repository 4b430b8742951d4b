//! Explicit view state.
//!
//! The browsing state the presentation layer owns (reference date, selection,
//! symbol, timeframe) plus the generated index, held in one passed-around
//! value instead of ambient globals. The index is replaced wholesale when the
//! symbol changes or the reference month leaves the generated window; nothing
//! is merged or mutated in place.

use chrono::{Months, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::Rng;

use crate::calendar::{self, month_end, month_start};
use crate::logging::{json_log, obj, v_num, v_str};
use crate::synth::{month_window, Synthesizer, DEFAULT_MONTHS_AROUND};
use crate::types::{DailyRecord, DayRecordIndex, GridCell, Timeframe};

#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub symbol: String,
    pub months_around: u32,
    pub timeframe: Timeframe,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC".to_string(),
            months_around: DEFAULT_MONTHS_AROUND,
            timeframe: Timeframe::Month,
        }
    }
}

pub struct CalendarView<R: Rng> {
    synthesizer: Synthesizer<R>,
    reference_date: NaiveDate,
    selected_date: Option<NaiveDate>,
    symbol: String,
    timeframe: Timeframe,
    months_around: u32,
    window: (NaiveDate, NaiveDate),
    index: DayRecordIndex,
}

impl CalendarView<StdRng> {
    pub fn new(config: ViewConfig, reference: NaiveDate) -> Self {
        Self::with_synthesizer(config, Synthesizer::from_entropy(), reference)
    }
}

impl<R: Rng> CalendarView<R> {
    pub fn with_synthesizer(
        config: ViewConfig,
        synthesizer: Synthesizer<R>,
        reference: NaiveDate,
    ) -> Self {
        let mut view = Self {
            synthesizer,
            reference_date: reference,
            selected_date: None,
            symbol: config.symbol,
            timeframe: config.timeframe,
            months_around: config.months_around,
            window: (reference, reference),
            index: DayRecordIndex::new(),
        };
        view.regenerate();
        view
    }

    fn regenerate(&mut self) {
        self.window = month_window(self.reference_date, self.months_around);
        self.index = self
            .synthesizer
            .synthesize(self.window.0, self.window.1, &self.symbol);
        json_log(
            "view",
            obj(&[
                ("event", v_str("index_replaced")),
                ("symbol", v_str(&self.symbol)),
                ("window_start", v_str(&self.window.0.to_string())),
                ("window_end", v_str(&self.window.1.to_string())),
                ("days", v_num(self.index.len() as f64)),
            ]),
        );
    }

    /// Switches the active symbol, discarding and regenerating the index.
    pub fn set_symbol(&mut self, symbol: &str) {
        if symbol == self.symbol {
            return;
        }
        self.symbol = symbol.to_string();
        self.regenerate();
    }

    /// Moves the reference date. Regenerates only when the new month falls
    /// outside the already-generated window, so adjacent-month navigation
    /// reuses existing data.
    pub fn set_reference_date(&mut self, date: NaiveDate) {
        self.reference_date = date;
        if month_start(date) < self.window.0 || month_end(date) > self.window.1 {
            self.regenerate();
        }
    }

    pub fn step_months(&mut self, months: i32) {
        let stepped = if months >= 0 {
            self.reference_date
                .checked_add_months(Months::new(months as u32))
        } else {
            self.reference_date
                .checked_sub_months(Months::new(months.unsigned_abs()))
        };
        if let Some(date) = stepped {
            self.set_reference_date(date);
        }
    }

    pub fn next_month(&mut self) {
        self.step_months(1);
    }

    pub fn prev_month(&mut self) {
        self.step_months(-1);
    }

    pub fn select(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
    }

    /// Grid for the current reference month with `today` injected, keeping
    /// the underlying builder pure.
    pub fn grid_at(&self, today: NaiveDate) -> Vec<GridCell> {
        calendar::build_grid(self.reference_date, &self.index, self.selected_date, today)
    }

    /// Grid using the wall clock's current day.
    pub fn grid(&self) -> Vec<GridCell> {
        self.grid_at(Utc::now().date_naive())
    }

    /// Record for the selected day, if one is selected and has data.
    pub fn selected_record(&self) -> Option<&DailyRecord> {
        self.selected_date.and_then(|date| self.index.get(&date))
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn index(&self) -> &DayRecordIndex {
        &self.index
    }
}
