//! Fiscal - synthetic financial-calendar core.
//!
//! Generates OHLCV-style records for a window of calendar days, classifies
//! each day's volatility and performance into display buckets, lays the days
//! out on a fixed 42-cell month grid, and exports a rendered grid region onto
//! a single A4 page.
//!
//! The presentation layer owns navigation, styling, and the screen; this
//! crate keeps the parts with actual logic. All state flows through explicit
//! values ([`view::CalendarView`]); the core functions are pure given their
//! inputs, with an injectable RNG for the synthesizer.

pub mod calendar;
pub mod classify;
pub mod export;
pub mod format;
pub mod logging;
pub mod render;
pub mod synth;
pub mod types;
pub mod view;

pub use calendar::{build_grid, GRID_CELLS};
pub use classify::{performance_type, volatility_level};
pub use export::{
    fit_to_page, DocumentExporter, PageMetrics, PagePlacement, RasterSource, A4_PORTRAIT,
};
pub use render::GridRenderer;
pub use synth::{Synthesizer, DEFAULT_MONTHS_AROUND};
pub use types::{
    DailyRecord, DayRecordIndex, GridCell, PerformanceType, Timeframe, VolatilityLevel,
};
pub use view::{CalendarView, ViewConfig};
