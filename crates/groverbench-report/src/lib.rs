//! Result persistence and presentation.
//!
//! Each benchmark run appends one [`RunRecord`](groverbench_bench::RunRecord)
//! row to a sweep CSV; at the end of a sweep the CSV feeds the comparison
//! plots. Tables render a single record for the terminal.

pub mod csv;
pub mod error;
pub mod plot;
pub mod table;

pub use csv::{append_record, read_records};
pub use error::{ReportError, ReportResult};
pub use plot::{plot_mean_time, plot_peak_ram};
pub use table::{timing_table, usage_table};
