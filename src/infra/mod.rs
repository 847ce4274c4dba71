//! Rate table I/O and output artifacts.

pub mod charts;
pub mod export;
pub mod rates;
pub mod requests;
pub mod table;

pub use charts::{bar_chart_svg, ChartKind};
pub use export::{write_batch_table, write_charts, write_results_table, ExportError};
pub use rates::{load_rate_file, parse_rate_table, DataSource, DataSourceError, RateRepository, RateSnapshot};
pub use requests::{load_batch_file, parse_batch_requests};
