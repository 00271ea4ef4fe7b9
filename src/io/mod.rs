//! Instance files in, reports and logs out.

mod logging;
mod report;
mod solomon;

pub use logging::{init_logging, LogFormat};
pub use report::{render_summary, write_json};
pub use solomon::{read_solomon, read_solomon_file};
