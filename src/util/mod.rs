//! Utility functions.

mod date;

pub use date::{DATE_FORMAT, format_day_month_year, parse_day_month_year};
