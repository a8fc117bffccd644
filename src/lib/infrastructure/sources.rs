//! File-backed recipient and template sources

mod csv;
mod json;

pub use self::csv::CsvRecipientSource;
pub use self::json::JsonTemplateSource;
