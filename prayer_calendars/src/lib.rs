pub mod config;
pub mod contracts;
pub mod day_record;

pub(crate) mod calendar_fetcher;
pub(crate) mod content_extractor;
