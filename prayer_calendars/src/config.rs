use crate::day_record::LocationId;
use lazy_static::lazy_static;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_bool_from_anything;
use shared_kernel::configuration::config;

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub dir: String,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub force_refresh: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    pub id: LocationId,
    pub slug: String,
}

#[derive(Deserialize)]
pub struct Settings {
    pub source: SourceConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
    pub locations: Vec<LocationConfig>,
}

lazy_static! {
    pub static ref SETTINGS_CONFIG: Settings = config::<Settings>().unwrap();
}
