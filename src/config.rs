use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use serde::Serialize;

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    #[clap(env, long, default_value_t = 3000)]
    pub port: u16,

    /// Comma separated list of origins allowed by CORS
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,

    #[clap(env, long)]
    pub database_url: Option<String>,

    /// JSON file of restaurants served from memory when no database is configured
    #[clap(env, long)]
    pub restaurants_file: Option<PathBuf>,

    #[clap(env, long, value_enum, default_value_t = SearchMode::Sequential)]
    pub search_mode: SearchMode,

    #[clap(env, long, default_value_t = 5000)]
    pub search_timeout_ms: u64,

    #[clap(env, long, default_value_t = 3.0)]
    pub peak_radius_km: f64,

    #[clap(env, long, default_value_t = 5.0)]
    pub normal_radius_km: f64,

    /// Offset of the local time used to decide peak hours and opening windows
    #[clap(env, long, default_value_t = 0, allow_hyphen_values = true)]
    pub utc_offset_hours: i8,

    #[clap(env, long)]
    pub max_concurrent_requests: Option<usize>,
}

#[derive(ValueEnum, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// All four predicates, one after another
    Sequential,
    /// Name and cuisine predicates only, run side by side
    Concurrent,
}

impl Config {
    pub fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
            .unwrap_or_else(|| num_cpus::get() * 64)
    }
}
