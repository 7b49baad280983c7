use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub branding: BrandingSettings,
    #[serde(default)]
    pub system: SystemSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_wall_clock_interval_ms")]
    pub wall_clock_interval_ms: u64,
    #[serde(default = "default_chart_window")]
    pub chart_window: usize,
    /// Fixed simulator seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrandingSettings {
    #[serde(default = "default_company_name")]
    pub company_name: String,
    #[serde(default = "default_website")]
    pub website: String,
    #[serde(default = "default_version")]
    pub version: String,
}

/// Fixed system facts reported on the status panel
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SystemSettings {
    #[serde(default = "default_sampling_interval")]
    pub sampling_interval: String,
    /// Percent of on-board storage in use
    #[serde(default = "default_data_storage")]
    pub data_storage: u8,
    #[serde(default = "default_communication")]
    pub communication: String,
}

fn default_tick_interval_ms() -> u64 {
    2_000
}

fn default_wall_clock_interval_ms() -> u64 {
    1_000
}

fn default_chart_window() -> usize {
    50
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_company_name() -> String {
    "Team AAMCA".to_string()
}

fn default_website() -> String {
    "www.teamaamca.ai".to_string()
}

fn default_version() -> String {
    "ITMS v2.1".to_string()
}

fn default_sampling_interval() -> String {
    "0.25m".to_string()
}

fn default_data_storage() -> u8 {
    78
}

fn default_communication() -> String {
    "connected".to_string()
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            wall_clock_interval_ms: default_wall_clock_interval_ms(),
            chart_window: default_chart_window(),
            seed: None,
        }
    }
}

impl EngineSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn wall_clock_interval(&self) -> Duration {
        Duration::from_millis(self.wall_clock_interval_ms.max(1))
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl Default for BrandingSettings {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            website: default_website(),
            version: default_version(),
        }
    }
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            sampling_interval: default_sampling_interval(),
            data_storage: default_data_storage(),
            communication: default_communication(),
        }
    }
}

/// Load `config/itms` (any format the config crate knows) overlaid with
/// `ITMS__SECTION__KEY` environment variables. Missing file means defaults.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/itms").required(false))
        .add_source(
            config::Environment::with_prefix("ITMS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
