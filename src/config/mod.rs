pub mod export_config;

#[cfg(feature = "cli")]
use crate::config::export_config::ExportConfig;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "rocketchat-user-export")]
#[command(version, about = "Export Rocket.Chat users into a CSV or JSON file")]
pub struct CliConfig {
    /// Path to the configuration file (TOML, or JSON when it ends in .json)
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Export as JSON file rather than CSV
    #[arg(short, long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log CPU and memory usage after each phase
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Flags given on the command line win over the file.
    pub fn apply_to(&self, config: &mut ExportConfig) {
        if self.json {
            config.json = true;
        }
    }
}
