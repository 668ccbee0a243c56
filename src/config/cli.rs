use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::domain::model::CompanyQuery;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "company-enrich")]
#[command(about = "Enrich a company profile from SAM.gov, the company website and web search")]
pub struct CliConfig {
    /// Legal business name to look up
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    /// Company website to scrape (never auto-discovered)
    #[arg(long)]
    pub website: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the output directory from the configuration
    #[arg(long)]
    pub output_path: Option<String>,

    /// Query registry and search unconditionally instead of enriching
    #[arg(long)]
    pub survey: bool,

    /// Print the result without writing a profile file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn query(&self) -> CompanyQuery {
        CompanyQuery {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            website: self.website.clone(),
        }
    }
}
