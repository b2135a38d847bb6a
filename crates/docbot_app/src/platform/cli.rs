use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use docbot_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "docbot")]
#[command(version)]
#[command(about = "Terminal client for the document scraping and contract analysis backends")]
pub struct Cli {
    /// RON configuration file; missing file means defaults
    #[arg(long, default_value = "docbot.ron")]
    pub config: PathBuf,

    /// Base url of the document scraping API
    #[arg(long)]
    pub scraper_url: Option<String>,

    /// Base url of the contract analysis API
    #[arg(long)]
    pub contract_url: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,

    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Chat with the document processing bot
    Chat,
    /// Contract analysis dashboard
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl LogTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            LogTarget::Terminal => "terminal",
            LogTarget::File => "file",
            LogTarget::Both => "both",
        }
    }
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}
