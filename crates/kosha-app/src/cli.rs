use std::path::PathBuf;

use clap::Parser;

/// Sanskrit and Hindi word meanings from several dictionaries at once
#[derive(Parser, Debug)]
#[command(name = "kosha", author, version, about, long_about = None)]
pub struct Cli {
    /// Word to look up; starts an interactive session when omitted
    pub words: Vec<String>,

    /// Preferred dictionary, by code (`sh`) or name (`Shabda Sagara`)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Show every dictionary's answer
    #[arg(short, long)]
    pub all: bool,

    /// List the available dictionaries and exit
    #[arg(short, long)]
    pub list: bool,

    /// Print the lookup result as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to a JSON config file (overrides KOSHA_CONFIG)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The words joined back into one query
    pub fn query(&self) -> Option<String> {
        let query = self.words.join(" ");
        let query = query.trim();
        (!query.is_empty()).then(|| query.to_string())
    }
}
