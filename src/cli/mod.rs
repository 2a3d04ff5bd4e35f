pub mod run;

pub use run::run;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gleaner")]
#[command(about = "Collect metadata, view count and comments from an Instagram post", long_about = None)]
pub struct Cli {
    /// Instagram username for login (prompted for if omitted)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Instagram password for login (prompted for if omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Post URL to collect (prompted for if omitted)
    #[arg(long)]
    pub url: Option<String>,

    /// Output file; a timestamp is inserted before the extension
    #[arg(short, long, default_value = "post_data.json")]
    pub output: PathBuf,

    /// Run the browser with a visible window
    #[arg(long)]
    pub headed: bool,

    /// Config file path (default: ~/.config/gleaner/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
