use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "ytt", about = "YouTube transcript and chapter extractor", version)]
pub struct Cli {
    /// YouTube video URL or video ID
    pub url: Option<String>,

    /// Write output to file ("auto" derives a name from the video title)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,

    /// Process URLs from a file, one per line ("#" lines are comments)
    #[arg(short, long)]
    pub batch: Option<PathBuf>,

    /// Exclude the video metadata banner from the output
    #[arg(long)]
    pub no_metadata: bool,

    /// Preferred caption language
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Suppress progress messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Run the HTTP API instead of the CLI pipeline (default addr 127.0.0.1:8000)
    #[arg(long, value_name = "ADDR", num_args = 0..=1, default_missing_value = "")]
    pub serve: Option<String>,
}
