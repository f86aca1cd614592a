use std::path::{Path, PathBuf};

use clap::Parser;
use eyre::{Result, bail};
use log::info;

mod cli;

use cli::{Cli, OutputFormat};
use ytt::transcribe::{Options, Transcriber};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytt.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytt")
        .join("logs")
}

/// Resolve an "auto" destination into a title-derived filename
fn resolve_destination(path: &Path, artifact: &ytt::TranscriptArtifact) -> PathBuf {
    if path.file_name().is_some_and(|name| name == "auto") {
        path.with_file_name(ytt::output::auto_filename(artifact))
    } else {
        path.to_path_buf()
    }
}

/// Run one URL through the pipeline and deliver the result.
/// Failures are reported on stderr, never propagated; the return value
/// feeds the batch success map and the exit code.
async fn process_url(
    transcriber: &Transcriber,
    url: &str,
    destination: Option<&Path>,
    include_metadata: bool,
    format: OutputFormat,
    quiet: bool,
) -> bool {
    if !quiet {
        println!("Processing: {url}");
    }

    let artifact = match transcriber.transcribe(url).await {
        Ok(artifact) => artifact,
        Err(e) => {
            eprintln!("Error: {e}");
            return false;
        }
    };

    if !quiet {
        println!("Video ID: {}", artifact.video_id);
    }

    let rendered = match format {
        OutputFormat::Text => ytt::output::render_text(&artifact, include_metadata),
        OutputFormat::Json => match ytt::output::render_json(&artifact) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error: {e}");
                return false;
            }
        },
    };

    match destination {
        Some(path) => {
            let path = resolve_destination(path, &artifact);
            if let Err(e) = std::fs::write(&path, &rendered) {
                eprintln!("Error: could not write {}: {e}", path.display());
                return false;
            }
            if !quiet {
                println!("Transcript saved to: {}", path.display());
            }
        }
        None => println!("{rendered}"),
    }

    true
}

fn read_batch_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        bail!("batch file not found: {}", path.display());
    }

    let urls: Vec<String> = std::fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        bail!("no URLs found in batch file: {}", path.display());
    }
    Ok(urls)
}

async fn run_batch(
    transcriber: &Transcriber,
    urls: &[String],
    output_dir: Option<&Path>,
    include_metadata: bool,
    format: OutputFormat,
    quiet: bool,
) -> Result<bool> {
    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut results: Vec<(String, bool)> = Vec::new();

    for (i, url) in urls.iter().enumerate() {
        if !quiet {
            print!("\n[{}/{}] ", i + 1, urls.len());
        }

        let destination = output_dir.map(|dir| dir.join("auto"));
        let success = process_url(
            transcriber,
            url,
            destination.as_deref(),
            include_metadata,
            format,
            quiet,
        )
        .await;
        results.push((url.clone(), success));
    }

    let successful = results.iter().filter(|(_, ok)| *ok).count();
    let failed = results.len() - successful;

    println!("\n{}", "=".repeat(50));
    println!("Processed: {} URLs", results.len());
    println!("Successful: {successful}");
    println!("Failed: {failed}");

    if failed > 0 {
        println!("\nFailed URLs:");
        for (url, success) in &results {
            if !success {
                println!("  - {url}");
            }
        }
    }

    Ok(failed == 0)
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();

    // Config file supplies defaults; CLI flags win
    let config = ytt::config::Config::load().unwrap_or_default();
    let lang = cli.lang.clone().or(config.default_lang).unwrap_or_else(|| "en".to_string());
    let include_metadata = !cli.no_metadata && config.include_metadata.unwrap_or(true);

    let client = reqwest::Client::new();
    let transcriber = Transcriber::new(client, Options { lang });

    if let Some(addr) = cli.serve {
        // Bare --serve defers to the config file, then the default addr
        let addr = if addr.is_empty() {
            config.server_addr.unwrap_or_else(|| "127.0.0.1:8000".to_string())
        } else {
            addr
        };
        return ytt::server::serve(&addr, transcriber).await;
    }

    if cli.url.is_some() && cli.batch.is_some() {
        bail!("cannot specify both URL and --batch");
    }

    let success = if let Some(ref batch_path) = cli.batch {
        let urls = read_batch_file(batch_path)?;
        if !cli.quiet {
            println!("Processing {} URLs from {}", urls.len(), batch_path.display());
        }
        run_batch(
            &transcriber,
            &urls,
            cli.output_dir.as_deref(),
            include_metadata,
            cli.format,
            cli.quiet,
        )
        .await?
    } else if let Some(ref url) = cli.url {
        process_url(
            &transcriber,
            url,
            cli.output.as_deref(),
            include_metadata,
            cli.format,
            cli.quiet,
        )
        .await
    } else {
        bail!("either URL or --batch file must be provided\n\nUsage: ytt <URL>\n       ytt -b urls.txt -d output_folder");
    };

    std::process::exit(if success { 0 } else { 1 });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ytt-test-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_batch_file_skips_comments_and_blanks() {
        let path = write_temp(
            "batch.txt",
            "# watch later\n\nhttps://youtu.be/dQw4w9WgXcQ\n   \n  aBcDeFgHiJk  \n",
        );
        let urls = read_batch_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            urls,
            vec!["https://youtu.be/dQw4w9WgXcQ".to_string(), "aBcDeFgHiJk".to_string()]
        );
    }

    #[test]
    fn test_read_batch_file_missing() {
        let err = read_batch_file(Path::new("/nonexistent/ytt-batch.txt")).unwrap_err();
        assert!(err.to_string().contains("batch file not found"));
    }

    #[test]
    fn test_read_batch_file_no_urls() {
        let path = write_temp("comments-only.txt", "# just a comment\n\n   \n");
        let result = read_batch_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.unwrap_err().to_string().contains("no URLs found"));
    }
}
