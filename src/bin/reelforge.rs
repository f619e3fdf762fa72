use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use reelforge::{
    render_document, FfmpegEncoder, HttpFetcher, RenderOptions, RenderProfile,
};

#[derive(Parser, Debug)]
#[command(name = "reelforge", version, about = "Render a JSON timeline document to MP4")]
struct Cli {
    /// Input timeline JSON document.
    #[arg(default_value = "timeline.json")]
    document: PathBuf,

    /// Directory the output video is written into.
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Output file stem; a timestamp and `.mp4` are appended.
    #[arg(long, default_value = "video")]
    stem: String,

    /// Output width in pixels.
    #[arg(long, default_value_t = 1440)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 1080)]
    height: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let document = std::fs::read_to_string(&cli.document)
        .with_context(|| format!("read document '{}'", cli.document.display()))?;

    let options = RenderOptions {
        output_dir: cli.output,
        output_stem: cli.stem,
        profile: RenderProfile::with_resolution(cli.width, cli.height),
        ..RenderOptions::default()
    };

    let outcome =
        render_document(&document, &options, HttpFetcher::new()?, &FfmpegEncoder).await?;

    eprintln!(
        "wrote {} ({:.2} MB, {:.3}s)",
        outcome.output_path.display(),
        outcome.bytes_written as f64 / (1024.0 * 1024.0),
        outcome.duration.as_secs_f64()
    );
    Ok(())
}
