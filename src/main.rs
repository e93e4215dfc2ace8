// mathdown: render Markdown with TeX math to HTML
//
// One-shot mode prints the whole document. Chunked mode feeds blank-line
// chunks through the paced scheduler and reports progress on stderr.

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use mathdown::{
    ChunkEvent, HtmlBuffer, RenderConfig, RenderPipeline, SurfacePool, spawn_chunked_render,
};

#[derive(Debug, Parser)]
#[command(name = "mathdown", version, about = "Render Markdown with TeX math to HTML")]
struct Args {
    /// Input file (reads stdin when omitted)
    file: Option<PathBuf>,

    /// JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render chunk by chunk through the paced scheduler
    #[arg(long)]
    chunked: bool,

    /// Delay between chunk append attempts, overriding the config
    #[arg(long, value_name = "N")]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    };
    let text = read_input(args.file.as_deref())?;
    let pipeline = Arc::new(RenderPipeline::from_config(&config));

    if !args.chunked {
        let html = Arc::clone(&pipeline).render_async(text).await?;
        print!("{html}");
        return Ok(());
    }

    let delay = args
        .delay_ms
        .map_or_else(|| config.chunk_delay(), Duration::from_millis);
    let surfaces = SurfacePool::from_config(&config);
    let target = Arc::new(Mutex::new(surfaces.acquire(HtmlBuffer::new)));

    let mut render = spawn_chunked_render(pipeline, &text, Arc::downgrade(&target), delay);
    while let Some(event) = render.next_event().await {
        match event {
            ChunkEvent::Appended { index, total } => {
                eprintln!("chunk {}/{} appended", index + 1, total);
            }
            ChunkEvent::Retrying {
                index,
                attempt,
                error,
            } => {
                eprintln!("chunk {} attempt {} failed: {}", index + 1, attempt, error);
            }
            ChunkEvent::TargetGone { index } => {
                eprintln!("target gone before chunk {}", index + 1);
            }
            ChunkEvent::Finished { total } => {
                eprintln!("finished {total} chunks");
            }
        }
    }
    render.join().await?;

    print!("{}", target.lock().as_str());
    Ok(())
}

fn read_input(file: Option<&std::path::Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
