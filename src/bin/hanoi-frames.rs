use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use hanoi_frames::{
    FontSource, Geometry, HanoiConfig, HanoiSession, OutputLayout, PngDirSink, PngEncodeThreading,
    plan_frames,
};

#[derive(Parser, Debug)]
#[command(
    name = "hanoi-frames",
    version,
    about = "Render the Tower of Hanoi solution as a numbered PNG sequence"
)]
struct Cli {
    /// Options as `key=value`; a bare `key` means `key=true`.
    #[arg(value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// Root directory for `hanoi_imgs/`, `counter_imgs/` and `video_out/`.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// JSON configuration file; positional options override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load the counter font from this file instead of the system font named by `counter_font`.
    #[arg(long)]
    font_file: Option<PathBuf>,

    /// Encode PNGs on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel` (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames encoded per parallel chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Log the frame plan without rendering or writing anything.
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => HanoiConfig::from_json_file(path)?,
        None => HanoiConfig::default(),
    };
    config.apply_pairs(&cli.options);
    config.validate()?;

    if cli.dry_run {
        return dry_run(&config);
    }

    let font = match cli.font_file {
        Some(path) => FontSource::File(path),
        None => FontSource::System(config.counter_font.clone()),
    };

    let layout = OutputLayout::under(&cli.out);
    let mut sink = PngDirSink::new(
        layout,
        PngEncodeThreading {
            parallel: cli.parallel,
            chunk_size: cli.chunk_size,
            threads: cli.threads,
        },
    )?;

    let mut session = HanoiSession::new(config, font)?;
    let stats = session
        .run(&mut sink)
        .with_context(|| format!("render into '{}'", cli.out.display()))?;

    eprintln!(
        "wrote {} frames ({} forced) for {} moves into {}",
        stats.frames,
        stats.forced,
        stats.moves,
        cli.out.display()
    );
    Ok(())
}

fn dry_run(config: &HanoiConfig) -> anyhow::Result<()> {
    let canvas = Geometry::new(config.layers, config.scaling).canvas();
    let plan = plan_frames(config)?;
    tracing::info!(
        width = canvas.width,
        height = canvas.height,
        moves = config.total_moves(),
        frames = plan.frames,
        natural = plan.natural,
        forced = plan.forced,
        "frame plan"
    );
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
