use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use quotecard::{
    AssetDirs, BackgroundResolver, CardStyle, Compositor, FontResolver, QuoteRecord,
    RenderRequest, SeededChooser, Theme, assets::provision::write_background_set,
};

#[derive(Parser, Debug)]
#[command(name = "quotecard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single quote card as a PNG.
    Render(RenderArgs),
    /// Write the themed gradient background set.
    Backgrounds(BackgroundsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Quote text.
    #[arg(long)]
    quote: String,

    /// Author name.
    #[arg(long, default_value = "Unknown")]
    author: String,

    /// Theme used to pick the background.
    #[arg(long, default_value = "motivation")]
    theme: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Assets root containing `backgrounds/` and `fonts/`.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Optional JSON file with card style overrides.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Skip the watermark.
    #[arg(long, default_value_t = false)]
    no_watermark: bool,

    /// Do not scan host fonts.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,

    /// Seed background selection for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the computed layout as JSON on stdout.
    #[arg(long, default_value_t = false)]
    print_layout: bool,
}

#[derive(Parser, Debug)]
struct BackgroundsArgs {
    /// Output directory.
    #[arg(long, default_value = "assets/backgrounds")]
    out: PathBuf,

    /// Side length of the square images.
    #[arg(long, default_value_t = quotecard::CARD_SIZE_PX)]
    size: u32,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Backgrounds(args) => cmd_backgrounds(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let style = match &args.style {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read style '{}'", path.display()))?;
            serde_json::from_str::<CardStyle>(&raw)
                .with_context(|| format!("parse style '{}'", path.display()))?
        }
        None => CardStyle::default(),
    };

    let dirs = AssetDirs::under(&args.assets);
    let fonts = if args.no_system_fonts {
        FontResolver::without_system(&dirs.fonts)
    } else {
        FontResolver::standard(&dirs.fonts)
    }
    .resolve_book();
    let backgrounds = match args.seed {
        Some(seed) => {
            BackgroundResolver::with_chooser(&dirs.backgrounds, Arc::new(SeededChooser::new(seed)))
        }
        None => BackgroundResolver::new(&dirs.backgrounds),
    };
    let compositor = Compositor::with_parts(style, backgrounds, fonts)?;

    let req = RenderRequest::new(QuoteRecord::new(args.quote, args.author))
        .with_theme(Theme::parse(&args.theme))
        .with_output(&args.out)
        .with_watermark(!args.no_watermark);

    let image = compositor.render(&req)?;
    image.save_png(&args.out)?;

    if args.print_layout {
        println!("{}", serde_json::to_string_pretty(&image.layout)?);
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_backgrounds(args: BackgroundsArgs) -> anyhow::Result<()> {
    let canvas = quotecard::Canvas::new(args.size, args.size)?;
    let written = write_background_set(&args.out, canvas)?;
    eprintln!("wrote {} backgrounds to {}", written.len(), args.out.display());
    Ok(())
}
