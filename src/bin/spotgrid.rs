use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Parser, Debug)]
#[command(name = "spotgrid", version)]
struct Cli {
    /// Log layout and font decisions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the question and answer images of one puzzle.
    Render(RenderArgs),
    /// List the built-in problem sets.
    Presets,
    /// Print the default config as JSON.
    DefaultConfig,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input config JSON. The default config is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for the question and answer images.
    #[arg(long)]
    out_dir: PathBuf,

    /// Built-in problem set applied on top of the config.
    #[arg(long)]
    preset: Option<String>,

    /// Seed for target selection (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Pin the target row (0-based). Requires `--col`.
    #[arg(long, requires = "col")]
    row: Option<u32>,

    /// Pin the target column (0-based). Requires `--row`.
    #[arg(long, requires = "row")]
    col: Option<u32>,

    /// Output image format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Jpg)]
    format: OutputFormat,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = spotgrid::DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Print which font was resolved for text.
    #[arg(long)]
    dump_font: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Jpg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Presets => cmd_presets(),
        Command::DefaultConfig => cmd_default_config(),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<spotgrid::PuzzleConfig> {
    match path {
        Some(path) => Ok(spotgrid::PuzzleConfig::from_path(path)?),
        None => Ok(spotgrid::PuzzleConfig::default()),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = read_config(args.config.as_deref())?;
    if let Some(name) = &args.preset {
        let preset = spotgrid::find_preset(name).with_context(|| {
            format!("unknown preset '{name}' (see `spotgrid presets`)")
        })?;
        config.apply_preset(preset);
    }
    config.validate()?;

    let instance = match (args.row, args.col) {
        (Some(row), Some(col)) => {
            let target = spotgrid::AnswerPosition::new(row, col);
            anyhow::ensure!(
                target.fits(config.grid.rows, config.grid.cols),
                "target ({row}, {col}) outside a {}x{} grid",
                config.grid.rows,
                config.grid.cols
            );
            spotgrid::PuzzleInstance::with_target(spotgrid::PuzzleId(args.seed.unwrap_or(0)), target)
        }
        _ => match args.seed {
            Some(seed) => spotgrid::PuzzleInstance::new_with(&mut StdRng::seed_from_u64(seed), &config),
            None => spotgrid::PuzzleInstance::new(&config),
        },
    };

    let mut compositor = spotgrid::Compositor::new();
    let pair = compositor.render_pair(&config, &instance)?;

    if args.dump_font {
        match compositor.engine().font() {
            Some(font) => eprintln!(
                "font: {:?} family={}",
                font.source,
                compositor.engine().family_name().unwrap_or("?")
            ),
            None => eprintln!("font: none (text skipped)"),
        }
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let ext = args.format.extension();
    for (name, result) in [("quiz_q", pair.question()), ("quiz_a", pair.answer())] {
        let out = args.out_dir.join(format!("{name}.{ext}"));
        spotgrid::save(result, &out, args.quality)?;
        eprintln!("wrote {}", out.display());
    }

    let target = instance.target();
    println!("target row={} col={} ({})", target.row, target.col, config.target_label());
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for p in spotgrid::PROBLEM_SETS {
        println!("{:<16} base={} target={} label={}", p.name, p.base, p.target, p.target_name);
    }
    Ok(())
}

fn cmd_default_config() -> anyhow::Result<()> {
    println!("{}", spotgrid::PuzzleConfig::default().to_json_pretty()?);
    Ok(())
}
