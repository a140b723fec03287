use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "maisheet", version)]
struct Cli {
    /// Verbosity of the diagnostics written to stderr.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full best-scores sheet as a PNG.
    Sheet(SheetArgs),
    /// Render a single score card as a PNG.
    Card(CardArgs),
}

#[derive(Parser, Debug)]
struct SheetArgs {
    /// Player record JSON.
    #[arg(long)]
    profile: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render config JSON; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Avatar image drawn in the header.
    #[arg(long)]
    avatar: Option<PathBuf>,

    /// Plate image overriding every stored background.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Session key used to look up a stored background.
    #[arg(long)]
    session: Option<String>,

    /// Text shown on the plate instead of the record's own.
    #[arg(long)]
    plate_text: Option<String>,
}

#[derive(Parser, Debug)]
struct CardArgs {
    /// Player record JSON.
    #[arg(long)]
    profile: PathBuf,

    /// Group the card is taken from.
    #[arg(long, value_enum)]
    section: SectionChoice,

    /// 0-based position within the group.
    #[arg(long)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render config JSON; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Omit the `#rank` marker.
    #[arg(long)]
    compact: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SectionChoice {
    Sd,
    Dx,
}

impl From<SectionChoice> for maisheet::SheetSection {
    fn from(choice: SectionChoice) -> Self {
        match choice {
            SectionChoice::Sd => maisheet::SheetSection::Standard,
            SectionChoice::Dx => maisheet::SheetSection::Deluxe,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Sheet(args) => cmd_sheet(args),
        Command::Card(args) => cmd_card(args),
    }
}

fn load_context(config: Option<&Path>) -> anyhow::Result<maisheet::RenderContext> {
    let config = match config {
        Some(path) => maisheet::RenderConfig::from_json_file(path)?,
        None => maisheet::RenderConfig::default(),
    };
    Ok(maisheet::RenderContext::from_config(config)?)
}

fn read_profile(path: &Path) -> anyhow::Result<maisheet::PlayerProfile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read profile '{}'", path.display()))?;
    Ok(maisheet::PlayerProfile::from_json_slice(&bytes)?)
}

fn read_optional(path: Option<&Path>, what: &str) -> anyhow::Result<Option<Vec<u8>>> {
    path.map(|p| std::fs::read(p).with_context(|| format!("read {what} '{}'", p.display())))
        .transpose()
}

fn cmd_sheet(args: SheetArgs) -> anyhow::Result<()> {
    let ctx = load_context(args.config.as_deref())?;
    let profile = read_profile(&args.profile)?;
    let inputs = maisheet::SheetInputs {
        session_key: args.session,
        avatar: read_optional(args.avatar.as_deref(), "avatar")?,
        background_override: read_optional(args.background.as_deref(), "background")?,
        plate_text_override: args.plate_text,
    };

    let sheet = maisheet::compose_sheet(&ctx, &profile, &inputs)?;
    write_png(&args.out, &sheet)
}

fn cmd_card(args: CardArgs) -> anyhow::Result<()> {
    let ctx = load_context(args.config.as_deref())?;
    let profile = read_profile(&args.profile)?;
    let section = maisheet::SheetSection::from(args.section);
    let entry = profile.entries(section).get(args.index).with_context(|| {
        format!(
            "{section:?} group has {} entries, index {} is out of range",
            profile.entries(section).len(),
            args.index
        )
    })?;

    let slot = maisheet::GridSlot::new(section, args.index);
    let card = ctx.install(|| maisheet::render_card(&ctx, entry, slot, args.compact));
    write_png(&args.out, &card.image)
}

fn write_png(out: &Path, img: &image::RgbaImage) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    img.save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
