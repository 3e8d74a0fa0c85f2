use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use textreel::{
    AnimationParams, CompositionRegistry, CpuRenderer, CpuRendererOptions, CssColor,
    FfmpegSink, FfmpegSinkOpts, FontOptions, FrameIndex, ParamsOverride, PngSequenceSink,
    RenderTarget, RenderThreading,
};

#[derive(Parser, Debug)]
#[command(name = "textreel", version, about = "Render animated title and terminal clips")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List declared compositions.
    List(ListArgs),
    /// Print the visual description of one frame as JSON.
    Inspect(InspectArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the full clip to MP4 (requires `ffmpeg` on PATH) or a PNG sequence.
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone)]
struct ParamArgs {
    /// Props override: inline JSON object or path to a JSON file.
    #[arg(long)]
    props: Option<String>,

    /// Text to animate; literal `\n` sequences become line breaks.
    #[arg(long)]
    text: Option<String>,

    /// Title text color (CSS color).
    #[arg(long)]
    title_color: Option<String>,

    /// Background color (CSS color).
    #[arg(long = "bg")]
    bg_color: Option<String>,

    /// Clip length in frames.
    #[arg(long, conflicts_with = "auto_duration")]
    duration: Option<u64>,

    /// Size the clip to the text: max(150, 2 * chars + 60) frames.
    #[arg(long, default_value_t = false)]
    auto_duration: bool,

    /// Also declare the `Terminal` and `TerminalVertical` compositions.
    #[arg(long, default_value_t = false)]
    terminal: bool,
}

#[derive(Args, Debug, Clone)]
struct TargetArgs {
    /// Composition id (see `textreel list`).
    #[arg(long)]
    composition: Option<String>,

    /// Pick the portrait composition when no id is given.
    #[arg(long, default_value_t = false)]
    vertical: bool,
}

#[derive(Args, Debug, Clone)]
struct FontArgs {
    /// Extra directory scanned for .ttf/.otf/.ttc fonts (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Font file for sans-serif (title) text.
    #[arg(long)]
    sans_font: Option<PathBuf>,

    /// Font file for monospace (terminal) text.
    #[arg(long)]
    mono_font: Option<PathBuf>,

    /// Do not query system fonts.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,
}

#[derive(Parser, Debug)]
struct ListArgs {
    #[command(flatten)]
    params: ParamArgs,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    params: ParamArgs,
    #[command(flatten)]
    target: TargetArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    params: ParamArgs,
    #[command(flatten)]
    target: TargetArgs,
    #[command(flatten)]
    fonts: FontArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    params: ParamArgs,
    #[command(flatten)]
    target: TargetArgs,
    #[command(flatten)]
    fonts: FontArgs,

    /// Output MP4 path (default: output_horizontal.mp4 / output_vertical.mp4).
    #[arg(long, conflicts_with = "png_dir")]
    out: Option<PathBuf>,

    /// Write a PNG sequence into this directory instead of an MP4.
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size in frames.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let registry = build_registry(&args.params)?;
    for t in registry.targets() {
        println!(
            "{}\t{}x{}\t{}/{} fps\t{} frames\t{}",
            t.id,
            t.canvas.width,
            t.canvas.height,
            t.fps.num,
            t.fps.den,
            t.duration_in_frames,
            t.component.name()
        );
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let registry = build_registry(&args.params)?;
    let target = select_target(&registry, &args.target, args.params.terminal)?;
    let desc = target.evaluate(FrameIndex(args.frame));
    let json = serde_json::to_string_pretty(&desc).context("serialize visual description")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let registry = build_registry(&args.params)?;
    let target = select_target(&registry, &args.target, args.params.terminal)?;

    let mut renderer = CpuRenderer::new(renderer_options(&args.fonts));
    let frame = textreel::render_frame(target, FrameIndex(args.frame), &mut renderer)
        .with_context(|| format!("render frame {} of '{}'", args.frame, target.id))?;

    textreel::write_png(&args.out, &frame, true)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let registry = build_registry(&args.params)?;
    let target = select_target(&registry, &args.target, args.params.terminal)?;

    let threading = RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
        ..RenderThreading::default()
    };
    let mut renderer = CpuRenderer::new(renderer_options(&args.fonts));
    let range = target.frame_range();

    let (stats, written) = if let Some(dir) = &args.png_dir {
        let mut sink = PngSequenceSink::new(dir.clone(), args.overwrite);
        let stats = textreel::render_range(target, range, &mut renderer, &threading, &mut sink)
            .with_context(|| format!("render '{}' to '{}'", target.id, dir.display()))?;
        (stats, dir.clone())
    } else {
        let out = args.out.clone().unwrap_or_else(|| default_mp4_name(target));
        let bg = CssColor::parse(&target.params.bg_color)
            .map(CssColor::to_rgba8)
            .unwrap_or([0, 0, 0, 255]);
        let mut sink = FfmpegSink::new(FfmpegSinkOpts {
            out_path: out.clone(),
            overwrite: args.overwrite,
            bg_rgba: bg,
        });
        let stats = textreel::render_range(target, range, &mut renderer, &threading, &mut sink)
            .with_context(|| format!("render '{}' to '{}'", target.id, out.display()))?;
        (stats, out)
    };

    eprintln!(
        "wrote {} ({} frames, {} rendered, {} reused)",
        written.display(),
        stats.frames_total,
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

fn build_registry(args: &ParamArgs) -> anyhow::Result<CompositionRegistry> {
    let defaults = AnimationParams::default();

    let mut overrides = match args.props.as_deref() {
        None => ParamsOverride::default(),
        Some(s) if s.trim_start().starts_with('{') => {
            ParamsOverride::from_json_str(s).context("parse --props JSON")?
        }
        Some(path) => ParamsOverride::from_path(path)
            .with_context(|| format!("load --props file '{path}'"))?,
    };

    overrides = overrides.layered(ParamsOverride {
        text: args.text.as_ref().map(|t| t.replace("\\n", "\n")),
        title_color: args.title_color.clone(),
        bg_color: args.bg_color.clone(),
        duration_in_frames: args.duration,
    });
    if args.auto_duration {
        let text = overrides.text.clone().unwrap_or_else(|| defaults.text.clone());
        overrides.duration_in_frames = Some(AnimationParams::auto_duration_for(&text));
    }

    let registry = CompositionRegistry::new(defaults, &overrides);
    registry
        .params()
        .validate()
        .context("invalid animation parameters")?;

    Ok(if args.terminal {
        registry.with_terminal_targets()
    } else {
        registry
    })
}

fn select_target<'a>(
    registry: &'a CompositionRegistry,
    args: &TargetArgs,
    terminal: bool,
) -> anyhow::Result<&'a RenderTarget> {
    let id = match (&args.composition, args.vertical, terminal) {
        (Some(id), _, _) => id.as_str(),
        (None, false, false) => "HelloWorld",
        (None, true, false) => "HelloWorldVertical",
        (None, false, true) => "Terminal",
        (None, true, true) => "TerminalVertical",
    };
    Ok(registry.get(id)?)
}

fn default_mp4_name(target: &RenderTarget) -> PathBuf {
    if target.canvas.height > target.canvas.width {
        PathBuf::from("output_vertical.mp4")
    } else {
        PathBuf::from("output_horizontal.mp4")
    }
}

fn renderer_options(args: &FontArgs) -> CpuRendererOptions {
    let mut font_dirs = FontOptions::default().font_dirs;
    font_dirs.extend(args.font_dirs.iter().cloned());
    CpuRendererOptions {
        fonts: FontOptions {
            system_fonts: !args.no_system_fonts,
            font_dirs,
            sans_serif_file: args.sans_font.clone(),
            monospace_file: args.mono_font.clone(),
        },
    }
}
