use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use gradient_synth::{
    DirectorySurface, GRADIENT_PRESETS, GradientDocument, GradientPreset, GradientSpec,
    GradientSynthesizer, ImageFormat, NoiseKind, NoiseRange, NoiseSpec, Pattern, RasterTarget,
    Resolution, Rgb8,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gradient-synth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a gradient and write `gradient.<ext>`.
    Render(RenderArgs),
    /// Print the CSS `background` declaration for a gradient.
    Css(GradientArgs),
    /// List gradient presets and export resolutions.
    Presets,
}

#[derive(Args, Debug)]
struct GradientArgs {
    /// Input gradient document JSON. Flags below override its fields.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Named color preset (Midnight, Ocean, Sunset, Forest, Dawn).
    #[arg(long)]
    preset: Option<String>,

    /// Comma-separated hex colors, 2 to 5.
    #[arg(long, value_delimiter = ',')]
    colors: Option<Vec<Rgb8>>,

    /// Angle in degrees, clockwise from left-to-right.
    #[arg(long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// linear, radial, conic or wave.
    #[arg(long)]
    pattern: Option<Pattern>,

    /// Replace colors with seeded random ones.
    #[arg(long)]
    randomize: Option<u64>,

    /// Enable grain.
    #[arg(long)]
    noise: bool,

    /// Grain label: perlin, simplex or worley.
    #[arg(long)]
    noise_kind: Option<NoiseKind>,

    /// Grain intensity in [0, 1].
    #[arg(long)]
    intensity: Option<f64>,

    /// Preview grain tile size in pixels, [10, 100].
    #[arg(long)]
    scale: Option<u32>,

    /// Grain amplitude preset: subtle or strong.
    #[arg(long)]
    noise_range: Option<NoiseRange>,

    /// Grain seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    gradient: GradientArgs,

    /// Named resolution (1080p, 2K, 4K, 5K).
    #[arg(long, conflicts_with_all = ["width", "height"])]
    resolution: Option<Resolution>,

    /// Output width in pixels.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// png or jpeg.
    #[arg(long)]
    format: Option<ImageFormat>,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Render serially on the calling thread.
    #[arg(long)]
    serial: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Css(args) => cmd_css(args),
        Command::Presets => cmd_presets(),
    }
}

fn read_document_json(path: &Path) -> anyhow::Result<GradientDocument> {
    let f = File::open(path).with_context(|| format!("open gradient '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: GradientDocument =
        serde_json::from_reader(r).with_context(|| "parse gradient JSON")?;
    Ok(doc)
}

fn load_document(args: &GradientArgs) -> anyhow::Result<GradientDocument> {
    let mut doc = match &args.in_path {
        Some(path) => read_document_json(path)?,
        None => GradientDocument {
            gradient: GradientSpec::default(),
            noise: NoiseSpec::default(),
            target: Resolution::default().target(ImageFormat::Png),
        },
    };

    let gradient = &mut doc.gradient;
    if let Some(name) = &args.preset {
        GradientPreset::find(name)?.apply_to(gradient);
    }
    if let Some(colors) = &args.colors {
        gradient.colors = colors.clone();
    }
    if let Some(angle) = args.angle {
        gradient.angle_degrees = angle;
    }
    if let Some(pattern) = args.pattern {
        gradient.pattern = pattern;
    }
    if let Some(seed) = args.randomize {
        *gradient = gradient.randomized_colors(seed);
    }

    let noise = &mut doc.noise;
    noise.enabled |= args.noise;
    if let Some(kind) = args.noise_kind {
        noise.kind = kind;
    }
    if let Some(intensity) = args.intensity {
        noise.intensity = intensity;
    }
    if let Some(scale) = args.scale {
        noise.scale = scale;
    }
    if let Some(range) = args.noise_range {
        noise.range = range;
    }
    if let Some(seed) = args.seed {
        noise.seed = seed;
    }

    Ok(doc)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut doc = load_document(&args.gradient)?;
    let format = args.format.unwrap_or(doc.target.format);
    doc.target = match (args.resolution, args.width, args.height) {
        (Some(res), _, _) => res.target(format),
        (None, Some(width), Some(height)) => RasterTarget::new(width, height, format),
        _ => RasterTarget {
            format,
            ..doc.target
        },
    };
    doc.validate()?;

    let synth = if args.serial {
        GradientSynthesizer::with_opts(gradient_synth::RasterOpts::serial())
    } else {
        GradientSynthesizer::new()
    };
    let mut surface = DirectorySurface::new(&args.out_dir);
    let file_name = synth.export(&doc.gradient, &doc.noise, &doc.target, &mut surface)?;

    eprintln!("wrote {}", surface.path_for(&file_name).display());
    Ok(())
}

fn cmd_css(args: GradientArgs) -> anyhow::Result<()> {
    let doc = load_document(&args)?;
    let css = GradientSynthesizer::new().css(&doc.gradient, &doc.noise)?;
    println!("{css}");
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    println!("gradients:");
    for p in GRADIENT_PRESETS {
        println!("  {:<10} {} -> {}", p.name, p.colors[0], p.colors[1]);
    }
    println!("resolutions:");
    for r in Resolution::ALL {
        let (w, h) = r.dimensions();
        println!("  {:<10} {w}x{h}", r.name());
    }
    Ok(())
}
