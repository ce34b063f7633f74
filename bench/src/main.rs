use std::time::{Duration, Instant};

use anyhow::Context as _;
use sha2::Digest as _;

use gradient_synth::{
    GradientSpec, GradientSynthesizer, ImageFormat, NoiseSpec, Pattern, RasterOpts, Resolution,
};

#[derive(Clone, Debug)]
struct BenchArgs {
    resolutions: Vec<Resolution>,
    pattern: Pattern,
    format: ImageFormat,
    warmup: u32,
    repeats: u32,
    noise: bool,
    no_encode: bool,
    parallel: bool,
    threads: Option<usize>,
    chunk_size: usize,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    render: Duration,
    encode: Duration,
    wall_total: Duration,
    encoded_bytes: usize,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.repeats == 0 {
        anyhow::bail!("--repeats must be >= 1");
    }
    if args.chunk_size == 0 {
        anyhow::bail!("--chunk-size must be >= 1");
    }
    if let Some(n) = args.threads
        && n == 0
    {
        anyhow::bail!("--threads must be >= 1 when set");
    }

    let synth = GradientSynthesizer::with_opts(RasterOpts {
        parallel: args.parallel,
        threads: args.threads,
        rows_per_chunk: args.chunk_size,
    });
    let spec = GradientSpec::new(
        vec![
            gradient_synth::Rgb8::from_u24(0x0EA5E9),
            gradient_synth::Rgb8::from_u24(0xF59E0B),
            gradient_synth::Rgb8::from_u24(0x7C3AED),
        ],
        30.0,
        args.pattern,
    );
    let noise = if args.noise {
        NoiseSpec {
            seed: 1,
            ..NoiseSpec::enabled(0.5)
        }
    } else {
        NoiseSpec::disabled()
    };

    eprintln!(
        "bench: {repeats} run(s) ({profile} build), pattern={pattern}, format={format:?}, noise={noise}, encode={encode}, mode={mode}, threads={threads}, chunk={chunk}",
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        pattern = args.pattern,
        format = args.format,
        noise = if args.noise { "on" } else { "off" },
        encode = if args.no_encode { "no" } else { "yes" },
        mode = if args.parallel {
            "parallel"
        } else {
            "sequential"
        },
        threads = args
            .threads
            .map(|n| n.to_string())
            .unwrap_or_else(|| "auto".to_string()),
        chunk = args.chunk_size,
    );

    for res in &args.resolutions {
        let target = res.target(args.format);
        for _ in 0..args.warmup {
            let _ = run_once(&args, &synth, &spec, &noise, &target)?;
        }

        let mut runs = Vec::<RunMetrics>::with_capacity(args.repeats as usize);
        let mut digest: Option<String> = None;
        for i in 0..args.repeats {
            let (metrics, d) = run_once(&args, &synth, &spec, &noise, &target)?;
            match &digest {
                None => digest = Some(d),
                Some(prev) if *prev != d => {
                    anyhow::bail!("run {i} at {} produced a different raster", res.name())
                }
                Some(_) => {}
            }
            runs.push(metrics);
        }

        let (w, h) = res.dimensions();
        eprintln!(
            "\n{name} ({w}x{h}) sha256={digest} encoded={bytes}B",
            name = res.name(),
            digest = digest.unwrap_or_default(),
            bytes = runs.last().map(|m| m.encoded_bytes).unwrap_or(0),
        );
        report_percentiles(&runs);
    }

    Ok(())
}

fn run_once(
    args: &BenchArgs,
    synth: &GradientSynthesizer,
    spec: &GradientSpec,
    noise: &NoiseSpec,
    target: &gradient_synth::RasterTarget,
) -> anyhow::Result<(RunMetrics, String)> {
    let mut m = RunMetrics::default();
    let t_wall = Instant::now();

    let t0 = Instant::now();
    let buf = synth.render_raster(spec, noise, target)?;
    m.render = t0.elapsed();

    if !args.no_encode {
        let t0 = Instant::now();
        let bytes = synth.encode(&buf, target.format)?;
        m.encode = t0.elapsed();
        m.encoded_bytes = bytes.len();
    }

    m.wall_total = t_wall.elapsed();
    Ok((m, sha256_hex(&buf.data)))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        resolutions: Resolution::ALL.to_vec(),
        pattern: Pattern::Linear,
        format: ImageFormat::Png,
        warmup: 1,
        repeats: 10,
        noise: false,
        no_encode: false,
        parallel: true,
        threads: None,
        chunk_size: 64,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--resolution" => {
                let v = args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --resolution (1080p, 2K, 4K, 5K)")
                })?;
                out.resolutions = vec![v.parse()?];
            }
            "--pattern" => {
                let v = args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --pattern (linear, radial, conic, wave)")
                })?;
                out.pattern = v.parse()?;
            }
            "--format" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --format (png, jpeg)"))?;
                out.format = v.parse()?;
            }
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--noise" => out.noise = true,
            "--no-encode" => out.no_encode = true,
            "--sequential" => out.parallel = false,
            "--threads" => out.threads = Some(parse_usize(args.next(), "--threads")?),
            "--chunk-size" => out.chunk_size = parse_usize(args.next(), "--chunk-size")?,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        "\
gradient-synth-bench

Times raster rendering and encoding at the named export resolutions.

USAGE:
  cargo run -p gradient-synth-bench --release -- [options]

OPTIONS:
  --resolution <name>    Only this resolution (1080p, 2K, 4K, 5K) [default: all]
  --pattern <name>       linear, radial, conic or wave [default: linear]
  --format <fmt>         png or jpeg [default: png]
  --warmup <n>           Warmup runs per resolution [default: 1]
  --repeats <n>          Measured runs per resolution [default: 10]
  --noise                Enable grain (intensity 0.5, seed 1)
  --no-encode            Skip encoding
  --sequential           Render on the calling thread
  --threads <n>          Dedicated pool size [default: global pool]
  --chunk-size <n>       Rows per parallel chunk [default: 64]
"
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn parse_usize(v: Option<String>, flag: &str) -> anyhow::Result<usize> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<usize>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn report_percentiles(runs: &[RunMetrics]) {
    type Getter = fn(&RunMetrics) -> Duration;
    type Field = (&'static str, Getter);

    fn collect(runs: &[RunMetrics], f: Getter) -> Vec<Duration> {
        let mut v = runs.iter().map(f).collect::<Vec<_>>();
        v.sort_by_key(|d| d.as_nanos());
        v
    }

    fn p(v: &[Duration], p: f64) -> Duration {
        if v.is_empty() {
            return Duration::ZERO;
        }
        let n = v.len();
        let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
        v[rank - 1]
    }

    fn fmt_ms(d: Duration) -> String {
        format!("{:.3}ms", d.as_secs_f64() * 1000.0)
    }

    let fields: &[Field] = &[
        ("render", |m| m.render),
        ("encode", |m| m.encode),
        ("wall_total", |m| m.wall_total),
    ];

    eprintln!("  percentiles across runs (p50/p90/p99):");
    for (name, getter) in fields {
        let v = collect(runs, *getter);
        eprintln!(
            "  {name:12} p50={p50:>10}  p90={p90:>10}  p99={p99:>10}",
            name = *name,
            p50 = fmt_ms(p(&v, 0.50)),
            p90 = fmt_ms(p(&v, 0.90)),
            p99 = fmt_ms(p(&v, 0.99))
        );
    }
}
