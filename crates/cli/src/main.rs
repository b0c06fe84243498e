use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use ifs::prelude::*;
use ifs::rng::seeded;
use ifs::variation::unit_grid;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod table;

#[derive(Parser)]
#[command(name = "ifs")]
#[command(about = "Generate IFS fractal point tables for external renderers")]
struct Cmd {
    /// Optional run label; propagated to logs and provenance
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorArg {
    None,
    Scalar,
    Rgb,
    Corner,
}

impl ColorArg {
    fn scheme(self, coupling: RgbCoupling) -> Option<ColorScheme> {
        match self {
            ColorArg::None => None,
            ColorArg::Scalar => Some(ColorScheme::Scalar),
            ColorArg::Rgb => Some(ColorScheme::Rgb(coupling)),
            ColorArg::Corner => Some(ColorScheme::Corner),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ColorArg::None => "none",
            ColorArg::Scalar => "scalar",
            ColorArg::Rgb => "rgb",
            ColorArg::Corner => "corner",
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Chaos game on a regular n-gon
    Chaos {
        #[arg(long, default_value_t = ChaosCfg::default().n)]
        n: usize,
        /// Contraction ratio in (0, 1); omit to use the touching ratio for n
        #[arg(long)]
        ratio: Option<f64>,
        #[arg(long, default_value_t = ChaosCfg::default().steps)]
        steps: usize,
        #[arg(long, default_value_t = ChaosCfg::default().discard)]
        discard: usize,
        #[arg(long, value_enum, default_value_t = ColorArg::None)]
        color: ColorArg,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Barnsley fern
    Fern {
        #[arg(long, default_value_t = 50_000)]
        steps: usize,
        #[arg(long, default_value_t = 0.0)]
        x0: f64,
        #[arg(long, default_value_t = 0.0)]
        y0: f64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Sierpinski triangle from the corners (0,0), (1,0)
    Triangle {
        #[arg(long, default_value_t = TriangleCfg::default().steps)]
        steps: usize,
        #[arg(long, default_value_t = TriangleCfg::default().discard)]
        discard: usize,
        #[arg(long, value_enum, default_value_t = ColorArg::None)]
        color: ColorArg,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Warp a chaos-game run (or a [-1,1]² grid) with a variation
    Variation {
        #[arg(long)]
        name: String,
        /// Second variation to blend with
        #[arg(long)]
        blend: Option<String>,
        /// Weight of `name` in the blend
        #[arg(long, default_value_t = 1.0)]
        weight: f64,
        /// Grid side; when set, warp a grid instead of a chaos-game run
        #[arg(long)]
        grid: Option<usize>,
        #[arg(long, default_value_t = 4)]
        n: usize,
        #[arg(long, default_value_t = 0.3)]
        ratio: f64,
        #[arg(long, default_value_t = ChaosCfg::default().steps)]
        steps: usize,
        #[arg(long, default_value_t = ChaosCfg::default().discard)]
        discard: usize,
        /// Color the source points; warping keeps each color on its point
        #[arg(long, value_enum, default_value_t = ColorArg::None)]
        color: ColorArg,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Row count and bounding box of a written point table
    Inspect {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let tag = cmd.tag;
    match cmd.action {
        Action::Chaos {
            n,
            ratio,
            steps,
            discard,
            color,
            seed,
            out,
        } => chaos(n, ratio, steps, discard, color, seed, out, tag),
        Action::Fern {
            steps,
            x0,
            y0,
            seed,
            out,
        } => fern(steps, x0, y0, seed, out, tag),
        Action::Triangle {
            steps,
            discard,
            color,
            seed,
            out,
        } => triangle(steps, discard, color, seed, out, tag),
        Action::Variation {
            name,
            blend,
            weight,
            grid,
            n,
            ratio,
            steps,
            discard,
            color,
            seed,
            out,
        } => variation(
            VariationArgs {
                name,
                blend,
                weight,
                grid,
                color,
                cfg: ChaosCfg {
                    n,
                    ratio,
                    steps,
                    discard,
                },
            },
            seed,
            out,
            tag,
        ),
        Action::Inspect { input } => inspect(input),
        Action::Report => report(tag),
    }
}

/// Explicit seed, or a fresh one that is logged and recorded for replay.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

fn emit(
    out: &Path,
    traj: &Trajectory,
    colors: Option<&ColorSequence>,
    params: serde_json::Value,
    tag: Option<String>,
) -> Result<()> {
    let mut df = table::frame(traj, colors)?;
    let rows = table::write(out, &mut df)?;
    let prov = provenance::write_sidecar(out, provenance::Payload::new(params, tag))?;
    tracing::info!(out = %out.display(), rows, provenance = %prov.display(), "wrote");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn chaos(
    n: usize,
    ratio: Option<f64>,
    steps: usize,
    discard: usize,
    color: ColorArg,
    seed: Option<u64>,
    out: PathBuf,
    tag: Option<String>,
) -> Result<()> {
    let seed = resolve_seed(seed);
    let mut game = match ratio {
        Some(r) => ChaosGame::new(n, r, seeded(seed))?,
        None => ChaosGame::with_optimal_ratio(n, seeded(seed))?,
    };
    let r = game.ratio();
    tracing::info!(n, ratio = r, steps, discard, color = color.name(), seed, tag = ?tag, "chaos");
    let params = json!({
        "engine": "chaos",
        "n": n,
        "ratio": r,
        "steps": steps,
        "discard": discard,
        "color": color.name(),
        "seed": seed,
    });
    match color.scheme(RgbCoupling::Independent) {
        Some(scheme) => {
            let run = game.iterate_colored(steps, discard, scheme)?;
            emit(&out, &run.trajectory, Some(&run.colors), params, tag)
        }
        None => emit(&out, &game.iterate(steps, discard), None, params, tag),
    }
}

fn fern(
    steps: usize,
    x0: f64,
    y0: f64,
    seed: Option<u64>,
    out: PathBuf,
    tag: Option<String>,
) -> Result<()> {
    let seed = resolve_seed(seed);
    tracing::info!(steps, x0, y0, seed, tag = ?tag, "fern");
    let mut fern = AffineIfs::barnsley_fern_seeded(seed);
    let traj = fern.iterate(x0, y0, steps);
    let params = json!({
        "engine": "fern",
        "steps": steps,
        "x0": x0,
        "y0": y0,
        "probabilities": fern.probabilities(),
        "seed": seed,
    });
    emit(&out, &traj, None, params, tag)
}

fn triangle(
    steps: usize,
    discard: usize,
    color: ColorArg,
    seed: Option<u64>,
    out: PathBuf,
    tag: Option<String>,
) -> Result<()> {
    let seed = resolve_seed(seed);
    tracing::info!(steps, discard, color = color.name(), seed, tag = ?tag, "triangle");
    let mut tri = Triangle::unit(seeded(seed));
    let params = json!({
        "engine": "triangle",
        "corners": tri.corners().iter().map(|c| [c.x, c.y]).collect::<Vec<_>>(),
        "steps": steps,
        "discard": discard,
        "color": color.name(),
        "seed": seed,
    });
    match color.scheme(RgbCoupling::Trace) {
        Some(scheme) => {
            let run = tri.iterate_colored(steps, discard, scheme)?;
            emit(&out, &run.trajectory, Some(&run.colors), params, tag)
        }
        None => emit(&out, &tri.iterate(steps, discard), None, params, tag),
    }
}

struct VariationArgs {
    name: String,
    blend: Option<String>,
    weight: f64,
    grid: Option<usize>,
    color: ColorArg,
    cfg: ChaosCfg,
}

/// Warped points plus the colors of their source points, in the same order.
fn warp(
    args: &VariationArgs,
    v1: Variation,
    v2: Variation,
    seed: u64,
) -> Result<(Trajectory, Option<ColorSequence>)> {
    let cfg = args.cfg;
    let scheme = args.color.scheme(RgbCoupling::Independent);
    let mut rng = seeded(seed);
    let (source, colors) = match args.grid {
        Some(side) => {
            let trace = vec![0; side * side];
            let colors = scheme.map(|s| s.assign(&trace, &mut rng)).transpose()?;
            let grid = Trajectory {
                trace,
                points: unit_grid(side),
            };
            (grid, colors)
        }
        None => {
            let mut game = ChaosGame::new(cfg.n, cfg.ratio, rng)?;
            let (run, colors) = match scheme {
                Some(s) => {
                    let run = game.iterate_colored(cfg.steps, cfg.discard, s)?;
                    (run.trajectory, Some(run.colors))
                }
                None => (game.iterate(cfg.steps, cfg.discard), None),
            };
            let flipped = Trajectory {
                points: flip_y(&run.points),
                trace: run.trace,
            };
            (flipped, colors)
        }
    };
    let points = linear_combination(v1, v2, &source.points, args.weight)?;
    let warped = Trajectory {
        points,
        trace: source.trace,
    };
    Ok((warped, colors))
}

fn variation(args: VariationArgs, seed: Option<u64>, out: PathBuf, tag: Option<String>) -> Result<()> {
    let v1: Variation = args.name.parse()?;
    let v2: Variation = match &args.blend {
        Some(name) => name.parse()?,
        None => v1,
    };
    let seed = resolve_seed(seed);
    let cfg = args.cfg;
    tracing::info!(
        variation = %v1,
        blend = %v2,
        weight = args.weight,
        grid = ?args.grid,
        color = args.color.name(),
        seed,
        tag = ?tag,
        "variation"
    );
    let (warped, colors) = warp(&args, v1, v2, seed)?;
    let params = json!({
        "engine": if args.grid.is_some() { "grid" } else { "chaos" },
        "variation": v1.name(),
        "blend": v2.name(),
        "weight": args.weight,
        "grid": args.grid,
        "color": args.color.name(),
        "n": cfg.n,
        "ratio": cfg.ratio,
        "steps": cfg.steps,
        "discard": cfg.discard,
        "seed": seed,
    });
    emit(&out, &warped, colors.as_ref(), params, tag)
}

fn inspect(input: PathBuf) -> Result<()> {
    let e = table::extent(&input)?;
    tracing::info!(input = %input.display(), rows = e.rows, "inspect");
    println!("{}", serde_json::to_string_pretty(&e)?);
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "ifs_version": ifs::VERSION,
        "tag": tag,
        "variations": Variation::ALL.iter().map(|v| v.name()).collect::<Vec<_>>(),
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(color: ColorArg, grid: Option<usize>) -> VariationArgs {
        VariationArgs {
            name: "swirl".into(),
            blend: Some("disc".into()),
            weight: 0.3,
            grid,
            color,
            cfg: ChaosCfg {
                n: 4,
                ratio: 0.3,
                steps: 400,
                discard: 5,
            },
        }
    }

    #[test]
    fn colored_warp_writes_rgb_columns() {
        let a = args(ColorArg::Rgb, None);
        let (warped, colors) = warp(&a, Variation::Swirl, Variation::Disc, 11).unwrap();
        let colors = colors.unwrap();
        assert_eq!(warped.len(), 395);
        assert_eq!(colors.len(), warped.len());
        let df = table::frame(&warped, Some(&colors)).unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
        for col in ["x", "y", "rule", "red", "green", "blue"] {
            assert!(names.iter().any(|n| n == col), "missing {col}");
        }
    }

    #[test]
    fn warp_keeps_source_colors() {
        let (_, plain) = warp(&args(ColorArg::None, None), Variation::Swirl, Variation::Disc, 3).unwrap();
        assert!(plain.is_none());
        let (_, scalar) = warp(&args(ColorArg::Scalar, None), Variation::Swirl, Variation::Disc, 3).unwrap();
        let mut game = ChaosGame::new(4, 0.3, seeded(3)).unwrap();
        let direct = game.iterate_colored(400, 5, ColorScheme::Scalar).unwrap();
        assert_eq!(scalar, Some(direct.colors));
    }

    #[test]
    fn grid_warp_can_be_colored() {
        let (warped, colors) = warp(&args(ColorArg::Corner, Some(10)), Variation::Disc, Variation::Disc, 1).unwrap();
        assert_eq!(warped.len(), 100);
        assert_eq!(colors.map(|c| c.len()), Some(100));
    }
}
