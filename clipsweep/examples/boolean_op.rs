use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::Parser;
use clipsweep::{BooleanOp, GeoJson, LogEntry, PolyBool, Polygon};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Copy, Clone, Debug)]
struct Op(BooleanOp);

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(Op(BooleanOp::Union)),
            "intersect" | "intersection" => Ok(Op(BooleanOp::Intersection)),
            "difference" => Ok(Op(BooleanOp::Difference)),
            "difference-rev" => Ok(Op(BooleanOp::DifferenceRev)),
            "xor" => Ok(Op(BooleanOp::Xor)),
            _ => Err(format!("unknown op {s}")),
        }
    }
}

/// Applies a boolean operation to two GeoJSON polygons, and draws the result as an SVG.
#[derive(Parser)]
struct Args {
    input_a: PathBuf,
    input_b: PathBuf,
    output: PathBuf,

    #[arg(long)]
    op: Op,

    #[arg(long)]
    epsilon: Option<f64>,

    /// Use the complement of the first input.
    #[arg(long)]
    invert_a: bool,

    /// Use the complement of the second input.
    #[arg(long)]
    invert_b: bool,

    /// Write every decision the algorithm makes to this file, as JSON.
    #[arg(long)]
    log: Option<PathBuf>,
}

fn read_polygon(
    pb: &mut PolyBool<Vec<LogEntry>>,
    path: &Path,
    invert: bool,
) -> anyhow::Result<Polygon> {
    let geo = GeoJson::from_json(&std::fs::read_to_string(path)?)?;
    let poly = pb.polygon_from_geojson(&geo)?;
    Ok(if invert { poly.complement() } else { poly })
}

pub fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive(LevelFilter::WARN.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    let mut pb = PolyBool::new().with_log(Vec::<LogEntry>::new());
    if let Some(eps) = args.epsilon {
        pb.set_epsilon(eps);
    }

    let a = read_polygon(&mut pb, &args.input_a, args.invert_a)?;
    let b = read_polygon(&mut pb, &args.input_b, args.invert_b)?;
    let out = pb.boolean_op(&a, &b, args.op.0)?;

    let points = || a.regions.iter().chain(&b.regions).flatten();
    let (min_x, max_x) = points().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.x), hi.max(p.x))
    });
    let (min_y, max_y) = points().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.y), hi.max(p.y))
    });
    if !min_x.is_finite() || !min_y.is_finite() {
        anyhow::bail!("both inputs are empty");
    }
    let pad = 1.0 + pb.epsilon().value();
    let mut document = svg::Document::new().set(
        "viewBox",
        (
            min_x - pad,
            min_y - pad,
            max_x - min_x + 2.0 * pad,
            max_y - min_y + 2.0 * pad,
        ),
    );

    // An inverted result covers the whole picture, with holes cut out by the regions.
    let mut data = svg::node::element::path::Data::new();
    if out.inverted {
        data = data
            .move_to((min_x - pad, min_y - pad))
            .line_to((max_x + pad, min_y - pad))
            .line_to((max_x + pad, max_y + pad))
            .line_to((min_x - pad, max_y + pad))
            .close();
    }
    for region in &out.regions {
        let mut region = region.iter();
        let Some(p) = region.next() else {
            continue;
        };
        data = data.move_to((p.x, p.y));
        for p in region {
            data = data.line_to((p.x, p.y));
        }
        data = data.close();
    }
    let path = svg::node::element::Path::new()
        .set("d", data)
        .set("fill", "black")
        .set("fill-rule", "evenodd");
    document = document.add(path);
    svg::save(&args.output, &document)?;

    if let Some(log_path) = &args.log {
        let log = pb.into_log();
        std::fs::write(log_path, serde_json::to_string_pretty(&log)?)?;
    }

    Ok(())
}
