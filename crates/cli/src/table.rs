//! Point tables handed to external renderers.
//!
//! Columns: `x, y, rule`, plus `c` for scalar colors or `red, green, blue`
//! for RGB colors. `.parquet` paths are written as Parquet, anything else as CSV.

use anyhow::{Context, Result};
use ifs::color::ColorSequence;
use ifs::trajectory::Trajectory;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

pub fn frame(traj: &Trajectory, colors: Option<&ColorSequence>) -> Result<DataFrame> {
    let xs = traj.xs();
    let ys = traj.ys();
    let rule: Vec<u32> = traj.trace.iter().map(|&j| j as u32).collect();
    let df = match colors {
        None => df!("x" => xs, "y" => ys, "rule" => rule)?,
        Some(ColorSequence::Scalar(c)) => {
            df!("x" => xs, "y" => ys, "rule" => rule, "c" => c.clone())?
        }
        Some(ColorSequence::Rgb(c)) => {
            let red: Vec<f64> = c.iter().map(|v| v.x).collect();
            let green: Vec<f64> = c.iter().map(|v| v.y).collect();
            let blue: Vec<f64> = c.iter().map(|v| v.z).collect();
            df!(
                "x" => xs,
                "y" => ys,
                "rule" => rule,
                "red" => red,
                "green" => green,
                "blue" => blue
            )?
        }
    };
    Ok(df)
}

fn is_parquet(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "parquet")
}

/// Write `df` to `path`, creating parent directories. Returns the row count.
pub fn write(path: &Path, df: &mut DataFrame) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if is_parquet(path) {
        ParquetWriter::new(&mut file)
            .finish(df)
            .with_context(|| format!("writing parquet {}", path.display()))?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("writing csv {}", path.display()))?;
    }
    Ok(df.height())
}

/// Lazily open a point table written by `write`.
pub fn scan(path: &Path) -> Result<LazyFrame> {
    let lf = if is_parquet(path) {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
    } else {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?
    };
    Ok(lf)
}

/// Row count and bounding box of a point table; bounds are `None` for an empty table.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Extent {
    pub rows: usize,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

impl Extent {
    fn empty() -> Self {
        Self {
            rows: 0,
            x_min: None,
            x_max: None,
            y_min: None,
            y_max: None,
        }
    }
}

fn first_f64(df: &DataFrame, name: &str) -> Result<Option<f64>> {
    Ok(df.column(name)?.cast(&DataType::Float64)?.f64()?.get(0))
}

pub fn extent(path: &Path) -> Result<Extent> {
    let counted = scan(path)?.select([len().alias("rows")]).collect()?;
    let rows = first_f64(&counted, "rows")?.unwrap_or(0.0) as usize;
    if rows == 0 {
        return Ok(Extent::empty());
    }
    let df = scan(path)?
        .select([
            col("x").min().alias("x_min"),
            col("x").max().alias("x_max"),
            col("y").min().alias("y_min"),
            col("y").max().alias("y_max"),
        ])
        .collect()?;
    Ok(Extent {
        rows,
        x_min: first_f64(&df, "x_min")?,
        x_max: first_f64(&df, "x_max")?,
        y_min: first_f64(&df, "y_min")?,
        y_max: first_f64(&df, "y_max")?,
    })
}
