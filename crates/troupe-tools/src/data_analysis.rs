//! Data analysis tool
//!
//! Reads a tabular data file (CSV or JSON array-of-objects), computes basic
//! descriptive statistics over its numeric columns, and optionally writes a
//! histogram chart next to the input when the query asks for visualization.
//! Excel files are recognized but reported as unsupported: the workspace
//! carries no spreadsheet reader.

use crate::{Tool, ToolOutput, optional_str, required_str};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use troupe_common::ToolError;

const VISUAL_KEYWORDS: &[&str] = &["plot", "chart", "graph", "visual", "图", "可视化"];

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Full analysis of one data file.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub path: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub numeric_stats: Vec<ColumnStats>,
    /// Pairwise Pearson correlation, present when at least two numeric
    /// columns exist.
    pub correlations: Vec<(String, String, f64)>,
    /// Path of the generated chart, when visualization was requested.
    pub chart_path: Option<String>,
}

struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Tool analyzing tabular data files.
pub struct DataAnalysisTool;

#[async_trait]
impl Tool for DataAnalysisTool {
    fn name(&self) -> &str {
        "data_analysis"
    }

    fn description(&self) -> &str {
        "Analyze data and generate insights"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "data_path": {
                    "type": "string",
                    "description": "Path to a .csv or .json data file"
                },
                "query": {
                    "type": "string",
                    "description": "Original request text; visualization keywords trigger a chart"
                }
            },
            "required": ["data_path"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolOutput, ToolError> {
        self.validate_params(&params)?;
        let data_path = required_str(&params, "data_path")?;
        let query = optional_str(&params, "query").to_lowercase();
        debug!(data_path, "analyzing data file");

        let path = PathBuf::from(data_path);
        if !path.exists() {
            return Err(ToolError::FileNotFound(path));
        }

        let table = load_table(&path)?;
        if table.rows.is_empty() {
            return Err(ToolError::EmptyData(path));
        }

        let numeric = numeric_columns(&table);
        let numeric_stats: Vec<ColumnStats> = numeric
            .iter()
            .map(|&(index, _)| describe(&table, index))
            .collect();

        let mut correlations = Vec::new();
        if numeric.len() > 1 {
            for i in 0..numeric.len() {
                for j in (i + 1)..numeric.len() {
                    let (a, name_a) = numeric[i];
                    let (b, name_b) = numeric[j];
                    if let Some(r) = pearson(&table, a, b) {
                        correlations.push((name_a.to_string(), name_b.to_string(), r));
                    }
                }
            }
        }

        let chart_path = if VISUAL_KEYWORDS.iter().any(|kw| query.contains(kw)) {
            match numeric.first() {
                Some(&(index, name)) => {
                    let chart = chart_sibling(&path);
                    write_histogram(&table, index, name, &chart)?;
                    Some(chart.display().to_string())
                }
                None => {
                    warn!(data_path, "visualization requested but no numeric column");
                    None
                }
            }
        } else {
            None
        };

        Ok(ToolOutput::Analysis(AnalysisReport {
            path: data_path.to_string(),
            rows: table.rows.len(),
            columns: table.columns,
            numeric_stats,
            correlations,
            chart_path,
        }))
    }
}

fn load_table(path: &Path) -> Result<Table, ToolError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        // Includes xlsx/xls, which we have no reader for.
        _ => Err(ToolError::UnsupportedFormat(path.display().to_string())),
    }
}

fn load_csv(path: &Path) -> Result<Table, ToolError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|err| ToolError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|err| ToolError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| ToolError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(columns.len(), String::new());
        rows.push(row);
    }

    if columns.is_empty() {
        return Err(ToolError::EmptyData(path.to_path_buf()));
    }
    Ok(Table { columns, rows })
}

fn load_json(path: &Path) -> Result<Table, ToolError> {
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Err(ToolError::EmptyData(path.to_path_buf()));
    }
    let value: Value = serde_json::from_str(&contents).map_err(|err| ToolError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let records = value.as_array().ok_or_else(|| ToolError::Parse {
        path: path.to_path_buf(),
        message: "expected a JSON array of objects".to_string(),
    })?;

    // Column order follows first appearance across records.
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        let object = record.as_object().ok_or_else(|| ToolError::Parse {
            path: path.to_path_buf(),
            message: "expected a JSON array of objects".to_string(),
        })?;
        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            let object = record.as_object().expect("validated above");
            columns
                .iter()
                .map(|column| match object.get(column) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                })
                .collect()
        })
        .collect();

    Ok(Table { columns, rows })
}

/// Columns where every non-empty cell parses as a number (and at least one
/// cell does).
fn numeric_columns(table: &Table) -> Vec<(usize, &str)> {
    table
        .columns
        .iter()
        .enumerate()
        .filter(|(index, _)| {
            let mut seen = false;
            for row in &table.rows {
                let cell = row[*index].trim();
                if cell.is_empty() {
                    continue;
                }
                if cell.parse::<f64>().is_err() {
                    return false;
                }
                seen = true;
            }
            seen
        })
        .map(|(index, name)| (index, name.as_str()))
        .collect()
}

fn column_values(table: &Table, index: usize) -> Vec<f64> {
    table
        .rows
        .iter()
        .filter_map(|row| row[index].trim().parse::<f64>().ok())
        .collect()
}

fn describe(table: &Table, index: usize) -> ColumnStats {
    let values = column_values(table, index);
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    // Sample standard deviation, matching common describe() conventions.
    let std = if count > 1 {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64).sqrt()
    } else {
        0.0
    };
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    ColumnStats {
        name: table.columns[index].clone(),
        count,
        mean,
        std,
        min,
        max,
    }
}

/// Pearson correlation over rows where both cells are numeric.
fn pearson(table: &Table, a: usize, b: usize) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = table
        .rows
        .iter()
        .filter_map(|row| {
            let x = row[a].trim().parse::<f64>().ok()?;
            let y = row[b].trim().parse::<f64>().ok()?;
            Some((x, y))
        })
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

fn chart_sibling(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("data");
    match path.parent() {
        Some(parent) => parent.join(format!("{}_chart.svg", stem)),
        None => PathBuf::from(format!("{}_chart.svg", stem)),
    }
}

/// Render a 20-bin histogram of one column as a standalone SVG file.
fn write_histogram(
    table: &Table,
    index: usize,
    name: &str,
    chart_path: &Path,
) -> Result<(), ToolError> {
    const BINS: usize = 20;
    const WIDTH: f64 = 640.0;
    const HEIGHT: f64 = 400.0;
    const MARGIN: f64 = 40.0;

    let values = column_values(table, index);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };

    let mut counts = [0usize; BINS];
    for value in &values {
        let bin = (((value - min) / span) * BINS as f64) as usize;
        counts[bin.min(BINS - 1)] += 1;
    }
    let peak = counts.iter().copied().max().unwrap_or(1).max(1) as f64;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
        WIDTH as u32, HEIGHT as u32
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"20\" text-anchor=\"middle\">{} 分布直方图</text>\n",
        (WIDTH / 2.0) as u32,
        name
    ));
    let bar_width = (WIDTH - 2.0 * MARGIN) / BINS as f64;
    let plot_height = HEIGHT - 2.0 * MARGIN;
    for (i, count) in counts.iter().enumerate() {
        let bar_height = plot_height * (*count as f64 / peak);
        let x = MARGIN + i as f64 * bar_width;
        let y = HEIGHT - MARGIN - bar_height;
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"steelblue\"/>\n",
            x,
            y,
            bar_width - 1.0,
            bar_height
        ));
    }
    svg.push_str("</svg>\n");

    fs::write(chart_path, svg)?;
    debug!(chart = %chart_path.display(), "wrote histogram");
    Ok(())
}
