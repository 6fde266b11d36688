//! Chart payloads for the assistant, in the shapes the chat UI renders.
//!
//! bar/pie/radar: `{labels, datasets: [{label, data}]}`
//! heatmap:       `{matrix, xLabels, yLabels, xTitle, yTitle}`

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::employees::models::EmployeeSkillRow;

const VISUAL_WORDS: [&str; 7] = ["chart", "graph", "plot", "visual", "distribution", "breakdown", "heatmap"];
const RATING_SCALE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    BarChart,
    PieChart,
    RadarChart,
    Heatmap,
}

impl ChartKind {
    /// Accepts the wire names and the bare words ("bar", "pie", "radar", "heatmap").
    pub fn from_word(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "bar" | "bar_chart" => Some(Self::BarChart),
            "pie" | "pie_chart" => Some(Self::PieChart),
            "radar" | "radar_chart" => Some(Self::RadarChart),
            "heatmap" | "heat_map" => Some(Self::Heatmap),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapData {
    pub matrix: Vec<Vec<u32>>,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    pub x_title: String,
    pub y_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartData {
    Series(SeriesData),
    Heatmap(HeatmapData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visualization {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub data: ChartData,
}

/// True when the question asks for a chart in so many words.
pub fn mentions_visualization(message: &str) -> bool {
    let lowered = message.to_lowercase();
    VISUAL_WORDS.iter().any(|w| lowered.contains(w))
}

/// The chart type named in the question, if any.
pub fn named_chart(message: &str) -> Option<ChartKind> {
    let lowered = message.to_lowercase();
    if lowered.contains("heat map") {
        return Some(ChartKind::Heatmap);
    }
    let words: Vec<&str> = lowered.split(|c: char| !c.is_alphanumeric()).collect();
    [
        ("heatmap", ChartKind::Heatmap),
        ("radar", ChartKind::RadarChart),
        ("pie", ChartKind::PieChart),
        ("bar", ChartKind::BarChart),
    ]
    .into_iter()
    .find(|(word, _)| words.contains(word))
    .map(|(_, kind)| kind)
}

/// Charts for the rows: the one named in the question (or by the classifier),
/// otherwise employees-per-domain plus skill-level bands. Empty charts are dropped.
pub fn build_visualizations(
    rows: &[EmployeeSkillRow],
    message: &str,
    classified: Option<ChartKind>,
) -> Vec<Visualization> {
    let kinds = match named_chart(message).or(classified) {
        Some(kind) => vec![kind],
        None => vec![ChartKind::BarChart, ChartKind::PieChart],
    };
    kinds.into_iter().filter_map(|kind| build_chart(kind, rows)).collect()
}

pub fn build_chart(kind: ChartKind, rows: &[EmployeeSkillRow]) -> Option<Visualization> {
    if rows.is_empty() {
        return None;
    }
    let (title, data) = match kind {
        ChartKind::BarChart => ("Employees by Domain", ChartData::Series(employees_per_domain(rows))),
        ChartKind::PieChart => ("Skill Level Distribution", ChartData::Series(skill_level_bands(rows))),
        ChartKind::RadarChart => ("Average Skill Rate by Category", ChartData::Series(category_averages(rows))),
        ChartKind::Heatmap => ("Skill vs Interest", ChartData::Heatmap(skill_interest_heatmap(rows))),
    };
    Some(Visualization {
        kind,
        title: title.to_string(),
        data,
    })
}

fn series(label: &str, points: Vec<(String, f64)>) -> SeriesData {
    let (labels, data) = points.into_iter().unzip();
    SeriesData {
        labels,
        datasets: vec![Dataset {
            label: label.to_string(),
            data,
        }],
    }
}

/// Distinct employees per domain, largest first.
fn employees_per_domain(rows: &[EmployeeSkillRow]) -> SeriesData {
    let mut by_domain: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for row in rows {
        by_domain.entry(row.domain.as_str()).or_default().insert(row.name.as_str());
    }
    let mut points: Vec<(String, f64)> = by_domain
        .into_iter()
        .map(|(domain, names)| (domain.to_string(), names.len() as f64))
        .collect();
    points.sort_by(|a, b| b.1.total_cmp(&a.1));
    series("Employees", points)
}

/// Beginner 1-2, Intermediate 3, Advanced 4-5. Empty bands are left out.
fn skill_level_bands(rows: &[EmployeeSkillRow]) -> SeriesData {
    let mut counts = [0usize; 3];
    for row in rows {
        let band = if row.skill_rate < 3.0 {
            0
        } else if row.skill_rate < 4.0 {
            1
        } else {
            2
        };
        counts[band] += 1;
    }
    let points = ["Beginner (1-2)", "Intermediate (3)", "Advanced (4-5)"]
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| (label.to_string(), count as f64))
        .collect();
    series("Skill Records", points)
}

/// Mean skill rate per category, two decimals.
fn category_averages(rows: &[EmployeeSkillRow]) -> SeriesData {
    let mut by_category: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = by_category.entry(row.category.as_str()).or_default();
        entry.0 += row.skill_rate;
        entry.1 += 1;
    }
    let points = by_category
        .into_iter()
        .map(|(category, (sum, n))| (category.to_string(), (sum / n as f64 * 100.0).round() / 100.0))
        .collect();
    series("Average Skill Rate", points)
}

/// Counts per (skill rate, interest rate) cell; ratings are rounded and clamped to 1..=5.
fn skill_interest_heatmap(rows: &[EmployeeSkillRow]) -> HeatmapData {
    let mut matrix = vec![vec![0u32; RATING_SCALE]; RATING_SCALE];
    for row in rows {
        matrix[rating_index(row.skill_rate)][rating_index(row.interest_rate)] += 1;
    }
    let labels: Vec<String> = (1..=RATING_SCALE).map(|r| r.to_string()).collect();
    HeatmapData {
        matrix,
        x_labels: labels.clone(),
        y_labels: labels,
        x_title: "Interest Rate".to_string(),
        y_title: "Skill Rate".to_string(),
    }
}

fn rating_index(rating: f64) -> usize {
    (rating.round().clamp(1.0, RATING_SCALE as f64) as usize) - 1
}
