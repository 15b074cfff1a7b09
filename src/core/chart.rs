//! Line-chart payloads handed to the browser's charting library.
//!
//! The chart lifecycle (destroy and redraw on every recompute) belongs to the
//! page; this module only describes what to draw.

use serde::Serialize;

use super::types::{ProjectionSeries, Scenario};

/// Which projection series a dataset plots.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SeriesKind {
    Primary,
    Comparison,
    Contributed,
    RealContributed,
}

#[derive(Debug, Clone, Copy)]
pub struct DatasetStyle {
    pub label: &'static str,
    pub kind: SeriesKind,
    pub color: &'static str,
    pub fill: bool,
    pub dashed: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ChartConfig {
    pub container: &'static str,
    pub datasets: &'static [DatasetStyle],
    pub decimation: bool,
}

const HYSA_DATASETS: &[DatasetStyle] = &[
    DatasetStyle {
        label: "HYSA (Preferred)",
        kind: SeriesKind::Primary,
        color: "#4f46e5",
        fill: true,
        dashed: false,
        tension: 0.3,
    },
    DatasetStyle {
        label: "Total Contributed",
        kind: SeriesKind::Contributed,
        color: "#94a3b8",
        fill: false,
        dashed: false,
        tension: 0.0,
    },
    DatasetStyle {
        label: "Normal Bank",
        kind: SeriesKind::Comparison,
        color: "#f43f5e",
        fill: false,
        dashed: true,
        tension: 0.0,
    },
];

const INVESTMENT_DATASETS: &[DatasetStyle] = &[
    DatasetStyle {
        label: "Investment (Value)",
        kind: SeriesKind::Primary,
        color: "#10b981",
        fill: true,
        dashed: false,
        tension: 0.3,
    },
    DatasetStyle {
        label: "Investment (After Inflation)",
        kind: SeriesKind::Comparison,
        color: "#4f46e5",
        fill: false,
        dashed: false,
        tension: 0.3,
    },
    DatasetStyle {
        label: "Contributed (After Inflation)",
        kind: SeriesKind::RealContributed,
        color: "#f43f5e",
        fill: false,
        dashed: true,
        tension: 0.0,
    },
    DatasetStyle {
        label: "Contributed",
        kind: SeriesKind::Contributed,
        color: "#94a3b8",
        fill: false,
        dashed: false,
        tension: 0.0,
    },
];

pub const HYSA_CHART: ChartConfig = ChartConfig {
    container: "hysaChart",
    datasets: HYSA_DATASETS,
    decimation: true,
};

pub const INVESTMENT_CHART: ChartConfig = ChartConfig {
    container: "roboChart",
    datasets: INVESTMENT_DATASETS,
    decimation: false,
};

impl ChartConfig {
    pub fn for_scenario(scenario: Scenario) -> Self {
        match scenario {
            Scenario::Hysa => HYSA_CHART,
            Scenario::Investment => INVESTMENT_CHART,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<[u32; 2]>,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub container: String,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub decimation: bool,
}

pub fn build_chart(config: &ChartConfig, series: &ProjectionSeries) -> ChartSpec {
    let datasets = config
        .datasets
        .iter()
        .map(|style| ChartDataset {
            label: style.label.to_string(),
            data: series_values(series, style.kind).to_vec(),
            border_color: style.color.to_string(),
            // 10% opacity suffix
            background_color: style.fill.then(|| format!("{}1A", style.color)),
            border_width: 2,
            border_dash: style.dashed.then_some([5, 5]),
            fill: style.fill,
            tension: style.tension,
        })
        .collect();

    ChartSpec {
        container: config.container.to_string(),
        labels: series.labels.clone(),
        datasets,
        decimation: config.decimation,
    }
}

fn series_values(series: &ProjectionSeries, kind: SeriesKind) -> &[f64] {
    match kind {
        SeriesKind::Primary => &series.primary,
        SeriesKind::Comparison => &series.comparison,
        SeriesKind::Contributed => &series.contributed,
        SeriesKind::RealContributed => &series.real_contributed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProjectionParameters, project_hysa, project_investment};

    fn sample_params() -> ProjectionParameters {
        ProjectionParameters {
            start_amount: 1_000.0,
            annual_contribution: 1_200.0,
            contribution_growth_rate: 0.02,
            primary_rate: 0.045,
            secondary_rate: 0.005,
            ..ProjectionParameters::default()
        }
    }

    #[test]
    fn hysa_chart_has_three_aligned_datasets() {
        let series = project_hysa(&ProjectionParameters {
            monthly_resolution: true,
            ..sample_params()
        });
        let chart = build_chart(&HYSA_CHART, &series);

        assert_eq!(chart.container, "hysaChart");
        assert!(chart.decimation);
        assert_eq!(chart.labels.len(), 241);
        assert_eq!(chart.datasets.len(), 3);
        for dataset in &chart.datasets {
            assert_eq!(dataset.data.len(), chart.labels.len());
        }
        assert_eq!(chart.datasets[0].data, series.primary);
        assert_eq!(chart.datasets[1].data, series.contributed);
        assert_eq!(chart.datasets[2].data, series.comparison);
    }

    #[test]
    fn filled_datasets_get_translucent_background_and_dashed_get_pattern() {
        let series = project_hysa(&sample_params());
        let chart = build_chart(&HYSA_CHART, &series);

        assert_eq!(chart.datasets[0].background_color.as_deref(), Some("#4f46e51A"));
        assert_eq!(chart.datasets[0].border_dash, None);
        assert_eq!(chart.datasets[2].background_color, None);
        assert_eq!(chart.datasets[2].border_dash, Some([5, 5]));
    }

    #[test]
    fn investment_chart_plots_all_four_series() {
        let series = project_investment(&ProjectionParameters {
            secondary_rate: 0.03,
            ..sample_params()
        });
        let chart = build_chart(&ChartConfig::for_scenario(Scenario::Investment), &series);

        assert_eq!(chart.container, "roboChart");
        assert!(!chart.decimation);
        let labels: Vec<&str> = chart.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Investment (Value)",
                "Investment (After Inflation)",
                "Contributed (After Inflation)",
                "Contributed"
            ]
        );
        assert_eq!(chart.datasets[1].data, series.comparison);
        assert_eq!(chart.datasets[2].data, series.real_contributed);
    }

    #[test]
    fn chart_serializes_with_chart_js_keys() {
        let series = project_investment(&sample_params());
        let chart = build_chart(&INVESTMENT_CHART, &series);
        let json = serde_json::to_string(&chart).expect("chart should serialize");

        assert!(json.contains("\"borderColor\":\"#10b981\""));
        assert!(json.contains("\"backgroundColor\":\"#10b9811A\""));
        assert!(json.contains("\"borderDash\":[5,5]"));
        assert!(json.contains("\"labels\":[\"Year 0\""));
    }
}
