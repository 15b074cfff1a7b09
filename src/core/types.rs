use serde::Serialize;

pub const HORIZON_YEARS: u32 = 20;
pub const MONTHS_PER_YEAR: u32 = 12;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    Hysa,
    Investment,
}

/// When the yearly contribution lands relative to that year's investment growth.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionTiming {
    #[default]
    StartOfYear,
    EndOfYear,
}

/// Rates are fractional (0.05 for 5%). Built fresh for every recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectionParameters {
    pub start_amount: f64,
    pub annual_contribution: f64,
    pub contribution_growth_rate: f64,
    pub primary_rate: f64,
    pub secondary_rate: f64,
    pub monthly_resolution: bool,
    pub contribution_timing: ContributionTiming,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRow {
    pub label: String,
    pub year: u32,
    pub month: Option<u32>,
    pub contributed: f64,
    pub primary: f64,
    pub comparison: f64,
    pub real_contributed: f64,
    pub gain: f64,
    pub comparison_gain: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_contributed: f64,
    pub gain: f64,
    pub comparison_total: f64,
}

/// Every series is index-aligned with `labels` and already rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSeries {
    pub scenario: Scenario,
    pub labels: Vec<String>,
    pub primary: Vec<f64>,
    pub comparison: Vec<f64>,
    pub contributed: Vec<f64>,
    pub real_contributed: Vec<f64>,
    pub rows: Vec<ProjectionRow>,
    pub summary: ProjectionSummary,
}

impl ProjectionSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
