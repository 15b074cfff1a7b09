mod chart;
mod engine;
mod types;

pub use chart::{
    ChartConfig, ChartDataset, ChartSpec, DatasetStyle, HYSA_CHART, INVESTMENT_CHART, SeriesKind,
    build_chart,
};
pub use engine::{project_hysa, project_investment, round_cents};
pub use types::{
    ContributionTiming, HORIZON_YEARS, MONTHS_PER_YEAR, ProjectionParameters, ProjectionRow,
    ProjectionSeries, ProjectionSummary, Scenario,
};
