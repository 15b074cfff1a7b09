use super::types::{
    ContributionTiming, HORIZON_YEARS, MONTHS_PER_YEAR, ProjectionParameters, ProjectionRow,
    ProjectionSeries, ProjectionSummary, Scenario,
};

#[derive(Debug, Clone, Copy)]
struct PeriodPoint {
    year: u32,
    month: Option<u32>,
    primary: f64,
    comparison: f64,
    contributed: f64,
    real_contributed: f64,
}

impl PeriodPoint {
    fn opening(start_amount: f64, month: Option<u32>) -> Self {
        Self {
            year: 0,
            month,
            primary: start_amount,
            comparison: start_amount,
            contributed: start_amount,
            real_contributed: start_amount,
        }
    }

    fn gain(self) -> f64 {
        self.primary - self.contributed
    }

    fn comparison_gain(self) -> f64 {
        self.comparison - self.real_contributed
    }
}

#[derive(Debug)]
struct SeriesBuilder {
    scenario: Scenario,
    labels: Vec<String>,
    primary: Vec<f64>,
    comparison: Vec<f64>,
    contributed: Vec<f64>,
    real_contributed: Vec<f64>,
    rows: Vec<ProjectionRow>,
    last: PeriodPoint,
}

impl SeriesBuilder {
    fn new(scenario: Scenario, points: usize, opening: PeriodPoint) -> Self {
        Self {
            scenario,
            labels: Vec::with_capacity(points),
            primary: Vec::with_capacity(points),
            comparison: Vec::with_capacity(points),
            contributed: Vec::with_capacity(points),
            real_contributed: Vec::with_capacity(points),
            rows: Vec::with_capacity(points),
            last: opening,
        }
    }

    fn push(&mut self, label: String, point: PeriodPoint) {
        self.primary.push(round_cents(point.primary));
        self.comparison.push(round_cents(point.comparison));
        self.contributed.push(round_cents(point.contributed));
        self.real_contributed.push(round_cents(point.real_contributed));
        self.rows.push(ProjectionRow {
            label: label.clone(),
            year: point.year,
            month: point.month,
            contributed: round_cents(point.contributed),
            primary: round_cents(point.primary),
            comparison: round_cents(point.comparison),
            real_contributed: round_cents(point.real_contributed),
            gain: round_cents(point.gain()),
            comparison_gain: round_cents(point.comparison_gain()),
        });
        self.labels.push(label);
        self.last = point;
    }

    fn finish(self) -> ProjectionSeries {
        let last = self.last;
        let summary = match self.scenario {
            Scenario::Hysa => ProjectionSummary {
                total_contributed: round_cents(last.contributed),
                gain: round_cents(last.gain()),
                comparison_total: round_cents(last.comparison),
            },
            Scenario::Investment => ProjectionSummary {
                total_contributed: round_cents(last.contributed),
                gain: round_cents(last.comparison_gain()),
                comparison_total: round_cents(last.real_contributed),
            },
        };

        ProjectionSeries {
            scenario: self.scenario,
            labels: self.labels,
            primary: self.primary,
            comparison: self.comparison,
            contributed: self.contributed,
            real_contributed: self.real_contributed,
            rows: self.rows,
            summary,
        }
    }
}

/// Month-by-month compounding of a preferred-rate balance against an
/// ordinary bank balance. The monthly view only changes which months are
/// emitted, never the simulation itself.
pub fn project_hysa(params: &ProjectionParameters) -> ProjectionSeries {
    let monthly = params.monthly_resolution;
    let points_per_year = if monthly { MONTHS_PER_YEAR } else { 1 };
    let opening = PeriodPoint::opening(params.start_amount, monthly.then_some(0));
    let mut builder = SeriesBuilder::new(
        Scenario::Hysa,
        (HORIZON_YEARS * points_per_year + 1) as usize,
        opening,
    );
    builder.push(period_label(0, opening.month), opening);

    let monthly_rate = params.primary_rate / MONTHS_PER_YEAR as f64;
    let monthly_bank_rate = params.secondary_rate / MONTHS_PER_YEAR as f64;
    let mut hysa = params.start_amount;
    let mut bank = params.start_amount;
    let mut contributed = params.start_amount;
    let mut annual_contribution = params.annual_contribution;

    for year in 1..=HORIZON_YEARS {
        let monthly_contribution = annual_contribution / MONTHS_PER_YEAR as f64;

        for month in 1..=MONTHS_PER_YEAR {
            hysa = (hysa + monthly_contribution) * (1.0 + monthly_rate);
            bank = (bank + monthly_contribution) * (1.0 + monthly_bank_rate);
            contributed += monthly_contribution;

            if monthly || month == MONTHS_PER_YEAR {
                let month = monthly.then_some(month);
                builder.push(
                    period_label(year, month),
                    PeriodPoint {
                        year,
                        month,
                        primary: hysa,
                        comparison: bank,
                        contributed,
                        real_contributed: contributed,
                    },
                );
            }
        }

        annual_contribution *= 1.0 + params.contribution_growth_rate;
    }

    builder.finish()
}

/// Annual compounding of an investment balance, reported alongside its
/// value deflated by the running inflation factor.
pub fn project_investment(params: &ProjectionParameters) -> ProjectionSeries {
    let opening = PeriodPoint::opening(params.start_amount, None);
    let mut builder = SeriesBuilder::new(
        Scenario::Investment,
        (HORIZON_YEARS + 1) as usize,
        opening,
    );
    builder.push(period_label(0, None), opening);

    let mut invested = params.start_amount;
    let mut contributed = params.start_amount;
    let mut inflation_factor = 1.0;
    let mut annual_contribution = params.annual_contribution;

    for year in 1..=HORIZON_YEARS {
        invested = grow_invested(
            invested,
            annual_contribution,
            params.primary_rate,
            params.contribution_timing,
        );
        contributed += annual_contribution;
        inflation_factor *= 1.0 + params.secondary_rate;

        builder.push(
            period_label(year, None),
            PeriodPoint {
                year,
                month: None,
                primary: invested,
                comparison: deflate(invested, inflation_factor),
                contributed,
                real_contributed: deflate(contributed, inflation_factor),
            },
        );

        annual_contribution *= 1.0 + params.contribution_growth_rate;
    }

    builder.finish()
}

// Past 2^52 / 100 an f64 has no sub-cent precision left, and scaling by 100
// could overflow to infinity.
const MAX_CENT_PRECISION: f64 = 4_503_599_627_370_496.0 / 100.0;

pub fn round_cents(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= MAX_CENT_PRECISION {
        return value;
    }
    (value * 100.0).round() / 100.0
}

fn grow_invested(balance: f64, contribution: f64, rate: f64, timing: ContributionTiming) -> f64 {
    match timing {
        ContributionTiming::StartOfYear => (balance + contribution) * (1.0 + rate),
        ContributionTiming::EndOfYear => balance * (1.0 + rate) + contribution,
    }
}

// A -100% inflation year collapses the deflator to zero.
fn deflate(value: f64, inflation_factor: f64) -> f64 {
    if inflation_factor == 0.0 {
        0.0
    } else {
        value / inflation_factor
    }
}

fn period_label(year: u32, month: Option<u32>) -> String {
    match month {
        Some(month) => format!("Y{year} M{month}"),
        None => format!("Year {year}"),
    }
}
