//! Monthly click chart scaling

use crate::models::MonthlyClicks;

/// The chart never scales below this many clicks
pub const MIN_CEILING: u64 = 10;

/// Number of intervals on the y axis (ticks = steps + 1)
pub const Y_STEPS: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub month: String,
    pub clicks: u64,
    /// Bar height as a percentage of the ceiling
    pub height_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartScale {
    pub ceiling: u64,
    /// Descending, top tick first
    pub ticks: Vec<u64>,
    pub bars: Vec<ChartBar>,
}

/// Smallest multiple of 10 at or above the busiest month, never below 10
pub fn chart_ceiling(months: &[MonthlyClicks]) -> u64 {
    let max = months.iter().map(|m| m.clicks).max().unwrap_or(0);
    MIN_CEILING.max(max.div_ceil(10) * 10)
}

pub fn y_axis_ticks(ceiling: u64) -> Vec<u64> {
    let step = ceiling as f64 / Y_STEPS as f64;
    (0..=Y_STEPS)
        .rev()
        .map(|i| (step * i as f64).round() as u64)
        .collect()
}

impl ChartScale {
    pub fn from_months(months: &[MonthlyClicks]) -> Self {
        let ceiling = chart_ceiling(months);
        let bars = months
            .iter()
            .map(|m| ChartBar {
                month: m.month.clone(),
                clicks: m.clicks,
                height_pct: m.clicks as f64 / ceiling as f64 * 100.0,
            })
            .collect();

        Self {
            ceiling,
            ticks: y_axis_ticks(ceiling),
            bars,
        }
    }
}
