//! Synthetic dashboard data.
//!
//! Only the payload shape is meaningful; values are random with a night-heavy
//! and weekend-heavy pattern so the charts look plausible.

use crate::models::{DashboardMetrics, HeatmapCell, HeatmapRow, HourlyFraud};
use rand::Rng;

pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn is_night(hour: u8) -> bool {
    hour >= 22 || hour <= 5
}

fn is_business_hours(hour: u8) -> bool {
    (9..=17).contains(&hour)
}

pub fn generate<R: Rng>(rng: &mut R) -> DashboardMetrics {
    let total_transactions: u32 = rng.gen_range(8_000..=12_000);
    let fraud_count: u32 = rng.gen_range(200..=400);
    let fraud_rate = f64::from(fraud_count) / f64::from(total_transactions) * 100.0;

    DashboardMetrics {
        total_transactions,
        fraud_rate,
        avg_transaction_value: rng.gen_range(50.0..=200.0),
        fraud_by_hour: fraud_by_hour(rng),
        fraud_heatmap: fraud_heatmap(rng),
    }
}

fn fraud_by_hour<R: Rng>(rng: &mut R) -> Vec<HourlyFraud> {
    (0..24u8)
        .map(|hour| {
            let base: i32 = if is_night(hour) {
                20
            } else if is_business_hours(hour) {
                5
            } else {
                10
            };
            let count = (base + rng.gen_range(-3..=3i32)).max(0);
            HourlyFraud {
                hour,
                fraud_count: count as u32,
            }
        })
        .collect()
}

fn fraud_heatmap<R: Rng>(rng: &mut R) -> Vec<HeatmapRow> {
    let mut rows = Vec::with_capacity(DAYS.len() * 24);

    for (day_idx, day) in DAYS.iter().enumerate() {
        for hour in 0..24u8 {
            let mut base: i32 = 10;
            if day_idx >= 5 {
                base += 5;
            }
            if is_night(hour) {
                base += 8;
            } else if is_business_hours(hour) {
                base -= 3;
            }
            let value = (base + rng.gen_range(-2..=2i32)).max(1);

            rows.push(HeatmapRow {
                id: format!("{}-{}", day, hour),
                data: vec![HeatmapCell {
                    x: hour.to_string(),
                    y: day.to_string(),
                    value: value as u32,
                }],
            });
        }
    }

    rows
}
