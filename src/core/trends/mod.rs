//! Cost trend analysis and forecasting
//!
//! Works from optional monthly history: with data it measures growth and
//! seasonality, without it it falls back to per-phase defaults. Months are
//! labelled "YYYY-MM"; seasonal factors are keyed by the two-digit month.

use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::phases::ScalingPhase;
use crate::core::providers::ProviderKind;

/// Number of months a forecast covers
const FORECAST_MONTHS: u32 = 6;

/// Month-over-month growth (percent) beyond which a trend counts as moving
const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Projected growth (percent) that triggers a warning alert
const GROWTH_ALERT_PCT: f64 = 20.0;

/// Forecast spread (percent of the minimum) that triggers a variation warning
const VARIATION_ALERT_PCT: f64 = 30.0;

/// Seasonal factor above which a month is called out as expensive
const SEASONAL_ALERT_FACTOR: f64 = 1.2;

/// Base cost assumed when no history is available
const DEFAULT_BASE_COST: f64 = 100.0;

/// Direction costs are moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// One month of observed cost, labelled "YYYY-MM"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCost {
    pub month: String,
    pub cost: f64,
}

/// Relative cost level of one calendar month ("01".."12")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalFactor {
    pub month: String,
    pub factor: f64,
}

/// Trend summary for a provider and phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTrends {
    pub current_trend: TrendDirection,
    /// Average month-over-month growth, percent
    pub projected_growth: f64,
    pub seasonal_factors: Vec<SeasonalFactor>,
    pub recommendations: Vec<String>,
}

/// One forecast month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub month: String,
    pub projected_cost: f64,
    pub confidence: f64,
}

/// Severity of a trend alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Info,
}

/// A noteworthy condition found in the trend data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAlert {
    pub kind: AlertKind,
    pub message: String,
}

/// Trends, forecast and alerts bundled together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub trends: CostTrends,
    pub forecast: Vec<ForecastPoint>,
    pub alerts: Vec<TrendAlert>,
}

/// Analyzer over historical monthly costs
#[derive(Debug, Default)]
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Trend summary from history, falling back to phase defaults when the
    /// history is empty.
    pub fn analyze(
        &self,
        provider: ProviderKind,
        phase: ScalingPhase,
        history: &[MonthlyCost],
    ) -> CostTrends {
        info!(%provider, %phase, points = history.len(), "Analyzing cost trends");

        if history.is_empty() {
            return default_trends(phase);
        }

        let costs: Vec<f64> = history.iter().map(|h| h.cost).collect();
        let projected_growth = average_growth(&costs);

        let current_trend = if projected_growth > TREND_THRESHOLD_PCT {
            TrendDirection::Increasing
        } else if projected_growth < -TREND_THRESHOLD_PCT {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        };

        CostTrends {
            current_trend,
            projected_growth,
            seasonal_factors: seasonal_factors(history),
            recommendations: trend_recommendations(current_trend, projected_growth),
        }
    }

    /// Six-month forecast starting from the current date.
    pub fn forecast(&self, trends: &CostTrends, history: &[MonthlyCost]) -> Vec<ForecastPoint> {
        self.forecast_from(trends, history, Utc::now().date_naive())
    }

    /// Six-month forecast starting from an explicit date.
    pub fn forecast_from(
        &self,
        trends: &CostTrends,
        history: &[MonthlyCost],
        start: NaiveDate,
    ) -> Vec<ForecastPoint> {
        let base_cost = history.last().map_or(DEFAULT_BASE_COST, |h| h.cost);
        let start_of_month = start.with_day(1).unwrap_or(start);

        (1..=FORECAST_MONTHS)
            .filter_map(|i| {
                let date = start_of_month.checked_add_months(Months::new(i))?;
                let month_key = format!("{:02}", date.month());

                let seasonal = trends
                    .seasonal_factors
                    .iter()
                    .find(|f| f.month == month_key)
                    .map_or(1.0, |f| f.factor);
                let growth = 1.0 + (trends.projected_growth / 100.0) * (f64::from(i) / 12.0);
                let projected = base_cost * seasonal * growth;
                let confidence = (1.0 - f64::from(i) * 0.1).max(0.5);

                Some(ForecastPoint {
                    month: format!("{:04}-{:02}", date.year(), date.month()),
                    projected_cost: round2(projected),
                    confidence: round2(confidence),
                })
            })
            .collect()
    }

    /// Alerts worth surfacing for a trend summary and its forecast.
    pub fn alerts(&self, trends: &CostTrends, forecast: &[ForecastPoint]) -> Vec<TrendAlert> {
        let mut alerts = Vec::new();

        if trends.current_trend == TrendDirection::Increasing
            && trends.projected_growth > GROWTH_ALERT_PCT
        {
            alerts.push(TrendAlert {
                kind: AlertKind::Warning,
                message: format!(
                    "High cost growth rate detected ({:.1}% projected). Consider optimization measures.",
                    trends.projected_growth
                ),
            });
        }

        if !forecast.is_empty() {
            let max = forecast
                .iter()
                .map(|f| f.projected_cost)
                .fold(f64::NEG_INFINITY, f64::max);
            let min = forecast
                .iter()
                .map(|f| f.projected_cost)
                .fold(f64::INFINITY, f64::min);
            if min > 0.0 {
                let variation = ((max - min) / min) * 100.0;
                if variation > VARIATION_ALERT_PCT {
                    alerts.push(TrendAlert {
                        kind: AlertKind::Warning,
                        message: format!(
                            "High cost variation expected ({variation:.1}%). Plan for seasonal budget adjustments."
                        ),
                    });
                }
            }
        }

        let expensive_months: Vec<&str> = trends
            .seasonal_factors
            .iter()
            .filter(|f| f.factor > SEASONAL_ALERT_FACTOR)
            .map(|f| f.month.as_str())
            .collect();
        if !expensive_months.is_empty() {
            alerts.push(TrendAlert {
                kind: AlertKind::Info,
                message: format!(
                    "Higher costs expected in months: {}. Plan accordingly.",
                    expensive_months.join(", ")
                ),
            });
        }

        alerts
    }

    /// Full analysis: trends, forecast and alerts in one call.
    pub fn full_analysis(
        &self,
        provider: ProviderKind,
        phase: ScalingPhase,
        history: &[MonthlyCost],
    ) -> TrendAnalysis {
        let trends = self.analyze(provider, phase, history);
        let forecast = self.forecast(&trends, history);
        let alerts = self.alerts(&trends, &forecast);
        TrendAnalysis {
            trends,
            forecast,
            alerts,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Average month-over-month growth in percent.
fn average_growth(costs: &[f64]) -> f64 {
    if costs.len() < 2 {
        return 0.0;
    }
    let total: f64 = costs
        .windows(2)
        .map(|w| ((w[1] - w[0]) / w[0]) * 100.0)
        .sum();
    total / (costs.len() - 1) as f64
}

/// Per-calendar-month factor: month average relative to the overall average.
fn seasonal_factors(history: &[MonthlyCost]) -> Vec<SeasonalFactor> {
    let overall_average = history.iter().map(|h| h.cost).sum::<f64>() / history.len() as f64;
    if overall_average <= 0.0 {
        return Vec::new();
    }

    // Keyed by "MM", first-seen order preserved
    let mut months: Vec<(String, f64, u32)> = Vec::new();
    for entry in history {
        let Some(month) = entry.month.get(5..7) else {
            continue;
        };
        match months.iter_mut().find(|(m, _, _)| m == month) {
            Some((_, sum, count)) => {
                *sum += entry.cost;
                *count += 1;
            }
            None => months.push((month.to_string(), entry.cost, 1)),
        }
    }

    months
        .into_iter()
        .map(|(month, sum, count)| SeasonalFactor {
            month,
            factor: (sum / f64::from(count)) / overall_average,
        })
        .collect()
}

fn trend_recommendations(trend: TrendDirection, growth: f64) -> Vec<String> {
    let mut recommendations = Vec::new();
    match trend {
        TrendDirection::Increasing => {
            recommendations.push(
                "Monitor resource utilization to identify optimization opportunities".to_string(),
            );
            recommendations.push("Consider implementing cost alerts and budgets".to_string());
            if growth > GROWTH_ALERT_PCT {
                recommendations
                    .push("Evaluate if current scaling phase is appropriate".to_string());
            }
        }
        TrendDirection::Decreasing => {
            recommendations
                .push("Excellent cost management - maintain current practices".to_string());
            recommendations
                .push("Consider reinvesting savings in performance improvements".to_string());
        }
        TrendDirection::Stable => {
            recommendations.push("Costs are well-controlled".to_string());
            recommendations.push(
                "Look for opportunities to optimize without impacting performance".to_string(),
            );
        }
    }
    recommendations
}

fn default_trends(phase: ScalingPhase) -> CostTrends {
    let (current_trend, projected_growth, recommendations) = match phase {
        ScalingPhase::Launch => (
            TrendDirection::Increasing,
            15.0,
            vec![
                "Expect moderate cost increases as user base grows".to_string(),
                "Focus on cost-effective solutions during initial phase".to_string(),
                "Monitor usage patterns to optimize resource allocation".to_string(),
            ],
        ),
        ScalingPhase::Growth => (
            TrendDirection::Increasing,
            25.0,
            vec![
                "Significant growth expected - plan for scaling costs".to_string(),
                "Implement cost monitoring and alerting".to_string(),
                "Consider reserved instances for predictable workloads".to_string(),
            ],
        ),
        ScalingPhase::Scale => (
            TrendDirection::Stable,
            10.0,
            vec![
                "Costs should stabilize with mature infrastructure".to_string(),
                "Focus on optimization and efficiency improvements".to_string(),
                "Leverage economies of scale for better pricing".to_string(),
            ],
        ),
    };

    let factors = [
        0.9, 0.9, 1.0, 1.0, 1.1, 1.1, 1.2, 1.2, 1.1, 1.0, 1.3, 1.2,
    ];
    let seasonal_factors = factors
        .iter()
        .enumerate()
        .map(|(i, &factor)| SeasonalFactor {
            month: format!("{:02}", i + 1),
            factor,
        })
        .collect();

    CostTrends {
        current_trend,
        projected_growth,
        seasonal_factors,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(points: &[(&str, f64)]) -> Vec<MonthlyCost> {
        points
            .iter()
            .map(|(month, cost)| MonthlyCost {
                month: (*month).to_string(),
                cost: *cost,
            })
            .collect()
    }

    #[test]
    fn test_empty_history_uses_phase_defaults() {
        let analyzer = TrendAnalyzer::new();
        let trends = analyzer.analyze(ProviderKind::Aws, ScalingPhase::Growth, &[]);
        assert_eq!(trends.current_trend, TrendDirection::Increasing);
        assert!((trends.projected_growth - 25.0).abs() < 1e-9);
        assert_eq!(trends.seasonal_factors.len(), 12);
        assert!((trends.seasonal_factors[10].factor - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_growth_classification() {
        let analyzer = TrendAnalyzer::new();

        let rising = analyzer.analyze(
            ProviderKind::Aws,
            ScalingPhase::Launch,
            &history(&[("2025-01", 100.0), ("2025-02", 110.0), ("2025-03", 121.0)]),
        );
        assert_eq!(rising.current_trend, TrendDirection::Increasing);
        assert!((rising.projected_growth - 10.0).abs() < 1e-9);

        let flat = analyzer.analyze(
            ProviderKind::Aws,
            ScalingPhase::Launch,
            &history(&[("2025-01", 100.0), ("2025-02", 102.0)]),
        );
        assert_eq!(flat.current_trend, TrendDirection::Stable);

        let falling = analyzer.analyze(
            ProviderKind::Aws,
            ScalingPhase::Launch,
            &history(&[("2025-01", 100.0), ("2025-02", 80.0)]),
        );
        assert_eq!(falling.current_trend, TrendDirection::Decreasing);
        assert!(falling
            .recommendations
            .iter()
            .any(|r| r.contains("Excellent cost management")));
    }

    #[test]
    fn test_seasonal_factors_average_repeated_months() {
        // January appears twice; its factor uses the January average
        let data = history(&[
            ("2024-01", 80.0),
            ("2024-06", 100.0),
            ("2025-01", 120.0),
        ]);
        let factors = seasonal_factors(&data);
        let january = factors.iter().find(|f| f.month == "01").unwrap();
        let overall = 300.0 / 3.0;
        assert!((january.factor - 100.0 / overall).abs() < 1e-9);
    }

    #[test]
    fn test_forecast_six_months_with_decaying_confidence() {
        let analyzer = TrendAnalyzer::new();
        let trends = default_trends(ScalingPhase::Launch);
        let start = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let forecast = analyzer.forecast_from(&trends, &[], start);

        assert_eq!(forecast.len(), 6);
        assert_eq!(forecast[0].month, "2025-04");
        assert_eq!(forecast[5].month, "2025-09");
        assert!((forecast[0].confidence - 0.9).abs() < 1e-9);
        assert!((forecast[5].confidence - 0.5).abs() < 1e-9);

        // April: base 100 x seasonal 1.0 x (1 + 0.15/12)
        assert!((forecast[0].projected_cost - round2(100.0 * (1.0 + 0.15 / 12.0))).abs() < 1e-9);
    }

    #[test]
    fn test_forecast_bases_on_last_history_point() {
        let analyzer = TrendAnalyzer::new();
        let data = history(&[("2025-01", 100.0), ("2025-02", 200.0)]);
        let trends = analyzer.analyze(ProviderKind::Linode, ScalingPhase::Launch, &data);
        let start = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let forecast = analyzer.forecast_from(&trends, &data, start);
        // 100% growth from a $200 base dwarfs any seasonal factor
        assert!(forecast[0].projected_cost > 200.0);
    }

    #[test]
    fn test_alerts_for_high_growth_and_seasonality() {
        let analyzer = TrendAnalyzer::new();
        let trends = default_trends(ScalingPhase::Growth);
        let start = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let forecast = analyzer.forecast_from(&trends, &[], start);
        let alerts = analyzer.alerts(&trends, &forecast);

        // 25% projected growth trips the growth warning
        assert!(alerts
            .iter()
            .any(|a| a.kind == AlertKind::Warning && a.message.contains("25.0%")));
        // Default seasonal table has months above 1.2
        assert!(alerts
            .iter()
            .any(|a| a.kind == AlertKind::Info && a.message.contains("11")));
    }

    #[test]
    fn test_no_alerts_for_calm_trends() {
        let analyzer = TrendAnalyzer::new();
        let trends = CostTrends {
            current_trend: TrendDirection::Stable,
            projected_growth: 2.0,
            seasonal_factors: Vec::new(),
            recommendations: Vec::new(),
        };
        let forecast = vec![
            ForecastPoint {
                month: "2025-04".to_string(),
                projected_cost: 100.0,
                confidence: 0.9,
            },
            ForecastPoint {
                month: "2025-05".to_string(),
                projected_cost: 105.0,
                confidence: 0.8,
            },
        ];
        assert!(analyzer.alerts(&trends, &forecast).is_empty());
    }
}
