//! Records produced by the cost calculator

use serde::{Deserialize, Serialize};

use crate::config::phases::ScalingPhase;
use crate::core::providers::ProviderKind;
use crate::core::types::{CostEstimate, Level, ServiceCategory};

/// Per-category cost comparison between the two billed providers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdownComparison {
    pub service: ServiceCategory,
    pub aws: f64,
    pub linode: f64,
    /// AWS cost minus Linode cost; negative when AWS is cheaper
    pub savings: f64,
    /// Savings relative to the AWS cost, 0 when AWS bills nothing
    pub savings_percentage: f64,
}

/// Both providers' estimates side by side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCosts {
    pub aws: CostEstimate,
    pub linode: CostEstimate,
}

/// Which provider a comparison recommends and why
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRecommendation {
    pub optimal_provider: ProviderKind,
    pub reason: String,
    pub estimated_monthly_savings: f64,
    pub estimated_annual_savings: f64,
}

/// Full head-to-head cost comparison for one phase and region
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedCostComparison {
    pub scaling_phase: ScalingPhase,
    pub region: String,
    pub providers: ProviderCosts,
    pub total_savings: f64,
    pub total_savings_percentage: f64,
    pub breakdown_comparison: Vec<CostBreakdownComparison>,
    pub recommendation: CostRecommendation,
}

/// Projection horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Monthly,
    Quarterly,
    Annually,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Monthly, Timeframe::Quarterly, Timeframe::Annually];

    /// Number of billed months in the horizon.
    pub fn months(&self) -> u32 {
        match self {
            Timeframe::Monthly => 1,
            Timeframe::Quarterly => 3,
            Timeframe::Annually => 12,
        }
    }

    /// Usage growth assumed over the horizon.
    pub fn growth_factor(&self) -> f64 {
        match self {
            Timeframe::Monthly => 1.0,
            Timeframe::Quarterly => 1.05,
            Timeframe::Annually => 1.2,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Timeframe::Monthly => "monthly",
            Timeframe::Quarterly => "quarterly",
            Timeframe::Annually => "annually",
        };
        write!(f, "{}", name)
    }
}

/// Projected spend for one provider over one timeframe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostProjection {
    pub scaling_phase: ScalingPhase,
    pub timeframe: Timeframe,
    pub provider: ProviderKind,
    pub base_cost: f64,
    pub projected_cost: f64,
    pub growth_factor: f64,
    pub assumptions: Vec<String>,
}

/// One actionable cost-saving suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOptimizationSuggestion {
    pub category: ServiceCategory,
    pub suggestion: String,
    pub potential_savings: f64,
    pub effort: Level,
    pub impact: Level,
    pub provider: ProviderKind,
}

/// Verdict of a switching-ROI analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchRecommendation {
    Switch,
    Stay,
    Evaluate,
}

/// Return-on-investment analysis for switching providers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiAnalysis {
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub migration_cost: f64,
    /// Months until the migration cost is recovered; `None` when there are
    /// no savings to recover it with
    pub payback_period_months: Option<f64>,
    pub three_year_roi: f64,
    pub recommendation: SwitchRecommendation,
    pub reasoning: String,
}

/// Total cost of ownership for one provider over the analysis horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoResult {
    pub infrastructure_costs: f64,
    pub operational_costs: f64,
    pub migration_costs: f64,
    pub total_tco: f64,
}

/// One year of the TCO breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoYear {
    pub year: u32,
    pub aws: f64,
    pub linode: f64,
    pub cumulative_savings: f64,
}

/// Head-to-head TCO comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoComparison {
    pub aws: TcoResult,
    pub linode: TcoResult,
    pub savings: f64,
    pub savings_percentage: f64,
    pub breakdown_by_year: Vec<TcoYear>,
}

/// One phase's row in a cross-phase comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSavingsRow {
    pub phase: ScalingPhase,
    pub aws: f64,
    pub linode: f64,
    pub savings: f64,
    pub savings_percentage: f64,
}

/// Savings aggregated over all phases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalSavings {
    pub monthly: f64,
    pub annual: f64,
}

/// Cross-phase comparison summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseComparisonSummary {
    pub phases: Vec<PhaseSavingsRow>,
    pub total_savings: TotalSavings,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_factors() {
        assert_eq!(Timeframe::Monthly.months(), 1);
        assert_eq!(Timeframe::Quarterly.months(), 3);
        assert_eq!(Timeframe::Annually.months(), 12);
        assert!((Timeframe::Annually.growth_factor() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_switch_recommendation_serializes_lowercase() {
        let json = serde_json::to_string(&SwitchRecommendation::Evaluate).unwrap();
        assert_eq!(json, "\"evaluate\"");
    }
}
