//! Cost comparison report
//!
//! Assembles the full decision package for one phase and region: detailed
//! cost comparison, scored provider comparison, merged optimization
//! suggestions, optional projections and an optional migration analysis.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::phases::ScalingPhase;
use crate::core::comparison::{ComparisonEngine, ProviderComparison, SelectionCriteria};
use crate::core::cost::calculator::{estimate_migration_cost, CostCalculator};
use crate::core::cost::types::{
    CostOptimizationSuggestion, CostProjection, DetailedCostComparison, SwitchRecommendation,
};
use crate::core::providers::{ProviderKind, ProviderRegistry};
use crate::core::types::{CostOptions, Level};
use crate::utils::error::Result;

/// Maximum optimization suggestions carried in a report
const MAX_SUGGESTIONS: usize = 10;

/// Savings percentage and provider score needed for high confidence
const HIGH_SAVINGS_PCT: f64 = 20.0;
const HIGH_SCORE: f64 = 8.0;

/// Savings percentage and provider score needed for medium confidence
const MEDIUM_SAVINGS_PCT: f64 = 10.0;
const MEDIUM_SCORE: f64 = 6.0;

/// How confident the report is in its recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Verdict of the optional migration analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationRecommendation {
    Migrate,
    Stay,
    Evaluate,
}

impl From<SwitchRecommendation> for MigrationRecommendation {
    fn from(value: SwitchRecommendation) -> Self {
        match value {
            SwitchRecommendation::Switch => MigrationRecommendation::Migrate,
            SwitchRecommendation::Stay => MigrationRecommendation::Stay,
            SwitchRecommendation::Evaluate => MigrationRecommendation::Evaluate,
        }
    }
}

/// Parameters for one report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAnalysisRequest {
    pub scaling_phase: ScalingPhase,
    pub region: String,
    pub options: CostOptions,
    pub current_provider: Option<ProviderKind>,
    pub include_projections: bool,
    pub include_migration_analysis: bool,
}

impl CostAnalysisRequest {
    /// Request with phase-appropriate options and no optional sections.
    pub fn new(scaling_phase: ScalingPhase, region: impl Into<String>) -> Self {
        Self {
            scaling_phase,
            region: region.into(),
            options: CostOptions::for_phase(scaling_phase),
            current_provider: None,
            include_projections: false,
            include_migration_analysis: false,
        }
    }
}

/// Headline recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub recommended_provider: ProviderKind,
    pub potential_monthly_savings: f64,
    pub potential_annual_savings: f64,
    pub confidence_level: ConfidenceLevel,
}

/// Projections for both billed providers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportProjections {
    pub aws: Vec<CostProjection>,
    pub linode: Vec<CostProjection>,
}

/// Condensed migration analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationAnalysis {
    pub estimated_migration_cost: f64,
    pub payback_period_months: Option<f64>,
    pub roi: f64,
    pub recommendation: MigrationRecommendation,
}

/// The full decision package
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComparisonReport {
    pub summary: ReportSummary,
    pub detailed_comparison: DetailedCostComparison,
    pub provider_comparison: Vec<ProviderComparison>,
    pub optimization_suggestions: Vec<CostOptimizationSuggestion>,
    pub projections: ReportProjections,
    pub migration_analysis: Option<MigrationAnalysis>,
}

/// Builds reports from the calculator and comparison engine
pub struct ReportBuilder {
    calculator: CostCalculator,
    comparison: ComparisonEngine,
}

impl ReportBuilder {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            calculator: CostCalculator::new(Arc::clone(&registry)),
            comparison: ComparisonEngine::new(registry),
        }
    }

    pub async fn build_report(&self, request: &CostAnalysisRequest) -> Result<CostComparisonReport> {
        info!(phase = %request.scaling_phase, region = %request.region, "Generating cost comparison report");

        let detailed_comparison = self
            .calculator
            .compare_costs(request.scaling_phase, &request.region, &request.options)
            .await?;

        let criteria = SelectionCriteria {
            cost_optimization: true,
            performance_requirements: performance_for_phase(request.scaling_phase),
            region_preferences: vec![request.region.clone()],
            compliance_requirements: Vec::new(),
            preferred_provider: None,
        };
        let provider_comparison = self
            .comparison
            .compare(request.scaling_phase, &request.region, &criteria)
            .await;

        let mut optimization_suggestions = self.calculator.generate_optimization_suggestions(
            request.scaling_phase,
            ProviderKind::Aws,
            &detailed_comparison.providers.aws,
        );
        optimization_suggestions.extend(self.calculator.generate_optimization_suggestions(
            request.scaling_phase,
            ProviderKind::Linode,
            &detailed_comparison.providers.linode,
        ));
        optimization_suggestions.sort_by(|a, b| {
            b.potential_savings
                .partial_cmp(&a.potential_savings)
                .unwrap_or(Ordering::Equal)
        });
        optimization_suggestions.truncate(MAX_SUGGESTIONS);

        let projections = if request.include_projections {
            let (aws, linode) = tokio::join!(
                self.calculator.project_costs(
                    request.scaling_phase,
                    ProviderKind::Aws,
                    &request.region,
                    &request.options,
                ),
                self.calculator.project_costs(
                    request.scaling_phase,
                    ProviderKind::Linode,
                    &request.region,
                    &request.options,
                ),
            );
            ReportProjections {
                aws: aws?,
                linode: linode?,
            }
        } else {
            ReportProjections::default()
        };

        let migration_analysis = match (request.include_migration_analysis, request.current_provider)
        {
            (true, Some(current)) => {
                Some(self.migration_analysis(request, current).await?)
            }
            _ => None,
        };

        let summary = build_summary(&detailed_comparison, &provider_comparison);

        Ok(CostComparisonReport {
            summary,
            detailed_comparison,
            provider_comparison,
            optimization_suggestions,
            projections,
            migration_analysis,
        })
    }

    async fn migration_analysis(
        &self,
        request: &CostAnalysisRequest,
        current: ProviderKind,
    ) -> Result<MigrationAnalysis> {
        let target = match current {
            ProviderKind::Aws => ProviderKind::Linode,
            ProviderKind::Linode => ProviderKind::Aws,
        };
        let migration_cost = estimate_migration_cost(request.scaling_phase, current, target);
        let roi = self
            .calculator
            .calculate_switching_roi(
                current,
                target,
                request.scaling_phase,
                &request.region,
                &request.options,
                migration_cost,
            )
            .await?;

        Ok(MigrationAnalysis {
            estimated_migration_cost: migration_cost,
            payback_period_months: roi.payback_period_months,
            roi: roi.three_year_roi,
            recommendation: roi.recommendation.into(),
        })
    }
}

fn performance_for_phase(phase: ScalingPhase) -> Level {
    match phase {
        ScalingPhase::Launch => Level::Low,
        ScalingPhase::Growth => Level::Medium,
        ScalingPhase::Scale => Level::High,
    }
}

fn build_summary(
    detailed: &DetailedCostComparison,
    comparisons: &[ProviderComparison],
) -> ReportSummary {
    let recommended = detailed.recommendation.optimal_provider;
    let savings_percentage = detailed.total_savings_percentage.abs();
    let provider_score = comparisons
        .iter()
        .find(|c| c.provider == recommended.as_str())
        .map_or(0.0, |c| c.score);

    let confidence_level = if savings_percentage > HIGH_SAVINGS_PCT && provider_score > HIGH_SCORE {
        ConfidenceLevel::High
    } else if savings_percentage > MEDIUM_SAVINGS_PCT && provider_score > MEDIUM_SCORE {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    ReportSummary {
        recommended_provider: recommended,
        potential_monthly_savings: detailed.recommendation.estimated_monthly_savings,
        potential_annual_savings: detailed.recommendation.estimated_annual_savings,
        confidence_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cost::calculator::comparison_from_estimates;
    use crate::core::types::{CostBreakdown, CostEstimate};

    fn builder() -> ReportBuilder {
        ReportBuilder::new(Arc::new(ProviderRegistry::with_builtin()))
    }

    fn estimate(total: f64) -> CostEstimate {
        CostEstimate::from_breakdown(
            CostBreakdown {
                compute: total,
                ..Default::default()
            },
            0.9,
            vec![],
            vec![],
        )
    }

    fn comparison_with(provider: &str, score: f64) -> ProviderComparison {
        ProviderComparison {
            provider: provider.to_string(),
            cost_estimate: estimate(100.0),
            recommendations: Vec::new(),
            regions: Vec::new(),
            score,
            pros: Vec::new(),
            cons: Vec::new(),
        }
    }

    #[test]
    fn test_summary_confidence_cutoffs() {
        // 30/130: 23.08% savings, above the high cutoff
        let detailed = comparison_from_estimates(
            ScalingPhase::Launch,
            "us-east-1",
            estimate(130.0),
            estimate(100.0),
        );

        let high = build_summary(&detailed, &[comparison_with("linode", 8.5)]);
        assert_eq!(high.confidence_level, ConfidenceLevel::High);
        assert_eq!(high.recommended_provider, ProviderKind::Linode);
        assert!((high.potential_monthly_savings - 30.0).abs() < 1e-9);

        // Same savings but a mediocre score drops to medium
        let medium = build_summary(&detailed, &[comparison_with("linode", 7.0)]);
        assert_eq!(medium.confidence_level, ConfidenceLevel::Medium);

        // Low score drops all the way down
        let low = build_summary(&detailed, &[comparison_with("linode", 5.0)]);
        assert_eq!(low.confidence_level, ConfidenceLevel::Low);

        // Missing comparison row scores 0
        let missing = build_summary(&detailed, &[]);
        assert_eq!(missing.confidence_level, ConfidenceLevel::Low);
    }

    #[tokio::test]
    async fn test_basic_report_skips_optional_sections() {
        let report = builder()
            .build_report(&CostAnalysisRequest::new(ScalingPhase::Launch, "us-east-1"))
            .await
            .unwrap();
        assert!(report.projections.aws.is_empty());
        assert!(report.projections.linode.is_empty());
        assert!(report.migration_analysis.is_none());
        assert_eq!(report.provider_comparison.len(), 2);
        assert!(report.optimization_suggestions.len() <= MAX_SUGGESTIONS);
    }

    #[tokio::test]
    async fn test_full_report_includes_projections_and_migration() {
        let mut request = CostAnalysisRequest::new(ScalingPhase::Growth, "us-east-1");
        request.include_projections = true;
        request.include_migration_analysis = true;
        request.current_provider = Some(ProviderKind::Aws);

        let report = builder().build_report(&request).await.unwrap();
        assert_eq!(report.projections.aws.len(), 3);
        assert_eq!(report.projections.linode.len(), 3);

        let migration = report.migration_analysis.unwrap();
        assert!((migration.estimated_migration_cost - 4_000.0).abs() < 1e-9);
        assert!(migration.payback_period_months.is_some());
    }

    #[tokio::test]
    async fn test_migration_analysis_requires_current_provider() {
        let mut request = CostAnalysisRequest::new(ScalingPhase::Growth, "us-east-1");
        request.include_migration_analysis = true;
        let report = builder().build_report(&request).await.unwrap();
        assert!(report.migration_analysis.is_none());
    }

    #[tokio::test]
    async fn test_suggestions_merged_and_sorted() {
        let report = builder()
            .build_report(&CostAnalysisRequest::new(ScalingPhase::Scale, "us-east-1"))
            .await
            .unwrap();
        assert!(report
            .optimization_suggestions
            .windows(2)
            .all(|w| w[0].potential_savings >= w[1].potential_savings));
        // Both providers contribute suggestions at scale
        assert!(report
            .optimization_suggestions
            .iter()
            .any(|s| s.provider == ProviderKind::Aws));
        assert!(report
            .optimization_suggestions
            .iter()
            .any(|s| s.provider == ProviderKind::Linode));
    }
}
