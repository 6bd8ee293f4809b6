//! Cost calculator
//!
//! Head-to-head financial analysis of the two billed providers: monthly
//! comparisons, horizon projections, switching ROI, TCO and optimization
//! suggestions. All figures are derived from adapter estimates; the
//! calculator itself owns only the financial constants.

use std::cmp::Ordering;
use std::sync::Arc;

use tokio::join;
use tracing::info;

use crate::config::phases::ScalingPhase;
use crate::core::cost::types::{
    CostBreakdownComparison, CostOptimizationSuggestion, CostProjection, CostRecommendation,
    DetailedCostComparison, PhaseComparisonSummary, PhaseSavingsRow, ProviderCosts, RoiAnalysis,
    SwitchRecommendation, TcoComparison, TcoResult, TcoYear, Timeframe, TotalSavings,
};
use crate::core::providers::{ProviderKind, ProviderRegistry};
use crate::core::types::{CostEstimate, CostOptions, Level, ServiceCategory};
use crate::utils::error::{EngineError, Result};

/// Yearly operational overhead as a fraction of infrastructure cost
const OPERATIONAL_COST_FRACTION: f64 = 0.2;

/// Payback period (months) below which switching is clearly worth it
const PAYBACK_SWITCH_MONTHS: f64 = 6.0;

/// Payback period (months) below which switching deserves evaluation
const PAYBACK_EVALUATE_MONTHS: f64 = 12.0;

/// One-time migration cost per phase, before the direction multiplier.
fn migration_base_cost(phase: ScalingPhase) -> f64 {
    match phase {
        ScalingPhase::Launch => 2_000.0,
        ScalingPhase::Growth => 5_000.0,
        ScalingPhase::Scale => 10_000.0,
    }
}

/// One-time cost of migrating between providers.
///
/// Moving to Linode is cheaper than moving to AWS because the target setup
/// is simpler.
pub fn estimate_migration_cost(phase: ScalingPhase, from: ProviderKind, to: ProviderKind) -> f64 {
    let multiplier = match (from, to) {
        (ProviderKind::Aws, ProviderKind::Linode) => 0.8,
        (ProviderKind::Linode, ProviderKind::Aws) => 1.2,
        _ => 1.0,
    };
    migration_base_cost(phase) * multiplier
}

/// Build an ROI analysis from already-known savings figures.
pub fn roi_analysis(to: ProviderKind, monthly_savings: f64, migration_cost: f64) -> RoiAnalysis {
    let annual_savings = monthly_savings * 12.0;
    let three_year_roi = ((annual_savings * 3.0 - migration_cost) / migration_cost) * 100.0;

    let (payback_period_months, recommendation, reasoning) = if monthly_savings <= 0.0 {
        (
            None,
            SwitchRecommendation::Stay,
            format!(
                "No cost savings expected. {to} would cost ${:.2} more per month.",
                monthly_savings.abs()
            ),
        )
    } else {
        let payback = migration_cost / monthly_savings;
        if payback <= PAYBACK_SWITCH_MONTHS {
            (
                Some(payback),
                SwitchRecommendation::Switch,
                format!(
                    "Excellent ROI with payback period of {payback:.1} months and 3-year ROI of {three_year_roi:.1}%."
                ),
            )
        } else if payback <= PAYBACK_EVALUATE_MONTHS {
            (
                Some(payback),
                SwitchRecommendation::Evaluate,
                format!(
                    "Moderate ROI with payback period of {payback:.1} months. Consider other factors like performance and features."
                ),
            )
        } else {
            (
                Some(payback),
                SwitchRecommendation::Stay,
                format!(
                    "Long payback period of {payback:.1} months may not justify migration costs."
                ),
            )
        }
    };

    RoiAnalysis {
        monthly_savings,
        annual_savings,
        migration_cost,
        payback_period_months,
        three_year_roi,
        recommendation,
        reasoning,
    }
}

/// Calculator over a provider registry
pub struct CostCalculator {
    registry: Arc<ProviderRegistry>,
}

impl CostCalculator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Compare monthly costs between AWS and Linode for a phase and region.
    pub async fn compare_costs(
        &self,
        phase: ScalingPhase,
        region: &str,
        options: &CostOptions,
    ) -> Result<DetailedCostComparison> {
        info!(%phase, region, "Comparing provider costs");

        let aws = self.registry.get(ProviderKind::Aws.as_str())?;
        let linode = self.registry.get(ProviderKind::Linode.as_str())?;

        let (aws_cost, linode_cost) = join!(
            aws.estimate_cost(phase, region, options),
            linode.estimate_cost(phase, region, options),
        );
        let (aws_cost, linode_cost) = (aws_cost?, linode_cost?);

        Ok(comparison_from_estimates(
            phase, region, aws_cost, linode_cost,
        ))
    }

    /// Project one provider's costs over the standard timeframes.
    pub async fn project_costs(
        &self,
        phase: ScalingPhase,
        provider: ProviderKind,
        region: &str,
        options: &CostOptions,
    ) -> Result<Vec<CostProjection>> {
        info!(%phase, %provider, region, "Calculating cost projections");

        let adapter = self.registry.get(provider.as_str())?;
        let estimate = adapter.estimate_cost(phase, region, options).await?;
        let base_cost = estimate.total_monthly_cost;

        Ok(Timeframe::ALL
            .iter()
            .map(|&timeframe| {
                let growth_factor = timeframe.growth_factor();
                let projected_cost =
                    base_cost * growth_factor * f64::from(timeframe.months());
                CostProjection {
                    scaling_phase: phase,
                    timeframe,
                    provider,
                    base_cost,
                    projected_cost,
                    growth_factor,
                    assumptions: projection_assumptions(phase, timeframe),
                }
            })
            .collect())
    }

    /// Generate per-category optimization suggestions for an estimate, most
    /// valuable first.
    pub fn generate_optimization_suggestions(
        &self,
        phase: ScalingPhase,
        provider: ProviderKind,
        estimate: &CostEstimate,
    ) -> Vec<CostOptimizationSuggestion> {
        let breakdown = &estimate.breakdown;
        let mut suggestions = Vec::new();

        let mut push = |category, suggestion: &str, savings: f64, effort, impact| {
            suggestions.push(CostOptimizationSuggestion {
                category,
                suggestion: suggestion.to_string(),
                potential_savings: savings,
                effort,
                impact,
                provider,
            });
        };

        match provider {
            ProviderKind::Aws => {
                push(
                    ServiceCategory::Compute,
                    "Use Reserved Instances for predictable workloads",
                    breakdown.compute * 0.3,
                    Level::Low,
                    Level::High,
                );
                if phase != ScalingPhase::Launch {
                    push(
                        ServiceCategory::Compute,
                        "Implement Auto Scaling to optimize instance usage",
                        breakdown.compute * 0.15,
                        Level::Medium,
                        Level::Medium,
                    );
                }
            }
            ProviderKind::Linode => {
                push(
                    ServiceCategory::Compute,
                    "Consider dedicated CPU instances for consistent performance",
                    breakdown.compute * 0.1,
                    Level::Low,
                    Level::Medium,
                );
            }
        }

        if breakdown.database > 50.0 {
            push(
                ServiceCategory::Database,
                "Implement read replicas to distribute load",
                breakdown.database * 0.2,
                Level::Medium,
                Level::High,
            );
        }
        if provider == ProviderKind::Aws && phase != ScalingPhase::Launch {
            push(
                ServiceCategory::Database,
                "Use RDS Reserved Instances for long-term savings",
                breakdown.database * 0.25,
                Level::Low,
                Level::High,
            );
        }

        if provider == ProviderKind::Linode {
            push(
                ServiceCategory::Cache,
                "Use self-managed Redis for significant cost savings",
                breakdown.cache * 0.5,
                Level::High,
                Level::High,
            );
        }

        push(
            ServiceCategory::Storage,
            "Implement lifecycle policies for automated archiving",
            breakdown.storage * 0.3,
            Level::Low,
            Level::Medium,
        );

        if provider == ProviderKind::Linode {
            push(
                ServiceCategory::Networking,
                "Leverage Linode's generous data transfer allowances",
                breakdown.networking * 0.6,
                Level::Low,
                Level::High,
            );
            push(
                ServiceCategory::Monitoring,
                "Use Longview free tier for basic monitoring",
                breakdown.monitoring * 0.8,
                Level::Low,
                Level::Medium,
            );
        }

        suggestions.sort_by(|a, b| {
            b.potential_savings
                .partial_cmp(&a.potential_savings)
                .unwrap_or(Ordering::Equal)
        });
        suggestions
    }

    /// ROI of switching providers given a one-time migration cost.
    pub async fn calculate_switching_roi(
        &self,
        from: ProviderKind,
        to: ProviderKind,
        phase: ScalingPhase,
        region: &str,
        options: &CostOptions,
        migration_cost: f64,
    ) -> Result<RoiAnalysis> {
        if from == to {
            return Err(EngineError::InvalidRequest(
                "Source and target provider must differ".to_string(),
            ));
        }
        if migration_cost <= 0.0 {
            return Err(EngineError::InvalidRequest(
                "Migration cost must be positive".to_string(),
            ));
        }
        info!(%from, %to, %phase, "Calculating switching ROI");

        let from_adapter = self.registry.get(from.as_str())?;
        let to_adapter = self.registry.get(to.as_str())?;
        let (from_cost, to_cost) = join!(
            from_adapter.estimate_cost(phase, region, options),
            to_adapter.estimate_cost(phase, region, options),
        );
        let (from_cost, to_cost) = (from_cost?, to_cost?);

        let monthly_savings = from_cost.total_monthly_cost - to_cost.total_monthly_cost;
        Ok(roi_analysis(to, monthly_savings, migration_cost))
    }

    /// Total cost of ownership comparison over a multi-year horizon.
    pub async fn calculate_tco(
        &self,
        phase: ScalingPhase,
        region: &str,
        options: &CostOptions,
        time_horizon_years: u32,
    ) -> Result<TcoComparison> {
        if time_horizon_years == 0 {
            return Err(EngineError::InvalidRequest(
                "TCO horizon must be at least one year".to_string(),
            ));
        }
        info!(%phase, region, years = time_horizon_years, "Calculating TCO");

        let comparison = self.compare_costs(phase, region, options).await?;
        let years = f64::from(time_horizon_years);

        let aws_annual = comparison.providers.aws.total_monthly_cost * 12.0;
        let linode_annual = comparison.providers.linode.total_monthly_cost * 12.0;

        let aws_operational = aws_annual * OPERATIONAL_COST_FRACTION * years;
        let linode_operational = linode_annual * OPERATIONAL_COST_FRACTION * years;

        // Migration cost of arriving at each provider from the other one
        let aws_migration =
            estimate_migration_cost(phase, ProviderKind::Linode, ProviderKind::Aws);
        let linode_migration =
            estimate_migration_cost(phase, ProviderKind::Aws, ProviderKind::Linode);

        let aws = TcoResult {
            infrastructure_costs: aws_annual * years,
            operational_costs: aws_operational,
            migration_costs: aws_migration,
            total_tco: aws_annual * years + aws_operational + aws_migration,
        };
        let linode = TcoResult {
            infrastructure_costs: linode_annual * years,
            operational_costs: linode_operational,
            migration_costs: linode_migration,
            total_tco: linode_annual * years + linode_operational + linode_migration,
        };

        let savings = aws.total_tco - linode.total_tco;
        let savings_percentage = (savings / aws.total_tco) * 100.0;

        let mut breakdown_by_year = Vec::with_capacity(time_horizon_years as usize);
        let mut cumulative_savings = 0.0;
        for year in 1..=time_horizon_years {
            let migration = |cost: f64| if year == 1 { cost } else { 0.0 };
            let yearly_aws = aws_annual + aws_operational / years + migration(aws_migration);
            let yearly_linode =
                linode_annual + linode_operational / years + migration(linode_migration);
            cumulative_savings += yearly_aws - yearly_linode;
            breakdown_by_year.push(TcoYear {
                year,
                aws: yearly_aws,
                linode: yearly_linode,
                cumulative_savings,
            });
        }

        Ok(TcoComparison {
            aws,
            linode,
            savings,
            savings_percentage,
            breakdown_by_year,
        })
    }

    /// Compare provider costs across all scaling phases.
    pub async fn compare_across_phases(
        &self,
        region: &str,
        options: &CostOptions,
    ) -> Result<PhaseComparisonSummary> {
        info!(region, "Comparing costs across all scaling phases");

        let mut phases = Vec::with_capacity(ScalingPhase::ALL.len());
        let mut total_monthly_savings = 0.0;

        for phase in ScalingPhase::ALL {
            let comparison = self.compare_costs(phase, region, options).await?;
            total_monthly_savings += comparison.total_savings;
            phases.push(PhaseSavingsRow {
                phase,
                aws: comparison.providers.aws.total_monthly_cost,
                linode: comparison.providers.linode.total_monthly_cost,
                savings: comparison.total_savings,
                savings_percentage: comparison.total_savings_percentage,
            });
        }

        let recommendations = phase_recommendations(&phases);

        Ok(PhaseComparisonSummary {
            phases,
            total_savings: TotalSavings {
                monthly: total_monthly_savings,
                annual: total_monthly_savings * 12.0,
            },
            recommendations,
        })
    }
}

/// Assemble a comparison from two already-computed estimates.
pub fn comparison_from_estimates(
    phase: ScalingPhase,
    region: &str,
    aws_cost: CostEstimate,
    linode_cost: CostEstimate,
) -> DetailedCostComparison {
    let total_savings = aws_cost.total_monthly_cost - linode_cost.total_monthly_cost;
    let total_savings_percentage = if aws_cost.total_monthly_cost > 0.0 {
        (total_savings / aws_cost.total_monthly_cost) * 100.0
    } else {
        0.0
    };

    let breakdown_comparison = ServiceCategory::ALL
        .iter()
        .map(|&service| {
            let aws = aws_cost.breakdown.category(service);
            let linode = linode_cost.breakdown.category(service);
            let savings = aws - linode;
            CostBreakdownComparison {
                service,
                aws,
                linode,
                savings,
                savings_percentage: if aws > 0.0 { (savings / aws) * 100.0 } else { 0.0 },
            }
        })
        .collect();

    let estimated_monthly_savings = total_savings.abs();
    let recommendation = if total_savings > 0.0 {
        CostRecommendation {
            optimal_provider: ProviderKind::Linode,
            reason: format!(
                "Linode offers {total_savings_percentage:.1}% cost savings (${estimated_monthly_savings:.2}/month) while providing comparable performance and features."
            ),
            estimated_monthly_savings,
            estimated_annual_savings: estimated_monthly_savings * 12.0,
        }
    } else {
        CostRecommendation {
            optimal_provider: ProviderKind::Aws,
            reason: "AWS provides better value despite higher costs, offering superior performance, more services, and better enterprise support.".to_string(),
            estimated_monthly_savings,
            estimated_annual_savings: estimated_monthly_savings * 12.0,
        }
    };

    DetailedCostComparison {
        scaling_phase: phase,
        region: region.to_string(),
        providers: ProviderCosts {
            aws: aws_cost,
            linode: linode_cost,
        },
        total_savings,
        total_savings_percentage,
        breakdown_comparison,
        recommendation,
    }
}

fn projection_assumptions(phase: ScalingPhase, timeframe: Timeframe) -> Vec<String> {
    let mut assumptions = vec![
        "Assumes consistent usage patterns".to_string(),
        "Does not include potential discounts or reserved instance savings".to_string(),
        "Based on current pricing (subject to change)".to_string(),
    ];

    match phase {
        ScalingPhase::Launch => {
            assumptions.push("Moderate user growth expected".to_string());
            assumptions.push("Basic feature set".to_string());
        }
        ScalingPhase::Growth => {
            assumptions.push("Steady user base expansion".to_string());
            assumptions.push("Additional features and services".to_string());
        }
        ScalingPhase::Scale => {
            assumptions.push("High traffic volumes".to_string());
            assumptions.push("Premium performance requirements".to_string());
        }
    }

    match timeframe {
        Timeframe::Monthly => {
            assumptions.push("Short-term projection with minimal growth".to_string());
        }
        Timeframe::Quarterly => {
            assumptions.push("Seasonal variations considered".to_string());
            assumptions.push("5% quarterly growth assumed".to_string());
        }
        Timeframe::Annually => {
            assumptions.push("Long-term growth trends".to_string());
            assumptions.push("20% annual growth assumed".to_string());
            assumptions.push("Potential for scaling phase transitions".to_string());
        }
    }

    assumptions
}

fn phase_recommendations(rows: &[PhaseSavingsRow]) -> Vec<String> {
    let mut recommendations = Vec::new();
    if rows.is_empty() {
        return recommendations;
    }

    let avg_savings_percentage =
        rows.iter().map(|r| r.savings_percentage).sum::<f64>() / rows.len() as f64;

    if avg_savings_percentage > 20.0 {
        recommendations
            .push("Linode offers consistent cost advantages across all scaling phases".to_string());
        recommendations
            .push("Consider migrating to Linode for significant long-term savings".to_string());
    } else if avg_savings_percentage > 10.0 {
        recommendations.push("Moderate cost savings available with Linode".to_string());
        recommendations.push(
            "Evaluate migration based on other factors like performance and features".to_string(),
        );
    } else {
        recommendations.push("Cost differences are minimal between providers".to_string());
        recommendations
            .push("Focus on performance, features, and operational considerations".to_string());
    }

    if let Some(launch) = rows.iter().find(|r| r.phase == ScalingPhase::Launch) {
        if launch.savings_percentage > 25.0 {
            recommendations.push(
                "Launch phase shows excellent cost optimization potential with Linode".to_string(),
            );
        }
    }
    if let Some(scale) = rows.iter().find(|r| r.phase == ScalingPhase::Scale) {
        if scale.savings > 500.0 {
            recommendations
                .push("Scale phase offers substantial absolute savings opportunities".to_string());
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CostBreakdown;

    fn estimate_with_total(compute: f64, database: f64) -> CostEstimate {
        CostEstimate::from_breakdown(
            CostBreakdown {
                compute,
                database,
                ..Default::default()
            },
            0.9,
            vec![],
            vec![],
        )
    }

    fn calculator() -> CostCalculator {
        CostCalculator::new(Arc::new(ProviderRegistry::with_builtin()))
    }

    #[test]
    fn test_comparison_of_130_vs_100() {
        let comparison = comparison_from_estimates(
            ScalingPhase::Launch,
            "us-east-1",
            estimate_with_total(100.0, 30.0),
            estimate_with_total(80.0, 20.0),
        );
        assert!((comparison.total_savings - 30.0).abs() < 1e-9);
        assert!((comparison.total_savings_percentage - 30.0 / 130.0 * 100.0).abs() < 1e-6);
        assert_eq!(
            comparison.recommendation.optimal_provider,
            ProviderKind::Linode
        );
        assert!((comparison.recommendation.estimated_annual_savings - 360.0).abs() < 1e-6);
    }

    #[test]
    fn test_comparison_prefers_aws_when_cheaper() {
        let comparison = comparison_from_estimates(
            ScalingPhase::Growth,
            "us-east-1",
            estimate_with_total(90.0, 10.0),
            estimate_with_total(100.0, 20.0),
        );
        assert!(comparison.total_savings < 0.0);
        assert_eq!(comparison.recommendation.optimal_provider, ProviderKind::Aws);
    }

    #[test]
    fn test_breakdown_comparison_covers_all_categories() {
        let comparison = comparison_from_estimates(
            ScalingPhase::Launch,
            "us-east-1",
            estimate_with_total(100.0, 30.0),
            estimate_with_total(80.0, 20.0),
        );
        assert_eq!(comparison.breakdown_comparison.len(), 7);
        let zero_row = comparison
            .breakdown_comparison
            .iter()
            .find(|r| r.service == ServiceCategory::Cache)
            .unwrap();
        assert!(zero_row.savings_percentage.abs() < 1e-9);
    }

    #[test]
    fn test_roi_payback_scenario() {
        let roi = roi_analysis(ProviderKind::Linode, 1_000.0, 5_000.0);
        assert_eq!(roi.payback_period_months, Some(5.0));
        assert_eq!(roi.recommendation, SwitchRecommendation::Switch);
        assert!((roi.three_year_roi - 620.0).abs() < 1e-9);
        assert!((roi.annual_savings - 12_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_roi_negative_savings_means_stay() {
        let roi = roi_analysis(ProviderKind::Aws, -50.0, 2_000.0);
        assert!(roi.payback_period_months.is_none());
        assert_eq!(roi.recommendation, SwitchRecommendation::Stay);
        assert!(roi.reasoning.contains("$50.00 more per month"));
    }

    #[test]
    fn test_roi_monotonic_in_savings() {
        let low = roi_analysis(ProviderKind::Linode, 100.0, 5_000.0);
        let high = roi_analysis(ProviderKind::Linode, 500.0, 5_000.0);
        assert!(high.three_year_roi > low.three_year_roi);
        assert!(high.payback_period_months.unwrap() < low.payback_period_months.unwrap());
    }

    #[test]
    fn test_roi_long_payback_means_stay() {
        // $100/month against a $5,000 migration: 50-month payback
        let roi = roi_analysis(ProviderKind::Linode, 100.0, 5_000.0);
        assert_eq!(roi.recommendation, SwitchRecommendation::Stay);
    }

    #[test]
    fn test_migration_cost_direction_multipliers() {
        let to_linode =
            estimate_migration_cost(ScalingPhase::Growth, ProviderKind::Aws, ProviderKind::Linode);
        let to_aws =
            estimate_migration_cost(ScalingPhase::Growth, ProviderKind::Linode, ProviderKind::Aws);
        assert!((to_linode - 4_000.0).abs() < 1e-9);
        assert!((to_aws - 6_000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_compare_costs_is_deterministic() {
        let calc = calculator();
        let options = CostOptions::for_phase(ScalingPhase::Growth);
        let a = calc
            .compare_costs(ScalingPhase::Growth, "us-east-1", &options)
            .await
            .unwrap();
        let b = calc
            .compare_costs(ScalingPhase::Growth, "us-east-1", &options)
            .await
            .unwrap();
        assert!((a.total_savings - b.total_savings).abs() < 1e-9);
        assert_eq!(
            a.recommendation.optimal_provider,
            b.recommendation.optimal_provider
        );
    }

    #[tokio::test]
    async fn test_projections_scale_with_timeframe() {
        let calc = calculator();
        let options = CostOptions::for_phase(ScalingPhase::Launch);
        let projections = calc
            .project_costs(ScalingPhase::Launch, ProviderKind::Aws, "us-east-1", &options)
            .await
            .unwrap();
        assert_eq!(projections.len(), 3);

        let base = projections[0].base_cost;
        assert!((projections[0].projected_cost - base).abs() < 1e-6);
        assert!((projections[1].projected_cost - base * 1.05 * 3.0).abs() < 1e-6);
        assert!((projections[2].projected_cost - base * 1.2 * 12.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_tco_migration_cost_only_in_first_year() {
        let calc = calculator();
        let options = CostOptions::for_phase(ScalingPhase::Growth);
        let tco = calc
            .calculate_tco(ScalingPhase::Growth, "us-east-1", &options, 3)
            .await
            .unwrap();

        assert_eq!(tco.breakdown_by_year.len(), 3);
        let year1 = &tco.breakdown_by_year[0];
        let year2 = &tco.breakdown_by_year[1];
        let year3 = &tco.breakdown_by_year[2];
        assert!((year1.aws - year2.aws - tco.aws.migration_costs).abs() < 1e-6);
        assert!((year2.aws - year3.aws).abs() < 1e-9);

        // Yearly rows must sum to the TCO totals
        let aws_sum: f64 = tco.breakdown_by_year.iter().map(|y| y.aws).sum();
        let linode_sum: f64 = tco.breakdown_by_year.iter().map(|y| y.linode).sum();
        assert!((aws_sum - tco.aws.total_tco).abs() < 1e-6);
        assert!((linode_sum - tco.linode.total_tco).abs() < 1e-6);
        assert!(
            (tco.breakdown_by_year.last().unwrap().cumulative_savings - tco.savings).abs() < 1e-6
        );
    }

    #[tokio::test]
    async fn test_tco_rejects_zero_horizon() {
        let calc = calculator();
        let options = CostOptions::default();
        let err = calc
            .calculate_tco(ScalingPhase::Launch, "us-east-1", &options, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_cross_phase_summary_totals() {
        let calc = calculator();
        let options = CostOptions::default();
        let summary = calc
            .compare_across_phases("us-east-1", &options)
            .await
            .unwrap();
        assert_eq!(summary.phases.len(), 3);
        let sum: f64 = summary.phases.iter().map(|p| p.savings).sum();
        assert!((summary.total_savings.monthly - sum).abs() < 1e-6);
        assert!((summary.total_savings.annual - sum * 12.0).abs() < 1e-6);
        assert!(!summary.recommendations.is_empty());
    }

    #[test]
    fn test_suggestions_sorted_by_savings() {
        let calc = calculator();
        let estimate = CostEstimate::from_breakdown(
            CostBreakdown {
                compute: 200.0,
                database: 120.0,
                cache: 40.0,
                load_balancer: 10.0,
                storage: 50.0,
                networking: 10.0,
                monitoring: 0.0,
            },
            0.85,
            vec![],
            vec![],
        );
        let suggestions = calc.generate_optimization_suggestions(
            ScalingPhase::Scale,
            ProviderKind::Linode,
            &estimate,
        );
        assert!(suggestions
            .windows(2)
            .all(|w| w[0].potential_savings >= w[1].potential_savings));
        assert!(suggestions
            .iter()
            .any(|s| s.category == ServiceCategory::Cache));
        // Read replicas kick in above $50 of database spend
        assert!(suggestions
            .iter()
            .any(|s| s.suggestion.contains("read replicas")));
    }

    #[test]
    fn test_aws_launch_suggestions_skip_scaling_advice() {
        let calc = calculator();
        let estimate = estimate_with_total(100.0, 20.0);
        let suggestions = calc.generate_optimization_suggestions(
            ScalingPhase::Launch,
            ProviderKind::Aws,
            &estimate,
        );
        assert!(!suggestions.iter().any(|s| s.suggestion.contains("Auto Scaling")));
        assert!(!suggestions
            .iter()
            .any(|s| s.suggestion.contains("RDS Reserved")));
        assert!(suggestions
            .iter()
            .any(|s| s.suggestion.contains("Reserved Instances")));
    }

    #[tokio::test]
    async fn test_switching_roi_rejects_same_provider() {
        let calc = calculator();
        let options = CostOptions::default();
        let err = calc
            .calculate_switching_roi(
                ProviderKind::Aws,
                ProviderKind::Aws,
                ScalingPhase::Launch,
                "us-east-1",
                &options,
                1_000.0,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_switching_to_linode_has_positive_savings() {
        let calc = calculator();
        let options = CostOptions::for_phase(ScalingPhase::Scale);
        let migration_cost = estimate_migration_cost(
            ScalingPhase::Scale,
            ProviderKind::Aws,
            ProviderKind::Linode,
        );
        let roi = calc
            .calculate_switching_roi(
                ProviderKind::Aws,
                ProviderKind::Linode,
                ScalingPhase::Scale,
                "us-east-1",
                &options,
                migration_cost,
            )
            .await
            .unwrap();
        assert!(roi.monthly_savings > 0.0);
        assert!(roi.payback_period_months.is_some());
    }
}
