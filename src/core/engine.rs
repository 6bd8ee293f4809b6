//! Engine facade
//!
//! Single entry point tying the registry, calculator, comparison engine,
//! trend analyzer and report builder together. Construct one
//! [`CloudCostEngine`] and drive everything through it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::join;
use tracing::info;

use crate::config::phases::ScalingPhase;
use crate::config::EngineSettings;
use crate::core::comparison::{ComparisonEngine, SelectionCriteria};
use crate::core::cost::calculator::CostCalculator;
use crate::core::cost::types::{PhaseComparisonSummary, TcoComparison};
use crate::core::providers::{ProviderKind, ProviderRegistry};
use crate::core::report::{CostAnalysisRequest, CostComparisonReport, ReportBuilder};
use crate::core::trends::{MonthlyCost, TrendAnalysis, TrendAnalyzer};
use crate::core::types::{CloudRegion, CostEstimate, CostOptions, ValidationResult};
use crate::utils::error::{EngineError, Result};

/// Cost difference when switching between two providers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostImpact {
    pub from: CostEstimate,
    pub to: CostEstimate,
    /// Monthly savings after the switch; negative when the target is dearer
    pub savings: f64,
}

/// Step-by-step plan for switching providers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPlan {
    pub migration_steps: Vec<String>,
    pub estimated_downtime: String,
    pub cost_impact: CostImpact,
}

/// Facade over the whole cost-modeling engine
pub struct CloudCostEngine {
    registry: Arc<ProviderRegistry>,
    settings: EngineSettings,
    calculator: CostCalculator,
    comparison: ComparisonEngine,
    reports: ReportBuilder,
    trends: TrendAnalyzer,
}

impl CloudCostEngine {
    /// Engine with the built-in providers and default settings.
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    /// Engine with the built-in providers and explicit settings.
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self::with_registry(Arc::new(ProviderRegistry::with_builtin()), settings)
    }

    /// Engine over a caller-supplied registry.
    pub fn with_registry(registry: Arc<ProviderRegistry>, settings: EngineSettings) -> Self {
        Self {
            calculator: CostCalculator::new(Arc::clone(&registry)),
            comparison: ComparisonEngine::new(Arc::clone(&registry)),
            reports: ReportBuilder::new(Arc::clone(&registry)),
            trends: TrendAnalyzer::new(),
            registry,
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Names of the registered providers, in registration order.
    pub fn list_providers(&self) -> Vec<&'static str> {
        self.registry.list_supported()
    }

    /// Regions of one provider.
    pub async fn regions(&self, provider: &str) -> Result<Vec<CloudRegion>> {
        self.registry.get(provider)?.regions().await
    }

    /// Regions of every provider that can report them.
    pub async fn all_regions(&self) -> Vec<(String, Vec<CloudRegion>)> {
        self.comparison.all_regions().await
    }

    /// Cost estimates from every provider that can produce one.
    pub async fn all_estimates(
        &self,
        phase: ScalingPhase,
        region: &str,
        options: &CostOptions,
    ) -> Vec<(String, CostEstimate)> {
        self.comparison.all_estimates(phase, region, options).await
    }

    /// Validate a phase/region pair against every provider.
    pub async fn validate_all(
        &self,
        phase: ScalingPhase,
        region: &str,
    ) -> Vec<(String, ValidationResult)> {
        self.comparison.validate_all(phase, region).await
    }

    /// Build the full cost comparison report for a request.
    pub async fn compare_costs(
        &self,
        request: &CostAnalysisRequest,
    ) -> Result<CostComparisonReport> {
        self.reports.build_report(request).await
    }

    /// Select the best provider for a phase, region and criteria.
    ///
    /// A preferred provider from the engine settings applies when the
    /// criteria do not name one themselves.
    pub async fn optimal_provider(
        &self,
        phase: ScalingPhase,
        region: &str,
        criteria: &SelectionCriteria,
    ) -> Result<String> {
        if criteria.preferred_provider.is_none() && self.settings.preferred_provider.is_some() {
            let mut criteria = criteria.clone();
            criteria.preferred_provider = self.settings.preferred_provider.clone();
            return self.comparison.select_optimal(phase, region, &criteria).await;
        }
        self.comparison.select_optimal(phase, region, criteria).await
    }

    /// Plan a switch between two providers.
    pub async fn migration_plan(
        &self,
        from: ProviderKind,
        to: ProviderKind,
        phase: ScalingPhase,
        options: &CostOptions,
    ) -> Result<MigrationPlan> {
        if from == to {
            return Err(EngineError::InvalidRequest(format!(
                "Cannot migrate from {from} to itself"
            )));
        }
        info!(%from, %to, %phase, "Planning provider switch");

        let from_adapter = self.registry.get(from.as_str())?;
        let to_adapter = self.registry.get(to.as_str())?;
        let region = &self.settings.default_region;
        let (from_cost, to_cost) = join!(
            from_adapter.estimate_cost(phase, region, options),
            to_adapter.estimate_cost(phase, region, options),
        );
        let (from_cost, to_cost) = (from_cost?, to_cost?);
        let savings = from_cost.total_monthly_cost - to_cost.total_monthly_cost;

        Ok(MigrationPlan {
            migration_steps: migration_steps(from, to),
            estimated_downtime: estimated_downtime(phase).to_string(),
            cost_impact: CostImpact {
                from: from_cost,
                to: to_cost,
                savings,
            },
        })
    }

    /// Analyze cost trends for a provider, with optional monthly history.
    pub fn cost_trends(
        &self,
        provider: ProviderKind,
        phase: ScalingPhase,
        history: &[MonthlyCost],
    ) -> TrendAnalysis {
        self.trends.full_analysis(provider, phase, history)
    }

    /// Total cost of ownership comparison over a multi-year horizon.
    pub async fn tco(
        &self,
        phase: ScalingPhase,
        region: &str,
        options: &CostOptions,
        time_horizon_years: u32,
    ) -> Result<TcoComparison> {
        self.calculator
            .calculate_tco(phase, region, options, time_horizon_years)
            .await
    }

    /// Compare provider costs across all scaling phases.
    pub async fn compare_across_phases(
        &self,
        region: &str,
        options: &CostOptions,
    ) -> Result<PhaseComparisonSummary> {
        self.calculator.compare_across_phases(region, options).await
    }
}

impl Default for CloudCostEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn migration_steps(from: ProviderKind, to: ProviderKind) -> Vec<String> {
    vec![
        format!("1. Backup all data from {from} infrastructure"),
        format!("2. Provision new infrastructure on {to}"),
        "3. Set up data replication between providers".to_string(),
        format!("4. Update DNS records to point to {to} load balancer"),
        "5. Migrate application data and configurations".to_string(),
        "6. Update monitoring and alerting systems".to_string(),
        format!("7. Perform comprehensive testing on {to}"),
        format!("8. Switch traffic to {to} infrastructure"),
        "9. Monitor system performance and stability".to_string(),
        format!("10. Decommission {from} resources after validation"),
    ]
}

fn estimated_downtime(phase: ScalingPhase) -> &'static str {
    match phase {
        ScalingPhase::Launch => "2-4 hours",
        ScalingPhase::Growth => "4-6 hours",
        ScalingPhase::Scale => "6-8 hours",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_providers() {
        let engine = CloudCostEngine::new();
        assert_eq!(engine.list_providers(), vec!["aws", "linode"]);
    }

    #[tokio::test]
    async fn test_regions_for_unknown_provider_is_typed_error() {
        let engine = CloudCostEngine::new();
        let err = engine.regions("azure").await.unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedProvider { .. }));
    }

    #[tokio::test]
    async fn test_migration_plan_rejects_identity_switch() {
        let engine = CloudCostEngine::new();
        let err = engine
            .migration_plan(
                ProviderKind::Aws,
                ProviderKind::Aws,
                ScalingPhase::Launch,
                &CostOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_migration_plan_has_ten_steps_and_downtime() {
        let engine = CloudCostEngine::new();
        let plan = engine
            .migration_plan(
                ProviderKind::Aws,
                ProviderKind::Linode,
                ScalingPhase::Growth,
                &CostOptions::for_phase(ScalingPhase::Growth),
            )
            .await
            .unwrap();
        assert_eq!(plan.migration_steps.len(), 10);
        assert_eq!(plan.estimated_downtime, "4-6 hours");
        assert!(plan.migration_steps[0].contains("aws"));
        assert!(plan.migration_steps[1].contains("linode"));
        assert!(plan.cost_impact.savings > 0.0);
    }

    #[tokio::test]
    async fn test_settings_preferred_provider_applies() {
        // Scoring alone would pick aws here; the configured preference flips it
        let settings = EngineSettings {
            preferred_provider: Some("linode".to_string()),
            ..Default::default()
        };
        let engine = CloudCostEngine::with_settings(settings);
        let selected = engine
            .optimal_provider(ScalingPhase::Launch, "us-east-1", &SelectionCriteria::default())
            .await
            .unwrap();
        assert_eq!(selected, "linode");
    }

    #[tokio::test]
    async fn test_criteria_preference_beats_settings_preference() {
        let settings = EngineSettings {
            preferred_provider: Some("linode".to_string()),
            ..Default::default()
        };
        let engine = CloudCostEngine::with_settings(settings);
        let criteria = SelectionCriteria {
            preferred_provider: Some("aws".to_string()),
            ..Default::default()
        };
        let selected = engine
            .optimal_provider(ScalingPhase::Launch, "us-east-1", &criteria)
            .await
            .unwrap();
        assert_eq!(selected, "aws");
    }

    #[test]
    fn test_cost_trends_without_history_uses_defaults() {
        let engine = CloudCostEngine::new();
        let analysis = engine.cost_trends(ProviderKind::Linode, ScalingPhase::Scale, &[]);
        assert!((analysis.trends.projected_growth - 10.0).abs() < 1e-9);
        assert_eq!(analysis.forecast.len(), 6);
    }
}
