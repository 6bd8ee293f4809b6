//! Shared domain types for provider evaluation
//!
//! Consolidates the records exchanged between adapters, the calculator and
//! the comparison engine. All of these are plain data: freshly constructed
//! per call, never mutated after being returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::phases::ScalingPhase;

/// A provider region with its pricing characteristics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudRegion {
    /// Provider-specific region identifier (e.g. "us-east-1")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Geographic location
    pub location: String,
    /// Whether the region currently accepts deployments
    pub available: bool,
    /// Average latency in milliseconds, when known
    pub latency_ms: Option<u32>,
    /// Regional cost multiplier (1.0 = base cost)
    pub cost_multiplier: Option<f64>,
}

impl CloudRegion {
    /// Effective cost multiplier, defaulting to 1.0.
    pub fn multiplier(&self) -> f64 {
        self.cost_multiplier.unwrap_or(1.0)
    }
}

/// Service categories that make up a monthly cost estimate.
///
/// This is a closed set: every breakdown carries exactly these seven
/// categories, with 0.0 for services a configuration does not use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceCategory {
    Compute,
    Database,
    Cache,
    LoadBalancer,
    Storage,
    Networking,
    Monitoring,
}

impl ServiceCategory {
    /// All categories, in breakdown order.
    pub const ALL: [ServiceCategory; 7] = [
        ServiceCategory::Compute,
        ServiceCategory::Database,
        ServiceCategory::Cache,
        ServiceCategory::LoadBalancer,
        ServiceCategory::Storage,
        ServiceCategory::Networking,
        ServiceCategory::Monitoring,
    ];
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ServiceCategory::Compute => "compute",
            ServiceCategory::Database => "database",
            ServiceCategory::Cache => "cache",
            ServiceCategory::LoadBalancer => "loadBalancer",
            ServiceCategory::Storage => "storage",
            ServiceCategory::Networking => "networking",
            ServiceCategory::Monitoring => "monitoring",
        };
        write!(f, "{}", name)
    }
}

/// Monthly cost broken down by service category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub compute: f64,
    pub database: f64,
    pub cache: f64,
    pub load_balancer: f64,
    pub storage: f64,
    pub networking: f64,
    pub monitoring: f64,
}

impl CostBreakdown {
    /// Sum of all category costs.
    pub fn total(&self) -> f64 {
        ServiceCategory::ALL
            .iter()
            .map(|c| self.category(*c))
            .sum()
    }

    /// Cost for a single category.
    pub fn category(&self, category: ServiceCategory) -> f64 {
        match category {
            ServiceCategory::Compute => self.compute,
            ServiceCategory::Database => self.database,
            ServiceCategory::Cache => self.cache,
            ServiceCategory::LoadBalancer => self.load_balancer,
            ServiceCategory::Storage => self.storage,
            ServiceCategory::Networking => self.networking,
            ServiceCategory::Monitoring => self.monitoring,
        }
    }
}

/// A single cost-saving recommendation attached to an estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRecommendation {
    /// What kind of change is being recommended
    pub kind: OptimizationKind,
    /// Human-readable description
    pub description: String,
    /// Estimated monthly savings in USD
    pub potential_savings: f64,
    /// Implementation effort
    pub effort: Level,
    /// Expected impact
    pub impact: Level,
}

/// Kinds of cost optimizations providers can recommend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationKind {
    InstanceSizing,
    ReservedInstances,
    StorageOptimization,
    NetworkOptimization,
}

/// Qualitative low/medium/high scale used for effort and impact tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

/// Monthly cost estimate produced by a provider adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    /// Total monthly cost across all categories
    pub total_monthly_cost: f64,
    /// Currency (always "USD" for the built-in pricing tables)
    pub currency: String,
    /// Per-category breakdown; sums to the total
    pub breakdown: CostBreakdown,
    /// How accurate the estimate is, in [0, 1]
    pub confidence: f64,
    /// When the estimate was produced
    pub last_updated: DateTime<Utc>,
    /// Assumptions the estimate rests on
    pub assumptions: Vec<String>,
    /// Provider-suggested optimizations
    pub recommendations: Vec<OptimizationRecommendation>,
}

impl CostEstimate {
    /// Build an estimate from a breakdown, deriving the total from it so the
    /// total-equals-sum invariant holds by construction.
    pub fn from_breakdown(
        breakdown: CostBreakdown,
        confidence: f64,
        assumptions: Vec<String>,
        recommendations: Vec<OptimizationRecommendation>,
    ) -> Self {
        Self {
            total_monthly_cost: breakdown.total(),
            currency: "USD".to_string(),
            breakdown,
            confidence,
            last_updated: Utc::now(),
            assumptions,
            recommendations,
        }
    }
}

/// Expected usage intensity, used to size data-transfer costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsagePattern {
    Light,
    Moderate,
    Heavy,
}

/// Options controlling which additive categories an estimate includes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOptions {
    /// Include outbound data-transfer costs
    pub include_data_transfer: bool,
    /// Include backup storage costs
    pub include_backups: bool,
    /// Include managed monitoring costs
    pub include_monitoring: bool,
    /// Expected usage intensity
    pub usage_pattern: UsagePattern,
    /// Apply reserved-instance pricing where the provider supports it
    pub reserved_instances: bool,
}

impl CostOptions {
    /// Default options for a scaling phase: light usage at launch, heavy at
    /// scale, reserved instances once the workload is predictable.
    pub fn for_phase(phase: ScalingPhase) -> Self {
        Self {
            include_data_transfer: true,
            include_backups: true,
            include_monitoring: true,
            usage_pattern: match phase {
                ScalingPhase::Launch => UsagePattern::Light,
                ScalingPhase::Growth => UsagePattern::Moderate,
                ScalingPhase::Scale => UsagePattern::Heavy,
            },
            reserved_instances: phase == ScalingPhase::Scale,
        }
    }
}

impl Default for CostOptions {
    fn default() -> Self {
        Self::for_phase(ScalingPhase::Launch)
    }
}

/// Requirements driving service recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequirements {
    /// Required performance level
    pub performance_level: Level,
    /// Availability target, e.g. 99.9
    pub availability_target: f64,
    /// Compliance tags (GDPR, HIPAA, ...)
    pub compliance: Vec<String>,
    /// Maximum monthly budget, when constrained
    pub budget_limit: Option<f64>,
}

impl Default for ServiceRequirements {
    fn default() -> Self {
        Self {
            performance_level: Level::Medium,
            availability_target: 99.9,
            compliance: Vec::new(),
            budget_limit: None,
        }
    }
}

/// Hardware profile of a recommended service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceProfile {
    pub vcpus: u32,
    pub memory_gb: u32,
    pub storage_gb: u32,
    pub network_mbps: u32,
}

/// A cheaper or otherwise different option for the same service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAlternative {
    pub instance_type: String,
    pub monthly_cost: f64,
    pub tradeoffs: String,
}

/// One service recommendation for a major category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecommendation {
    /// Service name (e.g. "EC2 Compute")
    pub service: String,
    /// Recommended instance type or tier
    pub instance_type: String,
    /// Monthly cost for the recommended configuration
    pub monthly_cost: f64,
    /// Hardware profile of the recommendation
    pub performance: PerformanceProfile,
    /// Why this is the right choice
    pub rationale: String,
    /// At least one alternative with its tradeoffs
    pub alternatives: Vec<ServiceAlternative>,
}

/// A field-level problem found during validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

/// Result of validating a phase/region combination against a provider.
///
/// Validation reports problems as data rather than failing: an unknown region
/// or a malformed phase produces `valid: false`, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    /// Build a result whose validity follows from the absence of errors.
    pub fn new(
        errors: Vec<ValidationIssue>,
        warnings: Vec<ValidationIssue>,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_total_sums_all_categories() {
        let breakdown = CostBreakdown {
            compute: 60.0,
            database: 20.0,
            cache: 12.0,
            load_balancer: 16.0,
            storage: 25.0,
            networking: 9.0,
            monitoring: 10.0,
        };
        assert!((breakdown.total() - 152.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_total_matches_breakdown_by_construction() {
        let breakdown = CostBreakdown {
            compute: 100.0,
            database: 40.0,
            ..Default::default()
        };
        let estimate = CostEstimate::from_breakdown(breakdown, 0.9, vec![], vec![]);
        assert!((estimate.total_monthly_cost - estimate.breakdown.total()).abs() < 1e-6);
    }

    #[test]
    fn test_category_accessor_covers_closed_set() {
        let mut breakdown = CostBreakdown::default();
        breakdown.load_balancer = 16.0;
        let sum: f64 = ServiceCategory::ALL
            .iter()
            .map(|c| breakdown.category(*c))
            .sum();
        assert!((sum - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_serializes_camel_case() {
        let json = serde_json::to_string(&ServiceCategory::LoadBalancer).unwrap();
        assert_eq!(json, "\"loadBalancer\"");
    }

    #[test]
    fn test_region_multiplier_defaults_to_one() {
        let region = CloudRegion {
            id: "us-east-1".to_string(),
            name: "N. Virginia".to_string(),
            location: "United States East".to_string(),
            available: true,
            latency_ms: Some(50),
            cost_multiplier: None,
        };
        assert_eq!(region.multiplier(), 1.0);
    }

    #[test]
    fn test_phase_options_scale_enables_reserved_instances() {
        let launch = CostOptions::for_phase(ScalingPhase::Launch);
        let scale = CostOptions::for_phase(ScalingPhase::Scale);
        assert!(!launch.reserved_instances);
        assert_eq!(launch.usage_pattern, UsagePattern::Light);
        assert!(scale.reserved_instances);
        assert_eq!(scale.usage_pattern, UsagePattern::Heavy);
    }

    #[test]
    fn test_validation_result_validity_follows_errors() {
        let ok = ValidationResult::new(vec![], vec![], vec![]);
        assert!(ok.valid);

        let bad = ValidationResult::new(
            vec![ValidationIssue {
                field: "region".to_string(),
                message: "unknown region".to_string(),
            }],
            vec![],
            vec![],
        );
        assert!(!bad.valid);
    }
}
