//! AWS provider adapter
//!
//! Full-service provider: broadest managed-service coverage, hourly
//! on-demand compute billing and a reserved-instance discount. Carries the
//! highest estimate confidence of the built-in adapters.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::phases::{self, ResourceTier, ScalingPhase};
use crate::core::providers::pricing::AWS_PRICING;
use crate::core::providers::CloudProvider;
use crate::core::types::{
    CloudRegion, CostEstimate, CostOptions, Level, OptimizationKind,
    OptimizationRecommendation, PerformanceProfile, ServiceAlternative, ServiceRecommendation,
    ServiceRequirements, ValidationIssue, ValidationResult,
};
use crate::utils::error::Result;

/// User count above which autoscaling groups are advised
const AUTOSCALING_ADVICE_THRESHOLD: u32 = 50_000;

static REGIONS: Lazy<Vec<CloudRegion>> = Lazy::new(|| {
    vec![
        CloudRegion {
            id: "us-east-1".to_string(),
            name: "N. Virginia".to_string(),
            location: "United States East".to_string(),
            available: true,
            latency_ms: Some(50),
            cost_multiplier: Some(1.0),
        },
        CloudRegion {
            id: "us-west-2".to_string(),
            name: "Oregon".to_string(),
            location: "United States West".to_string(),
            available: true,
            latency_ms: Some(70),
            cost_multiplier: Some(1.0),
        },
        CloudRegion {
            id: "eu-west-1".to_string(),
            name: "Ireland".to_string(),
            location: "Europe West".to_string(),
            available: true,
            latency_ms: Some(90),
            cost_multiplier: Some(1.1),
        },
        CloudRegion {
            id: "ap-southeast-1".to_string(),
            name: "Singapore".to_string(),
            location: "Asia Pacific".to_string(),
            available: true,
            latency_ms: Some(130),
            cost_multiplier: Some(1.15),
        },
    ]
});

/// Amazon Web Services adapter
#[derive(Debug, Default)]
pub struct AwsProvider;

impl AwsProvider {
    pub fn new() -> Self {
        Self
    }

    /// Multiplier for a region, with a flag telling whether it was found.
    fn region_multiplier(region: &str) -> (f64, bool) {
        match REGIONS.iter().find(|r| r.id == region) {
            Some(info) => (info.multiplier(), true),
            None => (1.0, false),
        }
    }

    fn compute_profile(tier: ResourceTier) -> PerformanceProfile {
        let (vcpus, memory_gb) = match tier {
            ResourceTier::Small => (2, 4),
            ResourceTier::Medium => (4, 8),
            ResourceTier::Large => (8, 16),
        };
        PerformanceProfile {
            vcpus,
            memory_gb,
            storage_gb: 100,
            network_mbps: 5_000,
        }
    }
}

#[async_trait]
impl CloudProvider for AwsProvider {
    fn name(&self) -> &'static str {
        "aws"
    }

    async fn regions(&self) -> Result<Vec<CloudRegion>> {
        Ok(REGIONS.clone())
    }

    async fn estimate_cost(
        &self,
        phase: ScalingPhase,
        region: &str,
        options: &CostOptions,
    ) -> Result<CostEstimate> {
        let specs = phases::descriptor(phase);
        let (multiplier, region_known) = Self::region_multiplier(region);
        let breakdown = AWS_PRICING.breakdown_for(specs, multiplier, options);

        let rate = AWS_PRICING.compute_rate(specs.compute.tier);
        let mut assumptions = vec![
            "Based on AWS on-demand pricing".to_string(),
            format!(
                "{}x {} instances for the {} phase",
                specs.compute.instance_count, rate.instance_type, phase
            ),
        ];
        if options.reserved_instances {
            assumptions.push("Reserved-instance pricing applied to compute".to_string());
        }

        let mut confidence = AWS_PRICING.base_confidence;
        if !region_known {
            confidence -= 0.15;
            assumptions.push(format!(
                "Region {region} is not in the AWS pricing table; base pricing assumed"
            ));
        }

        let total = breakdown.total();
        let recommendations = vec![OptimizationRecommendation {
            kind: OptimizationKind::ReservedInstances,
            description: "Consider Reserved Instances for 20-40% savings".to_string(),
            potential_savings: total * 0.3,
            effort: Level::Low,
            impact: Level::High,
        }];

        debug!(provider = "aws", %phase, region, total, "Computed cost estimate");
        Ok(CostEstimate::from_breakdown(
            breakdown,
            confidence,
            assumptions,
            recommendations,
        ))
    }

    async fn recommendations(
        &self,
        phase: ScalingPhase,
        _requirements: &ServiceRequirements,
    ) -> Result<Vec<ServiceRecommendation>> {
        let specs = phases::descriptor(phase);
        let compute_rate = AWS_PRICING.compute_rate(specs.compute.tier);
        let db_rate = AWS_PRICING.database_rate(specs.database.tier);

        Ok(vec![
            ServiceRecommendation {
                service: "EC2 Compute".to_string(),
                instance_type: compute_rate.instance_type.to_string(),
                monthly_cost: compute_rate.monthly()
                    * f64::from(specs.compute.instance_count),
                performance: Self::compute_profile(specs.compute.tier),
                rationale: "Balanced compute instances with good price-performance ratio"
                    .to_string(),
                alternatives: vec![ServiceAlternative {
                    instance_type: compute_rate.instance_type.replacen("c5", "m5", 1),
                    monthly_cost: compute_rate.monthly() * 0.9,
                    tradeoffs: "Slightly lower cost but less CPU performance".to_string(),
                }],
            },
            ServiceRecommendation {
                service: "RDS PostgreSQL".to_string(),
                instance_type: db_rate.tier_name.to_string(),
                monthly_cost: db_rate.monthly,
                performance: PerformanceProfile {
                    vcpus: 1,
                    memory_gb: match specs.database.tier {
                        ResourceTier::Small => 1,
                        ResourceTier::Medium => 2,
                        ResourceTier::Large => 8,
                    },
                    storage_gb: specs.database.storage_gb,
                    network_mbps: 1_000,
                },
                rationale: "Managed PostgreSQL with automated backups and maintenance"
                    .to_string(),
                alternatives: vec![ServiceAlternative {
                    instance_type: "self-managed".to_string(),
                    monthly_cost: db_rate.monthly * 0.5,
                    tradeoffs: "Lower cost but requires manual management and maintenance"
                        .to_string(),
                }],
            },
            ServiceRecommendation {
                service: "Application Load Balancer".to_string(),
                instance_type: "standard".to_string(),
                monthly_cost: AWS_PRICING.load_balancer_monthly
                    * f64::from(specs.load_balancer.count),
                performance: PerformanceProfile {
                    vcpus: 0,
                    memory_gb: 0,
                    storage_gb: 0,
                    network_mbps: 25_000,
                },
                rationale:
                    "Highly available load balancer with SSL termination and health checks"
                        .to_string(),
                alternatives: vec![ServiceAlternative {
                    instance_type: "network-load-balancer".to_string(),
                    monthly_cost: AWS_PRICING.load_balancer_monthly,
                    tradeoffs: "Better for TCP traffic but no SSL termination".to_string(),
                }],
            },
        ])
    }

    async fn validate(&self, phase: ScalingPhase, region: &str) -> Result<ValidationResult> {
        let specs = phases::descriptor(phase);
        let mut errors = Vec::new();
        let mut recommendations = Vec::new();

        let (_, region_known) = Self::region_multiplier(region);
        if !region_known {
            errors.push(ValidationIssue {
                field: "region".to_string(),
                message: format!("Region {region} is not available for AWS"),
            });
        }

        if specs.expected_users == 0 {
            errors.push(ValidationIssue {
                field: "expectedUsers".to_string(),
                message: "Expected users must be greater than 0".to_string(),
            });
        }

        if specs.expected_users > AUTOSCALING_ADVICE_THRESHOLD {
            recommendations.push(
                "Consider using AWS Auto Scaling Groups for better scalability".to_string(),
            );
        }

        Ok(ValidationResult::new(errors, Vec::new(), recommendations))
    }
}
