//! Linode provider adapter
//!
//! Cost-optimized provider: flat monthly compute billing, bundled Longview
//! monitoring and generous transfer allowances. Slightly lower estimate
//! confidence than AWS because its managed-service catalog is thinner.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::phases::{self, ResourceTier, ScalingPhase};
use crate::core::providers::pricing::LINODE_PRICING;
use crate::core::providers::CloudProvider;
use crate::core::types::{
    CloudRegion, CostEstimate, CostOptions, Level, OptimizationKind,
    OptimizationRecommendation, PerformanceProfile, ServiceAlternative, ServiceRecommendation,
    ServiceRequirements, ValidationIssue, ValidationResult,
};
use crate::utils::error::Result;

/// User count above which a managed Kubernetes setup is advised
const KUBERNETES_ADVICE_THRESHOLD: u32 = 10_000;

static REGIONS: Lazy<Vec<CloudRegion>> = Lazy::new(|| {
    vec![
        CloudRegion {
            id: "us-east".to_string(),
            name: "Newark, NJ".to_string(),
            location: "United States East".to_string(),
            available: true,
            latency_ms: Some(45),
            cost_multiplier: Some(1.0),
        },
        CloudRegion {
            id: "us-west".to_string(),
            name: "Fremont, CA".to_string(),
            location: "United States West".to_string(),
            available: true,
            latency_ms: Some(65),
            cost_multiplier: Some(1.0),
        },
        CloudRegion {
            id: "eu-west".to_string(),
            name: "London, UK".to_string(),
            location: "Europe West".to_string(),
            available: true,
            latency_ms: Some(85),
            cost_multiplier: Some(1.05),
        },
        CloudRegion {
            id: "ap-south".to_string(),
            name: "Singapore".to_string(),
            location: "Asia Pacific".to_string(),
            available: true,
            latency_ms: Some(120),
            cost_multiplier: Some(1.1),
        },
    ]
});

/// Linode adapter
#[derive(Debug, Default)]
pub struct LinodeProvider;

impl LinodeProvider {
    pub fn new() -> Self {
        Self
    }

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
            storage_gb: 80,
            network_mbps: 1_000,
        }
    }
}

#[async_trait]
impl CloudProvider for LinodeProvider {
    fn name(&self) -> &'static str {
        "linode"
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
        let breakdown = LINODE_PRICING.breakdown_for(specs, multiplier, options);

        let rate = LINODE_PRICING.compute_rate(specs.compute.tier);
        let mut assumptions = vec![
            "Based on Linode standard pricing".to_string(),
            format!(
                "{}x {} instances for the {} phase",
                specs.compute.instance_count, rate.instance_type, phase
            ),
            "Longview monitoring included at no charge".to_string(),
        ];

        let mut confidence = LINODE_PRICING.base_confidence;
        if !region_known {
            confidence -= 0.15;
            assumptions.push(format!(
                "Region {region} is not in the Linode pricing table; base pricing assumed"
            ));
        }

        let total = breakdown.total();
        let recommendations = vec![OptimizationRecommendation {
            kind: OptimizationKind::InstanceSizing,
            description: "Consider using Dedicated CPU instances for consistent performance"
                .to_string(),
            potential_savings: total * 0.15,
            effort: Level::Low,
            impact: Level::Medium,
        }];

        debug!(provider = "linode", %phase, region, total, "Computed cost estimate");
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
        let compute_rate = LINODE_PRICING.compute_rate(specs.compute.tier);
        let db_rate = LINODE_PRICING.database_rate(specs.database.tier);

        Ok(vec![
            ServiceRecommendation {
                service: "Linode Compute".to_string(),
                instance_type: compute_rate.instance_type.to_string(),
                monthly_cost: compute_rate.monthly()
                    * f64::from(specs.compute.instance_count),
                performance: Self::compute_profile(specs.compute.tier),
                rationale: "Cost-effective general purpose instances with good performance"
                    .to_string(),
                alternatives: vec![ServiceAlternative {
                    instance_type: compute_rate.instance_type.replacen("standard", "dedicated", 1),
                    monthly_cost: compute_rate.monthly() * 1.5,
                    tradeoffs: "Dedicated CPU cores at a higher price point".to_string(),
                }],
            },
            ServiceRecommendation {
                service: "Managed PostgreSQL".to_string(),
                instance_type: db_rate.tier_name.to_string(),
                monthly_cost: db_rate.monthly,
                performance: PerformanceProfile {
                    vcpus: 1,
                    memory_gb: match specs.database.tier {
                        ResourceTier::Small => 2,
                        ResourceTier::Medium => 4,
                        ResourceTier::Large => 8,
                    },
                    storage_gb: specs.database.storage_gb,
                    network_mbps: 1_000,
                },
                rationale: "Managed PostgreSQL at roughly half the AWS price".to_string(),
                alternatives: vec![ServiceAlternative {
                    instance_type: "self-managed".to_string(),
                    monthly_cost: db_rate.monthly * 0.6,
                    tradeoffs: "Lower cost but requires manual management and maintenance"
                        .to_string(),
                }],
            },
            ServiceRecommendation {
                service: "NodeBalancer".to_string(),
                instance_type: "standard".to_string(),
                monthly_cost: LINODE_PRICING.load_balancer_monthly
                    * f64::from(specs.load_balancer.count),
                performance: PerformanceProfile {
                    vcpus: 0,
                    memory_gb: 0,
                    storage_gb: 0,
                    network_mbps: 10_000,
                },
                rationale: "Simple load balancer with health checks at a flat rate".to_string(),
                alternatives: vec![ServiceAlternative {
                    instance_type: "haproxy-on-instance".to_string(),
                    monthly_cost: LINODE_PRICING.compute_rate(ResourceTier::Small).monthly(),
                    tradeoffs: "Full control but self-managed failover".to_string(),
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
                message: format!("Region {region} is not available for Linode"),
            });
        }

        if specs.expected_users == 0 {
            errors.push(ValidationIssue {
                field: "expectedUsers".to_string(),
                message: "Expected users must be greater than 0".to_string(),
            });
        }

        if specs.expected_users > KUBERNETES_ADVICE_THRESHOLD {
            recommendations.push(
                "Consider using Linode Kubernetes Engine for better scalability".to_string(),
            );
        }

        Ok(ValidationResult::new(errors, Vec::new(), recommendations))
    }
}
