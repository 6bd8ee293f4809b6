//! Scaling phase catalog
//!
//! Three operating scales drive resource sizing: launch, growth and scale.
//! Each phase maps to an immutable [`PhaseDescriptor`] built once at process
//! start; adapters read descriptors by reference and never mutate them.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::utils::error::EngineError;

/// Discrete operating-scale tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingPhase {
    Launch,
    Growth,
    Scale,
}

impl ScalingPhase {
    /// All phases, smallest first.
    pub const ALL: [ScalingPhase; 3] = [
        ScalingPhase::Launch,
        ScalingPhase::Growth,
        ScalingPhase::Scale,
    ];
}

impl std::fmt::Display for ScalingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScalingPhase::Launch => "launch",
            ScalingPhase::Growth => "growth",
            ScalingPhase::Scale => "scale",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ScalingPhase {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "launch" => Ok(ScalingPhase::Launch),
            "growth" => Ok(ScalingPhase::Growth),
            "scale" => Ok(ScalingPhase::Scale),
            other => Err(EngineError::InvalidRequest(format!(
                "Unknown scaling phase: {other}. Expected launch, growth or scale"
            ))),
        }
    }
}

/// Relative resource sizing tier, mapped to concrete instance types by each
/// provider's pricing table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceTier {
    Small,
    Medium,
    Large,
}

/// Compute sizing for a phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeSpec {
    pub tier: ResourceTier,
    pub instance_count: u32,
}

/// Database sizing for a phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSpec {
    pub tier: ResourceTier,
    pub storage_gb: u32,
    pub backup_retention_days: u32,
    pub read_replicas: bool,
}

/// Cache sizing for a phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSpec {
    pub tier: ResourceTier,
    pub memory_gb: u32,
    pub clustering: bool,
}

/// Load balancer sizing for a phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerSpec {
    pub count: u32,
    pub sticky_sessions: bool,
}

/// Block storage sizing for a phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    pub gb_per_instance: u32,
}

/// Networking features for a phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkingSpec {
    pub cdn_enabled: bool,
}

/// Monitoring depth for a phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSpec {
    pub retention_days: u32,
    pub advanced_metrics: bool,
}

/// Immutable description of one operating phase.
///
/// Constructed once per process from the catalog (or external configuration)
/// and treated as read-only everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDescriptor {
    pub phase: ScalingPhase,
    pub expected_users: u32,
    pub max_concurrent_users: u32,
    pub compute: ComputeSpec,
    pub database: DatabaseSpec,
    pub cache: CacheSpec,
    pub load_balancer: LoadBalancerSpec,
    pub storage: StorageSpec,
    pub networking: NetworkingSpec,
    pub monitoring: MonitoringSpec,
}

static CATALOG: Lazy<[PhaseDescriptor; 3]> = Lazy::new(|| {
    [
        // Launch: 1,000-2,000 concurrent users. Stability and basics.
        PhaseDescriptor {
            phase: ScalingPhase::Launch,
            expected_users: 2_000,
            max_concurrent_users: 2_000,
            compute: ComputeSpec {
                tier: ResourceTier::Small,
                instance_count: 2,
            },
            database: DatabaseSpec {
                tier: ResourceTier::Small,
                storage_gb: 100,
                backup_retention_days: 7,
                read_replicas: false,
            },
            cache: CacheSpec {
                tier: ResourceTier::Small,
                memory_gb: 1,
                clustering: false,
            },
            load_balancer: LoadBalancerSpec {
                count: 1,
                sticky_sessions: false,
            },
            storage: StorageSpec {
                gb_per_instance: 100,
            },
            networking: NetworkingSpec { cdn_enabled: false },
            monitoring: MonitoringSpec {
                retention_days: 30,
                advanced_metrics: true,
            },
        },
        // Growth: 3,000-5,000 concurrent users. Read replicas, CDN.
        PhaseDescriptor {
            phase: ScalingPhase::Growth,
            expected_users: 5_000,
            max_concurrent_users: 5_000,
            compute: ComputeSpec {
                tier: ResourceTier::Medium,
                instance_count: 3,
            },
            database: DatabaseSpec {
                tier: ResourceTier::Medium,
                storage_gb: 250,
                backup_retention_days: 14,
                read_replicas: true,
            },
            cache: CacheSpec {
                tier: ResourceTier::Medium,
                memory_gb: 4,
                clustering: false,
            },
            load_balancer: LoadBalancerSpec {
                count: 1,
                sticky_sessions: true,
            },
            storage: StorageSpec {
                gb_per_instance: 100,
            },
            networking: NetworkingSpec { cdn_enabled: true },
            monitoring: MonitoringSpec {
                retention_days: 30,
                advanced_metrics: true,
            },
        },
        // Scale: 10,000+ concurrent users. Clustering, autoscaling.
        PhaseDescriptor {
            phase: ScalingPhase::Scale,
            expected_users: 15_000,
            max_concurrent_users: 15_000,
            compute: ComputeSpec {
                tier: ResourceTier::Large,
                instance_count: 5,
            },
            database: DatabaseSpec {
                tier: ResourceTier::Large,
                storage_gb: 500,
                backup_retention_days: 30,
                read_replicas: true,
            },
            cache: CacheSpec {
                tier: ResourceTier::Large,
                memory_gb: 8,
                clustering: true,
            },
            load_balancer: LoadBalancerSpec {
                count: 2,
                sticky_sessions: true,
            },
            storage: StorageSpec {
                gb_per_instance: 100,
            },
            networking: NetworkingSpec { cdn_enabled: true },
            monitoring: MonitoringSpec {
                retention_days: 90,
                advanced_metrics: true,
            },
        },
    ]
});

/// Descriptor for one phase, from the built-in catalog.
pub fn descriptor(phase: ScalingPhase) -> &'static PhaseDescriptor {
    match phase {
        ScalingPhase::Launch => &CATALOG[0],
        ScalingPhase::Growth => &CATALOG[1],
        ScalingPhase::Scale => &CATALOG[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_descriptor_phase_matches_lookup() {
        for phase in ScalingPhase::ALL {
            assert_eq!(descriptor(phase).phase, phase);
        }
    }

    #[test]
    fn test_descriptor_is_stable_across_calls() {
        let a = descriptor(ScalingPhase::Growth);
        let b = descriptor(ScalingPhase::Growth);
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.expected_users, 5_000);
    }

    #[test]
    fn test_phase_sizes_grow_monotonically() {
        let launch = descriptor(ScalingPhase::Launch);
        let growth = descriptor(ScalingPhase::Growth);
        let scale = descriptor(ScalingPhase::Scale);
        assert!(launch.expected_users < growth.expected_users);
        assert!(growth.expected_users < scale.expected_users);
        assert!(launch.compute.instance_count < scale.compute.instance_count);
    }

    #[test]
    fn test_phase_round_trips_through_str() {
        for phase in ScalingPhase::ALL {
            let parsed = ScalingPhase::from_str(&phase.to_string()).unwrap();
            assert_eq!(parsed, phase);
        }
    }

    #[test]
    fn test_unknown_phase_is_invalid_request() {
        let err = ScalingPhase::from_str("hypergrowth").unwrap_err();
        assert!(err.to_string().contains("hypergrowth"));
    }
}
