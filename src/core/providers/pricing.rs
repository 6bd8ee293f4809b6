//! Static per-provider pricing tables
//!
//! All prices are USD per month unless the rate says otherwise. Tables are
//! built once and only ever read; adapters combine them with the phase
//! catalog and a region multiplier to produce estimates.

use once_cell::sync::Lazy;

use crate::config::phases::{PhaseDescriptor, ResourceTier};
use crate::core::types::{CostBreakdown, CostOptions, UsagePattern};

/// Billing hours per month used to convert hourly rates (24 x 30).
pub const HOURS_PER_MONTH: f64 = 720.0;

/// How a compute instance is billed
#[derive(Debug, Clone, Copy)]
pub enum ComputeBilling {
    /// USD per instance-hour (AWS on-demand)
    Hourly(f64),
    /// USD per instance-month (Linode flat rate)
    Monthly(f64),
}

/// Price of one compute instance tier
#[derive(Debug, Clone, Copy)]
pub struct ComputeRate {
    pub instance_type: &'static str,
    pub billing: ComputeBilling,
}

impl ComputeRate {
    /// Monthly cost of a single instance at this rate.
    pub fn monthly(&self) -> f64 {
        match self.billing {
            ComputeBilling::Hourly(rate) => rate * HOURS_PER_MONTH,
            ComputeBilling::Monthly(rate) => rate,
        }
    }
}

/// Flat monthly price of a managed service tier
#[derive(Debug, Clone, Copy)]
pub struct ServiceRate {
    pub tier_name: &'static str,
    pub monthly: f64,
}

/// How backup storage is billed
#[derive(Debug, Clone, Copy)]
pub enum BackupPricing {
    /// Flat monthly add-on
    Flat(f64),
    /// Monthly add-on per compute instance
    PerInstance(f64),
}

impl BackupPricing {
    pub fn monthly(&self, instance_count: u32) -> f64 {
        match self {
            BackupPricing::Flat(rate) => *rate,
            BackupPricing::PerInstance(rate) => rate * f64::from(instance_count),
        }
    }
}

/// Outbound data-transfer pricing by usage intensity
#[derive(Debug, Clone, Copy)]
pub struct TransferRates {
    pub light: f64,
    pub moderate: f64,
    pub heavy: f64,
}

impl TransferRates {
    pub fn for_pattern(&self, pattern: UsagePattern) -> f64 {
        match pattern {
            UsagePattern::Light => self.light,
            UsagePattern::Moderate => self.moderate,
            UsagePattern::Heavy => self.heavy,
        }
    }
}

/// Complete pricing table for one provider
#[derive(Debug)]
pub struct PriceTable {
    /// Compute rates indexed by resource tier
    pub compute: [ComputeRate; 3],
    /// Managed database rates indexed by resource tier
    pub database: [ServiceRate; 3],
    /// Managed cache rates indexed by resource tier
    pub cache: [ServiceRate; 3],
    /// Monthly price per load balancer
    pub load_balancer_monthly: f64,
    /// Monthly block-storage price per compute instance
    pub storage_per_instance_monthly: f64,
    /// Backup add-on pricing
    pub backups: BackupPricing,
    /// Data-transfer pricing
    pub data_transfer: TransferRates,
    /// Monthly price of the provider's monitoring service (0 when bundled)
    pub monitoring_monthly: f64,
    /// Compute discount factor for reserved capacity, when offered
    pub reserved_instance_factor: Option<f64>,
    /// Baseline estimate confidence in [0, 1]
    pub base_confidence: f64,
}

fn tier_index(tier: ResourceTier) -> usize {
    match tier {
        ResourceTier::Small => 0,
        ResourceTier::Medium => 1,
        ResourceTier::Large => 2,
    }
}

impl PriceTable {
    pub fn compute_rate(&self, tier: ResourceTier) -> &ComputeRate {
        &self.compute[tier_index(tier)]
    }

    pub fn database_rate(&self, tier: ResourceTier) -> &ServiceRate {
        &self.database[tier_index(tier)]
    }

    pub fn cache_rate(&self, tier: ResourceTier) -> &ServiceRate {
        &self.cache[tier_index(tier)]
    }

    /// Price a phase's resources at this table's rates.
    ///
    /// Every category is scaled by the region multiplier; flagged-off
    /// categories contribute 0 so the breakdown always carries the full
    /// category set.
    pub fn breakdown_for(
        &self,
        specs: &PhaseDescriptor,
        multiplier: f64,
        options: &CostOptions,
    ) -> CostBreakdown {
        let count = specs.compute.instance_count;

        let mut compute =
            self.compute_rate(specs.compute.tier).monthly() * f64::from(count) * multiplier;
        if options.reserved_instances {
            if let Some(factor) = self.reserved_instance_factor {
                compute *= factor;
            }
        }

        let mut storage = self.storage_per_instance_monthly * f64::from(count) * multiplier;
        if options.include_backups {
            storage += self.backups.monthly(count) * multiplier;
        }

        let networking = if options.include_data_transfer {
            self.data_transfer.for_pattern(options.usage_pattern) * multiplier
        } else {
            0.0
        };

        let monitoring = if options.include_monitoring {
            self.monitoring_monthly * multiplier
        } else {
            0.0
        };

        CostBreakdown {
            compute,
            database: self.database_rate(specs.database.tier).monthly * multiplier,
            cache: self.cache_rate(specs.cache.tier).monthly * multiplier,
            load_balancer: self.load_balancer_monthly
                * f64::from(specs.load_balancer.count)
                * multiplier,
            storage,
            networking,
            monitoring,
        }
    }
}

/// AWS on-demand pricing
pub static AWS_PRICING: Lazy<PriceTable> = Lazy::new(|| PriceTable {
    compute: [
        ComputeRate {
            instance_type: "t3.medium",
            billing: ComputeBilling::Hourly(0.0416),
        },
        ComputeRate {
            instance_type: "c5.large",
            billing: ComputeBilling::Hourly(0.085),
        },
        ComputeRate {
            instance_type: "c5.xlarge",
            billing: ComputeBilling::Hourly(0.17),
        },
    ],
    database: [
        ServiceRate {
            tier_name: "db.t3.micro",
            monthly: 20.0,
        },
        ServiceRate {
            tier_name: "db.t3.small",
            monthly: 40.0,
        },
        ServiceRate {
            tier_name: "db.r5.large",
            monthly: 120.0,
        },
    ],
    cache: [
        ServiceRate {
            tier_name: "cache.t3.micro",
            monthly: 12.0,
        },
        ServiceRate {
            tier_name: "cache.t3.small",
            monthly: 25.0,
        },
        ServiceRate {
            tier_name: "cache.r5.large",
            monthly: 90.0,
        },
    ],
    load_balancer_monthly: 16.0,
    storage_per_instance_monthly: 10.0,
    backups: BackupPricing::Flat(5.0),
    data_transfer: TransferRates {
        light: 9.0,
        moderate: 25.0,
        heavy: 70.0,
    },
    monitoring_monthly: 10.0,
    reserved_instance_factor: Some(0.72),
    base_confidence: 0.9,
});

/// Linode flat-rate pricing
pub static LINODE_PRICING: Lazy<PriceTable> = Lazy::new(|| PriceTable {
    compute: [
        ComputeRate {
            instance_type: "g6-standard-2",
            billing: ComputeBilling::Monthly(24.0),
        },
        ComputeRate {
            instance_type: "g6-standard-4",
            billing: ComputeBilling::Monthly(48.0),
        },
        ComputeRate {
            instance_type: "g6-standard-8",
            billing: ComputeBilling::Monthly(96.0),
        },
    ],
    database: [
        ServiceRate {
            tier_name: "g6-standard-1",
            monthly: 15.0,
        },
        ServiceRate {
            tier_name: "g6-standard-2",
            monthly: 30.0,
        },
        ServiceRate {
            tier_name: "g6-standard-4",
            monthly: 60.0,
        },
    ],
    cache: [
        ServiceRate {
            tier_name: "1GB Redis",
            monthly: 10.0,
        },
        ServiceRate {
            tier_name: "4GB Redis",
            monthly: 20.0,
        },
        ServiceRate {
            tier_name: "8GB Redis",
            monthly: 40.0,
        },
    ],
    load_balancer_monthly: 10.0,
    storage_per_instance_monthly: 5.0,
    backups: BackupPricing::PerInstance(5.0),
    data_transfer: TransferRates {
        light: 0.0,
        moderate: 0.0,
        heavy: 10.0,
    },
    // Longview is bundled with the instances
    monitoring_monthly: 0.0,
    reserved_instance_factor: None,
    base_confidence: 0.85,
});
