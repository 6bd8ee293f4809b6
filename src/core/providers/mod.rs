//! Cloud provider adapters
//!
//! Each supported provider implements [`CloudProvider`], a uniform async
//! surface over its regions, pricing and validation rules. Adapters are
//! stateless: every answer is derived from the static pricing tables in
//! [`pricing`] and the phase catalog, so identical inputs always produce
//! identical outputs (timestamps aside).

pub mod aws;
pub mod linode;
pub mod pricing;
pub mod registry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::phases::ScalingPhase;
use crate::core::types::{
    CloudRegion, CostEstimate, CostOptions, ServiceRecommendation, ServiceRequirements,
    ValidationResult,
};
use crate::utils::error::{EngineError, Result};

pub use aws::AwsProvider;
pub use linode::LinodeProvider;
pub use registry::ProviderRegistry;

/// Identifier for a built-in provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Aws,
    Linode,
}

impl ProviderKind {
    /// All built-in providers.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Aws, ProviderKind::Linode];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Aws => "aws",
            ProviderKind::Linode => "linode",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "aws" => Ok(ProviderKind::Aws),
            "linode" => Ok(ProviderKind::Linode),
            other => Err(EngineError::unsupported_provider(other, &["aws", "linode"])),
        }
    }
}

/// Uniform surface implemented by every provider adapter.
///
/// All methods take the scaling phase rather than raw resource numbers; the
/// adapter resolves the phase through the catalog and its own pricing table.
/// Unknown regions degrade estimates (lower confidence, base pricing) instead
/// of failing; errors are reserved for genuinely broken inputs.
#[async_trait]
pub trait CloudProvider: Send + Sync + std::fmt::Debug {
    /// Stable provider identifier ("aws", "linode").
    fn name(&self) -> &'static str;

    /// Regions this provider can deploy to.
    async fn regions(&self) -> Result<Vec<CloudRegion>>;

    /// Monthly cost estimate for a phase in a region.
    async fn estimate_cost(
        &self,
        phase: ScalingPhase,
        region: &str,
        options: &CostOptions,
    ) -> Result<CostEstimate>;

    /// Service recommendations for a phase and requirement set.
    async fn recommendations(
        &self,
        phase: ScalingPhase,
        requirements: &ServiceRequirements,
    ) -> Result<Vec<ServiceRecommendation>>;

    /// Validate a phase/region combination, reporting problems as data.
    async fn validate(&self, phase: ScalingPhase, region: &str) -> Result<ValidationResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_provider_kind_round_trips() {
        for kind in ProviderKind::ALL {
            assert_eq!(ProviderKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_provider_kind_parse_is_case_insensitive() {
        assert_eq!(ProviderKind::from_str("AWS").unwrap(), ProviderKind::Aws);
    }

    #[test]
    fn test_unknown_provider_kind_lists_supported() {
        let err = ProviderKind::from_str("azure").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("azure"));
        assert!(msg.contains("aws"));
        assert!(msg.contains("linode"));
    }
}
