//! Provider registry
//!
//! Holds the active provider adapters in registration order. Order matters:
//! registry-wide operations report results in it, and scoring ties are broken
//! in favor of the earlier registration, so results are deterministic for a
//! given registry.

use std::sync::Arc;

use tracing::info;

use crate::core::providers::{AwsProvider, CloudProvider, LinodeProvider};
use crate::utils::error::{EngineError, Result};

/// Registration-ordered collection of provider adapters
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn CloudProvider>>,
}

impl ProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Registry preloaded with the built-in adapters, AWS first.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(AwsProvider::new()));
        registry.register(Arc::new(LinodeProvider::new()));
        registry
    }

    /// Register an adapter. Re-registering a name replaces the adapter but
    /// keeps its original position.
    pub fn register(&mut self, provider: Arc<dyn CloudProvider>) {
        let name = provider.name();
        match self.providers.iter_mut().find(|p| p.name() == name) {
            Some(slot) => *slot = provider,
            None => self.providers.push(provider),
        }
        info!(provider = name, "Registered cloud provider");
    }

    /// Look up an adapter by name.
    pub fn get(&self, name: &str) -> Result<&Arc<dyn CloudProvider>> {
        self.providers
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| EngineError::unsupported_provider(name, &self.list_supported()))
    }

    /// Names of all registered providers, in registration order.
    pub fn list_supported(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.providers.iter().any(|p| p.name() == name)
    }

    /// Adapters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn CloudProvider>> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::config::phases::ScalingPhase;
    use crate::core::types::{
        CloudRegion, CostEstimate, CostOptions, ServiceRecommendation, ServiceRequirements,
        ValidationResult,
    };

    #[derive(Debug)]
    struct StubProvider;

    #[async_trait]
    impl CloudProvider for StubProvider {
        fn name(&self) -> &'static str {
            "aws"
        }

        async fn regions(&self) -> Result<Vec<CloudRegion>> {
            Ok(Vec::new())
        }

        async fn estimate_cost(
            &self,
            _phase: ScalingPhase,
            _region: &str,
            _options: &CostOptions,
        ) -> Result<CostEstimate> {
            Err(EngineError::evaluation("aws", "stub"))
        }

        async fn recommendations(
            &self,
            _phase: ScalingPhase,
            _requirements: &ServiceRequirements,
        ) -> Result<Vec<ServiceRecommendation>> {
            Ok(Vec::new())
        }

        async fn validate(&self, _phase: ScalingPhase, _region: &str) -> Result<ValidationResult> {
            Ok(ValidationResult::new(Vec::new(), Vec::new(), Vec::new()))
        }
    }

    #[test]
    fn test_builtin_registry_order() {
        let registry = ProviderRegistry::with_builtin();
        assert_eq!(registry.list_supported(), vec!["aws", "linode"]);
        assert!(registry.is_supported("aws"));
        assert!(!registry.is_supported("azure"));
    }

    #[test]
    fn test_get_unknown_provider_lists_supported() {
        let registry = ProviderRegistry::with_builtin();
        let err = registry.get("gcp").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("gcp"));
        assert!(msg.contains("aws, linode"));
    }

    #[test]
    fn test_reregistration_keeps_position() {
        let mut registry = ProviderRegistry::with_builtin();
        registry.register(Arc::new(StubProvider));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.list_supported(), vec!["aws", "linode"]);
    }

    #[tokio::test]
    async fn test_iteration_follows_registration_order() {
        let registry = ProviderRegistry::with_builtin();
        let names: Vec<_> = registry.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["aws", "linode"]);
    }
}
