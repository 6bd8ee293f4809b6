//! Provider comparison and selection
//!
//! Scores every registered provider against weighted criteria and picks the
//! best one. Comparison is best-effort: an adapter that fails to evaluate is
//! logged and excluded rather than failing the whole comparison, so one
//! broken provider never hides the others.

use std::cmp::Ordering;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::join;
use tracing::{error, info, warn};

use crate::config::phases::ScalingPhase;
use crate::core::providers::{CloudProvider, ProviderRegistry};
use crate::core::types::{
    CloudRegion, CostEstimate, CostOptions, Level, ServiceRecommendation, ServiceRequirements,
    ValidationIssue, ValidationResult,
};
use crate::utils::error::{EngineError, Result};

const COST_WEIGHT: f64 = 0.4;
const PERFORMANCE_WEIGHT: f64 = 0.3;
const REGION_WEIGHT: f64 = 0.2;
const FEATURE_WEIGHT: f64 = 0.1;

/// Sub-score above which a strength is listed
const PRO_THRESHOLD: f64 = 7.0;
/// Sub-score below which a weakness is listed
const CON_THRESHOLD: f64 = 5.0;

/// What the caller cares about when choosing a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionCriteria {
    /// Weigh cost into the score
    pub cost_optimization: bool,
    /// Required performance level
    pub performance_requirements: Level,
    /// Preferred region identifiers, matched by substring
    pub region_preferences: Vec<String>,
    /// Compliance tags the deployment must satisfy
    pub compliance_requirements: Vec<String>,
    /// Provider that wins unconditionally when registered
    pub preferred_provider: Option<String>,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            cost_optimization: true,
            performance_requirements: Level::Medium,
            region_preferences: Vec::new(),
            compliance_requirements: Vec::new(),
            preferred_provider: None,
        }
    }
}

/// One provider's evaluation against the criteria
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderComparison {
    pub provider: String,
    pub cost_estimate: CostEstimate,
    pub recommendations: Vec<ServiceRecommendation>,
    pub regions: Vec<CloudRegion>,
    /// Weighted score, rounded to one decimal
    pub score: f64,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Comparison engine over a provider registry
pub struct ComparisonEngine {
    registry: Arc<ProviderRegistry>,
}

impl ComparisonEngine {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Evaluate every registered provider, excluding the ones that fail.
    ///
    /// Results follow registration order.
    pub async fn compare(
        &self,
        phase: ScalingPhase,
        region: &str,
        criteria: &SelectionCriteria,
    ) -> Vec<ProviderComparison> {
        info!(%phase, region, "Comparing providers");

        let evaluations = join_all(self.registry.iter().map(|provider| async move {
            (
                provider.name(),
                self.evaluate(provider, phase, region, criteria).await,
            )
        }))
        .await;

        let mut comparisons = Vec::with_capacity(evaluations.len());
        for (name, evaluation) in evaluations {
            match evaluation {
                Ok(comparison) => comparisons.push(comparison),
                Err(e) => {
                    error!(provider = name, error = %e, "Failed to evaluate provider");
                }
            }
        }
        comparisons
    }

    /// Pick the best provider for the criteria.
    ///
    /// A registered preferred provider wins unconditionally. Otherwise the
    /// highest score wins, with ties going to the earlier registration.
    pub async fn select_optimal(
        &self,
        phase: ScalingPhase,
        region: &str,
        criteria: &SelectionCriteria,
    ) -> Result<String> {
        if let Some(preferred) = &criteria.preferred_provider {
            if self.registry.is_supported(preferred) {
                info!(provider = %preferred, "Using preferred provider");
                return Ok(preferred.clone());
            }
            warn!(provider = %preferred, "Preferred provider not supported");
        }

        let mut comparisons = self.compare(phase, region, criteria).await;
        // Stable sort keeps registration order within equal scores
        comparisons.sort_by(|a, b| {
            b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
        });

        let best = comparisons.into_iter().next().ok_or_else(|| {
            EngineError::InvalidRequest("No provider could be evaluated".to_string())
        })?;
        info!(provider = %best.provider, score = best.score, "Selected optimal provider");
        Ok(best.provider)
    }

    /// Regions of every provider that can report them, in registration order.
    pub async fn all_regions(&self) -> Vec<(String, Vec<CloudRegion>)> {
        let fetched = join_all(
            self.registry
                .iter()
                .map(|provider| async move { (provider.name(), provider.regions().await) }),
        )
        .await;

        let mut results = Vec::with_capacity(fetched.len());
        for (name, regions) in fetched {
            match regions {
                Ok(regions) => results.push((name.to_string(), regions)),
                Err(e) => {
                    error!(provider = name, error = %e, "Failed to get regions");
                }
            }
        }
        results
    }

    /// Cost estimates from every provider that can produce one.
    pub async fn all_estimates(
        &self,
        phase: ScalingPhase,
        region: &str,
        options: &CostOptions,
    ) -> Vec<(String, CostEstimate)> {
        info!(%phase, region, "Collecting cost estimates from all providers");

        let fetched = join_all(self.registry.iter().map(|provider| async move {
            (
                provider.name(),
                provider.estimate_cost(phase, region, options).await,
            )
        }))
        .await;

        let mut results = Vec::with_capacity(fetched.len());
        for (name, estimate) in fetched {
            match estimate {
                Ok(estimate) => results.push((name.to_string(), estimate)),
                Err(e) => {
                    error!(provider = name, error = %e, "Failed to get cost estimate");
                }
            }
        }
        results
    }

    /// Validate a phase/region pair against every provider. A provider whose
    /// validation call itself fails is reported as invalid.
    pub async fn validate_all(
        &self,
        phase: ScalingPhase,
        region: &str,
    ) -> Vec<(String, ValidationResult)> {
        let fetched = join_all(self.registry.iter().map(|provider| async move {
            (provider.name(), provider.validate(phase, region).await)
        }))
        .await;

        fetched
            .into_iter()
            .map(|(name, result)| {
                let result = result.unwrap_or_else(|e| {
                    error!(provider = name, error = %e, "Validation call failed");
                    ValidationResult::new(
                        vec![ValidationIssue {
                            field: "provider".to_string(),
                            message: format!("Validation failed: {e}"),
                        }],
                        Vec::new(),
                        Vec::new(),
                    )
                });
                (name.to_string(), result)
            })
            .collect()
    }

    async fn evaluate(
        &self,
        provider: &Arc<dyn CloudProvider>,
        phase: ScalingPhase,
        region: &str,
        criteria: &SelectionCriteria,
    ) -> Result<ProviderComparison> {
        let options = CostOptions::for_phase(phase);
        let requirements = ServiceRequirements {
            performance_level: criteria.performance_requirements,
            ..Default::default()
        };

        let (cost_estimate, recommendations, regions) = join!(
            provider.estimate_cost(phase, region, &options),
            provider.recommendations(phase, &requirements),
            provider.regions(),
        );
        let (cost_estimate, recommendations, regions) =
            (cost_estimate?, recommendations?, regions?);

        let name = provider.name();
        let mut score = 0.0;
        let mut pros = Vec::new();
        let mut cons = Vec::new();

        if criteria.cost_optimization {
            let cost_score = cost_score(name, cost_estimate.total_monthly_cost);
            score += cost_score * COST_WEIGHT;
            if cost_score > PRO_THRESHOLD {
                pros.push("Excellent cost optimization".to_string());
            } else if cost_score < CON_THRESHOLD {
                cons.push("Higher costs compared to alternatives".to_string());
            }
        }

        let performance_score = performance_score(name, criteria.performance_requirements);
        score += performance_score * PERFORMANCE_WEIGHT;
        if performance_score > PRO_THRESHOLD {
            pros.push("High performance capabilities".to_string());
        } else if performance_score < CON_THRESHOLD {
            cons.push("Limited performance options".to_string());
        }

        let region_score = region_score(&regions, &criteria.region_preferences);
        score += region_score * REGION_WEIGHT;
        if region_score > PRO_THRESHOLD {
            pros.push("Excellent regional coverage".to_string());
        } else if region_score < CON_THRESHOLD {
            cons.push("Limited regional availability".to_string());
        }

        let feature_score = feature_score(name);
        score += feature_score * FEATURE_WEIGHT;
        if feature_score > PRO_THRESHOLD {
            pros.push("Comprehensive feature set".to_string());
        } else if feature_score < CON_THRESHOLD {
            cons.push("Limited feature offerings".to_string());
        }

        Ok(ProviderComparison {
            provider: name.to_string(),
            cost_estimate,
            recommendations,
            regions,
            score: (score * 10.0).round() / 10.0,
            pros,
            cons,
        })
    }
}

/// Cost sub-score in [1, 10]: the further below its baseline a provider
/// bills, the higher the score.
fn cost_score(provider: &str, monthly_cost: f64) -> f64 {
    let baseline = match provider {
        "linode" => 100.0,
        "aws" => 130.0,
        _ => 115.0,
    };
    let ratio = baseline / monthly_cost;
    (ratio * 5.0).clamp(1.0, 10.0)
}

fn performance_score(provider: &str, requirements: Level) -> f64 {
    match (provider, requirements) {
        ("aws", Level::Low) => 8.0,
        ("aws", Level::Medium) => 9.0,
        ("aws", Level::High) => 10.0,
        ("linode", Level::Low) => 9.0,
        ("linode", Level::Medium) => 8.0,
        ("linode", Level::High) => 7.0,
        _ => 5.0,
    }
}

/// Region sub-score: fraction of preferences matched by substring, scaled to
/// [0, 10]; no preferences scores a neutral 8.
fn region_score(regions: &[CloudRegion], preferences: &[String]) -> f64 {
    if preferences.is_empty() {
        return 8.0;
    }
    let matching = preferences
        .iter()
        .filter(|pref| regions.iter().any(|r| r.id.contains(pref.as_str())))
        .count();
    ((matching as f64 / preferences.len() as f64) * 10.0).round()
}

fn feature_score(provider: &str) -> f64 {
    match provider {
        "aws" => 10.0,
        "linode" => 7.0,
        _ => 5.0,
    }
}
