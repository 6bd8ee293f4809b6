//! # CloudCost-RS
//!
//! Cloud provider cost-modeling and decision engine. Models AWS and Linode
//! pricing across launch, growth and scale phases, scores the providers
//! against weighted selection criteria, and assembles full comparison
//! reports with projections, ROI and migration analysis.
//!
//! ## Features
//!
//! - **Deterministic Pricing**: Catalog-driven cost estimates per scaling phase
//! - **Multi-Provider**: AWS and Linode adapters behind one async trait
//! - **Weighted Scoring**: Cost, performance, region and feature criteria
//! - **Financial Analysis**: Projections, switching ROI, multi-year TCO
//! - **Trend Forecasting**: Seasonal factors and six-month cost forecasts
//! - **Report Orchestration**: One request, one complete comparison report
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloudcost_rs::{CloudCostEngine, CostAnalysisRequest, ScalingPhase};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = CloudCostEngine::new();
//!
//!     let request = CostAnalysisRequest::new(ScalingPhase::Growth, "us-east-1");
//!     let report = engine.compare_costs(&request).await?;
//!
//!     println!(
//!         "Recommended: {} (${:.2}/month savings)",
//!         report.summary.recommended_provider,
//!         report.summary.potential_monthly_savings
//!     );
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod utils;

pub use crate::config::phases::{PhaseDescriptor, ResourceTier, ScalingPhase};
pub use crate::config::EngineSettings;
pub use crate::core::comparison::{ComparisonEngine, ProviderComparison, SelectionCriteria};
pub use crate::core::cost::{
    CostCalculator, CostProjection, DetailedCostComparison, RoiAnalysis, SwitchRecommendation,
    TcoComparison, Timeframe,
};
pub use crate::core::engine::{CloudCostEngine, CostImpact, MigrationPlan};
pub use crate::core::providers::{
    AwsProvider, CloudProvider, LinodeProvider, ProviderKind, ProviderRegistry,
};
pub use crate::core::report::{
    ConfidenceLevel, CostAnalysisRequest, CostComparisonReport, MigrationRecommendation,
    ReportBuilder,
};
pub use crate::core::trends::{MonthlyCost, TrendAnalysis, TrendAnalyzer, TrendDirection};
pub use crate::core::types::{
    CloudRegion, CostBreakdown, CostEstimate, CostOptions, Level, ServiceCategory,
    ServiceRecommendation, UsagePattern, ValidationResult,
};
pub use crate::utils::error::{EngineError, Result};
