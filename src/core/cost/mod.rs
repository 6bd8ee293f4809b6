//! Cost comparison and financial analysis

pub mod calculator;
pub mod types;

pub use calculator::CostCalculator;
pub use types::{
    CostBreakdownComparison, CostOptimizationSuggestion, CostProjection, CostRecommendation,
    DetailedCostComparison, PhaseComparisonSummary, PhaseSavingsRow, ProviderCosts, RoiAnalysis,
    SwitchRecommendation, TcoComparison, TcoResult, TcoYear, Timeframe, TotalSavings,
};
