//! Aggregation rollups over visible project sets.
//!
//! All arithmetic runs on raw whole-rupee values; lakh/crore conversion
//! happens only when a display row is built. Inputs are assumed to be
//! already visibility-filtered — these functions never re-check scope.

pub mod district;
pub mod fund_flow;
pub mod kpi;

pub use district::{DistrictComparison, district_comparison};
pub use fund_flow::{FundFlowRow, FundTotals, district_fund_flow, fund_totals, state_fund_flow};
pub use kpi::{KpiSummary, compute_kpis};
