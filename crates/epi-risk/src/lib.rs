//! `epi-risk` — the per-agent policy seam.
//!
//! A risk score observes everything that happens to its agent (health
//! transitions, exposures, notifications from contacts, test results) and
//! answers the agent's policy questions: how to adjust visits, whether to
//! request a test, and what to do with contact reports.
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`score`]   | `RiskScore` trait + policy value types                    |
//! | [`null`]    | `NullRiskScore` — observes nothing, changes nothing       |
//! | [`tracing`] | `TracingRiskScore` — test/trace/isolate guidance          |
//! | [`error`]   | `RiskError`, `RiskResult`                                 |

pub mod error;
pub mod null;
pub mod score;
pub mod tracing;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RiskError, RiskResult};
pub use null::NullRiskScore;
pub use score::{ContactTracingPolicy, RiskScore, TestPolicy, VisitAdjustment};
pub use tracing::{LocationKind, LocationKindFn, TracingRiskScore, TracingRiskScoreConfig};
