//! The `VisitGenerator` trait — where does this agent go this timestep?

use epi_core::Timestep;
use epi_events::Visit;
use epi_risk::RiskScore;

/// Produces the raw visits of one agent for one timestep.
///
/// Implementations append to `visits` in a stable order: visits are
/// back-to-back and together cover `[timestep.start, timestep.end)`.
/// `agent_uuid` and `health_state` are left at their defaults — the agent
/// layer fills them in (after splitting at health-transition boundaries),
/// so generators stay ignorant of the disease progression.
///
/// Implementations own their RNG, hence `&mut self`; each agent owns its
/// instance.
pub trait VisitGenerator: Send {
    fn generate_visits(
        &mut self,
        timestep: &Timestep,
        risk_score: &dyn RiskScore,
        visits: &mut Vec<Visit>,
    );
}
