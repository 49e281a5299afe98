//! Disease progression: the `TransitionModel` seam and a probabilistic timed
//! transition system over it.

use epi_core::{ModelRng, SimDuration};
use epi_events::{HealthState, HealthTransition};
use rand_distr::Gamma;

use crate::error::{ModelError, ModelResult};

// ── TransitionModel ───────────────────────────────────────────────────────────

/// Computes the next state transition given the latest one.
///
/// Contract: `result.time >= latest.time` for a real transition; a terminal
/// state is signaled by `result.time == SimTime::INFINITE`.  The agent
/// normalizes mild violations (see the agent's advance loop) but a model
/// should not rely on that.
///
/// Implementations own their RNG, hence `&mut self`; each agent owns its
/// instance.
pub trait TransitionModel: Send {
    fn next_transition(&mut self, latest: &HealthTransition) -> HealthTransition;
}

// ── PttsTransitionModel ───────────────────────────────────────────────────────

/// One weighted edge of the transition diagram.
struct Edge {
    from: HealthState,
    to: HealthState,
    weight: f32,
    /// Dwell time in the `from` state before crossing this edge, in days.
    dwell_days: Gamma<f64>,
}

/// A probabilistic timed transition system (PTTS) over health states.
///
/// Each call picks an outgoing edge of the current state in proportion to
/// edge weight, samples the gamma-distributed dwell time in days, and
/// schedules the destination state that far after the latest transition.
/// A state with no outgoing edges is terminal.
///
/// Build with [`PttsTransitionModel::builder`]:
///
/// ```rust,ignore
/// let model = PttsTransitionModel::builder()
///     .edge(HealthState::Exposed, HealthState::Infectious, 1.0, 2.0, 1.5)
///     .edge(HealthState::Infectious, HealthState::Recovered, 0.97, 4.0, 2.0)
///     .edge(HealthState::Infectious, HealthState::Deceased, 0.03, 5.0, 2.0)
///     .build(ModelRng::new(seed, agent_uuid.0))?;
/// ```
pub struct PttsTransitionModel {
    edges: Vec<Edge>,
    rng: ModelRng,
}

impl PttsTransitionModel {
    pub fn builder() -> PttsTransitionModelBuilder {
        PttsTransitionModelBuilder { edges: Vec::new() }
    }
}

impl TransitionModel for PttsTransitionModel {
    fn next_transition(&mut self, latest: &HealthTransition) -> HealthTransition {
        let outgoing: Vec<&Edge> = self
            .edges
            .iter()
            .filter(|e| e.from == latest.health_state)
            .collect();
        let Some(&last) = outgoing.last() else {
            return HealthTransition::unscheduled(latest.health_state);
        };

        let total: f32 = outgoing.iter().map(|e| e.weight).sum();
        let mut pick = self.rng.gen_range(0.0f32..total);
        let mut chosen = last;
        for &edge in &outgoing {
            if pick < edge.weight {
                chosen = edge;
                break;
            }
            pick -= edge.weight;
        }

        let dwell = SimDuration::from_days_f64(self.rng.sample(&chosen.dwell_days));
        HealthTransition {
            time: latest.time + dwell,
            health_state: chosen.to,
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

struct EdgeSpec {
    from: HealthState,
    to: HealthState,
    weight: f32,
    dwell_shape: f64,
    dwell_scale_days: f64,
}

/// Collects edges, then validates them all at [`build`][Self::build] time.
pub struct PttsTransitionModelBuilder {
    edges: Vec<EdgeSpec>,
}

impl PttsTransitionModelBuilder {
    /// Add a `from -> to` edge with relative `weight` and a
    /// `Gamma(dwell_shape, dwell_scale_days)` dwell time in days.
    pub fn edge(
        mut self,
        from: HealthState,
        to: HealthState,
        weight: f32,
        dwell_shape: f64,
        dwell_scale_days: f64,
    ) -> Self {
        self.edges.push(EdgeSpec {
            from,
            to,
            weight,
            dwell_shape,
            dwell_scale_days,
        });
        self
    }

    /// Validate every edge and assemble the model around `rng`.
    pub fn build(self, rng: ModelRng) -> ModelResult<PttsTransitionModel> {
        if self.edges.is_empty() {
            return Err(ModelError::EmptyTransitionDiagram);
        }
        let mut edges = Vec::with_capacity(self.edges.len());
        for spec in self.edges {
            if !(spec.weight > 0.0 && spec.weight.is_finite()) {
                return Err(ModelError::InvalidEdgeWeight {
                    from: spec.from,
                    to: spec.to,
                    weight: spec.weight,
                });
            }
            let dwell_days = Gamma::new(spec.dwell_shape, spec.dwell_scale_days).map_err(
                |source| ModelError::InvalidDwellDistribution {
                    from: spec.from,
                    to: spec.to,
                    source,
                },
            )?;
            edges.push(Edge {
                from: spec.from,
                to: spec.to,
                weight: spec.weight,
                dwell_days,
            });
        }
        Ok(PttsTransitionModel { edges, rng })
    }
}
