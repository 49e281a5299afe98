//! `epi-models` — disease progression and transmission.
//!
//! Two trait seams and one concrete implementation of each:
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`transition`]   | `TransitionModel` trait, `PttsTransitionModel`            |
//! | [`transmission`] | `TransmissionModel` trait, `AggregatedTransmissionModel`  |
//! | [`error`]        | `ModelError`, `ModelResult`                               |
//!
//! A transition model is owned by a single agent and answers "given my
//! latest transition, what happens next?".  A transmission model is shared
//! across the whole population and answers "does this batch of exposures
//! infect the agent, and when?".

pub mod error;
pub mod transition;
pub mod transmission;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ModelError, ModelResult};
pub use transition::{PttsTransitionModel, PttsTransitionModelBuilder, TransitionModel};
pub use transmission::{AggregatedTransmissionModel, TransmissionModel};
