//! `epi-visit` — visit generation.
//!
//! A visit generator decides where an agent spends one timestep, consulting
//! the agent's risk score for per-location adjustments.  Generators fill
//! only locations and intervals; the agent layer stamps identity and health
//! state afterwards.
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`generator`] | `VisitGenerator` trait                                 |
//! | [`duration`]  | `DurationSpecifiedVisitGenerator`, `LocationDuration`  |
//! | [`indexed`]   | `IndexedLocationVisitGenerator`                        |
//! | [`error`]     | `VisitError`, `VisitResult`                            |

pub mod duration;
pub mod error;
pub mod generator;
pub mod indexed;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use duration::{DurationSampler, DurationSpecifiedVisitGenerator, LocationDuration};
pub use error::{VisitError, VisitResult};
pub use generator::VisitGenerator;
pub use indexed::IndexedLocationVisitGenerator;
