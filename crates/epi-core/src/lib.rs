//! `epi-core` — foundational types for the `epi` agent framework.
//!
//! This crate is a dependency of every other `epi-*` crate.  It intentionally
//! has no `epi-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `AgentUuid`, `LocationUuid`                       |
//! | [`time`]  | `SimTime`, `SimDuration`, `Timestep`              |
//! | [`rng`]   | `ModelRng` (per-model deterministic RNG)          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{AgentUuid, LocationUuid};
pub use rng::ModelRng;
pub use time::{SimDuration, SimTime, Timestep};
