//! `epi-events` — the typed event records exchanged between agents and
//! locations, and the broker channel they travel through.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`health`]  | `HealthState`, `HealthTransition`                            |
//! | [`records`] | `Exposure`, `Contact`, `Visit`, `InfectionOutcome`, `ContactReport`, `TestResult` |
//! | [`broker`]  | `Broker<T>` trait, `VecBroker`, `BufferingBroker`            |
//! | [`micro`]   | Per-minute distance-bucket exposure counts                   |
//!
//! Cross-agent influence flows only through these records: agents never
//! reference one another directly.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all record types. |

pub mod broker;
pub mod health;
pub mod micro;
pub mod records;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use broker::{Broker, BufferingBroker, VecBroker};
pub use health::{HealthState, HealthTransition};
pub use micro::{micro_exposure_counts, MicroExposureGenerator, MICRO_EXPOSURE_BUCKETS};
pub use records::{
    Contact, ContactReport, Exposure, ExposureType, InfectionOutcome, TestResult, Visit,
};
