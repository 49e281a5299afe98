//! `epi-agent` — the per-agent epidemic state machine.
//!
//! A [`SeirAgent`] ties the framework's seams together.  Per timestep the
//! host calls, in order and for every agent:
//!
//! ```text
//! ① process_infection_outcomes — ingest last timestep's exposures; a first
//!                                exposure may schedule the disease path
//! ② compute_visits             — advance the state machine, generate
//!                                visits, split them at transition
//!                                boundaries, send via Broker<Visit>
//! ③ update_contact_reports     — ingest peer notifications, resolve and
//!                                request tests, broadcast positives, prune
//!                                retained contacts
//! ```
//!
//! Agents never reference each other: cross-agent influence flows only
//! through the typed batches the host routes between them.  Each agent owns
//! its models and collections outright, so populations parallelize with no
//! shared mutable state (the transmission model is the one shared reference
//! and synchronizes internally).

pub mod agent;


pub use agent::SeirAgent;
