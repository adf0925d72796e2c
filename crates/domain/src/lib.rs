//! # voicehome-domain
//!
//! Pure domain model for the voicehome smart-home assistant.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Rooms** and their **Colors**
//! - Define the **Home state** (three light switches, current song, room colors)
//! - Define **Announcements** (text that is spoken and shown to observers)
//! - Define the **Listening status** state machine
//! - Define **Events** pushed to real-time observers
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod announcement;
pub mod color;
pub mod event;
pub mod home;
pub mod listening;
pub mod room;
