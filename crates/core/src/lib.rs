//! # Meets Core
//!
//! Domain types and the scheduling engine: time-window parsing, organizer
//! resolution, conflict detection, occupancy aggregation and the
//! create/update orchestration that ties them to a [`repository::MeetRepository`].

pub mod availability;
pub mod conflict;
pub mod errors;
pub mod locks;
pub mod models;
pub mod organizer;
pub mod repository;
pub mod service;
pub mod window;
