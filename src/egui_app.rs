//! Shared egui UI modules.
/// Form controller bridging core logic to the egui UI.
pub mod controller;
/// Background fetch jobs and their settlement messages.
pub mod jobs;
/// Form state.
pub mod state;
/// egui renderer for the form.
pub mod ui;
