#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Conversation controller for the chat widget.
//!
//! The controller owns the transcript and the view state of one widget
//! instance. It sends each submitted message to a [`quikr_core::ChatBackend`]
//! and appends the parsed reply, or a connection-error entry, when the call
//! completes.
//!
//! # Key Features
//! - Append-only transcript with quick-reply chips that expire on the next message
//! - Home view with starter prompts, chat view with the live transcript
//! - Late replies after teardown are dropped
//! - Terminal rendering and an interactive stdin loop

mod controller;
mod interactive;
pub mod render;
mod settings;
mod transcript;

pub use controller::{
    ConversationController, ConversationError, SubmitOutcome, WidgetSnapshot, WidgetTab,
    WidgetView,
};
pub use settings::WidgetSettings;
pub use transcript::Transcript;
