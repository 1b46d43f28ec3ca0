//! voice-ask - voice question-answering client
//!
//! This crate provides the core functionality for recording a spoken
//! question from the microphone, posting it (base64-encoded) to a remote
//! answer endpoint, and rendering the returned answer as transcript text
//! plus playable audio.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: The ask use case (interaction state machine) and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, HTTP endpoint, rodio, notifications, config)
//! - **CLI**: Command-line interface, argument parsing, and terminal presentation

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
