//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate journal mutations that involve background work.
//! - Keep presentation layers decoupled from task scheduling details.

pub mod note_service;
