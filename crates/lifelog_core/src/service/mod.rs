//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and view queries into screen-level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod log_service;
