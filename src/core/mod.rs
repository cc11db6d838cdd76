//! Core library components.
//!
//! The environment-to-template pipeline: validation, classification,
//! template augmentation, parameter relay, and local expansion.

pub mod config;
pub mod constants;
pub mod domain;
pub mod env;
pub mod expr;
pub mod lifecycle;
pub mod local;
pub mod naming;
pub mod runtime;
pub mod secrets;
pub mod template;
pub mod types;
pub mod validation;
