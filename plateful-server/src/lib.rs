//! plateful-server: HTTP backend for recipe generation
//!
//! Holds the provider credential server-side so browser and CLI
//! clients never see it.

pub mod http;
