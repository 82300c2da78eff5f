// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod enrichment_service;
pub mod gemini_client;
pub mod google_places_client;
pub mod normalizer;

pub use enrichment_service::*;
pub use gemini_client::*;
pub use google_places_client::*;
pub use normalizer::*;
