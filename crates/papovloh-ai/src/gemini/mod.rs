//! Google Gemini / Imagen client.
//!
//! Implements `GenerationGateway` over the Generative Language REST API.

mod api;
mod client;
mod config;

pub use client::GeminiClient;
pub use config::GeminiConfig;
