//! landmark-service: describe landmark photos and look up landmark trivia
//! through the Gemini generative API.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
