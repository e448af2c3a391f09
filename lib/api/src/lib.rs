//! # Pep-Talk API
//!
//! actix-web REST surface over the matcher, the stack engine and the
//! storage layer. All engines are built once at startup and shared
//! read-only through [`AppState`].

pub mod rest;
pub mod state;

pub use rest::RestApi;
pub use state::{AppState, Tuning};
