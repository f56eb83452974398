//! # Oura Explorer
//!
//! A terminal explorer for the Oura ring API.
//!
//! ## Features
//! - Fixed catalog of Oura v2 collection endpoints (replaceable from YAML)
//! - Date / datetime range inputs pre-filled with a lookback window
//! - Single-flight fetch with idle / loading / success / error states
//! - Explicit policy for responses that arrive after a newer fetch
//! - JSON syntax highlighting
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod messages;
pub mod network;
pub mod params;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState, RequestState};
pub use catalog::{EndpointCatalog, EndpointDescriptor, ParamSchema};
pub use config::{Settings, StalePolicy};
pub use display::DisplayPanel;
pub use error::{CatalogError, FetchError, TransportError};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use network::{HttpTransport, NetworkActor, Transport};
pub use params::{Field, InputState, QueryParams};
