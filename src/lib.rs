//! geolookup - login-gated IP geolocation lookup
//!
//! Looks up the geographic location of IPv4/IPv6 addresses through an
//! ipinfo-style service and keeps a persistent, de-duplicated history of the
//! last ten successful searches.
//!
//! # Features
//! - **server**: HTTP API (`/api/login`, `/api/health`), default
//! - **cli**: Command-line interface, default
//! - **tui**: Terminal user interface
//! - **full**: All features enabled
//!
//! # Architecture
//! - `utils`: IP address validation, password hashing
//! - `history`: Search history list, store and drawer selection
//! - `controller`: Lookup state machine shared by every front end
//! - `services`: GeoIP client, client session, database seeder
//! - `storage`: Key-value slots (client) and user repository (server)
//! - `api`: HTTP services and JWT issuing
//! - `interfaces`: User interfaces (CLI, TUI)
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod errors;
pub mod history;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
