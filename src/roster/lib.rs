//! # Roster Architecture
//!
//! Roster is the state layer of a small user-management UI: a light/dark
//! theme preference and a list of users, each held in a reactive store and
//! written through to origin-scoped key-value storage on every change.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Parses arguments, prints, owns stdout/stderr/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Initializes the stores once, dispatches to commands      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Add/edit/delete users, id allocation, theme controls     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Stores (theme.rs, users.rs on top of reactive.rs)          │
//! │  - Hold state, notify subscribers, write through            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Platform (platform/, store/)                               │
//! │  - Injected storage, OS color scheme, display               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Errors From Stores
//!
//! Stores always come up with a usable value. Missing collaborators mean
//! defaults; unreadable persisted values mean defaults plus a
//! [`diagnostics::Diagnostic`]. Errors ([`error::RosterError`]) only appear
//! from the command layer up, for things a user did wrong, and from the
//! storage backends themselves.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: User and theme operations
//! - [`theme`]: `ThemeStore`
//! - [`users`]: `UserStore` and `NextIdStore`
//! - [`reactive`]: The `Writable` container the stores are built on
//! - [`platform`]: Injected collaborators and the `Platform` bundle
//! - [`store`]: Key-value storage backends
//! - [`model`]: `Theme`, `Role`, `User`, `FormData`
//! - [`diagnostics`]: Structured record of recovered failures
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod platform;
pub mod reactive;
pub mod store;
pub mod theme;
pub mod users;
