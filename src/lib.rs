//! # Risp Client
//!
//! Command-line client for a Risp search and indexing backend.
//!
//! The platform-neutral pieces (wire models, highlight resolution, result
//! composition, list/selection/modal state machines) live in
//! [`risp_client_core`]. This crate adds what needs a runtime: the HTTP
//! transport, async screen orchestration, text rendering, and the CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌────────────────────┐
//! │ CLI/REPL │──▶│   Screens    │──▶│  RispApi (HttpApi) │──▶ backend
//! │  (risp)  │   │ list, dialog │   │ POST /rpc/{Method} │
//! └──────────┘   └──────┬───────┘   └────────────────────┘
//!                       │
//!                       ▼
//!            ┌─────────────────────┐
//!            │  risp-client-core   │
//!            │ compose · selection │
//!            │ list · modal · shell│
//!            └─────────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and env overrides |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`client`] | HTTP transport for the RPC contract |
//! | [`open`] | Platform URI opener |
//! | [`screen`] | Async list screens, dialogs, and save events |
//! | [`contexts`] | Contexts screen |
//! | [`sources`] | Sources screen |
//! | [`resources`] | Resources screen |
//! | [`search`] | Search screen and result rendering |
//! | [`repl`] | Interactive loop |

pub mod client;
pub mod config;
pub mod contexts;
pub mod logging;
pub mod open;
pub mod repl;
pub mod resources;
pub mod screen;
pub mod search;
pub mod sources;
