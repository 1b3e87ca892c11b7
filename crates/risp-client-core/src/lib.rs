//! # Risp Client Core
//!
//! Platform-neutral logic for the Risp desktop client: wire models for the
//! backend RPC contract, highlight resolution, result composition, and the
//! list/selection/modal state machines shared by every screen.
//!
//! This crate contains no tokio, HTTP, or filesystem I/O. Transports and
//! async orchestration live in the `risp-client` application crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Wire types for the RPC contract |
//! | [`api`] | The [`api::RispApi`] trait and an in-memory backend |
//! | [`icons`] | Icon references for file types, adapters, and resources |
//! | [`highlight`] | Per-type highlight fragment resolution |
//! | [`compose`] | Query hit → render-ready result |
//! | [`selection`] | Multi-select state over a list snapshot |
//! | [`list`] | Load lifecycle with last-response-wins |
//! | [`modal`] | Create/index dialog workflow |
//! | [`shell`] | Shared observable shell state (menu) |

pub mod api;
pub mod compose;
pub mod highlight;
pub mod icons;
pub mod list;
pub mod modal;
pub mod models;
pub mod selection;
pub mod shell;
