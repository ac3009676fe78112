//! # Contactor Architecture
//!
//! Contactor is a **UI-agnostic contacts library** with a CLI client. The
//! core keeps an in-memory contact list in sync with plain JSON files and
//! knows nothing about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The only place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (selector strings → Selector)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, selector resolution, import planning         │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ContactStore: in-memory list, sole writer to storage     │
//! │  - StorageBackend: per-contact files, single blob, memory   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persist, Then Mutate
//!
//! Every change is written to storage before memory is touched. A failed
//! write leaves the in-memory list exactly as it was, so what a client sees
//! is always something that was durably stored. See [`store`] for the write
//! ordering of each operation.
//!
//! ## Testing Strategy
//!
//! 1. **Store** (`store/`): persistence ordering and failure handling, using
//!    `MemBackend` failure injection.
//! 2. **Commands** (`commands/*.rs`): business logic, also on `MemBackend`.
//! 3. **API** (`api.rs`): dispatch and input normalization.
//! 4. **CLI** (`tests/cli_integration.rs`): the binary end to end, with
//!    `CONTACTOR_HOME` pointing at a temp dir.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: business logic for each command
//! - [`store`]: contact store and storage backends
//! - [`model`]: `Contact`, form inputs and device import records
//! - [`validation`]: form checks with per-field messages
//! - [`index`]: alphabetical display indexes and selectors
//! - [`config`]: configuration file
//! - [`init`]: data directory resolution and backend selection
//! - [`error`]: error types
//! - `cli`: argument parsing and rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod store;
pub mod validation;
