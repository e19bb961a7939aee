//! Food journal with dual-format persistence, backups, and nutrition analysis.
//!
//! nutrilog records what was eaten, one [`journal::FoodEntry`] at a time, and
//! keeps every calendar day in two representations:
//!
//! | Representation | Location | Read back |
//! |------|---------|---------------|
//! | **Aggregate** | `state.json` | Eagerly, at open |
//! | **Day document** | `<root>/<date>.md` | Lazily, per day (preferred) |
//! | **Backup archive** | `<root>/backups/<date>_backup_<ts>.json` | On restore |
//!
//! The day document is human-readable Markdown ending in a fenced block with
//! one JSON entry per line; only that block is parsed back.
//!
//! # Architecture
//!
//! - **Storage**: an async [`storage::StorageBackend`] supplied by the host;
//!   [`storage::fs::FsBackend`] on disk, [`storage::memory::MemoryBackend`] in tests
//! - **Cache**: [`journal::EntryStore`] holds entries and summaries per day and
//!   invalidates a day's summary whenever its entries change
//! - **Analysis**: pure functions over summaries: goal progress for one day,
//!   attainment and consistency over a window
//! - **Transport**: CLI subcommands, or MCP over stdio
//!
//! # Modules
//!
//! - [`config`]: configuration loading from TOML files and environment variables
//! - [`error`]: validation and store errors
//! - [`storage`]: persistence backend trait and implementations
//! - [`journal`]: record types, day documents, aggregate state, backups, entry store
//! - [`analysis`]: summary calculator, goal analyzer, trend analyzer

pub mod analysis;
pub mod config;
pub mod error;
pub mod journal;
pub mod storage;
