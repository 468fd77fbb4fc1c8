//! MindMate - mood journaling core.
//!
//! # Overview
//!
//! Free text goes in. A keyword lexicon assigns it a mood label, a fixed
//! confidence and a list of coping tips. The result is appended to a local,
//! append-only history. Analytics over that history (distribution, weekly
//! pattern, trend, streak) are recomputed from scratch on every request.
//!
//! # Modules
//!
//! - [`model`]: Mood labels, journal entries, and derived projections
//! - [`lexicon`]: Keyword classifier and coping-tip tables
//! - [`storage`]: SQLite key-value storage for the history blob
//! - [`journal`]: Submission pipeline (validate, classify, record)
//! - [`aggregation`]: Analytics over the history
//! - [`remote`]: Client for the remote analyze endpoint
//! - [`meditation`]: Breathing session countdown driven by external ticks
//! - [`api`]: HTTP API handlers

pub mod aggregation;
pub mod api;
pub mod journal;
pub mod lexicon;
pub mod meditation;
pub mod model;
pub mod remote;
pub mod storage;
