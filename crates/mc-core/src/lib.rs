//! Core types and trait definitions for Mission Control.
//!
//! Every module of the dashboard (tasks, content pipeline, media library,
//! memory bank, calendar, team roster, activity log) is a collection of
//! documents. This crate defines those documents, the [`store::RecordStore`]
//! abstraction they are persisted through, and the [`view`] engine that turns
//! a raw record list into the ordered sequence a screen renders.
//!
//! This crate is deliberately free of HTTP and database dependencies.

pub mod activity;
pub mod calendar;
pub mod content;
pub mod error;
pub mod media;
pub mod memory;
pub mod record;
pub mod seed;
pub mod stats;
pub mod store;
pub mod task;
pub mod team;
pub mod view;

pub use error::{Classify, Error, ErrorKind, Result};
