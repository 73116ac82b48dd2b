//! Listing pages and the machinery that reads them
//!
//! A listing is a human- or tool-maintained index page advertising a
//! version (and sometimes a date) per component. This module covers the
//! whole path from URL to matched row:
//!
//! ```text
//! ┌──────────┐     ┌──────────────┐     ┌─────────────┐
//! │   page   │────▶│    cache     │────▶│   matcher   │
//! │ (layout) │     │ (one fetch)  │     │ (find row)  │
//! └──────────┘     └──────┬───────┘     └─────────────┘
//!                         ▼
//!                  ┌──────────────┐
//!                  │   document   │
//!                  │ (table model)│
//!                  └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`page`]: known listing URLs and their table column layout
//! - [`document`]: plain data model of a fetched page, built once per fetch
//! - [`cache`]: memoized retrieval, one stored fetch per URL per run
//! - [`matcher`]: locating an artifact's row and reading version/date cells

pub mod cache;
pub mod document;
pub mod matcher;
pub mod page;
