//! Data layer: core types, loading, and selection.
//!
//! Architecture:
//! ```text
//!  .csv / .xlsx / .xls
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → date-indexed Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   Table   │  Vec<Series>, unique column names
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  select   │  validated column subset → SelectedView
//!   └──────────┘
//! ```
pub mod loader;
pub mod model;
pub mod select;
