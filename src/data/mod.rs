//! Data layer: table types, loading/cleaning, and outlier filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Table, impute means, drop duplicates
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Table    │  named columns of Value cells
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  IQR inlier bound per column → filtered Table
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
