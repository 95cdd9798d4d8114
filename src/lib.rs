//! Filter-and-aggregate pipeline behind the claims dashboard.
//!
//! `data::cache` loads the dataset once, `data::filter` narrows it to a
//! [`ClaimsView`](data::model::ClaimsView), and `metrics`, `data::series` and
//! `format` turn that view into what the window draws.

pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod metrics;

pub use config::{ColumnMapping, DashboardConfig};
pub use data::filter::{apply, EmptySelectionPolicy, FilterSelection, InjuryFilter};
pub use data::model::{ClaimRecord, ClaimsView, Dataset, YesNo};
pub use error::{DashboardError, Result};
pub use metrics::ClaimMetrics;
