//! wbx_rs
//!
//! Pair two World Bank "dimensions" (time, country, or an economic
//! indicator) and turn the remote data into exactly the shape that pairing
//! needs: dense per-country line series, latest-value bars, or a full
//! country x indicator matrix.
//!
//! ### Features
//! - Closed dimension registry with continuous/discrete kinds and the
//!   shape-per-pair rule (line, vertical/horizontal bar, table)
//! - Pre-fetch validation of year ranges and country selections
//! - Async World Bank API client (country catalog + indicator series)
//!   behind a mockable [`SeriesSource`] trait
//! - Pure aggregation that keeps missing values as gaps, never zeros
//! - SVG/PNG renderers plus HTML/CSV/JSON export for the shaped output
//!
//! ### Example
//! ```no_run
//! use wbx_rs::{Client, SelectionState, dispatch};
//!
//! # async fn run() -> Result<(), wbx_rs::WbxError> {
//! let client = Client::default();
//! let mut state = SelectionState::default(); // X = time, Y = GDP growth
//! for country in client.fetch_countries().await? {
//!     if country.code == "USA" || country.code == "DEU" {
//!         state.toggle_country(country);
//!     }
//! }
//! let output = dispatch::generate(&client, &state).await?;
//! # let _ = output;
//! # Ok(()) }
//! ```

pub mod aggregate;
pub mod api;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod models;
pub mod present;
pub mod registry;
pub mod resolve;
pub mod session;
pub mod telemetry;
pub mod viz;

pub use api::{Client, SeriesSource};
pub use error::{WbxError, WbxResult};
pub use models::{Country, Observation, YearRange};
pub use present::{BarChartSpec, ChartOutput, LineChartSpec, Orientation, TableSpec};
pub use registry::{ChartShape, Dimension, DimensionKind, chart_shape_for};
pub use session::{Catalog, SelectionState};
