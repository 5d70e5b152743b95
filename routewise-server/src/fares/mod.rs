//! Fare dataset loading.
//!
//! Reads contract fare files (CSV with a header row) into fare rows and
//! builds the fare graph from them. Only the airport and fare columns are
//! used; the optional effective/expiration dates can restrict the dataset
//! to fares valid on a given day.

mod error;
mod loader;

pub use error::LoadError;
pub use loader::{
    DESTINATION_COLUMN, EFFECTIVE_COLUMN, EXPIRATION_COLUMN, FareClass, LoaderConfig,
    ORIGIN_COLUMN, load_graph, read_fare_rows,
};
