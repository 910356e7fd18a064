//! # Movie Data Crate
//!
//! Domain types and the local fallback catalog for the moodreel workspace.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Genre, MovieRecord)
//! - **catalog**: Load, validate, and index the fallback catalog
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use movie_data::{Genre, MovieCatalog};
//!
//! // The bundled catalog is always available
//! let catalog = MovieCatalog::builtin()?;
//!
//! let comedies = catalog.by_genre(Genre::Comedy);
//! println!("{} comedies on hand", comedies.len());
//! ```

// Public modules
pub mod catalog;
pub mod error;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::MovieCatalog;
pub use error::{CatalogError, Result};
pub use types::{Genre, MovieRecord};
