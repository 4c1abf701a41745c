//! Palettes: data types, the catalog, random cycling and favorites.

pub mod catalog;
pub mod cycler;
pub mod favorites;
pub mod types;

pub use catalog::{CatalogSource, RemoteCatalog};
pub use cycler::PaletteCycler;
pub use favorites::FavoritesStore;
pub use types::{ColorTriple, Palette, PALETTE_SIZE};
