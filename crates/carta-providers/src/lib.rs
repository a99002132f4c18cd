pub mod catalog;
pub mod images;

pub use catalog::{CatalogSource, CsvCatalog};
pub use images::{ImageDir, ImageLookup, NoImages};
