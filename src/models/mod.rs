pub mod movie;

pub use movie::{CatalogPage, Movie, IMAGE_BASE_URL};
