pub mod image;

pub use image::PostgresImageRepository;
