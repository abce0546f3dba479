mod image_storage;

pub use image_storage::{ImageStorage, UploadedImage};
