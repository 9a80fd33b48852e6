//! Stateless helpers shared by every pipeline stage.

pub mod dataset;
pub mod fs;
pub mod image;
pub mod serialization;

pub use dataset::{SeparationSummary, separate_and_move_images};
pub use fs::{create_directories, get_size, read_yaml};
pub use image::{decode_image, encode_image_into_base64};
pub use serialization::{load_bin, load_json, save_bin, save_json};
