//! Arrange a flat image folder into one sub-folder per class label.

use crate::error::{FormatError, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Component, Path};

/// Labels CSV expected next to the image folder.
pub const LABELS_FILE_NAME: &str = "train.csv";
/// Folder holding the images named in the labels CSV.
pub const IMAGES_DIR_NAME: &str = "train_images";

#[derive(Debug, Deserialize)]
struct LabelRecord {
    image_id: String,
    label: String,
}

/// What [`separate_and_move_images`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparationSummary {
    /// Distinct labels, sorted; one directory was created for each.
    pub labels: Vec<String>,
    /// Number of images moved.
    pub moved: usize,
}

/// Move every image listed in `<data_dir>/train.csv` from
/// `<data_dir>/train_images/<image_id>` into
/// `<data_dir>/train_images/<label>/<image_id>`.
///
/// Every `image_id` and `label` must be a plain file name; a row that names
/// a path (`a/b`, `..`, an absolute path) fails the whole call before any
/// directory is created.
///
/// Files are moved, not copied. A second run fails as soon as it reaches an
/// image that is no longer at its original location.
pub fn separate_and_move_images(data_dir: &Path) -> Result<SeparationSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(data_dir.join(LABELS_FILE_NAME))?;
    let records = reader
        .deserialize::<LabelRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    for record in &records {
        check_file_name("image_id", &record.image_id)?;
        check_file_name("label", &record.label)?;
    }

    let images_dir = data_dir.join(IMAGES_DIR_NAME);
    let labels: BTreeSet<&str> = records.iter().map(|r| r.label.as_str()).collect();
    for label in &labels {
        std::fs::create_dir_all(images_dir.join(label))?;
    }

    for record in &records {
        let from = images_dir.join(&record.image_id);
        let to = images_dir.join(&record.label).join(&record.image_id);
        std::fs::rename(&from, &to)?;
    }

    tracing::info!(
        images = records.len(),
        labels = labels.len(),
        dir = %images_dir.display(),
        "images separated by label"
    );

    Ok(SeparationSummary {
        labels: labels.into_iter().map(str::to_string).collect(),
        moved: records.len(),
    })
}

fn check_file_name(field: &'static str, value: &str) -> Result<()> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(FormatError::UnsafePath {
            field,
            value: value.to_string(),
        }
        .into()),
    }
}
