//! JSON and binary (bincode) save/load helpers.

use crate::config_box::ConfigBox;
use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Save `data` as JSON pretty-printed with a 4-space indent.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    std::fs::write(path, &buf)?;

    tracing::info!(path = %path.display(), "json file saved");
    Ok(())
}

/// Load a JSON object into a [`ConfigBox`].
pub fn load_json(path: &Path) -> Result<ConfigBox> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let config = ConfigBox::from_value(value)?;

    tracing::info!(path = %path.display(), "json file loaded successfully");
    Ok(config)
}

/// Serialize any value into a binary file with `bincode`.
///
/// The format carries no version or schema information.
pub fn save_bin<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let mut writer = BufWriter::new(std::fs::File::create(path)?);
    bincode::serialize_into(&mut writer, data)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), "binary file saved");
    Ok(())
}

/// Load a value previously written by [`save_bin`].
pub fn load_bin<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(std::fs::File::open(path)?);
    let data = bincode::deserialize_from(reader)?;

    tracing::info!(path = %path.display(), "data loaded from binary file");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClassifierError, FormatError};
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Scores {
        loss: f64,
        accuracy: f64,
        per_class: HashMap<String, u32>,
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        let data = json!({
            "loss": 0.42,
            "accuracy": 0.87,
            "classes": ["cbb", "cbsd", "cgm", "cmd", "healthy"],
            "nested": { "epochs": 10 }
        });

        save_json(&path, &data).unwrap();
        let loaded = load_json(&path).unwrap();
        assert_eq!(serde_json::Value::Object(loaded.into_inner()), data);
    }

    #[test]
    fn test_json_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        save_json(&path, &json!({ "outer": { "inner": 1 } })).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"outer\": {\n        \"inner\": 1\n    }\n}");
    }

    #[test]
    fn test_load_json_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::Format(FormatError::Json(_))));
    }

    #[test]
    fn test_bin_roundtrip_struct() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.bin");
        let mut per_class = HashMap::new();
        per_class.insert("healthy".to_string(), 2577);
        per_class.insert("cmd".to_string(), 13158);
        let data = Scores {
            loss: 0.31,
            accuracy: 0.9,
            per_class,
        };

        save_bin(&path, &data).unwrap();
        let loaded: Scores = load_bin(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_load_bin_incompatible_blob() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short.bin");
        // Too short to hold the u64 length prefix of a Vec.
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        let err = load_bin::<Vec<String>>(&path).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::Format(FormatError::Binary(_))
        ));
    }
}
