//! Data ingestion — fetch the dataset archive and unpack it.

use crate::config::DataIngestionConfig;
use crate::error::Result;
use crate::utils::{create_directories, get_size};
use std::io::{self, Write};
use std::path::Path;

/// What [`DataIngestion::download_file`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The archive was fetched from the source URL.
    Downloaded { bytes: u64 },
    /// The archive was already on disk; no request was made.
    AlreadyPresent { bytes: u64 },
}

/// Downloads and extracts the dataset described by a [`DataIngestionConfig`].
pub struct DataIngestion {
    config: DataIngestionConfig,
    client: reqwest::Client,
}

impl DataIngestion {
    pub fn new(config: DataIngestionConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: DataIngestionConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &DataIngestionConfig {
        &self.config
    }

    /// Fetch the archive unless it already exists at `local_data_file`.
    pub async fn download_file(&self) -> Result<DownloadOutcome> {
        let target = &self.config.local_data_file;
        if target.exists() {
            let bytes = std::fs::metadata(target)?.len();
            tracing::info!(
                file = %target.display(),
                size = %get_size(target)?,
                "file already exists, skipping download"
            );
            return Ok(DownloadOutcome::AlreadyPresent { bytes });
        }

        let mut response = self
            .client
            .get(&self.config.source_url)
            .send()
            .await?
            .error_for_status()?;
        let content_type = header_value(&response, reqwest::header::CONTENT_TYPE);
        let content_length = header_value(&response, reqwest::header::CONTENT_LENGTH);

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // `target` only appears once the whole body is on disk.
        let partial = target.with_extension("tmp");
        let written = match stream_to_file(&mut response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                let _ = std::fs::remove_file(&partial);
                return Err(e);
            }
        };
        std::fs::rename(&partial, target)?;

        tracing::info!(
            url = %self.config.source_url,
            file = %target.display(),
            content_type = ?content_type,
            content_length = ?content_length,
            size = %get_size(target)?,
            "downloaded dataset archive"
        );

        Ok(DownloadOutcome::Downloaded { bytes: written })
    }

    /// Extract every member of the archive into `unzip_dir`.
    ///
    /// Returns the number of files written. Members whose names would land
    /// outside `unzip_dir`, or on top of the archive being read, are skipped.
    pub fn extract_zip_file(&self) -> Result<usize> {
        let unzip_path = &self.config.unzip_dir;
        create_directories(&[unzip_path], false)?;

        let file = std::fs::File::open(&self.config.local_data_file)?;
        let mut archive = zip::ZipArchive::new(io::BufReader::new(file))?;

        let mut extracted = 0;
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let Some(relative) = entry.enclosed_name() else {
                tracing::warn!(
                    name = entry.name(),
                    "skipping archive entry with unsafe path"
                );
                continue;
            };
            let out_path = unzip_path.join(relative);
            if out_path == self.config.local_data_file {
                tracing::warn!(
                    name = entry.name(),
                    "skipping archive entry that would overwrite the archive itself"
                );
                continue;
            }

            if entry.is_dir() {
                std::fs::create_dir_all(&out_path)?;
                continue;
            }
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out = std::fs::File::create(&out_path)?;
            io::copy(&mut entry, &mut out)?;
            extracted += 1;
        }

        tracing::info!(
            archive = %self.config.local_data_file.display(),
            dir = %unzip_path.display(),
            files = extracted,
            "extracted dataset archive"
        );
        Ok(extracted)
    }
}

/// Copy the response body to `path` chunk by chunk; returns the byte count.
async fn stream_to_file(response: &mut reqwest::Response, path: &Path) -> Result<u64> {
    let mut out = io::BufWriter::new(std::fs::File::create(path)?);
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        out.write_all(&chunk)?;
        written += chunk.len() as u64;
    }
    out.flush()?;
    Ok(written)
}

fn header_value(
    response: &reqwest::Response,
    name: reqwest::header::HeaderName,
) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClassifierError, ErrorKind};
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> DataIngestionConfig {
        DataIngestionConfig {
            root_dir: dir.to_path_buf(),
            // Never contacted by these tests.
            source_url: "http://127.0.0.1:9/data.zip".to_string(),
            local_data_file: dir.join("data.zip"),
            unzip_dir: dir.join("unzipped"),
        }
    }

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for (name, data) in entries {
            if name.ends_with('/') {
                zip.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(data).unwrap();
            }
        }
        zip.finish().unwrap();
    }

    #[tokio::test]
    async fn test_download_skipped_when_file_exists() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.local_data_file, vec![7u8; 100]).unwrap();

        let ingestion = DataIngestion::new(config);
        let outcome = ingestion.download_file().await.unwrap();
        assert_eq!(outcome, DownloadOutcome::AlreadyPresent { bytes: 100 });
    }

    #[test]
    fn test_extract_nested_entries() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        write_zip(
            &config.local_data_file,
            &[
                ("train.csv", b"image_id,label\n1.jpg,0\n".as_slice()),
                ("train_images/", b"".as_slice()),
                ("train_images/1.jpg", b"\xff\xd8\xff\xe0".as_slice()),
            ],
        );

        let ingestion = DataIngestion::new(config.clone());
        let extracted = ingestion.extract_zip_file().unwrap();
        assert_eq!(extracted, 2);
        assert_eq!(
            std::fs::read_to_string(config.unzip_dir.join("train.csv")).unwrap(),
            "image_id,label\n1.jpg,0\n"
        );
        assert_eq!(
            std::fs::read(config.unzip_dir.join("train_images/1.jpg")).unwrap(),
            b"\xff\xd8\xff\xe0"
        );
    }

    #[test]
    fn test_extract_twice_overwrites() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        write_zip(&config.local_data_file, &[("a.txt", b"Hello A".as_slice())]);

        let ingestion = DataIngestion::new(config.clone());
        assert_eq!(ingestion.extract_zip_file().unwrap(), 1);
        assert_eq!(ingestion.extract_zip_file().unwrap(), 1);
        assert_eq!(
            std::fs::read_to_string(config.unzip_dir.join("a.txt")).unwrap(),
            "Hello A"
        );
    }

    #[test]
    fn test_extract_skips_path_traversal() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        write_zip(
            &config.local_data_file,
            &[
                ("../escape.txt", b"nope".as_slice()),
                ("ok.txt", b"fine".as_slice()),
            ],
        );

        let ingestion = DataIngestion::new(config.clone());
        assert_eq!(ingestion.extract_zip_file().unwrap(), 1);
        assert!(!dir.path().join("escape.txt").exists());
        assert!(config.unzip_dir.join("ok.txt").exists());
    }

    #[test]
    fn test_extract_missing_archive() {
        let dir = TempDir::new().unwrap();
        let ingestion = DataIngestion::new(config_in(dir.path()));
        let err = ingestion.extract_zip_file().unwrap_err();
        assert!(matches!(err, ClassifierError::Io(_)));
    }

    #[test]
    fn test_extract_corrupt_archive() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.local_data_file, b"this is not a zip archive").unwrap();

        let ingestion = DataIngestion::new(config);
        let err = ingestion.extract_zip_file().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_extract_skips_entry_named_like_the_archive() {
        let dir = TempDir::new().unwrap();
        let config = DataIngestionConfig {
            unzip_dir: dir.path().to_path_buf(),
            ..config_in(dir.path())
        };
        write_zip(
            &config.local_data_file,
            &[
                ("data.zip", b"not the real archive".as_slice()),
                ("b.txt", b"bee".as_slice()),
            ],
        );
        let archive_before = std::fs::read(&config.local_data_file).unwrap();

        let ingestion = DataIngestion::new(config.clone());
        assert_eq!(ingestion.extract_zip_file().unwrap(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("b.txt")).unwrap(),
            "bee"
        );
        assert_eq!(
            std::fs::read(&config.local_data_file).unwrap(),
            archive_before
        );
    }
}
