//! File export for finalized recordings.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::types::{Artifact, CaptureError};

/// Configuration for writing the exported clip.
#[derive(Debug, Clone)]
pub struct SaveConfig {
    /// Directory to write recordings to.
    pub directory: PathBuf,
    /// Filename stem; `%` chrono format specifiers are expanded.
    pub filename: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            directory: dirs::video_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Inkboard"),
            filename: "whiteboard_recording".to_string(),
        }
    }
}

/// Generate a filename from the stem and the artifact's container extension.
///
/// # Arguments
/// * `stem` - Filename stem, optionally with chrono format specifiers
/// * `extension` - Container extension (e.g. "webm")
///
/// # Returns
/// Generated filename with extension
pub fn generate_filename(stem: &str, extension: &str) -> String {
    let stem = if stem.contains('%') {
        Local::now().format(stem).to_string()
    } else {
        stem.to_string()
    };
    format!("{}.{}", stem, extension)
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, CaptureError> {
    if !directory.exists() {
        log::info!("Creating recording directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    // Canonicalize to resolve ~ and relative paths
    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Save a finalized recording to a file.
///
/// # Arguments
/// * `artifact` - The finalized clip to write
/// * `config` - Where and under which name to write it
///
/// # Returns
/// Path to the saved file
pub fn save_artifact(artifact: &Artifact, config: &SaveConfig) -> Result<PathBuf, CaptureError> {
    let directory = ensure_directory_exists(&config.directory)?;

    let filename = generate_filename(&config.filename, &artifact.extension);
    let file_path = directory.join(&filename);

    log::info!(
        "Saving recording to: {} ({} bytes)",
        file_path.display(),
        artifact.len()
    );

    fs::write(&file_path, &artifact.data)?;

    // Set permissions to user read/write only (security)
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    log::info!("Recording saved successfully: {}", file_path.display());

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> Artifact {
        Artifact {
            data: vec![1, 2, 3, 4],
            extension: "webm".to_string(),
        }
    }

    #[test]
    fn generate_filename_appends_extension() {
        assert_eq!(
            generate_filename("whiteboard_recording", "webm"),
            "whiteboard_recording.webm"
        );
    }

    #[test]
    fn generate_filename_expands_chrono_templates() {
        let filename = generate_filename("clip_%Y%m%d", "webm");
        assert!(filename.starts_with("clip_"));
        assert!(filename.ends_with(".webm"));
        // Check that it contains a valid date (4 digits for year)
        assert!(filename.contains("202")); // Assuming we're in the 2020s
    }

    #[test]
    fn save_artifact_writes_the_clip() {
        let dir = tempfile::tempdir().unwrap();
        let config = SaveConfig {
            directory: dir.path().join("clips"),
            filename: "whiteboard_recording".to_string(),
        };

        let path = save_artifact(&artifact(), &config).unwrap();
        assert!(path.ends_with("whiteboard_recording.webm"));
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn default_config_points_at_inkboard_directory() {
        let config = SaveConfig::default();
        assert_eq!(config.filename, "whiteboard_recording");
        assert!(config.directory.to_string_lossy().contains("Inkboard"));
    }
}
