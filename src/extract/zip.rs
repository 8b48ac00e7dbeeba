//! In-process zip extraction.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::error::ExtractError;

/// Unpacks the zip at `archive_path` into `target_dir`.
///
/// Every entry name is validated before anything is written, so an archive
/// with a single escaping entry produces no output at all. `cancel` is checked
/// before each entry. Returns the files written, in archive order.
pub(crate) fn extract_zip(
    archive_path: &Path,
    target_dir: &Path,
    cancel: &CancellationToken,
) -> Result<Vec<PathBuf>, ExtractError> {
    debug!(?archive_path, ?target_dir, "attempting ZIP extraction");

    let file = File::open(archive_path).map_err(|e| ExtractError::io(archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        ExtractError::corrupt(archive_path, format!("failed to read ZIP archive: {e}"))
    })?;

    let mut relative_paths = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|e| entry_unreadable(archive_path, index, &e))?;
        relative_paths.push(safe_relative_path(&entry, archive_path)?);
    }

    std::fs::create_dir_all(target_dir).map_err(|e| ExtractError::io(target_dir, e))?;

    let mut extracted_files = Vec::new();
    for (index, relative) in relative_paths.into_iter().enumerate() {
        if cancel.is_cancelled() {
            debug!(?archive_path, written = extracted_files.len(), "ZIP extraction cancelled");
            return Err(ExtractError::Cancelled {
                archive: archive_path.to_path_buf(),
            });
        }

        let mut entry = archive
            .by_index(index)
            .map_err(|e| entry_unreadable(archive_path, index, &e))?;
        let out_path = target_dir.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path).map_err(|e| ExtractError::io(&out_path, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ExtractError::io(parent, e))?;
        }
        let mut out_file = File::create(&out_path).map_err(|e| ExtractError::io(&out_path, e))?;
        io::copy(&mut entry, &mut out_file)
            .map_err(|e| copy_error(archive_path, entry.name(), &out_path, e))?;
        extracted_files.push(out_path);
    }

    info!(
        ?archive_path,
        extracted_count = extracted_files.len(),
        "ZIP extraction successful"
    );
    Ok(extracted_files)
}

/// Relative output path of `entry`, refusing anything that would leave the
/// target directory.
fn safe_relative_path(
    entry: &zip::read::ZipFile<'_>,
    archive_path: &Path,
) -> Result<PathBuf, ExtractError> {
    match entry.enclosed_name() {
        Some(path) if !escapes_via_backslashes(entry.name()) => Ok(path.to_path_buf()),
        _ => Err(ExtractError::path_traversal(archive_path, entry.name())),
    }
}

/// DOS-era archives store `\` separators, which `enclosed_name` only treats
/// as separators on Windows.
fn escapes_via_backslashes(name: &str) -> bool {
    let normalized = name.replace('\\', "/");
    let bytes = normalized.as_bytes();
    let drive_prefix = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    normalized.starts_with('/')
        || drive_prefix
        || (name.contains('\\') && normalized.split('/').any(|segment| segment == ".."))
}

fn entry_unreadable(archive_path: &Path, index: usize, e: &zip::result::ZipError) -> ExtractError {
    ExtractError::corrupt(archive_path, format!("failed to read ZIP entry {index}: {e}"))
}

/// Decompression and checksum failures blame the archive; everything else
/// is a write failure.
fn copy_error(archive_path: &Path, name: &str, out_path: &Path, e: io::Error) -> ExtractError {
    match e.kind() {
        io::ErrorKind::InvalidData
        | io::ErrorKind::InvalidInput
        | io::ErrorKind::UnexpectedEof
        | io::ErrorKind::Other => {
            ExtractError::corrupt(archive_path, format!("failed to read entry '{name}': {e}"))
        }
        _ => ExtractError::io(out_path, e),
    }
}
