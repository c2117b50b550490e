use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{success, warning};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database at `src` to `dest_file`, optionally replacing the
    /// copy with a `.zip` archive. Returns the path actually written.
    pub fn backup(src: &Path, dest_file: &str, compress: bool, force: bool) -> AppResult<PathBuf> {
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        ensure_writable(dest, force)?;

        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        if !compress {
            return Ok(dest.to_path_buf());
        }

        let compressed = compress_backup(dest)?;
        if let Err(e) = fs::remove_file(dest) {
            warning(format!("Failed to remove uncompressed backup: {}", e));
        }
        Ok(compressed)
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rtimepiece.sqlite".to_string());

    // never archive onto the file being read
    let mut zip_path = path.with_extension("zip");
    if zip_path == path {
        zip_path = path.with_file_name(format!("{entry_name}.zip"));
    }

    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish()?;

    success(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
