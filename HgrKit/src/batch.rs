//! Batch HGR / NTX operations
//!
//! Decodes or converts many files in parallel. Each file is independent; a
//! failing file is recorded and the rest carry on.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::converter::{ImageFileType, convert_ntx};
use crate::error::Error;
use crate::formats::hgr::read_hgr;

/// Progress of a batch operation, reported once per file
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// 1-based index of the file being processed
    pub current: usize,
    pub total: usize,
    /// Path relative to the source directory
    pub file: String,
}

/// A file that could not be processed
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub path: PathBuf,
    /// Short error kind, e.g. `ChecksumDesync`
    pub kind: &'static str,
    /// Byte offset of the error, when known
    pub offset: Option<u64>,
    pub message: String,
}

/// Result of a batch operation
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Number of successful operations
    pub success_count: usize,
    /// Number of failed operations
    pub fail_count: usize,
    /// Messages for each file processed
    pub results: Vec<String>,
    pub failures: Vec<BatchFailure>,
}

impl BatchResult {
    fn from_outcomes(
        success_count: usize,
        fail_count: usize,
        outcomes: Vec<(String, Option<BatchFailure>)>,
    ) -> Self {
        let mut results = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for (message, failure) in outcomes {
            results.push(message);
            failures.extend(failure);
        }
        Self {
            success_count,
            fail_count,
            results,
            failures,
        }
    }
}

/// Find all files with extension `ext` in a directory recursively
///
/// # Returns
/// A sorted list of matching paths (extension compared case-insensitively).
pub fn find_files<P: AsRef<Path>>(dir: P, ext: &str) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|x| x.eq_ignore_ascii_case(ext))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

fn failure(path: &Path, display_path: &str, error: &Error) -> (String, Option<BatchFailure>) {
    tracing::warn!(
        "Failed {}: {} (offset {:?})",
        display_path,
        error.kind_name(),
        error.offset()
    );
    (
        format!("Failed {display_path}: {error}"),
        Some(BatchFailure {
            path: path.to_path_buf(),
            kind: error.kind_name(),
            offset: error.offset(),
            message: error.to_string(),
        }),
    )
}

/// Decode HGR files in parallel, checking each one parses cleanly
///
/// # Arguments
/// * `files` - HGR files to decode
/// * `source_base` - Base directory (for display paths)
/// * `progress` - Callback for progress updates
pub fn batch_decode_hgr<F>(files: &[PathBuf], source_base: &Path, progress: F) -> BatchResult
where
    F: Fn(&BatchProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = files.len();

    let outcomes: Vec<(String, Option<BatchFailure>)> = files
        .par_iter()
        .map(|path| {
            let relative_path = path.strip_prefix(source_base).unwrap_or(path.as_path());
            let display_path = relative_path.to_string_lossy().to_string();

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress {
                current,
                total,
                file: display_path.clone(),
            });

            match read_hgr(path) {
                Ok(doc) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    (
                        format!(
                            "Decoded: {display_path} ({} meshes, {} cameras, {} primitives)",
                            doc.meshes.len(),
                            doc.cameras.len(),
                            doc.primitives.len()
                        ),
                        None,
                    )
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    failure(path, &display_path, &e)
                }
            }
        })
        .collect();

    BatchResult::from_outcomes(
        success_counter.load(Ordering::SeqCst),
        fail_counter.load(Ordering::SeqCst),
        outcomes,
    )
}

/// Convert NTX files to images in parallel
///
/// Preserves the source directory structure under `dest_base`, replacing the
/// `.ntx` extension with the target file type's.
///
/// # Arguments
/// * `files` - NTX files to convert
/// * `source_base` - Base directory of the source (for calculating relative paths)
/// * `dest_base` - Destination directory for images
/// * `file_type` - Output image type
/// * `progress` - Callback for progress updates
pub fn batch_convert_ntx<F>(
    files: &[PathBuf],
    source_base: &Path,
    dest_base: &Path,
    file_type: ImageFileType,
    progress: F,
) -> BatchResult
where
    F: Fn(&BatchProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = files.len();

    let outcomes: Vec<(String, Option<BatchFailure>)> = files
        .par_iter()
        .map(|path| {
            // Files outside the base keep only their file name
            let relative_path = path
                .strip_prefix(source_base)
                .unwrap_or_else(|_| Path::new(path.file_name().unwrap_or_default()));
            let display_path = relative_path.to_string_lossy().to_string();

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress {
                current,
                total,
                file: display_path.clone(),
            });

            let dest = dest_base
                .join(relative_path)
                .with_extension(file_type.extension());
            if let Some(parent) = dest.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    return failure(path, &display_path, &Error::Io(e));
                }
            }

            match convert_ntx(path, &dest, file_type) {
                Ok(()) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    (format!("Converted: {display_path}"), None)
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    failure(path, &display_path, &e)
                }
            }
        })
        .collect();

    BatchResult::from_outcomes(
        success_counter.load(Ordering::SeqCst),
        fail_counter.load(Ordering::SeqCst),
        outcomes,
    )
}
