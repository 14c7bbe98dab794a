//! # Package Assembler
//!
//! Writes an `EvidencePackage` as one ZIP archive.
//!
//! ## Atomic publish
//!
//! The archive is written to a temporary file in the destination directory,
//! fsynced, and then linked into place without overwriting. A failure at any
//! step drops the temporary file; the destination either holds the complete
//! archive or nothing.
//!
//! ## Reproducibility
//!
//! Entries are written in name order with DEFLATE, a fixed modification time
//! (1980-01-01 00:00), and fixed permissions, so identical packages produce
//! identical archive bytes.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::EvidenceError;
use crate::export::validate_case_label;
use crate::package::EvidencePackage;

/// `<case>_<package_id>.zip`.
pub fn archive_name(case: &str, package_id: &str) -> String {
    format!("{case}_{package_id}.zip")
}

/// Writes packages into one output directory.
#[derive(Debug, Clone)]
pub struct PackageAssembler {
    out_dir: PathBuf,
}

impl PackageAssembler {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Write `package` and return the archive path.
    pub fn write(&self, package: &EvidencePackage) -> Result<PathBuf, EvidenceError> {
        validate_case_label(package.case())?;
        let final_path = self
            .out_dir
            .join(archive_name(package.case(), package.package_id().as_str()));
        if final_path.exists() {
            return Err(EvidenceError::PackageExists { path: final_path });
        }

        std::fs::create_dir_all(&self.out_dir).map_err(|source| EvidenceError::Io {
            path: self.out_dir.clone(),
            source,
        })?;
        let tmp = NamedTempFile::new_in(&self.out_dir).map_err(|source| EvidenceError::Io {
            path: self.out_dir.clone(),
            source,
        })?;

        let archive_err = |source| EvidenceError::Archive {
            path: final_path.clone(),
            source,
        };
        let io_err = |source| EvidenceError::Io {
            path: tmp.path().to_path_buf(),
            source,
        };

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        let mut entries: Vec<_> = package.entries().collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));

        let mut zip = ZipWriter::new(tmp.as_file());
        for artifact in entries {
            zip.start_file(artifact.name(), options.clone())
                .map_err(archive_err)?;
            zip.write_all(artifact.content()).map_err(io_err)?;
        }
        zip.finish().map_err(archive_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;

        tmp.persist_noclobber(&final_path).map_err(|e| {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                EvidenceError::PackageExists {
                    path: final_path.clone(),
                }
            } else {
                EvidenceError::Io {
                    path: final_path.clone(),
                    source: e.error,
                }
            }
        })?;

        tracing::info!(
            path = %final_path.display(),
            package_id = %package.package_id(),
            outputs_hash = %package.manifest().outputs_hash,
            "evidence package written"
        );
        Ok(final_path)
    }
}
