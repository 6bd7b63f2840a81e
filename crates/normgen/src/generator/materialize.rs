// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Atomic materialization of generated sources.
//!
//! Sources are written to a uniquely named temporary file in the target
//! directory and renamed into place, so a concurrent reader observes either
//! no file or the complete file.

use crate::error::GenerationError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Create `dir` (and parents) if needed and check it accepts new files.
pub fn ensure_writable_dir(dir: &Path, dir_mode: u32) -> Result<(), GenerationError> {
    let unwritable = || GenerationError::DirectoryUnwritable {
        path: dir.to_path_buf(),
    };

    if !dir.is_dir() {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(dir_mode);
        }
        #[cfg(not(unix))]
        let _ = dir_mode;

        if let Err(e) = builder.create(dir) {
            log::warn!("[materialize] cannot create {}: {}", dir.display(), e);
            return Err(unwritable());
        }
        log::debug!("[materialize] created {}", dir.display());
    }

    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() && !meta.permissions().readonly() => Ok(()),
        _ => Err(unwritable()),
    }
}

/// Write `content` to `path` atomically with permissions `file_mode`.
pub fn write_atomic(path: &Path, content: &str, file_mode: u32) -> Result<(), GenerationError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let io_error = |source| GenerationError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".normgen-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| {
            log::warn!("[materialize] cannot create temp file in {}: {}", dir.display(), e);
            GenerationError::DirectoryUnwritable {
                path: dir.to_path_buf(),
            }
        })?;

    tmp.write_all(content.as_bytes()).map_err(io_error)?;
    tmp.as_file().sync_all().map_err(io_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(file_mode))
            .map_err(io_error)?;
    }
    #[cfg(not(unix))]
    let _ = file_mode;

    tmp.persist(path).map_err(|e| io_error(e.error))?;
    log::debug!("[materialize] wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}
