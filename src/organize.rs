//! Destination layout and collision-safe file moves.

use crate::error::PipelineError;
use crate::normalize::normalize;
use crate::tags::UNKNOWN_ALBUM;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Picks a collision-free path for `file_name` inside `dir` by suffixing
/// `_1`, `_2`, ... onto the stem until nothing is in the way. Deterministic;
/// never points at an existing file.
pub fn collision_free_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let ext = name.extension().and_then(|s| s.to_str());

    let mut counter = 1u32;
    loop {
        let suffixed = match ext {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        let candidate = dir.join(suffixed);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Moves a tagged file into `<dest_root>/<normalized album>/`.
///
/// Called only after a successful tag write; on any failure here the file
/// keeps its original path. The album folder name goes through [`normalize`]
/// independently of the album tag itself, so the directory is always
/// filesystem-safe.
pub fn place(path: &Path, dest_root: &Path, album: &str) -> Result<PathBuf, PipelineError> {
    let move_err = |source: io::Error| PipelineError::FileMove {
        path: path.to_path_buf(),
        source,
    };

    let file_name = match path.file_name() {
        Some(n) => n.to_string_lossy().into_owned(),
        None => {
            return Err(move_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "path has no file name",
            )))
        }
    };

    let folder = normalize(album).unwrap_or_else(|| UNKNOWN_ALBUM.to_string());
    let album_dir = dest_root.join(folder);
    fs::create_dir_all(&album_dir).map_err(move_err)?;

    let dest = collision_free_path(&album_dir, &file_name);
    fs::rename(path, &dest).map_err(move_err)?;
    Ok(dest)
}
