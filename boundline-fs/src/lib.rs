//! Capability-based filesystem helpers for the boundline CLI.
//!
//! Paths are UTF-8 (`camino`) and every access goes through a `cap-std`
//! directory handle opened with ambient authority.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Open the directory containing `path` and return it with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Whether `path` is a regular file.
///
/// Returns `Ok(false)` for directories and other non-file entries. A missing
/// file or parent directory surfaces as an [`io::ErrorKind::NotFound`] error
/// so callers can tell it apart from a path of the wrong kind.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create every missing ancestor of `path`.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Write `contents` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_file(path: &Utf8Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    dir.write(name.as_str(), contents)
}

/// Split a directory path into an ambient base directory and the relative
/// remainder beneath it.
///
/// Absolute paths are anchored at their root (or Windows prefix); relative
/// paths at the current directory.
pub fn base_dir_and_relative(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let anchor: Utf8PathBuf = match std_path.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => Utf8PathBuf::from("."),
    };
    let relative = if anchor.as_str() == "." {
        path.to_path_buf()
    } else {
        path.strip_prefix(&anchor)
            .map_err(|_| io::Error::other(format!("{path} is not beneath {anchor}")))?
            .to_path_buf()
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((dir, relative))
}
