//! UTF-8, capability-based file access for dataset I/O.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open a dataset file for reading using ambient authority.
pub(crate) fn open_dataset(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create (or truncate) a dataset file, creating parent directories first.
pub(crate) fn create_dataset(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("dataset path must include a file name"))?;
    fs_utf8::Dir::create_ambient_dir_all(parent, ambient_authority())?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.create(file_name)
}
