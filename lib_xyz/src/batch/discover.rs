use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Recursively collects the files under `root` whose extension matches
/// `extension`, case-insensitively. Entries are visited in lexicographic
/// order per directory level, so the same tree always enumerates the same
/// way.
pub fn walk(root: &Path, extension: &str, cancel: &AtomicBool) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk_into(root, extension, cancel, &mut found)?;
    Ok(found)
}

fn walk_into(
    dir: &Path,
    extension: &str,
    cancel: &AtomicBool,
    found: &mut Vec<PathBuf>,
) -> io::Result<()> {
    if cancel.load(Ordering::Relaxed) {
        return Ok(());
    }

    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            walk_into(&path, extension, cancel, found)?;
        } else if matches_extension(&path, extension) {
            found.push(path);
        }
    }
    Ok(())
}

pub(crate) fn matches_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}
