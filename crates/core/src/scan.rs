use crate::exif_reader::read_capture_timestamp;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// Walks the input folder in sorted order and pairs every regular file with
// its capture timestamp. A file whose metadata cannot be read counts as
// having none and will be routed to the missing-exif fallback.
pub fn scan_input_folder(
    root: &Path,
    include_hidden: bool,
) -> Result<Vec<(PathBuf, Option<String>)>> {
    if !root.is_dir() {
        anyhow::bail!("入力フォルダが存在しません: {}", root.display());
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("フォルダ走査に失敗しました: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if is_hidden(path) && !include_hidden {
            continue;
        }

        let timestamp = read_capture_timestamp(path).ok().flatten();
        out.push((path.to_path_buf(), timestamp));
    }

    Ok(out)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
