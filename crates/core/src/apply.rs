use crate::planner::{RenameEntry, RenamePlan};
use anyhow::{bail, Context, Result};
use chrono::{Local, TimeZone};
use filetime::FileTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApplyResult {
    pub copied: usize,
    pub restamped: usize,
}

pub fn apply_plan(plan: &RenamePlan) -> Result<ApplyResult> {
    apply_plan_with_progress(plan, |_| {})
}

// Copies in plan order and stops at the first failure. The plan already
// resolved collisions among its own entries, so an existing destination
// means the disk changed since planning; refuse rather than overwrite.
pub fn apply_plan_with_progress(
    plan: &RenamePlan,
    mut on_copied: impl FnMut(&RenameEntry),
) -> Result<ApplyResult> {
    fs::create_dir_all(&plan.output_folder).with_context(|| {
        format!(
            "出力フォルダを作成できませんでした: {}",
            plan.output_folder.display()
        )
    })?;

    let mut copied = 0usize;
    let mut restamped = 0usize;

    for entry in &plan.entries {
        if entry.target_path.exists() {
            bail!(
                "コピー先が既に存在します: {}",
                entry.target_path.display()
            );
        }

        if let Some(parent) = entry.target_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("コピー先フォルダを作成できませんでした: {}", parent.display())
            })?;
        }

        fs::copy(&entry.original_path, &entry.target_path).with_context(|| {
            format!(
                "コピーに失敗しました: {} -> {}",
                entry.original_path.display(),
                entry.target_path.display()
            )
        })?;
        copied += 1;

        if restamp_copy(entry) {
            restamped += 1;
        }
        on_copied(entry);
    }

    Ok(ApplyResult { copied, restamped })
}

// Keeps the source's access time and sets the copy's modification time to
// the capture time when the date parts form a real local datetime, falling
// back to the source's modification time. Best-effort: the copy itself
// already succeeded. Returns whether the capture time was applied.
fn restamp_copy(entry: &RenameEntry) -> bool {
    let Ok(metadata) = fs::metadata(&entry.original_path) else {
        return false;
    };
    let atime = FileTime::from_last_access_time(&metadata);
    let source_mtime = FileTime::from_last_modification_time(&metadata);

    let (mtime, from_capture) = match capture_mtime(entry) {
        Some(mtime) => (mtime, true),
        None => (source_mtime, false),
    };

    filetime::set_file_times(&entry.target_path, atime, mtime).is_ok() && from_capture
}

fn capture_mtime(entry: &RenameEntry) -> Option<FileTime> {
    let naive = entry.date.as_ref()?.to_naive_datetime()?;
    let local = Local.from_local_datetime(&naive).single()?;
    Some(FileTime::from_system_time(SystemTime::from(local)))
}
