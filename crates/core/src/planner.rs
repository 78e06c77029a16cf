use crate::timestamp::{parse_timestamp, DateParts};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const MISSING_EXIF_FOLDER: &str = "missing-exif-data";

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub suffix: Option<String>,
    pub create_month_folders: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanEntryKind {
    Timestamped,
    MissingExif,
    MalformedTimestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameEntry {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub kind: PlanEntryKind,
    pub date: Option<DateParts>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlanStats {
    pub planned: usize,
    pub timestamped: usize,
    pub missing_exif: usize,
    pub malformed_timestamp: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub output_folder: PathBuf,
    pub entries: Vec<RenameEntry>,
    pub stats: PlanStats,
}

// Probes the disk once per run. Everything after this works purely against
// the in-memory plan.
pub fn resolve_output_folder(input_folder: &Path) -> PathBuf {
    let base = input_folder
        .as_os_str()
        .to_string_lossy()
        .trim_end_matches(['/', '\\'])
        .to_string();

    let mut candidate = PathBuf::from(format!("{}-new", base));
    let mut marker = String::new();
    while candidate.exists() {
        marker = next_conflict_marker(&marker);
        candidate = PathBuf::from(format!("{}-new-{}", base, marker));
    }
    candidate
}

pub fn make_rename_plan(
    files_with_timestamps: &[(PathBuf, Option<String>)],
    options: &PlanOptions,
    output_folder: &Path,
) -> RenamePlan {
    let mut stats = PlanStats::default();
    let mut entries = Vec::with_capacity(files_with_timestamps.len());
    let mut planned_paths = HashSet::<PathBuf>::new();

    for (path, timestamp) in files_with_timestamps {
        let (target, kind, date) = match timestamp.as_deref().map(parse_timestamp) {
            Some(Ok(date)) => {
                let target =
                    generate_destination(path, &date, options, output_folder, &planned_paths);
                (target, PlanEntryKind::Timestamped, Some(date))
            }
            Some(Err(_)) => (
                missing_exif_destination(path, output_folder),
                PlanEntryKind::MalformedTimestamp,
                None,
            ),
            None => (
                missing_exif_destination(path, output_folder),
                PlanEntryKind::MissingExif,
                None,
            ),
        };

        match kind {
            PlanEntryKind::Timestamped => stats.timestamped += 1,
            PlanEntryKind::MissingExif => stats.missing_exif += 1,
            PlanEntryKind::MalformedTimestamp => stats.malformed_timestamp += 1,
        }
        stats.planned += 1;

        planned_paths.insert(target.clone());
        entries.push(RenameEntry {
            original_path: path.clone(),
            target_path: target,
            kind,
            date,
        });
    }

    RenamePlan {
        output_folder: output_folder.to_path_buf(),
        entries,
        stats,
    }
}

fn generate_destination(
    original_path: &Path,
    date: &DateParts,
    options: &PlanOptions,
    output_folder: &Path,
    planned_paths: &HashSet<PathBuf>,
) -> PathBuf {
    let folder = if options.create_month_folders {
        output_folder.join(format!("{}_{}", date.year, date.month))
    } else {
        output_folder.to_path_buf()
    };

    let base = format!(
        "IMG_{}{}{}_{}{}{}",
        date.year, date.month, date.day, date.hour, date.minute, date.second
    );
    let suffix = options
        .suffix
        .as_ref()
        .map(|s| format!("_{}", s))
        .unwrap_or_default();
    let extension = original_path
        .extension()
        .map(|v| format!(".{}", v.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    let mut marker = String::new();
    loop {
        let candidate = folder.join(format!("{}{}{}{}", base, marker, suffix, extension));
        if !planned_paths.contains(&candidate) {
            return candidate;
        }
        marker = next_conflict_marker(&marker);
    }
}

// No month folders, suffix, or collision resolution here: files without a
// usable capture time map straight to <output>/missing-exif-data/<basename>.
fn missing_exif_destination(original_path: &Path, output_folder: &Path) -> PathBuf {
    let basename = original_path
        .file_name()
        .map(|v| v.to_os_string())
        .unwrap_or_default();
    output_folder.join(MISSING_EXIF_FOLDER).join(basename)
}

// Lowercase base-26 successor: "" -> "a", "a" -> "b", "z" -> "aa", "az" -> "ba".
fn next_conflict_marker(current: &str) -> String {
    if current.is_empty() {
        return "a".to_string();
    }

    let mut chars: Vec<char> = current.chars().collect();
    for i in (0..chars.len()).rev() {
        if chars[i] < 'z' {
            chars[i] = (chars[i] as u8 + 1) as char;
            return chars.into_iter().collect();
        }
        chars[i] = 'a';
    }
    format!("a{}", chars.into_iter().collect::<String>())
}
