mod apply;
mod exif_reader;
mod planner;
mod scan;
mod timestamp;

pub use apply::{apply_plan, apply_plan_with_progress, ApplyResult};
pub use exif_reader::read_capture_timestamp;
pub use planner::{
    make_rename_plan, resolve_output_folder, PlanEntryKind, PlanOptions, PlanStats, RenameEntry,
    RenamePlan, MISSING_EXIF_FOLDER,
};
pub use scan::scan_input_folder;
pub use timestamp::{parse_timestamp, DateParts, TimestampError};
