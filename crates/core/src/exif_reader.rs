use anyhow::{Context, Result};
use exif::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// Capture-time tags in priority order: the time the photo was taken, then
// the time it was digitized (CreateDate in exiftool terms).
const CAPTURE_TIME_TAGS: &[&str] = &["DateTimeOriginal", "DateTimeDigitized"];

// Returns the raw display string of the capture-time field. The value is not
// interpreted here; the planner extracts what it needs from the digits.
pub fn read_capture_timestamp(path: &Path) -> Result<Option<String>> {
    let file = File::open(path)
        .with_context(|| format!("EXIF読み込み対象を開けませんでした: {}", path.display()))?;
    let mut buf = BufReader::new(file);

    let exif = match Reader::new().read_from_container(&mut buf) {
        Ok(exif) => exif,
        Err(_) => return Ok(None),
    };

    Ok(normalize(find_field_value(&exif, CAPTURE_TIME_TAGS)))
}

fn find_field_value(exif: &exif::Exif, names: &[&str]) -> Option<String> {
    for name in names {
        let found = exif.fields().find_map(|field| {
            let tag_name = format!("{:?}", field.tag);
            if name.eq_ignore_ascii_case(&tag_name) {
                Some(field.display_value().to_string())
            } else {
                None
            }
        });
        if found.is_some() {
            return found;
        }
    }
    None
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
