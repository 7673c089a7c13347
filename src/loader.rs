//! Record parsing and file loading for ground truth and detection directories.
//!
//! Both directories hold one `<image_id>.txt` per image, one box per line:
//!
//! ```text
//! xmin,ymin,x,y,xmax,ymax,x,y,label
//! ```
//!
//! Only fields 1, 2, 5 and 6 are used; the label is everything after the
//! eighth comma and may itself contain commas.

use crate::error::{RecallEvalError, Result};
use crate::types::{DetectionRecord, ParsedBox, Rectangle};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of comma separated fields in a record line.
const RECORD_FIELDS: usize = 9;

/// Extension of record files.
const RECORD_EXTENSION: &str = "txt";

/// Parse a single record line into a box.
///
/// # Arguments
///
/// * `source` - Name of the file the line came from, used in error messages
/// * `line` - The raw line
///
/// # Errors
///
/// Returns [`RecallEvalError::FormatError`] if the line has fewer than nine
/// fields or one of the used coordinates is not a number.
///
/// # Example
///
/// ```
/// use recall_eval::loader::parse_line;
///
/// let parsed = parse_line("img1.txt", "10,10,0,0,50,50,0,0,cat").unwrap();
/// assert_eq!(parsed.rect.xmax, 50.0);
/// assert_eq!(parsed.label, "cat");
/// ```
pub fn parse_line(source: &str, line: &str) -> Result<ParsedBox> {
    let format_error = || RecallEvalError::FormatError {
        file: source.to_string(),
        line: line.to_string(),
    };

    let fields: Vec<&str> = line.trim().splitn(RECORD_FIELDS, ',').collect();
    if fields.len() != RECORD_FIELDS {
        return Err(format_error());
    }

    let coordinate = |idx: usize| -> Result<f64> {
        fields[idx].trim().parse::<f64>().map_err(|_| format_error())
    };

    let rect = Rectangle::new(coordinate(0)?, coordinate(1)?, coordinate(4)?, coordinate(5)?);
    Ok(ParsedBox::new(rect, fields[8]))
}

/// Parse every line of a record file's content, in order.
///
/// # Errors
///
/// Fails on the first malformed line.
pub fn parse_records(source: &str, content: &str) -> Result<Vec<ParsedBox>> {
    content.lines().map(|line| parse_line(source, line)).collect()
}

/// Load all boxes from a record file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is malformed.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<ParsedBox>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    parse_records(&path.display().to_string(), &content)
}

/// Load a detection file as records tagged with their image identifier.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is malformed.
pub fn load_detections<P: AsRef<Path>>(path: P, image_id: &str) -> Result<Vec<DetectionRecord>> {
    Ok(load_from_file(path)?
        .into_iter()
        .map(|parsed| DetectionRecord::new(image_id, parsed))
        .collect())
}

/// Derive the image identifier from a record file path (`dir/img1.txt` -> `img1`).
///
/// # Errors
///
/// Returns [`RecallEvalError::InvalidFileName`] if the path has no stem or the
/// stem is not valid UTF-8.
pub fn image_id_from_path(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| RecallEvalError::InvalidFileName(path.display().to_string()))
}

/// Hidden files such as `._img1.txt` sidecars are not records.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().starts_with(b"."))
}

/// Find every record file in a directory, keyed and sorted by image identifier.
///
/// Files whose name starts with a dot are skipped.
///
/// # Errors
///
/// Returns an error if the directory path cannot be turned into a pattern,
/// a matched entry cannot be read, or a file name is not valid UTF-8.
pub fn discover_files<P: AsRef<Path>>(dir: P) -> Result<BTreeMap<String, PathBuf>> {
    let dir = glob::Pattern::escape(&dir.as_ref().to_string_lossy());
    let pattern = format!("{dir}/*.{RECORD_EXTENSION}");

    let mut files = BTreeMap::new();
    // Dotfiles are filtered here rather than with `require_literal_leading_dot`,
    // which panics on non-UTF-8 names elsewhere in the directory.
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if !path.is_file() || is_hidden(&path) {
            continue;
        }
        files.insert(image_id_from_path(&path)?, path);
    }

    Ok(files)
}

/// Check that two discovered file sets have the same image identifiers.
///
/// # Errors
///
/// Returns [`RecallEvalError::MissingCounterpart`] for the first identifier
/// (in sorted order) found on only one side, naming the path that was expected.
pub fn check_counterparts(
    ground_truth: &BTreeMap<String, PathBuf>,
    ground_truth_dir: &Path,
    detections: &BTreeMap<String, PathBuf>,
    detections_dir: &Path,
) -> Result<()> {
    let missing = |image_id: &str, dir: &Path| RecallEvalError::MissingCounterpart {
        image_id: image_id.to_string(),
        expected: dir
            .join(format!("{image_id}.{RECORD_EXTENSION}"))
            .display()
            .to_string(),
    };

    if let Some(image_id) = ground_truth.keys().find(|id| !detections.contains_key(*id)) {
        return Err(missing(image_id, detections_dir));
    }
    if let Some(image_id) = detections.keys().find(|id| !ground_truth.contains_key(*id)) {
        return Err(missing(image_id, ground_truth_dir));
    }

    Ok(())
}
