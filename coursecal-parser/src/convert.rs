use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Error;
use crate::pattern::expand_row;
use crate::sheet::read_schedule;
use crate::structs::{Calendar, ScheduleRow};

/// The result of converting one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub result: Result<PathBuf, Error>,
}

/// Expands every row into meetings accumulated under one named calendar.
#[must_use]
pub fn build_calendar(name: &str, rows: &[ScheduleRow]) -> Calendar {
    let meetings = rows.iter().flat_map(expand_row).collect();

    Calendar {
        name: name.to_string(),
        meetings,
    }
}

/// Writes the calendar as `<name>.ics` into the output directory,
/// overwriting any previous file of the same name.
pub fn write_calendar<P: AsRef<Path>>(calendar: &Calendar, output_dir: P) -> Result<PathBuf, Error> {
    let path = output_dir.as_ref().join(format!("{}.ics", calendar.name));
    calendar.to_ics().save_file(&path)?;
    Ok(path)
}

/// Converts one spreadsheet into one calendar file named after the
/// input's base name.
pub fn convert_file<P: AsRef<Path>>(source: P, output_dir: &Path) -> Result<PathBuf, Error> {
    let source = source.as_ref();
    info!("converting {}", source.display());

    let rows = read_schedule(source)?;
    let name = source
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("schedule");

    let calendar = build_calendar(name, &rows);
    let path = write_calendar(&calendar, output_dir)?;

    info!(
        "wrote {} meetings for {} rows to {}",
        calendar.meetings.len(),
        rows.len(),
        path.display()
    );
    Ok(path)
}

/// Converts every input independently; one failed file never aborts the
/// rest of the batch.
pub fn convert_batch(sources: &[PathBuf], output_dir: &Path) -> Vec<FileOutcome> {
    sources
        .iter()
        .map(|source| FileOutcome {
            source: source.clone(),
            result: convert_file(source, output_dir),
        })
        .collect()
}
