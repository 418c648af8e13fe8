use std::path::Path;

use calamine::{open_workbook, Data, DataType, Range, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

use crate::error::Error;
use crate::structs::ScheduleRow;

/// Sheet row index of the column-name row; two banner rows precede it.
const HEADER_ROW: u32 = 2;

// Evaluated top to bottom per header cell; the first rule whose needle
// appears in the trimmed, lowercased header text classifies that header.
const HEADER_RULES: [(&[&str], &str); 4] = [
    (&["course"], "Course Listing"),
    (&["pattern", "meeting"], "Meeting Patterns"),
    (&["start"], "Start Date"),
    (&["end"], "End Date"),
];

// Ordered so a two-digit year hits %y rather than parsing as a literal
// year via %Y.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

struct Columns {
    course: usize,
    pattern: usize,
    start: usize,
    end: usize,
}

/// Reads the first worksheet of an xlsx workbook into validated
/// schedule rows.
pub fn read_schedule<P: AsRef<Path>>(path: P) -> Result<Vec<ScheduleRow>, Error> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let (sheet, range) = workbook
        .worksheets()
        .into_iter()
        .next()
        .ok_or(Error::NoWorksheet)?;

    debug!("loading schedule table from sheet {sheet:?}");
    load_rows(&range)
}

pub(crate) fn load_rows(range: &Range<Data>) -> Result<Vec<ScheduleRow>, Error> {
    let first_row = range.start().map_or(0, |(row, _)| row);
    let skip = HEADER_ROW.saturating_sub(first_row) as usize;

    let mut data = range.rows().skip(skip);
    let columns = match data.next() {
        Some(header) => resolve_columns(header)?,
        None => return Err(Error::MissingColumns(all_column_names())),
    };
    debug!(
        "resolved columns: course={} pattern={} start={} end={}",
        columns.course, columns.pattern, columns.start, columns.end
    );

    let mut rows = Vec::new();
    let mut carried_course: Option<String> = None;

    for cells in data {
        // The course cell forward-fills even when the rest of the row is
        // unusable, so section rows still name the rows below them.
        let course = match cell_text(cells, columns.course) {
            Some(course) => {
                carried_course = Some(course.clone());
                course
            }
            None => match carried_course.clone() {
                Some(course) => course,
                None => {
                    debug!("skipping row with no course to inherit");
                    continue;
                }
            },
        };

        let Some(pattern) = cell_text(cells, columns.pattern) else {
            debug!("skipping row for {course}: no meeting pattern");
            continue;
        };

        let (Some(start), Some(end)) = (
            cell_date(cells, columns.start),
            cell_date(cells, columns.end),
        ) else {
            debug!("skipping row for {course}: missing or unparseable dates");
            continue;
        };

        if start > end {
            debug!("skipping row for {course}: start date after end date");
            continue;
        }

        rows.push(ScheduleRow {
            course,
            pattern,
            start,
            end,
        });
    }

    Ok(rows)
}

fn resolve_columns(header: &[Data]) -> Result<Columns, Error> {
    let mut resolved: [Option<usize>; 4] = [None; 4];

    for (idx, cell) in header.iter().enumerate() {
        let Some(text) = cell.as_string() else {
            continue;
        };
        let text = text.trim().to_lowercase();

        let matched = HEADER_RULES
            .iter()
            .position(|(needles, _)| needles.iter().any(|needle| text.contains(needle)));

        // The first header to claim a column keeps it.
        if let Some(rule) = matched {
            if resolved[rule].is_none() {
                resolved[rule] = Some(idx);
            }
        }
    }

    match resolved {
        [Some(course), Some(pattern), Some(start), Some(end)] => Ok(Columns {
            course,
            pattern,
            start,
            end,
        }),
        _ => {
            let missing = HEADER_RULES
                .iter()
                .zip(&resolved)
                .filter(|(_, idx)| idx.is_none())
                .map(|((_, name), _)| (*name).to_string())
                .collect();
            Err(Error::MissingColumns(missing))
        }
    }
}

fn all_column_names() -> Vec<String> {
    HEADER_RULES
        .iter()
        .map(|(_, name)| (*name).to_string())
        .collect()
}

fn cell_text(cells: &[Data], idx: usize) -> Option<String> {
    let text = cells.get(idx)?.as_string()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn cell_date(cells: &[Data], idx: usize) -> Option<NaiveDate> {
    let cell = cells.get(idx)?;

    if let Some(date) = cell.as_date() {
        return Some(date);
    }

    let text = cell.as_string()?;
    let text = text.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
}
