mod convert;
mod error;
mod ics;
mod pattern;
mod sheet;
mod structs;

pub use convert::{build_calendar, convert_batch, convert_file, write_calendar, FileOutcome};
pub use error::Error;
pub use pattern::{decode_days, encode_days, expand_row};
pub use sheet::read_schedule;
pub use structs::{Calendar, Meeting, ScheduleRow};
