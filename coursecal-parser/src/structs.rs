use chrono::{NaiveDate, NaiveTime};

/// One validated data row of the schedule table, after forward-filling
/// the course column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub course: String,
    pub pattern: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A single concrete class meeting on a specific date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub course: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct Calendar {
    pub name: String,
    pub meetings: Vec<Meeting>,
}
