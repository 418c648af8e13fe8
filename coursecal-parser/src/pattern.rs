use std::mem;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use log::debug;

use crate::structs::{Meeting, ScheduleRow};

const TIME_FORMAT: &str = "%I:%M %p";

// Two-letter tokens come first so "TH" and "SU" are never read as
// "T" + "H" or "S" + "U".
const DAY_TOKENS: [(&str, Weekday); 7] = [
    ("TH", Weekday::Thu),
    ("SU", Weekday::Sun),
    ("M", Weekday::Mon),
    ("T", Weekday::Tue),
    ("W", Weekday::Wed),
    ("F", Weekday::Fri),
    ("S", Weekday::Sat),
];

/// Decodes a day-token string such as "MTWTHF" into weekdays, longest
/// token first, in first-seen order. Unrecognized characters are skipped
/// and duplicate days collapse into one.
pub fn decode_days(tokens: &str) -> Vec<Weekday> {
    let tokens = tokens.trim().to_uppercase();
    let mut days = Vec::new();
    let mut rest = tokens.as_str();

    while !rest.is_empty() {
        match DAY_TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
            Some((token, day)) => {
                if !days.contains(day) {
                    days.push(*day);
                }
                rest = &rest[token.len()..];
            }
            None => {
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            }
        }
    }

    days
}

/// Encodes weekdays back into their canonical day tokens.
pub fn encode_days(days: &[Weekday]) -> String {
    days.iter()
        .map(|day| match day {
            Weekday::Mon => "M",
            Weekday::Tue => "T",
            Weekday::Wed => "W",
            Weekday::Thu => "TH",
            Weekday::Fri => "F",
            Weekday::Sat => "S",
            Weekday::Sun => "SU",
        })
        .collect()
}

struct ParsedLine {
    days: Vec<Weekday>,
    start: NaiveTime,
    end: NaiveTime,
    description: String,
}

fn parse_line(raw: &str) -> Option<ParsedLine> {
    let mut fields = raw.split('|').map(str::trim);

    let days = decode_days(fields.next()?);
    let times = fields.next()?;
    let location = fields.next().unwrap_or("");

    let (start, end) = times.split_once('-')?;
    let start = NaiveTime::parse_from_str(start.trim(), TIME_FORMAT).ok()?;
    let end = NaiveTime::parse_from_str(end.trim(), TIME_FORMAT).ok()?;

    Some(ParsedLine {
        days,
        start,
        end,
        description: format!("Meeting Pattern: {raw} | {location}"),
    })
}

struct Weeks(NaiveDate, NaiveDate);

impl Weeks {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self(start, end)
    }
}

impl Iterator for Weeks {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + Duration::days(7);
            Some(mem::replace(&mut self.0, next))
        } else {
            None
        }
    }
}

/// Expands one schedule row into concrete meetings, one per matching
/// weekday per week between the row's start and end dates. Malformed
/// pattern lines contribute nothing; sibling lines still expand.
pub fn expand_row(row: &ScheduleRow) -> Vec<Meeting> {
    let mut lines = Vec::new();
    for raw in row.pattern.lines() {
        if raw.trim().is_empty() {
            continue;
        }
        match parse_line(raw) {
            Some(line) => lines.push(line),
            None => debug!("skipping malformed pattern line {raw:?}"),
        }
    }

    let mut meetings = Vec::new();

    for anchor in Weeks::new(row.start, row.end) {
        for line in &lines {
            for &day in &line.days {
                let offset = i64::from(day.num_days_from_monday())
                    - i64::from(anchor.weekday().num_days_from_monday());
                let date = anchor + Duration::days(offset.rem_euclid(7));

                if date > row.end {
                    continue;
                }

                meetings.push(Meeting {
                    course: row.course.clone(),
                    date,
                    start: line.start,
                    end: line.end,
                    description: line.description.clone(),
                });
            }
        }
    }

    meetings
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Weekday};

    use super::{decode_days, encode_days, expand_row, parse_line};
    use crate::structs::ScheduleRow;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn row(pattern: &str, start: NaiveDate, end: NaiveDate) -> ScheduleRow {
        ScheduleRow {
            course: "MATH 101".to_string(),
            pattern: pattern.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn decodes_two_letter_tokens_greedily() {
        assert_eq!(decode_days("TTH"), vec![Weekday::Tue, Weekday::Thu]);
        assert_eq!(
            decode_days("MTWTHF"),
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri
            ]
        );
        assert_eq!(decode_days("SU"), vec![Weekday::Sun]);
        assert_eq!(decode_days("SSU"), vec![Weekday::Sat, Weekday::Sun]);
    }

    #[test]
    fn decode_skips_unknown_characters() {
        assert_eq!(decode_days("MXF"), vec![Weekday::Mon, Weekday::Fri]);
        assert_eq!(decode_days(""), Vec::new());
    }

    #[test]
    fn decode_collapses_duplicate_days() {
        assert_eq!(decode_days("MM"), vec![Weekday::Mon]);
    }

    #[test]
    fn decode_accepts_lowercase() {
        assert_eq!(
            decode_days("mwf"),
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );
        assert_eq!(decode_days("tth"), vec![Weekday::Tue, Weekday::Thu]);
    }

    #[test]
    fn day_tokens_round_trip() {
        for tokens in ["M", "TTH", "MTWTHF", "MWF", "SSU"] {
            let days = decode_days(tokens);
            assert_eq!(decode_days(&encode_days(&days)), days);
        }
        assert_eq!(encode_days(&[Weekday::Tue, Weekday::Thu]), "TTH");
    }

    #[test]
    fn parses_line_with_spacing_and_location() {
        let parsed = parse_line("MWF | 9:00 AM - 9:50 AM | Hall 2").unwrap();
        assert_eq!(
            parsed.days,
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );
        assert_eq!(parsed.start, time(9, 0));
        assert_eq!(parsed.end, time(9, 50));
        assert_eq!(
            parsed.description,
            "Meeting Pattern: MWF | 9:00 AM - 9:50 AM | Hall 2 | Hall 2"
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_line("MWF").is_none());
        assert!(parse_line("MWF|9:00 AM 9:50 AM").is_none());
        assert!(parse_line("MWF|9:00-9:50").is_none());
        assert!(parse_line("MWF|25:00 AM-9:50 AM|Room 1").is_none());
    }

    #[test]
    fn expands_full_weeks_within_range() {
        let row = row(
            "MWF|9:00 AM-9:50 AM|Room 1",
            date(2024, 1, 8),
            date(2024, 1, 19),
        );

        let meetings = expand_row(&row);
        assert_eq!(meetings.len(), 6);

        let dates: Vec<NaiveDate> = meetings.iter().map(|m| m.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 8),
                date(2024, 1, 10),
                date(2024, 1, 12),
                date(2024, 1, 15),
                date(2024, 1, 17),
                date(2024, 1, 19),
            ]
        );

        for meeting in &meetings {
            assert_eq!(meeting.course, "MATH 101");
            assert_eq!(meeting.start, time(9, 0));
            assert_eq!(meeting.end, time(9, 50));
            assert_eq!(
                meeting.description,
                "Meeting Pattern: MWF|9:00 AM-9:50 AM|Room 1 | Room 1"
            );
        }
    }

    #[test]
    fn mid_week_end_excludes_later_weekdays() {
        let row = row(
            "MWF|10:00 AM-10:50 AM",
            date(2024, 1, 8),
            date(2024, 1, 17),
        );

        let dates: Vec<NaiveDate> = expand_row(&row).iter().map(|m| m.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 8),
                date(2024, 1, 10),
                date(2024, 1, 12),
                date(2024, 1, 15),
                date(2024, 1, 17),
            ]
        );
    }

    #[test]
    fn malformed_line_does_not_suppress_siblings() {
        let row = row(
            "MWF\nTTH|1:00 PM-2:15 PM|Lab 3",
            date(2024, 1, 8),
            date(2024, 1, 12),
        );

        let meetings = expand_row(&row);
        let dates: Vec<NaiveDate> = meetings.iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 9), date(2024, 1, 11)]);
        assert_eq!(meetings[0].start, time(13, 0));
        assert_eq!(meetings[0].end, time(14, 15));
    }

    #[test]
    fn mid_week_start_anchors_offsets() {
        // a Wednesday start pulls Monday into the following week
        let row = row(
            "MW|9:00 AM-9:50 AM",
            date(2024, 1, 10),
            date(2024, 1, 16),
        );

        let dates: Vec<NaiveDate> = expand_row(&row).iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 15), date(2024, 1, 10)]);
    }

    #[test]
    fn overnight_range_emitted_as_given() {
        let row = row(
            "F|10:00 PM-1:00 AM",
            date(2024, 1, 8),
            date(2024, 1, 12),
        );

        let meetings = expand_row(&row);
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].date, date(2024, 1, 12));
        assert_eq!(meetings[0].start, time(22, 0));
        assert_eq!(meetings[0].end, time(1, 0));
    }

    #[test]
    fn single_day_range_keeps_only_that_weekday() {
        let monday = date(2024, 1, 8);
        let row = row("MTH|9:00 AM-9:50 AM", monday, monday);

        let dates: Vec<NaiveDate> = expand_row(&row).iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![monday]);
    }

    #[test]
    fn inverted_range_produces_nothing() {
        let row = row("MWF|9:00 AM-9:50 AM", date(2024, 2, 1), date(2024, 1, 1));
        assert!(expand_row(&row).is_empty());
    }
}
