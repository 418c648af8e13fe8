use ics::{
    escape_text,
    properties::{Description, DtEnd, DtStart, Summary},
};

use crate::{Calendar, Meeting};

impl Calendar {
    #[must_use]
    pub fn to_ics(&self) -> ics::ICalendar<'_> {
        let mut icalendar = ics::ICalendar::new("2.0", &self.name);

        for meeting in &self.meetings {
            icalendar.add_event(meeting.to_ics());
        }

        icalendar
    }
}

impl Meeting {
    #[must_use]
    pub fn to_ics(&self) -> ics::Event<'_> {
        let start = format!(
            "{}T{}00",
            self.date.format("%Y%m%d"),
            self.start.format("%H%M")
        );

        let end = format!(
            "{}T{}00",
            self.date.format("%Y%m%d"),
            self.end.format("%H%M")
        );

        let id = format!("{}_{}", start, self.course.replace(' ', "-"));

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));
        ics_event.push(DtEnd::new(end));
        ics_event.push(Summary::new(escape_text(&self.course)));
        ics_event.push(Description::new(escape_text(&self.description)));

        ics_event
    }
}
