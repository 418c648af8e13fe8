// Message handlers; conversions and the file dialog run as async tasks.
use std::path::Path;
use std::time::{Duration, Instant};

use iced::Task;
use log::warn;

use coursecal_parser::convert_batch;

use crate::message::{FileReport, Message};
use crate::state::{list_generated, App};

const DOUBLE_CLICK: Duration = Duration::from_millis(400);

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::PickFiles => {
            if app.converting {
                return Task::none();
            }

            Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Select Excel Files to Convert")
                        .add_filter("Excel files", &["xlsx"])
                        .pick_files()
                        .await
                        .map(|handles| {
                            handles
                                .iter()
                                .map(|handle| handle.path().to_path_buf())
                                .collect()
                        })
                },
                Message::FilesPicked,
            )
        }
        Message::FilesPicked(None) => Task::none(),
        Message::FilesPicked(Some(paths)) => {
            app.converting = true;
            app.status = None;
            app.reports.clear();

            let output_dir = app.output_dir.clone();
            Task::perform(
                async move {
                    convert_batch(&paths, &output_dir)
                        .into_iter()
                        .map(|outcome| FileReport {
                            source: display_name(&outcome.source),
                            outcome: outcome
                                .result
                                .map(|path| display_name(&path))
                                .map_err(|err| err.to_string()),
                        })
                        .collect()
                },
                Message::ConversionFinished,
            )
        }
        Message::ConversionFinished(reports) => {
            app.converting = false;

            let converted = reports
                .iter()
                .filter(|report| report.outcome.is_ok())
                .count();
            if converted > 0 {
                app.status = Some(format!("Converted {converted} file(s)."));
            }

            app.reports = reports;
            app.generated = list_generated(&app.output_dir);
            Task::none()
        }
        Message::SelectGenerated(name) => {
            let now = Instant::now();
            let double = app
                .last_click
                .as_ref()
                .is_some_and(|(at, prev)| *prev == name && now.duration_since(*at) < DOUBLE_CLICK);

            if double {
                app.last_click = None;
                open_generated(app, &name);
            } else {
                app.last_click = Some((now, name.clone()));
                app.selected = Some(name);
            }
            Task::none()
        }
        Message::DismissError => {
            app.error_msg = None;
            Task::none()
        }
    }
}

fn open_generated(app: &mut App, name: &str) {
    let path = app.output_dir.join(name);

    if !path.exists() {
        app.error_msg = Some(format!("File does not exist: {}", path.display()));
        app.generated = list_generated(&app.output_dir);
        return;
    }

    if let Err(err) = opener::open(&path) {
        warn!("could not open {}: {err}", path.display());
        app.error_msg = Some(format!("Could not open file: {err}"));
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
