// Application state: the output directory and everything the window shows.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use directories::UserDirs;
use iced::Task;
use log::info;

use crate::message::{FileReport, Message};

pub struct App {
    pub output_dir: PathBuf,
    pub generated: Vec<String>,
    pub reports: Vec<FileReport>,
    pub status: Option<String>,
    pub selected: Option<String>,
    pub last_click: Option<(Instant, String)>,
    pub converting: bool,
    pub error_msg: Option<String>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let (output_dir, error_msg) = match resolve_output_dir() {
            Ok(dir) => (dir, None),
            Err(err) => (PathBuf::from("."), Some(err.to_string())),
        };

        info!("writing calendars to {}", output_dir.display());

        let app = Self {
            generated: list_generated(&output_dir),
            output_dir,
            reports: Vec::new(),
            status: None,
            selected: None,
            last_click: None,
            converting: false,
            error_msg,
        };

        (app, Task::none())
    }
}

/// The fixed destination for generated calendars: the user's Desktop,
/// created if missing.
fn resolve_output_dir() -> anyhow::Result<PathBuf> {
    let dirs = UserDirs::new().context("could not determine the home directory")?;
    let desktop = dirs
        .desktop_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dirs.home_dir().join("Desktop"));

    fs::create_dir_all(&desktop)
        .with_context(|| format!("could not create {}", desktop.display()))?;
    Ok(desktop)
}

/// Sorted names of the calendar files currently in the output directory.
pub fn list_generated(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ics"))
        })
        .filter_map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .collect();

    files.sort();
    files
}
