// Messages of the converter's update loop.
use std::path::PathBuf;

/// What happened to one input file, with paths reduced to display names.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub source: String,
    pub outcome: Result<String, String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    PickFiles,
    FilesPicked(Option<Vec<PathBuf>>),
    ConversionFinished(Vec<FileReport>),
    SelectGenerated(String),
    DismissError,
}
