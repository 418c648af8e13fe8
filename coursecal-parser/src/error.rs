#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Workbook has no worksheets")]
    NoWorksheet,
    #[error(transparent)]
    Workbook(#[from] calamine::XlsxError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
