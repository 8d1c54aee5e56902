use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Diagram(#[from] arbor::Error),

    #[error("invalid payload: {0}")]
    Payload(#[from] arbor::OptionsError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("no node labelled {0:?}")]
    UnknownLabel(String),

    #[error("node {0:?} is hidden under a collapsed ancestor")]
    NotVisible(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::UnknownLabel(_) | CliError::NotVisible(_) => 64,
            CliError::Payload(_) | CliError::Diagram(_) => 65,
            CliError::Io(_) | CliError::Logger(_) => 74,
        }
    }
}
