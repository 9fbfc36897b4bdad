use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("icon `{collection}:{icon}` not found")]
    IconNotFound { collection: String, icon: String },
    #[error("unknown compiler: {0}")]
    UnknownCompiler(String),
    #[error("failed to install an icon package")]
    Install(#[from] InstallError),
}

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("no package manager found on PATH")]
    NoPackageManager,
    #[error("failed to run the package manager")]
    Io(#[from] std::io::Error),
    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Why an icon set could not be read. Loaders report these as a miss.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("icon set could not be read")]
    Io(#[from] std::io::Error),
    #[error("icon set is not valid Iconify JSON")]
    Json(#[from] serde_json::Error),
}
