use crate::error::InstallError;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// How long to wait after an install before looking for the new files.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Makes sure a package is present, installing it when needed.
pub trait Installer: Send + Sync {
    fn install(&self, package: &str, dev: bool) -> Result<(), InstallError>;

    /// Block until a fresh install is visible on disk.
    fn settle(&self) {
        std::thread::sleep(SETTLE_DELAY);
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    const LOCK_FILES: [(&'static str, PackageManager); 5] = [
        ("pnpm-lock.yaml", PackageManager::Pnpm),
        ("yarn.lock", PackageManager::Yarn),
        ("bun.lockb", PackageManager::Bun),
        ("bun.lock", PackageManager::Bun),
        ("package-lock.json", PackageManager::Npm),
    ];

    /// Pick the package manager whose lock file is closest to `root`.
    pub fn detect(root: &Path) -> Option<Self> {
        root.ancestors().find_map(|dir| {
            Self::LOCK_FILES
                .iter()
                .find(|(file, _)| dir.join(file).is_file())
                .map(|(_, manager)| *manager)
        })
    }

    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments that add `package`, as a dev dependency if `dev` is set.
    pub fn install_args(self, package: &str, dev: bool) -> Vec<String> {
        let mut args = vec![match self {
            PackageManager::Npm => "install".to_string(),
            _ => "add".to_string(),
        }];

        if dev {
            args.push(match self {
                PackageManager::Bun => "-d".to_string(),
                _ => "-D".to_string(),
            });
        }

        args.push(package.into());
        args
    }
}

/// Installs packages by running the project's package manager in `root`.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    pub root: PathBuf,
    /// Overrides lock file detection.
    pub manager: Option<PackageManager>,
}

impl CommandInstaller {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            manager: None,
        }
    }

    pub fn with_manager(mut self, manager: PackageManager) -> Self {
        self.manager = Some(manager);
        self
    }

    pub fn manager(&self) -> PackageManager {
        self.manager
            .or_else(|| PackageManager::detect(&self.root))
            .unwrap_or(PackageManager::Npm)
    }
}

impl Installer for CommandInstaller {
    fn install(&self, package: &str, dev: bool) -> Result<(), InstallError> {
        let manager = self.manager();
        let program = which::which(manager.program()).map_err(|_| InstallError::NoPackageManager)?;
        let args = manager.install_args(package, dev);

        #[cfg(feature = "log")]
        log::info!("installing {package} with {}", manager.program());

        let status = Command::new(program)
            .args(&args)
            .current_dir(&self.root)
            .status()?;

        if !status.success() {
            return Err(InstallError::Failed {
                command: format!("{} {}", manager.program(), args.join(" ")),
                status,
            });
        }

        Ok(())
    }
}
