use std::path::{Path, PathBuf};

/// Icon packages are looked for in a set of `node_modules` directories.
///
/// By default, that is `node_modules` in the current directory and in each of its ancestors,
/// closest first, the same order Node uses to resolve packages.
/// Directories don't have to exist yet: a package installed halfway through a session
/// is picked up on the next lookup.
///
/// To add directories to the instance, use [PackageDirectories::append].
///
/// # Example
///
/// ```
/// use virtual_icons::PackageDirectories;
///
/// let dirs = PackageDirectories::from_root("/home/me/project").append(["/opt/shared/node_modules"]);
///
/// assert_eq!(dirs.dirs[0], std::path::Path::new("/home/me/project/node_modules"));
/// ```
#[derive(Debug, Clone)]
pub struct PackageDirectories {
    pub dirs: Vec<PathBuf>,
}

impl PackageDirectories {
    pub fn default() -> Self {
        <Self as Default>::default()
    }

    /// The `node_modules` directories visible from `root`.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        root.as_ref()
            .ancestors()
            .map(|dir| dir.join("node_modules"))
            .into()
    }

    /// Add a list of directories to this `PackageDirectories`
    pub fn append<I, P>(mut self, directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dirs.extend(directories.into_iter().map(Into::into));
        self
    }

    /// The first existing file at `relative` inside any of the directories.
    pub fn find_file<P: AsRef<Path>>(&self, relative: P) -> Option<PathBuf> {
        let relative = relative.as_ref();

        self.dirs
            .iter()
            .map(|dir| dir.join(relative))
            .find(|path| path.is_file())
    }

    /// Whether a package by this name is installed in any of the directories.
    pub fn package_exists(&self, package: &str) -> bool {
        self.find_file(Path::new(package).join("package.json")).is_some()
    }
}

/// Whether `name` can stand for a single path segment, such as a collection in a package name.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\', '.'])
}

/// Anything that turns into an iterator of things that can become paths, can be turned into a `PackageDirectories`.
impl<I, P> From<I> for PackageDirectories
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    fn from(value: I) -> Self {
        let dirs = value.into_iter().map(Into::into).collect();

        PackageDirectories { dirs }
    }
}

impl Default for PackageDirectories {
    fn default() -> Self {
        match std::env::current_dir() {
            Ok(cwd) => Self::from_root(cwd),
            Err(_) => Self::from_root("."),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::node_modules::{PackageDirectories, is_plain_name};
    use std::fs;
    use std::path::Path;

    #[test]
    fn from_root_walks_ancestors() {
        let dirs = PackageDirectories::from_root("/a/b");

        assert_eq!(
            dirs.dirs,
            vec![
                Path::new("/a/b/node_modules"),
                Path::new("/a/node_modules"),
                Path::new("/node_modules"),
            ]
        );
    }

    #[test]
    fn closest_package_wins() -> std::io::Result<()> {
        let tmp = tempfile::tempdir()?;
        let project = tmp.path().join("app");

        for dir in [tmp.path(), project.as_path()] {
            let pkg = dir.join("node_modules/@iconify/json");
            fs::create_dir_all(&pkg)?;
            fs::write(pkg.join("package.json"), "{}")?;
        }

        let dirs = PackageDirectories::from_root(&project);

        assert!(dirs.package_exists("@iconify/json"));
        assert!(!dirs.package_exists("@iconify-json/mdi"));
        assert_eq!(
            dirs.find_file("@iconify/json/package.json"),
            Some(project.join("node_modules/@iconify/json/package.json"))
        );

        Ok(())
    }

    #[test]
    fn appended_directories_are_searched_last() -> std::io::Result<()> {
        let tmp = tempfile::tempdir()?;
        let shared = tmp.path().join("shared");
        fs::create_dir_all(shared.join("pkg"))?;
        fs::write(shared.join("pkg/package.json"), "{}")?;

        let dirs = PackageDirectories::from_root(tmp.path().join("app")).append([&shared]);

        assert_eq!(dirs.dirs.last(), Some(&shared));
        assert!(dirs.package_exists("pkg"));

        Ok(())
    }

    #[test]
    fn plain_names() {
        assert!(is_plain_name("mdi"));
        assert!(is_plain_name("simple-icons"));

        for name in ["", "..", "../mdi", "mdi/extra", "a\\b", "mdi.json"] {
            assert!(!is_plain_name(name), "{name:?}");
        }
    }
}
