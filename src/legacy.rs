use crate::icon::IconSet;
use crate::node_modules::{PackageDirectories, is_plain_name};
use crate::options::Options;
use std::path::Path;

/// The package holding every collection in the older, single-package layout.
pub const LEGACY_PACKAGE: &str = "@iconify/json";

/// Icon data in the legacy `@iconify/json` layout: one package, one file per collection.
pub trait LegacyLoader: Send + Sync {
    /// Whether the legacy package is installed at all.
    fn package_exists(&self) -> bool;

    fn load_legacy_collection(&self, collection: &str) -> Option<IconSet>;
}

#[derive(Debug, Clone)]
pub struct FsLegacyLoader {
    pub dirs: PackageDirectories,
}

impl FsLegacyLoader {
    pub fn new(dirs: PackageDirectories) -> Self {
        Self { dirs }
    }
}

impl Default for FsLegacyLoader {
    fn default() -> Self {
        Self::new(PackageDirectories::default())
    }
}

impl LegacyLoader for FsLegacyLoader {
    fn package_exists(&self) -> bool {
        self.dirs.package_exists(LEGACY_PACKAGE)
    }

    fn load_legacy_collection(&self, collection: &str) -> Option<IconSet> {
        if !is_plain_name(collection) {
            return None;
        }

        let file = self
            .dirs
            .find_file(Path::new(LEGACY_PACKAGE).join("json").join(format!("{collection}.json")))?;

        IconSet::from_file(&file)
            .inspect_err(|_e| {
                #[cfg(feature = "log")]
                log::debug!("failed to read legacy collection {collection}: {_e}");
            })
            .ok()
    }
}

/// Look up the first of `ids` in the legacy package's copy of `collection`.
///
/// Collections are read afresh on every call.
pub fn search_for_legacy_icon<S: AsRef<str>>(
    loader: &dyn LegacyLoader,
    collection: &str,
    ids: &[S],
    options: &Options,
) -> Option<String> {
    let icon_set = loader.load_legacy_collection(collection)?;
    let icon = icon_set.find_icon(ids)?;

    Some(icon.to_svg(Some(options.scale)))
}

#[cfg(test)]
mod test {
    use crate::legacy::{FsLegacyLoader, LegacyLoader, search_for_legacy_icon};
    use crate::node_modules::PackageDirectories;
    use crate::options::Options;
    use std::error::Error;
    use std::fs;

    static EXAMPLE: &str = include_str!("../resources/example.icons.json");

    #[test]
    fn legacy_layout() -> Result<(), Box<dyn Error>> {
        let tmp = tempfile::tempdir()?;
        let loader = FsLegacyLoader::new(PackageDirectories::from_root(tmp.path()));

        assert!(!loader.package_exists());

        let pkg = tmp.path().join("node_modules/@iconify/json");
        fs::create_dir_all(pkg.join("json"))?;
        fs::write(pkg.join("package.json"), "{}")?;
        fs::write(pkg.join("json/demo.json"), EXAMPLE)?;

        assert!(loader.package_exists());

        let options = Options::default();
        let svg = search_for_legacy_icon(&loader, "demo", &["arrowLeft", "arrow-left"], &options);
        assert!(svg.unwrap().contains("viewBox=\"0 0 24 24\""));

        assert!(search_for_legacy_icon(&loader, "demo", &["nope"], &options).is_none());
        assert!(search_for_legacy_icon(&loader, "mdi", &["home"], &options).is_none());

        Ok(())
    }
}
