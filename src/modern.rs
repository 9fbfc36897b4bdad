use crate::icon::IconSet;
use crate::node_modules::{PackageDirectories, is_plain_name};
use crate::options::Options;
use std::path::{Path, PathBuf};

/// Loads whole icon collections by name.
///
/// Implementations don't cache; [`Session`](crate::Session) does that for them.
pub trait CollectionLoader: Send + Sync {
    fn load_collection(&self, name: &str) -> Option<IconSet>;
}

impl<F> CollectionLoader for F
where
    F: Fn(&str) -> Option<IconSet> + Send + Sync,
{
    fn load_collection(&self, name: &str) -> Option<IconSet> {
        self(name)
    }
}

/// Reads collections from per-collection `@iconify-json/<name>` packages, falling back to
/// the full `@iconify/json` set when one is installed.
#[derive(Debug, Clone)]
pub struct FsCollectionLoader {
    pub dirs: PackageDirectories,
}

impl FsCollectionLoader {
    pub fn new(dirs: PackageDirectories) -> Self {
        Self { dirs }
    }

    pub fn collection_file(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .find_file(Path::new("@iconify-json").join(name).join("icons.json"))
            .or_else(|| {
                self.dirs
                    .find_file(Path::new("@iconify/json/json").join(format!("{name}.json")))
            })
    }
}

impl Default for FsCollectionLoader {
    fn default() -> Self {
        Self::new(PackageDirectories::default())
    }
}

impl CollectionLoader for FsCollectionLoader {
    fn load_collection(&self, name: &str) -> Option<IconSet> {
        // collection names end up in a file path
        if !is_plain_name(name) {
            return None;
        }

        let file = self.collection_file(name)?;

        match IconSet::from_file(&file) {
            Ok(set) => Some(set),
            Err(_e) => {
                #[cfg(feature = "log")]
                log::debug!("skipping collection {name} at {file:?} because {_e}");

                None
            }
        }
    }
}

/// Search a loaded collection for the first of `ids` and render it.
pub fn search_for_icon<S: AsRef<str>>(
    icon_set: &IconSet,
    collection: &str,
    ids: &[S],
    options: &Options,
) -> Option<String> {
    let icon = icon_set.find_icon(ids)?;

    #[cfg(feature = "log")]
    log::debug!("found icon in {collection}");
    #[cfg(not(feature = "log"))]
    let _ = collection;

    Some(icon.to_svg(Some(options.scale)))
}

#[cfg(test)]
mod test {
    use crate::icon::IconSet;
    use crate::modern::{CollectionLoader, FsCollectionLoader, search_for_icon};
    use crate::node_modules::PackageDirectories;
    use crate::options::Options;
    use std::error::Error;
    use std::fs;

    static EXAMPLE: &str = include_str!("../resources/example.icons.json");

    #[test]
    fn loads_per_collection_package() -> Result<(), Box<dyn Error>> {
        let tmp = tempfile::tempdir()?;
        let pkg = tmp.path().join("node_modules/@iconify-json/demo");
        fs::create_dir_all(&pkg)?;
        fs::write(pkg.join("icons.json"), EXAMPLE)?;

        let loader = FsCollectionLoader::new(PackageDirectories::from_root(tmp.path()));

        let set = loader.load_collection("demo").unwrap();
        assert_eq!(set.prefix, "demo");
        assert!(loader.load_collection("mdi").is_none());

        Ok(())
    }

    #[test]
    fn falls_back_to_full_set() -> Result<(), Box<dyn Error>> {
        let tmp = tempfile::tempdir()?;
        let json = tmp.path().join("node_modules/@iconify/json/json");
        fs::create_dir_all(&json)?;
        fs::write(json.join("demo.json"), EXAMPLE)?;

        let loader = FsCollectionLoader::new(PackageDirectories::from_root(tmp.path()));

        assert!(loader.load_collection("demo").is_some());

        Ok(())
    }

    #[test]
    fn broken_or_suspicious_collections_are_misses() -> Result<(), Box<dyn Error>> {
        let tmp = tempfile::tempdir()?;
        let pkg = tmp.path().join("node_modules/@iconify-json/broken");
        fs::create_dir_all(&pkg)?;
        fs::write(pkg.join("icons.json"), "{ not json")?;

        let loader = FsCollectionLoader::new(PackageDirectories::from_root(tmp.path()));

        assert!(loader.load_collection("broken").is_none());
        assert!(loader.load_collection("../broken").is_none());
        assert!(loader.load_collection("").is_none());

        Ok(())
    }

    #[test]
    fn search_renders_with_scale() -> Result<(), Box<dyn Error>> {
        let set = IconSet::from_json(EXAMPLE)?;
        let options = Options::default().with_scale(2.0);

        let svg = search_for_icon(&set, "demo", &["boxOne", "box-1"], &options).unwrap();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="2em" height="2em""#));

        assert!(search_for_icon(&set, "demo", &["nope"], &options).is_none());

        Ok(())
    }
}
