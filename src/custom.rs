use crate::options::Options;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

type LoaderFn = dyn Fn(&str) -> Option<String> + Send + Sync;

/// A user-defined collection, consulted before any installed icon set of the same name.
#[derive(Clone)]
pub enum CustomCollection {
    /// Icon names mapped to their SVG markup.
    Inline(HashMap<String, String>),
    /// Called with the icon name.
    Loader(Arc<LoaderFn>),
    /// A directory of `<icon>.svg` files.
    Directory(PathBuf),
}

impl CustomCollection {
    pub fn inline<I, K, V>(icons: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        CustomCollection::Inline(
            icons
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn loader<F>(loader: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        CustomCollection::Loader(Arc::new(loader))
    }

    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        CustomCollection::Directory(dir.into())
    }
}

impl fmt::Debug for CustomCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomCollection::Inline(icons) => f
                .debug_tuple("Inline")
                .field(&icons.keys().collect::<Vec<_>>())
                .finish(),
            CustomCollection::Loader(_) => f.write_str("Loader(..)"),
            CustomCollection::Directory(dir) => f.debug_tuple("Directory").field(dir).finish(),
        }
    }
}

/// Ask a custom collection for `icon`. Empty results count as a miss.
pub fn get_custom_icon(
    custom: &CustomCollection,
    collection: &str,
    icon: &str,
    _options: &Options,
) -> Option<String> {
    let svg = match custom {
        CustomCollection::Inline(icons) => icons.get(icon).cloned(),
        CustomCollection::Loader(loader) => loader(icon),
        CustomCollection::Directory(dir) => {
            // icon names end up in a file path
            if icon.contains(['/', '\\']) || icon.starts_with('.') {
                return None;
            }

            std::fs::read_to_string(dir.join(format!("{icon}.svg")))
                .inspect_err(|_e| {
                    #[cfg(feature = "log")]
                    log::debug!("no custom icon {collection}:{icon} in {dir:?}: {_e}");
                })
                .ok()
        }
    };

    #[cfg(not(feature = "log"))]
    let _ = collection;

    svg.filter(|svg| !svg.is_empty())
}
