use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Every prefix a virtual icon import may start with. The first one is canonical.
pub const URL_PREFIXES: [&str; 4] = ["/~icons/", "~icons/", "virtual:icons/", "virtual/icons/"];

static ICON_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = URL_PREFIXES
        .iter()
        .map(|prefix| format!("^{}", regex::escape(prefix)))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&alternatives).expect("prefix pattern is valid")
});

static EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[A-Za-z0-9_]+$").expect("extension pattern is valid"));

/// A parsed virtual icon import, such as `~icons/mdi/home.jsx?raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPath {
    pub collection: String,
    pub icon: String,
    /// Query parameters, keyed by their *value*: `?color=red` becomes `{"red": "color"}`.
    ///
    /// This makes flag-style queries (`?raw`, `?react`) look up by name regardless of
    /// which parameter they were passed as.
    pub query: HashMap<String, String>,
}

impl IconPath {
    /// The `collection:icon` identifier used in messages.
    pub fn id(&self) -> String {
        format!("{}:{}", self.collection, self.icon)
    }
}

/// Whether `path` starts with one of the [`URL_PREFIXES`].
pub fn is_icon_path(path: &str) -> bool {
    ICON_PATH_RE.is_match(path)
}

/// Rewrites any recognized prefix to the canonical `/~icons/`, leaving the rest untouched.
///
/// Paths that aren't icon paths are returned as-is.
pub fn normalize_icon_path(path: &str) -> String {
    ICON_PATH_RE.replace(path, URL_PREFIXES[0]).into_owned()
}

/// Parse a virtual icon path into its collection, icon and query.
///
/// Returns `None` when the path doesn't use one of the icon prefixes, or when it lacks
/// either the collection or the icon segment. Segments after the icon are ignored.
///
/// ```
/// let path = virtual_icons::resolve_icons_path("/~icons/mdi/home.svg").unwrap();
///
/// assert_eq!(path.collection, "mdi");
/// assert_eq!(path.icon, "home");
/// ```
pub fn resolve_icons_path(path: &str) -> Option<IconPath> {
    let prefix = ICON_PATH_RE.find(path)?;
    let mut rest = &path[prefix.end()..];

    let mut query = HashMap::new();
    if let Some((before, raw_query)) = rest.split_once('?') {
        rest = before;

        for (key, value) in url::form_urlencoded::parse(raw_query.as_bytes()) {
            query.insert(value.into_owned(), key.into_owned());
        }
    }

    let rest = EXTENSION_RE.replace(rest, "");

    let mut segments = rest.split('/');
    let collection = segments.next().filter(|s| !s.is_empty())?;
    let icon = segments.next().filter(|s| !s.is_empty())?;

    Some(IconPath {
        collection: collection.into(),
        icon: icon.into(),
        query,
    })
}
