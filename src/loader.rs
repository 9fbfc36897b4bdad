use crate::compiler::Compilers;
use crate::custom::get_custom_icon;
use crate::error::Error;
use crate::icon::IconSet;
use crate::install::{CommandInstaller, Installer};
use crate::legacy::{FsLegacyLoader, LEGACY_PACKAGE, LegacyLoader, search_for_legacy_icon};
use crate::modern::{CollectionLoader, FsCollectionLoader, search_for_icon};
use crate::node_modules::{PackageDirectories, is_plain_name};
use crate::options::{IconSource, Options};
use crate::warn::WarnOnce;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};

static CAMEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z])([A-Z])").expect("camel case pattern is valid"));
static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z])([0-9]+)").expect("digits pattern is valid"));

/// The names `icon` may go by in an icon set, in the order they are tried:
/// as written, kebab-cased (`arrowLeft` → `arrow-left`), and with digits split off (`box1` → `box-1`).
pub fn candidate_names(icon: &str) -> [String; 3] {
    [
        icon.to_string(),
        CAMEL_RE.replace_all(icon, "${1}-${2}").to_lowercase(),
        DIGITS_RE.replace_all(icon, "${1}-${2}").into_owned(),
    ]
}

type CollectionSlot = Arc<Mutex<Option<Arc<IconSet>>>>;

/// One build or dev-server session.
///
/// A session holds everything that lives as long as the build does: the loaded collections,
/// whether the legacy package is known to be installed, the packages installed so far and the
/// warnings already shown. It is `Send + Sync`, so a build can resolve icons from many threads.
///
/// ```no_run
/// use virtual_icons::{Options, Session};
///
/// let session = Session::new(".");
/// let options = Options::default().with_auto_install(true);
///
/// let component = session.generate_component_from_path("~icons/mdi/home.js", &options)?;
/// # Ok::<_, virtual_icons::Error>(())
/// ```
pub struct Session {
    collections: Box<dyn CollectionLoader>,
    legacy: Box<dyn LegacyLoader>,
    installer: Box<dyn Installer>,
    pub(crate) compilers: Compilers,
    warnings: WarnOnce,
    legacy_exists: AtomicBool,
    cache: Mutex<HashMap<String, CollectionSlot>>,
    installed: Mutex<HashSet<String>>,
    /// Held while the legacy package is being installed.
    legacy_install: Mutex<()>,
}

/// What a single icon source made of a request.
enum Lookup {
    /// Found it. Stop here.
    Found(String),
    /// This source owns the request but has no such icon. Stop here, too.
    Settled,
    /// Not this source's business. Try the next.
    Pass,
}

#[derive(Debug, Copy, Clone)]
enum Strategy {
    Modern,
    Legacy,
}

impl Strategy {
    fn order(source: IconSource) -> &'static [Strategy] {
        match source {
            IconSource::Auto | IconSource::Modern => &[Strategy::Modern],
            IconSource::Legacy => &[Strategy::Legacy],
        }
    }
}

impl Session {
    /// A session reading icon packages from the `node_modules` directories above `root`,
    /// and installing missing ones with the package manager used in `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        let dirs = PackageDirectories::from_root(root);

        Self::with_sources(
            FsCollectionLoader::new(dirs.clone()),
            FsLegacyLoader::new(dirs),
            CommandInstaller::new(root),
        )
    }

    pub fn with_sources<C, L, I>(collections: C, legacy: L, installer: I) -> Self
    where
        C: CollectionLoader + 'static,
        L: LegacyLoader + 'static,
        I: Installer + 'static,
    {
        let legacy_exists = legacy.package_exists();

        Self {
            collections: Box::new(collections),
            legacy: Box::new(legacy),
            installer: Box::new(installer),
            compilers: Compilers::default(),
            warnings: WarnOnce::new(),
            legacy_exists: AtomicBool::new(legacy_exists),
            cache: Mutex::new(HashMap::new()),
            installed: Mutex::new(HashSet::new()),
            legacy_install: Mutex::new(()),
        }
    }

    pub fn with_compilers(mut self, compilers: Compilers) -> Self {
        self.compilers = compilers;
        self
    }

    pub fn compilers_mut(&mut self) -> &mut Compilers {
        &mut self.compilers
    }

    pub fn warnings(&self) -> &WarnOnce {
        &self.warnings
    }

    pub fn legacy_exists(&self) -> bool {
        self.legacy_exists.load(Ordering::Acquire)
    }

    /// Resolve `collection:icon` to SVG markup.
    ///
    /// A custom collection by that name is asked first; if it has no such icon, the built-in
    /// collections are tried through [`Session::get_builtin_icon`].
    pub fn get_icon(
        &self,
        collection: &str,
        icon: &str,
        options: &Options,
    ) -> Result<Option<String>, Error> {
        if let Some(custom) = options.custom_collections.get(collection) {
            if let Some(svg) = get_custom_icon(custom, collection, icon, options) {
                if !svg.starts_with("<svg") {
                    self.warnings.warn(format!(
                        "custom icon `{icon}` in `{collection}` is not a valid SVG"
                    ));
                }

                return Ok(Some(svg));
            }

            #[cfg(feature = "log")]
            log::debug!("custom collection {collection} has no {icon}, trying built-in icons");
        }

        self.get_builtin_icon(collection, icon, options, true)
    }

    /// Resolve `collection:icon` from installed icon packages only.
    ///
    /// Missing collections are reported through [`Session::warnings`] when `warn` is set, and
    /// yield `Ok(None)`. Only a failed package install is an error.
    pub fn get_builtin_icon(
        &self,
        collection: &str,
        icon: &str,
        options: &Options,
        warn: bool,
    ) -> Result<Option<String>, Error> {
        let ids = candidate_names(icon);

        for strategy in Strategy::order(options.icon_source) {
            let lookup = match strategy {
                Strategy::Modern => self.lookup_modern(collection, &ids, options, warn)?,
                Strategy::Legacy => self.lookup_legacy(collection, &ids, options)?,
            };

            match lookup {
                Lookup::Found(svg) => return Ok(Some(svg)),
                Lookup::Settled => return Ok(None),
                Lookup::Pass => {}
            }
        }

        if warn {
            self.warn_missing(collection);
        }

        Ok(None)
    }

    fn lookup_modern(
        &self,
        collection: &str,
        ids: &[String],
        options: &Options,
        warn: bool,
    ) -> Result<Lookup, Error> {
        let Some(icon_set) = self.collection(collection, options)? else {
            if options.icon_source == IconSource::Modern {
                if warn {
                    self.warn_missing(collection);
                }

                return Ok(Lookup::Settled);
            }

            return Ok(Lookup::Pass);
        };

        // a loaded collection has the final say, found or not
        Ok(match search_for_icon(&icon_set, collection, ids, options) {
            Some(svg) => Lookup::Found(svg),
            None => Lookup::Settled,
        })
    }

    fn lookup_legacy(
        &self,
        collection: &str,
        ids: &[String],
        options: &Options,
    ) -> Result<Lookup, Error> {
        if options.auto_install && !self.legacy_exists() {
            // later callers wait here until the install has settled
            let _installing = self.legacy_install.lock();

            // only a package that got installed sets the flag; it is never reset
            if !self.legacy_exists() && self.install_once(LEGACY_PACKAGE)? {
                self.legacy_exists.store(true, Ordering::Release);
            }
        }

        Ok(
            match search_for_legacy_icon(self.legacy.as_ref(), collection, ids, options) {
                Some(svg) => Lookup::Found(svg),
                None => Lookup::Settled,
            },
        )
    }

    /// Get a collection from the cache, or load it, installing its package if allowed.
    ///
    /// Callers asking for the same collection wait for each other, so a collection is loaded,
    /// and its package installed, at most once per session. Misses are not cached: another
    /// request may find a package that was installed in the meantime.
    fn collection(&self, name: &str, options: &Options) -> Result<Option<Arc<IconSet>>, Error> {
        let slot = Arc::clone(self.cache.lock().entry(name.to_string()).or_default());
        let mut slot = slot.lock();

        if let Some(icon_set) = slot.as_ref() {
            return Ok(Some(Arc::clone(icon_set)));
        }

        #[cfg(feature = "log")]
        log::debug!("loading collection {name}");

        let mut icon_set = self.collections.load_collection(name);

        if icon_set.is_none()
            && options.auto_install
            && !self.legacy_exists()
            && is_plain_name(name)
        {
            if self.install_once(&format!("@iconify-json/{name}"))? {
                icon_set = self.collections.load_collection(name);
            }
        }

        let icon_set = icon_set.map(Arc::new);
        *slot = icon_set.clone();

        Ok(icon_set)
    }

    /// Install `package` unless this session already did. Returns whether it ran an install.
    fn install_once(&self, package: &str) -> Result<bool, Error> {
        if !self.installed.lock().insert(package.to_string()) {
            return Ok(false);
        }

        #[cfg(feature = "log")]
        log::debug!("installing missing package {package}");

        if let Err(e) = self.installer.install(package, true) {
            // a failed install may be retried by a later request
            self.installed.lock().remove(package);
            return Err(e.into());
        }

        self.installer.settle();
        Ok(true)
    }

    fn warn_missing(&self, collection: &str) {
        self.warnings.warn(format!(
            "failed to load `@iconify-json/{collection}`, have you installed it?"
        ));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::with_sources(
            FsCollectionLoader::default(),
            FsLegacyLoader::default(),
            CommandInstaller::new("."),
        )
    }
}
