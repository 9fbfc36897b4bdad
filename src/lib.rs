//! Icons as imports, resolved at build time.
//!
//! This crate, `virtual-icons`, is the core of a bundler plugin that lets source code import icons
//! from [Iconify](https://iconify.design) collections as if they were modules:
//!
//! ```js
//! import HomeIcon from '~icons/mdi/home'
//! ```
//!
//! The plugin host intercepts such imports and asks this crate for the module's source.
//!
//! # Quick start
//!
//! ```no_run
//! use virtual_icons::{Options, Session};
//!
//! let session = Session::new("path/to/project");
//! let options = Options::default().with_compiler("svelte");
//!
//! if let Some(source) = session.generate_component_from_path("~icons/mdi/home.svelte", &options)? {
//!     println!("{source}");
//! }
//! # Ok::<_, virtual_icons::Error>(())
//! ```
//!
//! # High level design
//!
//! Turning an import into a component happens in three steps:
//!
//! 1.  *Parsing the path*:
//!
//!     Virtual icon paths start with one of `/~icons/`, `~icons/`, `virtual:icons/` or
//!     `virtual/icons/`, followed by `<collection>/<icon>`, an optional extension and an optional
//!     query. [resolve_icons_path] splits them up; anything else isn't ours and yields `None`.
//!
//! 2.  *Finding the icon*:
//!
//!     A [Session] looks the icon up, first in the user's [CustomCollection]s, then in installed
//!     icon packages: per-collection `@iconify-json/*` packages, or the older all-in-one
//!     `@iconify/json` when [IconSource::Legacy] is chosen. Missing packages can be installed on
//!     the fly ([Options::auto_install]). The icon is tried under a few spellings, see
//!     [candidate_names].
//!
//!     Loaded collections are kept for the whole session.
//!
//! 3.  *Compiling*:
//!
//!     The SVG gets the configured default class and style, and is handed to a [Compiler]
//!     picked by name from the session's [Compilers].
//!
//! A missing icon is not an error until step 3: [Session::get_icon] returns `None`, and only
//! [Session::generate_component] turns that into [Error::IconNotFound].

mod compiler;
mod component;
mod custom;
mod error;
mod icon;
mod install;
mod legacy;
mod loader;
mod modern;
mod node_modules;
mod options;
mod path;
mod warn;

pub use compiler::{Compiler, Compilers};
pub use component::inject_attribute;
pub use custom::{CustomCollection, get_custom_icon};
pub use error::{Error, InstallError, LoadError};
pub use icon::{IconAlias, IconData, IconProps, IconSet, ResolvedIcon};
pub use install::{CommandInstaller, Installer, PackageManager, SETTLE_DELAY};
pub use legacy::{FsLegacyLoader, LEGACY_PACKAGE, LegacyLoader, search_for_legacy_icon};
pub use loader::{Session, candidate_names};
pub use modern::{CollectionLoader, FsCollectionLoader, search_for_icon};
pub use node_modules::PackageDirectories;
pub use options::{IconSource, Options};
pub use path::{IconPath, URL_PREFIXES, is_icon_path, normalize_icon_path, resolve_icons_path};
pub use warn::WarnOnce;
