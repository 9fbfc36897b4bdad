use crate::custom::CustomCollection;
use serde::Deserialize;
use std::collections::HashMap;

/// Where built-in collections come from.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSource {
    /// Per-collection packages only.
    Modern,
    /// The single `@iconify/json` package.
    Legacy,
    /// Per-collection `@iconify-json/*` packages. A collection that can't be loaded is
    /// reported but never looked up in the legacy package.
    ///
    /// Unrecognized values in a configuration mean this, too.
    #[default]
    #[serde(other)]
    Auto,
}

/// Settings for one build or dev-server session.
///
/// Everything except the custom collections can be read from JSON through [`Options::from_json`]:
///
/// ```
/// use virtual_icons::{IconSource, Options};
///
/// let options = Options::from_json(r#"{ "compiler": "svelte", "iconSource": "modern", "scale": 1 }"#)?;
///
/// assert_eq!(options.compiler, "svelte");
/// assert_eq!(options.icon_source, IconSource::Modern);
/// assert!(!options.auto_install);
/// # Ok::<_, serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub compiler: String,
    #[serde(skip)]
    pub custom_collections: HashMap<String, CustomCollection>,
    pub default_class: Option<String>,
    pub default_style: Option<String>,
    pub icon_source: IconSource,
    pub auto_install: bool,
    /// Height of rendered icons in `em`. Zero leaves the size to the consumer.
    pub scale: f64,
}

impl Options {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    pub fn with_custom_collection(
        mut self,
        name: impl Into<String>,
        collection: CustomCollection,
    ) -> Self {
        self.custom_collections.insert(name.into(), collection);
        self
    }

    pub fn with_default_class(mut self, class: impl Into<String>) -> Self {
        self.default_class = Some(class.into());
        self
    }

    pub fn with_default_style(mut self, style: impl Into<String>) -> Self {
        self.default_style = Some(style.into());
        self
    }

    pub fn with_icon_source(mut self, icon_source: IconSource) -> Self {
        self.icon_source = icon_source;
        self
    }

    pub fn with_auto_install(mut self, auto_install: bool) -> Self {
        self.auto_install = auto_install;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            compiler: "raw".into(),
            custom_collections: HashMap::new(),
            default_class: None,
            default_style: None,
            icon_source: IconSource::Auto,
            auto_install: false,
            scale: 1.2,
        }
    }
}
