use crate::error::Error;
use crate::loader::Session;
use crate::options::Options;
use crate::path::{IconPath, resolve_icons_path};

/// Add `name="value"` to the opening tag, right after `<svg `.
///
/// This is plain text substitution on the first `<svg ` in the markup. Markup without that
/// exact anchor (say, `<svg\n`) is returned unchanged.
pub fn inject_attribute(svg: &str, name: &str, value: &str) -> String {
    svg.replacen("<svg ", &format!("<svg {name}=\"{value}\" "), 1)
}

impl Session {
    /// Resolve an icon and compile it into component source.
    ///
    /// Fails with [`Error::IconNotFound`] when no source has the icon, and with
    /// [`Error::UnknownCompiler`] when `options.compiler` isn't registered.
    pub fn generate_component(&self, path: &IconPath, options: &Options) -> Result<String, Error> {
        let IconPath {
            collection, icon, ..
        } = path;

        let mut svg = self
            .get_icon(collection, icon, options)?
            .ok_or_else(|| Error::IconNotFound {
                collection: collection.clone(),
                icon: icon.clone(),
            })?;

        if let Some(class) = options.default_class.as_deref().filter(|c| !c.is_empty()) {
            svg = inject_attribute(&svg, "class", class);
        }
        if let Some(style) = options.default_style.as_deref().filter(|s| !s.is_empty()) {
            svg = inject_attribute(&svg, "style", style);
        }

        let compiler = self
            .compilers
            .get(&options.compiler)
            .ok_or_else(|| Error::UnknownCompiler(options.compiler.clone()))?;

        Ok(compiler.compile(&svg, collection, icon, options))
    }

    /// Like [`Session::generate_component`], for a raw import path.
    ///
    /// Returns `Ok(None)` if `path` isn't a virtual icon path at all.
    pub fn generate_component_from_path(
        &self,
        path: &str,
        options: &Options,
    ) -> Result<Option<String>, Error> {
        let Some(resolved) = resolve_icons_path(path) else {
            return Ok(None);
        };

        self.generate_component(&resolved, options).map(Some)
    }
}
