use crate::options::Options;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Turns SVG markup into component source for one target framework.
pub trait Compiler: Send + Sync {
    fn compile(&self, svg: &str, collection: &str, icon: &str, options: &Options) -> String;
}

impl<F> Compiler for F
where
    F: Fn(&str, &str, &str, &Options) -> String + Send + Sync,
{
    fn compile(&self, svg: &str, collection: &str, icon: &str, options: &Options) -> String {
        self(svg, collection, icon, options)
    }
}

/// Compilers by name. [`Compilers::default`] knows `raw`, `svelte` and `web-components`.
#[derive(Clone)]
pub struct Compilers {
    compilers: HashMap<String, Arc<dyn Compiler>>,
}

impl Compilers {
    /// A registry without any compilers.
    pub fn empty() -> Self {
        Self {
            compilers: HashMap::new(),
        }
    }

    pub fn register<C>(&mut self, name: impl Into<String>, compiler: C) -> &mut Self
    where
        C: Compiler + 'static,
    {
        self.compilers.insert(name.into(), Arc::new(compiler));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Compiler> {
        self.compilers.get(name).map(|c| c.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.compilers.keys().map(String::as_str)
    }
}

impl Default for Compilers {
    fn default() -> Self {
        let mut compilers = Self::empty();
        compilers
            .register("raw", raw)
            .register("svelte", svelte)
            .register("web-components", web_components);
        compilers
    }
}

impl fmt::Debug for Compilers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.names().collect::<Vec<_>>();
        names.sort_unstable();
        f.debug_tuple("Compilers").field(&names).finish()
    }
}

fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// The markup itself as the default export.
pub fn raw(svg: &str, _collection: &str, _icon: &str, _options: &Options) -> String {
    format!("export default {}", js_string(svg))
}

/// A Svelte component forwarding its props onto the root `<svg>`.
pub fn svelte(svg: &str, _collection: &str, _icon: &str, _options: &Options) -> String {
    let Some(start) = svg.find("<svg ") else {
        return svg.into();
    };
    let Some(open_end) = svg[start..].find('>').map(|i| start + i) else {
        return svg.into();
    };

    format!("{} {{...$$props}}{}", &svg[..open_end], &svg[open_end..])
}

/// A custom element class rendering the icon into its shadow root.
pub fn web_components(svg: &str, collection: &str, icon: &str, _options: &Options) -> String {
    let mut identifier = pascal_case(&format!("{collection}-{icon}"));
    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, 'I');
    }

    format!(
        "export default class {identifier} extends HTMLElement {{\n  \
         constructor() {{\n    \
         super()\n    \
         this.attachShadow({{ mode: 'open' }}).innerHTML = {}\n  \
         }}\n\
         }}\n",
        js_string(svg)
    )
}

/// `mdi-arrow-left` as `MdiArrowLeft`.
fn pascal_case(s: &str) -> String {
    s.split(['-', '_', ':'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use crate::compiler::{Compilers, pascal_case};
    use crate::options::Options;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M0 0"/></svg>"#;

    fn compile(name: &str, collection: &str, icon: &str) -> String {
        Compilers::default()
            .get(name)
            .unwrap()
            .compile(SVG, collection, icon, &Options::default())
    }

    #[test]
    fn raw_exports_string() {
        assert_eq!(
            compile("raw", "mdi", "home"),
            r#"export default "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\"><path d=\"M0 0\"/></svg>""#
        );
    }

    #[test]
    fn svelte_spreads_props() {
        assert_eq!(
            compile("svelte", "mdi", "home"),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" {...$$props}><path d="M0 0"/></svg>"#
        );
    }

    #[test]
    fn web_component_class_name() {
        let source = compile("web-components", "mdi", "arrow-left");
        assert!(source.starts_with("export default class MdiArrowLeft extends HTMLElement {"));
        assert!(source.contains("attachShadow({ mode: 'open' }).innerHTML = \"<svg"));

        let source = compile("web-components", "123", "icon");
        assert!(source.starts_with("export default class I123Icon "));
    }

    #[test]
    fn custom_compilers() {
        let mut compilers = Compilers::empty();
        assert!(compilers.get("raw").is_none());

        compilers.register("id", |_: &str, collection: &str, icon: &str, _: &Options| {
            format!("{collection}/{icon}")
        });

        let output = compilers
            .get("id")
            .unwrap()
            .compile(SVG, "mdi", "home", &Options::default());
        assert_eq!(output, "mdi/home");
    }

    #[test]
    fn pascal_case_parts() {
        assert_eq!(pascal_case("ri-apps-line"), "RiAppsLine");
        assert_eq!(pascal_case("carbon-add--alt"), "CarbonAddAlt");
    }
}
