use crate::error::LoadError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_SIZE: f64 = 16.0;
const MAX_ALIAS_DEPTH: usize = 24;

/// Optional geometry and transformations, shared by icons, aliases and set-wide defaults.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconProps {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotate: Option<u8>,
    pub h_flip: Option<bool>,
    pub v_flip: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IconData {
    pub body: String,
    #[serde(flatten)]
    pub props: IconProps,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IconAlias {
    pub parent: String,
    #[serde(flatten)]
    pub props: IconProps,
}

/// A collection of icons in the Iconify JSON format, as shipped by `@iconify-json/*`
/// packages and by the full `@iconify/json` set.
#[derive(Debug, Clone, Deserialize)]
pub struct IconSet {
    pub prefix: String,
    #[serde(default)]
    pub icons: HashMap<String, IconData>,
    #[serde(default)]
    pub aliases: HashMap<String, IconAlias>,
    #[serde(flatten)]
    pub defaults: IconProps,
}

impl IconSet {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Look up an icon or alias by name, with all aliases and defaults applied.
    pub fn icon(&self, name: &str) -> Option<ResolvedIcon> {
        if let Some(data) = self.icons.get(name) {
            return Some(self.finish(&data.body, data.props));
        }

        // walk up the alias chain until we hit a real icon
        let mut chain = Vec::new();
        let mut cursor = name;
        let data = loop {
            if chain.len() >= MAX_ALIAS_DEPTH {
                return None;
            }

            let alias = self.aliases.get(cursor)?;
            chain.push(alias.props);
            cursor = alias.parent.as_str();

            if let Some(data) = self.icons.get(cursor) {
                break data;
            }
        };

        // apply aliases from the one closest to the icon down to the requested name
        let props = chain
            .iter()
            .rev()
            .fold(data.props, |props, alias| merge_props(props, *alias));

        Some(self.finish(&data.body, props))
    }

    /// The first of `names` that exists in this set.
    pub fn find_icon<I, S>(&self, names: I) -> Option<ResolvedIcon>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().find_map(|name| self.icon(name.as_ref()))
    }

    fn finish(&self, body: &str, props: IconProps) -> ResolvedIcon {
        let defaults = self.defaults;

        ResolvedIcon {
            body: body.into(),
            left: props.left.or(defaults.left).unwrap_or(0.0),
            top: props.top.or(defaults.top).unwrap_or(0.0),
            width: props.width.or(defaults.width).unwrap_or(DEFAULT_SIZE),
            height: props.height.or(defaults.height).unwrap_or(DEFAULT_SIZE),
            rotate: props.rotate.unwrap_or(0) % 4,
            h_flip: props.h_flip.unwrap_or(false),
            v_flip: props.v_flip.unwrap_or(false),
        }
    }
}

fn merge_props(parent: IconProps, child: IconProps) -> IconProps {
    let toggle = |a: Option<bool>, b: Option<bool>| match (a, b) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(false) ^ b.unwrap_or(false)),
    };

    IconProps {
        left: child.left.or(parent.left),
        top: child.top.or(parent.top),
        width: child.width.or(parent.width),
        height: child.height.or(parent.height),
        rotate: match (parent.rotate, child.rotate) {
            (None, None) => None,
            (a, b) => Some((a.unwrap_or(0) % 4 + b.unwrap_or(0) % 4) % 4),
        },
        h_flip: toggle(parent.h_flip, child.h_flip),
        v_flip: toggle(parent.v_flip, child.v_flip),
    }
}

/// An icon with every property filled in, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIcon {
    pub body: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Quarter turns clockwise, `0..4`.
    pub rotate: u8,
    pub h_flip: bool,
    pub v_flip: bool,
}

impl ResolvedIcon {
    /// Render a standalone `<svg>` element.
    ///
    /// With a `scale`, the icon is `{scale}em` tall and its width follows the aspect ratio.
    /// A scale of zero (or none) leaves out the `width` and `height` attributes.
    pub fn to_svg(&self, scale: Option<f64>) -> String {
        let mut left = self.left;
        let mut top = self.top;
        let mut width = self.width;
        let mut height = self.height;
        let mut rotate = self.rotate;
        let mut transforms = Vec::new();

        if self.h_flip {
            if self.v_flip {
                rotate += 2;
            } else {
                transforms.push(format!("translate({} {})", num(width + left), num(-top)));
                transforms.push("scale(-1 1)".to_string());
                left = 0.0;
                top = 0.0;
            }
        } else if self.v_flip {
            transforms.push(format!("translate({} {})", num(-left), num(height + top)));
            transforms.push("scale(1 -1)".to_string());
            left = 0.0;
            top = 0.0;
        }

        let rotate = rotate % 4;
        match rotate {
            1 => {
                let center = height / 2.0 + top;
                transforms.insert(0, format!("rotate(90 {} {})", num(center), num(center)));
            }
            2 => {
                transforms.insert(
                    0,
                    format!(
                        "rotate(180 {} {})",
                        num(width / 2.0 + left),
                        num(height / 2.0 + top)
                    ),
                );
            }
            3 => {
                let center = width / 2.0 + left;
                transforms.insert(0, format!("rotate(-90 {} {})", num(center), num(center)));
            }
            _ => {}
        }

        if rotate % 2 == 1 {
            std::mem::swap(&mut left, &mut top);
            std::mem::swap(&mut width, &mut height);
        }

        let body = if transforms.is_empty() {
            self.body.clone()
        } else {
            format!(r#"<g transform="{}">{}</g>"#, transforms.join(" "), self.body)
        };

        let size = match scale.filter(|s| *s > 0.0) {
            Some(scale) => format!(
                r#" width="{}em" height="{}em""#,
                num(scale * width / height),
                num(scale)
            ),
            None => String::new(),
        };

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg"{size} viewBox="{} {} {} {}">{body}</svg>"#,
            num(left),
            num(top),
            num(width),
            num(height),
        )
    }
}

/// Formats a number without float noise: `24.0` as `24`, `0.30000000000000004` as `0.3`, `-0.0` as `0`.
fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0 + 0.0;
    format!("{rounded}")
}
