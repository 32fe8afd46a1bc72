//! SVG presentation attributes attached to every shape.

/// Attribute keys every style carries after construction.
pub const STYLE_KEYS: [&str; 4] = ["stroke", "fill", "fill-opacity", "stroke-opacity"];

/// Ordered attribute map with unique keys.
///
/// Keys are stored in SVG form (hyphenated) and serialized in insertion order.
/// Each shape owns an independent copy taken at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    entries: Vec<(String, String)>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            entries: vec![
                ("stroke".to_string(), "black".to_string()),
                ("fill".to_string(), "green".to_string()),
                ("fill-opacity".to_string(), "1".to_string()),
                ("stroke-opacity".to_string(), "1".to_string()),
            ],
        }
    }
}

impl Style {
    /// Sets an attribute, replacing any existing value.
    ///
    /// Underscores in `key` become hyphens, so `fill_opacity` and
    /// `fill-opacity` name the same attribute.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let key = normalize_key(key);
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Formats the style as `key="value" ` attribute pairs.
    pub fn to_svg_attributes(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}=\"{}\" ", k, escape_attribute(v)))
            .collect()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().replace('_', "-")
}

/// Escapes characters that would terminate or break an attribute value.
pub(crate) fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
