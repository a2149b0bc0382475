//! YAML front-matter splitting and typed access.
//!
//! A front-matter block must start on the very first line of the file:
//!
//! ```markdown
//! ---
//! title: Deploying
//! date: 2020-01-01
//! tags: [ops, k8s]
//! ---
//!
//! Body starts here...
//! ```
//!
//! Files without a leading `---` line have empty front-matter.

use serde_yaml::{Mapping, Value};

use crate::error::FrontMatterError;

const DELIMITER: &str = "---";

/// Parsed front-matter, kept as an insertion-ordered YAML mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter(Mapping);

impl FrontMatter {
    /// Parse the YAML between the delimiters. Blank or `null` blocks are empty.
    pub fn parse(yaml: &str) -> Result<Self, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(mapping) => Ok(Self(mapping)),
            Value::Null => Ok(Self::default()),
            _ => Err(FrontMatterError::NotAMapping),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `title`, coerced to a string whatever its YAML type. A null title is absent.
    pub fn title(&self) -> Option<String> {
        self.get("title").filter(|v| !v.is_null()).map(display_value)
    }

    /// `date`, coerced to a string. serde_yaml keeps unquoted dates as strings.
    pub fn date(&self) -> Option<String> {
        self.get("date").map(display_value)
    }

    /// One entry per element of `tags`, only when `tags` is a sequence.
    pub fn tags(&self) -> Vec<String> {
        match self.get("tags") {
            Some(Value::Sequence(tags)) => tags.iter().map(display_value).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Mapping> for FrontMatter {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

/// Split `raw` into its front-matter and the remaining body.
///
/// The body borrows from `raw`. An opening delimiter without a closing one is
/// an error rather than being silently treated as body text.
pub fn split(raw: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let Some(rest) = strip_opening_delimiter(raw) else {
        return Ok((FrontMatter::default(), raw));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(&['\r', '\n'][..]) == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((FrontMatter::parse(yaml)?, body));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

fn strip_opening_delimiter(raw: &str) -> Option<&str> {
    let end = raw.find('\n')?;
    if raw[..end].trim_end_matches('\r') == DELIMITER {
        Some(&raw[end + 1..])
    } else {
        None
    }
}

/// Render a YAML value the way it reads in the source file.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => display_value(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
