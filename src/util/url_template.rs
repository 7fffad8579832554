//! URL Template Module
//!
//! Parses a `%s` template once and builds concrete URLs from it.

use std::fmt::{Display, Write};

/// Placeholder marker recognised in templates.
pub const PLACEHOLDER: &str = "%s";

// == URL Template ==
/// A pre-split URL template, reusable across any number of builds.
///
/// Holds `placeholders + 1` literal fragments; a template ending with a
/// placeholder keeps its trailing empty fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    fragments: Vec<String>,
}

impl UrlTemplate {
    // == Constructor ==
    /// Splits `template` on every [`PLACEHOLDER`].
    pub fn new(template: &str) -> Self {
        Self {
            fragments: template.split(PLACEHOLDER).map(str::to_string).collect(),
        }
    }

    /// Number of placeholders in the template.
    pub fn placeholders(&self) -> usize {
        self.fragments.len() - 1
    }

    // == Build ==
    /// Substitutes `args` into successive placeholder positions.
    ///
    /// Argument count is not checked: a missing argument leaves its
    /// position empty and surplus arguments are ignored.
    pub fn build(&self, args: &[&dyn Display]) -> String {
        let literal_len: usize = self.fragments.iter().map(String::len).sum();
        let mut url = String::with_capacity(literal_len + 16);
        let mut args = args.iter();

        for (index, fragment) in self.fragments.iter().enumerate() {
            if index > 0 {
                if let Some(arg) = args.next() {
                    // Writing into a String cannot fail
                    let _ = write!(url, "{arg}");
                }
            }
            url.push_str(fragment);
        }

        url
    }
}
