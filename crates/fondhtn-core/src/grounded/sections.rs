//! Section splitting for grounded output
//!
//! The grounder writes a sequence of sections, each introduced by a `;;`
//! marker followed by a free-text header. Headers are normalized into keys
//! such as `state_features` or `initial_abstract_task`.

use tracing::debug;

use crate::error::{Error, Result};

/// Marker preceding every section header
pub const SECTION_DELIMITER: &str = ";;";

pub const STATE_FEATURES: &str = "state_features";
pub const ACTIONS: &str = "actions";
pub const INITIAL_STATE: &str = "initial_state";
pub const GOAL: &str = "goal";
pub const TASKS: &str = "tasks";
pub const INITIAL_ABSTRACT_TASK: &str = "initial_abstract_task";
pub const METHODS: &str = "methods";

/// Header key the grounder uses for the combined task list
const COMPOUND_TASKS_HEADER: &str = "tasks__primitive_and_abstract";

/// Sections whose content is one logical line with no count line in front
const SINGLE_LINE_SECTIONS: [&str; 3] = [INITIAL_STATE, GOAL, INITIAL_ABSTRACT_TASK];

/// One named section with its non-empty content lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub name: String,
    pub lines: Vec<&'a str>,
}

/// Sections in the order they appear in the grounded text
#[derive(Debug, Clone, Default)]
pub struct Sections<'a> {
    sections: Vec<Section<'a>>,
}

impl<'a> Sections<'a> {
    /// Split raw grounded text into sections
    ///
    /// Anything before the first delimiter is ignored. A header that
    /// appears twice keeps its first position and its last content.
    pub fn split(text: &'a str) -> Self {
        let mut sections: Vec<Section<'a>> = Vec::new();

        for chunk in text.split(SECTION_DELIMITER).skip(1) {
            let mut lines = chunk.lines();
            let Some(header) = lines.next() else {
                continue;
            };
            let mut name = normalize_header(header);
            if name == COMPOUND_TASKS_HEADER {
                name = TASKS.to_string();
            }

            if !SINGLE_LINE_SECTIONS.contains(&name.as_str()) {
                // Count line
                lines.next();
            }
            let content: Vec<&'a str> = lines.filter(|line| !line.trim().is_empty()).collect();

            debug!(section = %name, lines = content.len(), "Split grounded section");

            match sections.iter_mut().find(|s| s.name == name) {
                Some(existing) => existing.lines = content,
                None => sections.push(Section {
                    name,
                    lines: content,
                }),
            }
        }

        Self { sections }
    }

    /// Content lines of a required section
    pub fn get(&self, name: &str) -> Result<&[&'a str]> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.lines.as_slice())
            .ok_or_else(|| Error::MissingSection(name.to_string()))
    }

    /// First content line of a single-line section
    pub fn single_line(&self, name: &str) -> Result<&'a str> {
        self.get(name)?
            .first()
            .copied()
            .ok_or_else(|| Error::malformed(name, 0, "section has no content line"))
    }
}

/// Normalize a section header into a lookup key
///
/// Every non-word character becomes a separator, surrounding separators are
/// trimmed, the remaining ones turn into underscores (one per character) and
/// the result is lowercased: `#state features` becomes `state_features`.
pub fn normalize_header(header: &str) -> String {
    let spaced: String = header
        .chars()
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect();

    spaced
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
