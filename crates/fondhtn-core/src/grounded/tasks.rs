//! Task classification and the continuous task id space
//!
//! The grounder numbers tasks in one space: ids `[0, P)` are primitive tasks
//! and ids `[P, P + A)` are abstract tasks at offset `id - P`. `TaskTable`
//! is the only place that arithmetic happens.

use super::sections::{Sections, TASKS};
use super::tokens::Record;
use crate::error::Result;

/// Flag marking a primitive task line
const PRIMITIVE_FLAG: char = '0';

/// A task id resolved into its own space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskId {
    Primitive(usize),
    Abstract(usize),
}

/// Primitive and abstract task names, each in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTable {
    primitive: Vec<String>,
    abstract_tasks: Vec<String>,
}

impl TaskTable {
    /// Classify the `tasks` section
    pub fn from_sections(sections: &Sections<'_>) -> Result<Self> {
        Self::classify(sections.get(TASKS)?)
    }

    /// Classify raw task lines of the form `<flag> <name>`
    pub fn classify(lines: &[&str]) -> Result<Self> {
        let mut table = Self::default();

        for (index, line) in lines.iter().enumerate() {
            let at = Record::new(TASKS, index);
            let mut chars = line.chars();
            let flag = chars.next();
            let separator = chars.next();
            let name = chars.as_str().trim_end();

            match (flag, separator) {
                (Some(flag), Some(sep)) if sep.is_whitespace() && !name.is_empty() => {
                    if flag == PRIMITIVE_FLAG {
                        table.primitive.push(name.to_string());
                    } else {
                        table.abstract_tasks.push(name.to_string());
                    }
                }
                _ => {
                    return Err(at.malformed(format!(
                        "expected '<flag> <task name>', found '{}'",
                        line
                    )));
                }
            }
        }

        Ok(table)
    }

    /// P
    pub fn primitive_count(&self) -> usize {
        self.primitive.len()
    }

    /// A
    pub fn abstract_count(&self) -> usize {
        self.abstract_tasks.len()
    }

    pub fn primitive(&self) -> &[String] {
        &self.primitive
    }

    pub fn abstract_tasks(&self) -> &[String] {
        &self.abstract_tasks
    }

    /// Resolve an id from the continuous space
    pub fn resolve(&self, raw: i64, at: &Record<'_>) -> Result<TaskId> {
        let p = self.primitive.len();
        let total = p + self.abstract_tasks.len();
        match usize::try_from(raw) {
            Ok(id) if id < p => Ok(TaskId::Primitive(id)),
            Ok(id) if id < total => Ok(TaskId::Abstract(id - p)),
            _ => Err(at.out_of_range("tasks", raw, total)),
        }
    }

    /// Resolve an id that must refer to an abstract task
    pub fn resolve_abstract(&self, raw: i64, at: &Record<'_>) -> Result<&str> {
        match self.resolve(raw, at) {
            Ok(TaskId::Abstract(offset)) => Ok(&self.abstract_tasks[offset]),
            _ => Err(at.out_of_range(
                "abstract tasks",
                raw.saturating_sub(self.primitive.len() as i64),
                self.abstract_tasks.len(),
            )),
        }
    }

    /// Name of a resolved task
    pub fn name(&self, id: TaskId) -> &str {
        match id {
            TaskId::Primitive(i) => &self.primitive[i],
            TaskId::Abstract(i) => &self.abstract_tasks[i],
        }
    }

    /// Resolve and name in one step
    pub fn resolve_name(&self, raw: i64, at: &Record<'_>) -> Result<&str> {
        self.resolve(raw, at).map(|id| self.name(id))
    }
}
