//! Report assembly
//!
//! Combines a flow and its tasks into the canonical Markdown document:
//! title, TOC, then one section per task with its subtasks.

use crate::core::model::{sorted_by_id, Flow, Subtask, Task};
use crate::report::shift::{shift_headers, INPUT_HEADER_SHIFT};
use crate::report::slug::AnchorRegistry;
use crate::report::toc::{build_toc, flow_title, heading_text};

/// Body emitted when a flow has no tasks
pub const EMPTY_TASKS_MESSAGE: &str = "No tasks available for this flow.";

const SEPARATOR: &str = "---";

/// Text of `value` if it has anything besides whitespace
fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn push_subtask(blocks: &mut Vec<String>, subtask: &Subtask) {
    blocks.push(format!(
        "#### {}",
        heading_text(subtask.status, &subtask.id, &subtask.title)
    ));
    if let Some(description) = non_blank(subtask.description.as_ref()) {
        blocks.push(description.to_string());
    }
    if let Some(result) = non_blank(subtask.result.as_ref()) {
        blocks.push(SEPARATOR.to_string());
        blocks.push(result.to_string());
    }
}

fn push_task(blocks: &mut Vec<String>, task: &Task) {
    blocks.push(format!(
        "### {}",
        heading_text(task.status, &task.id, &task.title)
    ));
    if let Some(input) = non_blank(task.input.as_ref()) {
        blocks.push(shift_headers(input, INPUT_HEADER_SHIFT));
    }
    if let Some(result) = non_blank(task.result.as_ref()) {
        blocks.push(SEPARATOR.to_string());
        blocks.push(result.to_string());
    }
    for subtask in sorted_by_id(&task.subtasks, |s| &s.id) {
        push_subtask(blocks, subtask);
    }
}

/// Compile `tasks` (in any order) into the report Markdown.
///
/// Pure: equal inputs always give byte-identical output and the inputs are
/// only borrowed. Each call uses its own anchor registry.
pub fn compile(tasks: &[Task], flow: Option<&Flow>) -> String {
    if tasks.is_empty() {
        return match flow {
            Some(flow) => format!("{}\n\n{}", flow_title(flow), EMPTY_TASKS_MESSAGE),
            None => EMPTY_TASKS_MESSAGE.to_string(),
        };
    }

    let sorted = sorted_by_id(tasks, |t| &t.id);
    let mut registry = AnchorRegistry::new();

    let mut blocks = vec![build_toc(&sorted, flow, &mut registry), SEPARATOR.to_string()];

    for (i, task) in sorted.iter().enumerate() {
        if i > 0 {
            blocks.push(SEPARATOR.to_string());
        }
        push_task(&mut blocks, task);
    }

    blocks.join("\n\n").trim().to_string()
}
