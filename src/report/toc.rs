//! Table of contents
//!
//! Emits the flow title and a nested bullet list of task/subtask links.
//! Anchors come from the shared per-document registry.

use crate::core::model::{sorted_by_id, Flow, Id, Status, Task};
use crate::report::slug::AnchorRegistry;

/// Display text shared by headings and TOC entries: `<glyph> <id>. <title>`
pub fn heading_text(status: Status, id: &Id, title: &str) -> String {
    format!("{} {}. {}", status.glyph(), id, title)
}

/// Level-1 title line for a flow
pub fn flow_title(flow: &Flow) -> String {
    format!("# {}", heading_text(flow.status, &flow.id, &flow.title))
}

fn toc_entry(indent: &str, text: &str, registry: &mut AnchorRegistry) -> String {
    let anchor = registry.slug(text);
    format!("{}- [{}](#{})", indent, text, anchor)
}

/// Build the TOC block for `tasks` (already sorted by id).
///
/// The flow title, when present, claims its anchor before any entry.
pub fn build_toc(tasks: &[&Task], flow: Option<&Flow>, registry: &mut AnchorRegistry) -> String {
    let mut lines = Vec::new();

    if let Some(flow) = flow {
        registry.slug(&heading_text(flow.status, &flow.id, &flow.title));
        lines.push(flow_title(flow));
        if !tasks.is_empty() {
            lines.push(String::new());
        }
    }

    for task in tasks {
        let text = heading_text(task.status, &task.id, &task.title);
        lines.push(toc_entry("", &text, registry));

        for subtask in sorted_by_id(&task.subtasks, |s| &s.id) {
            let text = heading_text(subtask.status, &subtask.id, &subtask.title);
            lines.push(toc_entry("  ", &text, registry));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Subtask;

    fn task(id: &str, title: &str, status: Status, subtasks: Vec<Subtask>) -> Task {
        Task {
            id: Id::from(id),
            title: title.to_string(),
            status,
            input: None,
            result: None,
            subtasks,
        }
    }

    fn subtask(id: &str, title: &str) -> Subtask {
        Subtask {
            id: Id::from(id),
            title: title.to_string(),
            status: Status::Waiting,
            description: None,
            result: None,
        }
    }

    #[test]
    fn test_heading_text_format() {
        assert_eq!(
            heading_text(Status::Finished, &Id::from("3"), "Scan ports"),
            "✅ 3. Scan ports"
        );
    }

    #[test]
    fn test_toc_nested_entries() {
        let t = task(
            "1",
            "Recon",
            Status::Running,
            vec![subtask("12", "whois"), subtask("2", "dns")],
        );
        let mut registry = AnchorRegistry::new();
        let toc = build_toc(&[&t], None, &mut registry);

        assert_eq!(
            toc,
            "- [⚡ 1. Recon](#1-recon)\n  - [⏳ 2. dns](#2-dns)\n  - [⏳ 12. whois](#12-whois)"
        );
    }

    #[test]
    fn test_toc_flow_title_first() {
        let flow = Flow {
            id: Id::from("7"),
            title: "Recon".to_string(),
            status: Status::Failed,
        };
        let t = task("7", "Recon", Status::Failed, vec![]);
        let mut registry = AnchorRegistry::new();
        let toc = build_toc(&[&t], Some(&flow), &mut registry);

        // Same display text as the title, so the entry gets the suffix
        assert_eq!(toc, "# ❌ 7. Recon\n\n- [❌ 7. Recon](#7-recon-1)");
    }

    #[test]
    fn test_toc_empty_tasks() {
        let mut registry = AnchorRegistry::new();
        assert_eq!(build_toc(&[], None, &mut registry), "");

        let flow = Flow {
            id: Id::from("1"),
            title: "Empty".to_string(),
            status: Status::Created,
        };
        assert_eq!(build_toc(&[], Some(&flow), &mut registry), "# 📝 1. Empty");
    }

    #[test]
    fn test_toc_unknown_status_uses_created_glyph() {
        let t = task("1", "Odd", Status::Unknown, vec![]);
        let mut registry = AnchorRegistry::new();
        assert!(build_toc(&[&t], None, &mut registry).starts_with("- [📝 1. Odd]"));
    }
}
