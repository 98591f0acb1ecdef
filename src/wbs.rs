//! Work-breakdown structure (outline) rendering.
//!
//! Produces a PlantUML `@startwbs` document with one line per task, in input
//! order, beneath a synthetic `* Project` root.

use tracing::debug;

use crate::fields::{status_color_tag, FOOTER, LEGEND};
use crate::task::Task;

/// Options controlling outline rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct WbsOptions {
    /// Tasks deeper than this are marked collapsed. `0` disables collapsing.
    pub floor: usize,
    /// Skip completed tasks.
    pub active_only: bool,
}

/// Render a single outline line for `task`.
///
/// Depth-1 tasks print at two markers since the project root owns level one.
pub fn wbs_line(task: &Task, floor: usize) -> String {
    let depth = task.depth();
    let mut line = "*".repeat(depth.max(2));

    let color = status_color_tag(&task.status);
    if !color.is_empty() {
        line.push('[');
        line.push_str(&color);
        line.push(']');
    }
    if floor > 0 && depth > floor {
        line.push('_');
    }
    line.push_str(&format!(" {}: {}", task.id, task.title));
    line
}

/// Render the full outline document.
pub fn render_wbs(tasks: &[Task], opts: WbsOptions) -> String {
    let mut out = String::from("@startwbs\n* Project\n");
    let mut rendered = 0usize;
    for task in tasks {
        if opts.active_only && task.is_completed() {
            continue;
        }
        out.push_str(&wbs_line(task, opts.floor));
        out.push('\n');
        rendered += 1;
    }
    out.push_str(FOOTER);
    out.push_str(LEGEND);
    out.push_str("@endwbs\n");
    debug!(rendered, skipped = tasks.len() - rendered, "rendered wbs outline");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wbs_line_levels() {
        let l2 = Task::new("1.1", "Test", "2.1.1, 3.1.1").with_duration(4.0);
        let l3 = Task::new("1.1.2", "Test2", "2.1.1, 3.1.1").with_duration(4.0);
        assert_eq!(wbs_line(&l2, 0), "** 1.1: Test");
        assert_eq!(wbs_line(&l3, 0), "*** 1.1.2: Test2");
    }

    #[test]
    fn test_wbs_line_top_level_sits_under_root() {
        let task = Task::new("3", "Launch", "");
        assert_eq!(wbs_line(&task, 0), "** 3: Launch");
    }

    #[test]
    fn test_wbs_line_color_and_collapse() {
        let task = Task::new("1.2.3", "Deploy", "").with_status("Blocked");
        assert_eq!(wbs_line(&task, 0), "***[#Red] 1.2.3: Deploy");
        assert_eq!(wbs_line(&task, 2), "***[#Red]_ 1.2.3: Deploy");
        assert_eq!(wbs_line(&task, 3), "***[#Red] 1.2.3: Deploy");

        let plain = Task::new("1.2.3", "Deploy", "");
        assert_eq!(wbs_line(&plain, 1), "***_ 1.2.3: Deploy");
    }

    #[test]
    fn test_render_wbs_document_shape() {
        let tasks = vec![
            Task::new("1", "Design", "").with_status("Done"),
            Task::new("1.1", "Sketch", "").with_status("In Progress"),
        ];
        let out = render_wbs(&tasks, WbsOptions::default());
        let expected_head = "@startwbs\n* Project\n**[#Thistle] 1: Design\n**[#DarkSeaGreen] 1.1: Sketch\n";
        assert!(out.starts_with(expected_head));
        assert!(out.contains("As of %date()"));
        assert!(out.contains("legend right"));
        assert!(out.ends_with("end legend\n@endwbs\n"));
    }

    #[test]
    fn test_render_wbs_active_only() {
        let tasks = vec![
            Task::new("1", "Design", "").with_status("Complete"),
            Task::new("2", "Build", "").with_status("Waiting"),
        ];
        let out = render_wbs(&tasks, WbsOptions { floor: 0, active_only: true });
        assert!(!out.contains("Design"));
        assert!(out.contains("**[#Pink] 2: Build\n"));
    }
}
