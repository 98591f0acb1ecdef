//! Markdown table rendering of the work-breakdown structure.

use tracing::debug;

use crate::task::Task;

fn row(cells: [&str; 5]) -> String {
    format!("| {} | {} | {} | {} | {} |", cells[0], cells[1], cells[2], cells[3], cells[4])
}

/// Column titles followed by the separator row.
pub fn table_header() -> String {
    [
        row(["WBS", "Status", "Task", "Parents", "Duration"]),
        row(["---", "------", "----", "-------", "--------"]),
    ]
    .join("\n")
}

/// A single table row. Finished tasks have their title struck through.
pub fn table_row(task: &Task) -> String {
    let title = if task.status_kind().is_finished() {
        format!("~~{}~~", task.title)
    } else {
        task.title.clone()
    };
    let duration = format!("{:.2}", task.duration);
    row([
        task.id.as_str(),
        task.status.as_str(),
        title.as_str(),
        task.parents.as_str(),
        duration.as_str(),
    ])
}

/// Render the table, honouring active-only and the label/`Type` filter.
pub fn render_table(tasks: &[Task], active_only: bool, filter: Option<&str>) -> String {
    let mut out = table_header();
    out.push('\n');
    let mut rows = 0usize;
    for task in tasks {
        if active_only && task.is_completed() {
            continue;
        }
        if let Some(f) = filter.filter(|f| !f.is_empty()) {
            if !task.matches_filter(f) {
                continue;
            }
        }
        out.push_str(&table_row(task));
        out.push('\n');
        rows += 1;
    }
    debug!(rows, "rendered wbs table");
    out
}
