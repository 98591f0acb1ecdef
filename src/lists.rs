//! List-style artifacts: the bug table, the epic checklist and per-epic story files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ChartError, Result};
use crate::task::Task;

/// Markdown table of tasks labelled `bug`.
pub fn render_bug_list(tasks: &[Task], active_only: bool) -> String {
    let mut out = String::from("| Repo | Status | Title |\n| --- | --- | --- |\n");
    for task in tasks {
        if active_only && task.is_completed() {
            continue;
        }
        if task.is_bug() {
            out.push_str(&format!("| {} | {} | {} |\n", task.repo, task.status, task.title));
        }
    }
    out
}

/// Markdown checklist of epics, ticked when the epic is done or complete.
pub fn render_epic_list(tasks: &[Task]) -> String {
    tasks
        .iter()
        .filter(|t| t.is_epic())
        .map(|t| {
            let mark = if t.status_kind().is_finished() { "x" } else { " " };
            format!("- [{}] {}\n", mark, t.title)
        })
        .collect()
}

/// Front matter plus body for a single epic story page.
pub fn epic_story(task: &Task) -> String {
    format!(
        "---\ntitle: \"{id}: {title}\"\nlinkTitle: {id}\n---\n\n**Status:** {status} \n\n{body}",
        id = task.id,
        title = task.title,
        status = task.status,
        body = task.body,
    )
}

/// Write one `<id>.md` story per epic into `dir`, which must already exist.
///
/// Returns the paths written, in input order.
pub fn write_epic_stories(tasks: &[Task], dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ChartError::MissingEpicDir(dir.to_path_buf()));
    }
    let mut written = Vec::new();
    for task in tasks.iter().filter(|t| t.is_epic()) {
        let path = dir.join(format!("{}.md", task.id));
        fs::write(&path, epic_story(task))?;
        debug!(path = %path.display(), "wrote epic story");
        written.push(path);
    }
    info!(count = written.len(), dir = %dir.display(), "epic stories written");
    Ok(written)
}
