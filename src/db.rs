//! Loading task lists and boards from their on-disk shapes.
//!
//! Tasks come from header-driven CSV: the `Task` and `Title` columns are
//! required, `Parents`, `Duration`, `Status`, `Labels`, `Repo`, `Body` and
//! `Number` are recognised, and every other column lands in the task's `fields`
//! map. Boards come from JSON (`{"columns": [{"name", "cards"}]}`).

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ChartError, Result};
use crate::kanban::{Board, STATUS_FIELD};
use crate::task::Task;

/// Input path meaning standard input.
pub const STDIN: &str = "-";

/// In-memory task list for a single rendering pass.
#[derive(Debug, Default)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// Load tasks from a CSV file path, or stdin when `input` is `-`.
    pub fn load(input: &str) -> Result<Self> {
        let content = read_input(input)?;
        let db = Database::from_csv(&content)?;
        if db.tasks.is_empty() {
            warn!(input, "no tasks found in input");
        }
        Ok(db)
    }

    /// Decode tasks from CSV text.
    pub fn from_csv(content: &str) -> Result<Self> {
        let mut records = parse_csv_records(content).into_iter();
        let Some((_, header)) = records.next() else {
            return Ok(Database::default());
        };
        let columns = HeaderMap::new(&header)?;

        let mut tasks = Vec::new();
        for (line, fields) in records {
            if fields.len() == 1 && fields[0].trim().is_empty() {
                continue;
            }
            if fields.len() != header.len() {
                return Err(ChartError::malformed(
                    line,
                    format!("expected {} fields, found {}", header.len(), fields.len()),
                ));
            }
            tasks.push(columns.decode(&header, fields, line)?);
        }
        debug!(count = tasks.len(), "decoded tasks from csv");
        Ok(Database { tasks })
    }
}

/// Load a board for kanban rendering.
///
/// A `.json` input is read as a board and regrouped when `column` is not
/// `Status`; anything else is read as a task CSV and grouped by `column`.
pub fn load_board(input: &str, column: &str) -> Result<Board> {
    if input.ends_with(".json") {
        let content = read_input(input)?;
        let mut board: Board = serde_json::from_str(&content)?;
        if column != STATUS_FIELD {
            board.regroup(column);
        }
        return Ok(board);
    }
    let db = Database::load(input)?;
    Ok(Board::from_tasks(&db.tasks, column))
}

fn read_input(input: &str) -> Result<String> {
    let mut content = String::new();
    if input == STDIN {
        io::stdin().read_to_string(&mut content)?;
    } else {
        File::open(Path::new(input))?.read_to_string(&mut content)?;
    }
    Ok(content)
}

/// Column positions resolved from the header row.
struct HeaderMap {
    id: usize,
    title: usize,
    parents: Option<usize>,
    duration: Option<usize>,
    status: Option<usize>,
    labels: Option<usize>,
    repo: Option<usize>,
    body: Option<usize>,
    number: Option<usize>,
}

const KNOWN_COLUMNS: [&str; 9] = [
    "Task", "Title", "Parents", "Duration", "Status", "Labels", "Repo", "Body", "Number",
];

impl HeaderMap {
    fn new(header: &[String]) -> Result<Self> {
        let find = |name: &str| header.iter().position(|h| h == name);
        Ok(HeaderMap {
            id: find("Task").ok_or_else(|| ChartError::MissingColumn("Task".into()))?,
            title: find("Title").ok_or_else(|| ChartError::MissingColumn("Title".into()))?,
            parents: find("Parents"),
            duration: find("Duration"),
            status: find("Status"),
            labels: find("Labels"),
            repo: find("Repo"),
            body: find("Body"),
            number: find("Number"),
        })
    }

    fn decode(&self, header: &[String], fields: Vec<String>, line: usize) -> Result<Task> {
        let get = |idx: Option<usize>| idx.map(|i| fields[i].clone()).unwrap_or_default();

        let duration = match get(self.duration).trim() {
            "" => 0.0,
            raw => raw
                .parse::<f32>()
                .ok()
                .filter(|d| *d >= 0.0)
                .ok_or_else(|| ChartError::malformed(line, format!("invalid duration '{}'", raw)))?,
        };
        let number = match get(self.number).trim() {
            "" => 0,
            raw => raw
                .parse::<u64>()
                .map_err(|_| ChartError::malformed(line, format!("invalid number '{}'", raw)))?,
        };
        let labels = get(self.labels)
            .split(';')
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        let extra = header
            .iter()
            .zip(fields.iter())
            .filter(|(h, v)| !KNOWN_COLUMNS.contains(&h.as_str()) && !v.is_empty())
            .map(|(h, v)| (h.clone(), v.clone()))
            .collect();

        Ok(Task {
            id: fields[self.id].trim().to_string(),
            title: fields[self.title].clone(),
            parents: get(self.parents),
            duration,
            status: get(self.status),
            labels,
            fields: extra,
            repo: get(self.repo),
            body: get(self.body),
            number,
        })
    }
}

/// Split CSV text into records of fields, tagged with the 1-based line each
/// record starts on. Quoted fields may contain commas, newlines and `""` escapes.
fn parse_csv_records(content: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current_field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current_field));
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current_field));
                records.push((record_line, std::mem::take(&mut fields)));
                line += 1;
                record_line = line;
            }
            '\n' => {
                current_field.push(ch);
                line += 1;
            }
            _ => current_field.push(ch),
        }
    }
    if !current_field.is_empty() || !fields.is_empty() {
        fields.push(current_field);
        records.push((record_line, fields));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Task,Title,Parents,Duration,Status,Labels,Type\n\
1,Design,,2,Done,,\n\
1.1,\"Sketch, then review\",1,1.5,In Progress,ux;epic,epic\n\
1.2,Build,\"1, 1.1\",,,,\n";

    #[test]
    fn test_from_csv_maps_headers() {
        let db = Database::from_csv(SAMPLE).unwrap();
        assert_eq!(db.tasks.len(), 3);

        let sketch = &db.tasks[1];
        assert_eq!(sketch.id, "1.1");
        assert_eq!(sketch.title, "Sketch, then review");
        assert_eq!(sketch.duration, 1.5);
        assert_eq!(sketch.labels, vec!["ux", "epic"]);
        assert_eq!(sketch.field("Type"), Some("epic"));

        let build = &db.tasks[2];
        assert_eq!(build.parent_refs(), vec!["1", "1.1"]);
        assert_eq!(build.duration, 0.0);
        assert!(build.fields.is_empty());
    }

    #[test]
    fn test_from_csv_multiline_body_and_escaped_quotes() {
        let csv = "Task,Title,Body\n1,\"Say \"\"hi\"\"\",\"line one\nline two\"\n2,Next,\n";
        let db = Database::from_csv(csv).unwrap();
        assert_eq!(db.tasks[0].title, "Say \"hi\"");
        assert_eq!(db.tasks[0].body, "line one\nline two");
        assert_eq!(db.tasks[1].id, "2");
    }

    #[test]
    fn test_from_csv_crlf_and_blank_lines() {
        let csv = "Task,Title\r\n1,One\r\n\r\n2,Two";
        let db = Database::from_csv(csv).unwrap();
        let titles: Vec<&str> = db.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn test_from_csv_missing_column() {
        let err = Database::from_csv("Id,Title\n1,One\n").unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn(c) if c == "Task"));
    }

    #[test]
    fn test_from_csv_malformed_records() {
        let err = Database::from_csv("Task,Title,Duration\n1,One,2\n2,Two,soon\n").unwrap_err();
        assert!(matches!(err, ChartError::MalformedRecord { line: 3, .. }));

        let err = Database::from_csv("Task,Title\n1,One,extra\n").unwrap_err();
        assert!(matches!(err, ChartError::MalformedRecord { line: 2, .. }));

        let err = Database::from_csv("Task,Title,Duration\n1,One,-3\n").unwrap_err();
        assert!(matches!(err, ChartError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(Database::from_csv("").unwrap().tasks.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let db = Database::load(path.to_str().unwrap()).unwrap();
        assert_eq!(db.tasks.len(), 3);
    }

    #[test]
    fn test_load_board_from_csv_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("tasks.csv");
        std::fs::write(&csv, SAMPLE).unwrap();
        let board = load_board(csv.to_str().unwrap(), STATUS_FIELD).unwrap();
        let names: Vec<&str> = board.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Done", "In Progress", "No Status"]);

        let json = dir.path().join("board.json");
        std::fs::write(
            &json,
            r#"{"columns":[{"name":"Todo","cards":[{"title":"a","fields":{"Area":"api"}},{"title":"b"}]}]}"#,
        )
        .unwrap();
        let board = load_board(json.to_str().unwrap(), "Area").unwrap();
        let names: Vec<&str> = board.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["api", "No Area"]);
    }
}
