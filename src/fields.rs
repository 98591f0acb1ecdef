//! Enumerations and presentation constants shared by the chart renderers.
//!
//! Status values arrive as free text. They are folded into a closed `Status`
//! enumeration with an explicit `Unknown` variant, and every variant maps to a
//! PlantUML background color (or none) in one exhaustive table.

use std::fmt;

/// Task status, parsed case-insensitively from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    UnderReview,
    Complete,
    Done,
    Blocked,
    Stalled,
    Waiting,
    Milestone,
    Unknown,
}

impl Status {
    /// Parse a free-text status label. Unrecognised labels map to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "in progress" => Status::InProgress,
            "under review" => Status::UnderReview,
            "complete" => Status::Complete,
            "done" => Status::Done,
            "blocked" => Status::Blocked,
            "stalled" => Status::Stalled,
            "waiting" => Status::Waiting,
            "milestone" => Status::Milestone,
            _ => Status::Unknown,
        }
    }

    /// Background color used for this status in PlantUML charts.
    pub fn color(self) -> Option<StatusColor> {
        match self {
            Status::InProgress | Status::UnderReview => Some(StatusColor::DarkSeaGreen),
            Status::Complete | Status::Done => Some(StatusColor::Thistle),
            Status::Blocked | Status::Stalled => Some(StatusColor::Red),
            Status::Waiting => Some(StatusColor::Pink),
            Status::Milestone => Some(StatusColor::Orange),
            Status::Unknown => None,
        }
    }

    /// Exactly `done` or `complete`; used for strike-through and checklists.
    pub fn is_finished(self) -> bool {
        matches!(self, Status::Complete | Status::Done)
    }
}

/// PlantUML color names used to tag chart nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    DarkSeaGreen,
    Thistle,
    Red,
    Pink,
    Orange,
}

impl StatusColor {
    /// PlantUML color name without the leading `#`.
    pub fn name(self) -> &'static str {
        match self {
            StatusColor::DarkSeaGreen => "DarkSeaGreen",
            StatusColor::Thistle => "Thistle",
            StatusColor::Red => "Red",
            StatusColor::Pink => "Pink",
            StatusColor::Orange => "Orange",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.name())
    }
}

/// Color tag for a raw status string, or an empty string when it has none.
pub fn status_color_tag(status: &str) -> String {
    Status::parse(status)
        .color()
        .map(|c| c.to_string())
        .unwrap_or_default()
}

/// Footer stamped onto every PlantUML chart.
pub const FOOTER: &str = "\nfooter\nAs of %date()\nend footer\n";

/// Color legend stamped onto every PlantUML chart.
pub const LEGEND: &str = "
legend right
\t<size:18><u>Legend</u></size>
\t<back:Thistle>Complete</back>
\t<back:DarkSeaGreen>In Process</back>
\t<back:Pink>Waiting on Someone</back>
\t<back:Red>Blocked / Stalled</back>
\t<back:Orange>Milestone</back>
end legend
";
