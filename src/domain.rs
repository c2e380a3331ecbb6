use std::fmt;
use std::io::Error;
use std::path::PathBuf;

use derive_setters::Setters;
use polars::error::PolarsError;

/// Columns shown in the simplified view, in display order.
pub const SIMPLIFIED_COLUMNS: [&str; 5] = ["RANK", "NAME", "TEAM", "POS", "PPG"];
/// Column holding the team identifier of a player.
pub const TEAM_COLUMN: &str = "TEAM";
/// Number of records kept when the top-N row limit is active.
pub const ROW_LIMIT: usize = 25;
pub const DEFAULT_DATA_PATH: &str = "nba-metrics-23-24.csv";

pub const HELP_TEXT: &str = "\
courtside - player statistics viewer

View
  c            Toggle simplified / full columns
  t            Toggle top 25 rows (only without team filter)
  f            Select team filter
  r            Reset all filters

Navigation
  j/k, ↑/↓     Move selection
  PgUp/PgDn    Move one page
  g/G, Home/End  Jump to first / last row
  Enter        Select entry in team list
  Esc          Close popup / team list
  Mouse click  Pick a team, click outside closes the list

  ?            Show this help
  q            Quit";

#[derive(Debug)]
pub enum TVError {
    IoError(Error),
    PolarsError(PolarsError),
    LoadingFailed(String),
    FileNotFound,
    PermissionDenied,
    UnknownFileType,
}

impl fmt::Display for TVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TVError::IoError(e) => write!(f, "I/O error: {e}"),
            TVError::PolarsError(e) => write!(f, "Could not parse data: {e}"),
            TVError::LoadingFailed(reason) => write!(f, "Loading failed: {reason}"),
            TVError::FileNotFound => write!(f, "File not found"),
            TVError::PermissionDenied => write!(f, "Permission denied"),
            TVError::UnknownFileType => write!(f, "Unknown file type, expected a .csv file"),
        }
    }
}

impl std::error::Error for TVError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TVError::IoError(e) => Some(e),
            TVError::PolarsError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Error> for TVError {
    fn from(err: Error) -> Self {
        TVError::IoError(err)
    }
}

impl From<PolarsError> for TVError {
    fn from(err: PolarsError) -> Self {
        TVError::PolarsError(err)
    }
}

#[derive(Debug, Clone, Setters)]
#[setters(into)]
pub struct TVConfig {
    pub path: PathBuf,
    /// Milliseconds to wait for a terminal event before redrawing.
    pub event_poll_time: u64,
    pub max_column_width: usize,
    /// Start with the top-N row limit switched on.
    pub start_with_row_limit: bool,
}

impl Default for TVConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            event_poll_time: 100,
            max_column_width: 24,
            start_with_row_limit: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Quit,
    Help,
    Exit,
    Enter,
    MoveUp,
    MoveDown,
    MovePageUp,
    MovePageDown,
    MoveBeginning,
    MoveEnd,
    ToggleColumnMode,
    ToggleRowLimit,
    OpenTeamSelect,
    ResetFilters,
    Click(u16, u16),
    Resize(usize, usize),
}
