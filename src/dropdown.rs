use tracing::trace;

use crate::teams::team_label;
use crate::view::TeamFilter;

pub const ALL_TEAMS_LABEL: &str = "All teams";

/// The open team list. It exists only while the list is shown: it is created
/// when the list opens and dropped on every way of closing it.
pub struct TeamDropdown {
    entries: Vec<TeamFilter>,
    labels: Vec<String>,
    curser_row: usize,
    curser_offset: usize,
    height: usize,
}

impl TeamDropdown {
    /// Opens the list with the current selection highlighted.
    pub fn open(teams: &[String], current: &TeamFilter, height: usize) -> Self {
        let mut entries = Vec::with_capacity(teams.len() + 1);
        entries.push(TeamFilter::All);
        entries.extend(teams.iter().cloned().map(TeamFilter::Team));

        let labels = entries.iter().map(Self::label).collect();
        let curser_row = entries.iter().position(|e| e == current).unwrap_or(0);

        let mut dropdown = Self {
            entries,
            labels,
            curser_row,
            curser_offset: 0,
            height: height.max(1),
        };
        dropdown.scroll_to_curser();
        trace!("Team list opened with {} entries", dropdown.entries.len());
        dropdown
    }

    fn label(entry: &TeamFilter) -> String {
        match entry {
            TeamFilter::All => ALL_TEAMS_LABEL.to_string(),
            TeamFilter::Team(team) => team_label(team),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Labels of the entries that fit into the list.
    pub fn visible_labels(&self) -> &[String] {
        let end = std::cmp::min(self.curser_offset + self.height, self.labels.len());
        &self.labels[self.curser_offset..end]
    }

    /// Highlighted row relative to the visible part.
    pub fn selected_visible_row(&self) -> usize {
        self.curser_row - self.curser_offset
    }

    pub fn selected(&self) -> &TeamFilter {
        &self.entries[self.curser_row]
    }

    /// Entry shown on the given visible row, if any.
    pub fn entry_at(&self, visible_row: usize) -> Option<&TeamFilter> {
        if visible_row >= self.height {
            return None;
        }
        self.entries.get(self.curser_offset + visible_row)
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.scroll_to_curser();
    }

    pub fn move_up(&mut self, size: usize) {
        self.curser_row = self.curser_row.saturating_sub(size);
        self.scroll_to_curser();
    }

    pub fn move_down(&mut self, size: usize) {
        self.curser_row = std::cmp::min(self.curser_row + size, self.entries.len() - 1);
        self.scroll_to_curser();
    }

    pub fn move_beginning(&mut self) {
        self.curser_row = 0;
        self.scroll_to_curser();
    }

    pub fn move_end(&mut self) {
        self.curser_row = self.entries.len() - 1;
        self.scroll_to_curser();
    }

    fn scroll_to_curser(&mut self) {
        if self.curser_row < self.curser_offset {
            self.curser_offset = self.curser_row;
        } else if self.curser_row >= self.curser_offset + self.height {
            self.curser_offset = self.curser_row + 1 - self.height;
        }
    }
}

impl Drop for TeamDropdown {
    fn drop(&mut self) {
        trace!("Team list closed");
    }
}
