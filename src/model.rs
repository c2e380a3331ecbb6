use ratatui::layout::{Position, Rect};
use std::path::PathBuf;
use tracing::{error, info, trace};

use crate::domain::{HELP_TEXT, Message, ROW_LIMIT, TVConfig, TVError};
use crate::dropdown::{ALL_TEAMS_LABEL, TeamDropdown};
use crate::loader::{Dataset, LoadHandle, spawn_load};
use crate::table::{TableProjection, project};
use crate::ui::{
    FILTER_BAR_HEIGHT, STATUSLINE_HEIGHT, TABLE_BORDER_HEIGHT, TABLE_HEADER_HEIGHT,
    dropdown_area, dropdown_rows,
};
use crate::view::{ColumnMode, TeamFilter, ViewConfig, ViewState};

#[derive(Debug, PartialEq)]
pub enum Status {
    EMPTY,
    LOADING,
    READY,
    FAILED,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    TABLE,
    DROPDOWN,
    POPUP,
}

#[derive(Default, Clone, Debug)]
pub struct UILayout {
    pub width: usize,
    pub height: usize,
    pub table_height: usize,
}

impl UILayout {
    pub fn from_values(ui_width: usize, ui_height: usize) -> Self {
        let table_height = ui_height.saturating_sub(
            FILTER_BAR_HEIGHT + STATUSLINE_HEIGHT + TABLE_BORDER_HEIGHT + TABLE_HEADER_HEIGHT,
        );
        let layout = UILayout {
            width: ui_width,
            height: ui_height,
            table_height,
        };
        trace!("Build UILayout: {:?}", layout);
        layout
    }

    pub fn area(&self) -> Rect {
        Rect::new(
            0,
            0,
            u16::try_from(self.width).unwrap_or(u16::MAX),
            u16::try_from(self.height).unwrap_or(u16::MAX),
        )
    }
}

#[derive(Clone, Debug)]
pub struct DropdownView {
    pub labels: Vec<String>,
    pub selected: usize,
    pub entries: usize,
}

pub struct UIData {
    pub name: String,
    pub table: TableProjection,
    pub offset_row: usize,
    pub selected_row: usize, // Relative to offset_row
    pub total_records: usize,
    pub column_mode: ColumnMode,
    pub row_limit: bool,
    pub row_limit_enabled: bool,
    pub team: String,
    pub dropdown: Option<DropdownView>,
    pub show_popup: bool,
    pub popup_message: String,
    pub error: Option<String>,
    pub layout: UILayout,
    pub status_message: String,
}

impl UIData {
    pub fn empty() -> Self {
        UIData {
            name: String::new(),
            table: TableProjection::default(),
            offset_row: 0,
            selected_row: 0,
            total_records: 0,
            column_mode: ColumnMode::default(),
            row_limit: false,
            row_limit_enabled: true,
            team: ALL_TEAMS_LABEL.to_string(),
            dropdown: None,
            show_popup: false,
            popup_message: String::new(),
            error: None,
            layout: UILayout::default(),
            status_message: String::new(),
        }
    }
}

/// Loaded records plus everything derived from them.
struct LoadedData {
    dataset: Dataset,
    teams: Vec<String>,
    view: ViewState,
}

pub struct Model {
    config: TVConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    loader: Option<LoadHandle>,
    data: Option<LoadedData>,
    dropdown: Option<TeamDropdown>,
    offset_row: usize,
    curser_row: usize,
    uilayout: UILayout,
    uidata: UIData,
}

impl Model {
    pub fn init(config: &TVConfig, ui_width: usize, ui_height: usize) -> Self {
        let mut model = Self {
            config: config.clone(),
            status: Status::EMPTY,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            loader: None,
            data: None,
            dropdown: None,
            offset_row: 0,
            curser_row: 0,
            uilayout: UILayout::from_values(ui_width, ui_height),
            uidata: UIData::empty(),
        };
        model.uidata.name = Self::file_name(&config.path);
        model.update_uidata();
        model.set_status_message("Started courtside!");
        model
    }

    fn file_name(path: &std::path::Path) -> String {
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("???")
            .to_string()
    }

    /// Starts loading `path` in the background. The result is picked up by `update`.
    pub fn load_data_file(&mut self, path: PathBuf) {
        info!("Loading {:?} ...", path);
        self.uidata.name = Self::file_name(&path);
        self.loader = Some(spawn_load(path));
        self.status = Status::LOADING;
        self.set_status_message(format!("Loading {} ...", self.uidata.name));
    }

    fn poll_loader(&mut self) {
        let Some(handle) = &self.loader else {
            return;
        };
        if let Some(result) = handle.poll() {
            trace!("Load of {:?} finished", handle.path());
            self.loader = None;
            self.finish_loading(result);
        }
    }

    fn finish_loading(&mut self, result: Result<Dataset, TVError>) {
        match result {
            Ok(dataset) => {
                let initial = ViewConfig {
                    row_limit: self.config.start_with_row_limit,
                    ..ViewConfig::default()
                };
                let data = LoadedData {
                    teams: dataset.unique_teams(),
                    view: ViewState::new(&dataset, initial),
                    dataset,
                };
                let message = if data.dataset.is_empty() {
                    format!("{} contains no records", self.uidata.name)
                } else {
                    format!(
                        "Loaded {} records of {} teams",
                        data.dataset.len(),
                        data.teams.len()
                    )
                };
                self.data = Some(data);
                self.status = Status::READY;
                self.uidata.error = None;
                self.update_table_data();
                self.set_status_message(message);
            }
            Err(e) => {
                error!("Loading {} failed: {}", self.uidata.name, e);
                self.data = None;
                self.status = Status::FAILED;
                self.uidata.error = Some(e.to_string());
                self.update_table_data();
                self.set_status_message(format!("Error: {e}"));
            }
        }
    }

    pub fn get_uidata(&self) -> &UIData {
        &self.uidata
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.uidata.status_message = message.into();
    }

    /// Rebuilds the projected table from the current view.
    fn update_table_data(&mut self) {
        self.uidata.table = match &self.data {
            Some(data) => project(
                &data.dataset,
                data.view.rows(),
                data.view.config().column_mode,
                self.config.max_column_width,
            ),
            None => TableProjection::default(),
        };
        self.select_row(self.offset_row + self.curser_row);
    }

    fn update_uidata(&mut self) {
        let uidata = &mut self.uidata;
        uidata.offset_row = self.offset_row;
        uidata.selected_row = self.curser_row;
        uidata.layout = self.uilayout.clone();
        uidata.show_popup = self.modus == Modus::POPUP;
        uidata.dropdown = self.dropdown.as_ref().map(|d| DropdownView {
            labels: d.visible_labels().to_vec(),
            selected: d.selected_visible_row(),
            entries: d.len(),
        });

        if let Some(data) = &self.data {
            let config = data.view.config();
            uidata.total_records = data.dataset.len();
            uidata.column_mode = config.column_mode;
            uidata.row_limit = config.row_limit;
            uidata.row_limit_enabled = data.view.is_row_limit_enabled();
            uidata.team = match &config.team {
                TeamFilter::All => ALL_TEAMS_LABEL.to_string(),
                TeamFilter::Team(team) => team.clone(),
            };
        }
    }

    pub fn quit(&mut self) {
        self.dropdown = None;
        self.status = Status::QUITTING;
    }

    fn ui_resize(&mut self, width: usize, height: usize) {
        trace!(
            "UI was resized! w:{}->{}, h:{}->{}",
            self.uilayout.width, width, self.uilayout.height, height
        );
        self.uilayout = UILayout::from_values(width, height);
        if let Some(dropdown) = self.dropdown.as_mut() {
            dropdown.set_height(dropdown_rows(self.uilayout.area(), dropdown.len()));
        }
        self.select_row(self.offset_row + self.curser_row);
    }

    pub fn update(&mut self, message: Option<Message>) -> Result<(), TVError> {
        self.poll_loader();

        if let Some(msg) = message {
            trace!("Update: Modus {:?}, Message {:?}", self.modus, msg);
            match self.modus {
                Modus::TABLE => match msg {
                    Message::Quit => self.quit(),
                    Message::Help => self.show_help(),
                    Message::MoveUp => self.move_table_selection_up(1),
                    Message::MoveDown => self.move_table_selection_down(1),
                    Message::MovePageUp => self.move_table_selection_up(self.page_size()),
                    Message::MovePageDown => self.move_table_selection_down(self.page_size()),
                    Message::MoveBeginning => self.select_row(0),
                    Message::MoveEnd => self.select_row(usize::MAX),
                    Message::ToggleColumnMode => self.toggle_column_mode(),
                    Message::ToggleRowLimit => self.toggle_row_limit(),
                    Message::OpenTeamSelect => self.open_team_select(),
                    Message::ResetFilters => self.reset_filters(),
                    Message::Resize(width, height) => self.ui_resize(width, height),
                    _ => (),
                },
                Modus::DROPDOWN => match msg {
                    Message::Quit => self.quit(),
                    Message::Exit | Message::OpenTeamSelect => {
                        self.close_dropdown();
                    }
                    Message::Enter => self.confirm_dropdown(),
                    Message::Click(x, y) => self.click_dropdown(x, y),
                    Message::MoveUp => self.move_dropdown(|d| d.move_up(1)),
                    Message::MoveDown => self.move_dropdown(|d| d.move_down(1)),
                    Message::MovePageUp => {
                        let size = self.page_size();
                        self.move_dropdown(|d| d.move_up(size))
                    }
                    Message::MovePageDown => {
                        let size = self.page_size();
                        self.move_dropdown(|d| d.move_down(size))
                    }
                    Message::MoveBeginning => self.move_dropdown(TeamDropdown::move_beginning),
                    Message::MoveEnd => self.move_dropdown(TeamDropdown::move_end),
                    Message::Resize(width, height) => self.ui_resize(width, height),
                    _ => (),
                },
                Modus::POPUP => match msg {
                    Message::Quit => self.quit(),
                    Message::Exit | Message::Help | Message::Enter => self.close_popup(),
                    Message::Resize(width, height) => self.ui_resize(width, height),
                    _ => (),
                },
            }
        }
        Ok(())
    }

    // -------------------- Control handling functions ---------------------- //

    fn page_size(&self) -> usize {
        self.uilayout.table_height.max(1)
    }

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
        self.uidata.popup_message = HELP_TEXT.to_string();
        self.update_uidata();
    }

    fn close_popup(&mut self) {
        trace!("Close popup ...");
        self.modus = self.previous_modus;
        self.previous_modus = Modus::POPUP;
        self.update_uidata();
    }

    /// Applies a view operation. Returns whether the view configuration changed.
    fn change_view(
        &mut self,
        keep_position: bool,
        operation: impl FnOnce(&mut ViewState, &Dataset) -> bool,
    ) -> bool {
        let Some(data) = self.data.as_mut() else {
            trace!("No data loaded, ignoring view change");
            return false;
        };
        let changed = operation(&mut data.view, &data.dataset);
        if changed {
            if !keep_position {
                self.offset_row = 0;
                self.curser_row = 0;
            }
            self.update_table_data();
        }
        changed
    }

    fn describe_rows(&self) -> String {
        match &self.data {
            Some(data) => format!(
                "Showing {} of {} records",
                data.view.rows().len(),
                data.dataset.len()
            ),
            None => String::new(),
        }
    }

    fn toggle_column_mode(&mut self) {
        if self.change_view(true, |view, dataset| view.toggle_column_mode(dataset)) {
            let mode = match self.uidata.column_mode {
                ColumnMode::Simplified => "simplified",
                ColumnMode::Full => "all",
            };
            self.set_status_message(format!("Showing {mode} columns"));
        }
    }

    fn toggle_row_limit(&mut self) {
        if self.change_view(false, |view, dataset| view.toggle_row_limit(dataset)) {
            let message = self.describe_rows();
            self.set_status_message(message);
        } else if self.data.is_some() {
            self.set_status_message(format!(
                "Top {ROW_LIMIT} is not available while a team filter is active"
            ));
        }
    }

    fn reset_filters(&mut self) {
        self.change_view(false, |view, dataset| view.reset_filters(dataset));
        if self.data.is_some() {
            let message = format!("Filters reset. {}", self.describe_rows());
            self.set_status_message(message);
        }
    }

    fn select_team(&mut self, team: TeamFilter) {
        trace!("Select team {:?}", team);
        self.change_view(false, |view, dataset| view.select_team(dataset, team));
        let message = self.describe_rows();
        self.set_status_message(message);
    }

    fn open_team_select(&mut self) {
        let Some(data) = &self.data else {
            return;
        };
        let rows = dropdown_rows(self.uilayout.area(), data.teams.len() + 1);
        self.dropdown = Some(TeamDropdown::open(
            &data.teams,
            &data.view.config().team,
            rows,
        ));
        self.previous_modus = self.modus;
        self.modus = Modus::DROPDOWN;
        self.update_uidata();
    }

    /// Every way out of the team list ends here, which drops the list.
    fn close_dropdown(&mut self) -> Option<TeamFilter> {
        let selected = self.dropdown.take().map(|d| d.selected().clone());
        self.modus = Modus::TABLE;
        self.previous_modus = Modus::DROPDOWN;
        self.update_uidata();
        selected
    }

    fn confirm_dropdown(&mut self) {
        if let Some(team) = self.close_dropdown() {
            self.select_team(team);
        }
    }

    fn click_dropdown(&mut self, x: u16, y: u16) {
        let Some(dropdown) = &self.dropdown else {
            return;
        };
        let area = dropdown_area(self.uilayout.area(), dropdown.len());
        let inner = Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        );
        let position = Position::new(x, y);

        if inner.contains(position) {
            let clicked = dropdown.entry_at((y - inner.y) as usize).cloned();
            if let Some(team) = clicked {
                self.close_dropdown();
                self.select_team(team);
            }
        } else if !area.contains(position) {
            trace!("Click outside of team list at {x}:{y}");
            self.close_dropdown();
        }
    }

    fn move_dropdown(&mut self, movement: impl FnOnce(&mut TeamDropdown)) {
        if let Some(dropdown) = self.dropdown.as_mut() {
            movement(dropdown);
        }
        self.update_uidata();
    }

    /// Moves the curser to an absolute row, scrolling as needed.
    fn select_row(&mut self, row: usize) {
        let nrows = self.uidata.table.nrows();
        if nrows == 0 {
            self.offset_row = 0;
            self.curser_row = 0;
        } else {
            let row = std::cmp::min(row, nrows - 1);
            let height = self.page_size();
            if row < self.offset_row {
                self.offset_row = row;
            } else if row >= self.offset_row + height {
                self.offset_row = row + 1 - height;
            }
            self.curser_row = row - self.offset_row;
        }
        self.update_uidata();
    }

    fn move_table_selection_up(&mut self, size: usize) {
        let row = (self.offset_row + self.curser_row).saturating_sub(size);
        self.select_row(row);
    }

    fn move_table_selection_down(&mut self, size: usize) {
        let row = (self.offset_row + self.curser_row).saturating_add(size);
        self.select_row(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::{Duration, Instant};

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn loaded_model(config: TVConfig) -> Model {
        let mut model = Model::init(&config, 120, 40);
        model.load_data_file(config.path.clone());
        let start = Instant::now();
        while model.status == Status::LOADING && start.elapsed() < Duration::from_secs(30) {
            std::thread::sleep(Duration::from_millis(5));
            model.update(None).unwrap();
        }
        assert_eq!(model.status, Status::READY);
        model
    }

    fn players() -> Model {
        loaded_model(TVConfig::default().path(fixture("players.csv")))
    }

    fn send(model: &mut Model, messages: &[Message]) {
        for &message in messages {
            model.update(Some(message)).unwrap();
        }
    }

    fn column<'a>(model: &'a Model, name: &str) -> Vec<&'a str> {
        let table = &model.get_uidata().table;
        let cidx = table.headers.iter().position(|h| h == name).unwrap();
        table.rows.iter().map(|r| r[cidx].as_str()).collect()
    }

    #[test]
    fn loads_in_background() {
        let model = players();
        let uidata = model.get_uidata();
        assert_eq!(uidata.name, "players.csv");
        assert_eq!(uidata.total_records, 30);
        assert_eq!(uidata.table.nrows(), 30);
        assert_eq!(uidata.table.headers, vec!["RANK", "NAME", "TEAM", "POS", "PPG"]);
        assert_eq!(uidata.column_mode, ColumnMode::Simplified);
        assert_eq!(uidata.team, ALL_TEAMS_LABEL);
        assert_eq!(uidata.status_message, "Loaded 30 records of 14 teams");
    }

    #[test]
    fn load_failure_is_visible() {
        let config = TVConfig::default().path(fixture("missing.csv"));
        let mut model = Model::init(&config, 120, 40);
        model.load_data_file(config.path.clone());
        let start = Instant::now();
        while model.status == Status::LOADING && start.elapsed() < Duration::from_secs(30) {
            std::thread::sleep(Duration::from_millis(5));
            model.update(None).unwrap();
        }
        assert_eq!(model.status, Status::FAILED);
        assert_eq!(model.get_uidata().error.as_deref(), Some("File not found"));
        assert!(model.get_uidata().status_message.starts_with("Error"));
        assert_eq!(model.get_uidata().table.nrows(), 0);

        // The view controls do nothing without data.
        send(&mut model, &[Message::ToggleRowLimit, Message::OpenTeamSelect]);
        assert!(model.get_uidata().dropdown.is_none());
        send(&mut model, &[Message::Quit]);
        assert_eq!(model.status, Status::QUITTING);
    }

    #[test]
    fn parse_error_is_visible() {
        let config = TVConfig::default().path(fixture("overlong.csv"));
        let mut model = Model::init(&config, 120, 40);
        model.load_data_file(config.path.clone());
        let start = Instant::now();
        while model.status == Status::LOADING && start.elapsed() < Duration::from_secs(30) {
            std::thread::sleep(Duration::from_millis(5));
            model.update(None).unwrap();
        }
        assert_eq!(model.status, Status::FAILED);
        assert!(model.get_uidata().error.is_some());
        assert!(model.get_uidata().status_message.starts_with("Error: "));
        assert_eq!(model.get_uidata().table.nrows(), 0);
    }

    #[test]
    fn short_rows_show_position_in_missing_cells() {
        let model = loaded_model(TVConfig::default().path(fixture("ragged.csv")));
        assert_eq!(column(&model, "POS"), vec!["G", "2", "F"]);
        assert_eq!(column(&model, "PPG"), vec!["30.0", "2", "18.2"]);
    }

    #[test]
    fn header_only_file_shows_no_headers() {
        let mut model = loaded_model(TVConfig::default().path(fixture("header_only.csv")));
        assert_eq!(model.get_uidata().status_message, "header_only.csv contains no records");
        assert!(model.get_uidata().table.headers.is_empty());
        send(&mut model, &[Message::ToggleColumnMode]);
        assert!(model.get_uidata().table.headers.is_empty());
    }

    #[test]
    fn start_with_row_limit() {
        let model = loaded_model(
            TVConfig::default()
                .path(fixture("players.csv"))
                .start_with_row_limit(true),
        );
        assert_eq!(model.get_uidata().table.nrows(), ROW_LIMIT);
        assert!(model.get_uidata().row_limit);
    }

    #[test]
    fn toggles_and_reset() {
        let mut model = players();
        send(&mut model, &[Message::ToggleColumnMode]);
        assert_eq!(model.get_uidata().table.headers.len(), 10);
        assert_eq!(model.get_uidata().status_message, "Showing all columns");

        send(&mut model, &[Message::ToggleRowLimit]);
        assert_eq!(model.get_uidata().table.nrows(), ROW_LIMIT);
        assert_eq!(model.get_uidata().status_message, "Showing 25 of 30 records");

        send(&mut model, &[Message::ResetFilters]);
        let uidata = model.get_uidata();
        assert_eq!(uidata.table.nrows(), 30);
        assert_eq!(uidata.column_mode, ColumnMode::Simplified);
        assert!(!uidata.row_limit);
    }

    #[test]
    fn team_selection_with_keys() {
        let mut model = players();
        send(&mut model, &[Message::OpenTeamSelect]);
        let dropdown = model.get_uidata().dropdown.clone().unwrap();
        assert_eq!(dropdown.entries, 15);
        assert_eq!(dropdown.labels[0], ALL_TEAMS_LABEL);
        assert_eq!(dropdown.labels[1], "PHI  Philadelphia 76ers");

        // All teams -> PHI -> DAL
        send(&mut model, &[Message::MoveDown, Message::MoveDown, Message::Enter]);
        assert!(model.get_uidata().dropdown.is_none());
        assert_eq!(model.get_uidata().team, "DAL");
        assert_eq!(column(&model, "NAME"), vec!["Luka Doncic", "Kyrie Irving"]);
        assert!(!model.get_uidata().row_limit_enabled);

        send(&mut model, &[Message::ToggleRowLimit]);
        assert!(!model.get_uidata().row_limit);
        assert!(model.get_uidata().status_message.contains("not available"));
        assert_eq!(model.get_uidata().table.nrows(), 2);

        // Reopening starts on the current team.
        send(&mut model, &[Message::OpenTeamSelect]);
        assert_eq!(model.get_uidata().dropdown.as_ref().unwrap().selected, 2);
        send(&mut model, &[Message::MoveBeginning, Message::Enter]);
        assert_eq!(model.get_uidata().table.nrows(), 30);
        assert_eq!(model.get_uidata().team, ALL_TEAMS_LABEL);
    }

    #[test]
    fn empty_cells_show_position_within_team() {
        let mut model = loaded_model(TVConfig::default().path(fixture("quoted.csv")));
        assert_eq!(column(&model, "RANK"), vec!["1", "2", "3"]);

        // All teams -> BOS -> LAL
        send(&mut model, &[Message::OpenTeamSelect, Message::MoveDown, Message::MoveDown]);
        send(&mut model, &[Message::Enter]);
        assert_eq!(column(&model, "RANK"), vec!["2", "2"]);
        assert_eq!(column(&model, "PPG"), vec!["1", "12.5"]);
    }

    #[test]
    fn click_outside_closes_team_list() {
        let mut model = players();
        send(&mut model, &[Message::OpenTeamSelect, Message::MoveDown]);
        assert!(model.get_uidata().dropdown.is_some());
        send(&mut model, &[Message::Click(0, 0)]);
        assert!(model.get_uidata().dropdown.is_none());
        assert_eq!(model.get_uidata().team, ALL_TEAMS_LABEL);
        assert_eq!(model.get_uidata().table.nrows(), 30);

        // Table messages work again after closing.
        send(&mut model, &[Message::ToggleColumnMode]);
        assert_eq!(model.get_uidata().column_mode, ColumnMode::Full);
    }

    #[test]
    fn click_inside_selects_team() {
        let mut model = players();
        send(&mut model, &[Message::OpenTeamSelect]);
        let area = dropdown_area(model.uilayout.area(), 15);
        // Rows: All teams, PHI, DAL, OKC, ...
        send(&mut model, &[Message::Click(area.x + 3, area.y + 1 + 3)]);
        assert!(model.get_uidata().dropdown.is_none());
        assert_eq!(model.get_uidata().team, "OKC");
        assert_eq!(model.get_uidata().table.nrows(), 3);
    }

    #[test]
    fn click_on_border_keeps_team_list_open() {
        let mut model = players();
        send(&mut model, &[Message::OpenTeamSelect]);
        let area = dropdown_area(model.uilayout.area(), 15);
        send(&mut model, &[Message::Click(area.x, area.y)]);
        assert!(model.get_uidata().dropdown.is_some());
        send(&mut model, &[Message::Exit]);
        assert!(model.get_uidata().dropdown.is_none());
        assert_eq!(model.modus, Modus::TABLE);
    }

    #[test]
    fn quit_releases_team_list() {
        let mut model = players();
        send(&mut model, &[Message::OpenTeamSelect, Message::Quit]);
        assert!(model.dropdown.is_none());
        assert_eq!(model.status, Status::QUITTING);
    }

    #[test]
    fn scrolling_follows_curser() {
        let mut model = players();
        send(&mut model, &[Message::Resize(120, 17)]);
        assert_eq!(model.uilayout.table_height, 10);

        send(&mut model, &[Message::MoveEnd]);
        let uidata = model.get_uidata();
        assert_eq!(uidata.offset_row + uidata.selected_row, 29);
        assert_eq!(uidata.offset_row, 20);

        send(&mut model, &[Message::MovePageUp]);
        let uidata = model.get_uidata();
        assert_eq!(uidata.offset_row + uidata.selected_row, 19);
        assert_eq!(uidata.offset_row, 19);

        send(&mut model, &[Message::MoveBeginning, Message::MoveUp]);
        assert_eq!(model.get_uidata().offset_row, 0);
        assert_eq!(model.get_uidata().selected_row, 0);

        // Column toggles keep the position, filters jump back to the top.
        send(&mut model, &[Message::MovePageDown, Message::ToggleColumnMode]);
        assert_eq!(model.get_uidata().selected_row, 9);
        send(&mut model, &[Message::ToggleRowLimit]);
        assert_eq!(model.get_uidata().selected_row, 0);
    }

    #[test]
    fn help_popup() {
        let mut model = players();
        send(&mut model, &[Message::Help]);
        assert!(model.get_uidata().show_popup);
        assert_eq!(model.get_uidata().popup_message, HELP_TEXT);
        // View keys are ignored while the popup is open.
        send(&mut model, &[Message::ToggleColumnMode]);
        assert_eq!(model.get_uidata().column_mode, ColumnMode::Simplified);
        send(&mut model, &[Message::Exit]);
        assert!(!model.get_uidata().show_popup);
    }
}
