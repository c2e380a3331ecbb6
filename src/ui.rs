use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use crate::domain::{ROW_LIMIT, TVConfig};
use crate::model::{Model, Status, UIData};
use crate::view::ColumnMode;

pub const FILTER_BAR_HEIGHT: usize = 3;
pub const STATUSLINE_HEIGHT: usize = 1;
pub const TABLE_BORDER_HEIGHT: usize = 2;
pub const TABLE_HEADER_HEIGHT: usize = 1;
pub const DROPDOWN_WIDTH: u16 = 36;

const HIGHLIGHT: Color = Color::Blue;

#[derive(Debug)]
pub struct TableUI {
    column_spacing: u16,
}

/// Area of the team list popup for a screen of size `area`.
pub fn dropdown_area(area: Rect, entries: usize) -> Rect {
    let width = std::cmp::min(DROPDOWN_WIDTH, area.width);
    let wanted = u16::try_from(entries + 2).unwrap_or(u16::MAX);
    let height = std::cmp::min(wanted, area.height.saturating_sub(2).max(3)).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Number of entries the team list can show at once.
pub fn dropdown_rows(area: Rect, entries: usize) -> usize {
    dropdown_area(area, entries).height.saturating_sub(2) as usize
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

impl TableUI {
    pub fn new(_cfg: &TVConfig) -> Self {
        Self { column_spacing: 1 }
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let uidata = model.get_uidata();
        let [filter_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(FILTER_BAR_HEIGHT as u16),
            Constraint::Min(0),
            Constraint::Length(STATUSLINE_HEIGHT as u16),
        ])
        .areas(frame.area());

        self.render_filter_bar(uidata, frame, filter_area);
        match model.status {
            Status::EMPTY | Status::LOADING => self.render_message(
                frame,
                table_area,
                &uidata.name,
                vec![Line::from(uidata.status_message.as_str().yellow())],
            ),
            Status::FAILED => self.render_message(
                frame,
                table_area,
                &uidata.name,
                vec![
                    Line::from("Could not load the player statistics".red().bold()),
                    Line::from(uidata.error.clone().unwrap_or_default()),
                ],
            ),
            Status::READY | Status::QUITTING => self.render_table(uidata, frame, table_area),
        }
        self.render_statusline(uidata, frame, status_area);

        if uidata.dropdown.is_some() {
            self.render_dropdown(uidata, frame);
        }
        if uidata.show_popup {
            self.render_popup(uidata, frame);
        }
    }

    fn render_filter_bar(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let simplified = uidata.column_mode == ColumnMode::Simplified;
        let top_label = format!("{} Top {ROW_LIMIT}", checkbox(uidata.row_limit));
        let top = if uidata.row_limit_enabled {
            Span::from(top_label)
        } else {
            top_label.dark_gray()
        };

        let line = Line::from(vec![
            " c ".blue().bold(),
            format!("{} Simplified columns", checkbox(simplified)).into(),
            "   ".into(),
            " t ".blue().bold(),
            top,
            "   ".into(),
            " f ".blue().bold(),
            "Team: ".into(),
            uidata.team.clone().yellow(),
            "   ".into(),
            " r ".blue().bold(),
            "Reset filters".into(),
        ]);
        let block = Block::bordered()
            .title(Line::from(" NBA Player Stats ".bold()).centered())
            .border_set(border::THICK);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, name: &str, lines: Vec<Line>) {
        let block = Block::bordered().title(format!(" {name} "));
        frame.render_widget(Paragraph::new(lines).centered().block(block), area);
    }

    fn render_table(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let table = &uidata.table;
        let rbegin = uidata.offset_row;
        let rend = std::cmp::min(rbegin + uidata.layout.table_height, table.nrows());

        let rows = table.rows[rbegin.min(rend)..rend]
            .iter()
            .map(|cells| Row::new(cells.iter().map(|c| Cell::from(c.as_str()))));
        let widths = table
            .widths
            .iter()
            .map(|&w| Constraint::Length(w as u16));
        let header = Row::new(table.headers.iter().map(|h| Cell::from(h.as_str())))
            .style(Style::default().add_modifier(Modifier::BOLD))
            .underlined();

        let title = format!(
            " {} [{}/{}] ",
            uidata.name,
            table.nrows(),
            uidata.total_records
        );
        let widget = Table::new(rows, widths)
            .column_spacing(self.column_spacing)
            .header(header)
            .row_highlight_style(Style::new().bg(HIGHLIGHT))
            .block(Block::bordered().title(title));

        let mut state = TableState::default().with_selected(Some(uidata.selected_row));
        frame.render_stateful_widget(widget, area, &mut state);
    }

    fn render_statusline(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let instructions = Line::from(vec![
            " Help ".into(),
            "<?>".blue().bold(),
            " Quit ".into(),
            "<q> ".blue().bold(),
        ]);
        let [message_area, help_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(instructions.width() as u16),
        ])
        .areas(area);
        frame.render_widget(Paragraph::new(uidata.status_message.as_str()), message_area);
        frame.render_widget(Paragraph::new(instructions), help_area);
    }

    fn render_dropdown(&self, uidata: &UIData, frame: &mut Frame) {
        let Some(dropdown) = &uidata.dropdown else {
            return;
        };
        let area = dropdown_area(frame.area(), dropdown.entries);
        frame.render_widget(Clear, area);

        let items = dropdown
            .labels
            .iter()
            .map(|label| ListItem::new(label.as_str()));
        let list = List::new(items)
            .block(Block::bordered().title(" Team "))
            .highlight_style(Style::new().bg(HIGHLIGHT))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(dropdown.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_popup(&self, uidata: &UIData, frame: &mut Frame) {
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(uidata.popup_message.as_str())
            .block(Block::bordered().title(" Help ").border_set(border::THICK));
        frame.render_widget(popup, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropdown_fits_small_lists() {
        let area = Rect::new(0, 0, 120, 40);
        let popup = dropdown_area(area, 5);
        assert_eq!(popup.height, 7);
        assert_eq!(popup.width, DROPDOWN_WIDTH);
        assert_eq!(popup.x, (120 - DROPDOWN_WIDTH) / 2);
        assert_eq!(dropdown_rows(area, 5), 5);
    }

    #[test]
    fn dropdown_is_capped_by_screen() {
        let area = Rect::new(0, 0, 20, 12);
        let popup = dropdown_area(area, 31);
        assert_eq!(popup.height, 10);
        assert_eq!(popup.width, 20);
        assert_eq!(dropdown_rows(area, 31), 8);

        let tiny = Rect::new(0, 0, 10, 2);
        assert_eq!(dropdown_area(tiny, 31).height, 2);
        assert_eq!(dropdown_rows(tiny, 31), 0);
    }
}
