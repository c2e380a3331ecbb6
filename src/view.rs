use tracing::trace;

use crate::domain::ROW_LIMIT;
use crate::loader::Dataset;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamFilter {
    #[default]
    All,
    Team(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnMode {
    #[default]
    Simplified,
    Full,
}

impl ColumnMode {
    pub fn toggled(self) -> Self {
        match self {
            ColumnMode::Simplified => ColumnMode::Full,
            ColumnMode::Full => ColumnMode::Simplified,
        }
    }
}

/// Every user facing display choice. Team filter and row limit exclude each
/// other: `row_limit` is only ever set while `team` is `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewConfig {
    pub team: TeamFilter,
    pub column_mode: ColumnMode,
    pub row_limit: bool,
}

impl ViewConfig {
    fn normalized(mut self) -> Self {
        if self.team != TeamFilter::All {
            self.row_limit = false;
        }
        self
    }
}

/// Indices into the full record set that are visible under `config`, in
/// record order. Always computed from scratch.
pub fn derive_rows(config: &ViewConfig, dataset: &Dataset) -> Vec<usize> {
    match &config.team {
        TeamFilter::Team(team) => dataset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| record.team() == team)
            .map(|(idx, _)| idx)
            .collect(),
        TeamFilter::All if config.row_limit => (0..dataset.len().min(ROW_LIMIT)).collect(),
        TeamFilter::All => (0..dataset.len()).collect(),
    }
}

/// Owns the view configuration and the derived display set.
///
/// Every operation builds the next configuration, then derives the rows from
/// the full record set again. Returns whether the configuration changed.
#[derive(Debug, Default)]
pub struct ViewState {
    config: ViewConfig,
    rows: Vec<usize>,
}

impl ViewState {
    pub fn new(dataset: &Dataset, config: ViewConfig) -> Self {
        let mut state = Self::default();
        state.apply(dataset, config);
        state
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// The top-N control is only usable without a team filter.
    pub fn is_row_limit_enabled(&self) -> bool {
        self.config.team == TeamFilter::All
    }

    pub fn select_team(&mut self, dataset: &Dataset, team: TeamFilter) -> bool {
        let config = ViewConfig {
            team,
            ..self.config.clone()
        };
        self.apply(dataset, config)
    }

    pub fn toggle_column_mode(&mut self, dataset: &Dataset) -> bool {
        let config = ViewConfig {
            column_mode: self.config.column_mode.toggled(),
            ..self.config.clone()
        };
        self.apply(dataset, config)
    }

    pub fn toggle_row_limit(&mut self, dataset: &Dataset) -> bool {
        if !self.is_row_limit_enabled() {
            trace!("Row limit ignored while {:?} is active", self.config.team);
            return false;
        }
        let config = ViewConfig {
            row_limit: !self.config.row_limit,
            ..self.config.clone()
        };
        self.apply(dataset, config)
    }

    pub fn reset_filters(&mut self, dataset: &Dataset) -> bool {
        self.apply(dataset, ViewConfig::default())
    }

    fn apply(&mut self, dataset: &Dataset, config: ViewConfig) -> bool {
        let config = config.normalized();
        let changed = config != self.config;
        self.config = config;
        self.rows = derive_rows(&self.config, dataset);
        trace!(
            "View {:?} => {} of {} records",
            self.config,
            self.rows.len(),
            dataset.len()
        );
        changed
    }
}
