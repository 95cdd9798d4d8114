use std::collections::BTreeSet;
use std::sync::Arc;

use claims_dashboard::data::cache::DatasetLoader;
use claims_dashboard::data::filter::filtered_indices;
use claims_dashboard::data::series::{self, CountBucket, PaymentBucket};
use claims_dashboard::{ClaimMetrics, DashboardConfig, Dataset, EmptySelectionPolicy, FilterSelection};

use crate::color::CategoryColors;

// ---------------------------------------------------------------------------
// Multi-select categories shown in the sidebar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Insurer,
    State,
    IncidentType,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Insurer, Category::State, Category::IncidentType];

    pub fn title(self) -> &'static str {
        match self {
            Category::Insurer => "Insurer",
            Category::State => "State",
            Category::IncidentType => "Incident Type",
        }
    }

    pub fn options(self, dataset: &Dataset) -> &BTreeSet<String> {
        match self {
            Category::Insurer => &dataset.insurers,
            Category::State => &dataset.states,
            Category::IncidentType => &dataset.incident_types,
        }
    }

    pub fn selected_mut(self, selection: &mut FilterSelection) -> &mut Option<BTreeSet<String>> {
        match self {
            Category::Insurer => &mut selection.insurers,
            Category::State => &mut selection.states,
            Category::IncidentType => &mut selection.incident_types,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart data for the current filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ChartData {
    pub by_insurer: Vec<CountBucket>,
    pub by_incident_type: Vec<CountBucket>,
    pub monthly: Vec<CountBucket>,
    pub top_states: Vec<CountBucket>,
    pub payments: Vec<PaymentBucket>,
    pub injury: Vec<CountBucket>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    loader: &'static DatasetLoader,

    /// Loaded dataset, shared with the loader cache.
    pub dataset: Arc<Dataset>,

    /// Current sidebar selection.
    pub selection: FilterSelection,

    /// Indices of claims passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    pub metrics: ClaimMetrics,
    pub charts: ChartData,

    /// Stable colours per insurer / incident type.
    pub insurer_colors: CategoryColors,
    pub incident_colors: CategoryColors,

    empty_selection: EmptySelectionPolicy,
    top_states: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(loader: &'static DatasetLoader, dataset: Arc<Dataset>, config: &DashboardConfig) -> Self {
        let mut state = Self {
            loader,
            dataset: Arc::new(Dataset::default()),
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            metrics: ClaimMetrics::default(),
            charts: ChartData::default(),
            insurer_colors: CategoryColors::default(),
            incident_colors: CategoryColors::default(),
            empty_selection: config.empty_selection,
            top_states: config.top_states,
            status_message: None,
        };
        state.set_dataset(dataset);
        state
    }

    /// Ingest a dataset, reset the sidebar to show everything, rebuild colours.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.selection =
            FilterSelection::from_dataset(&dataset).with_empty_selection(self.empty_selection);
        self.insurer_colors = CategoryColors::new(&dataset.insurers);
        self.incident_colors = CategoryColors::new(&dataset.incident_types);
        self.dataset = dataset;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute visible rows, KPIs and chart series after a selection change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.selection);
        let view = self.dataset.select(&self.visible_indices);
        self.metrics = ClaimMetrics::compute(&view);
        self.charts = ChartData {
            by_insurer: series::claims_by_insurer(&view),
            by_incident_type: series::claims_by_incident_type(&view),
            monthly: series::monthly_trend(&view),
            top_states: series::top_states(&view, self.top_states),
            payments: series::payments_by_insurer(&view),
            injury: series::injury_breakdown(&view),
        };
    }

    pub fn top_states(&self) -> usize {
        self.top_states
    }

    /// Select all values of a category.
    pub fn select_all(&mut self, category: Category) {
        let all = category.options(&self.dataset).clone();
        *category.selected_mut(&mut self.selection) = Some(all);
        self.refilter();
    }

    /// Deselect all values of a category.
    pub fn select_none(&mut self, category: Category) {
        *category.selected_mut(&mut self.selection) = Some(BTreeSet::new());
        self.refilter();
    }

    /// Toggle a single value of a category.
    pub fn toggle_value(&mut self, category: Category, value: &str) {
        let selected = category
            .selected_mut(&mut self.selection)
            .get_or_insert_with(BTreeSet::new);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Re-read the source file and reset the sidebar. A failed reload keeps
    /// the current dataset on screen.
    pub fn reload(&mut self) {
        match self.loader.reload() {
            Ok(dataset) => {
                log::info!("Reloaded {} claims from {}", dataset.len(), self.loader.path().display());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to reload dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
