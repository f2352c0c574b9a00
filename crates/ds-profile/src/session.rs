//! Tabs of loaded datasets
//!
//! A [`Session`] owns an ordered list of tabs, one of which is active. Each
//! tab owns its dataset, its page position and column/chart selection, and
//! caches the column types and validation report for the dataset version
//! they were computed from. Paging never touches the cache; replacing the
//! dataset does.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use ds_core::{Dataset, Pager, Record};

use crate::charts::{prepare_chart, ChartKind, PreparedChart};
use crate::column_types::{classify, ColumnTypeMap};
use crate::stats::{stats, ColumnStats};
use crate::validation::{validate, ValidationReport};
use crate::ProfileError;

/// Tab identifier, assigned from 1 upwards
pub type TabId = u64;

/// Title of a tab with nothing loaded
pub const NEW_TAB_TITLE: &str = "New Tab";

/// Results derived from one dataset version
#[derive(Debug, Default)]
struct DerivedCache {
    version: u64,
    column_types: Option<Arc<ColumnTypeMap>>,
    validation: Option<Arc<ValidationReport>>,
}

impl DerivedCache {
    /// Drop everything computed for an older version
    fn invalidate_unless(&mut self, version: u64) {
        if self.version != version {
            *self = DerivedCache {
                version,
                ..Default::default()
            };
        }
    }
}

/// One open dataset
#[derive(Debug)]
pub struct Tab {
    id: TabId,
    title: String,
    file_name: Option<String>,
    dataset: Dataset,
    pager: Pager,
    selected_columns: Vec<String>,
    chart_kind: Option<ChartKind>,
    cache: RwLock<DerivedCache>,
}

impl Tab {
    fn new(id: TabId) -> Self {
        Self {
            id,
            title: NEW_TAB_TITLE.to_string(),
            file_name: None,
            dataset: Dataset::empty(),
            pager: Pager::default(),
            selected_columns: Vec::new(),
            chart_kind: None,
            cache: RwLock::new(DerivedCache::default()),
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn has_data(&self) -> bool {
        !self.dataset.is_empty()
    }

    /// Replace the tab's dataset.
    ///
    /// Goes back to page 1 and clears the column and chart selection.
    pub fn load(&mut self, dataset: Dataset, file_name: impl Into<String>, title: impl Into<String>) {
        self.dataset = dataset;
        self.file_name = Some(file_name.into());
        self.title = title.into();
        self.pager.reset(self.dataset.row_count());
        self.selected_columns.clear();
        self.chart_kind = None;

        info!(
            "Tab {} loaded {} rows from {}",
            self.id,
            self.dataset.row_count(),
            self.file_name.as_deref().unwrap_or_default()
        );
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Move by `delta` pages; out-of-range moves leave the page as is
    pub fn change_page(&mut self, delta: isize) -> Result<usize, ProfileError> {
        Ok(self.pager.change_page(delta)?)
    }

    pub fn seek_to(&mut self, page: usize) -> Result<usize, ProfileError> {
        Ok(self.pager.seek_to(page)?)
    }

    /// Rows on the current page
    pub fn page_rows(&self) -> &[Record] {
        self.pager.page_rows(&self.dataset)
    }

    /// Column types of the current dataset, computed once per version
    pub fn column_types(&self) -> Arc<ColumnTypeMap> {
        let version = self.dataset.version();
        {
            let cache = self.cache.read();
            if cache.version == version {
                if let Some(types) = &cache.column_types {
                    return Arc::clone(types);
                }
            }
        }

        let types = Arc::new(classify(&self.dataset));
        debug!("Classified {} columns of tab {}", types.len(), self.id);

        let mut cache = self.cache.write();
        cache.invalidate_unless(version);
        cache.column_types = Some(Arc::clone(&types));
        types
    }

    /// Validation report of the current dataset, computed once per version
    pub fn validation(&self) -> Result<Arc<ValidationReport>, ProfileError> {
        if !self.has_data() {
            return Err(ProfileError::NoData);
        }

        let version = self.dataset.version();
        {
            let cache = self.cache.read();
            if cache.version == version {
                if let Some(report) = &cache.validation {
                    return Ok(Arc::clone(report));
                }
            }
        }

        let types = self.column_types();
        let report = Arc::new(validate(&self.dataset, &types));

        let mut cache = self.cache.write();
        cache.invalidate_unless(version);
        cache.validation = Some(Arc::clone(&report));
        Ok(report)
    }

    /// Statistics of one column
    pub fn stats(&self, column: &str) -> Result<ColumnStats, ProfileError> {
        if !self.dataset.has_column(column) {
            return Err(ProfileError::UnknownColumn(column.to_string()));
        }
        Ok(stats(&self.dataset, &self.column_types(), column))
    }

    pub fn selected_columns(&self) -> &[String] {
        &self.selected_columns
    }

    /// Flip the selection of a column. Returns whether it is now selected.
    pub fn toggle_column(&mut self, column: &str) -> Result<bool, ProfileError> {
        if !self.dataset.has_column(column) {
            return Err(ProfileError::UnknownColumn(column.to_string()));
        }

        if let Some(pos) = self.selected_columns.iter().position(|c| c == column) {
            self.selected_columns.remove(pos);
            Ok(false)
        } else {
            self.selected_columns.push(column.to_string());
            Ok(true)
        }
    }

    /// Replace the selection, keeping the given order and dropping repeats.
    ///
    /// An unknown column leaves the current selection untouched.
    pub fn select_columns<I, S>(&mut self, columns: I) -> Result<(), ProfileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection: Vec<String> = Vec::new();
        for column in columns {
            let column = column.as_ref();
            if !self.dataset.has_column(column) {
                return Err(ProfileError::UnknownColumn(column.to_string()));
            }
            if !selection.iter().any(|c| c == column) {
                selection.push(column.to_string());
            }
        }
        self.selected_columns = selection;
        Ok(())
    }

    pub fn chart_kind(&self) -> Option<ChartKind> {
        self.chart_kind
    }

    pub fn set_chart_kind(&mut self, kind: Option<ChartKind>) {
        self.chart_kind = kind;
    }

    /// Chart for the current selection
    pub fn prepare_chart(&self) -> Result<PreparedChart, ProfileError> {
        let types = self.column_types();
        prepare_chart(self.chart_kind, &self.dataset, &types, &self.selected_columns)
    }
}

/// Ordered tabs with one active
#[derive(Debug)]
pub struct Session {
    tabs: Vec<Tab>,
    active: TabId,
    next_id: TabId,
}

impl Session {
    /// A session with a single empty tab
    pub fn new() -> Self {
        Self {
            tabs: vec![Tab::new(1)],
            active: 1,
            next_id: 2,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn active_id(&self) -> TabId {
        self.active
    }

    pub fn active(&self) -> &Tab {
        // The active id always names an open tab
        self.tabs
            .iter()
            .find(|t| t.id == self.active)
            .unwrap_or(&self.tabs[0])
    }

    pub fn active_mut(&mut self) -> &mut Tab {
        let index = self.index_of(self.active).unwrap_or(0);
        &mut self.tabs[index]
    }

    /// Open an empty tab and make it active
    pub fn add_tab(&mut self) -> TabId {
        let id = self.next_id;
        self.next_id += 1;
        self.tabs.push(Tab::new(id));
        self.active = id;
        debug!("Opened tab {}", id);
        id
    }

    pub fn switch_to(&mut self, id: TabId) -> Result<(), ProfileError> {
        if self.index_of(id).is_none() {
            return Err(ProfileError::UnknownTab(id));
        }
        self.active = id;
        Ok(())
    }

    /// Close a tab. The last remaining tab cannot be closed.
    ///
    /// Closing the active tab activates the tab now at the same position, or
    /// the new last tab when the closed one was last.
    pub fn close_tab(&mut self, id: TabId) -> Result<(), ProfileError> {
        let index = self.index_of(id).ok_or(ProfileError::UnknownTab(id))?;
        if self.tabs.len() <= 1 {
            return Err(ProfileError::LastTab);
        }

        self.tabs.remove(index);
        if self.active == id {
            let next = index.min(self.tabs.len() - 1);
            self.active = self.tabs[next].id;
        }
        debug!("Closed tab {}, active is {}", id, self.active);
        Ok(())
    }

    /// Load a dataset into the active tab
    pub fn load_into_active(
        &mut self,
        dataset: Dataset,
        file_name: impl Into<String>,
        title: impl Into<String>,
    ) -> &Tab {
        let tab = self.active_mut();
        tab.load(dataset, file_name, title);
        tab
    }

    fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_types::ColumnType;

    fn sample(rows: usize) -> Dataset {
        Dataset::from_records(
            (0..rows)
                .map(|i| {
                    Record::new()
                        .with("x", i as f64)
                        .with("y", (i * 3 % 7) as f64)
                        .with("name", format!("n{}", i))
                })
                .collect(),
        )
    }

    #[test]
    fn test_new_session_has_one_tab() {
        let session = Session::new();
        assert_eq!(session.tabs().len(), 1);
        assert_eq!(session.active_id(), 1);
        assert_eq!(session.active().title(), "New Tab");
        assert!(!session.active().has_data());
    }

    #[test]
    fn test_last_tab_cannot_close() {
        let mut session = Session::new();
        assert_eq!(session.close_tab(1), Err(ProfileError::LastTab));
        assert_eq!(session.close_tab(9), Err(ProfileError::UnknownTab(9)));
    }

    #[test]
    fn test_closing_active_tab_activates_neighbour() {
        let mut session = Session::new();
        let second = session.add_tab();
        let third = session.add_tab();
        assert_eq!((second, third), (2, 3));
        assert_eq!(session.active_id(), 3);

        session.switch_to(second).unwrap();
        session.close_tab(second).unwrap();
        assert_eq!(session.active_id(), third);

        session.close_tab(third).unwrap();
        assert_eq!(session.active_id(), 1);
        assert_eq!(session.tabs().len(), 1);
    }

    #[test]
    fn test_closing_inactive_tab_keeps_active() {
        let mut session = Session::new();
        session.add_tab();
        session.close_tab(1).unwrap();
        assert_eq!(session.active_id(), 2);
        assert_eq!(session.add_tab(), 3);
    }

    #[test]
    fn test_switch_to_unknown_tab() {
        let mut session = Session::new();
        assert_eq!(session.switch_to(5), Err(ProfileError::UnknownTab(5)));
        assert_eq!(session.active_id(), 1);
    }

    #[test]
    fn test_load_resets_view_state() {
        let mut session = Session::new();
        session.load_into_active(sample(250), "first.csv", "first");
        {
            let tab = session.active_mut();
            tab.change_page(1).unwrap();
            tab.toggle_column("x").unwrap();
            tab.set_chart_kind(Some(ChartKind::Histogram));
        }

        let tab = session.load_into_active(sample(10), "second.csv", "second");
        assert_eq!(tab.title(), "second");
        assert_eq!(tab.file_name(), Some("second.csv"));
        assert_eq!(tab.pager().current_page(), 1);
        assert!(tab.selected_columns().is_empty());
        assert_eq!(tab.chart_kind(), None);
    }

    #[test]
    fn test_paging() {
        let mut session = Session::new();
        session.load_into_active(sample(250), "data.csv", "data");
        let tab = session.active_mut();

        assert_eq!(tab.page_rows().len(), 100);
        assert_eq!(tab.change_page(2).unwrap(), 3);
        assert_eq!(tab.page_rows().len(), 50);
        assert!(tab.change_page(1).is_err());
        assert_eq!(tab.pager().current_page(), 3);
        assert_eq!(tab.pager().label(), "Page 3 of 3");
    }

    #[test]
    fn test_column_types_are_cached_per_version() {
        let mut session = Session::new();
        session.load_into_active(sample(20), "data.csv", "data");
        let tab = session.active_mut();

        let first = tab.column_types();
        let again = tab.column_types();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.get("x"), Some(ColumnType::Numeric));

        tab.change_page(0).unwrap();
        assert!(Arc::ptr_eq(&first, &tab.column_types()));

        tab.load(sample(20), "other.csv", "other");
        assert!(!Arc::ptr_eq(&first, &tab.column_types()));
    }

    #[test]
    fn test_validation_is_cached() {
        let mut session = Session::new();
        assert_eq!(session.active().validation().unwrap_err(), ProfileError::NoData);

        session.load_into_active(sample(20), "data.csv", "data");
        let tab = session.active();
        let report = tab.validation().unwrap();
        assert!(Arc::ptr_eq(&report, &tab.validation().unwrap()));
        assert_eq!(report.row_count.detail, "20 rows - insufficient (need 10,000+)");
    }

    #[test]
    fn test_selection() {
        let mut session = Session::new();
        session.load_into_active(sample(5), "data.csv", "data");
        let tab = session.active_mut();

        assert_eq!(tab.toggle_column("x"), Ok(true));
        assert_eq!(tab.toggle_column("y"), Ok(true));
        assert_eq!(tab.toggle_column("x"), Ok(false));
        assert_eq!(tab.selected_columns(), &["y".to_string()]);
        assert_eq!(
            tab.toggle_column("nope"),
            Err(ProfileError::UnknownColumn("nope".to_string()))
        );

        tab.select_columns(["x", "y", "x"]).unwrap();
        assert_eq!(tab.selected_columns().len(), 2);
    }

    #[test]
    fn test_failed_selection_keeps_previous() {
        let mut session = Session::new();
        session.load_into_active(sample(5), "data.csv", "data");
        let tab = session.active_mut();

        tab.select_columns(["x", "y"]).unwrap();
        assert_eq!(
            tab.select_columns(["x", "zzz"]),
            Err(ProfileError::UnknownColumn("zzz".to_string()))
        );
        assert_eq!(tab.selected_columns(), &["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_prepare_chart_from_tab() {
        let mut session = Session::new();
        session.load_into_active(sample(30), "data.csv", "data");
        let tab = session.active_mut();

        assert_eq!(tab.prepare_chart().unwrap_err(), ProfileError::NoColumnSelected);
        tab.select_columns(["x", "y"]).unwrap();
        assert_eq!(tab.prepare_chart().unwrap_err(), ProfileError::NoChartSelected);

        tab.set_chart_kind(Some(ChartKind::Scatter));
        let chart = tab.prepare_chart().unwrap();
        assert_eq!(chart.kind, ChartKind::Scatter);
        assert_eq!(chart.insights["Data Points"], "30");
    }
}
