//! Chart grid presentation
//!
//! `Presenter` is the surface the loader drives. `HtmlPresenter` renders
//! each state as the markup of the page's chart grid.

use super::html::{element_id, escape_html, escape_js_string};
use super::install::InstallCommand;
use crate::catalog::{ChartRecord, FetchError};

/// Empty-state headline
pub const EMPTY_MESSAGE: &str = "No charts available yet";

/// Error-state headline
pub const ERROR_MESSAGE: &str = "Error loading charts";

/// Receives the outcome of a load attempt
pub trait Presenter {
    fn render_loading(&mut self);
    fn render_records(&mut self, records: &[ChartRecord]);
    fn render_empty(&mut self);
    fn render_error(&mut self, error: &FetchError);
}

/// What the grid currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    Blank,
    Loading,
    Charts(usize),
    Empty,
    Error,
}

/// Renders the chart grid as HTML
#[derive(Debug, Clone)]
pub struct HtmlPresenter {
    repository: String,
    grid: String,
    state: GridState,
}

impl HtmlPresenter {
    /// `repository` is the alias used in install commands
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            grid: String::new(),
            state: GridState::Blank,
        }
    }

    /// Current grid markup
    pub fn grid(&self) -> &str {
        &self.grid
    }

    pub fn state(&self) -> GridState {
        self.state
    }

    fn chart_card(&self, position: usize, chart: &ChartRecord) -> String {
        let install = InstallCommand::new(&self.repository, &chart.name);
        let dialog_id = element_id("install", position, &chart.name);
        let created = chart
            .created_date()
            .unwrap_or_else(|| "Unknown".to_string());

        format!(
            r#"
            <div class="chart-card">
                <div class="chart-header">
                    <div class="chart-icon">
                        {icon}
                    </div>
                    <div class="chart-info">
                        <h3>{name}</h3>
                        <span class="chart-version">v{version}</span>
                    </div>
                </div>
                <p class="chart-description">{description}</p>
                <div class="chart-meta">
                    <span><i class="fas fa-tag"></i> App: {app_version}</span>
                    <span><i class="fas fa-calendar"></i> {created}</span>
                </div>
                <div class="chart-actions">
                    <button class="install-btn" onclick="showInstall('{dialog_js}')">
                        <i class="fas fa-download"></i> Install
                    </button>
                </div>
                {dialog}
            </div>
"#,
            icon = chart_icon(&chart.name),
            name = escape_html(&chart.name),
            version = escape_html(&chart.version),
            description = escape_html(&chart.description),
            app_version = escape_html(&chart.app_version),
            created = escape_html(&created),
            dialog_js = escape_html(&escape_js_string(&dialog_id)),
            dialog = install_dialog(&dialog_id, &install),
        )
    }
}

impl Presenter for HtmlPresenter {
    fn render_loading(&mut self) {
        self.state = GridState::Loading;
        self.grid = r#"
            <div class="loading">
                <div class="spinner"></div>
                <span>Loading charts...</span>
            </div>
"#
        .to_string();
    }

    fn render_records(&mut self, records: &[ChartRecord]) {
        if records.is_empty() {
            self.render_empty();
            return;
        }

        self.state = GridState::Charts(records.len());
        self.grid = records
            .iter()
            .enumerate()
            .map(|(position, chart)| self.chart_card(position, chart))
            .collect::<Vec<_>>()
            .join("");
    }

    fn render_empty(&mut self) {
        self.state = GridState::Empty;
        self.grid = format!(
            r#"
            <div class="no-charts">
                <i class="fas fa-cube"></i>
                <h3>{EMPTY_MESSAGE}</h3>
                <p>Charts will appear here once they are published.</p>
            </div>
"#
        );
    }

    fn render_error(&mut self, _error: &FetchError) {
        self.state = GridState::Error;
        self.grid = format!(
            r#"
            <div class="error">
                <i class="fas fa-exclamation-triangle"></i>
                <h3>{ERROR_MESSAGE}</h3>
                <p>Please try refreshing the page.</p>
            </div>
"#
        );
    }
}

/// Icon markup for a chart
fn chart_icon(name: &str) -> &'static str {
    match name {
        "hostendpoint-operator" => r#"<i class="fas fa-network-wired"></i>"#,
        _ => r#"<i class="fas fa-cube"></i>"#,
    }
}

/// Modal dialog with the install command and a copy button
fn install_dialog(dialog_id: &str, install: &InstallCommand) -> String {
    let command_id = format!("{dialog_id}-command");

    format!(
        r#"<dialog class="modal" id="{dialog_id}">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h3>{title}</h3>
                            <button class="modal-close" onclick="this.closest('dialog').close()">
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                        <div class="modal-body">
                            <p>Run this command to install the chart:</p>
                            <div class="code-block">
                                <code id="{command_id}">{command}</code>
                                <button class="copy-btn" onclick="copyToClipboard('{command_js}')">
                                    <i class="fas fa-copy"></i>
                                </button>
                            </div>
                            <p class="install-note">
                                <i class="fas fa-info-circle"></i>
                                Make sure you have the {repository} repository added first.
                            </p>
                        </div>
                    </div>
                </dialog>"#,
        dialog_id = escape_html(dialog_id),
        title = escape_html(&install.title()),
        command_id = escape_html(&command_id),
        command = escape_html(&install.command),
        command_js = escape_html(&escape_js_string(&command_id)),
        repository = escape_html(&install.repository),
    )
}

#[cfg(test)]
mod presenter_tests {
    use super::*;

    fn record(name: &str, description: &str) -> ChartRecord {
        ChartRecord::from_fields(
            name,
            Some("1.0.0"),
            Some("2.0.0"),
            Some(description),
            Some("2024-06-01T00:00:00Z"),
        )
    }

    #[test]
    fn test_renders_one_card_per_record() {
        let mut presenter = HtmlPresenter::new("glavien");
        presenter.render_records(&[record("alpha", "First"), record("beta", "Second")]);

        assert_eq!(presenter.state(), GridState::Charts(2));
        assert_eq!(presenter.grid().matches("class=\"chart-card\"").count(), 2);
        assert!(presenter.grid().contains("<h3>alpha</h3>"));
        assert!(presenter.grid().contains("v1.0.0"));
        assert!(presenter.grid().contains("App: 2.0.0"));
        assert!(presenter.grid().contains("2024-06-01"));
        assert!(presenter.grid().contains("helm install my-beta glavien/beta"));
    }

    #[test]
    fn test_dialog_ids_are_unique() {
        let mut presenter = HtmlPresenter::new("glavien");
        presenter.render_records(&[
            record("Foo", "upper"),
            record("foo", "lower"),
            record("dup", "first"),
            record("dup", "second"),
        ]);

        let grid = presenter.grid();
        for id in ["install-0-Foo", "install-1-foo", "install-2-dup", "install-3-dup"] {
            assert_eq!(grid.matches(&format!("id=\"{id}\"")).count(), 1, "{id}");
            assert!(grid.contains(&format!("showInstall('{id}')")), "{id}");
        }
        assert!(grid.contains("helm install my-Foo glavien/Foo"));
        assert!(grid.contains("helm install my-foo glavien/foo"));
    }

    #[test]
    fn test_escapes_untrusted_fields() {
        let mut presenter = HtmlPresenter::new("glavien");
        presenter.render_records(&[record("x", "<script>alert('pwned')</script>")]);

        assert!(!presenter.grid().contains("<script>"));
        assert!(presenter
            .grid()
            .contains("&lt;script&gt;alert(&#39;pwned&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_icon_selection() {
        let mut presenter = HtmlPresenter::new("glavien");
        presenter.render_records(&[record("hostendpoint-operator", "d")]);
        assert!(presenter.grid().contains("fa-network-wired"));

        presenter.render_records(&[record("other", "d")]);
        assert!(!presenter.grid().contains("fa-network-wired"));
        assert!(presenter.grid().contains("fa-cube"));
    }

    #[test]
    fn test_unparseable_created_shows_unknown() {
        let mut presenter = HtmlPresenter::new("glavien");
        let chart = ChartRecord::from_fields("a", None, None, None, Some("someday"));
        presenter.render_records(&[chart]);
        assert!(presenter.grid().contains("Unknown"));
    }

    #[test]
    fn test_empty_and_error_states_differ() {
        let mut presenter = HtmlPresenter::new("glavien");

        presenter.render_records(&[]);
        assert_eq!(presenter.state(), GridState::Empty);
        assert!(presenter.grid().contains(EMPTY_MESSAGE));

        presenter.render_error(&FetchError::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        });
        assert_eq!(presenter.state(), GridState::Error);
        assert!(presenter.grid().contains(ERROR_MESSAGE));
        assert!(!presenter.grid().contains(EMPTY_MESSAGE));
    }
}
