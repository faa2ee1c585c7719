//! Helm install commands for published charts

use super::clipboard::{ClipboardError, ClipboardService};

/// Command that installs `chart` from the repository added as `repository`
pub fn install_command(repository: &str, chart: &str) -> String {
    format!("helm install my-{chart} {repository}/{chart}")
}

/// Command that adds the repository to a local Helm setup
pub fn repo_add_command(repository: &str, url: &str) -> String {
    format!("helm repo add {repository} {url}")
}

/// Install instructions for one chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub chart: String,
    pub repository: String,
    pub command: String,
}

impl InstallCommand {
    pub fn new(repository: &str, chart: &str) -> Self {
        Self {
            chart: chart.to_string(),
            repository: repository.to_string(),
            command: install_command(repository, chart),
        }
    }

    /// Dialog title
    pub fn title(&self) -> String {
        format!("Install {}", self.chart)
    }

    /// Put the command on the clipboard
    pub fn copy_to(&self, clipboard: &dyn ClipboardService) -> Result<(), ClipboardError> {
        clipboard.copy(&self.command)
    }
}
