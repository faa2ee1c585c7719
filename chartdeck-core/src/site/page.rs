//! Complete HTML document around the chart grid

use super::html::escape_html;
use super::install::repo_add_command;
use crate::config::SiteConfig;

const STYLES: &str = r#"
:root {
    --primary-color: #2563eb;
    --success-color: #10b981;
    --bg-primary: #ffffff;
    --bg-secondary: #f3f4f6;
    --text-primary: #111827;
    --text-secondary: #374151;
    --text-muted: #6b7280;
    --border-color: #e5e7eb;
    --border-radius-sm: 4px;
    --border-radius: 8px;
    --border-radius-lg: 12px;
    --shadow-lg: 0 10px 15px rgba(0, 0, 0, 0.1);
    --shadow-xl: 0 20px 25px rgba(0, 0, 0, 0.15);
}
body { font-family: system-ui, sans-serif; margin: 0; color: var(--text-primary); }
header, main { max-width: 1100px; margin: 0 auto; padding: 2rem; }
.charts-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1.5rem; }
.chart-card { border: 1px solid var(--border-color); border-radius: var(--border-radius-lg); padding: 1.5rem; }
.chart-header { display: flex; gap: 1rem; align-items: center; }
.chart-info h3 { margin: 0; }
.chart-version { color: var(--text-muted); font-size: 0.875rem; }
.chart-meta { display: flex; justify-content: space-between; color: var(--text-secondary); font-size: 0.875rem; }
.chart-actions { margin-top: 1rem; display: flex; gap: 0.5rem; }
.install-btn { background: var(--success-color); color: white; border: none; padding: 0.5rem 1rem; border-radius: var(--border-radius-sm); cursor: pointer; }
.install-btn:hover { background: #059669; }
.modal { border: 1px solid var(--border-color); border-radius: var(--border-radius-lg); box-shadow: var(--shadow-xl); max-width: 500px; width: 90%; padding: 0; }
.modal::backdrop { background: rgba(0, 0, 0, 0.5); backdrop-filter: blur(4px); }
.modal-header { display: flex; justify-content: space-between; align-items: center; padding: 1.5rem; border-bottom: 1px solid var(--border-color); }
.modal-header h3 { margin: 0; font-size: 1.25rem; }
.modal-close { background: none; border: none; cursor: pointer; color: var(--text-muted); }
.modal-body { padding: 1.5rem; }
.code-block { display: flex; gap: 0.5rem; align-items: center; background: var(--bg-secondary); padding: 0.75rem; border-radius: var(--border-radius); }
.install-note { margin-top: 1rem; padding: 1rem; background: var(--bg-secondary); border-radius: var(--border-radius); color: var(--text-secondary); font-size: 0.875rem; }
.no-charts, .error, .loading { grid-column: 1 / -1; text-align: center; padding: 3rem; color: var(--text-muted); }
.toast { position: fixed; bottom: 2rem; right: 2rem; background: var(--success-color); color: white; padding: 1rem 1.5rem; border-radius: var(--border-radius); box-shadow: var(--shadow-lg); }
"#;

const SCRIPT: &str = r#"
function showInstall(id) {
    const dialog = document.getElementById(id);
    if (dialog) dialog.showModal();
}
function showCopySuccess() {
    const toast = document.createElement('div');
    toast.className = 'toast';
    toast.textContent = 'Copied to clipboard!';
    document.body.appendChild(toast);
    setTimeout(() => toast.remove(), 3000);
}
function copyToClipboard(id) {
    const element = document.getElementById(id);
    if (!element) return;
    const text = element.textContent;
    if (navigator.clipboard) {
        navigator.clipboard.writeText(text).then(showCopySuccess);
    } else {
        const area = document.createElement('textarea');
        area.value = text;
        document.body.appendChild(area);
        area.select();
        document.execCommand('copy');
        document.body.removeChild(area);
        showCopySuccess();
    }
}
"#;

/// Wrap grid markup in a standalone page
pub fn render_page(config: &SiteConfig, grid: &str) -> String {
    let title = escape_html(&config.title);
    let repo_add = escape_html(&repo_add_command(
        &config.repository.name,
        &config.repository.url,
    ));

    let mut page = String::with_capacity(STYLES.len() + SCRIPT.len() + grid.len() + 1024);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str(&format!("<title>{title}</title>\n"));
    page.push_str("<style>");
    page.push_str(STYLES);
    page.push_str("</style>\n</head>\n<body>\n");
    page.push_str(&format!(
        "<header>\n<h1>{title}</h1>\n<div class=\"code-block\"><code>{repo_add}</code></div>\n</header>\n"
    ));
    page.push_str("<main>\n<section>\n<div class=\"charts-grid\" id=\"charts-grid\">");
    page.push_str(grid);
    page.push_str("</div>\n</section>\n</main>\n<script>");
    page.push_str(SCRIPT);
    page.push_str("</script>\n</body>\n</html>\n");
    page
}

#[cfg(test)]
mod page_tests {
    use super::*;

    #[test]
    fn test_page_wraps_grid() {
        let config = SiteConfig::default();
        let page = render_page(&config, "<div class=\"chart-card\"></div>");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Helm Charts</title>"));
        assert!(page.contains("id=\"charts-grid\"><div class=\"chart-card\"></div></div>"));
        assert!(page.contains("helm repo add glavien"));
        assert!(page.contains("function copyToClipboard"));
    }

    #[test]
    fn test_title_is_escaped() {
        let mut config = SiteConfig::default();
        config.title = "<b>Charts</b>".to_string();
        let page = render_page(&config, "");
        assert!(page.contains("<title>&lt;b&gt;Charts&lt;/b&gt;</title>"));
    }
}
