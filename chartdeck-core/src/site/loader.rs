//! Load orchestration: fetch, parse, present

use tracing::{debug, error, info};

use super::presenter::Presenter;
use crate::catalog::{parse_index, ChartRecord, FetchError, IndexFetcher};

/// Run one load attempt and drive the presenter through it
///
/// The presenter sees `render_loading` first, then exactly one of
/// `render_records`, `render_empty` or `render_error`. Fetch failures are
/// returned after the error state is rendered; nothing is retried.
pub async fn load_charts<F, P>(
    fetcher: &F,
    presenter: &mut P,
) -> Result<Vec<ChartRecord>, FetchError>
where
    F: IndexFetcher + ?Sized,
    P: Presenter + ?Sized,
{
    presenter.render_loading();
    info!("Loading charts from {}", fetcher.location());

    let text = match fetcher.fetch().await {
        Ok(text) => text,
        Err(e) => {
            error!("Error loading charts: {}", e);
            presenter.render_error(&e);
            return Err(e);
        }
    };

    let parsed = parse_index(&text);
    debug!(
        "Parsed {} chart(s) using {:?} strategy",
        parsed.records.len(),
        parsed.strategy
    );

    if parsed.is_empty() {
        presenter.render_empty();
    } else {
        presenter.render_records(&parsed.records);
    }

    Ok(parsed.records)
}
