//! `showtix list`

use showtix_lib::ShowsClient;
use showtix_lib::catalog::{filter_shows, group_by_category};
use showtix_lib::model::Show;

use crate::error::Result;

pub async fn run(client: &ShowsClient, search: Option<&str>) -> Result<()> {
    let shows = client.list_shows().await?;
    print!("{}", render(&shows, search.unwrap_or_default()));
    Ok(())
}

/// Renders the filtered shows under their category headings.
fn render(shows: &[Show], search: &str) -> String {
    let matching = filter_shows(shows, search);
    if matching.is_empty() {
        return "No matching events found...\n".to_string();
    }

    let mut out = String::new();
    for group in group_by_category(matching) {
        out.push_str(&format!("{}\n", group.heading()));
        for show in group.shows {
            let id = show.show_id.as_ref().map(|id| id.to_string()).unwrap_or_default();
            out.push_str(&format!("  [{}] {}\n", id, show.title));
        }
    }
    out
}
