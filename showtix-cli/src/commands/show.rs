//! `showtix show`

use showtix_lib::model::{Show, ShowId};
use showtix_lib::workflow::Route;
use showtix_lib::{Config, ShowsClient};

use crate::error::Result;

pub async fn run(client: &ShowsClient, config: &Config, id: &ShowId) -> Result<()> {
    let show = client.get_show(id).await?;
    print!("{}", render(&show, id, config.image_base_url.as_deref()));
    Ok(())
}

/// Renders the details view of one show.
fn render(show: &Show, id: &ShowId, image_base_url: Option<&str>) -> String {
    let mut out = format!("{}\n", show.title);

    if let Some(category) = &show.category_name {
        out.push_str(&format!("  Category: {}\n", category));
    }
    if let Some(venue) = &show.venue_name {
        out.push_str(&format!("  Venue:    {}\n", venue));
    }
    if let Some(time) = show.display_time() {
        out.push_str(&format!("  When:     {}\n", time));
    }
    if let Some(image) = image_base_url.and_then(|base| show.image_url(base)) {
        out.push_str(&format!("  Image:    {}\n", image));
    }

    out.push_str(&format!(
        "\nBuy tickets: showtix buy {} ({})\n",
        id,
        Route::Tickets(id.clone())
    ));
    out
}
