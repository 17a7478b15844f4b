//! Show listing helpers: search filtering and category grouping.

use crate::model::Show;

/// Category used for shows that have none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A category heading and the shows listed under it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: String,
    pub shows: Vec<&'a Show>,
}

impl CategoryGroup<'_> {
    /// The pluralized heading, e.g. "Dance Parties".
    pub fn heading(&self) -> String {
        pluralize_category(&self.category)
    }
}

/// Keeps shows whose title or category contains `search`, ignoring case.
///
/// An empty search keeps everything.
pub fn filter_shows<'a>(shows: &'a [Show], search: &str) -> Vec<&'a Show> {
    let search = search.trim().to_lowercase();
    shows
        .iter()
        .filter(|show| {
            let title = show.title.to_lowercase();
            let category = show.category_name.as_deref().unwrap_or_default().to_lowercase();
            title.contains(&search) || category.contains(&search)
        })
        .collect()
}

/// Groups shows by category, in order of each category's first appearance.
pub fn group_by_category<'a, I>(shows: I) -> Vec<CategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a Show>,
{
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();

    for show in shows {
        let category = show
            .category_name
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);

        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.shows.push(show),
            None => groups.push(CategoryGroup {
                category: category.to_string(),
                shows: vec![show],
            }),
        }
    }

    groups
}

/// Turns a category name into a section heading.
pub fn pluralize_category(category: &str) -> String {
    match category {
        "Concert" => "Concerts".to_string(),
        "Dance Party" => "Dance Parties".to_string(),
        "Expo" => "Expos".to_string(),
        other => format!("{}s", other),
    }
}
