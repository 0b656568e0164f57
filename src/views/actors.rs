use crate::model::{Catalog, MovieRecord};

/// Every movie whose cast contains `name`, compared case-insensitively as a
/// whole entry (not a substring). A blank name searches nothing.
pub fn movies_with_actor<'a>(catalog: &'a Catalog, name: &str) -> Vec<&'a MovieRecord> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }
    catalog
        .records()
        .iter()
        .filter(|r| r.cast_list.iter().any(|actor| actor.to_lowercase() == wanted))
        .collect()
}
