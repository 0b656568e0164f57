pub mod country;
pub mod fields;
pub mod list_literal;

pub use country::{reconcile, reconcile_all};
pub use fields::{coerce_f64, coerce_year, display_text, normalize_list, RawList};
