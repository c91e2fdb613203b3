//! Read-only consumers of the enriched table: top-N selection and
//! per-category flagging.

mod flagger;
mod ranker;

pub use flagger::{flag_column_name, flag_top_per_category};
pub use ranker::{RankedEntity, distinct_categories, top_n};
