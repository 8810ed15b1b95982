//! Org Explorer Common Library
//!
//! 組織図の構築・あいまい検索・絞り込み。入出力を持たない純粋な処理だけを置く。

pub mod types;
pub mod error;
pub mod hierarchy;
pub mod matcher;
pub mod search;
pub mod filter;
pub mod facets;
pub mod explorer;

pub use types::{EmployeeRecord, FilterCriteria, JobTitleMode, SapUserFilter, parse_records_json};
pub use error::{Error, Result};
pub use hierarchy::{build_hierarchy, EmployeeNode, EmployeeTree, Forest, NodeId};
pub use matcher::{extract_keywords, fuzzy_match};
pub use search::{expand_to_hierarchy, retained_names};
pub use filter::{apply_filters, matches_criteria};
pub use facets::FacetValues;
pub use explorer::OrgChart;
