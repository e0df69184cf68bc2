pub mod clause;
pub mod errors;
pub mod operator;
pub mod params;
pub mod translator;
pub mod window;

pub use clause::{FilterClause, Predicate, SqlFragment, render_where};
pub use errors::{FilterError, ParamError, ValidationReport};
pub use operator::{CompareOp, Operator, split_key};
pub use params::QueryParams;
pub use translator::{Translation, TranslatorOptions, translate};
pub use window::{OrderBy, QueryWindow, RecordQuery};

#[cfg(test)]
mod clause_test;
