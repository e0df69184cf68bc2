use super::record::AggregateRecord;
use super::select::AggregateSelect;
use crate::engine::storage::{QueryExecutor, StorageError};
use chrono::NaiveDateTime;
use rayon::prelude::*;
use tracing::debug;

/// Run `select` over every consecutive boundary pair.
///
/// Output follows window order whether or not windows run on the rayon
/// pool. A window with no rows contributes a zero-count placeholder
/// labelled with its lower boundary.
pub fn execute(
    executor: &dyn QueryExecutor,
    select: &AggregateSelect,
    boundaries: &[NaiveDateTime],
    parallel: bool,
) -> Result<Vec<AggregateRecord>, StorageError> {
    let run = |window: &[NaiveDateTime]| run_window(executor, select, window[0], window[1]);

    let per_window: Vec<Vec<AggregateRecord>> = if parallel {
        boundaries
            .par_windows(2)
            .map(run)
            .collect::<Result<_, _>>()?
    } else {
        boundaries.windows(2).map(run).collect::<Result<_, _>>()?
    };

    Ok(per_window.into_iter().flatten().collect())
}

fn run_window(
    executor: &dyn QueryExecutor,
    select: &AggregateSelect,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<AggregateRecord>, StorageError> {
    let rows = executor.execute_aggregate(select, start, end)?;
    debug!(
        target: "opendata_query::aggregate",
        table = %select.table,
        %start,
        %end,
        groups = rows.len(),
        "Executed bucket window"
    );

    if rows.is_empty() {
        return Ok(vec![AggregateRecord::placeholder(start, select.function)]);
    }
    Ok(rows
        .into_iter()
        .map(|row| AggregateRecord::from_row(row, select.function))
        .collect())
}
