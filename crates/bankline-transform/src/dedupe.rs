//! Duplicate-record removal keyed on `client_id`.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray};
use tracing::debug;

use bankline_common::any_to_string;
use bankline_model::{CLIENT_ID, Result};

/// Drop every row whose `client_id` was already seen, keeping the first
/// occurrence in source order. Rows with a blank id were removed by the
/// critical-field filter before this runs, so blanks are not collapsed
/// into one another here.
pub fn dedupe_by_client_id(df: &mut DataFrame) -> Result<usize> {
    let height = df.height();
    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(height);
    {
        let column = df.column(CLIENT_ID)?;
        for idx in 0..height {
            let id = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            let id = id.trim().to_string();
            if id.is_empty() {
                keep.push(true);
            } else {
                keep.push(seen.insert(id));
            }
        }
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    *df = df.filter(&mask)?;
    let removed = height - df.height();
    if removed > 0 {
        debug!(removed, "dropped duplicate client rows");
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn keeps_the_first_occurrence() {
        let mut df = DataFrame::new(vec![
            Column::new(CLIENT_ID.into(), vec!["1", "2", "1", "3", "2"]),
            Column::new("name".into(), vec!["a", "b", "c", "d", "e"]),
        ])
        .unwrap();
        let removed = dedupe_by_client_id(&mut df).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(df.height(), 3);
        let names = df.column("name").unwrap();
        assert_eq!(any_to_string(names.get(0).unwrap()), "a");
        assert_eq!(any_to_string(names.get(1).unwrap()), "b");
        assert_eq!(any_to_string(names.get(2).unwrap()), "d");
    }

    #[test]
    fn distinct_ids_pass_through() {
        let mut df = DataFrame::new(vec![Column::new(
            CLIENT_ID.into(),
            vec!["10", "20", "30"],
        )])
        .unwrap();
        let removed = dedupe_by_client_id(&mut df).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn ids_are_compared_after_trimming() {
        let mut df = DataFrame::new(vec![Column::new(
            CLIENT_ID.into(),
            vec![" 5", "5 "],
        )])
        .unwrap();
        let removed = dedupe_by_client_id(&mut df).unwrap();
        assert_eq!(removed, 1);
    }
}
