//! Placeholder numbering for multi-row inserts.
//!
//! Generated `*_insert_bulk` functions push the columns of every row into one flat
//! argument list, so row `r` of an `N`-column model binds `$(r*N+1) ..= $(r*N+N)`.

use std::ops::RangeInclusive;

/// Placeholder indices of each row group.
pub fn value_groups(col_num: usize, rows: usize) -> impl Iterator<Item = RangeInclusive<usize>> {
    (0..rows).map(move |r| r * col_num + 1..=r * col_num + col_num)
}

/// The `VALUES` list of a multi-row insert: `($1, $2), ($3, $4)`.
pub fn bulk_values(col_num: usize, rows: usize) -> String {
    value_groups(col_num, rows)
        .map(|group| {
            let inner = group
                .map(|i| format!("${i}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("({inner})")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_cover_every_index_once() {
        let (cols, rows) = (3, 4);
        let groups: Vec<Vec<usize>> = value_groups(cols, rows).map(Iterator::collect).collect();

        assert_eq!(groups.len(), rows);
        assert!(groups.iter().all(|g| g.len() == cols));
        assert!(groups.windows(2).all(|w| w[0][cols - 1] < w[1][0]));
        let flat: Vec<usize> = groups.into_iter().flatten().collect();
        assert_eq!(flat, (1..=cols * rows).collect::<Vec<_>>());
    }

    #[test]
    fn values_list() {
        assert_eq!(bulk_values(2, 2), "($1, $2), ($3, $4)");
        assert_eq!(bulk_values(4, 1), "($1, $2, $3, $4)");
        assert_eq!(bulk_values(1, 3), "($1), ($2), ($3)");
        assert_eq!(bulk_values(2, 0), "");
    }
}
