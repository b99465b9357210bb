//! Settlement-checkpoint counting between a reference date and a due date.

use chrono::{Datelike, NaiveDate};

use super::cycle::rolling_date;

/// Counts the bi-monthly settlement checkpoints (the 15th and the last day
/// of each month) that fall strictly after `today` and on or before `due`.
///
/// The cursor walks whole months starting at the first of `today`'s month,
/// so a due date before that start yields zero.
pub fn count(today: NaiveDate, due: NaiveDate) -> u32 {
    let mut cursor = rolling_date(today.year(), today.month() as i32, 1);
    let mut checkpoints = 0;
    while cursor <= due {
        let mid_month = rolling_date(cursor.year(), cursor.month() as i32, 15);
        if mid_month > today && mid_month <= due {
            checkpoints += 1;
        }
        // Day zero of the following month is the last day of the cursor's.
        let month_end = rolling_date(cursor.year(), cursor.month() as i32 + 1, 0);
        if month_end > today && month_end <= due {
            checkpoints += 1;
        }
        cursor = rolling_date(cursor.year(), cursor.month() as i32 + 1, 1);
    }
    checkpoints
}
