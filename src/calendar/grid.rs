// file: src/calendar/grid.rs
//
// Month-grid derivation for the calendar view: six rows of seven cells,
// weeks starting on Sunday, padded with the neighboring months' days. The
// DOM side is out of scope here; this is only the date arithmetic.

use chrono::{Datelike, Duration, NaiveDate};

pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing padding cells.
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Cells for one month's 6x7 grid, or `None` for an invalid year/month.
pub fn month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    selected: NaiveDate,
) -> Option<Vec<DayCell>> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = first_of_month.weekday().num_days_from_sunday() as i64;
    let grid_start = first_of_month - Duration::days(lead);

    let cells = (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            DayCell {
                date,
                in_month: date.year() == year && date.month() == month,
                is_today: date == today,
                is_selected: date == selected,
            }
        })
        .collect();

    Some(cells)
}
