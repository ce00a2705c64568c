use crate::dates;
use crate::models::Entry;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySlot {
    pub date: NaiveDate,
    pub date_key: String,
    pub entry: Option<Entry>,
}

/// One column of the heatmap, Sunday first. `None` slots fall outside the year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekColumn {
    pub index: usize,
    pub month_break: bool,
    pub days: [Option<DaySlot>; DAYS_PER_WEEK],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSpan {
    pub label: &'static str,
    pub month: u32,
    pub start_week: usize,
    pub span_weeks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGrid {
    pub year: i32,
    pub offset: usize,
    pub total_days: usize,
    pub weeks: Vec<WeekColumn>,
    pub months: Vec<MonthSpan>,
}

impl YearGrid {
    pub fn slots(&self) -> impl Iterator<Item = &DaySlot> {
        self.weeks
            .iter()
            .flat_map(|week| week.days.iter().filter_map(Option::as_ref))
    }
}

/// Lays `year` out as week columns of seven day slots.
pub fn build_year_grid(year: i32, entries: &[Entry]) -> Result<YearGrid, GridError> {
    let out_of_range = || GridError::YearOutOfRange(year);
    let year_start = dates::year_start(year).ok_or_else(out_of_range)?;
    let year_end = year
        .checked_add(1)
        .and_then(dates::year_start)
        .ok_or_else(out_of_range)?;

    let total_days = (year_end - year_start).num_days() as usize;
    let offset = dates::weekday_index(year_start) as usize;
    let total_cells = offset + total_days;
    let week_count = total_cells.div_ceil(DAYS_PER_WEEK);

    let by_key: HashMap<&str, &Entry> = entries
        .iter()
        .map(|entry| (entry.date_key.as_str(), entry))
        .collect();

    let slot_at = |cell: usize| -> Option<DaySlot> {
        let day_index = cell.checked_sub(offset).filter(|idx| *idx < total_days)?;
        let date = year_start + Duration::days(day_index as i64);
        let date_key = dates::date_key(date);
        let entry = by_key.get(date_key.as_str()).map(|entry| (*entry).clone());
        Some(DaySlot {
            date,
            date_key,
            entry,
        })
    };

    let months = month_layout(year, year_start, offset, total_cells)?;

    let weeks = (0..week_count)
        .map(|index| WeekColumn {
            index,
            month_break: index != 0 && months.iter().any(|month| month.start_week == index),
            days: std::array::from_fn(|weekday| slot_at(index * DAYS_PER_WEEK + weekday)),
        })
        .collect();

    Ok(YearGrid {
        year,
        offset,
        total_days,
        weeks,
        months,
    })
}

// A month ends where the next one starts, so spans never overlap; December
// runs to the last column.
fn month_layout(
    year: i32,
    year_start: NaiveDate,
    offset: usize,
    total_cells: usize,
) -> Result<Vec<MonthSpan>, GridError> {
    let starts = (1..=12)
        .map(|month| {
            NaiveDate::from_ymd_opt(year, month, 1)
                .map(|first| offset + (first - year_start).num_days() as usize)
        })
        .collect::<Option<Vec<_>>>()
        .ok_or(GridError::YearOutOfRange(year))?;

    let spans = starts
        .iter()
        .enumerate()
        .map(|(idx, start)| {
            let start_week = start / DAYS_PER_WEEK;
            let end_week = match starts.get(idx + 1) {
                // Floor, not ceil: keeps neighbouring spans from sharing a column.
                Some(next) => next / DAYS_PER_WEEK,
                None => total_cells.div_ceil(DAYS_PER_WEEK),
            };
            MonthSpan {
                label: dates::month_label(idx),
                month: idx as u32 + 1,
                start_week,
                span_weeks: end_week.saturating_sub(start_week).max(1),
            }
        })
        .collect();

    Ok(spans)
}
