use crate::heatmap::{ThemeMode, color_for};
use crate::index::{index_by_date, max_count_in_month};
use crate::models::{DayCell, Entry, MonthView};
use chrono::{Datelike, Duration, Months, NaiveDate};
use std::iter;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    (date_key(date) == value).then_some(date)
}

pub fn month_key(anchor: NaiveDate) -> String {
    anchor.format("%Y-%m").to_string()
}

pub fn parse_month_key(value: &str) -> Option<NaiveDate> {
    parse_date_key(&format!("{value}-01"))
}

pub fn month_label(anchor: NaiveDate) -> String {
    anchor.format("%B %Y").to_string()
}

pub fn month_anchor(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Moves by whole months. The result is always the first of the month, so
/// month lengths never come into play. Shifts past chrono's date range leave
/// the anchor where it was.
pub fn shift_month(anchor: NaiveDate, delta: i32) -> NaiveDate {
    let first = month_anchor(anchor);
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.unwrap_or(first)
}

pub fn last_day_of_month(anchor: NaiveDate) -> NaiveDate {
    let first = month_anchor(anchor);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next - Duration::days(1),
        None => NaiveDate::MAX,
    }
}

pub fn days_in_month(anchor: NaiveDate) -> Vec<Option<NaiveDate>> {
    let first = month_anchor(anchor);
    let last = last_day_of_month(first);
    let blanks = first.weekday().num_days_from_sunday() as usize;

    let mut slots = Vec::with_capacity(blanks + last.day() as usize);
    slots.extend(iter::repeat(None).take(blanks));
    slots.extend(first.iter_days().take_while(|day| *day <= last).map(Some));
    slots
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    pub anchor: NaiveDate,
    pub selected: NaiveDate,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            anchor: month_anchor(today),
            selected: today,
        }
    }

    pub fn next(&mut self) {
        self.anchor = shift_month(self.anchor, 1);
    }

    pub fn prev(&mut self) {
        self.anchor = shift_month(self.anchor, -1);
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.anchor = month_anchor(date);
    }
}

pub fn build_month_view(
    entries: &[Entry],
    anchor: NaiveDate,
    selected: NaiveDate,
    mode: ThemeMode,
) -> MonthView {
    let anchor = month_anchor(anchor);
    let index = index_by_date(entries);
    let max_count = max_count_in_month(&index, anchor);

    let cells = days_in_month(anchor)
        .into_iter()
        .map(|slot| {
            slot.map(|date| {
                let key = date_key(date);
                let count = index.get(&key).map_or(0, |aggregate| aggregate.count);
                DayCell {
                    day: date.day(),
                    count,
                    color: color_for(count, max_count, mode),
                    selected: date == selected,
                    date: key,
                }
            })
        })
        .collect();

    MonthView {
        month: month_key(anchor),
        label: month_label(anchor),
        selected_date: date_key(selected),
        max_count,
        weekdays: WEEKDAYS,
        cells,
    }
}
