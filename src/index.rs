use crate::calendar::{date_key, last_day_of_month, month_anchor};
use crate::models::{DateAggregate, Entry};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub fn index_by_date(entries: &[Entry]) -> BTreeMap<String, DateAggregate> {
    let mut index: BTreeMap<String, DateAggregate> = BTreeMap::new();
    for entry in entries {
        let aggregate = index.entry(entry.date.clone()).or_default();
        aggregate.present = true;
        aggregate.count = aggregate.count.saturating_add(1);
    }
    index
}

pub fn entries_for_date(entries: &[Entry], date: &str) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.date == date)
        .cloned()
        .collect()
}

pub fn max_count_in_month(index: &BTreeMap<String, DateAggregate>, anchor: NaiveDate) -> u32 {
    let first = date_key(month_anchor(anchor));
    let last = date_key(last_day_of_month(anchor));

    // Date keys sort chronologically, so the month is one contiguous range.
    index
        .range(first..=last)
        .map(|(_, aggregate)| aggregate.count)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, date: &str) -> Entry {
        Entry {
            id: id.to_string(),
            title: format!("entry {id}"),
            note: String::new(),
            date: date.to_string(),
            image_uri: None,
            voice_uri: None,
        }
    }

    fn may_sample() -> Vec<Entry> {
        vec![
            entry("1", "2024-05-01"),
            entry("2", "2024-05-01"),
            entry("3", "2024-05-03"),
        ]
    }

    #[test]
    fn index_counts_entries_per_date() {
        let index = index_by_date(&may_sample());

        assert_eq!(index.len(), 2);
        assert_eq!(
            index["2024-05-01"],
            DateAggregate {
                present: true,
                count: 2
            }
        );
        assert_eq!(
            index["2024-05-03"],
            DateAggregate {
                present: true,
                count: 1
            }
        );
        assert!(!index.contains_key("2024-05-02"));
    }

    #[test]
    fn index_ignores_entry_order() {
        let mut reversed = may_sample();
        reversed.reverse();
        assert_eq!(index_by_date(&reversed), index_by_date(&may_sample()));
    }

    #[test]
    fn empty_collection_has_empty_index() {
        assert!(index_by_date(&[]).is_empty());
    }

    #[test]
    fn entries_for_date_keeps_collection_order() {
        let entries = may_sample();
        let ids: Vec<_> = entries_for_date(&entries, "2024-05-01")
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(entries_for_date(&entries, "2024-05-02").is_empty());
    }

    #[test]
    fn max_count_only_looks_at_the_anchor_month() {
        let mut entries = may_sample();
        for id in 10..15 {
            entries.push(entry(&id.to_string(), "2024-06-01"));
        }
        entries.push(entry("20", "2024-04-30"));
        let index = index_by_date(&entries);

        let may = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let june = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(max_count_in_month(&index, may), 2);
        assert_eq!(max_count_in_month(&index, june), 5);
        assert_eq!(max_count_in_month(&index, march), 0);
    }
}
