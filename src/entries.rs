use crate::calendar::{date_key, parse_date_key};
use crate::errors::EntryError;
use crate::models::{Entry, EntryDraft};
use chrono::{Local, NaiveDate};

pub fn create_entry(draft: EntryDraft, existing: &[Entry]) -> Result<Entry, EntryError> {
    let now = Local::now();
    create_entry_at(draft, existing, now.date_naive(), now.timestamp_millis())
}

pub fn create_entry_at(
    draft: EntryDraft,
    existing: &[Entry],
    today: NaiveDate,
    now_millis: i64,
) -> Result<Entry, EntryError> {
    let requested = draft
        .date
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let date = match requested {
        Some(value) if parse_date_key(&value).is_some() => value,
        Some(value) => return Err(EntryError::InvalidDate(value)),
        None => date_key(today),
    };

    Ok(Entry {
        id: next_entry_id(now_millis, existing),
        title: draft.title,
        note: draft.note,
        date,
        image_uri: non_empty(draft.image_uri),
        voice_uri: non_empty(draft.voice_uri),
    })
}

/// Millisecond timestamp id, bumped past the newest numeric id already in the
/// collection so ids stay unique and increasing even within one millisecond.
pub fn next_entry_id(now_millis: i64, existing: &[Entry]) -> String {
    let newest = existing
        .iter()
        .filter_map(|entry| entry.id.parse::<i64>().ok())
        .max();

    match newest {
        Some(newest) if newest >= now_millis => newest.saturating_add(1).to_string(),
        _ => now_millis.to_string(),
    }
}

pub fn delete_entry(entries: &[Entry], id: &str) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.id != id)
        .cloned()
        .collect()
}

pub fn find_entry<'a>(entries: &'a [Entry], id: &str) -> Option<&'a Entry> {
    entries.iter().find(|entry| entry.id == id)
}

// Media refs are opaque; only an empty field means "none".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_715_335_200_000;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn draft(title: &str, note: &str) -> EntryDraft {
        EntryDraft {
            title: title.to_string(),
            note: note.to_string(),
            ..EntryDraft::default()
        }
    }

    #[test]
    fn create_defaults_to_today() {
        let entry = create_entry_at(draft("T", "N"), &[], today(), NOW).unwrap();

        assert_eq!(entry.date, "2024-05-10");
        assert_eq!(entry.title, "T");
        assert_eq!(entry.note, "N");
        assert!(!entry.id.is_empty());
        assert_eq!(entry.image_uri, None);
        assert_eq!(entry.voice_uri, None);
    }

    #[test]
    fn create_uses_given_date_and_media() {
        let input = EntryDraft {
            date: Some("2024-04-02".to_string()),
            image_uri: Some("file:///photos/a.jpg".to_string()),
            voice_uri: Some(String::new()),
            ..draft("", "")
        };
        let entry = create_entry_at(input, &[], today(), NOW).unwrap();

        assert_eq!(entry.date, "2024-04-02");
        assert_eq!(entry.image_uri.as_deref(), Some("file:///photos/a.jpg"));
        assert_eq!(entry.voice_uri, None);
    }

    #[test]
    fn date_is_trimmed_and_media_refs_are_kept_verbatim() {
        let input = EntryDraft {
            date: Some(" 2024-05-01 ".to_string()),
            voice_uri: Some(" file:///voice/a b.m4a".to_string()),
            ..draft("T", "N")
        };
        let entry = create_entry_at(input, &[], today(), NOW).unwrap();

        assert_eq!(entry.date, "2024-05-01");
        assert_eq!(entry.voice_uri.as_deref(), Some(" file:///voice/a b.m4a"));

        let blank_date = EntryDraft {
            date: Some("   ".to_string()),
            ..draft("T", "N")
        };
        let entry = create_entry_at(blank_date, &[], today(), NOW).unwrap();
        assert_eq!(entry.date, "2024-05-10");
    }

    #[test]
    fn create_rejects_malformed_date() {
        let input = EntryDraft {
            date: Some("10/05/2024".to_string()),
            ..draft("T", "N")
        };
        assert_eq!(
            create_entry_at(input, &[], today(), NOW),
            Err(EntryError::InvalidDate("10/05/2024".to_string()))
        );
    }

    #[test]
    fn ids_are_unique_within_the_same_millisecond() {
        let mut entries = Vec::new();
        for _ in 0..3 {
            let entry = create_entry_at(draft("T", "N"), &entries, today(), NOW).unwrap();
            entries.insert(0, entry);
        }

        let ids: Vec<_> = entries.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["1715335200002", "1715335200001", "1715335200000"]);
    }

    #[test]
    fn later_clock_wins_over_existing_ids() {
        let existing = create_entry_at(draft("a", ""), &[], today(), NOW).unwrap();
        assert_eq!(next_entry_id(NOW + 50, &[existing]), (NOW + 50).to_string());
    }

    #[test]
    fn delete_removes_only_the_match() {
        let first = create_entry_at(draft("a", ""), &[], today(), NOW).unwrap();
        let second = create_entry_at(draft("b", ""), &[first.clone()], today(), NOW).unwrap();
        let entries = vec![second.clone(), first.clone()];

        assert_eq!(delete_entry(&entries, &first.id), vec![second.clone()]);
        assert_eq!(delete_entry(&entries, "missing"), entries);
        assert_eq!(find_entry(&entries, &second.id), Some(&second));
        assert_eq!(find_entry(&entries, "missing"), None);
    }
}
