use crate::calendar::{CalendarState, build_month_view};
use crate::entries::{create_entry, delete_entry, find_entry};
use crate::errors::{AppError, StoreError};
use crate::heatmap::ThemeMode;
use crate::models::{Entry, EntryDraft, MonthView};
use crate::storage::{BlobStore, load_entries, load_entries_or_empty, save_entries};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlobStore>,
    pub entries: Arc<Mutex<Vec<Entry>>>,
    pub calendar: Arc<Mutex<CalendarState>>,
    pub theme: Arc<Mutex<ThemeMode>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn BlobStore>,
        entries: Vec<Entry>,
        today: NaiveDate,
        theme: ThemeMode,
    ) -> Self {
        Self {
            store,
            entries: Arc::new(Mutex::new(entries)),
            calendar: Arc::new(Mutex::new(CalendarState::new(today))),
            theme: Arc::new(Mutex::new(theme)),
        }
    }

    pub async fn load(store: Arc<dyn BlobStore>, theme: ThemeMode) -> Self {
        let entries = load_entries_or_empty(store.as_ref()).await;
        info!(count = entries.len(), "entries loaded");
        Self::new(store, entries, Local::now().date_naive(), theme)
    }

    /// Re-reads the store. An unreachable store keeps the in-memory
    /// collection; malformed data empties it.
    pub async fn refresh(&self) -> Vec<Entry> {
        let mut entries = self.entries.lock().await;
        match load_entries(self.store.as_ref()).await {
            Ok(loaded) => *entries = loaded,
            Err(StoreError::Malformed(reason)) => {
                error!("stored entries are malformed, continuing with none: {reason}");
                entries.clear();
            }
            Err(err) => warn!("keeping {} cached entries: {err}", entries.len()),
        }
        entries.clone()
    }

    pub async fn entries(&self) -> Vec<Entry> {
        self.entries.lock().await.clone()
    }

    pub async fn entry(&self, id: &str) -> Option<Entry> {
        find_entry(&self.entries.lock().await, id).cloned()
    }

    pub async fn create(&self, draft: EntryDraft) -> Result<Entry, AppError> {
        let mut entries = self.entries.lock().await;
        let entry = create_entry(draft, &entries)?;

        let mut updated = Vec::with_capacity(entries.len() + 1);
        updated.push(entry.clone());
        updated.extend(entries.iter().cloned());

        if let Err(err) = save_entries(self.store.as_ref(), &updated).await {
            error!("failed to save new entry: {err}");
            return Err(err.into());
        }
        *entries = updated;

        info!(id = %entry.id, date = %entry.date, "entry created");
        Ok(entry)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut entries = self.entries.lock().await;
        if find_entry(&entries, id).is_none() {
            return Ok(false);
        }

        let updated = delete_entry(&entries, id);
        if let Err(err) = save_entries(self.store.as_ref(), &updated).await {
            error!("failed to save after deleting {id}: {err}");
            return Err(err.into());
        }
        *entries = updated;

        info!(id, "entry deleted");
        Ok(true)
    }

    pub async fn theme(&self) -> ThemeMode {
        *self.theme.lock().await
    }

    pub async fn toggle_theme(&self) -> ThemeMode {
        let mut theme = self.theme.lock().await;
        *theme = theme.toggle();
        info!(theme = theme.as_str(), "theme toggled");
        *theme
    }

    pub async fn calendar(&self) -> CalendarState {
        *self.calendar.lock().await
    }

    pub async fn month_view(&self, month: Option<NaiveDate>) -> MonthView {
        let calendar = self.calendar().await;
        let theme = self.theme().await;
        let entries = self.entries.lock().await;
        build_month_view(
            &entries,
            month.unwrap_or(calendar.anchor),
            calendar.selected,
            theme,
        )
    }

    pub async fn shift_calendar(&self, delta: i32) -> MonthView {
        {
            let mut calendar = self.calendar.lock().await;
            if delta >= 0 {
                (0..delta).for_each(|_| calendar.next());
            } else {
                (delta..0).for_each(|_| calendar.prev());
            }
        }
        self.month_view(None).await
    }

    pub async fn select_date(&self, date: NaiveDate) -> MonthView {
        self.calendar.lock().await.select(date);
        self.month_view(None).await
    }
}
