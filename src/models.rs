use crate::heatmap::{Palette, Rgb, ThemeMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub note: String,
    pub date: String,
    pub image_uri: Option<String>,
    pub voice_uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub voice_uri: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DateAggregate {
    pub present: bool,
    pub count: u32,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct DayCell {
    pub date: String,
    pub day: u32,
    pub count: u32,
    pub color: Rgb,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct MonthView {
    pub month: String,
    pub label: String,
    pub selected_date: String,
    pub max_count: u32,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<Option<DayCell>>,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub mode: ThemeMode,
    pub palette: Palette,
}
