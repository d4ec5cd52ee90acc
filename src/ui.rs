use crate::heatmap::ThemeMode;
use crate::models::{Entry, MonthView};
use maud::{Markup, html};

pub fn render_index(view: &MonthView, day_entries: &[Entry], theme: ThemeMode) -> String {
    let palette = theme.palette();
    let theme_icon = match theme {
        ThemeMode::Light => "&#9728;",
        ThemeMode::Dark => "&#9790;",
    };

    INDEX_HTML
        .replace("{{BACKGROUND}}", &palette.background.to_string())
        .replace("{{CARD}}", &palette.card.to_string())
        .replace("{{TEXT}}", &palette.text.to_string())
        .replace("{{PRIMARY}}", &palette.primary.to_string())
        .replace("{{BORDER}}", &palette.border.to_string())
        .replace("{{THEME_ICON}}", theme_icon)
        .replace("{{MONTH_LABEL}}", &html! { (view.label) }.into_string())
        .replace("{{WEEKDAYS}}", &render_weekdays(view).into_string())
        .replace("{{GRID}}", &render_grid(view).into_string())
        .replace("{{SELECTED}}", &html! { (view.selected_date) }.into_string())
        .replace("{{ENTRIES}}", &render_entries(day_entries).into_string())
}

fn render_weekdays(view: &MonthView) -> Markup {
    html! {
        @for day in &view.weekdays {
            div.weekday { (day) }
        }
    }
}

fn render_grid(view: &MonthView) -> Markup {
    html! {
        @for cell in &view.cells {
            @if let Some(cell) = cell {
                form method="post" action="/calendar/select" {
                    input type="hidden" name="date" value=(cell.date);
                    button.day.selected[cell.selected]
                        style={ "background:" (cell.color.to_string()) }
                        title={ (cell.count) " entries" } {
                        (cell.day)
                    }
                }
            } @else {
                div.day.blank {}
            }
        }
    }
}

fn render_entries(entries: &[Entry]) -> Markup {
    html! {
        @if entries.is_empty() {
            p.empty { "No entries for this day" }
        }
        @for entry in entries {
            article.entry {
                h3 {
                    @if entry.title.is_empty() { "(untitled)" } @else { (entry.title) }
                }
                p { (entry.note) }
                @if let Some(image) = &entry.image_uri {
                    img src=(image) alt="";
                }
                @if let Some(voice) = &entry.voice_uri {
                    audio controls src=(voice) {}
                }
                form method="post" action={ "/entries/" (entry.id) "/delete" } {
                    button.danger { "Delete" }
                }
            }
        }
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Diary</title>
  <style>
    :root {
      --bg: {{BACKGROUND}};
      --card: {{CARD}};
      --ink: {{TEXT}};
      --accent: {{PRIMARY}};
      --border: {{BORDER}};
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 24px 14px 40px;
    }

    .app {
      width: min(560px, 100%);
      display: grid;
      gap: 20px;
    }

    header,
    .month {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    button {
      font: inherit;
      color: inherit;
      border: none;
      cursor: pointer;
    }

    .icon {
      background: transparent;
      color: var(--accent);
      font-size: 1.3rem;
      padding: 6px 10px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .weekday {
      text-align: center;
      font-weight: 500;
      padding: 4px 0;
    }

    .day {
      width: 100%;
      aspect-ratio: 1;
      border-radius: 6px;
    }

    .day.blank {
      background: transparent;
    }

    .day.selected {
      background: var(--accent) !important;
      color: var(--card);
    }

    .card,
    .entry {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 10px;
      padding: 14px;
    }

    .entry img {
      width: 100%;
      border-radius: 10px;
    }

    .entry audio {
      width: 100%;
      margin-top: 8px;
    }

    .card {
      display: grid;
      gap: 10px;
    }

    input,
    textarea {
      font: inherit;
      padding: 10px;
      border-radius: 10px;
      border: 1px solid var(--border);
      background: var(--bg);
      color: var(--ink);
    }

    textarea {
      min-height: 110px;
    }

    .primary {
      background: var(--accent);
      color: #fff;
      padding: 12px;
      border-radius: 10px;
      font-weight: bold;
    }

    .danger {
      background: transparent;
      color: rgb(255,59,48);
      padding: 6px 0;
    }

    .empty {
      text-align: center;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Diary</h1>
      <form method="post" action="/theme/toggle"><button class="icon" title="Toggle theme">{{THEME_ICON}}</button></form>
    </header>

    <section>
      <div class="month">
        <form method="post" action="/calendar/prev"><button class="icon">&lt;</button></form>
        <strong>{{MONTH_LABEL}}</strong>
        <form method="post" action="/calendar/next"><button class="icon">&gt;</button></form>
      </div>
      <div class="grid">{{WEEKDAYS}}</div>
      <div class="grid">{{GRID}}</div>
    </section>

    <section>
      <h2>{{SELECTED}}</h2>
      {{ENTRIES}}
    </section>

    <form class="card" method="post" action="/entries">
      <h2>New entry</h2>
      <input type="hidden" name="date" value="{{SELECTED}}" />
      <input name="title" placeholder="Entry title" />
      <textarea name="note" placeholder="Write your diary entry..."></textarea>
      <input name="imageUri" placeholder="Image URI (optional)" />
      <input name="voiceUri" placeholder="Voice note URI (optional)" />
      <button class="primary">Save Entry</button>
    </form>
  </main>
</body>
</html>
"#;
