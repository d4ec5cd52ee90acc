pub mod app;
pub mod calendar;
pub mod entries;
pub mod errors;
pub mod handlers;
pub mod heatmap;
pub mod index;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use heatmap::ThemeMode;
pub use state::AppState;
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore, resolve_data_dir};
