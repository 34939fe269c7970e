#![allow(dead_code)]

pub mod catalog_server;

use std::sync::Arc;

use streamguide_core::{DismissalStore, MemoryKvStore, StaticPage};
use url::Url;

pub const KEY_PREFIX: &str = "streamguide-minimized-";

pub fn memory_dismissals() -> DismissalStore {
    DismissalStore::new(Arc::new(MemoryKvStore::new()), KEY_PREFIX)
}

pub fn page(url: &str, markup: &str) -> Arc<StaticPage> {
    Arc::new(StaticPage::new(
        Url::parse(url).expect("valid test url"),
        markup,
    ))
}
