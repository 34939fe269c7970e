use std::sync::{Mutex, MutexGuard};

use url::Url;

use super::{Anchor, HostPage, WIDGET_CONTAINER_ID};

/// The widget as currently mounted on a [`StaticPage`].
#[derive(Debug, Clone, PartialEq)]
pub struct MountedWidget {
    pub anchor: Anchor,
    pub markup: String,
    pub minimized: bool,
}

#[derive(Debug, Default)]
struct WidgetSlot {
    mounted: Option<MountedWidget>,
    mounts: usize,
    history: Vec<String>,
    reloads: usize,
}

/// In-memory host page: fixed URL and markup, plus a widget slot.
///
/// Records every markup written into the widget so tests and embedders
/// can observe the injection state machine.
#[derive(Debug)]
pub struct StaticPage {
    url: Url,
    markup: String,
    slot: Mutex<WidgetSlot>,
}

impl StaticPage {
    pub fn new(url: Url, markup: impl Into<String>) -> Self {
        Self {
            url,
            markup: markup.into(),
            slot: Mutex::new(WidgetSlot::default()),
        }
    }

    fn slot(&self) -> MutexGuard<'_, WidgetSlot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The mounted widget, if any.
    pub fn widget(&self) -> Option<MountedWidget> {
        self.slot().mounted.clone()
    }

    /// Every markup written to the widget since the last reload, in order.
    pub fn history(&self) -> Vec<String> {
        self.slot().history.clone()
    }

    /// Number of containers created since the last reload.
    pub fn mount_count(&self) -> usize {
        self.slot().mounts
    }

    pub fn reload_count(&self) -> usize {
        self.slot().reloads
    }

    /// Whether the page's own markup already carries a container.
    fn markup_has_container(&self) -> bool {
        self.markup
            .contains(&format!("id=\"{}\"", WIDGET_CONTAINER_ID))
    }
}

impl HostPage for StaticPage {
    fn url(&self) -> Url {
        self.url.clone()
    }

    fn markup(&self) -> String {
        self.markup.clone()
    }

    fn has_widget(&self) -> bool {
        self.markup_has_container() || self.slot().mounted.is_some()
    }

    fn mount_widget(&self, anchor: &Anchor, markup: &str) {
        let mut slot = self.slot();
        if slot.mounted.is_some() {
            return;
        }
        slot.mounted = Some(MountedWidget {
            anchor: anchor.clone(),
            markup: markup.to_string(),
            minimized: false,
        });
        slot.mounts += 1;
        slot.history.push(markup.to_string());
    }

    fn replace_widget(&self, markup: &str) {
        let mut guard = self.slot();
        let slot = &mut *guard;
        if let Some(widget) = slot.mounted.as_mut() {
            widget.markup = markup.to_string();
            slot.history.push(markup.to_string());
        }
    }

    fn minimize_widget(&self) {
        if let Some(widget) = self.slot().mounted.as_mut() {
            widget.minimized = true;
        }
    }

    fn reload(&self) {
        let mut slot = self.slot();
        slot.mounted = None;
        slot.mounts = 0;
        slot.history.clear();
        slot.reloads += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(markup: &str) -> StaticPage {
        StaticPage::new(Url::parse("https://example.com/a").unwrap(), markup)
    }

    #[test]
    fn test_mount_is_idempotent() {
        let p = page("<html></html>");
        assert!(!p.has_widget());
        p.mount_widget(&Anchor::PageBody, "<div>one</div>");
        p.mount_widget(&Anchor::PageBody, "<div>two</div>");
        assert_eq!(p.mount_count(), 1);
        assert_eq!(p.widget().unwrap().markup, "<div>one</div>");
    }

    #[test]
    fn test_replace_and_minimize() {
        let p = page("<html></html>");
        p.replace_widget("<div>ignored</div>");
        assert!(p.history().is_empty());

        p.mount_widget(&Anchor::landmark("#rhs"), "loading");
        p.replace_widget("done");
        p.minimize_widget();
        let w = p.widget().unwrap();
        assert_eq!(w.markup, "done");
        assert!(w.minimized);
        assert_eq!(p.history(), vec!["loading", "done"]);
    }

    #[test]
    fn test_reload_discards_widget() {
        let p = page("<html></html>");
        p.mount_widget(&Anchor::PageBody, "x");
        p.reload();
        assert!(!p.has_widget());
        assert_eq!(p.reload_count(), 1);
    }

    #[test]
    fn test_existing_container_in_markup() {
        let p = page(r#"<html><body><div id="streamguide-container"></div></body></html>"#);
        assert!(p.has_widget());
    }
}
