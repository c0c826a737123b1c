use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Warning,
    #[default]
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub content: String,
    pub time: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    pub fn new(items: Vec<Notification>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    /// Case-insensitive match on title or content; a blank query keeps everything.
    pub fn filtered(&self, query: &str) -> Vec<&Notification> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }

        self.items
            .iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&needle)
                    || item.content.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if !item.read => {
                item.read = true;
                true
            }
            _ => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Notification, NotificationFeed, NotificationKind};

    #[test]
    fn filter_matches_title_or_content_ignoring_case() {
        let feed = sample_feed();
        let ids = feed
            .filtered("MESSAGE")
            .iter()
            .map(|item| item.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["2"]);
        assert_eq!(feed.filtered("  ").len(), 3);
    }

    #[test]
    fn mark_read_updates_unread_count_once() {
        let mut feed = sample_feed();
        assert_eq!(feed.unread_count(), 2);

        assert!(feed.mark_read("1"));
        assert!(!feed.mark_read("1"));
        assert!(!feed.mark_read("missing"));
        assert_eq!(feed.unread_count(), 1);

        feed.mark_all_read();
        assert_eq!(feed.unread_count(), 0);
    }

    fn sample_feed() -> NotificationFeed {
        NotificationFeed::new(vec![
            notification("1", "System Update", "A new update is available.", false),
            notification("2", "New Message", "The administrator wrote to you.", false),
            notification("3", "Task Completed", "Background task finished.", true),
        ])
    }

    fn notification(id: &str, title: &str, content: &str, read: bool) -> Notification {
        Notification {
            id: id.to_owned(),
            title: title.to_owned(),
            content: content.to_owned(),
            time: "just now".to_owned(),
            read,
            kind: NotificationKind::Info,
        }
    }
}
