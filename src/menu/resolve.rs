use serde::Serialize;

use super::{HOME_KEY, HOME_PATH, MenuTree};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ActiveSelection {
    pub active_key: Option<String>,
    pub ancestor_key: Option<String>,
}

impl ActiveSelection {
    pub fn is_active(&self, key: &str) -> bool {
        self.active_key.as_deref() == Some(key)
    }

    pub fn is_ancestor(&self, key: &str) -> bool {
        self.ancestor_key.as_deref() == Some(key)
    }
}

/// Derives the highlighted entry (and its group, when nested) from the current path.
///
/// An unmatched path is not an error: it yields an empty selection.
pub fn resolve_active(path: &str, tree: &MenuTree) -> ActiveSelection {
    let current_key = path.strip_prefix('/').unwrap_or(path);
    if current_key.is_empty() {
        return ActiveSelection {
            active_key: Some(HOME_KEY.to_owned()),
            ancestor_key: None,
        };
    }

    if tree.entries().iter().any(|entry| entry.key == current_key) {
        return ActiveSelection {
            active_key: Some(current_key.to_owned()),
            ancestor_key: None,
        };
    }

    for entry in tree.entries() {
        if entry.children.iter().any(|child| child.key == current_key) {
            return ActiveSelection {
                active_key: Some(current_key.to_owned()),
                ancestor_key: Some(entry.key.clone()),
            };
        }
    }

    ActiveSelection::default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    /// `None` for the unselectable group crumb.
    pub link: Option<String>,
}

pub fn breadcrumbs(path: &str, tree: &MenuTree, home_label: &str) -> Vec<Breadcrumb> {
    let mut trail = vec![Breadcrumb {
        label: home_label.to_owned(),
        link: Some(HOME_PATH.to_owned()),
    }];

    // The root is the home crumb itself; `/home` still gets its own entry crumb.
    if path.strip_prefix('/').unwrap_or(path).is_empty() {
        return trail;
    }

    let selection = resolve_active(path, tree);
    let Some(active_key) = selection.active_key.as_deref() else {
        return trail;
    };

    if let Some(ancestor_label) = selection
        .ancestor_key
        .as_deref()
        .and_then(|key| tree.label_for(key))
    {
        trail.push(Breadcrumb {
            label: ancestor_label.to_owned(),
            link: None,
        });
    }
    if let Some(label) = tree.label_for(active_key) {
        trail.push(Breadcrumb {
            label: label.to_owned(),
            link: Some(path.to_owned()),
        });
    }

    trail
}
