use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::notifications::Notification;

pub mod resolve;
pub mod routes;

pub const HOME_KEY: &str = "home";
pub const HOME_PATH: &str = "/";
pub const DEFAULT_HOME_LABEL: &str = "Home";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuEntry {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuChild>,
}

/// Second-level entry. Children never nest further and are always selectable leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuChild {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub view: Option<String>,
}

impl MenuEntry {
    pub fn leaf(
        key: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        view: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: Some(icon.into()),
            view: Some(view.into()),
            children: Vec::new(),
        }
    }

    pub fn group(
        key: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        children: Vec<MenuChild>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: Some(icon.into()),
            view: None,
            children,
        }
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

impl MenuChild {
    pub fn new(key: impl Into<String>, label: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            view: Some(view.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuConfigError {
    #[error("menu configuration has no entries")]
    EmptyTree,

    #[error("menu entry with label `{label}` has an empty key")]
    EmptyKey { label: String },

    #[error("menu key `{key}` cannot be used as a path segment")]
    InvalidKey { key: String },

    #[error("menu key `{key}` is used more than once")]
    DuplicateKey { key: String },

    #[error("top-level menu entry `{key}` has no icon")]
    MissingIcon { key: String },

    #[error("menu entry `{key}` has neither a view nor children")]
    EmptyEntry { key: String },

    #[error("menu entry `{key}` has both a view and children")]
    AmbiguousEntry { key: String },

    #[error("child menu entry `{key}` under `{parent}` has no view")]
    ChildWithoutView { key: String, parent: String },
}

/// Validated two-level navigation tree. Keys are unique across both levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MenuTree {
    entries: Vec<MenuEntry>,
}

impl MenuTree {
    pub fn new(entries: Vec<MenuEntry>) -> Result<Self, MenuConfigError> {
        if entries.is_empty() {
            return Err(MenuConfigError::EmptyTree);
        }

        let mut seen = BTreeSet::new();
        for entry in &entries {
            check_key(&entry.key, &entry.label, &mut seen)?;
            if entry.icon.as_deref().is_none_or(|icon| icon.trim().is_empty()) {
                return Err(MenuConfigError::MissingIcon {
                    key: entry.key.clone(),
                });
            }

            match (entry.view.is_some(), entry.is_group()) {
                (false, false) => {
                    return Err(MenuConfigError::EmptyEntry {
                        key: entry.key.clone(),
                    });
                }
                (true, true) => {
                    return Err(MenuConfigError::AmbiguousEntry {
                        key: entry.key.clone(),
                    });
                }
                _ => {}
            }

            for child in &entry.children {
                check_key(&child.key, &child.label, &mut seen)?;
                if child.view.is_none() {
                    return Err(MenuConfigError::ChildWithoutView {
                        key: child.key.clone(),
                        parent: entry.key.clone(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// Tree shown while the real configuration is still loading.
    ///
    /// The lone home entry has no view, so it is deliberately unroutable: it
    /// would fail [`MenuTree::new`] as an empty entry, synthesizes no routes,
    /// and every route lookup is `NotFound` until the real tree is mounted.
    pub fn placeholder() -> Self {
        Self {
            entries: vec![MenuEntry {
                key: HOME_KEY.to_owned(),
                label: DEFAULT_HOME_LABEL.to_owned(),
                icon: Some("home".to_owned()),
                view: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn entry(&self, key: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn label_for(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| {
            if entry.key == key {
                return Some(entry.label.as_str());
            }
            entry
                .children
                .iter()
                .find(|child| child.key == key)
                .map(|child| child.label.as_str())
        })
    }

    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| 1 + entry.children.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_key(key: &str, label: &str, seen: &mut BTreeSet<String>) -> Result<(), MenuConfigError> {
    if key.trim().is_empty() {
        return Err(MenuConfigError::EmptyKey {
            label: label.to_owned(),
        });
    }
    if key.contains('/') || key.chars().any(char::is_whitespace) {
        return Err(MenuConfigError::InvalidKey {
            key: key.to_owned(),
        });
    }
    if !seen.insert(key.to_owned()) {
        return Err(MenuConfigError::DuplicateKey {
            key: key.to_owned(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMenuConfig {
    #[serde(default)]
    home_label: Option<String>,
    menus: Vec<MenuEntry>,
    #[serde(default)]
    notifications: Vec<Notification>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    pub tree: MenuTree,
    pub home_label: Option<String>,
    pub notifications: Vec<Notification>,
}

impl MenuConfig {
    pub fn from_tree(tree: MenuTree) -> Self {
        Self {
            tree,
            home_label: None,
            notifications: Vec::new(),
        }
    }
}

pub fn parse_menu_config(raw: &str) -> Result<MenuConfig> {
    let parsed =
        serde_yaml::from_str::<RawMenuConfig>(raw).context("failed to parse menu configuration")?;
    let tree = MenuTree::new(parsed.menus).context("invalid menu configuration")?;
    Ok(MenuConfig {
        tree,
        home_label: parsed
            .home_label
            .map(|label| label.trim().to_owned())
            .filter(|label| !label.is_empty()),
        notifications: parsed.notifications,
    })
}

pub fn load_menu_config_file(path: &Path) -> Result<MenuConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read menu configuration `{}`", path.display()))?;
    parse_menu_config(&raw)
        .with_context(|| format!("failed to load menu configuration `{}`", path.display()))
}

pub fn default_console_menu() -> MenuTree {
    let entries = vec![
        MenuEntry::leaf(HOME_KEY, "Overview", "home", "welcome"),
        MenuEntry::group(
            "accesscontrol",
            "Access Control",
            "security",
            vec![
                MenuChild::new("security", "Entity Management", "entity-management"),
                MenuChild::new("resources", "Entitlement", "entitlement"),
            ],
        ),
        MenuEntry::leaf("workflow", "Workflow", "mail", "workspace"),
        MenuEntry::group(
            "components",
            "Components",
            "handyman",
            vec![
                MenuChild::new("form", "Form", "form-display"),
                MenuChild::new("table", "Table", "table-demo"),
                MenuChild::new("richTextEditor", "Rich Text Editor", "rich-text-editor"),
                MenuChild::new("contentDisplay", "Content Display", "content-display"),
                MenuChild::new("dragZoomPopup", "Drag Zoom Popup", "drag-zoom-popup"),
                MenuChild::new("editGrid", "Edit Grid", "edit-grid"),
                MenuChild::new("filterAssemble", "Filter Assemble", "filter-assemble"),
            ],
        ),
    ];

    MenuTree { entries }
}

#[cfg(test)]
pub(crate) fn reports_tree() -> MenuTree {
    MenuTree::new(vec![
        MenuEntry::leaf(HOME_KEY, "Overview", "home", "v0"),
        MenuEntry::group(
            "reports",
            "Reports",
            "chart",
            vec![
                MenuChild::new("sales", "Sales", "v1"),
                MenuChild::new("stock", "Stock", "v2"),
            ],
        ),
    ])
    .expect("reports tree should be valid")
}
