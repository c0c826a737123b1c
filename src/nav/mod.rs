use tracing::{debug, info, warn};

use crate::menu::resolve::{ActiveSelection, Breadcrumb, breadcrumbs, resolve_active};
use crate::menu::routes::{RouteMatch, RouteTable, route_path_for};
use crate::menu::{MenuEntry, MenuTree};

pub mod drawer;
pub mod item;
pub mod router;
pub mod startup;

use self::drawer::{DrawerController, DrawerMode};
use self::item::{HoverTarget, ItemClick, ItemOverlay, MenuItemState};
use self::router::Navigator;

#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    ToggleDrawer,
    ViewportChanged { narrow: bool },
    HeaderClicked { key: String },
    LeafSelected { key: String },
    Hover { key: String, target: HoverTarget },
    RouteChanged { path: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChildView {
    pub key: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub active: bool,
    pub is_group: bool,
    pub children_visible: bool,
    pub overlay: ItemOverlay,
    pub children: Vec<ChildView>,
}

/// Everything one render pass needs, derived from a single read of the current path.
#[derive(Debug, Clone, PartialEq)]
pub struct NavView {
    pub drawer: DrawerMode,
    pub current_path: String,
    pub selection: ActiveSelection,
    pub items: Vec<ItemView>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub view: Option<String>,
}

/// Root navigation container: owns the drawer, the per-item state and the
/// routing capability, and turns input events into state transitions.
#[derive(Debug)]
pub struct NavShell<N> {
    tree: MenuTree,
    routes: RouteTable,
    drawer: DrawerController,
    items: Vec<MenuItemState>,
    intended_active_key: Option<String>,
    home_label: String,
    navigator: N,
}

impl<N: Navigator> NavShell<N> {
    pub fn new(
        tree: MenuTree,
        mut navigator: N,
        initially_narrow: bool,
        home_label: impl Into<String>,
    ) -> Self {
        let routes = RouteTable::synthesize(&tree);
        navigator.mount(routes.clone());
        let items = tree.entries().iter().map(MenuItemState::new).collect();

        Self {
            tree,
            routes,
            drawer: DrawerController::new(initially_narrow),
            items,
            intended_active_key: None,
            home_label: home_label.into(),
            navigator,
        }
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn drawer_mode(&self) -> DrawerMode {
        self.drawer.mode()
    }

    pub fn intended_active_key(&self) -> Option<&str> {
        self.intended_active_key.as_deref()
    }

    pub fn item(&self, key: &str) -> Option<&MenuItemState> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn set_home_label(&mut self, label: impl Into<String>) {
        self.home_label = label.into();
    }

    /// Replaces the menu once configuration has loaded. Item state is torn
    /// down and rebuilt; drawer state and location survive.
    pub fn replace_tree(&mut self, tree: MenuTree) {
        self.routes = RouteTable::synthesize(&tree);
        self.navigator.mount(self.routes.clone());
        self.items = tree.entries().iter().map(MenuItemState::new).collect();
        self.tree = tree;
        info!(
            entries = self.tree.len(),
            routes = self.routes.len(),
            "menu tree mounted"
        );
    }

    pub fn apply(&mut self, event: NavEvent) {
        match event {
            NavEvent::ToggleDrawer => {
                self.drawer.toggle();
                self.close_all_popovers();
            }
            NavEvent::ViewportChanged { narrow } => {
                if self.drawer.observe_viewport(narrow) {
                    self.close_all_popovers();
                }
            }
            NavEvent::HeaderClicked { key } => self.click_header(&key),
            NavEvent::LeafSelected { key } => self.select_leaf(&key),
            NavEvent::Hover { key, target } => {
                let mode = self.drawer.mode();
                if let Some(item) = self.item_mut(&key) {
                    item.hover(mode, target);
                }
            }
            NavEvent::RouteChanged { path } => {
                self.intended_active_key = resolve_active(&path, &self.tree).active_key;
                self.navigator.navigate(&path);
            }
        }
    }

    pub fn view(&self) -> NavView {
        let mode = self.drawer.mode();
        let current_path = self.navigator.current_path().to_owned();
        let selection = resolve_active(&current_path, &self.tree);

        let items = self
            .tree
            .entries()
            .iter()
            .zip(&self.items)
            .map(|(entry, state)| item_view(entry, state, &selection, mode))
            .collect();

        let view = match self.routes.lookup(&current_path) {
            RouteMatch::Found(route) => Some(route.view.clone()),
            RouteMatch::NotFound => None,
        };

        NavView {
            drawer: mode,
            breadcrumbs: breadcrumbs(&current_path, &self.tree, &self.home_label),
            current_path,
            selection,
            items,
            view,
        }
    }

    fn click_header(&mut self, key: &str) {
        let mode = self.drawer.mode();
        let Some(item) = self.item_mut(key) else {
            warn!(key, "header click for unknown menu entry");
            return;
        };

        match item.click_header(mode) {
            ItemClick::Toggled { children_open } => {
                debug!(key, children_open, "menu group toggled");
            }
            ItemClick::Select { key } => self.select_leaf(&key),
            ItemClick::Ignored => {}
        }
    }

    fn select_leaf(&mut self, key: &str) {
        let owner = self.tree.entries().iter().find_map(|entry| {
            if entry.key == key && !entry.is_group() {
                return Some(None);
            }
            entry
                .children
                .iter()
                .any(|child| child.key == key)
                .then(|| Some(entry.key.clone()))
        });

        let Some(owner) = owner else {
            warn!(key, "ignoring selection of a non-selectable menu key");
            return;
        };

        if let Some(item) = owner.as_deref().and_then(|group| self.item_mut(group)) {
            item.close_popover();
        }

        let path = route_path_for(key);
        self.intended_active_key = Some(key.to_owned());
        self.navigator.navigate(&path);
        debug!(key, path = %path, "menu leaf selected");
    }

    fn close_all_popovers(&mut self) {
        for item in &mut self.items {
            item.close_popover();
        }
    }

    fn item_mut(&mut self, key: &str) -> Option<&mut MenuItemState> {
        self.items.iter_mut().find(|item| item.key() == key)
    }
}

fn item_view(
    entry: &MenuEntry,
    state: &MenuItemState,
    selection: &ActiveSelection,
    mode: DrawerMode,
) -> ItemView {
    ItemView {
        key: entry.key.clone(),
        label: entry.label.clone(),
        icon: entry.icon.clone(),
        active: state.is_drawn_active(selection, mode),
        is_group: entry.is_group(),
        children_visible: state.children_visible(mode),
        overlay: state.overlay(mode),
        children: entry
            .children
            .iter()
            .map(|child| ChildView {
                key: child.key.clone(),
                label: child.label.clone(),
                active: selection.is_active(&child.key),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use crate::menu::reports_tree;

    use super::drawer::DrawerMode;
    use super::item::{Anchor, HoverTarget, ItemOverlay, PopoverState};
    use super::router::{MemoryRouter, Navigator};
    use super::{NavEvent, NavShell};

    fn shell(initially_narrow: bool) -> NavShell<MemoryRouter> {
        NavShell::new(
            reports_tree(),
            MemoryRouter::new(Default::default()),
            initially_narrow,
            "Home",
        )
    }

    fn hover(key: &str, target: HoverTarget) -> NavEvent {
        NavEvent::Hover {
            key: key.to_owned(),
            target,
        }
    }

    #[test]
    fn shell_mounts_synthesized_routes_into_the_navigator() {
        let shell = shell(false);
        assert_eq!(shell.navigator().routes(), shell.routes());
        assert_eq!(shell.view().view.as_deref(), Some("v0"));
    }

    #[test]
    fn collapsed_popover_selection_navigates_and_highlights_parent() {
        let mut shell = shell(true);
        assert_eq!(shell.drawer_mode(), DrawerMode::Collapsed);

        let anchor = Anchor::new(12.0, 96.0);
        shell.apply(hover("reports", HoverTarget::Icon { anchor }));
        let reports = shell.view().items[1].clone();
        assert_eq!(reports.overlay, ItemOverlay::Submenu { anchor });

        shell.apply(hover("reports", HoverTarget::Popover));
        shell.apply(NavEvent::LeafSelected {
            key: "stock".to_owned(),
        });

        let view = shell.view();
        assert_eq!(shell.navigator().current_path(), "/stock");
        assert_eq!(shell.intended_active_key(), Some("stock"));
        assert_eq!(view.selection.active_key.as_deref(), Some("stock"));
        assert_eq!(view.selection.ancestor_key.as_deref(), Some("reports"));
        assert_eq!(view.items[1].overlay, ItemOverlay::None);
        assert!(view.items[1].active);
        assert!(view.items[1].children[1].active);
        assert_eq!(view.view.as_deref(), Some("v2"));
    }

    #[test]
    fn expanded_group_header_toggles_without_navigation() {
        let mut shell = shell(false);
        let click = || NavEvent::HeaderClicked {
            key: "reports".to_owned(),
        };

        shell.apply(click());
        assert!(!shell.view().items[1].children_visible);
        shell.apply(click());
        assert!(shell.view().items[1].children_visible);

        assert_eq!(shell.navigator().history(), ["/"]);
        assert_eq!(shell.intended_active_key(), None);
    }

    #[test]
    fn expanded_parent_is_not_highlighted_for_active_child() {
        let mut shell = shell(false);
        shell.apply(NavEvent::LeafSelected {
            key: "sales".to_owned(),
        });

        let view = shell.view();
        assert!(!view.items[1].active);
        assert!(view.items[1].children[0].active);
        assert!(view.items[1].children_visible);
    }

    #[test]
    fn inline_child_selection_keeps_accordion_state() {
        let mut shell = shell(false);
        shell.apply(NavEvent::LeafSelected {
            key: "sales".to_owned(),
        });
        assert!(
            shell
                .item("reports")
                .expect("reports item should exist")
                .children_open()
        );
    }

    #[test]
    fn selecting_a_group_or_unknown_key_does_not_navigate() {
        let mut shell = shell(false);
        shell.apply(NavEvent::LeafSelected {
            key: "reports".to_owned(),
        });
        shell.apply(NavEvent::LeafSelected {
            key: "missing".to_owned(),
        });
        assert_eq!(shell.navigator().current_path(), "/");
    }

    #[test]
    fn top_level_leaf_click_navigates_home_to_root() {
        let mut shell = shell(false);
        shell.apply(NavEvent::RouteChanged {
            path: "/sales".to_owned(),
        });
        shell.apply(NavEvent::HeaderClicked {
            key: "home".to_owned(),
        });

        assert_eq!(shell.navigator().current_path(), "/");
        assert!(shell.view().items[0].active);
    }

    #[test]
    fn drawer_mode_change_closes_open_popovers() {
        let mut shell = shell(true);
        shell.apply(hover(
            "reports",
            HoverTarget::Icon {
                anchor: Anchor::new(1.0, 1.0),
            },
        ));
        shell.apply(NavEvent::ViewportChanged { narrow: false });

        assert_eq!(shell.drawer_mode(), DrawerMode::Expanded);
        assert_eq!(
            shell.item("reports").map(|item| item.popover()),
            Some(PopoverState::Closed)
        );

        shell.apply(NavEvent::ToggleDrawer);
        assert_eq!(shell.view().items[1].overlay, ItemOverlay::None);
    }

    #[test]
    fn unmatched_route_highlights_nothing() {
        let mut shell = shell(false);
        shell.apply(NavEvent::RouteChanged {
            path: "/nowhere".to_owned(),
        });

        let view = shell.view();
        assert!(view.items.iter().all(|item| !item.active));
        assert_eq!(view.view, None);
        assert_eq!(view.breadcrumbs.len(), 1);
    }

    #[test]
    fn replace_tree_rebuilds_items_and_routes() {
        let mut shell = NavShell::new(
            crate::menu::MenuTree::placeholder(),
            MemoryRouter::new(Default::default()),
            false,
            "Home",
        );
        assert!(shell.routes().is_empty());

        shell.replace_tree(reports_tree());
        assert_eq!(shell.routes().len(), 3);
        assert!(shell.item("reports").is_some());
        assert_eq!(shell.view().view.as_deref(), Some("v0"));
    }
}
