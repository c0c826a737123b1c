use serde::Serialize;

use crate::menu::MenuEntry;
use crate::menu::resolve::ActiveSelection;

use super::drawer::DrawerMode;

/// Screen position of the icon a popover or tooltip is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Anchor {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PopoverState {
    #[default]
    Closed,
    OpenAt { anchor: Anchor },
}

impl PopoverState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::OpenAt { .. })
    }
}

/// Where the pointer currently is relative to one menu item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum HoverTarget {
    Icon { anchor: Anchor },
    Popover,
    Outside,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemClick {
    Toggled { children_open: bool },
    Select { key: String },
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemOverlay {
    None,
    Tooltip { anchor: Anchor },
    Submenu { anchor: Anchor },
}

/// Per top-level entry interaction state.
///
/// `children_open` drives the inline accordion while the drawer is expanded;
/// `popover` drives the hover submenu (or tooltip, for leaves) while it is
/// collapsed. Each half is inert in the other mode.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemState {
    key: String,
    is_group: bool,
    children_open: bool,
    popover: PopoverState,
}

impl MenuItemState {
    pub fn new(entry: &MenuEntry) -> Self {
        Self {
            key: entry.key.clone(),
            is_group: entry.is_group(),
            children_open: true,
            popover: PopoverState::Closed,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_group(&self) -> bool {
        self.is_group
    }

    pub fn children_open(&self) -> bool {
        self.children_open
    }

    pub fn popover(&self) -> PopoverState {
        self.popover
    }

    pub fn click_header(&mut self, mode: DrawerMode) -> ItemClick {
        if !self.is_group {
            return ItemClick::Select {
                key: self.key.clone(),
            };
        }

        match mode {
            DrawerMode::Expanded => {
                self.children_open = !self.children_open;
                ItemClick::Toggled {
                    children_open: self.children_open,
                }
            }
            // Collapsed groups only open on hover.
            DrawerMode::Collapsed => ItemClick::Ignored,
        }
    }

    pub fn hover(&mut self, mode: DrawerMode, target: HoverTarget) {
        if mode.is_expanded() {
            return;
        }

        match target {
            HoverTarget::Icon { anchor } => {
                self.popover = PopoverState::OpenAt { anchor };
            }
            // Entering the popover keeps it alive only if it is still showing.
            HoverTarget::Popover => {}
            HoverTarget::Outside => self.popover = PopoverState::Closed,
        }
    }

    pub fn close_popover(&mut self) {
        self.popover = PopoverState::Closed;
    }

    pub fn children_visible(&self, mode: DrawerMode) -> bool {
        self.is_group && mode.is_expanded() && self.children_open
    }

    pub fn overlay(&self, mode: DrawerMode) -> ItemOverlay {
        if mode.is_expanded() {
            return ItemOverlay::None;
        }

        match (self.popover, self.is_group) {
            (PopoverState::Closed, _) => ItemOverlay::None,
            (PopoverState::OpenAt { anchor }, true) => ItemOverlay::Submenu { anchor },
            (PopoverState::OpenAt { anchor }, false) => ItemOverlay::Tooltip { anchor },
        }
    }

    /// A collapsed group also lights up when one of its hidden children is active.
    pub fn is_drawn_active(&self, selection: &ActiveSelection, mode: DrawerMode) -> bool {
        selection.is_active(&self.key)
            || (!mode.is_expanded() && selection.is_ancestor(&self.key))
    }
}

#[cfg(test)]
mod tests {
    use crate::menu::resolve::ActiveSelection;
    use crate::menu::{MenuChild, MenuEntry};

    use super::{Anchor, DrawerMode, HoverTarget, ItemClick, ItemOverlay, MenuItemState, PopoverState};

    fn group_state() -> MenuItemState {
        MenuItemState::new(&MenuEntry::group(
            "reports",
            "Reports",
            "chart",
            vec![
                MenuChild::new("sales", "Sales", "v1"),
                MenuChild::new("stock", "Stock", "v2"),
            ],
        ))
    }

    fn leaf_state() -> MenuItemState {
        MenuItemState::new(&MenuEntry::leaf("workflow", "Workflow", "mail", "v3"))
    }

    fn icon_at(x: f32, y: f32) -> HoverTarget {
        HoverTarget::Icon {
            anchor: Anchor::new(x, y),
        }
    }

    #[test]
    fn expanded_header_clicks_toggle_children_without_selecting() {
        let mut item = group_state();
        assert!(item.children_open());

        assert_eq!(
            item.click_header(DrawerMode::Expanded),
            ItemClick::Toggled {
                children_open: false
            }
        );
        assert!(!item.children_visible(DrawerMode::Expanded));

        assert_eq!(
            item.click_header(DrawerMode::Expanded),
            ItemClick::Toggled {
                children_open: true
            }
        );
        assert!(item.children_visible(DrawerMode::Expanded));
    }

    #[test]
    fn collapsed_group_header_click_is_ignored() {
        let mut item = group_state();
        assert_eq!(item.click_header(DrawerMode::Collapsed), ItemClick::Ignored);
        assert!(item.children_open());
        assert!(!item.children_visible(DrawerMode::Collapsed));
    }

    #[test]
    fn leaf_header_click_selects_in_both_modes() {
        let mut item = leaf_state();
        for mode in [DrawerMode::Expanded, DrawerMode::Collapsed] {
            assert_eq!(
                item.click_header(mode),
                ItemClick::Select {
                    key: "workflow".to_owned()
                }
            );
        }
    }

    #[test]
    fn collapsed_hover_opens_submenu_at_icon_and_leave_closes_it() {
        let mut item = group_state();
        item.hover(DrawerMode::Collapsed, icon_at(10.0, 120.0));
        assert_eq!(
            item.overlay(DrawerMode::Collapsed),
            ItemOverlay::Submenu {
                anchor: Anchor::new(10.0, 120.0)
            }
        );

        item.hover(DrawerMode::Collapsed, HoverTarget::Popover);
        assert!(item.popover().is_open());

        item.hover(DrawerMode::Collapsed, HoverTarget::Outside);
        assert_eq!(item.popover(), PopoverState::Closed);
        assert_eq!(item.overlay(DrawerMode::Collapsed), ItemOverlay::None);
    }

    #[test]
    fn late_popover_hover_after_leave_stays_closed() {
        let mut item = group_state();
        item.hover(DrawerMode::Collapsed, icon_at(0.0, 0.0));
        item.hover(DrawerMode::Collapsed, HoverTarget::Outside);
        item.hover(DrawerMode::Collapsed, HoverTarget::Popover);
        assert_eq!(item.popover(), PopoverState::Closed);
    }

    #[test]
    fn hover_is_ignored_while_expanded() {
        let mut item = group_state();
        item.hover(DrawerMode::Expanded, icon_at(5.0, 5.0));
        assert_eq!(item.popover(), PopoverState::Closed);
        assert_eq!(item.overlay(DrawerMode::Expanded), ItemOverlay::None);
    }

    #[test]
    fn collapsed_leaf_hover_shows_tooltip() {
        let mut item = leaf_state();
        item.hover(DrawerMode::Collapsed, icon_at(4.0, 40.0));
        assert_eq!(
            item.overlay(DrawerMode::Collapsed),
            ItemOverlay::Tooltip {
                anchor: Anchor::new(4.0, 40.0)
            }
        );
    }

    #[test]
    fn ancestor_highlight_applies_only_when_collapsed() {
        let item = group_state();
        let selection = ActiveSelection {
            active_key: Some("sales".to_owned()),
            ancestor_key: Some("reports".to_owned()),
        };

        assert!(item.is_drawn_active(&selection, DrawerMode::Collapsed));
        assert!(!item.is_drawn_active(&selection, DrawerMode::Expanded));
    }

    #[test]
    fn directly_active_item_is_drawn_active_in_both_modes() {
        let item = leaf_state();
        let selection = ActiveSelection {
            active_key: Some("workflow".to_owned()),
            ancestor_key: None,
        };

        assert!(item.is_drawn_active(&selection, DrawerMode::Collapsed));
        assert!(item.is_drawn_active(&selection, DrawerMode::Expanded));
    }
}
