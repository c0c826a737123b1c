use eframe::egui;

use crate::nav::item::{Anchor, HoverTarget, ItemOverlay};
use crate::nav::{ItemView, NavEvent, NavView};

const ACTIVE_FILL: egui::Color32 = egui::Color32::from_rgb(34, 101, 139);
const POPOVER_MIN_WIDTH: f32 = 180.0;

pub fn icon_glyph(icon: Option<&str>) -> &'static str {
    match icon.unwrap_or_default() {
        "home" => "🏠",
        "security" => "🛡",
        "mail" => "✉",
        "handyman" => "🔧",
        "chart" | "reports" => "📊",
        "table" => "▦",
        "settings" => "⚙",
        _ => "•",
    }
}

pub fn render_drawer(ui: &mut egui::Ui, view: &NavView, events: &mut Vec<NavEvent>) {
    if view.drawer.is_expanded() {
        for item in &view.items {
            render_inline_item(ui, item, events);
        }
    } else {
        for item in &view.items {
            render_collapsed_item(ui, item, events);
        }
    }
}

fn render_inline_item(ui: &mut egui::Ui, item: &ItemView, events: &mut Vec<NavEvent>) {
    let mut text = format!("{}  {}", icon_glyph(item.icon.as_deref()), item.label);
    if item.is_group {
        text.push_str(if item.children_visible { "  ▴" } else { "  ▾" });
    }

    if active_label(ui, item.active, text).clicked() {
        events.push(NavEvent::HeaderClicked {
            key: item.key.clone(),
        });
    }

    if !item.children_visible {
        return;
    }

    ui.indent(("children", item.key.as_str()), |ui| {
        for child in &item.children {
            if active_label(ui, child.active, child.label.as_str()).clicked() {
                events.push(NavEvent::LeafSelected {
                    key: child.key.clone(),
                });
            }
        }
    });
}

fn render_collapsed_item(ui: &mut egui::Ui, item: &ItemView, events: &mut Vec<NavEvent>) {
    let icon = active_label(ui, item.active, icon_glyph(item.icon.as_deref()));
    if icon.clicked() {
        events.push(NavEvent::HeaderClicked {
            key: item.key.clone(),
        });
    }

    let popover_hovered = match item.overlay {
        ItemOverlay::None => false,
        ItemOverlay::Tooltip { anchor } => {
            show_overlay(ui.ctx(), item, anchor, |ui| {
                ui.label(item.label.as_str());
            });
            false
        }
        ItemOverlay::Submenu { anchor } => show_overlay(ui.ctx(), item, anchor, |ui| {
            ui.label(egui::RichText::new(item.label.as_str()).strong());
            ui.separator();
            for child in &item.children {
                if active_label(ui, child.active, child.label.as_str()).clicked() {
                    events.push(NavEvent::LeafSelected {
                        key: child.key.clone(),
                    });
                }
            }
        }),
    };

    let corner = icon.rect.right_top();
    let icon_anchor = Anchor::new(corner.x, corner.y);
    if let Some(target) = hover_target(icon.hovered(), icon_anchor, popover_hovered, item.overlay) {
        events.push(NavEvent::Hover {
            key: item.key.clone(),
            target,
        });
    }
}

/// Maps where the pointer is to the hover event worth sending this frame.
///
/// Idle items and an icon already showing its overlay at the same anchor send nothing.
pub fn hover_target(
    icon_hovered: bool,
    icon_anchor: Anchor,
    popover_hovered: bool,
    overlay: ItemOverlay,
) -> Option<HoverTarget> {
    let open_anchor = match overlay {
        ItemOverlay::None => None,
        ItemOverlay::Tooltip { anchor } | ItemOverlay::Submenu { anchor } => Some(anchor),
    };

    if icon_hovered {
        return (open_anchor != Some(icon_anchor)).then_some(HoverTarget::Icon {
            anchor: icon_anchor,
        });
    }
    if popover_hovered {
        return Some(HoverTarget::Popover);
    }
    open_anchor.map(|_| HoverTarget::Outside)
}

fn show_overlay(
    ctx: &egui::Context,
    item: &ItemView,
    anchor: Anchor,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> bool {
    let area = egui::Area::new(egui::Id::new(("nav-overlay", item.key.as_str())))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(anchor.x, anchor.y))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(if item.is_group { POPOVER_MIN_WIDTH } else { 0.0 });
                add_contents(ui);
            });
        });
    area.response.contains_pointer()
}

fn active_label(ui: &mut egui::Ui, active: bool, text: impl Into<String>) -> egui::Response {
    let text = egui::RichText::new(text.into());
    let text = if active {
        text.color(egui::Color32::WHITE).background_color(ACTIVE_FILL)
    } else {
        text
    };
    ui.selectable_label(active, text)
}
