use eframe::egui;

use crate::nav::{NavEvent, NavView};
use crate::settings::{DisplayMode, Language, SettingsAction, SettingsPanel, SettingsStore};

pub struct HeaderInput<'a> {
    pub view: &'a NavView,
    pub search_text: &'a mut String,
    pub unread_notifications: usize,
    pub settings_store: &'a SettingsStore,
    pub settings_panel: &'a mut SettingsPanel,
}

#[derive(Debug, Default)]
pub struct HeaderOutput {
    pub events: Vec<NavEvent>,
    pub notifications_clicked: bool,
}

pub fn render_header(ui: &mut egui::Ui, input: HeaderInput<'_>) -> HeaderOutput {
    let mut output = HeaderOutput::default();

    ui.horizontal(|ui| {
        if ui.button("☰").on_hover_text("Toggle menu").clicked() {
            output.events.push(NavEvent::ToggleDrawer);
        }
        ui.add_space(8.0);

        let crumb_count = input.view.breadcrumbs.len();
        for (index, crumb) in input.view.breadcrumbs.iter().enumerate() {
            match &crumb.link {
                Some(link) => {
                    if ui.link(crumb.label.as_str()).clicked() {
                        output.events.push(NavEvent::RouteChanged { path: link.clone() });
                    }
                }
                None => {
                    ui.label(crumb.label.as_str());
                }
            }
            if index + 1 < crumb_count {
                ui.label("›");
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let language = input.settings_store.current().language;
            ui.menu_button("⚙", |ui| {
                render_settings(ui, input.settings_store, input.settings_panel);
            });

            let notifications = format!("🔔 {}", input.unread_notifications);
            if ui.button(notifications).clicked() {
                output.notifications_clicked = true;
            }

            ui.add(
                egui::TextEdit::singleline(input.search_text)
                    .hint_text(search_hint(language))
                    .desired_width(220.0),
            );
        });
    });

    output
}

fn render_settings(ui: &mut egui::Ui, store: &SettingsStore, panel: &mut SettingsPanel) {
    let current = store.current();
    ui.label(egui::RichText::new(settings_title(current.language)).strong());
    ui.separator();

    ui.label(section_label(SettingsSection::Language, current.language));
    ui.horizontal(|ui| {
        for language in [Language::En, Language::ZhCn] {
            if ui
                .selectable_label(current.language == language, language.display_name())
                .clicked()
            {
                panel.select(store, SettingsAction::ChangeLanguage(language));
            }
        }
    });

    ui.label(section_label(SettingsSection::Mode, current.language));
    ui.horizontal(|ui| {
        for mode in [DisplayMode::Light, DisplayMode::Dark] {
            if ui
                .selectable_label(current.mode == mode, mode_label(mode, current.language))
                .clicked()
            {
                panel.select(store, SettingsAction::ChangeMode(mode));
            }
        }
    });
}

fn settings_title(language: Language) -> &'static str {
    match language {
        Language::En => "Settings",
        Language::ZhCn => "设置",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsSection {
    Language,
    Mode,
}

fn section_label(section: SettingsSection, language: Language) -> &'static str {
    match (section, language) {
        (SettingsSection::Language, Language::En) => "Language",
        (SettingsSection::Mode, Language::En) => "Mode",
        (SettingsSection::Language, Language::ZhCn) => "语言",
        (SettingsSection::Mode, Language::ZhCn) => "模式",
    }
}

fn search_hint(language: Language) -> &'static str {
    match language {
        Language::En => "Search…",
        Language::ZhCn => "搜索…",
    }
}

pub fn mode_label(mode: DisplayMode, language: Language) -> &'static str {
    match (mode, language) {
        (DisplayMode::Light, Language::En) => "Light",
        (DisplayMode::Dark, Language::En) => "Dark",
        (DisplayMode::Light, Language::ZhCn) => "浅色",
        (DisplayMode::Dark, Language::ZhCn) => "深色",
    }
}
