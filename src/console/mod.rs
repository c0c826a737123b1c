use std::time::Duration;

use anyhow::{Context, Result};
use eframe::egui;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::{COLLAPSED_DRAWER_WIDTH_PX, ShellSettings};
use crate::menu::MenuTree;
use crate::nav::router::MemoryRouter;
use crate::nav::startup::{LoadState, MenuLoadUpdate, MenuSource, spawn_menu_loader};
use crate::nav::{NavEvent, NavShell, NavView};
use crate::notifications::{NotificationFeed, NotificationKind};
use crate::settings::{DisplayMode, DisplaySettings, SettingsPanel, SettingsStore};

pub mod drawer;
pub mod header;

use self::drawer::render_drawer;
use self::header::{HeaderInput, render_header};

const APP_TITLE: &str = "navshell console";
const REPAINT_INTERVAL: Duration = Duration::from_millis(120);

pub fn run_console(settings: &ShellSettings, source: MenuSource) -> Result<()> {
    let runtime_handle = Handle::try_current().context("console requires a tokio runtime")?;
    let load_rx = spawn_menu_loader(&runtime_handle, source.clone());
    let settings_store = SettingsStore::new(settings.display);
    let app_settings = settings.clone();

    info!(
        source = %source.describe(),
        language = %settings.display.language,
        mode = %settings.display.mode,
        narrow_below_px = settings.narrow_below_px,
        "starting navigation console"
    );

    eframe::run_native(
        APP_TITLE,
        eframe::NativeOptions::default(),
        Box::new(move |cc| {
            apply_display_mode(&cc.egui_ctx, app_settings.display.mode);
            Ok(Box::new(ConsoleApp::new(
                app_settings,
                load_rx,
                settings_store,
            )))
        }),
    )
    .map_err(|error| anyhow::anyhow!("console UI exited with error: {error}"))
}

struct ConsoleApp {
    settings: ShellSettings,
    shell: NavShell<MemoryRouter>,
    load_state: LoadState,
    load_rx: UnboundedReceiver<MenuLoadUpdate>,
    loader_disconnected: bool,
    settings_store: SettingsStore,
    settings_rx: watch::Receiver<DisplaySettings>,
    settings_panel: SettingsPanel,
    notifications: NotificationFeed,
    notifications_open: bool,
    notification_query: String,
    search_text: String,
}

impl ConsoleApp {
    fn new(
        settings: ShellSettings,
        load_rx: UnboundedReceiver<MenuLoadUpdate>,
        settings_store: SettingsStore,
    ) -> Self {
        // The drawer starts expanded; the first frame reports the real viewport.
        let shell = NavShell::new(
            MenuTree::placeholder(),
            MemoryRouter::new(Default::default()),
            false,
            settings.home_label.clone(),
        );
        let settings_rx = settings_store.subscribe();

        Self {
            settings,
            shell,
            load_state: LoadState::Pending,
            load_rx,
            loader_disconnected: false,
            settings_store,
            settings_rx,
            settings_panel: SettingsPanel::default(),
            notifications: NotificationFeed::default(),
            notifications_open: false,
            notification_query: String::new(),
            search_text: String::new(),
        }
    }

    fn drain_load_updates(&mut self) {
        loop {
            match self.load_rx.try_recv() {
                Ok(update) => self.apply_load_update(update),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.loader_disconnected && self.load_state == LoadState::Pending {
                        warn!("menu loader exited without reporting");
                        self.load_state =
                            LoadState::Failed("menu loader exited without reporting".to_owned());
                    }
                    self.loader_disconnected = true;
                    break;
                }
            }
        }
    }

    fn apply_load_update(&mut self, update: MenuLoadUpdate) {
        match update {
            MenuLoadUpdate::Loaded { config, elapsed } => {
                info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    notifications = config.notifications.len(),
                    "console menu ready"
                );
                if let Some(home_label) = config.home_label {
                    self.shell.set_home_label(home_label);
                }
                self.shell.replace_tree(config.tree);
                self.notifications = NotificationFeed::new(config.notifications);
                self.load_state = LoadState::Ready;
            }
            MenuLoadUpdate::Failed { error } => {
                self.load_state = LoadState::Failed(error);
            }
        }
    }

    fn sync_display_settings(&mut self, ctx: &egui::Context) {
        if self.settings_rx.has_changed().unwrap_or(false) {
            let display = *self.settings_rx.borrow_and_update();
            apply_display_mode(ctx, display.mode);
        }
    }

    fn drawer_width(&self) -> f32 {
        if self.shell.drawer_mode().is_expanded() {
            self.settings.drawer_width_px as f32
        } else {
            COLLAPSED_DRAWER_WIDTH_PX as f32
        }
    }

    fn render_content(&self, ui: &mut egui::Ui, view: &NavView) {
        match &self.load_state {
            LoadState::Pending => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading menu…");
                });
            }
            LoadState::Failed(error) => {
                ui.colored_label(
                    egui::Color32::from_rgb(173, 33, 33),
                    format!("Menu configuration failed to load: {error}"),
                );
            }
            LoadState::Ready => match &view.view {
                Some(content) => {
                    ui.heading(content.as_str());
                    ui.label(format!("Route: {}", view.current_path));
                }
                None => {
                    ui.heading("Page not found");
                    ui.label(format!("No menu entry is mounted at {}", view.current_path));
                }
            },
        }
    }

    fn render_notifications(&mut self, ctx: &egui::Context) {
        let mut open = self.notifications_open;
        let mut mark_read = Vec::new();
        let mut mark_all = false;

        egui::Window::new("Notifications")
            .open(&mut open)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.notification_query)
                            .hint_text("Filter…")
                            .desired_width(200.0),
                    );
                    if ui.button("Mark all read").clicked() {
                        mark_all = true;
                    }
                });
                ui.separator();

                let visible = self.notifications.filtered(&self.notification_query);
                if visible.is_empty() {
                    ui.label("No notifications.");
                    return;
                }

                egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                    for notification in visible {
                        let title = egui::RichText::new(notification.title.as_str())
                            .color(kind_color(notification.kind));
                        let title = if notification.read {
                            title
                        } else {
                            title.strong()
                        };
                        if ui.selectable_label(!notification.read, title).clicked() {
                            mark_read.push(notification.id.clone());
                        }
                        ui.label(notification.content.as_str());
                        ui.small(notification.time.as_str());
                        ui.add_space(6.0);
                    }
                });
            });

        if mark_all {
            self.notifications.mark_all_read();
        }
        for id in mark_read {
            self.notifications.mark_read(&id);
        }
        self.notifications_open = open;
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_load_updates();
        self.sync_display_settings(ctx);

        let narrow = self.settings.is_narrow(ctx.screen_rect().width());
        self.shell.apply(NavEvent::ViewportChanged { narrow });

        let view = self.shell.view();
        let mut events = Vec::new();

        egui::TopBottomPanel::top("navshell_header").show(ctx, |ui| {
            let output = render_header(
                ui,
                HeaderInput {
                    view: &view,
                    search_text: &mut self.search_text,
                    unread_notifications: self.notifications.unread_count(),
                    settings_store: &self.settings_store,
                    settings_panel: &mut self.settings_panel,
                },
            );
            events.extend(output.events);
            if output.notifications_clicked {
                self.notifications_open = !self.notifications_open;
            }
        });

        egui::SidePanel::left("navshell_drawer")
            .resizable(false)
            .exact_width(self.drawer_width())
            .show(ctx, |ui| render_drawer(ui, &view, &mut events));

        egui::CentralPanel::default().show(ctx, |ui| self.render_content(ui, &view));

        if self.notifications_open {
            self.render_notifications(ctx);
        }

        for event in events {
            self.shell.apply(event);
        }

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

fn apply_display_mode(ctx: &egui::Context, mode: DisplayMode) {
    let visuals = match mode {
        DisplayMode::Light => egui::Visuals::light(),
        DisplayMode::Dark => egui::Visuals::dark(),
    };
    ctx.set_visuals(visuals);
}

fn kind_color(kind: NotificationKind) -> egui::Color32 {
    match kind {
        NotificationKind::Success => egui::Color32::from_rgb(26, 103, 64),
        NotificationKind::Warning => egui::Color32::from_rgb(140, 84, 0),
        NotificationKind::Info => egui::Color32::from_rgb(34, 101, 139),
        NotificationKind::Error => egui::Color32::from_rgb(173, 33, 33),
    }
}
