use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    ZhCn,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhCn => "zh_CN",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::ZhCn => "中文",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "en" => Ok(Self::En),
            "zh_cn" | "zh" => Ok(Self::ZhCn),
            other => Err(anyhow!(
                "invalid language `{other}`; expected `en` or `zh_CN`"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Light,
    Dark,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for DisplayMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(anyhow!(
                "invalid display mode `{other}`; expected `light` or `dark`"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplaySettings {
    pub language: Language,
    pub mode: DisplayMode,
}

/// Language and display-mode store. Created once at the application root and
/// handed to whoever needs it; readers subscribe for change notifications.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    tx: watch::Sender<DisplaySettings>,
}

impl SettingsStore {
    pub fn new(initial: DisplaySettings) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> DisplaySettings {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplaySettings> {
        self.tx.subscribe()
    }

    pub fn change_language(&self, language: Language) {
        let changed = self.tx.send_if_modified(|settings| {
            let changed = settings.language != language;
            settings.language = language;
            changed
        });
        debug!(language = %language, changed, "language setter invoked");
    }

    pub fn change_mode(&self, mode: DisplayMode) {
        let changed = self.tx.send_if_modified(|settings| {
            let changed = settings.mode != mode;
            settings.mode = mode;
            changed
        });
        debug!(mode = %mode, changed, "display mode setter invoked");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    ChangeLanguage(Language),
    ChangeMode(DisplayMode),
}

/// Settings popover. A pure view over the store apart from the last setter it invoked.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    last_action: Option<SettingsAction>,
}

impl SettingsPanel {
    pub fn last_action(&self) -> Option<SettingsAction> {
        self.last_action
    }

    pub fn select(&mut self, store: &SettingsStore, action: SettingsAction) {
        match action {
            SettingsAction::ChangeLanguage(language) => store.change_language(language),
            SettingsAction::ChangeMode(mode) => store.change_mode(mode),
        }
        self.last_action = Some(action);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DisplayMode, DisplaySettings, Language, SettingsAction, SettingsPanel, SettingsStore,
    };

    fn store() -> SettingsStore {
        SettingsStore::new(DisplaySettings {
            language: Language::En,
            mode: DisplayMode::Light,
        })
    }

    #[test]
    fn language_and_mode_parse_from_config_strings() {
        assert_eq!("zh_CN".parse::<Language>().expect("parse"), Language::ZhCn);
        assert_eq!("zh-cn".parse::<Language>().expect("parse"), Language::ZhCn);
        assert_eq!(" EN ".parse::<Language>().expect("parse"), Language::En);
        assert_eq!("Dark".parse::<DisplayMode>().expect("parse"), DisplayMode::Dark);
        assert!("fr".parse::<Language>().is_err());
        assert!("sepia".parse::<DisplayMode>().is_err());
    }

    #[tokio::test]
    async fn subscribers_observe_setter_changes() {
        let store = store();
        let mut rx = store.subscribe();

        store.change_mode(DisplayMode::Dark);
        rx.changed().await.expect("store should still be alive");
        assert_eq!(rx.borrow_and_update().mode, DisplayMode::Dark);

        store.change_language(Language::ZhCn);
        rx.changed().await.expect("store should still be alive");
        assert_eq!(rx.borrow_and_update().language, Language::ZhCn);
    }

    #[test]
    fn unchanged_values_do_not_notify() {
        let store = store();
        let rx = store.subscribe();

        store.change_mode(DisplayMode::Light);
        assert!(!rx.has_changed().expect("store should still be alive"));
    }

    #[test]
    fn panel_forwards_to_store_and_records_last_setter() {
        let store = store();
        let mut panel = SettingsPanel::default();
        assert_eq!(panel.last_action(), None);

        panel.select(&store, SettingsAction::ChangeLanguage(Language::ZhCn));
        panel.select(&store, SettingsAction::ChangeMode(DisplayMode::Dark));

        assert_eq!(
            panel.last_action(),
            Some(SettingsAction::ChangeMode(DisplayMode::Dark))
        );
        assert_eq!(
            store.current(),
            DisplaySettings {
                language: Language::ZhCn,
                mode: DisplayMode::Dark,
            }
        );
    }
}
