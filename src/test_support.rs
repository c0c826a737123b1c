use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

pub const REPORTS_MENU_YAML: &str = r#"home_label: Start
menus:
  - key: home
    label: Overview
    icon: home
    view: v0
  - key: reports
    label: Reports
    icon: chart
    children:
      - { key: sales, label: Sales, view: v1 }
      - { key: stock, label: Stock, view: v2 }
notifications:
  - { id: "1", title: System Update, content: A new update is available., time: 5 minutes ago }
  - { id: "2", title: Task Completed, content: Export finished., time: 2 hours ago, read: true, kind: success }
"#;

pub fn temp_path(prefix: &str) -> PathBuf {
    let now_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "navshell_{prefix}_{}_{}",
        std::process::id(),
        now_ns
    ))
}

pub fn remove_dir_if_exists(path: &Path) {
    let _ = std::fs::remove_dir_all(path);
}

/// Writes the two-level reports menu into `dir` and returns the file path.
pub fn write_menu_fixture(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir).expect("fixture dir should be creatable");
    let path = dir.join("menu.yaml");
    fs::write(&path, REPORTS_MENU_YAML).expect("menu fixture should be written");
    path
}

pub fn apply_shell_test_env(command: &mut Command, menu_path: &Path, log_dir: &Path) {
    command.env("NAVSHELL_MENU_CONFIG", menu_path.as_os_str());
    command.env("NAVSHELL_NARROW_BELOW_PX", "1200");
    command.env("NAVSHELL_DRAWER_WIDTH", "230");
    command.env("NAVSHELL_LANGUAGE", "en");
    command.env("NAVSHELL_DISPLAY_MODE", "light");
    command.env("RUST_LOG", "error");
    command.env("NAVSHELL_FILE_LOG", "error");
    command.env("NAVSHELL_LOG_DIR", log_dir.as_os_str());
}
