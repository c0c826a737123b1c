use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerMode {
    Expanded,
    Collapsed,
}

impl DrawerMode {
    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Expanded => "expanded",
            Self::Collapsed => "collapsed",
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }

    fn for_viewport(narrow: bool) -> Self {
        if narrow { Self::Collapsed } else { Self::Expanded }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewportClass {
    Narrow,
    Wide,
}

impl ViewportClass {
    fn from_narrow(narrow: bool) -> Self {
        if narrow { Self::Narrow } else { Self::Wide }
    }
}

/// Expanded/collapsed state of the side panel.
///
/// Manual toggles stick until the viewport crosses the size threshold; the
/// crossing then forces the mode that matches the new viewport class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerController {
    mode: DrawerMode,
    viewport: ViewportClass,
}

impl DrawerController {
    pub fn new(initially_narrow: bool) -> Self {
        Self {
            mode: DrawerMode::for_viewport(initially_narrow),
            viewport: ViewportClass::from_narrow(initially_narrow),
        }
    }

    pub fn mode(&self) -> DrawerMode {
        self.mode
    }

    pub fn is_expanded(&self) -> bool {
        self.mode.is_expanded()
    }

    pub fn toggle(&mut self) -> DrawerMode {
        self.mode = self.mode.flipped();
        debug!(mode = self.mode.label(), "drawer toggled");
        self.mode
    }

    /// Returns true when the signal crossed the threshold and forced a mode.
    pub fn observe_viewport(&mut self, narrow: bool) -> bool {
        let class = ViewportClass::from_narrow(narrow);
        if class == self.viewport {
            return false;
        }

        self.viewport = class;
        self.mode = DrawerMode::for_viewport(narrow);
        debug!(
            narrow,
            mode = self.mode.label(),
            "viewport class changed; drawer mode forced"
        );
        true
    }
}
