//! Light/dark theme preference, persisted under the `theme` key

use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use strum::{AsRefStr, EnumString};
use tracing::warn;

use crate::errors::Result;
use crate::storage::{PersistentStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

pub struct ThemeState {
    store: Arc<dyn PersistentStore>,
    current: RwLock<Theme>,
}

impl ThemeState {
    /// Read the saved preference once; unknown or missing values mean light
    pub fn new(store: Arc<dyn PersistentStore>) -> Self {
        let saved = match store.get(THEME_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                None
            }
        };
        let current = saved
            .as_deref()
            .and_then(|v| Theme::from_str(v).ok())
            .unwrap_or_default();

        Self {
            store,
            current: RwLock::new(current),
        }
    }

    pub fn current(&self) -> Theme {
        *self.current.read()
    }

    pub fn set(&self, theme: Theme) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_ref())?;
        *self.current.write() = theme;
        Ok(())
    }

    pub fn toggle(&self) -> Result<Theme> {
        let next = self.current().toggled();
        self.set(next)?;
        Ok(next)
    }
}
