use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, TintoResult};
use crate::themes::{RawTheme, Theme};

/// All the themes we know about, by name
#[derive(Debug, Clone, Default)]
pub struct ThemeSet {
    themes: HashMap<String, Arc<Theme>>,
}

impl ThemeSet {
    /// Adds a theme from its style sheet, replacing any theme with the same name
    pub fn add_theme_from_css(&mut self, name: &str, css: &str) {
        self.themes
            .insert(name.to_string(), Arc::new(Theme::from_css(name, css)));
    }

    /// Adds a theme from a `.css` file, named after the file stem
    pub fn add_theme_from_path(&mut self, path: impl AsRef<Path>) -> TintoResult<()> {
        let theme = RawTheme::load_from_file(path)?.compile();
        self.themes.insert(theme.name.clone(), Arc::new(theme));
        Ok(())
    }

    /// Loads every `.css` file in the given directory
    pub fn load_from_dir(dir: impl AsRef<Path>) -> TintoResult<Self> {
        let mut set = ThemeSet::default();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension() == Some("css".as_ref()) {
                set.add_theme_from_path(&path)?;
            }
        }
        Ok(set)
    }

    pub fn get(&self, name: &str) -> TintoResult<Arc<Theme>> {
        self.themes
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ThemeNotFound(name.to_string()))
    }

    /// The names of all the themes, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
