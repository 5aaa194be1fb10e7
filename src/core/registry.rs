//! Role → display color bindings.
//!
//! Single-shift rosters use [`RoleColorRegistry`]: fixed overrides win,
//! other roles draw round-robin from a palette on first use and are
//! reclaimed once no employee references them. Dual-shift rosters only
//! look roles up in [`StaticRoleColors`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const COLOR_PALETTE: [&str; 15] = [
    "#4F46E5", "#F97316", "#10B981", "#EC4899", "#14B8A6", "#6366F1", "#E11D48", "#0EA5E9",
    "#A855F7", "#F59E0B", "#84CC16", "#D946EF", "#FACC15", "#FB7185", "#22D3EE",
];

pub const FALLBACK_COLOR: &str = "#9CA3AF";

pub fn default_role_overrides() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("菜口".to_string(), "#1d4ed8".to_string()),
        ("跑菜".to_string(), "#60a5fa".to_string()),
    ])
}

/// Persistable registry state (entries in first-assignment order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub entries: Vec<(String, String)>,
    pub palette_index: usize,
}

#[derive(Debug, Clone)]
pub struct RoleColorRegistry {
    overrides: BTreeMap<String, String>,
    palette: Vec<String>,
    entries: Vec<(String, String)>,
    palette_index: usize,
}

impl Default for RoleColorRegistry {
    fn default() -> Self {
        Self::new(default_role_overrides())
    }
}

impl RoleColorRegistry {
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self::with_palette(overrides, COLOR_PALETTE.iter().map(|c| c.to_string()).collect())
    }

    /// An empty palette falls back to the built-in one.
    pub fn with_palette(overrides: BTreeMap<String, String>, palette: Vec<String>) -> Self {
        let palette = if palette.is_empty() {
            COLOR_PALETTE.iter().map(|c| c.to_string()).collect()
        } else {
            palette
        };
        Self {
            overrides,
            palette,
            entries: Vec::new(),
            palette_index: 0,
        }
    }

    /// Replace the mutable state with a saved one.
    pub fn restore(mut self, snapshot: RegistrySnapshot) -> Self {
        self.entries = snapshot.entries;
        self.palette_index = snapshot.palette_index;
        self
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            entries: self.entries.clone(),
            palette_index: self.palette_index,
        }
    }

    pub fn palette_index(&self) -> usize {
        self.palette_index
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn color_of(&self, role: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, c)| c.as_str())
    }

    fn upsert(&mut self, role: &str, color: &str) {
        match self.entries.iter_mut().find(|(r, _)| r == role) {
            Some(entry) if entry.1 == color => {}
            Some(entry) => entry.1 = color.to_string(),
            None => self.entries.push((role.to_string(), color.to_string())),
        }
    }

    /// Resolve the color for `role`, allocating from the palette on first use.
    ///
    /// The palette index only ever grows; it is not rewound when roles are
    /// reclaimed.
    pub fn assign(&mut self, role: &str) -> String {
        if let Some(color) = self.overrides.get(role).cloned() {
            self.upsert(role, &color);
            return color;
        }

        if let Some(color) = self.color_of(role) {
            return color.to_string();
        }

        let color = self.palette[self.palette_index % self.palette.len()].clone();
        self.entries.push((role.to_string(), color.clone()));
        self.palette_index += 1;
        color
    }

    /// Drop the entry for `role` unless one of `remaining` still uses it.
    /// Returns true when an entry was removed.
    pub fn release_if_unused<'a>(
        &mut self,
        role: &str,
        mut remaining: impl Iterator<Item = &'a str>,
    ) -> bool {
        if remaining.any(|r| r == role) {
            return false;
        }
        let before = self.entries.len();
        self.entries.retain(|(r, _)| r != role);
        self.entries.len() != before
    }

    /// Forget every entry but keep the palette position.
    pub fn clear_entries(&mut self) {
        self.entries.clear();
    }
}

/// Fixed role table used by dual-shift rosters. Unknown roles get the fallback.
#[derive(Debug, Clone)]
pub struct StaticRoleColors {
    table: BTreeMap<String, String>,
    fallback: String,
}

impl Default for StaticRoleColors {
    fn default() -> Self {
        Self::new(default_role_overrides(), FALLBACK_COLOR.to_string())
    }
}

impl StaticRoleColors {
    pub fn new(table: BTreeMap<String, String>, fallback: String) -> Self {
        Self { table, fallback }
    }

    pub fn color_for(&self, role: &str) -> &str {
        self.table.get(role).unwrap_or(&self.fallback)
    }

    pub fn legend(&self) -> Vec<(String, String)> {
        self.table
            .iter()
            .map(|(r, c)| (r.clone(), c.clone()))
            .collect()
    }
}
