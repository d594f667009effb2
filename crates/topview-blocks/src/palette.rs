use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::color::Rgb;
use crate::config::PaletteConfig;
use crate::names::normalize_block_name;

const BUILTIN_PALETTE: &str = include_str!("../assets/palette.toml");

#[derive(Debug)]
pub enum PaletteError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
}

/// Read-only block-id to base-color table. Built once at startup and shared
/// by reference between render jobs.
#[derive(Default, Clone, Debug)]
pub struct BlockPalette {
    colors: HashMap<String, Rgb>,
}

impl BlockPalette {
    pub fn new() -> Self {
        Self {
            colors: HashMap::new(),
        }
    }

    /// Palette embedded in the binary, covering common overworld blocks.
    pub fn builtin() -> Self {
        // The embedded table is checked by `builtin_palette_parses`.
        Self::from_toml_str(BUILTIN_PALETTE).unwrap_or_default()
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, PaletteError> {
        let cfg: PaletteConfig = toml::from_str(toml_str).map_err(PaletteError::Parse)?;
        let mut palette = BlockPalette::new();
        for (name, color) in cfg.colors {
            palette.insert(&name, color);
        }
        Ok(palette)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|e| PaletteError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&s)
    }

    pub fn insert(&mut self, name: &str, color: Rgb) {
        self.colors
            .insert(normalize_block_name(name).to_string(), color);
    }

    /// Overlays `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: BlockPalette) {
        self.colors.extend(other.colors);
    }

    #[inline]
    pub fn lookup(&self, id: &str) -> Option<Rgb> {
        self.colors.get(normalize_block_name(id)).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, Rgb)> for BlockPalette {
    fn from_iter<T: IntoIterator<Item = (&'a str, Rgb)>>(iter: T) -> Self {
        let mut palette = BlockPalette::new();
        for (name, color) in iter {
            palette.insert(name, color);
        }
        palette
    }
}

impl std::fmt::Display for PaletteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaletteError::Io(path, e) => write!(f, "cannot read palette {}: {}", path.display(), e),
            PaletteError::Parse(e) => write!(f, "invalid palette: {}", e),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::Io(_, e) => Some(e),
            PaletteError::Parse(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_palette_parses() {
        let palette = BlockPalette::from_toml_str(BUILTIN_PALETTE).expect("builtin palette");
        assert!(palette.len() > 50);
        assert!(palette.lookup("stone").is_some());
        assert!(palette.lookup("air").is_none());
    }

    #[test]
    fn lookup_ignores_vanilla_namespace() {
        let palette: BlockPalette = [("minecraft:stone", Rgb::new(120, 120, 120))]
            .into_iter()
            .collect();
        assert_eq!(palette.lookup("stone"), Some(Rgb::new(120, 120, 120)));
        assert_eq!(palette.lookup("minecraft:stone"), Some(Rgb::new(120, 120, 120)));
        assert_eq!(palette.lookup("mystery_block"), None);
    }

    #[test]
    fn merge_overrides_existing_entries() {
        let mut base = BlockPalette::builtin();
        let before = base.len();
        let user = BlockPalette::from_toml_str(
            r#"
            [colors]
            stone = { r = 1, g = 2, b = 3 }
            "modded:ore" = [9, 9, 9]
        "#,
        )
        .unwrap();
        base.merge(user);
        assert_eq!(base.lookup("stone"), Some(Rgb::new(1, 2, 3)));
        assert_eq!(base.lookup("modded:ore"), Some(Rgb::new(9, 9, 9)));
        assert_eq!(base.len(), before + 1);
    }

    #[test]
    fn malformed_color_is_rejected() {
        let err = BlockPalette::from_toml_str("[colors]\nstone = [1, 2]\n");
        assert!(matches!(err, Err(PaletteError::Parse(_))));
    }
}
