use serde::Deserialize;
use std::collections::BTreeMap;

use crate::color::Rgb;

// Top-level palette file:
//
//   [colors]
//   stone = [125, 125, 125]
//   grass_block = { r = 124, g = 189, b = 107 }
#[derive(Deserialize, Debug, Default)]
pub struct PaletteConfig {
    #[serde(default)]
    pub colors: BTreeMap<String, Rgb>,
}
