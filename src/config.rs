use std::error::Error;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use topview_render::ScanPolicy;
use topview_runtime::DEFAULT_WORKERS;

use crate::cli::Cli;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    pub workers: Option<usize>,
    pub out_dir: Option<PathBuf>,
    pub palette: Option<PathBuf>,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: Config = toml::from_str(s)?;
        if cfg.render.workers == Some(0) {
            return Err("[render] workers must be at least 1".into());
        }
        Ok(cfg)
    }

    /// Reads a config file. Relative paths inside it are taken relative to
    /// the file's directory.
    pub fn load_from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
        let mut cfg = Self::from_toml_str(&s)
            .map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
        let base = path.parent().unwrap_or(Path::new(""));
        cfg.render.out_dir = cfg.render.out_dir.map(|p| base.join(p));
        cfg.render.palette = cfg.render.palette.map(|p| base.join(p));
        Ok(cfg)
    }
}

/// Effective run settings: command line over config file over defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub workers: usize,
    pub out_dir: PathBuf,
    pub palette: Option<PathBuf>,
    pub scan: ScanPolicy,
    pub gen_range: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: &Config) -> Self {
        Self {
            workers: cli.procs.or(file.render.workers).unwrap_or(DEFAULT_WORKERS),
            out_dir: cli
                .out_dir
                .clone()
                .or_else(|| file.render.out_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            palette: cli.palette.clone().or_else(|| file.render.palette.clone()),
            scan: if cli.nether {
                ScanPolicy::Nether
            } else {
                ScanPolicy::Overworld
            },
            gen_range: cli.gen_range,
        }
    }
}
