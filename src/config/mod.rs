use crate::core::calculator::overlap::OverlapPolicy;
use crate::core::calculator::slots::{BusinessHours, SLOT_STEP, WORK_END, WORK_START};
use crate::core::registry::{FALLBACK_COLOR, RoleColorRegistry, StaticRoleColors, default_role_overrides};
use crate::core::roster::{ROSTER_CAP, RosterRules};
use crate::errors::{AppError, AppResult};
use crate::models::variant::Variant;
use crate::ui::messages::success;
use crate::utils::path::{expand_tilde, home_dir};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const DEFAULT_OWNER_ID: &str = "c59d57f2-60d4-431d-ad6c-1d311dc81fb3";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
    #[serde(default = "default_owner_id")]
    pub owner_id: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            anon_key: String::new(),
            owner_id: default_owner_id(),
        }
    }
}

impl RemoteConfig {
    /// Fill missing url / key from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    pub fn with_env(mut self) -> Self {
        if self.url.is_empty()
            && let Ok(url) = env::var("SUPABASE_URL")
        {
            self.url = url;
        }
        if self.anon_key.is_empty()
            && let Ok(key) = env::var("SUPABASE_ANON_KEY")
        {
            self.anon_key = key;
        }
        self
    }

    pub fn is_usable(&self) -> bool {
        self.enabled && !self.url.is_empty() && !self.anon_key.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default = "default_business_start")]
    pub business_start: f64,
    #[serde(default = "default_business_end")]
    pub business_end: f64,
    #[serde(default = "default_slot_step")]
    pub slot_step: f64,
    #[serde(default = "default_roster_cap")]
    pub roster_cap: usize,
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
    #[serde(default = "default_role_overrides")]
    pub role_colors: BTreeMap<String, String>,
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_business_start() -> f64 {
    WORK_START
}
fn default_business_end() -> f64 {
    WORK_END
}
fn default_slot_step() -> f64 {
    SLOT_STEP
}
fn default_roster_cap() -> usize {
    ROSTER_CAP
}
fn default_fallback_color() -> String {
    FALLBACK_COLOR.to_string()
}
fn default_owner_id() -> String {
    DEFAULT_OWNER_ID.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            variant: Variant::default(),
            business_start: WORK_START,
            business_end: WORK_END,
            slot_step: SLOT_STEP,
            roster_cap: ROSTER_CAP,
            overlap_policy: OverlapPolicy::default(),
            role_colors: default_role_overrides(),
            fallback_color: default_fallback_color(),
            remote: RemoteConfig::default(),
        }
    }
}

impl Config {
    /// Return the configuration directory (`~/.shiftgrid`)
    pub fn config_dir() -> PathBuf {
        home_dir().join(".shiftgrid")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftgrid.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftgrid.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// Business hours are checked here so every command sees a valid grid.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            Self::from_yaml(&content)?
        } else {
            Self::default()
        };

        cfg.business_hours()?;
        cfg.remote = std::mem::take(&mut cfg.remote).with_env();
        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        Ok(config)
    }

    pub fn business_hours(&self) -> AppResult<BusinessHours> {
        BusinessHours::new(self.business_start, self.business_end, self.slot_step)
    }

    pub fn rules(&self) -> AppResult<RosterRules> {
        Ok(RosterRules {
            hours: self.business_hours()?,
            cap: self.roster_cap,
        })
    }

    /// Fresh registry seeded with the configured overrides.
    pub fn registry(&self) -> RoleColorRegistry {
        RoleColorRegistry::new(self.role_colors.clone())
    }

    pub fn static_colors(&self) -> StaticRoleColors {
        StaticRoleColors::new(self.role_colors.clone(), self.fallback_color.clone())
    }
}
