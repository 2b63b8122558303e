use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

use crate::paginate::DEFAULT_ITEMS_PER_PAGE;

pub const CONFIG_FILE: &str = "pager.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Page size used by `query` when none is given on the command line.
    pub items_per_page: u64,
    /// Emit debug-level traces, including one per paginator created.
    pub debug: bool,
    /// Also run the constructions that are expected to fail.
    pub critical: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            debug: false,
            critical: true,
        }
    }
}

pub fn load_config<P: AsRef<Path>>(root: P) -> io::Result<HarnessConfig> {
    let path = root.as_ref().join(CONFIG_FILE);

    if !path.exists() {
        return Ok(HarnessConfig::default());
    }

    let text = fs::read_to_string(&path)?;
    toml::from_str(&text).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
