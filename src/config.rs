//! Process configuration, read from the environment.

use crate::error::{Error, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Address to listen on.
pub const ENV_ADDR: &str = "CANDIDATE_STORE_ADDR";
/// Path of the JSON document.
pub const ENV_DB: &str = "CANDIDATE_STORE_DB";
/// `true`/`false`: indent the document on disk.
pub const ENV_PRETTY: &str = "CANDIDATE_STORE_PRETTY";

const DEFAULT_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DB: &str = "data/base_del_proto.json";

/// Everything the binary needs to start serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Listen address.
    pub addr: SocketAddr,
    /// Document path.
    pub db_path: PathBuf,
    /// Pretty-print the document.
    pub pretty: bool,
}

impl Config {
    /// Read from process environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_raw = lookup(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("{ENV_ADDR}={addr_raw:?}: {e}")))?;

        let db_path = match lookup(ENV_DB) {
            Some(p) if p.trim().is_empty() => {
                return Err(Error::Config(format!("{ENV_DB} is set but empty")))
            }
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(DEFAULT_DB),
        };

        let pretty = match lookup(ENV_PRETTY).as_deref().map(str::trim) {
            None | Some("") => true,
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
            Some(v) => {
                return Err(Error::Config(format!(
                    "{ENV_PRETTY}={v:?}: expected true or false"
                )))
            }
        };

        Ok(Self {
            addr,
            db_path,
            pretty,
        })
    }
}
