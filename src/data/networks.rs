use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use color_eyre::eyre::{Result, WrapErr, bail};
use serde::Deserialize;

/// Resolved per-network settings: where the node is and where the two
/// FlightSurety contracts live. Contract addresses are optional at this level
/// because presets cannot know a local deployment's addresses; the caller
/// requires `app_address` before connecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: String,
    pub rpc_url: String,
    pub app_address: Option<Address>,
    pub data_address: Option<Address>,
}

/// One entry of the networks file. The file mirrors the dapp deployment
/// artifact: a JSON object mapping network name to url + contract addresses.
///
/// ```json
/// { "localhost": { "url": "http://127.0.0.1:8545",
///                  "appAddress": "0x...", "dataAddress": "0x..." } }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkEntry {
    url: String,
    app_address: Option<Address>,
    data_address: Option<Address>,
}

/// Get a built-in network preset by name.
pub fn get_network_preset(name: &str) -> Option<NetworkConfig> {
    match name.to_lowercase().as_str() {
        "localhost" | "local" | "development" => Some(NetworkConfig {
            name: "localhost".to_string(),
            rpc_url: "http://127.0.0.1:8545".to_string(),
            app_address: None,
            data_address: None,
        }),
        _ => None,
    }
}

/// Default location of the networks file under the user config dir.
pub fn default_networks_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("surety-cli").join("networks.json"))
}

/// Parse the networks file contents into name -> entry.
fn parse_networks(json: &str) -> Result<BTreeMap<String, NetworkEntry>> {
    serde_json::from_str(json).wrap_err("malformed networks file")
}

/// Resolve a network by name: an entry in the networks file (explicit path,
/// or the default location if it exists) wins over a built-in preset.
pub fn resolve(name: &str, file: Option<&Path>) -> Result<NetworkConfig> {
    let path = file
        .map(Path::to_path_buf)
        .or_else(|| default_networks_path().filter(|p| p.exists()));

    if let Some(path) = path {
        let contents = fs::read_to_string(&path)
            .wrap_err_with(|| format!("cannot read networks file {}", path.display()))?;
        if let Some(config) = lookup(name, &contents)? {
            return Ok(config);
        }
        // Explicitly-named file without the network is an error; the default
        // file silently falls through to presets.
        if file.is_some() {
            bail!("network `{name}` not found in {}", path.display());
        }
    }

    get_network_preset(name).ok_or_else(|| {
        color_eyre::eyre::eyre!("unknown network `{name}` (no preset, no networks file entry)")
    })
}

fn lookup(name: &str, contents: &str) -> Result<Option<NetworkConfig>> {
    let networks = parse_networks(contents)?;
    Ok(networks.get(name).map(|entry| NetworkConfig {
        name: name.to_string(),
        rpc_url: entry.url.clone(),
        app_address: entry.app_address,
        data_address: entry.data_address,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "localhost": {
            "url": "http://127.0.0.1:7545",
            "appAddress": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "dataAddress": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
        },
        "staging": {
            "url": "http://10.0.0.5:8545"
        }
    }"#;

    #[test]
    fn test_localhost_preset() {
        let config = get_network_preset("localhost").unwrap();
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert!(config.app_address.is_none());
    }

    #[test]
    fn test_preset_aliases() {
        assert!(get_network_preset("local").is_some());
        assert!(get_network_preset("development").is_some());
        assert!(get_network_preset("Localhost").is_some());
    }

    #[test]
    fn test_unknown_preset() {
        assert!(get_network_preset("mainnet").is_none());
    }

    #[test]
    fn test_lookup_full_entry() {
        let config = lookup("localhost", SAMPLE).unwrap().unwrap();
        assert_eq!(config.rpc_url, "http://127.0.0.1:7545");
        assert!(config.app_address.is_some());
        assert!(config.data_address.is_some());
    }

    #[test]
    fn test_lookup_entry_without_addresses() {
        let config = lookup("staging", SAMPLE).unwrap().unwrap();
        assert_eq!(config.rpc_url, "http://10.0.0.5:8545");
        assert!(config.app_address.is_none());
    }

    #[test]
    fn test_lookup_missing_entry() {
        assert!(lookup("mainnet", SAMPLE).unwrap().is_none());
    }

    #[test]
    fn test_lookup_malformed_file() {
        assert!(lookup("localhost", "{ not json").is_err());
    }
}
