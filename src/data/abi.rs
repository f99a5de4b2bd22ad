use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use alloy::json_abi::JsonAbi;
use color_eyre::eyre::{Result, WrapErr, bail};

// --- Built-in ABI singleton ---

static APP_ABI: OnceLock<JsonAbi> = OnceLock::new();

/// The FlightSuretyApp ABI compiled into the binary, for the common case
/// where the deployment matches the checked-in artifact.
pub fn builtin_app_abi() -> &'static JsonAbi {
    APP_ABI.get_or_init(|| {
        parse_artifact(include_str!("../../abis/flight_surety_app.json"))
            .expect("built-in FlightSuretyApp ABI should be valid")
    })
}

/// Load the app contract ABI: from an artifact file when one is given,
/// otherwise the built-in copy.
pub fn load_app_abi(path: Option<&Path>) -> Result<JsonAbi> {
    match path {
        Some(p) => {
            let contents = fs::read_to_string(p)
                .wrap_err_with(|| format!("cannot read ABI artifact {}", p.display()))?;
            parse_artifact(&contents)
                .wrap_err_with(|| format!("malformed ABI artifact {}", p.display()))
        }
        None => Ok(builtin_app_abi().clone()),
    }
}

/// Parse an ABI from either a bare JSON array or a Truffle-style artifact
/// object with an `abi` field. The artifact is trusted as-is; there is no
/// version or checksum validation.
pub fn parse_artifact(json: &str) -> Result<JsonAbi> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let abi_value = match &value {
        serde_json::Value::Array(_) => &value,
        serde_json::Value::Object(map) => match map.get("abi") {
            Some(abi) => abi,
            None => bail!("artifact object has no `abi` field"),
        },
        _ => bail!("expected an ABI array or an artifact object"),
    };
    Ok(serde_json::from_value(abi_value.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_abi_parses() {
        let abi = builtin_app_abi();
        let names: Vec<&str> = abi.functions().map(|f| f.name.as_str()).collect();
        for expected in [
            "isOperational",
            "setOperatingStatus",
            "getRegisteredAirlines",
            "isAirlineRegistered",
            "isRegistrationFeePaid",
            "registerAirline",
            "payAirlineRegistrationFee",
            "REGISTRATION_FEE",
            "buyInsurance",
            "getInsuranceAmt",
            "withdraw",
            "fetchFlightStatus",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"type":"function","name":"isOperational","inputs":[],
             "outputs":[{"name":"","type":"bool"}],"stateMutability":"view"}
        ]"#;
        let abi = parse_artifact(json).unwrap();
        assert!(abi.functions().any(|f| f.name == "isOperational"));
    }

    #[test]
    fn test_parse_artifact_object() {
        let json = r#"{"contractName":"FlightSuretyApp","abi":[
            {"type":"function","name":"withdraw","inputs":[],
             "outputs":[],"stateMutability":"nonpayable"}
        ]}"#;
        let abi = parse_artifact(json).unwrap();
        assert!(abi.functions().any(|f| f.name == "withdraw"));
    }

    #[test]
    fn test_parse_object_without_abi_field() {
        assert!(parse_artifact(r#"{"contractName":"X"}"#).is_err());
    }

    #[test]
    fn test_parse_scalar_rejected() {
        assert!(parse_artifact("42").is_err());
    }
}
