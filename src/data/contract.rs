use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Address, Bytes, U256};
use color_eyre::eyre::{Result, eyre};

/// Binding to the deployed FlightSuretyApp contract: an address plus the ABI
/// artifact it was deployed with. Encodes calldata for every contract
/// function the client uses and decodes call outputs.
pub struct SuretyContract {
    address: Address,
    abi: JsonAbi,
}

impl SuretyContract {
    pub fn new(address: Address, abi: JsonAbi) -> Self {
        Self { address, abi }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn function(&self, name: &str) -> Result<&Function> {
        self.abi
            .functions()
            .find(|f| f.name == name)
            .ok_or_else(|| eyre!("function `{name}` missing from ABI artifact"))
    }

    /// ABI-encode a call to `name`, selector included.
    pub fn encode_call(&self, name: &str, args: &[DynSolValue]) -> Result<Bytes> {
        let func = self.function(name)?;
        let data = func.abi_encode_input(args)?;
        Ok(Bytes::from(data))
    }

    // --- Calldata builders, one per contract function ---

    pub fn is_operational(&self) -> Result<Bytes> {
        self.encode_call("isOperational", &[])
    }

    pub fn set_operating_status(&self, mode: bool) -> Result<Bytes> {
        self.encode_call("setOperatingStatus", &[DynSolValue::Bool(mode)])
    }

    pub fn get_registered_airlines(&self) -> Result<Bytes> {
        self.encode_call("getRegisteredAirlines", &[])
    }

    pub fn is_airline_registered(&self, airline: Address) -> Result<Bytes> {
        self.encode_call("isAirlineRegistered", &[DynSolValue::Address(airline)])
    }

    pub fn is_registration_fee_paid(&self, airline: Address) -> Result<Bytes> {
        self.encode_call("isRegistrationFeePaid", &[DynSolValue::Address(airline)])
    }

    pub fn register_airline(&self, airline: Address, name: &str) -> Result<Bytes> {
        self.encode_call(
            "registerAirline",
            &[
                DynSolValue::Address(airline),
                DynSolValue::String(name.to_string()),
            ],
        )
    }

    pub fn pay_registration_fee(&self, airline: Address) -> Result<Bytes> {
        self.encode_call(
            "payAirlineRegistrationFee",
            &[DynSolValue::Address(airline)],
        )
    }

    pub fn registration_fee(&self) -> Result<Bytes> {
        self.encode_call("REGISTRATION_FEE", &[])
    }

    pub fn buy_insurance(&self, amount: U256, flight: &str) -> Result<Bytes> {
        self.encode_call(
            "buyInsurance",
            &[
                DynSolValue::Uint(amount, 256),
                DynSolValue::String(flight.to_string()),
            ],
        )
    }

    pub fn insurance_amount(&self) -> Result<Bytes> {
        self.encode_call("getInsuranceAmt", &[])
    }

    pub fn withdraw(&self) -> Result<Bytes> {
        self.encode_call("withdraw", &[])
    }

    pub fn fetch_flight_status(
        &self,
        airline: Address,
        flight: &str,
        timestamp: u64,
    ) -> Result<Bytes> {
        self.encode_call(
            "fetchFlightStatus",
            &[
                DynSolValue::Address(airline),
                DynSolValue::String(flight.to_string()),
                DynSolValue::Uint(U256::from(timestamp), 256),
            ],
        )
    }

    // --- Output decoders ---

    fn decode_output(&self, name: &str, data: &[u8]) -> Result<Vec<DynSolValue>> {
        let func = self.function(name)?;
        Ok(func.abi_decode_output(data, false)?)
    }

    pub fn decode_bool(&self, name: &str, data: &[u8]) -> Result<bool> {
        match self.decode_output(name, data)?.first() {
            Some(DynSolValue::Bool(b)) => Ok(*b),
            other => Err(eyre!("`{name}` returned {other:?}, expected bool")),
        }
    }

    pub fn decode_uint(&self, name: &str, data: &[u8]) -> Result<U256> {
        match self.decode_output(name, data)?.first() {
            Some(DynSolValue::Uint(value, _)) => Ok(*value),
            other => Err(eyre!("`{name}` returned {other:?}, expected uint256")),
        }
    }

    pub fn decode_address_list(&self, name: &str, data: &[u8]) -> Result<Vec<Address>> {
        match self.decode_output(name, data)?.first() {
            Some(DynSolValue::Array(values)) => values
                .iter()
                .map(|v| match v {
                    DynSolValue::Address(a) => Ok(*a),
                    other => Err(eyre!("`{name}` element {other:?} is not an address")),
                })
                .collect(),
            other => Err(eyre!("`{name}` returned {other:?}, expected address[]")),
        }
    }
}
