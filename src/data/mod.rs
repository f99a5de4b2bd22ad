pub mod abi;
pub mod cache;
pub mod contract;
pub mod networks;
pub mod provider;
pub mod types;

use std::sync::Mutex;

use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use chrono::Utc;
use color_eyre::eyre::Result;

use crate::data::cache::StateCache;
use crate::data::contract::SuretyContract;
use crate::data::provider::EthProvider;
use crate::data::types::{AirlineStatus, Roster, TxOutcome};
use crate::error::Failure;

/// Raised when an action needs at least one registered airline and the
/// contract reports none.
fn no_airline_failure(contract: Address) -> Failure {
    Failure::BadInput(format!(
        "no airline is registered on {contract}; seed the contract first"
    ))
}

/// Adapter between CLI actions and FlightSuretyApp contract invocations.
///
/// Reads go through a TTL'd cache; every confirmed write invalidates the
/// cache entries it may have changed before reporting success, so the next
/// read is authoritative.
pub struct SuretyService {
    provider: EthProvider,
    contract: SuretyContract,
    cache: Mutex<StateCache>,
    owner: Address,
    accounts: Vec<Address>,
    gas_limit: u64,
}

impl SuretyService {
    /// Discover the node's accounts and bind the service to them. The owner
    /// defaults to the node's first account, matching the dapp convention.
    pub async fn initialize(
        provider: EthProvider,
        contract: SuretyContract,
        owner_override: Option<Address>,
        gas_limit: u64,
    ) -> Result<Self> {
        let accounts = provider.get_accounts().await?;
        let owner = owner_override
            .or_else(|| accounts.first().copied())
            .ok_or_else(|| {
                Failure::BadInput(
                    "node exposes no accounts; pass --owner or unlock an account".to_string(),
                )
            })?;

        Ok(Self {
            provider,
            contract,
            cache: Mutex::new(StateCache::new()),
            owner,
            accounts,
            gas_limit,
        })
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    // --- Reads ---

    /// Whether the contract is accepting state changes.
    pub async fn is_operational(&self) -> Result<bool> {
        if let Ok(cache) = self.cache.lock() {
            if let Some(flag) = cache.get_operational() {
                return Ok(flag);
            }
        }

        let data = self.contract.is_operational()?;
        let output = self.call(self.owner, data).await?;
        let flag = self.contract.decode_bool("isOperational", &output)?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put_operational(flag);
        }
        Ok(flag)
    }

    /// The authoritative registered-airline list.
    pub async fn registered_airlines(&self) -> Result<Vec<Address>> {
        if let Ok(cache) = self.cache.lock() {
            if let Some(airlines) = cache.get_airlines() {
                return Ok(airlines.to_vec());
            }
        }

        let data = self.contract.get_registered_airlines()?;
        let output = self.call(self.owner, data).await?;
        let airlines = self
            .contract
            .decode_address_list("getRegisteredAirlines", &output)?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put_airlines(airlines.clone());
        }
        Ok(airlines)
    }

    /// Build the picker roster: owner, on-chain airlines, fabricated demo
    /// passengers and flights drawn from the node's spare accounts.
    pub async fn roster(&self) -> Result<Roster> {
        let airlines = self.registered_airlines().await?;
        if airlines.is_empty() {
            return Err(no_airline_failure(self.contract.address()).into());
        }

        let spare: Vec<Address> = self
            .accounts
            .iter()
            .copied()
            .filter(|a| *a != self.owner)
            .collect();

        Ok(Roster::build(
            self.owner,
            &airlines,
            &spare,
            Utc::now().timestamp(),
        ))
    }

    /// Registration and funding state for one airline.
    pub async fn airline_status(&self, airline: Address) -> Result<AirlineStatus> {
        let data = self.contract.is_airline_registered(airline)?;
        let output = self.call(self.owner, data).await?;
        let registered = self.contract.decode_bool("isAirlineRegistered", &output)?;

        let data = self.contract.is_registration_fee_paid(airline)?;
        let output = self.call(self.owner, data).await?;
        let fee_paid = self
            .contract
            .decode_bool("isRegistrationFeePaid", &output)?;

        Ok(AirlineStatus {
            airline,
            registered,
            fee_paid,
        })
    }

    /// The registration fee the contract demands, in wei.
    pub async fn registration_fee(&self) -> Result<U256> {
        let data = self.contract.registration_fee()?;
        let output = self.call(self.owner, data).await?;
        self.contract.decode_uint("REGISTRATION_FEE", &output)
    }

    /// The on-chain insured amount for a passenger, read-through cached.
    pub async fn insured_amount(&self, passenger: Address) -> Result<U256> {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(amount) = cache.get_insured(passenger) {
                return Ok(amount);
            }
        }
        self.insured_amount_fresh(passenger).await
    }

    /// Always hit the chain, refreshing the cache. Used wherever the amount
    /// feeds a decision (withdraw) rather than a display.
    async fn insured_amount_fresh(&self, passenger: Address) -> Result<U256> {
        // getInsuranceAmt keys on msg.sender, so the call is made as the passenger
        let data = self.contract.insurance_amount()?;
        let output = self.call(passenger, data).await?;
        let amount = self.contract.decode_uint("getInsuranceAmt", &output)?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put_insured(passenger, amount);
        }
        Ok(amount)
    }

    // --- Writes ---

    /// Owner-only toggle of the contract operating status.
    pub async fn set_operating_status(&self, mode: bool) -> Result<TxOutcome> {
        let data = self.contract.set_operating_status(mode)?;
        let outcome = self.send(self.owner, data, U256::ZERO).await?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.invalidate_operational();
        }
        Ok(outcome)
    }

    /// Register a new airline, submitted by the owner account.
    pub async fn register_airline(&self, airline: Address, name: &str) -> Result<TxOutcome> {
        if name.trim().is_empty() {
            return Err(Failure::BadInput("airline name must not be empty".to_string()).into());
        }

        let data = self.contract.register_airline(airline, name)?;
        let outcome = self.send(self.owner, data, U256::ZERO).await?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.invalidate_airlines();
            cache.invalidate_account(airline);
        }
        Ok(outcome)
    }

    /// Pay an airline's registration fee from the owner account.
    pub async fn pay_registration_fee(&self, airline: Address, fee: U256) -> Result<TxOutcome> {
        if fee.is_zero() {
            return Err(
                Failure::BadInput("registration fee must be greater than zero".to_string()).into(),
            );
        }

        let data = self.contract.pay_registration_fee(airline)?;
        let outcome = self.send(self.owner, data, fee).await?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.invalidate_airlines();
            cache.invalidate_account(airline);
        }
        Ok(outcome)
    }

    /// Buy flight-delay insurance as `passenger`, funding the transaction
    /// with `amount` wei. No local state changes until the receipt confirms
    /// success; the passenger's cache entry is then invalidated so the next
    /// insured-amount read hits the chain.
    pub async fn buy_insurance(
        &self,
        passenger: Address,
        amount: U256,
        flight: &str,
    ) -> Result<TxOutcome> {
        if amount.is_zero() {
            return Err(
                Failure::BadInput("insurance amount must be greater than zero".to_string()).into(),
            );
        }
        if flight.trim().is_empty() {
            return Err(Failure::BadInput("flight identifier must not be empty".to_string()).into());
        }

        let data = self.contract.buy_insurance(amount, flight)?;
        let outcome = self.send(passenger, data, amount).await?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.invalidate_account(passenger);
        }
        Ok(outcome)
    }

    /// Withdraw a passenger's payout. The amount is read from the contract
    /// immediately before submitting; a cached or client-supplied figure is
    /// never trusted for this decision.
    pub async fn withdraw(&self, passenger: Address) -> Result<(U256, TxOutcome)> {
        let amount = self.insured_amount_fresh(passenger).await?;
        if amount.is_zero() {
            return Err(Failure::BadInput(format!(
                "nothing to withdraw for {passenger}"
            ))
            .into());
        }

        let data = self.contract.withdraw()?;
        let outcome = self.send(passenger, data, U256::ZERO).await?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.invalidate_account(passenger);
        }
        Ok((amount, outcome))
    }

    /// Ask the oracles to evaluate a flight's status at the current time.
    /// The oracle responses arrive asynchronously on-chain and are not
    /// awaited here; this only submits the request.
    pub async fn fetch_flight_status(
        &self,
        airline: Option<Address>,
        flight: &str,
    ) -> Result<(Address, u64, TxOutcome)> {
        if flight.trim().is_empty() {
            return Err(Failure::BadInput("flight identifier must not be empty".to_string()).into());
        }

        let airline = match airline {
            Some(a) => a,
            None => self
                .registered_airlines()
                .await?
                .first()
                .copied()
                .ok_or_else(|| no_airline_failure(self.contract.address()))?,
        };
        let timestamp = Utc::now().timestamp() as u64;

        let data = self.contract.fetch_flight_status(airline, flight, timestamp)?;
        let outcome = self.send(self.owner, data, U256::ZERO).await?;
        Ok((airline, timestamp, outcome))
    }

    // --- RPC plumbing ---

    async fn call(&self, from: Address, data: Bytes) -> Result<Bytes> {
        let tx = TransactionRequest::default()
            .from(from)
            .to(self.contract.address())
            .input(data.into());
        self.provider.call(tx).await
    }

    async fn send(&self, from: Address, data: Bytes, value: U256) -> Result<TxOutcome> {
        let tx = TransactionRequest::default()
            .from(from)
            .to(self.contract.address())
            .value(value)
            .gas_limit(self.gas_limit)
            .input(data.into());

        let receipt = self.provider.send(tx).await?;
        let outcome = TxOutcome::from_receipt(&receipt);
        if !outcome.succeeded {
            return Err(Failure::Revert(format!(
                "transaction {} was mined but reverted",
                outcome.tx_hash
            ))
            .into());
        }
        Ok(outcome)
    }
}
