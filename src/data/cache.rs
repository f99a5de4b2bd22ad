use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use alloy::primitives::{Address, U256};
use lru::LruCache;

/// TTL durations for cached contract state.
const INSURED_TTL: Duration = Duration::from_secs(30); // changes with every buy/payout
const AIRLINES_TTL: Duration = Duration::from_secs(30); // changes on registration
const OPERATIONAL_TTL: Duration = Duration::from_secs(12); // roughly one block

const INSURED_CACHE_SIZE: usize = 200;

/// Read-through cache over contract state, keyed by account address.
///
/// Entries expire on a TTL and are explicitly invalidated whenever a
/// confirmed transaction changes the underlying state.
pub struct StateCache {
    insured: LruCache<Address, (Instant, U256)>,
    airlines: Option<(Instant, Vec<Address>)>,
    operational: Option<(Instant, bool)>,
}

impl StateCache {
    pub fn new() -> Self {
        Self {
            insured: LruCache::new(NonZeroUsize::new(INSURED_CACHE_SIZE).unwrap()),
            airlines: None,
            operational: None,
        }
    }

    // --- Insured amounts ---

    /// Get the cached insured amount for a passenger. Returns None if expired
    /// or missing.
    pub fn get_insured(&mut self, passenger: Address) -> Option<U256> {
        let entry = self.insured.get(&passenger)?;
        if entry.0.elapsed() < INSURED_TTL {
            Some(entry.1)
        } else {
            self.insured.pop(&passenger);
            None
        }
    }

    pub fn put_insured(&mut self, passenger: Address, amount: U256) {
        self.insured.put(passenger, (Instant::now(), amount));
    }

    /// Drop everything cached for one account. Called after a confirmed
    /// transaction touches that account's on-chain state.
    pub fn invalidate_account(&mut self, account: Address) {
        self.insured.pop(&account);
    }

    // --- Registered airlines ---

    pub fn get_airlines(&self) -> Option<&[Address]> {
        let (instant, airlines) = self.airlines.as_ref()?;
        if instant.elapsed() < AIRLINES_TTL {
            Some(airlines)
        } else {
            None
        }
    }

    pub fn put_airlines(&mut self, airlines: Vec<Address>) {
        self.airlines = Some((Instant::now(), airlines));
    }

    pub fn invalidate_airlines(&mut self) {
        self.airlines = None;
    }

    // --- Operational flag ---

    pub fn get_operational(&self) -> Option<bool> {
        let (instant, flag) = self.operational.as_ref()?;
        if instant.elapsed() < OPERATIONAL_TTL {
            Some(*flag)
        } else {
            None
        }
    }

    pub fn put_operational(&mut self, flag: bool) {
        self.operational = Some((Instant::now(), flag));
    }

    pub fn invalidate_operational(&mut self) {
        self.operational = None;
    }

    /// Evict all cached state. Useful when switching networks.
    pub fn clear(&mut self) {
        self.insured.clear();
        self.airlines = None;
        self.operational = None;
    }
}

impl Default for StateCache {
    fn default() -> Self {
        Self::new()
    }
}
