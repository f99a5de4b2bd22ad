use alloy::primitives::{Address, B256};
use alloy::rpc::types::TransactionReceipt;

/// How many demo passengers / flights the roster fabricates from the node's
/// spare accounts.
pub const PASSENGER_COUNT: usize = 3;
pub const FLIGHT_COUNT: usize = 5;

/// Departure times are spread over the next two hours.
const DEPARTURE_SPACING_SECS: i64 = 20 * 60;

/// A demo passenger. Insured amounts are deliberately absent: they are read
/// from the contract on demand, never mirrored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    pub account: Address,
}

/// A fabricated demo flight. Only the airline address is authoritative
/// (taken from the on-chain registered list); code and departure time are
/// client-side placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    pub airline: Address,
    pub flight: String,
    /// Unix timestamp of the (fabricated) departure.
    pub departure: u64,
}

/// Accounts known to the client, classified for picker-style listings.
#[derive(Debug, Clone)]
pub struct Roster {
    pub owner: Address,
    /// Authoritative: read from the contract, not inferred from account order.
    pub airlines: Vec<Address>,
    pub passengers: Vec<Passenger>,
    pub flights: Vec<Flight>,
}

impl Roster {
    /// Build the roster from the node's accounts and the on-chain airline
    /// list. `spare` is every node account other than the owner; passengers
    /// are drawn from it in order. Flights cycle through the registered
    /// airlines with deterministic codes and future departures.
    ///
    /// Callers must ensure `airlines` is non-empty.
    pub fn build(owner: Address, airlines: &[Address], spare: &[Address], now: i64) -> Roster {
        let passengers: Vec<Passenger> = spare
            .iter()
            .filter(|a| **a != owner && !airlines.contains(a))
            .take(PASSENGER_COUNT)
            .map(|a| Passenger { account: *a })
            .collect();

        let flights: Vec<Flight> = (0..FLIGHT_COUNT)
            .map(|i| Flight {
                airline: airlines[i % airlines.len()],
                flight: format!("Flight{}", i + 1),
                departure: (now + DEPARTURE_SPACING_SECS * (i as i64 + 1)) as u64,
            })
            .collect();

        Roster {
            owner,
            airlines: airlines.to_vec(),
            passengers,
            flights,
        }
    }
}

/// Registration state of a single airline, as reported by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirlineStatus {
    pub airline: Address,
    pub registered: bool,
    pub fee_paid: bool,
}

/// Result of a confirmed (mined) transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub succeeded: bool,
}

impl TxOutcome {
    pub fn from_receipt(receipt: &TransactionReceipt) -> TxOutcome {
        TxOutcome {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            succeeded: receipt.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_slice(&[byte; 20])
    }

    #[test]
    fn test_roster_counts() {
        let airlines = vec![addr(0x10), addr(0x11)];
        let spare: Vec<Address> = (1..=8).map(addr).collect();
        let roster = Roster::build(addr(0x01), &airlines, &spare, 1_700_000_000);

        assert_eq!(roster.passengers.len(), PASSENGER_COUNT);
        assert_eq!(roster.flights.len(), FLIGHT_COUNT);
        assert_eq!(roster.airlines, airlines);
    }

    #[test]
    fn test_roster_excludes_owner_and_airlines_from_passengers() {
        let owner = addr(0x01);
        let airlines = vec![addr(0x02)];
        let spare = vec![addr(0x01), addr(0x02), addr(0x03), addr(0x04), addr(0x05)];
        let roster = Roster::build(owner, &airlines, &spare, 1_700_000_000);

        for p in &roster.passengers {
            assert_ne!(p.account, owner);
            assert!(!airlines.contains(&p.account));
        }
        assert_eq!(roster.passengers.len(), 3);
    }

    #[test]
    fn test_roster_flights_depart_in_the_future() {
        let now = 1_700_000_000;
        let roster = Roster::build(addr(0x01), &[addr(0x02)], &[addr(0x03)], now);

        let mut last = now as u64;
        for f in &roster.flights {
            assert!(f.departure > last);
            last = f.departure;
        }
        // Whole window fits within two hours
        assert!(roster.flights.last().unwrap().departure <= now as u64 + 2 * 3600);
    }

    #[test]
    fn test_roster_flights_cycle_airlines() {
        let airlines = vec![addr(0x10), addr(0x11)];
        let roster = Roster::build(addr(0x01), &airlines, &[], 0);

        assert_eq!(roster.flights[0].airline, airlines[0]);
        assert_eq!(roster.flights[1].airline, airlines[1]);
        assert_eq!(roster.flights[2].airline, airlines[0]);
        assert_eq!(roster.flights[0].flight, "Flight1");
        assert_eq!(roster.flights[4].flight, "Flight5");
    }

    #[test]
    fn test_roster_with_few_spare_accounts() {
        let roster = Roster::build(addr(0x01), &[addr(0x02)], &[addr(0x03)], 0);
        assert_eq!(roster.passengers.len(), 1);
    }
}
