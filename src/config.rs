use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "surety-cli",
    about = "Command-line client for the FlightSurety airline-insurance contracts"
)]
pub struct Config {
    /// Network name: a built-in preset (localhost) or an entry in the networks file
    #[arg(short, long, default_value = "localhost")]
    pub network: String,

    /// RPC endpoint URL, overriding the network's URL
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Networks file ({"<name>": {"url", "appAddress", "dataAddress"}})
    #[arg(long, env = "SURETY_NETWORKS")]
    pub networks_file: Option<PathBuf>,

    /// FlightSuretyApp contract address, overriding the network entry
    #[arg(long)]
    pub app_address: Option<Address>,

    /// FlightSuretyData contract address, overriding the network entry
    #[arg(long)]
    pub data_address: Option<Address>,

    /// Contract ABI artifact (Truffle artifact or bare ABI array)
    #[arg(long)]
    pub abi: Option<PathBuf>,

    /// Account for owner-submitted transactions (default: the node's first account)
    #[arg(long)]
    pub owner: Option<Address>,

    /// Per-request RPC timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Gas limit attached to state-changing transactions
    #[arg(long, default_value = "3000000")]
    pub gas_limit: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether the contract is operational
    Status,

    /// Set the contract operating status (owner only)
    SetStatus {
        /// New operating status (true or false)
        #[arg(action = clap::ArgAction::Set)]
        mode: bool,
    },

    /// Show the roster: owner, registered airlines, demo passengers and flights
    Accounts,

    /// Register a new airline (owner-submitted)
    RegisterAirline {
        /// Address of the airline to register
        airline: Address,
        /// Display name of the airline
        name: String,
    },

    /// Show registration and funding status for an airline
    AirlineStatus {
        airline: Address,
    },

    /// Pay the registration fee for an airline
    PayFee {
        airline: Address,
        /// Fee in ETH; defaults to the contract's REGISTRATION_FEE
        #[arg(long)]
        amount: Option<String>,
    },

    /// Buy flight delay insurance for a passenger
    Buy {
        passenger: Address,
        /// Flight identifier, e.g. Flight1
        flight: String,
        /// Premium in ETH
        amount: String,
    },

    /// Look up the on-chain insured amount for a passenger
    Insured {
        passenger: Address,
    },

    /// Withdraw a passenger's insurance payout
    Withdraw {
        passenger: Address,
    },

    /// Ask the oracles to report a flight's status
    FlightStatus {
        flight: String,
        /// Airline the flight belongs to; defaults to the first registered airline
        #[arg(long)]
        airline: Option<Address>,
    },
}
