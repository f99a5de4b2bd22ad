mod config;
mod data;
mod display;
mod error;
mod utils;

use std::time::Duration;

use alloy::primitives::Address;
use clap::Parser;
use color_eyre::eyre::Result;

use crate::config::{Command, Config};
use crate::data::SuretyService;
use crate::data::abi;
use crate::data::contract::SuretyContract;
use crate::data::networks;
use crate::data::provider::EthProvider;
use crate::data::types::Roster;
use crate::display::{Panel, failure_panel};
use crate::error::Failure;
use crate::utils::{format_eth, format_number, format_timestamp, parse_ether, truncate_address};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::parse();

    // Resolve the network record, then apply CLI overrides on top
    let network = networks::resolve(&config.network, config.networks_file.as_deref())?;
    let rpc_url = config.rpc_url.clone().unwrap_or(network.rpc_url.clone());
    let app_address = config
        .app_address
        .or(network.app_address)
        .ok_or_else(|| {
            Failure::BadInput(format!(
                "no app contract address for network `{}`; pass --app-address or add it to the networks file",
                network.name
            ))
        })?;
    // The data contract address travels with the deployment record but all
    // client traffic goes through the app contract.
    let data_address = config.data_address.or(network.data_address);

    let abi = abi::load_app_abi(config.abi.as_deref())?;

    eprintln!("Connecting to {rpc_url}...");
    let provider = EthProvider::connect(&rpc_url, Duration::from_secs(config.timeout_secs)).await?;
    eprintln!(
        "{}",
        connection_banner(provider.chain_id(), app_address, data_address)
    );

    let contract = SuretyContract::new(app_address, abi);
    let service =
        SuretyService::initialize(provider, contract, config.owner, config.gas_limit).await?;
    eprintln!("Owner account {}", service.owner());

    run_command(&service, config.command).await;
    Ok(())
}

async fn run_command(service: &SuretyService, command: Command) {
    match command {
        Command::Status => {
            let (title, desc) = ("Operational Status", "Check if contract is operational");
            let result = async {
                let status = service.is_operational().await?;
                Ok(Panel::new(title, desc).row("Operational Status", status.to_string()))
            }
            .await;
            emit(title, desc, result);
        }

        Command::SetStatus { mode } => {
            let (title, desc) = ("Operational Status", "Set contract operating status");
            let result = async {
                let outcome = service.set_operating_status(mode).await?;
                Ok(with_outcome_rows(
                    Panel::new(title, desc).row("New Status", mode.to_string()),
                    &outcome,
                ))
            }
            .await;
            emit(title, desc, result);
        }

        Command::Accounts => {
            let (title, desc) = (
                "Accounts",
                "Owner, registered airlines, demo passengers and flights",
            );
            let result = async {
                let roster = service.roster().await?;
                Ok(roster_panel(title, desc, &roster))
            }
            .await;
            emit(title, desc, result);
        }

        Command::RegisterAirline { airline, name } => {
            let (title, desc) = ("Airlines", "Register a new airline");
            let result = async {
                let outcome = service.register_airline(airline, &name).await?;
                Ok(with_outcome_rows(
                    Panel::new(title, desc)
                        .row("Airline", airline.to_string())
                        .row("Name", name.clone()),
                    &outcome,
                ))
            }
            .await;
            emit(title, desc, result);
        }

        Command::AirlineStatus { airline } => {
            let (title, desc) = ("Airlines", "Registration and funding status");
            let result = async {
                let status = service.airline_status(airline).await?;
                Ok(Panel::new(title, desc)
                    .row("Airline", airline.to_string())
                    .row("Registered", status.registered.to_string())
                    .row("Fee Paid", status.fee_paid.to_string()))
            }
            .await;
            emit(title, desc, result);
        }

        Command::PayFee { airline, amount } => {
            let (title, desc) = ("Airlines", "Pay airline registration fee");
            let result = async {
                let fee = match amount {
                    Some(eth) => parse_ether(&eth).map_err(Failure::BadInput)?,
                    None => service.registration_fee().await?,
                };
                let outcome = service.pay_registration_fee(airline, fee).await?;
                Ok(with_outcome_rows(
                    Panel::new(title, desc)
                        .row("Airline", airline.to_string())
                        .row("Fee", format_eth(fee)),
                    &outcome,
                ))
            }
            .await;
            emit(title, desc, result);
        }

        Command::Buy {
            passenger,
            flight,
            amount,
        } => {
            let (title, desc) = ("Insurance", "Buy flight delay insurance");
            let result = async {
                let wei = parse_ether(&amount).map_err(Failure::BadInput)?;
                let outcome = service.buy_insurance(passenger, wei, &flight).await?;
                Ok(with_outcome_rows(
                    Panel::new(title, desc)
                        .row("Passenger", passenger.to_string())
                        .row("Flight", flight.clone())
                        .row("Premium", format_eth(wei)),
                    &outcome,
                ))
            }
            .await;
            emit(title, desc, result);
        }

        Command::Insured { passenger } => {
            let (title, desc) = ("Insurance", "Look up insured amount");
            let result = async {
                let amount = service.insured_amount(passenger).await?;
                Ok(Panel::new(title, desc)
                    .row("Passenger", passenger.to_string())
                    .row("Insured Amount", format_eth(amount)))
            }
            .await;
            emit(title, desc, result);
        }

        Command::Withdraw { passenger } => {
            let (title, desc) = ("Insurance", "Withdraw insurance payout");
            let result = async {
                let (amount, outcome) = service.withdraw(passenger).await?;
                Ok(with_outcome_rows(
                    Panel::new(title, desc)
                        .row("Passenger", passenger.to_string())
                        .row("Amount", format_eth(amount)),
                    &outcome,
                ))
            }
            .await;
            emit(title, desc, result);
        }

        Command::FlightStatus { flight, airline } => {
            let (title, desc) = ("Oracles", "Trigger oracles");
            let result = async {
                let (airline, timestamp, outcome) =
                    service.fetch_flight_status(airline, &flight).await?;
                Ok(with_outcome_rows(
                    Panel::new(title, desc)
                        .row("Fetch Flight Status", format!("{flight} {timestamp}"))
                        .row("Airline", airline.to_string()),
                    &outcome,
                ))
            }
            .await;
            emit(title, desc, result);
        }
    }
}

/// Render the action's panel; on failure render the classified error panel
/// and exit nonzero. Every error is terminal for its one action.
fn emit(title: &str, description: &str, result: Result<Panel>) {
    match result {
        Ok(panel) => panel.render(),
        Err(err) => {
            failure_panel(title, description, &err).render();
            std::process::exit(1);
        }
    }
}

fn connection_banner(chain_id: u64, app: Address, data: Option<Address>) -> String {
    match data {
        Some(data) => {
            format!("Connected to chain {chain_id} (app contract {app}, data contract {data})")
        }
        None => format!("Connected to chain {chain_id} (app contract {app})"),
    }
}

fn with_outcome_rows(panel: Panel, outcome: &crate::data::types::TxOutcome) -> Panel {
    let block = outcome
        .block_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "pending".to_string());
    panel
        .row("Tx Hash", outcome.tx_hash.to_string())
        .row("Block", block)
        .row("Gas Used", format_number(outcome.gas_used))
}

fn roster_panel(title: &str, desc: &str, roster: &Roster) -> Panel {
    let mut panel = Panel::new(title, desc).row("Owner", roster.owner.to_string());
    for (i, airline) in roster.airlines.iter().enumerate() {
        panel = panel.row(format!("Airline #{}", i + 1), airline.to_string());
    }
    for (i, passenger) in roster.passengers.iter().enumerate() {
        panel = panel.row(format!("Passenger #{}", i + 1), passenger.account.to_string());
    }
    for flight in &roster.flights {
        panel = panel.row(
            flight.flight.clone(),
            format!(
                "{} ({})",
                format_timestamp(flight.departure),
                truncate_address(&flight.airline)
            ),
        );
    }
    panel
}
