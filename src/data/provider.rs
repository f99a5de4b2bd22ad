use std::future::IntoFuture;
use std::time::Duration;

use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use color_eyre::eyre::Result;
use tokio::time::timeout;

use crate::error::Failure;

/// The concrete provider type returned by `ProviderBuilder::new().on_http(url)`.
/// We use a trait-object-based wrapper to avoid spelling out the full generic type.
///
/// Every RPC operation runs under the configured deadline; a silent node
/// surfaces as a timeout failure instead of hanging the command forever.
pub struct EthProvider {
    provider: Box<dyn Provider + Send + Sync>,
    chain_id: u64,
    rpc_timeout: Duration,
}

impl EthProvider {
    /// Connect to an Ethereum node via HTTP RPC.
    pub async fn connect(rpc_url: &str, rpc_timeout: Duration) -> Result<Self> {
        let url = rpc_url.parse()?;
        let provider = ProviderBuilder::new().on_http(url);
        let chain_id = match timeout(rpc_timeout, provider.get_chain_id()).await {
            Ok(Ok(id)) => id,
            Ok(Err(e)) => return Err(Failure::from_rpc("eth_chainId", e).into()),
            Err(_) => return Err(Failure::Timeout(format!("connecting to {rpc_url}")).into()),
        };
        Ok(Self {
            provider: Box::new(provider),
            chain_id,
            rpc_timeout,
        })
    }

    /// Return the chain ID obtained at connection time.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Run one RPC future under the configured deadline, classifying errors.
    async fn bounded<T, E>(
        &self,
        what: &str,
        fut: impl IntoFuture<Output = Result<T, E>>,
    ) -> Result<T>
    where
        E: std::fmt::Display,
    {
        match timeout(self.rpc_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Failure::from_rpc(what, e).into()),
            Err(_) => Err(Failure::Timeout(what.to_string()).into()),
        }
    }

    /// List the accounts the node manages. On a development chain these are
    /// the unlocked funded accounts the roster is built from.
    pub async fn get_accounts(&self) -> Result<Vec<Address>> {
        self.bounded("eth_accounts", self.provider.get_accounts())
            .await
    }

    /// Execute a read-only contract call and return the raw output bytes.
    pub async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        self.bounded("eth_call", self.provider.call(tx)).await
    }

    /// Submit a state-changing transaction through the node's own account
    /// management (`eth_sendTransaction`) and wait for it to be mined.
    pub async fn send(&self, tx: TransactionRequest) -> Result<TransactionReceipt> {
        let pending = self
            .bounded("eth_sendTransaction", self.provider.send_transaction(tx))
            .await?;
        self.bounded(
            "waiting for transaction receipt",
            pending.with_timeout(Some(self.rpc_timeout)).get_receipt(),
        )
        .await
    }
}
