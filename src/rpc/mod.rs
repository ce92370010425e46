//! Node access for the poller
//!
//! The poller only needs two things from a node: a way to (re)connect and a
//! way to ask for the suggested gas price. Both sit behind traits so the loop
//! can be driven by an in-memory node in tests.

pub mod client;

use crate::errors::RpcError;
use async_trait::async_trait;

pub use client::{AlloyDialer, AlloyGasOracle};

/// A live connection that can quote the current gas price
#[async_trait]
pub trait GasOracle: Send + Sync {
    /// Suggested gas price in wei (`eth_gasPrice`)
    async fn suggest_gas_price(&self) -> Result<u128, RpcError>;
}

/// Opens connections to an RPC endpoint
#[async_trait]
pub trait Dialer: Send + Sync {
    type Oracle: GasOracle;

    async fn dial(&self, endpoint: &str) -> Result<Self::Oracle, RpcError>;
}
