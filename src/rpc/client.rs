//! alloy-backed node client

use super::{Dialer, GasOracle};
use crate::errors::RpcError;
use crate::logger::{self, LogTag};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;

/// Dials http(s), ws(s) and IPC endpoints through alloy's `ProviderBuilder`
#[derive(Debug, Clone, Copy, Default)]
pub struct AlloyDialer;

#[derive(Clone)]
pub struct AlloyGasOracle {
    provider: DynProvider,
}

impl AlloyGasOracle {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Dialer for AlloyDialer {
    type Oracle = AlloyGasOracle;

    async fn dial(&self, endpoint: &str) -> Result<AlloyGasOracle, RpcError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(RpcError::Dial {
                endpoint: String::new(),
                reason: "empty endpoint".to_string(),
            });
        }

        let provider = ProviderBuilder::new()
            .connect(endpoint)
            .await
            .map_err(|e| RpcError::Dial {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        // HTTP transports are lazy, so ask for the chain id once to surface an unreachable node
        let chain_id = provider.get_chain_id().await.map_err(|e| RpcError::Dial {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        logger::debug(
            LogTag::Rpc,
            &format!("Connected to {} (chain id {})", endpoint, chain_id),
        );

        Ok(AlloyGasOracle::new(provider.erased()))
    }
}

#[async_trait]
impl GasOracle for AlloyGasOracle {
    async fn suggest_gas_price(&self) -> Result<u128, RpcError> {
        let wei = self.provider.get_gas_price().await?;
        logger::verbose(LogTag::Rpc, &format!("eth_gasPrice returned {} wei", wei));
        Ok(wei)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_endpoint_is_rejected() {
        let err = AlloyDialer.dial("   ").await.err().unwrap();
        assert!(matches!(err, RpcError::Dial { .. }));
    }

    #[tokio::test]
    async fn test_garbage_endpoint_is_rejected() {
        let result = AlloyDialer.dial("not a url at all").await;
        assert!(matches!(result, Err(RpcError::Dial { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails_dial() {
        // nothing listens on port 1; the chain id check must fail the dial
        let result = AlloyDialer.dial("http://127.0.0.1:1").await;
        match result {
            Err(RpcError::Dial { endpoint, .. }) => assert_eq!(endpoint, "http://127.0.0.1:1"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("dial to a closed port succeeded"),
        }
    }
}
