//! Gas price poll loop
//!
//! Connects once, then checks the suggested gas price immediately and on
//! every interval tick afterwards. Any transport failure switches the loop
//! into reconnect mode; the next tick redials before fetching. Once the price
//! is at or below the threshold the command runs exactly once and the loop
//! ends with its output.

use crate::command;
use crate::config::PollerConfig;
use crate::errors::{RpcError, SublimateError};
use crate::gas::GasPrice;
use crate::logger::{self, LogTag};
use crate::rpc::{AlloyDialer, Dialer, GasOracle};
use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

/// Connection state carried from one tick to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    /// The previous tick hit a transport failure
    Reconnecting,
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Redial failed, nothing else was attempted
    Reconnecting,
    /// Price request failed or timed out
    FetchFailed,
    /// Price is above the threshold, wait for the next tick
    AboveThreshold(GasPrice),
    /// Threshold met, the command should run now
    Execute(GasPrice),
}

pub struct Poller<D: Dialer> {
    config: PollerConfig,
    dialer: D,
}

impl Poller<AlloyDialer> {
    pub fn with_alloy(config: PollerConfig) -> Self {
        Self::new(config, AlloyDialer)
    }
}

impl<D: Dialer> Poller<D> {
    pub fn new(config: PollerConfig, dialer: D) -> Self {
        Self { config, dialer }
    }

    /// Drive the loop until the command has run
    ///
    /// Only two things end the loop: a failed initial dial, and the command
    /// having been executed (successfully or not).
    pub async fn run(&self) -> Result<Vec<u8>, SublimateError> {
        logger::info(
            LogTag::Poller,
            &format!(
                "Waiting for gas <= {:.2} gwei (checking every {}s)",
                self.config.threshold_gwei,
                self.config.interval.as_secs()
            ),
        );

        let mut oracle = self.connect().await.map_err(SublimateError::Connect)?;
        let mut state = ConnectionState::Connected;

        // First tick completes immediately
        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tick: u64 = 0;

        loop {
            ticker.tick().await;
            tick += 1;
            logger::verbose(LogTag::Poller, &format!("Tick #{} ({:?})", tick, state));

            match self.tick(&mut oracle, &mut state).await {
                TickOutcome::Execute(price) => {
                    logger::info(
                        LogTag::Command,
                        &format!(
                            "Gas threshold met at {} on tick #{}, executing command...",
                            price, tick
                        ),
                    );
                    return command::execute(&self.config.shell, &self.config.command).await;
                }
                outcome => {
                    logger::debug(
                        LogTag::Poller,
                        &format!("Tick #{} ended with {:?}", tick, outcome),
                    );
                }
            }
        }
    }

    /// One loop body: reconnect if needed, fetch, compare
    pub async fn tick(&self, oracle: &mut D::Oracle, state: &mut ConnectionState) -> TickOutcome {
        if *state == ConnectionState::Reconnecting {
            match self.connect().await {
                Ok(fresh) => {
                    *oracle = fresh;
                    *state = ConnectionState::Connected;
                    logger::info(LogTag::Rpc, "Reconnected to RPC endpoint");
                }
                Err(e) => {
                    logger::warning(
                        LogTag::Rpc,
                        &format!("Failed to dial RPC. Retrying at next tick...: {}", e),
                    );
                    return TickOutcome::Reconnecting;
                }
            }
        }

        let price = match self.fetch_gas_price(oracle).await {
            Ok(price) => price,
            Err(e) => {
                *state = ConnectionState::Reconnecting;
                logger::warning(
                    LogTag::Rpc,
                    &format!("Failed to fetch gas price. Retrying at next tick...: {}", e),
                );
                return TickOutcome::FetchFailed;
            }
        };

        if !price.is_at_or_below(self.config.threshold_gwei) {
            logger::info(
                LogTag::Gas,
                &format!(
                    "Current gas price: {}, target: {:.2} gwei, price too high waiting...",
                    price, self.config.threshold_gwei
                ),
            );
            return TickOutcome::AboveThreshold(price);
        }

        TickOutcome::Execute(price)
    }

    async fn connect(&self) -> Result<D::Oracle, RpcError> {
        logger::debug(LogTag::Rpc, &format!("Dialing {}", self.config.endpoint));
        match timeout(self.config.rpc_timeout, self.dialer.dial(&self.config.endpoint)).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout {
                timeout_ms: duration_ms(self.config.rpc_timeout),
            }),
        }
    }

    async fn fetch_gas_price(&self, oracle: &D::Oracle) -> Result<GasPrice, RpcError> {
        match timeout(self.config.rpc_timeout, oracle.suggest_gas_price()).await {
            Ok(Ok(wei)) => {
                let price = GasPrice::from_wei(wei);
                logger::debug(LogTag::Gas, &format!("Sampled {} wei ({})", price.wei(), price));
                Ok(price)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(RpcError::Timeout {
                timeout_ms: duration_ms(self.config.rpc_timeout),
            }),
        }
    }
}

/// Run the poll loop against a real node
pub async fn run(config: &PollerConfig) -> Result<Vec<u8>, SublimateError> {
    Poller::with_alloy(config.clone()).run().await
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
