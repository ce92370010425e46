//! Gas price samples and unit conversion

use std::fmt;

/// Wei per gwei
pub const WEI_PER_GWEI: u128 = 1_000_000_000;

/// A single gas price reading, as returned by `eth_gasPrice`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GasPrice {
    wei: u128,
}

impl GasPrice {
    pub fn from_wei(wei: u128) -> Self {
        Self { wei }
    }

    pub fn wei(&self) -> u128 {
        self.wei
    }

    /// Price in gwei
    ///
    /// Whole and fractional gwei are converted separately so that any wei
    /// amount divisible by 1e9 maps to an exact float.
    pub fn gwei(&self) -> f64 {
        let whole = (self.wei / WEI_PER_GWEI) as f64;
        let fraction = (self.wei % WEI_PER_GWEI) as f64 / WEI_PER_GWEI as f64;
        whole + fraction
    }

    /// True when the price has reached the execution threshold
    pub fn is_at_or_below(&self, threshold_gwei: f64) -> bool {
        self.gwei() <= threshold_gwei
    }
}

impl fmt::Display for GasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} gwei", self.gwei())
    }
}
