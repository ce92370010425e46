//! Log tags identify which part of sublimate emitted a line

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Rpc,
    Poller,
    Gas,
    Command,
}

impl LogTag {
    /// Key used by `--debug-<key>` flags and the enabled-tag sets
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system",
            LogTag::Rpc => "rpc",
            LogTag::Poller => "poller",
            LogTag::Gas => "gas",
            LogTag::Command => "command",
        }
        .to_string()
    }

    /// Uppercase label printed inside the `[TAG]` column
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Rpc => "RPC",
            LogTag::Poller => "POLLER",
            LogTag::Gas => "GAS",
            LogTag::Command => "COMMAND",
        }
    }
}
