// ============================================================
// Error messages shared by the governance contracts.
// Every failed call reverts with exactly one of these.
// ============================================================

// ── NotAuthorized ──
pub const ERR_NOT_PROPOSER: &str = "not-proposer";
pub const ERR_NOT_MONITOR: &str = "not-monitor";
pub const ERR_NOT_OPERATOR: &str = "not-operator";
pub const ERR_NOT_ELECTOR: &str = "not-elector";
pub const ERR_NOT_YOUR_STAKE: &str = "not-your-stake";

// ── NotFound ──
pub const ERR_NO_SUCH_PROPOSAL: &str = "no-such-proposal";
pub const ERR_NO_SUCH_NODE: &str = "no-such-node";
pub const ERR_NO_SUCH_MONITOR: &str = "no-such-monitor";
pub const ERR_NO_SUCH_OPERATOR: &str = "no-such-operator";
pub const ERR_NO_SUCH_STAKE_INFO: &str = "no-such-stake-info";

// ── AlreadyExists ──
pub const ERR_MONITOR_EXISTED: &str = "monitor-existed";
pub const ERR_OPERATOR_EXISTED: &str = "operator-existed";
pub const ERR_ALREADY_NOMINATED: &str = "already-nominated";
pub const ERR_DUPLICATED_PROPOSER: &str = "duplicated-proposer";

// ── Proposal lifecycle ──
pub const ERR_OUTDATED_PROPOSAL: &str = "outdated-proposal";
pub const ERR_EXECUTED_PROPOSAL: &str = "executed-proposal";
pub const ERR_NOT_ENOUGH_VOTES: &str = "not-enough-votes";

// ── InvalidInput ──
pub const ERR_INVALID_PUBKEY_PREFIX: &str = "invalid-pubkey-prefix";
pub const ERR_INVALID_INFO: &str = "invalid-info";
pub const ERR_INVALID_RPC_URL: &str = "invalid-rpc-url";
pub const ERR_NO_PROPOSERS: &str = "no-proposers";
pub const ERR_NO_NEW_PROPOSERS: &str = "no-new-proposers";
pub const ERR_TOO_MANY_PROPOSERS: &str = "too-many-proposers";
pub const ERR_DEPOSIT_NOTHING: &str = "deposit-nothing";
pub const ERR_INVALID_MIN_STAKE: &str = "invalid-min-stake";

// ── Staking economics ──
pub const ERR_DEPOSIT_TOO_LESS: &str = "deposit-too-less";
pub const ERR_WITHDRAW_TOO_MUCH: &str = "withdraw-too-much";
pub const ERR_NOT_MATURE: &str = "not-mature";
pub const ERR_OUTSIDE_UNSTAKE_WINDOW: &str = "outside-unstake-window";
pub const ERR_MONITOR_IS_ACTIVE: &str = "monitor-is-active";
pub const ERR_OPERATOR_IS_ACTIVE: &str = "operator-is-active";
pub const ERR_TOO_LESS_SELF_STAKE: &str = "too-less-self-stake";

// ── Configuration ──
pub const ERR_PROPOSER_SYNC_DISABLED: &str = "proposer-sync-disabled";
