multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use gov_common::pubkey::PUBKEY_X_LEN;

// ============================================================
// OperatorInfo: a registry member
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct OperatorInfo<M: ManagedTypeApi> {
    pub addr: ManagedAddress<M>,
    pub pubkey_prefix: u8,
    pub pubkey_x: ManagedByteArray<M, PUBKEY_X_LEN>,
    pub rpc_url: ManagedBuffer<M>,
    pub intro: ManagedBuffer<M>,
    /// Own stake plus everything delegated to this operator.
    pub total_staked_amount: BigUint<M>,
    pub self_staked_amount: BigUint<M>,
    pub elected_time: u64,
}

// ============================================================
// StakeInfo: one deposit in the stake ledger
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct StakeInfo<M: ManagedTypeApi> {
    pub staker: ManagedAddress<M>,
    pub operator: ManagedAddress<M>,
    /// Block timestamp of the deposit; maturity is counted from here.
    pub staked_time: u64,
    pub staked_amount: BigUint<M>,
}
