multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use gov_common::pubkey::PUBKEY_X_LEN;

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct MonitorInfo<M: ManagedTypeApi> {
    pub addr: ManagedAddress<M>,
    pub pubkey_prefix: u8,
    pub pubkey_x: ManagedByteArray<M, PUBKEY_X_LEN>,
    pub intro: ManagedBuffer<M>,
    pub staked_amount: BigUint<M>,
    /// 0 until the elector marks the monitor as elected.
    pub elected_time: u64,
    /// Elected operators backing this monitor, in nomination order.
    pub nominated_by: ManagedVec<M, ManagedAddress<M>>,
}
