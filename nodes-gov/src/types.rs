multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::vote_mask::VoteMask;

// ============================================================
// Node: an entry of the governed registry
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct NodeInfo<M: ManagedTypeApi> {
    /// Permanent identifier, assigned on insertion; 0 while only proposed.
    pub id: u64,
    /// Pubkey hash, certificate hash or enclave report, depending on the registry.
    pub info: ManagedBuffer<M>,
    pub rpc_url: ManagedBuffer<M>,
    pub intro: ManagedBuffer<M>,
}

// ============================================================
// GovAction: what a proposal does once executed
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum GovAction<M: ManagedTypeApi> {
    /// Replace the whole proposer set, invalidating every earlier proposal.
    NewProposers(ManagedVec<M, ManagedAddress<M>>),
    NewNode(NodeInfo<M>),
    /// Remove the node with this id.
    ObsoleteNode(u64),
}

// ============================================================
// Proposal: the governance record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum ProposalState<M: ManagedTypeApi> {
    /// Collecting votes.
    Active {
        proposer: ManagedAddress<M>,
        action: GovAction<M>,
        votes: VoteMask,
    },
    /// Executed once; the record is kept so ids stay probe-able.
    Executed,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub state: ProposalState<M>,
}
