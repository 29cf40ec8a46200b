#![no_std]

multiversx_sc::imports!();

pub mod nodes;
pub mod proposals;
pub mod proposers;
pub mod types;
pub mod vote_mask;

use gov_common::{
    errors::{ERR_NOT_MONITOR, ERR_NO_PROPOSERS, ERR_PROPOSER_SYNC_DISABLED},
    monitors_gov_proxy, operators_gov_proxy,
};
use proposers::MAX_PROPOSERS;

// ============================================================
// Contract
//
// One deployment governs one node registry (enclave nodes or
// full-node RPC endpoints). Proposers vote nodes in and out;
// elected monitors can pull a node directly.
// ============================================================

#[multiversx_sc::contract]
pub trait NodesGov:
    proposers::ProposersModule + nodes::NodesModule + proposals::ProposalsModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        monitors_gov_address: ManagedAddress,
        proposers: MultiValueEncoded<ManagedAddress>,
    ) {
        let proposers = proposers.to_vec();
        require!(!proposers.is_empty(), ERR_NO_PROPOSERS);
        self.require_valid_proposer_list(&proposers, MAX_PROPOSERS);
        self.replace_proposers(&proposers);

        self.monitors_gov_address().set(&monitors_gov_address);
        self.proposal_count().set(0u64);
        self.min_proposal_id().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: removeNodeByMonitor
    // Incident response: an elected monitor removes a node
    // without waiting for a proposal.
    // ========================================================

    #[endpoint(removeNodeByMonitor)]
    fn remove_node_by_monitor(&self, node_id: u64) {
        let caller = self.blockchain().get_caller();

        let monitors_gov_addr = self.monitors_gov_address().get();
        let is_monitor: bool = self
            .tx()
            .to(&monitors_gov_addr)
            .typed(monitors_gov_proxy::MonitorsGovProxy)
            .is_monitor(caller.clone())
            .returns(ReturnsResult)
            .sync_call_readonly();
        require!(is_monitor, ERR_NOT_MONITOR);

        self.remove_node(node_id);
        self.remove_node_by_monitor_event(node_id, &caller);
    }

    // ========================================================
    // ENDPOINT: syncProposers
    // Makes the elected operators the proposer set. A no-op
    // while the elected set is empty or already in place.
    // ========================================================

    #[only_owner]
    #[endpoint(enableProposerSync)]
    fn enable_proposer_sync(&self, operators_gov_address: ManagedAddress) {
        self.operators_gov_address().set(&operators_gov_address);
        self.proposer_sync_enabled_event(&operators_gov_address);
    }

    #[endpoint(syncProposers)]
    fn sync_proposers(&self) {
        require!(
            !self.operators_gov_address().is_empty(),
            ERR_PROPOSER_SYNC_DISABLED
        );

        let operators_gov_addr = self.operators_gov_address().get();
        let elected: MultiValueEncoded<ManagedAddress> = self
            .tx()
            .to(&operators_gov_addr)
            .typed(operators_gov_proxy::OperatorsGovProxy)
            .get_elected_operators()
            .returns(ReturnsResult)
            .sync_call_readonly();

        self.apply_elected_proposers(&elected.to_vec());
    }

    /// Returns whether the proposer set changed.
    fn apply_elected_proposers(
        &self,
        elected: &ManagedVec<Self::Api, ManagedAddress<Self::Api>>,
    ) -> bool {
        if elected.is_empty() || self.proposers_equal(elected) {
            return false;
        }
        self.require_valid_proposer_list(elected, MAX_PROPOSERS);
        self.change_proposers(elected);
        true
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("removeNodeByMonitor")]
    fn remove_node_by_monitor_event(
        &self,
        #[indexed] node_id: u64,
        #[indexed] monitor: &ManagedAddress,
    );

    #[event("proposerSyncEnabled")]
    fn proposer_sync_enabled_event(&self, #[indexed] operators_gov: &ManagedAddress);

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getMonitorsGovAddress)]
    #[storage_mapper("monitorsGovAddress")]
    fn monitors_gov_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getOperatorsGovAddress)]
    #[storage_mapper("operatorsGovAddress")]
    fn operators_gov_address(&self) -> SingleValueMapper<ManagedAddress>;
}
