multiversx_sc::imports!();

use gov_common::errors::{
    ERR_EXECUTED_PROPOSAL, ERR_INVALID_INFO, ERR_INVALID_RPC_URL, ERR_NOT_ENOUGH_VOTES,
    ERR_NO_NEW_PROPOSERS, ERR_NO_SUCH_NODE, ERR_NO_SUCH_PROPOSAL, ERR_OUTDATED_PROPOSAL,
};

use crate::{
    nodes,
    proposers::{self, MAX_PROPOSERS},
    types::{GovAction, NodeInfo, Proposal, ProposalState},
    vote_mask::VoteMask,
};

// ============================================================
// Proposal engine
//
// Ids start at 0 and are never reused. A proposal created by
// a proposer carries that proposer's vote; it executes once a
// strict majority of the current proposer set approves it.
// Proposals older than `minProposalId` are dead: they were
// voted on by bit positions of a previous proposer set.
// ============================================================

#[multiversx_sc::module]
pub trait ProposalsModule: proposers::ProposersModule + nodes::NodesModule {
    // ========================================================
    // ENDPOINTS: propose
    // ========================================================

    #[endpoint(proposeNewProposers)]
    fn propose_new_proposers(&self, new_proposers: MultiValueEncoded<ManagedAddress>) -> u64 {
        let caller = self.blockchain().get_caller();
        let voter_bit = self.require_proposer(&caller);

        let new_proposers = new_proposers.to_vec();
        require!(!new_proposers.is_empty(), ERR_NO_NEW_PROPOSERS);
        // the set may shrink freely but only grow by one per proposal
        let max_len = core::cmp::min(MAX_PROPOSERS, self.proposers().len() + 1);
        self.require_valid_proposer_list(&new_proposers, max_len);

        let proposal_id = self.create_proposal(
            &caller,
            voter_bit,
            GovAction::NewProposers(new_proposers.clone()),
        );
        self.propose_new_proposers_event(proposal_id, &caller, &new_proposers);
        proposal_id
    }

    #[endpoint(proposeNewNode)]
    fn propose_new_node(
        &self,
        info: ManagedBuffer,
        rpc_url: ManagedBuffer,
        intro: ManagedBuffer,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        let voter_bit = self.require_proposer(&caller);
        require!(!info.is_empty(), ERR_INVALID_INFO);
        require!(!rpc_url.is_empty(), ERR_INVALID_RPC_URL);

        let node = NodeInfo {
            id: 0,
            info,
            rpc_url,
            intro,
        };
        let proposal_id =
            self.create_proposal(&caller, voter_bit, GovAction::NewNode(node.clone()));
        self.propose_new_node_event(proposal_id, &caller, &node);
        proposal_id
    }

    #[endpoint(proposeObsoleteNode)]
    fn propose_obsolete_node(&self, node_id: u64) -> u64 {
        let caller = self.blockchain().get_caller();
        let voter_bit = self.require_proposer(&caller);
        require!(self.find_node(node_id).is_some(), ERR_NO_SUCH_NODE);

        let proposal_id =
            self.create_proposal(&caller, voter_bit, GovAction::ObsoleteNode(node_id));
        self.propose_obsolete_node_event(proposal_id, &caller, node_id);
        proposal_id
    }

    // ========================================================
    // ENDPOINT: voteProposal
    // Sets or clears the caller's bit. Repeating a vote is allowed.
    // ========================================================

    #[endpoint(voteProposal)]
    fn vote_proposal(&self, proposal_id: u64, support: bool) {
        let caller = self.blockchain().get_caller();
        self.require_proposal_exists(proposal_id);
        let voter_bit = self.require_proposer(&caller);
        require!(
            proposal_id >= self.min_proposal_id().get(),
            ERR_OUTDATED_PROPOSAL
        );

        let mut proposal = self.proposals(proposal_id).get();
        match &mut proposal.state {
            ProposalState::Active { votes, .. } => votes.set(voter_bit, support),
            ProposalState::Executed => sc_panic!(ERR_EXECUTED_PROPOSAL),
        }
        self.proposals(proposal_id).set(&proposal);

        self.vote_proposal_event(proposal_id, &caller, support);
    }

    // ========================================================
    // ENDPOINT: execProposal
    // Anyone may trigger execution once a majority approved.
    // ========================================================

    #[endpoint(execProposal)]
    fn exec_proposal(&self, proposal_id: u64) {
        self.require_proposal_exists(proposal_id);
        require!(
            proposal_id >= self.min_proposal_id().get(),
            ERR_OUTDATED_PROPOSAL
        );

        let (action, votes) = match self.proposals(proposal_id).get().state {
            ProposalState::Active { action, votes, .. } => (action, votes),
            ProposalState::Executed => sc_panic!(ERR_EXECUTED_PROPOSAL),
        };
        require!(
            votes.is_majority_of(self.proposers().len()),
            ERR_NOT_ENOUGH_VOTES
        );

        match action {
            GovAction::NewProposers(new_proposers) => self.change_proposers(&new_proposers),
            GovAction::NewNode(node) => {
                self.insert_node(node.info, node.rpc_url, node.intro);
            },
            GovAction::ObsoleteNode(node_id) => self.remove_node(node_id),
        }

        self.proposals(proposal_id).set(Proposal {
            id: proposal_id,
            state: ProposalState::Executed,
        });
        self.exec_proposal_event(proposal_id);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn create_proposal(
        &self,
        proposer: &ManagedAddress,
        voter_bit: usize,
        action: GovAction<Self::Api>,
    ) -> u64 {
        let proposal_id = self.proposal_count().get();
        let proposal = Proposal {
            id: proposal_id,
            state: ProposalState::Active {
                proposer: proposer.clone(),
                action,
                votes: VoteMask::single(voter_bit),
            },
        };
        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id + 1);
        proposal_id
    }

    /// Installs a new proposer set and outdates every proposal created so far.
    fn change_proposers(&self, new_proposers: &ManagedVec<Self::Api, ManagedAddress<Self::Api>>) {
        self.replace_proposers(new_proposers);
        let watermark = self.proposal_count().get();
        self.min_proposal_id().set(watermark);
        self.new_proposers_event(watermark, new_proposers);
    }

    fn require_proposal_exists(&self, proposal_id: u64) {
        require!(
            proposal_id < self.proposal_count().get(),
            ERR_NO_SUCH_PROPOSAL
        );
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        self.require_proposal_exists(proposal_id);
        self.proposals(proposal_id).get()
    }

    #[view(isProposalOutdated)]
    fn is_proposal_outdated(&self, proposal_id: u64) -> bool {
        self.require_proposal_exists(proposal_id);
        proposal_id < self.min_proposal_id().get()
    }

    /// Whether `voter` currently approves a live proposal. Outdated and
    /// executed proposals report `false`.
    #[view(hasApproved)]
    fn has_approved(&self, proposal_id: u64, voter: ManagedAddress) -> bool {
        self.require_proposal_exists(proposal_id);
        if proposal_id < self.min_proposal_id().get() {
            return false;
        }
        let voter_bit = match self.proposer_index(&voter) {
            Some(bit) => bit,
            None => return false,
        };
        match self.proposals(proposal_id).get().state {
            ProposalState::Active { votes, .. } => votes.contains(voter_bit),
            ProposalState::Executed => false,
        }
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("proposeNewProposers")]
    fn propose_new_proposers_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
        new_proposers: &ManagedVec<Self::Api, ManagedAddress<Self::Api>>,
    );

    #[event("proposeNewNode")]
    fn propose_new_node_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
        node: &NodeInfo<Self::Api>,
    );

    #[event("proposeObsoleteNode")]
    fn propose_obsolete_node_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
        #[indexed] node_id: u64,
    );

    #[event("voteProposal")]
    fn vote_proposal_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] support: bool,
    );

    #[event("execProposal")]
    fn exec_proposal_event(&self, #[indexed] proposal_id: u64);

    #[event("newProposers")]
    fn new_proposers_event(
        &self,
        #[indexed] min_proposal_id: u64,
        proposers: &ManagedVec<Self::Api, ManagedAddress<Self::Api>>,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getProposalCount)]
    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[view(getMinProposalId)]
    #[storage_mapper("minProposalId")]
    fn min_proposal_id(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;
}
