multiversx_sc::imports!();

use gov_common::errors::{
    ERR_DUPLICATED_PROPOSER, ERR_NOT_PROPOSER, ERR_TOO_MANY_PROPOSERS,
};

use crate::vote_mask::MASK_BITS;

/// A proposer's bit in the vote mask is its position in the set.
pub const MAX_PROPOSERS: usize = MASK_BITS;

#[multiversx_sc::module]
pub trait ProposersModule {
    /// Returns the caller's bit index, or fails with `not-proposer`.
    fn require_proposer(&self, addr: &ManagedAddress) -> usize {
        match self.proposer_index(addr) {
            Some(index) => index,
            None => sc_panic!(ERR_NOT_PROPOSER),
        }
    }

    fn proposer_index(&self, addr: &ManagedAddress) -> Option<usize> {
        // UnorderedSetMapper indexes are 1-based, 0 means absent
        self.proposers().get_index(addr).checked_sub(1)
    }

    /// Rejects lists longer than `max_len` or carrying the same address twice.
    fn require_valid_proposer_list(
        &self,
        list: &ManagedVec<Self::Api, ManagedAddress<Self::Api>>,
        max_len: usize,
    ) {
        require!(list.len() <= max_len, ERR_TOO_MANY_PROPOSERS);
        for (i, addr) in list.iter().enumerate() {
            for other in list.iter().skip(i + 1) {
                require!(*addr != *other, ERR_DUPLICATED_PROPOSER);
            }
        }
    }

    /// Drops the current set and installs `new_proposers` in the given order.
    fn replace_proposers(&self, new_proposers: &ManagedVec<Self::Api, ManagedAddress<Self::Api>>) {
        let mut proposers = self.proposers();

        let mut previous: ManagedVec<Self::Api, ManagedAddress<Self::Api>> = ManagedVec::new();
        for addr in proposers.iter() {
            previous.push(addr);
        }
        for addr in previous.iter() {
            proposers.swap_remove(&addr);
        }

        for addr in new_proposers.iter() {
            require!(proposers.insert(addr.clone_value()), ERR_DUPLICATED_PROPOSER);
        }
    }

    fn proposers_equal(&self, other: &ManagedVec<Self::Api, ManagedAddress<Self::Api>>) -> bool {
        let proposers = self.proposers();
        if proposers.len() != other.len() {
            return false;
        }
        proposers
            .iter()
            .zip(other.iter())
            .all(|(current, candidate)| current == *candidate)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getAllProposers)]
    fn get_all_proposers(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for addr in self.proposers().iter() {
            result.push(addr);
        }
        result
    }

    #[view(getProposerIndex)]
    fn get_proposer_index(&self, addr: ManagedAddress) -> Option<usize> {
        self.proposer_index(&addr)
    }

    #[view(getProposerCount)]
    fn get_proposer_count(&self) -> usize {
        self.proposers().len()
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("proposers")]
    fn proposers(&self) -> UnorderedSetMapper<ManagedAddress>;
}
