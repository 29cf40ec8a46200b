multiversx_sc::imports!();

use crate::errors::ERR_NOT_ELECTOR;

/// The elector runs elections off-chain and is the only account allowed to
/// stamp `elected_time` on registry members.
#[multiversx_sc::module]
pub trait ElectorModule {
    #[only_owner]
    #[endpoint(setElector)]
    fn set_elector(&self, elector: ManagedAddress) {
        self.elector().set(&elector);
        self.elector_changed_event(&elector);
    }

    fn require_elector(&self) {
        let caller = self.blockchain().get_caller();
        require!(caller == self.elector().get(), ERR_NOT_ELECTOR);
    }

    #[event("electorChanged")]
    fn elector_changed_event(&self, #[indexed] elector: &ManagedAddress);

    #[view(getElector)]
    #[storage_mapper("elector")]
    fn elector(&self) -> SingleValueMapper<ManagedAddress>;
}
