#![no_std]

multiversx_sc::imports!();

pub mod types;

use gov_common::{
    elector,
    errors::{
        ERR_ALREADY_NOMINATED, ERR_DEPOSIT_NOTHING, ERR_DEPOSIT_TOO_LESS,
        ERR_INVALID_MIN_STAKE, ERR_INVALID_PUBKEY_PREFIX, ERR_MONITOR_EXISTED, ERR_MONITOR_IS_ACTIVE,
        ERR_NOT_MONITOR, ERR_NOT_OPERATOR, ERR_NO_SUCH_MONITOR, ERR_OUTSIDE_UNSTAKE_WINDOW,
        ERR_TOO_LESS_SELF_STAKE, ERR_WITHDRAW_TOO_MUCH,
    },
    operators_gov_proxy,
    pubkey::{is_valid_pubkey_prefix, PUBKEY_X_LEN},
    slot_arena::SlotArena,
};
use types::MonitorInfo;

// ============================================================
// Constants
// ============================================================

/// Stake can only be removed within 24 hours of the last election.
pub const UNSTAKE_WINDOW: u64 = 86_400;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait MonitorsGov: elector::ElectorModule {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        min_stake: BigUint,
        elector: ManagedAddress,
        operators_gov_address: ManagedAddress,
    ) {
        require!(min_stake > 0u64, ERR_INVALID_MIN_STAKE);
        self.min_stake().set(&min_stake);
        self.elector().set(&elector);
        self.operators_gov_address().set(&operators_gov_address);
        self.last_election_time().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: applyMonitor
    // The deposit is the initial stake. A vacated slot is
    // reused before the slot list grows.
    // ========================================================

    #[endpoint(applyMonitor)]
    #[payable("EGLD")]
    fn apply_monitor(
        &self,
        pubkey_prefix: u8,
        pubkey_x: ManagedByteArray<Self::Api, PUBKEY_X_LEN>,
        intro: ManagedBuffer,
    ) -> usize {
        let caller = self.blockchain().get_caller();
        let payment_amount = self.call_value().egld_value().clone_value();

        require!(
            is_valid_pubkey_prefix(pubkey_prefix),
            ERR_INVALID_PUBKEY_PREFIX
        );
        require!(
            payment_amount >= self.min_stake().get(),
            ERR_DEPOSIT_TOO_LESS
        );
        require!(
            self.find_monitor(&caller).is_none(),
            ERR_MONITOR_EXISTED
        );

        let monitor = MonitorInfo {
            addr: caller.clone(),
            pubkey_prefix,
            pubkey_x,
            intro,
            staked_amount: payment_amount,
            elected_time: 0u64,
            nominated_by: ManagedVec::new(),
        };
        let index = self.monitor_slots().occupy(monitor.clone());
        self.monitor_slot(&caller).set(index + 1);

        self.monitor_apply_event(&caller, index, &monitor);
        index
    }

    // ========================================================
    // ENDPOINT: addStake
    // ========================================================

    #[endpoint(addStake)]
    #[payable("EGLD")]
    fn add_stake(&self) {
        let caller = self.blockchain().get_caller();
        let payment_amount = self.call_value().egld_value().clone_value();

        let (index, mut monitor) = self.require_monitor(&caller);
        require!(payment_amount > 0u64, ERR_DEPOSIT_NOTHING);

        monitor.staked_amount += &payment_amount;
        self.monitor_slots().replace(index, monitor);

        self.monitor_stake_event(&caller, &payment_amount);
    }

    // ========================================================
    // ENDPOINT: removeStake
    // Elected monitors keep at least the minimum stake. Removing
    // everything frees the slot.
    // ========================================================

    #[endpoint(removeStake)]
    fn remove_stake(&self, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        let (index, mut monitor) = self.require_monitor(&caller);

        require!(amount <= monitor.staked_amount, ERR_WITHDRAW_TOO_MUCH);
        let remaining = &monitor.staked_amount - &amount;
        if monitor.elected_time != 0 {
            require!(remaining > 0u64, ERR_MONITOR_IS_ACTIVE);
            require!(
                remaining >= self.min_stake().get(),
                ERR_TOO_LESS_SELF_STAKE
            );
        }

        let now = self.blockchain().get_block_timestamp();
        require!(
            now < self.last_election_time().get() + UNSTAKE_WINDOW,
            ERR_OUTSIDE_UNSTAKE_WINDOW
        );

        let mut slots = self.monitor_slots();
        if remaining == 0u64 {
            slots.vacate(index);
            self.monitor_slot(&caller).clear();
        } else {
            monitor.staked_amount = remaining;
            slots.replace(index, monitor);
        }

        self.send().direct_egld(&caller, &amount);
        self.monitor_unstake_event(&caller, &amount);
    }

    // ========================================================
    // ENDPOINT: nominate
    // Elected operators vouch for monitors, once each.
    // ========================================================

    #[endpoint(nominate)]
    fn nominate(&self, monitor: ManagedAddress) {
        let caller = self.blockchain().get_caller();

        let operators_gov_addr = self.operators_gov_address().get();
        let is_operator: bool = self
            .tx()
            .to(&operators_gov_addr)
            .typed(operators_gov_proxy::OperatorsGovProxy)
            .is_operator(caller.clone())
            .returns(ReturnsResult)
            .sync_call_readonly();
        require!(is_operator, ERR_NOT_OPERATOR);

        self.add_nomination(&monitor, &caller);
    }

    fn add_nomination(&self, monitor_addr: &ManagedAddress, operator: &ManagedAddress) {
        let (index, mut monitor) = self.require_monitor(monitor_addr);
        require!(
            !monitor.nominated_by.contains(operator),
            ERR_ALREADY_NOMINATED
        );

        monitor.nominated_by.push(operator.clone());
        self.monitor_slots().replace(index, monitor);

        self.nominate_event(monitor_addr, operator);
    }

    // ========================================================
    // ENDPOINTS: elector
    // ========================================================

    #[endpoint(setElectedTime)]
    fn set_elected_time(&self, index: usize, elected_time: u64) {
        self.require_elector();

        let mut slots = self.monitor_slots();
        let mut monitor = match slots.get(index) {
            Some(monitor) => monitor,
            None => sc_panic!(ERR_NO_SUCH_MONITOR),
        };
        monitor.elected_time = elected_time;
        let addr = monitor.addr.clone();
        slots.replace(index, monitor);

        self.monitor_elected_event(&addr, index, elected_time);
    }

    /// Opens the unstake window as of the current block.
    #[endpoint(setLastElectionTime)]
    fn set_last_election_time(&self) {
        self.require_elector();

        let now = self.blockchain().get_block_timestamp();
        self.last_election_time().set(now);
        self.election_event(now);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn monitor_slots(&self) -> SlotArena<Self::Api, MonitorInfo<Self::Api>> {
        SlotArena::new(self.monitors(), self.free_slots())
    }

    fn find_monitor(&self, addr: &ManagedAddress) -> Option<usize> {
        self.monitor_slot(addr).get().checked_sub(1)
    }

    /// Slot of an applied monitor, elected or not.
    fn require_monitor(&self, addr: &ManagedAddress) -> (usize, MonitorInfo<Self::Api>) {
        let index = match self.find_monitor(addr) {
            Some(index) => index,
            None => sc_panic!(ERR_NOT_MONITOR),
        };
        match self.monitor_slots().get(index) {
            Some(monitor) => (index, monitor),
            None => sc_panic!(ERR_NOT_MONITOR),
        }
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(isMonitor)]
    fn is_monitor(&self, addr: ManagedAddress) -> bool {
        match self.find_monitor(&addr) {
            Some(index) => self
                .monitor_slots()
                .get(index)
                .is_some_and(|monitor| monitor.elected_time != 0),
            None => false,
        }
    }

    #[view(getMonitor)]
    fn get_monitor(&self, index: usize) -> Option<MonitorInfo<Self::Api>> {
        self.monitor_slots().get(index)
    }

    #[view(getMonitorIndex)]
    fn get_monitor_index(&self, addr: ManagedAddress) -> Option<usize> {
        self.find_monitor(&addr)
    }

    /// Number of slots, vacant ones included.
    #[view(getMonitorCount)]
    fn get_monitor_count(&self) -> usize {
        self.monitor_slots().slot_count()
    }

    #[view(getFreeSlots)]
    fn get_free_slots(&self) -> MultiValueEncoded<usize> {
        let mut result = MultiValueEncoded::new();
        for index in self.free_slots().iter() {
            result.push(index);
        }
        result
    }

    #[view(getNominators)]
    fn get_nominators(&self, addr: ManagedAddress) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        if let Some(monitor) = self
            .find_monitor(&addr)
            .and_then(|index| self.monitor_slots().get(index))
        {
            for operator in monitor.nominated_by.iter() {
                result.push(operator.clone_value());
            }
        }
        result
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("monitorApply")]
    fn monitor_apply_event(
        &self,
        #[indexed] monitor: &ManagedAddress,
        #[indexed] index: usize,
        info: &MonitorInfo<Self::Api>,
    );

    #[event("monitorStake")]
    fn monitor_stake_event(&self, #[indexed] monitor: &ManagedAddress, amount: &BigUint);

    #[event("monitorUnstake")]
    fn monitor_unstake_event(&self, #[indexed] monitor: &ManagedAddress, amount: &BigUint);

    #[event("nominate")]
    fn nominate_event(
        &self,
        #[indexed] monitor: &ManagedAddress,
        #[indexed] operator: &ManagedAddress,
    );

    #[event("monitorElected")]
    fn monitor_elected_event(
        &self,
        #[indexed] monitor: &ManagedAddress,
        #[indexed] index: usize,
        #[indexed] elected_time: u64,
    );

    #[event("election")]
    fn election_event(&self, #[indexed] timestamp: u64);

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getMinStake)]
    #[storage_mapper("minStake")]
    fn min_stake(&self) -> SingleValueMapper<BigUint>;

    #[view(getOperatorsGovAddress)]
    #[storage_mapper("operatorsGovAddress")]
    fn operators_gov_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getLastElectionTime)]
    #[storage_mapper("lastElectionTime")]
    fn last_election_time(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("monitors")]
    fn monitors(&self) -> VecMapper<Option<MonitorInfo<Self::Api>>>;

    #[storage_mapper("freeSlots")]
    fn free_slots(&self) -> VecMapper<usize>;

    /// Slot index + 1, so that an empty entry means "no slot".
    #[storage_mapper("monitorSlot")]
    fn monitor_slot(&self, addr: &ManagedAddress) -> SingleValueMapper<usize>;
}
