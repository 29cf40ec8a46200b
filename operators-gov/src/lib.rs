#![no_std]

multiversx_sc::imports!();

pub mod types;

use gov_common::{
    elector,
    errors::{
        ERR_DEPOSIT_NOTHING, ERR_DEPOSIT_TOO_LESS, ERR_INVALID_MIN_STAKE, ERR_INVALID_PUBKEY_PREFIX, ERR_NOT_MATURE,
        ERR_NOT_YOUR_STAKE, ERR_NO_SUCH_OPERATOR, ERR_NO_SUCH_STAKE_INFO,
        ERR_OPERATOR_EXISTED, ERR_OPERATOR_IS_ACTIVE, ERR_TOO_LESS_SELF_STAKE,
        ERR_WITHDRAW_TOO_MUCH,
    },
    pubkey::{is_valid_pubkey_prefix, PUBKEY_X_LEN},
    slot_arena::SlotArena,
};
use types::{OperatorInfo, StakeInfo};

// ============================================================
// Constants
// ============================================================

/// Each deposit is locked for 100 days.
pub const MIN_STAKE_PERIOD: u64 = 100 * 24 * 3_600;

// ============================================================
// Contract
//
// Operators stake for themselves on apply; anyone can delegate
// on top. Every deposit is its own ledger row and matures on
// its own clock.
// ============================================================

#[multiversx_sc::contract]
pub trait OperatorsGov: elector::ElectorModule {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, min_self_stake: BigUint, elector: ManagedAddress) {
        require!(min_self_stake > 0u64, ERR_INVALID_MIN_STAKE);
        self.min_self_stake().set(&min_self_stake);
        self.elector().set(&elector);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: applyOperator
    // ========================================================

    #[endpoint(applyOperator)]
    #[payable("EGLD")]
    fn apply_operator(
        &self,
        pubkey_prefix: u8,
        pubkey_x: ManagedByteArray<Self::Api, PUBKEY_X_LEN>,
        rpc_url: ManagedBuffer,
        intro: ManagedBuffer,
    ) -> usize {
        let caller = self.blockchain().get_caller();
        let payment_amount = self.call_value().egld_value().clone_value();

        require!(
            is_valid_pubkey_prefix(pubkey_prefix),
            ERR_INVALID_PUBKEY_PREFIX
        );
        require!(
            payment_amount >= self.min_self_stake().get(),
            ERR_DEPOSIT_TOO_LESS
        );
        require!(
            self.find_operator(&caller).is_none(),
            ERR_OPERATOR_EXISTED
        );

        let operator = OperatorInfo {
            addr: caller.clone(),
            pubkey_prefix,
            pubkey_x,
            rpc_url,
            intro,
            total_staked_amount: payment_amount.clone(),
            self_staked_amount: payment_amount.clone(),
            elected_time: 0u64,
        };
        let index = self.operator_slots().occupy(operator.clone());
        self.operator_slot(&caller).set(index + 1);
        self.operator_apply_event(&caller, index, &operator);

        self.record_stake(&caller, &caller, &payment_amount);
        index
    }

    // ========================================================
    // ENDPOINT: stakeOperator
    // ========================================================

    #[endpoint(stakeOperator)]
    #[payable("EGLD")]
    fn stake_operator(&self, operator_addr: ManagedAddress) -> usize {
        let caller = self.blockchain().get_caller();
        let payment_amount = self.call_value().egld_value().clone_value();

        require!(payment_amount > 0u64, ERR_DEPOSIT_NOTHING);
        let (index, mut operator) = self.require_operator(&operator_addr);

        operator.total_staked_amount += &payment_amount;
        if caller == operator_addr {
            operator.self_staked_amount += &payment_amount;
        }
        self.operator_slots().replace(index, operator);

        self.record_stake(&caller, &operator_addr, &payment_amount)
    }

    // ========================================================
    // ENDPOINT: unstakeOperator
    // Withdraws from one ledger row once it has matured.
    // ========================================================

    #[endpoint(unstakeOperator)]
    fn unstake_operator(&self, stake_index: usize, amount: BigUint) {
        let caller = self.blockchain().get_caller();

        let mut stakes = self.stake_slots();
        let mut stake = match stakes.get(stake_index) {
            Some(stake) => stake,
            None => sc_panic!(ERR_NO_SUCH_STAKE_INFO),
        };
        require!(stake.staker == caller, ERR_NOT_YOUR_STAKE);
        require!(amount <= stake.staked_amount, ERR_WITHDRAW_TOO_MUCH);

        let now = self.blockchain().get_block_timestamp();
        require!(
            now >= stake.staked_time + MIN_STAKE_PERIOD,
            ERR_NOT_MATURE
        );

        let (operator_index, mut operator) = self.require_operator(&stake.operator);
        require!(
            amount <= operator.total_staked_amount,
            ERR_WITHDRAW_TOO_MUCH
        );
        let is_self_stake = stake.staker == stake.operator;
        if is_self_stake {
            require!(
                amount <= operator.self_staked_amount,
                ERR_WITHDRAW_TOO_MUCH
            );
            if operator.elected_time != 0 {
                let remaining = &operator.self_staked_amount - &amount;
                require!(remaining > 0u64, ERR_OPERATOR_IS_ACTIVE);
                require!(
                    remaining >= self.min_self_stake().get(),
                    ERR_TOO_LESS_SELF_STAKE
                );
            }
        }

        // ── Effects ──
        stake.staked_amount -= &amount;
        if stake.staked_amount == 0u64 {
            stakes.vacate(stake_index);
        } else {
            stakes.replace(stake_index, stake.clone());
        }

        operator.total_staked_amount -= &amount;
        if is_self_stake {
            operator.self_staked_amount -= &amount;
        }
        let mut operators = self.operator_slots();
        if operator.total_staked_amount == 0u64 {
            operators.vacate(operator_index);
            self.operator_slot(&stake.operator).clear();
        } else {
            operators.replace(operator_index, operator);
        }

        // ── Interaction ──
        self.send().direct_egld(&caller, &amount);
        self.operator_unstake_event(&caller, &stake.operator, stake_index, &amount);
    }

    // ========================================================
    // ENDPOINT: setElectedTime (elector)
    // ========================================================

    #[endpoint(setElectedTime)]
    fn set_elected_time(&self, index: usize, elected_time: u64) {
        self.require_elector();

        let mut operators = self.operator_slots();
        let mut operator = match operators.get(index) {
            Some(operator) => operator,
            None => sc_panic!(ERR_NO_SUCH_OPERATOR),
        };
        operator.elected_time = elected_time;
        let addr = operator.addr.clone();
        operators.replace(index, operator);

        self.operator_elected_event(&addr, index, elected_time);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    /// Adds a ledger row for a fresh deposit and returns its index.
    fn record_stake(
        &self,
        staker: &ManagedAddress,
        operator: &ManagedAddress,
        amount: &BigUint,
    ) -> usize {
        let stake = StakeInfo {
            staker: staker.clone(),
            operator: operator.clone(),
            staked_time: self.blockchain().get_block_timestamp(),
            staked_amount: amount.clone(),
        };
        let stake_index = self.stake_slots().occupy(stake);

        self.operator_stake_event(staker, operator, stake_index, amount);
        stake_index
    }

    fn operator_slots(&self) -> SlotArena<Self::Api, OperatorInfo<Self::Api>> {
        SlotArena::new(self.operators(), self.free_slots())
    }

    fn stake_slots(&self) -> SlotArena<Self::Api, StakeInfo<Self::Api>> {
        SlotArena::new(self.stake_infos(), self.free_stake_info_slots())
    }

    fn find_operator(&self, addr: &ManagedAddress) -> Option<usize> {
        self.operator_slot(addr).get().checked_sub(1)
    }

    fn require_operator(&self, addr: &ManagedAddress) -> (usize, OperatorInfo<Self::Api>) {
        let index = match self.find_operator(addr) {
            Some(index) => index,
            None => sc_panic!(ERR_NO_SUCH_OPERATOR),
        };
        match self.operator_slots().get(index) {
            Some(operator) => (index, operator),
            None => sc_panic!(ERR_NO_SUCH_OPERATOR),
        }
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(isOperator)]
    fn is_operator(&self, addr: ManagedAddress) -> bool {
        match self.find_operator(&addr) {
            Some(index) => self
                .operator_slots()
                .get(index)
                .is_some_and(|operator| operator.elected_time != 0),
            None => false,
        }
    }

    #[view(getElectedOperators)]
    fn get_elected_operators(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for operator in self.operators().iter().flatten() {
            if operator.elected_time != 0 {
                result.push(operator.addr);
            }
        }
        result
    }

    #[view(getOperator)]
    fn get_operator(&self, index: usize) -> Option<OperatorInfo<Self::Api>> {
        self.operator_slots().get(index)
    }

    #[view(getOperatorIndex)]
    fn get_operator_index(&self, addr: ManagedAddress) -> Option<usize> {
        self.find_operator(&addr)
    }

    #[view(getOperatorCount)]
    fn get_operator_count(&self) -> usize {
        self.operator_slots().slot_count()
    }

    #[view(getFreeSlots)]
    fn get_free_slots(&self) -> MultiValueEncoded<usize> {
        let mut result = MultiValueEncoded::new();
        for index in self.free_slots().iter() {
            result.push(index);
        }
        result
    }

    #[view(getStakeInfo)]
    fn get_stake_info(&self, stake_index: usize) -> Option<StakeInfo<Self::Api>> {
        self.stake_slots().get(stake_index)
    }

    #[view(getStakeInfoCount)]
    fn get_stake_info_count(&self) -> usize {
        self.stake_slots().slot_count()
    }

    #[view(getFreeStakeInfoSlots)]
    fn get_free_stake_info_slots(&self) -> MultiValueEncoded<usize> {
        let mut result = MultiValueEncoded::new();
        for index in self.free_stake_info_slots().iter() {
            result.push(index);
        }
        result
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("operatorApply")]
    fn operator_apply_event(
        &self,
        #[indexed] operator: &ManagedAddress,
        #[indexed] index: usize,
        info: &OperatorInfo<Self::Api>,
    );

    #[event("operatorStake")]
    fn operator_stake_event(
        &self,
        #[indexed] staker: &ManagedAddress,
        #[indexed] operator: &ManagedAddress,
        #[indexed] stake_index: usize,
        amount: &BigUint,
    );

    #[event("operatorUnstake")]
    fn operator_unstake_event(
        &self,
        #[indexed] staker: &ManagedAddress,
        #[indexed] operator: &ManagedAddress,
        #[indexed] stake_index: usize,
        amount: &BigUint,
    );

    #[event("operatorElected")]
    fn operator_elected_event(
        &self,
        #[indexed] operator: &ManagedAddress,
        #[indexed] index: usize,
        #[indexed] elected_time: u64,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getMinSelfStake)]
    #[storage_mapper("minSelfStake")]
    fn min_self_stake(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("operators")]
    fn operators(&self) -> VecMapper<Option<OperatorInfo<Self::Api>>>;

    #[storage_mapper("freeSlots")]
    fn free_slots(&self) -> VecMapper<usize>;

    /// Slot index + 1; empty when the address holds no slot.
    #[storage_mapper("operatorSlot")]
    fn operator_slot(&self, addr: &ManagedAddress) -> SingleValueMapper<usize>;

    #[storage_mapper("stakeInfos")]
    fn stake_infos(&self) -> VecMapper<Option<StakeInfo<Self::Api>>>;

    #[storage_mapper("freeStakeInfoSlots")]
    fn free_stake_info_slots(&self) -> VecMapper<usize>;
}
