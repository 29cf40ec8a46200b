#![allow(deprecated)]

use multiversx_sc::types::{Address, ManagedByteArray};
use multiversx_sc_scenario::{
    managed_address, managed_biguint, managed_buffer, rust_biguint,
    whitebox_legacy::{BlockchainStateWrapper, ContractObjWrapper, TxResult},
    DebugApi,
};
use operators_gov::{OperatorsGov, MIN_STAKE_PERIOD};

const WASM_PATH: &str = "output/operators-gov.wasm";
const MIN_SELF_STAKE: u64 = 10_000;
const USER_BALANCE: u64 = 1_000_000;
const START_TIME: u64 = 1_700_000_000;

type OperatorsContract = operators_gov::ContractObj<DebugApi>;

struct OperatorsSetup<OperatorsBuilder>
where
    OperatorsBuilder: 'static + Copy + Fn() -> OperatorsContract,
{
    b_mock: BlockchainStateWrapper,
    elector: Address,
    users: Vec<Address>,
    gov: ContractObjWrapper<OperatorsContract, OperatorsBuilder>,
}

fn pubkey_x(tag: u8) -> ManagedByteArray<DebugApi, 32> {
    ManagedByteArray::new_from_bytes(&[tag; 32])
}

fn setup_operators<OperatorsBuilder>(
    builder: OperatorsBuilder,
) -> OperatorsSetup<OperatorsBuilder>
where
    OperatorsBuilder: 'static + Copy + Fn() -> OperatorsContract,
{
    let rust_zero = rust_biguint!(0u64);
    let mut b_mock = BlockchainStateWrapper::new();
    let owner = b_mock.create_user_account(&rust_zero);
    let elector = b_mock.create_user_account(&rust_zero);
    let users: Vec<Address> = (0..5)
        .map(|_| b_mock.create_user_account(&rust_biguint!(USER_BALANCE)))
        .collect();
    let gov = b_mock.create_sc_account(&rust_zero, Some(&owner), builder, WASM_PATH);

    b_mock
        .execute_tx(&owner, &gov, &rust_zero, |sc| {
            sc.init(managed_biguint!(MIN_SELF_STAKE), managed_address!(&elector));
        })
        .assert_ok();
    b_mock.set_block_timestamp(START_TIME);

    OperatorsSetup {
        b_mock,
        elector,
        users,
        gov,
    }
}

impl<OperatorsBuilder> OperatorsSetup<OperatorsBuilder>
where
    OperatorsBuilder: 'static + Copy + Fn() -> OperatorsContract,
{
    fn apply(&mut self, user: usize, prefix: u8, deposit: u64) -> TxResult {
        let caller = self.users[user].clone();
        self.b_mock
            .execute_tx(&caller, &self.gov, &rust_biguint!(deposit), |sc| {
                sc.apply_operator(
                    prefix,
                    pubkey_x(user as u8 + 1),
                    managed_buffer!(b"https://rpc.example"),
                    managed_buffer!(b"intro"),
                );
            })
    }

    fn stake(&mut self, user: usize, operator: usize, amount: u64) -> TxResult {
        let caller = self.users[user].clone();
        let operator = self.users[operator].clone();
        self.b_mock
            .execute_tx(&caller, &self.gov, &rust_biguint!(amount), |sc| {
                sc.stake_operator(managed_address!(&operator));
            })
    }

    fn unstake(&mut self, user: usize, stake_index: usize, amount: u64) -> TxResult {
        let caller = self.users[user].clone();
        self.b_mock
            .execute_tx(&caller, &self.gov, &rust_biguint!(0u64), |sc| {
                sc.unstake_operator(stake_index, managed_biguint!(amount));
            })
    }

    fn set_elected_time(&mut self, index: usize, elected_time: u64) -> TxResult {
        let elector = self.elector.clone();
        self.b_mock
            .execute_tx(&elector, &self.gov, &rust_biguint!(0u64), |sc| {
                sc.set_elected_time(index, elected_time);
            })
    }

    /// Expected operator slots as `Some((user, total, self))`, `None` for a hole.
    fn assert_operators(&mut self, expected: &[Option<(usize, u64, u64)>]) {
        let users = self.users.clone();
        self.b_mock
            .execute_query(&self.gov, |sc| {
                assert_eq!(sc.get_operator_count(), expected.len());
                for (index, slot) in expected.iter().enumerate() {
                    match (sc.get_operator(index), slot) {
                        (Some(operator), Some((user, total, own))) => {
                            assert_eq!(operator.addr, managed_address!(&users[*user]));
                            assert_eq!(operator.total_staked_amount, managed_biguint!(*total));
                            assert_eq!(operator.self_staked_amount, managed_biguint!(*own));
                            assert_eq!(
                                sc.get_operator_index(managed_address!(&users[*user])),
                                Some(index)
                            );
                        },
                        (None, None) => {},
                        (actual, wanted) => {
                            panic!("operator slot {index}: got {actual:?}, expected {wanted:?}")
                        },
                    }
                }
            })
            .assert_ok();
    }

    /// Expected ledger rows as `Some((staker, operator, amount))`, `None` for a hole.
    fn assert_stakes(&mut self, expected: &[Option<(usize, usize, u64)>]) {
        let users = self.users.clone();
        self.b_mock
            .execute_query(&self.gov, |sc| {
                assert_eq!(sc.get_stake_info_count(), expected.len());
                for (index, row) in expected.iter().enumerate() {
                    match (sc.get_stake_info(index), row) {
                        (Some(stake), Some((staker, operator, amount))) => {
                            assert_eq!(stake.staker, managed_address!(&users[*staker]));
                            assert_eq!(stake.operator, managed_address!(&users[*operator]));
                            assert_eq!(stake.staked_amount, managed_biguint!(*amount));
                        },
                        (None, None) => {},
                        (actual, wanted) => {
                            panic!("stake row {index}: got {actual:?}, expected {wanted:?}")
                        },
                    }
                }
            })
            .assert_ok();
    }
}

#[test]
fn test_contract_builds() {
    let _: fn() -> OperatorsContract = operators_gov::contract_obj;
}

#[test]
fn init_rejects_zero_min_self_stake() {
    let rust_zero = rust_biguint!(0u64);
    let mut b_mock = BlockchainStateWrapper::new();
    let owner = b_mock.create_user_account(&rust_zero);
    let elector = b_mock.create_user_account(&rust_zero);
    let gov = b_mock.create_sc_account(
        &rust_zero,
        Some(&owner),
        operators_gov::contract_obj,
        WASM_PATH,
    );

    b_mock
        .execute_tx(&owner, &gov, &rust_zero, |sc| {
            sc.init(managed_biguint!(0u64), managed_address!(&elector));
        })
        .assert_user_error("invalid-min-stake");
}

// ============================================================
// applyOperator
// ============================================================

#[test]
fn apply_rejects_invalid_pubkey_prefix() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    for prefix in [0x00u8, 0x01, 0x04, 0x05, 0x09, 0x99, 0xff] {
        setup
            .apply(0, prefix, MIN_SELF_STAKE)
            .assert_user_error("invalid-pubkey-prefix");
    }
    setup.assert_operators(&[]);
    setup.assert_stakes(&[]);
}

#[test]
fn apply_requires_min_self_stake() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    for deposit in [0u64, 1, 123, MIN_SELF_STAKE - 1] {
        setup
            .apply(0, 0x02, deposit)
            .assert_user_error("deposit-too-less");
    }
    setup.apply(0, 0x02, MIN_SELF_STAKE).assert_ok();
    setup.assert_operators(&[Some((0, MIN_SELF_STAKE, MIN_SELF_STAKE))]);
}

#[test]
fn apply_rejects_existing_operator() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    for user in 0..3 {
        setup.apply(user, 0x02, MIN_SELF_STAKE).assert_ok();
        setup
            .apply(user, 0x02, MIN_SELF_STAKE + 1)
            .assert_user_error("operator-existed");
    }
}

#[test]
fn apply_seeds_self_stake_row() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    setup.apply(0, 0x02, MIN_SELF_STAKE + 1).assert_ok();
    setup.apply(1, 0x03, MIN_SELF_STAKE + 2).assert_ok();
    setup.apply(2, 0x02, MIN_SELF_STAKE + 3).assert_ok();

    setup.assert_operators(&[
        Some((0, MIN_SELF_STAKE + 1, MIN_SELF_STAKE + 1)),
        Some((1, MIN_SELF_STAKE + 2, MIN_SELF_STAKE + 2)),
        Some((2, MIN_SELF_STAKE + 3, MIN_SELF_STAKE + 3)),
    ]);
    setup.assert_stakes(&[
        Some((0, 0, MIN_SELF_STAKE + 1)),
        Some((1, 1, MIN_SELF_STAKE + 2)),
        Some((2, 2, MIN_SELF_STAKE + 3)),
    ]);

    setup
        .b_mock
        .execute_query(&setup.gov, |sc| {
            let operator = sc.get_operator(1).unwrap();
            assert_eq!(operator.pubkey_prefix, 0x03);
            assert_eq!(operator.pubkey_x, pubkey_x(2));
            assert_eq!(operator.rpc_url, managed_buffer!(b"https://rpc.example"));
            assert_eq!(operator.elected_time, 0);
            for index in 0..3 {
                assert_eq!(sc.get_stake_info(index).unwrap().staked_time, START_TIME);
            }
        })
        .assert_ok();
}

// ============================================================
// stakeOperator
// ============================================================

#[test]
fn stake_errors() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    setup.apply(0, 0x02, MIN_SELF_STAKE + 1).assert_ok();

    setup.stake(2, 0, 0).assert_user_error("deposit-nothing");
    // nothing deposited and no such operator: the deposit is checked first
    setup.stake(2, 4, 0).assert_user_error("deposit-nothing");
    setup.stake(1, 1, 123).assert_user_error("no-such-operator");
    setup.stake(0, 2, 123).assert_user_error("no-such-operator");
}

#[test]
fn stake_appends_ledger_rows() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    setup.apply(0, 0x02, MIN_SELF_STAKE + 1).assert_ok();
    setup.apply(1, 0x03, MIN_SELF_STAKE + 2).assert_ok();

    setup.b_mock.set_block_timestamp(START_TIME + 50);
    setup.stake(3, 0, 123).assert_ok();
    setup.stake(4, 0, 456).assert_ok();
    setup.stake(3, 1, 789).assert_ok();
    setup.stake(0, 0, 1_000).assert_ok();

    setup.assert_operators(&[
        Some((0, MIN_SELF_STAKE + 1 + 123 + 456 + 1_000, MIN_SELF_STAKE + 1_001)),
        Some((1, MIN_SELF_STAKE + 2 + 789, MIN_SELF_STAKE + 2)),
    ]);
    setup.assert_stakes(&[
        Some((0, 0, MIN_SELF_STAKE + 1)),
        Some((1, 1, MIN_SELF_STAKE + 2)),
        Some((3, 0, 123)),
        Some((4, 0, 456)),
        Some((3, 1, 789)),
        Some((0, 0, 1_000)),
    ]);
    setup
        .b_mock
        .execute_query(&setup.gov, |sc| {
            assert_eq!(sc.get_stake_info(5).unwrap().staked_time, START_TIME + 50);
        })
        .assert_ok();
    setup.b_mock.check_egld_balance(
        setup.gov.address_ref(),
        &rust_biguint!(2 * MIN_SELF_STAKE + 3 + 123 + 456 + 789 + 1_000),
    );
}

// ============================================================
// unstakeOperator
// ============================================================

#[test]
fn unstake_errors() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    setup.apply(0, 0x02, MIN_SELF_STAKE + 1).assert_ok(); // stake#0
    setup.stake(1, 0, 123).assert_ok(); // stake#1
    setup.stake(2, 0, 456).assert_ok(); // stake#2

    setup.unstake(0, 123, 456).assert_user_error("no-such-stake-info");
    setup.unstake(1, 2, 456).assert_user_error("not-your-stake");
    setup.unstake(1, 1, 456).assert_user_error("withdraw-too-much");
    setup.unstake(1, 1, 100).assert_user_error("not-mature");

    setup.set_elected_time(0, 123_456_789).assert_ok();
    setup
        .b_mock
        .set_block_timestamp(START_TIME + MIN_STAKE_PERIOD + 1);
    setup
        .unstake(0, 0, 456)
        .assert_user_error("too-less-self-stake");
    setup
        .unstake(0, 0, MIN_SELF_STAKE + 1)
        .assert_user_error("operator-is-active");
}

#[test]
fn stake_matures_after_min_period() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    setup.apply(0, 0x02, MIN_SELF_STAKE).assert_ok();
    setup.stake(1, 0, 500).assert_ok();

    setup
        .b_mock
        .set_block_timestamp(START_TIME + MIN_STAKE_PERIOD - 1);
    setup.unstake(1, 1, 100).assert_user_error("not-mature");

    setup
        .b_mock
        .set_block_timestamp(START_TIME + MIN_STAKE_PERIOD);
    setup.unstake(1, 1, 100).assert_ok();

    // a later deposit has its own clock
    setup.stake(1, 0, 500).assert_ok();
    setup.unstake(1, 2, 100).assert_user_error("not-mature");

    setup.assert_stakes(&[
        Some((0, 0, MIN_SELF_STAKE)),
        Some((1, 0, 400)),
        Some((1, 0, 500)),
    ]);
    setup.assert_operators(&[Some((0, MIN_SELF_STAKE + 900, MIN_SELF_STAKE))]);
}

#[test]
fn delegated_unstake_frees_ledger_row() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    setup.apply(0, 0x02, MIN_SELF_STAKE).assert_ok(); // stake#0
    setup.stake(3, 0, 300).assert_ok(); // stake#1
    setup.stake(4, 0, 400).assert_ok(); // stake#2
    setup.set_elected_time(0, 123_456_789).assert_ok();

    setup
        .b_mock
        .set_block_timestamp(START_TIME + MIN_STAKE_PERIOD);
    // the active-member lock only guards the operator's own stake
    setup.unstake(3, 1, 300).assert_ok();
    setup.unstake(4, 2, 150).assert_ok();

    setup.assert_stakes(&[Some((0, 0, MIN_SELF_STAKE)), None, Some((4, 0, 250))]);
    setup.assert_operators(&[Some((0, MIN_SELF_STAKE + 250, MIN_SELF_STAKE))]);
    setup
        .b_mock
        .check_egld_balance(&setup.users[3].clone(), &rust_biguint!(USER_BALANCE));
    setup
        .b_mock
        .check_egld_balance(&setup.users[4].clone(), &rust_biguint!(USER_BALANCE - 250));

    setup
        .b_mock
        .execute_query(&setup.gov, |sc| {
            let free: Vec<usize> = sc.get_free_stake_info_slots().into_iter().collect();
            assert_eq!(free, vec![1]);
        })
        .assert_ok();

    setup.stake(3, 0, 77).assert_ok();
    setup.assert_stakes(&[
        Some((0, 0, MIN_SELF_STAKE)),
        Some((3, 0, 77)),
        Some((4, 0, 250)),
    ]);
}

#[test]
fn operator_exit_frees_slot_for_reuse() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    setup.apply(0, 0x02, MIN_SELF_STAKE).assert_ok(); // stake#0
    setup.apply(1, 0x02, MIN_SELF_STAKE + 1).assert_ok(); // stake#1
    setup.apply(2, 0x03, MIN_SELF_STAKE + 2).assert_ok(); // stake#2

    setup
        .b_mock
        .set_block_timestamp(START_TIME + MIN_STAKE_PERIOD);
    setup.unstake(0, 0, MIN_SELF_STAKE).assert_ok();
    setup.unstake(1, 1, MIN_SELF_STAKE + 1).assert_ok();

    setup.assert_operators(&[None, None, Some((2, MIN_SELF_STAKE + 2, MIN_SELF_STAKE + 2))]);
    setup.assert_stakes(&[None, None, Some((2, 2, MIN_SELF_STAKE + 2))]);

    let users = setup.users.clone();
    setup
        .b_mock
        .execute_query(&setup.gov, |sc| {
            assert_eq!(sc.get_operator_index(managed_address!(&users[0])), None);
            assert_eq!(sc.get_operator_index(managed_address!(&users[1])), None);
            let free: Vec<usize> = sc.get_free_slots().into_iter().collect();
            assert_eq!(free, vec![0, 1]);
        })
        .assert_ok();
    setup
        .b_mock
        .check_egld_balance(&users[0], &rust_biguint!(USER_BALANCE));

    // slots and rows come back last-freed first
    setup.apply(3, 0x02, MIN_SELF_STAKE + 3).assert_ok();
    setup.apply(4, 0x03, MIN_SELF_STAKE + 4).assert_ok();
    setup.assert_operators(&[
        Some((4, MIN_SELF_STAKE + 4, MIN_SELF_STAKE + 4)),
        Some((3, MIN_SELF_STAKE + 3, MIN_SELF_STAKE + 3)),
        Some((2, MIN_SELF_STAKE + 2, MIN_SELF_STAKE + 2)),
    ]);
    setup.assert_stakes(&[
        Some((4, 4, MIN_SELF_STAKE + 4)),
        Some((3, 3, MIN_SELF_STAKE + 3)),
        Some((2, 2, MIN_SELF_STAKE + 2)),
    ]);
}

#[test]
fn operator_with_delegations_keeps_slot() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    setup.apply(0, 0x02, MIN_SELF_STAKE).assert_ok(); // stake#0
    setup.stake(3, 0, 300).assert_ok(); // stake#1

    setup
        .b_mock
        .set_block_timestamp(START_TIME + MIN_STAKE_PERIOD);
    setup.unstake(0, 0, MIN_SELF_STAKE).assert_ok();
    setup.assert_operators(&[Some((0, 300, 0))]);

    setup.unstake(3, 1, 300).assert_ok();
    setup.assert_operators(&[None]);
    setup.assert_stakes(&[None, None]);
}

// ============================================================
// Elector & election views
// ============================================================

#[test]
fn elected_operators_are_listed() {
    let mut setup = setup_operators(operators_gov::contract_obj);
    for user in 0..4 {
        setup.apply(user, 0x02, MIN_SELF_STAKE).assert_ok();
    }

    let outsider = setup.users[4].clone();
    setup
        .b_mock
        .execute_tx(&outsider, &setup.gov, &rust_biguint!(0u64), |sc| {
            sc.set_elected_time(0, 1);
        })
        .assert_user_error("not-elector");
    setup
        .set_elected_time(4, 1)
        .assert_user_error("no-such-operator");

    setup.set_elected_time(3, 123_456_789).assert_ok();
    setup.set_elected_time(1, 123_456_789).assert_ok();

    let users = setup.users.clone();
    setup
        .b_mock
        .execute_query(&setup.gov, |sc| {
            let elected: Vec<_> = sc.get_elected_operators().into_iter().collect();
            assert_eq!(
                elected,
                vec![managed_address!(&users[1]), managed_address!(&users[3])]
            );
            let flags: Vec<bool> = users
                .iter()
                .map(|user| sc.is_operator(managed_address!(user)))
                .collect();
            assert_eq!(flags, vec![false, true, false, true, false]);
        })
        .assert_ok();

    // an election can also be revoked
    setup.set_elected_time(1, 0).assert_ok();
    setup
        .b_mock
        .execute_query(&setup.gov, |sc| {
            assert!(!sc.is_operator(managed_address!(&users[1])));
            assert_eq!(sc.get_elected_operators().into_iter().count(), 1);
        })
        .assert_ok();
}
