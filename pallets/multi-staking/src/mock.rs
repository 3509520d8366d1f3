// This file is part of Vela.

// Copyright (C) Vela Network Technologies Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later WITH Classpath-exception-2.0

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

#![cfg(test)]

use crate as multi_staking;
use crate::traits::*;
use frame_support::{derive_impl, parameter_types, traits::Nothing};
use frame_system::EnsureRoot;
use orml_traits::{parameter_type_with_key, MultiCurrency};
use sp_runtime::{
	traits::{ConstU32, IdentityLookup},
	AccountId32, BuildStorage, DispatchError, DispatchResult, Permill,
};
use std::{
	cell::RefCell,
	collections::{BTreeMap, BTreeSet},
};
use vela_primitives::{CurrencyId, MultiStakingPalletId, PollIndex, VLA};

pub type BlockNumber = u64;
pub type Amount = i128;
pub type Balance = u128;

pub type AccountId = AccountId32;

pub const ALICE: AccountId = AccountId32::new([0u8; 32]);
pub const BOB: AccountId = AccountId32::new([1u8; 32]);
pub const CHARLIE: AccountId = AccountId32::new([2u8; 32]);
pub const VALIDATOR_A: AccountId = AccountId32::new([0xAAu8; 32]);
pub const VALIDATOR_B: AccountId = AccountId32::new([0xBBu8; 32]);

frame_support::construct_runtime!(
	pub enum Runtime {
		System: frame_system,
		Balances: pallet_balances,
		Tokens: orml_tokens,
		MultiStaking: multi_staking,
	}
);

type Block = frame_system::mocking::MockBlock<Runtime>;

#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
impl frame_system::Config for Runtime {
	type AccountData = pallet_balances::AccountData<Balance>;
	type AccountId = AccountId;
	type Block = Block;
	type Lookup = IdentityLookup<Self::AccountId>;
}

parameter_types! {
	pub const ExistentialDeposit: Balance = 1;
}

impl pallet_balances::Config for Runtime {
	type AccountStore = frame_system::Pallet<Runtime>;
	type Balance = Balance;
	type DustRemoval = ();
	type RuntimeEvent = RuntimeEvent;
	type ExistentialDeposit = ExistentialDeposit;
	type MaxLocks = ();
	type MaxReserves = ();
	type ReserveIdentifier = [u8; 8];
	type WeightInfo = ();
	type RuntimeHoldReason = RuntimeHoldReason;
	type RuntimeFreezeReason = RuntimeFreezeReason;
	type FreezeIdentifier = ();
	type MaxFreezes = ConstU32<0>;
}

parameter_type_with_key! {
	pub ExistentialDeposits: |_currency_id: CurrencyId| -> Balance {
		0
	};
}

impl orml_tokens::Config for Runtime {
	type Amount = Amount;
	type Balance = Balance;
	type CurrencyId = CurrencyId;
	type DustRemovalWhitelist = Nothing;
	type RuntimeEvent = RuntimeEvent;
	type ExistentialDeposits = ExistentialDeposits;
	type MaxLocks = ConstU32<50>;
	type MaxReserves = ();
	type ReserveIdentifier = [u8; 8];
	type WeightInfo = ();
	type CurrencyHooks = ();
}

impl multi_staking::Config for Runtime {
	type RuntimeEvent = RuntimeEvent;
	type MultiCurrency = Tokens;
	type ControlOrigin = EnsureRoot<AccountId>;
	type Staking = MockStaking;
	type Rewards = MockRewards;
	type Governance = MockGovernance;
	type PalletId = MultiStakingPalletId;
	type WeightInfo = ();
}

thread_local! {
	static VALIDATORS: RefCell<BTreeSet<AccountId>> = RefCell::new(BTreeSet::new());
	static BONDED: RefCell<BTreeMap<(AccountId, AccountId), Balance>> =
		RefCell::new(BTreeMap::new());
	static UNBONDING: RefCell<BTreeMap<(AccountId, AccountId, BlockNumber), Balance>> =
		RefCell::new(BTreeMap::new());
	static WITHDRAW_ADDRESSES: RefCell<BTreeMap<AccountId, AccountId>> =
		RefCell::new(BTreeMap::new());
	static PENDING_REWARDS: RefCell<BTreeMap<AccountId, (CurrencyId, Balance)>> =
		RefCell::new(BTreeMap::new());
	static VOTES: RefCell<Vec<(AccountId, PollIndex, VoteOption)>> = RefCell::new(Vec::new());
	static WEIGHTED_VOTES: RefCell<Vec<(AccountId, PollIndex, Vec<WeightedVote>)>> =
		RefCell::new(Vec::new());
}

fn reset_mock_backends() {
	VALIDATORS.with(|v| v.borrow_mut().clear());
	BONDED.with(|b| b.borrow_mut().clear());
	UNBONDING.with(|u| u.borrow_mut().clear());
	WITHDRAW_ADDRESSES.with(|w| w.borrow_mut().clear());
	PENDING_REWARDS.with(|r| r.borrow_mut().clear());
	VOTES.with(|v| v.borrow_mut().clear());
	WEIGHTED_VOTES.with(|v| v.borrow_mut().clear());
}

/// Bonded balance the mock engine holds for (delegator, validator).
pub fn staking_bonded(delegator: &AccountId, validator: &AccountId) -> Balance {
	BONDED.with(|b| {
		b.borrow().get(&(delegator.clone(), validator.clone())).copied().unwrap_or_default()
	})
}

pub fn staking_unbonding(
	delegator: &AccountId,
	validator: &AccountId,
	height: BlockNumber,
) -> Option<Balance> {
	UNBONDING
		.with(|u| u.borrow().get(&(delegator.clone(), validator.clone(), height)).copied())
}

pub fn set_pending_reward(custody: AccountId, token: CurrencyId, amount: Balance) {
	PENDING_REWARDS.with(|r| r.borrow_mut().insert(custody, (token, amount)));
}

pub fn withdraw_address_of(custody: &AccountId) -> Option<AccountId> {
	WITHDRAW_ADDRESSES.with(|w| w.borrow().get(custody).cloned())
}

pub fn recorded_votes() -> Vec<(AccountId, PollIndex, VoteOption)> {
	VOTES.with(|v| v.borrow().clone())
}

pub fn recorded_weighted_votes() -> Vec<(AccountId, PollIndex, Vec<WeightedVote>)> {
	WEIGHTED_VOTES.with(|v| v.borrow().clone())
}

pub struct MockStaking;
impl StakingBackend<AccountId, Balance, BlockNumber> for MockStaking {
	fn bond_token() -> CurrencyId {
		VLA
	}

	fn create_validator(
		delegator: &AccountId,
		validator: &AccountId,
		_description: Vec<u8>,
		_commission: Permill,
		min_self_bond: Balance,
		amount: Balance,
	) -> DispatchResult {
		if amount < min_self_bond {
			return Err(DispatchError::Other("self bond below minimum"));
		}
		let inserted = VALIDATORS.with(|v| v.borrow_mut().insert(validator.clone()));
		if !inserted {
			return Err(DispatchError::Other("validator already exists"));
		}
		BONDED.with(|b| {
			*b.borrow_mut().entry((delegator.clone(), validator.clone())).or_default() += amount
		});
		Ok(())
	}

	fn edit_validator(
		validator: &AccountId,
		_description: Option<Vec<u8>>,
		_commission: Option<Permill>,
		_min_self_bond: Option<Balance>,
	) -> DispatchResult {
		if VALIDATORS.with(|v| v.borrow().contains(validator)) {
			Ok(())
		} else {
			Err(DispatchError::Other("validator not found"))
		}
	}

	fn delegate(delegator: &AccountId, validator: &AccountId, amount: Balance) -> DispatchResult {
		if !VALIDATORS.with(|v| v.borrow().contains(validator)) {
			return Err(DispatchError::Other("validator not found"));
		}
		BONDED.with(|b| {
			*b.borrow_mut().entry((delegator.clone(), validator.clone())).or_default() += amount
		});
		Ok(())
	}

	fn begin_redelegate(
		delegator: &AccountId,
		src_validator: &AccountId,
		dst_validator: &AccountId,
		amount: Balance,
	) -> DispatchResult {
		if !VALIDATORS.with(|v| v.borrow().contains(dst_validator)) {
			return Err(DispatchError::Other("validator not found"));
		}
		BONDED.with(|b| -> DispatchResult {
			let mut bonded = b.borrow_mut();
			let src_key = (delegator.clone(), src_validator.clone());
			let src_bonded = bonded.get(&src_key).copied().unwrap_or_default();
			let remaining = src_bonded
				.checked_sub(amount)
				.ok_or(DispatchError::Other("insufficient bonded"))?;
			if remaining == 0 {
				bonded.remove(&src_key);
			} else {
				bonded.insert(src_key, remaining);
			}
			*bonded.entry((delegator.clone(), dst_validator.clone())).or_default() += amount;
			Ok(())
		})
	}

	fn undelegate(
		delegator: &AccountId,
		validator: &AccountId,
		amount: Balance,
	) -> Result<BlockNumber, DispatchError> {
		BONDED.with(|b| -> Result<(), DispatchError> {
			let mut bonded = b.borrow_mut();
			let key = (delegator.clone(), validator.clone());
			let current = bonded.get(&key).copied().unwrap_or_default();
			let remaining = current
				.checked_sub(amount)
				.ok_or(DispatchError::Other("insufficient bonded"))?;
			if remaining == 0 {
				bonded.remove(&key);
			} else {
				bonded.insert(key, remaining);
			}
			Ok(())
		})?;
		let creation_height = System::block_number();
		UNBONDING.with(|u| {
			*u.borrow_mut()
				.entry((delegator.clone(), validator.clone(), creation_height))
				.or_default() += amount
		});
		Ok(creation_height)
	}

	fn cancel_unbonding(
		delegator: &AccountId,
		validator: &AccountId,
		creation_height: BlockNumber,
		amount: Balance,
	) -> DispatchResult {
		UNBONDING.with(|u| -> DispatchResult {
			let mut unbonding = u.borrow_mut();
			let key = (delegator.clone(), validator.clone(), creation_height);
			let outstanding = unbonding
				.get(&key)
				.copied()
				.ok_or(DispatchError::Other("unbonding record not found"))?;
			let remaining = outstanding
				.checked_sub(amount)
				.ok_or(DispatchError::Other("insufficient unbonding balance"))?;
			if remaining == 0 {
				unbonding.remove(&key);
			} else {
				unbonding.insert(key, remaining);
			}
			Ok(())
		})?;
		BONDED.with(|b| {
			*b.borrow_mut().entry((delegator.clone(), validator.clone())).or_default() += amount
		});
		Ok(())
	}

	fn bonded(delegator: &AccountId, validator: &AccountId) -> Balance {
		staking_bonded(delegator, validator)
	}

	fn unbonding_balance(
		delegator: &AccountId,
		validator: &AccountId,
		creation_height: BlockNumber,
	) -> Option<Balance> {
		staking_unbonding(delegator, validator, creation_height)
	}
}

pub struct MockRewards;
impl RewardBackend<AccountId, Balance> for MockRewards {
	fn set_withdraw_address(delegator: &AccountId, to: &AccountId) -> DispatchResult {
		WITHDRAW_ADDRESSES.with(|w| w.borrow_mut().insert(delegator.clone(), to.clone()));
		Ok(())
	}

	fn withdraw_reward(
		delegator: &AccountId,
		_validator: &AccountId,
	) -> Result<(CurrencyId, Balance), DispatchError> {
		let (token, amount) = PENDING_REWARDS
			.with(|r| r.borrow_mut().remove(delegator))
			.unwrap_or((VLA, 0));
		if amount > 0 {
			Tokens::deposit(token, delegator, amount)?;
		}
		Ok((token, amount))
	}
}

pub struct MockGovernance;
impl GovernanceBackend<AccountId> for MockGovernance {
	fn vote(who: &AccountId, poll_index: PollIndex, option: VoteOption) -> DispatchResult {
		VOTES.with(|v| v.borrow_mut().push((who.clone(), poll_index, option)));
		Ok(())
	}

	fn vote_weighted(
		who: &AccountId,
		poll_index: PollIndex,
		options: Vec<WeightedVote>,
	) -> DispatchResult {
		WEIGHTED_VOTES.with(|v| v.borrow_mut().push((who.clone(), poll_index, options)));
		Ok(())
	}
}

pub struct ExtBuilder {
	endowed_accounts: Vec<(AccountId, CurrencyId, Balance)>,
}

impl Default for ExtBuilder {
	fn default() -> Self {
		Self { endowed_accounts: vec![] }
	}
}

impl ExtBuilder {
	pub fn balances(mut self, endowed_accounts: Vec<(AccountId, CurrencyId, Balance)>) -> Self {
		self.endowed_accounts = endowed_accounts;
		self
	}

	pub fn build(self) -> sp_io::TestExternalities {
		env_logger::try_init().unwrap_or(());
		reset_mock_backends();

		let mut t = frame_system::GenesisConfig::<Runtime>::default().build_storage().unwrap();

		orml_tokens::GenesisConfig::<Runtime> { balances: self.endowed_accounts }
			.assimilate_storage(&mut t)
			.unwrap();

		let mut ext: sp_io::TestExternalities = t.into();
		ext.execute_with(|| System::set_block_number(1));
		ext
	}
}
