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

use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_runtime::{DispatchError, DispatchResult, Permill, RuntimeDebug};
use sp_std::vec::Vec;
use vela_primitives::{CurrencyId, PollIndex, Ratio};

/// Abstraction over the underlying single-asset proof-of-stake engine.
///
/// Every amount is denominated in the canonical bond currency and every
/// delegator identity passed in is a custody account; the engine never sees
/// collateral denominations or real delegators.
pub trait StakingBackend<AccountId, Balance, BlockNumber> {
	/// The canonical bond currency the engine understands.
	fn bond_token() -> CurrencyId;

	fn create_validator(
		delegator: &AccountId,
		validator: &AccountId,
		description: Vec<u8>,
		commission: Permill,
		min_self_bond: Balance,
		amount: Balance,
	) -> DispatchResult;

	fn edit_validator(
		validator: &AccountId,
		description: Option<Vec<u8>>,
		commission: Option<Permill>,
		min_self_bond: Option<Balance>,
	) -> DispatchResult;

	fn delegate(delegator: &AccountId, validator: &AccountId, amount: Balance) -> DispatchResult;

	fn begin_redelegate(
		delegator: &AccountId,
		src_validator: &AccountId,
		dst_validator: &AccountId,
		amount: Balance,
	) -> DispatchResult;

	/// Starts unbonding. Returns the creation height of the unbonding record,
	/// under which the record can be looked up or cancelled later.
	fn undelegate(
		delegator: &AccountId,
		validator: &AccountId,
		amount: Balance,
	) -> Result<BlockNumber, DispatchError>;

	fn cancel_unbonding(
		delegator: &AccountId,
		validator: &AccountId,
		creation_height: BlockNumber,
		amount: Balance,
	) -> DispatchResult;

	/// Balance currently bonded by a delegator with a validator.
	fn bonded(delegator: &AccountId, validator: &AccountId) -> Balance;

	/// Outstanding balance of the unbonding record created at the given
	/// height, if one exists.
	fn unbonding_balance(
		delegator: &AccountId,
		validator: &AccountId,
		creation_height: BlockNumber,
	) -> Option<Balance>;
}

/// Abstraction over the reward distribution engine.
pub trait RewardBackend<AccountId, Balance> {
	fn set_withdraw_address(delegator: &AccountId, to: &AccountId) -> DispatchResult;

	/// Withdraws pending rewards into the delegator's free balance and
	/// reports the coin actually paid out.
	fn withdraw_reward(
		delegator: &AccountId,
		validator: &AccountId,
	) -> Result<(CurrencyId, Balance), DispatchError>;
}

/// Abstraction over the governance voting engine.
pub trait GovernanceBackend<AccountId> {
	fn vote(who: &AccountId, poll_index: PollIndex, option: VoteOption) -> DispatchResult;

	fn vote_weighted(
		who: &AccountId,
		poll_index: PollIndex,
		options: Vec<WeightedVote>,
	) -> DispatchResult;
}

#[derive(Encode, Decode, Copy, Clone, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub enum VoteOption {
	Yes,
	No,
	Abstain,
	Veto,
}

/// One branch of a split vote. Weights are expected to sum to one; enforcing
/// that is the governance engine's business.
#[derive(Encode, Decode, Copy, Clone, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct WeightedVote {
	pub option: VoteOption,
	pub weight: Ratio,
}

/// Read-only view of the multi-staking ledger, for other pallets.
pub trait MultiStakingInterface<AccountId, Balance> {
	fn custody_account(delegator: &AccountId) -> AccountId;

	fn is_allowed_token(validator: &AccountId, token: CurrencyId) -> bool;

	fn locked_tokens(delegator: &AccountId, validator: &AccountId)
		-> Vec<(CurrencyId, Balance)>;

	/// Sum of the bond value locked for a (delegator, validator) pair.
	fn bonded_value(delegator: &AccountId, validator: &AccountId) -> Balance;
}
