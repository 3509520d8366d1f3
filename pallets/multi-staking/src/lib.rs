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

//! # Multi-Staking Pallet
//!
//! Lets a delegator back a single-bond-asset validator with any collateral
//! token that validator accepts. Deposited collateral is held under a
//! derived custody account, converted into the canonical bond currency and
//! pushed into the underlying staking engine, which never sees anything but
//! bond-denominated stake. Undelegation, redelegation and cancellation
//! reverse the conversion exactly, including partial and multi-step
//! reversals, so no rounding ever leaks value in either direction.

// Ensure we're `no_std` when compiling for Wasm.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

mod impls;
pub mod primitives;
pub mod traits;
pub mod weights;

use frame_support::{pallet_prelude::*, PalletId};
use frame_system::pallet_prelude::*;
use orml_traits::MultiCurrency;
use sp_runtime::{traits::Zero, Permill};
use sp_std::vec::Vec;
use vela_primitives::{CurrencyId, PollIndex, Rate};

pub use pallet::*;
pub use primitives::*;
pub use traits::*;
pub use weights::WeightInfo;

#[allow(type_alias_bounds)]
pub type AccountIdOf<T> = <T as frame_system::Config>::AccountId;

#[allow(type_alias_bounds)]
pub type BalanceOf<T: Config> =
	<<T as Config>::MultiCurrency as MultiCurrency<AccountIdOf<T>>>::Balance;

#[allow(type_alias_bounds)]
pub type StakeLockOf<T: Config> = StakeLock<BalanceOf<T>>;

#[allow(type_alias_bounds)]
pub type UnlockEntryOf<T: Config> = UnlockEntry<BalanceOf<T>>;

#[frame_support::pallet]
pub mod pallet {
	use super::*;

	#[pallet::pallet]
	#[pallet::without_storage_info]
	pub struct Pallet<T>(_);

	#[pallet::config]
	pub trait Config: frame_system::Config {
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// Currency operations handler, covering collateral custody as well
		/// as bond-coin issuance.
		type MultiCurrency: MultiCurrency<AccountIdOf<Self>, CurrencyId = CurrencyId>;

		/// The only origin that can register token rates and allow-list
		/// collateral tokens.
		type ControlOrigin: EnsureOrigin<Self::RuntimeOrigin>;

		/// The underlying single-asset staking engine.
		type Staking: StakingBackend<AccountIdOf<Self>, BalanceOf<Self>, BlockNumberFor<Self>>;

		/// The reward distribution engine.
		type Rewards: RewardBackend<AccountIdOf<Self>, BalanceOf<Self>>;

		/// The governance voting engine.
		type Governance: GovernanceBackend<AccountIdOf<Self>>;

		/// Custody accounts are derived from this pallet id.
		#[pallet::constant]
		type PalletId: Get<PalletId>;

		/// Set default weight.
		type WeightInfo: WeightInfo;
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		ValidatorCreated {
			delegator: AccountIdOf<T>,
			validator: AccountIdOf<T>,
			token: CurrencyId,
			amount: BalanceOf<T>,
			bond_value: BalanceOf<T>,
		},
		ValidatorEdited {
			validator: AccountIdOf<T>,
		},
		Delegated {
			delegator: AccountIdOf<T>,
			validator: AccountIdOf<T>,
			token: CurrencyId,
			amount: BalanceOf<T>,
			bond_value: BalanceOf<T>,
		},
		Redelegated {
			delegator: AccountIdOf<T>,
			src_validator: AccountIdOf<T>,
			dst_validator: AccountIdOf<T>,
			token: CurrencyId,
			amount: BalanceOf<T>,
			bond_value: BalanceOf<T>,
		},
		Undelegated {
			delegator: AccountIdOf<T>,
			validator: AccountIdOf<T>,
			token: CurrencyId,
			amount: BalanceOf<T>,
			bond_value: BalanceOf<T>,
			unlock_height: BlockNumberFor<T>,
		},
		UnbondingCancelled {
			delegator: AccountIdOf<T>,
			validator: AccountIdOf<T>,
			creation_height: BlockNumberFor<T>,
			bond_value: BalanceOf<T>,
		},
		UnlockMatured {
			delegator: AccountIdOf<T>,
			validator: AccountIdOf<T>,
			creation_height: BlockNumberFor<T>,
			bond_value: BalanceOf<T>,
		},
		WithdrawAddressSet {
			delegator: AccountIdOf<T>,
			withdraw_address: AccountIdOf<T>,
		},
		RewardWithdrawn {
			delegator: AccountIdOf<T>,
			validator: AccountIdOf<T>,
			token: CurrencyId,
			amount: BalanceOf<T>,
		},
		Voted {
			delegator: AccountIdOf<T>,
			poll_index: PollIndex,
			option: VoteOption,
		},
		WeightedVoteCast {
			delegator: AccountIdOf<T>,
			poll_index: PollIndex,
		},
		TokenRateSet {
			token: CurrencyId,
			rate: Rate,
		},
		AllowedTokenAdded {
			validator: AccountIdOf<T>,
			token: CurrencyId,
		},
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The token is not an allowed collateral for the target validator.
		DeniedToken,
		/// The operation requires a lock that does not exist.
		LockNotFound,
		/// The requested amount exceeds what the lock holds.
		InsufficientLockedBalance,
		/// No pending unbonding record at the given creation height.
		UnlockEntryNotFound,
		/// No conversion rate registered for the token.
		TokenRateNotSet,
		/// A conversion rate must be strictly positive.
		InvalidRate,
		AmountZero,
		CalculationOverflow,
	}

	/// Conversion rate of each registered collateral token into the bond
	/// currency. Re-setting a rate only affects future locks; existing lock
	/// entries keep the conversion they were created with.
	#[pallet::storage]
	#[pallet::getter(fn token_rate)]
	pub type TokenRates<T: Config> = StorageMap<_, Twox64Concat, CurrencyId, Rate, OptionQuery>;

	/// Collateral tokens each validator accepts as backing.
	#[pallet::storage]
	#[pallet::getter(fn allowed_token)]
	pub type AllowedTokens<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		AccountIdOf<T>,
		Twox64Concat,
		CurrencyId,
		(),
		OptionQuery,
	>;

	/// Custody account registered for each delegator. One per delegator,
	/// independent of validator; registration is lazy and idempotent.
	#[pallet::storage]
	#[pallet::getter(fn intermediary_account)]
	pub type IntermediaryAccounts<T: Config> =
		StorageMap<_, Blake2_128Concat, AccountIdOf<T>, AccountIdOf<T>, OptionQuery>;

	/// The multi-asset lock ledger: collateral currently backing each
	/// (delegator, validator) pair.
	#[pallet::storage]
	#[pallet::getter(fn locks)]
	pub type Locks<T: Config> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		AccountIdOf<T>,
		Blake2_128Concat,
		AccountIdOf<T>,
		StakeLockOf<T>,
		OptionQuery,
	>;

	/// Collateral pending release, keyed by (delegator, validator, creation
	/// height of the underlying unbonding record).
	#[pallet::storage]
	#[pallet::getter(fn unlocks)]
	pub type Unlocks<T: Config> = StorageNMap<
		_,
		(
			NMapKey<Blake2_128Concat, AccountIdOf<T>>,
			NMapKey<Blake2_128Concat, AccountIdOf<T>>,
			NMapKey<Twox64Concat, BlockNumberFor<T>>,
		),
		UnlockEntryOf<T>,
		OptionQuery,
	>;

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Creates a validator backed by collateral. The collateral token
		/// becomes the first allowed token of the new validator.
		#[pallet::call_index(0)]
		#[pallet::weight(T::WeightInfo::create_validator())]
		pub fn create_validator(
			origin: OriginFor<T>,
			validator: AccountIdOf<T>,
			description: Vec<u8>,
			commission: Permill,
			min_self_bond: BalanceOf<T>,
			token: CurrencyId,
			amount: BalanceOf<T>,
		) -> DispatchResult {
			let delegator = ensure_signed(origin)?;
			Self::create_validator_inner(
				delegator,
				validator,
				description,
				commission,
				min_self_bond,
				token,
				amount,
			)
		}

		/// Forwards a validator description change to the staking engine.
		#[pallet::call_index(1)]
		#[pallet::weight(T::WeightInfo::edit_validator())]
		pub fn edit_validator(
			origin: OriginFor<T>,
			description: Option<Vec<u8>>,
			commission: Option<Permill>,
			min_self_bond: Option<BalanceOf<T>>,
		) -> DispatchResult {
			let validator = ensure_signed(origin)?;
			T::Staking::edit_validator(&validator, description, commission, min_self_bond)?;
			Self::deposit_event(Event::ValidatorEdited { validator });
			Ok(())
		}

		/// Locks `amount` of `token` as backing for `validator` and stakes
		/// the converted bond amount.
		#[pallet::call_index(2)]
		#[pallet::weight(T::WeightInfo::delegate())]
		pub fn delegate(
			origin: OriginFor<T>,
			validator: AccountIdOf<T>,
			token: CurrencyId,
			amount: BalanceOf<T>,
		) -> DispatchResult {
			let delegator = ensure_signed(origin)?;
			Self::delegate_inner(delegator, validator, token, amount)
		}

		/// Moves locked collateral worth `bond_amount` bond units from one
		/// validator to another.
		#[pallet::call_index(3)]
		#[pallet::weight(T::WeightInfo::redelegate())]
		pub fn redelegate(
			origin: OriginFor<T>,
			src_validator: AccountIdOf<T>,
			dst_validator: AccountIdOf<T>,
			bond_amount: BalanceOf<T>,
		) -> DispatchResult {
			let delegator = ensure_signed(origin)?;
			Self::redelegate_inner(delegator, src_validator, dst_validator, bond_amount)
		}

		/// Unstakes collateral worth `bond_amount` bond units. The removed
		/// collateral is parked in an unlock record until the underlying
		/// unbonding period elapses.
		#[pallet::call_index(4)]
		#[pallet::weight(T::WeightInfo::undelegate())]
		pub fn undelegate(
			origin: OriginFor<T>,
			validator: AccountIdOf<T>,
			bond_amount: BalanceOf<T>,
		) -> DispatchResult {
			let delegator = ensure_signed(origin)?;
			Self::undelegate_inner(delegator, validator, bond_amount)
		}

		/// Cancels the unbonding record created at `creation_height` in its
		/// entirety and returns its collateral to the lock. Partial
		/// cancellation is not supported.
		#[pallet::call_index(5)]
		#[pallet::weight(T::WeightInfo::cancel_unbonding())]
		pub fn cancel_unbonding(
			origin: OriginFor<T>,
			validator: AccountIdOf<T>,
			creation_height: BlockNumberFor<T>,
			token: CurrencyId,
			amount: BalanceOf<T>,
		) -> DispatchResult {
			let delegator = ensure_signed(origin)?;
			Self::cancel_unbonding_inner(delegator, validator, creation_height, token, amount)
		}

		/// Routes the delegator's reward withdraw address through the custody
		/// account to the distribution engine.
		#[pallet::call_index(6)]
		#[pallet::weight(T::WeightInfo::set_withdraw_address())]
		pub fn set_withdraw_address(
			origin: OriginFor<T>,
			withdraw_address: AccountIdOf<T>,
		) -> DispatchResult {
			let delegator = ensure_signed(origin)?;
			let custody = Self::ensure_intermediary(&delegator);
			T::Rewards::set_withdraw_address(&custody, &withdraw_address)?;
			Self::deposit_event(Event::WithdrawAddressSet { delegator, withdraw_address });
			Ok(())
		}

		/// Withdraws staking rewards accrued by the custody account and
		/// forwards them to the delegator.
		#[pallet::call_index(7)]
		#[pallet::weight(T::WeightInfo::withdraw_reward())]
		pub fn withdraw_reward(
			origin: OriginFor<T>,
			validator: AccountIdOf<T>,
		) -> DispatchResult {
			let delegator = ensure_signed(origin)?;
			Self::withdraw_reward_inner(delegator, validator)
		}

		/// Casts a governance vote with the custody identity.
		#[pallet::call_index(8)]
		#[pallet::weight(T::WeightInfo::vote())]
		pub fn vote(
			origin: OriginFor<T>,
			poll_index: PollIndex,
			option: VoteOption,
		) -> DispatchResult {
			let delegator = ensure_signed(origin)?;
			let custody = Self::ensure_intermediary(&delegator);
			T::Governance::vote(&custody, poll_index, option)?;
			Self::deposit_event(Event::Voted { delegator, poll_index, option });
			Ok(())
		}

		/// Casts a split governance vote with the custody identity.
		#[pallet::call_index(9)]
		#[pallet::weight(T::WeightInfo::vote_weighted())]
		pub fn vote_weighted(
			origin: OriginFor<T>,
			poll_index: PollIndex,
			options: Vec<WeightedVote>,
		) -> DispatchResult {
			let delegator = ensure_signed(origin)?;
			let custody = Self::ensure_intermediary(&delegator);
			T::Governance::vote_weighted(&custody, poll_index, options)?;
			Self::deposit_event(Event::WeightedVoteCast { delegator, poll_index });
			Ok(())
		}

		/// Registers or updates the conversion rate of a collateral token.
		/// Only future locks observe the new rate.
		#[pallet::call_index(10)]
		#[pallet::weight(T::WeightInfo::set_token_rate())]
		pub fn set_token_rate(origin: OriginFor<T>, token: CurrencyId, rate: Rate) -> DispatchResult {
			T::ControlOrigin::ensure_origin(origin)?;

			ensure!(!rate.is_zero(), Error::<T>::InvalidRate);
			TokenRates::<T>::insert(token, rate);

			Self::deposit_event(Event::TokenRateSet { token, rate });
			Ok(())
		}

		/// Allow-lists a collateral token for a validator. A no-op when the
		/// pair is already allowed.
		#[pallet::call_index(11)]
		#[pallet::weight(T::WeightInfo::add_allowed_token())]
		pub fn add_allowed_token(
			origin: OriginFor<T>,
			validator: AccountIdOf<T>,
			token: CurrencyId,
		) -> DispatchResult {
			T::ControlOrigin::ensure_origin(origin)?;

			ensure!(TokenRates::<T>::contains_key(token), Error::<T>::TokenRateNotSet);
			if !AllowedTokens::<T>::contains_key(&validator, token) {
				AllowedTokens::<T>::insert(&validator, token, ());
				Self::deposit_event(Event::AllowedTokenAdded { validator, token });
			}

			Ok(())
		}
	}
}
