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

use crate::*;
use frame_support::pallet_prelude::*;
use frame_system::pallet_prelude::BlockNumberFor;
use frame_support::traits::ExistenceRequirement;
use orml_traits::MultiCurrency;
use sp_io::hashing::blake2_256;
use sp_runtime::{
	traits::{TrailingZeroInput, Zero},
	DispatchError, FixedPointNumber, Permill, SaturatedConversion,
};
use sp_std::vec::Vec;
use vela_primitives::CurrencyId;

impl<T: Config> From<LockError> for Error<T> {
	fn from(e: LockError) -> Self {
		match e {
			LockError::InsufficientBalance => Error::<T>::InsufficientLockedBalance,
			LockError::Overflow => Error::<T>::CalculationOverflow,
		}
	}
}

impl<T: Config> Pallet<T> {
	/// The custody account holding stake on behalf of a delegator. Derived
	/// by hashing the pallet id together with the full delegator id, so it
	/// is deterministic and collision free across delegators.
	pub fn custody_account(delegator: &AccountIdOf<T>) -> AccountIdOf<T> {
		let entropy = (T::PalletId::get().0, delegator).using_encoded(blake2_256);
		Decode::decode(&mut TrailingZeroInput::new(entropy.as_ref()))
			.expect("infinite length input; no invalid inputs for type; qed")
	}

	/// Resolves the custody account of a delegator, registering it on first
	/// use. Re-registration is a no-op.
	pub(crate) fn ensure_intermediary(delegator: &AccountIdOf<T>) -> AccountIdOf<T> {
		match IntermediaryAccounts::<T>::get(delegator) {
			Some(custody) => custody,
			None => {
				let custody = Self::custody_account(delegator);
				IntermediaryAccounts::<T>::insert(delegator, &custody);
				custody
			},
		}
	}

	/// Converts a collateral amount into bond units at the registered rate,
	/// rounding down.
	fn bond_value_of(
		token: CurrencyId,
		amount: BalanceOf<T>,
	) -> Result<BalanceOf<T>, DispatchError> {
		let rate = TokenRates::<T>::get(token).ok_or(Error::<T>::TokenRateNotSet)?;
		let bond_value = rate
			.checked_mul_int(amount.saturated_into::<u128>())
			.ok_or(Error::<T>::CalculationOverflow)?;
		Ok(bond_value.saturated_into())
	}

	/// Takes collateral into custody and mints the already-computed bond
	/// amount to the custody account.
	fn lock_and_mint(
		delegator: &AccountIdOf<T>,
		custody: &AccountIdOf<T>,
		token: CurrencyId,
		amount: BalanceOf<T>,
		bond_value: BalanceOf<T>,
	) -> DispatchResult {
		T::MultiCurrency::transfer(token, delegator, custody, amount, ExistenceRequirement::AllowDeath)?;
		T::MultiCurrency::deposit(T::Staking::bond_token(), custody, bond_value)
	}

	fn add_to_lock(
		delegator: &AccountIdOf<T>,
		validator: &AccountIdOf<T>,
		token: StakeToken<BalanceOf<T>>,
	) -> DispatchResult {
		Locks::<T>::try_mutate(delegator, validator, |maybe_lock| -> DispatchResult {
			let lock = maybe_lock.get_or_insert_with(Default::default);
			lock.add_token(token).map_err(Error::<T>::from)?;
			Ok(())
		})
	}

	pub(crate) fn create_validator_inner(
		delegator: AccountIdOf<T>,
		validator: AccountIdOf<T>,
		description: Vec<u8>,
		commission: Permill,
		min_self_bond: BalanceOf<T>,
		token: CurrencyId,
		amount: BalanceOf<T>,
	) -> DispatchResult {
		ensure!(!amount.is_zero(), Error::<T>::AmountZero);
		let bond_value = Self::bond_value_of(token, amount)?;

		let custody = Self::ensure_intermediary(&delegator);
		Self::lock_and_mint(&delegator, &custody, token, amount, bond_value)?;
		Self::add_to_lock(
			&delegator,
			&validator,
			StakeToken { currency_id: token, amount, bond_value },
		)?;

		AllowedTokens::<T>::insert(&validator, token, ());

		T::Staking::create_validator(
			&custody,
			&validator,
			description,
			commission,
			min_self_bond,
			bond_value,
		)?;

		Self::deposit_event(Event::ValidatorCreated {
			delegator,
			validator,
			token,
			amount,
			bond_value,
		});
		Ok(())
	}

	pub(crate) fn delegate_inner(
		delegator: AccountIdOf<T>,
		validator: AccountIdOf<T>,
		token: CurrencyId,
		amount: BalanceOf<T>,
	) -> DispatchResult {
		ensure!(!amount.is_zero(), Error::<T>::AmountZero);
		ensure!(AllowedTokens::<T>::contains_key(&validator, token), Error::<T>::DeniedToken);
		let bond_value = Self::bond_value_of(token, amount)?;

		let custody = Self::ensure_intermediary(&delegator);
		Self::lock_and_mint(&delegator, &custody, token, amount, bond_value)?;
		Self::add_to_lock(
			&delegator,
			&validator,
			StakeToken { currency_id: token, amount, bond_value },
		)?;

		T::Staking::delegate(&custody, &validator, bond_value)?;

		Self::deposit_event(Event::Delegated { delegator, validator, token, amount, bond_value });
		Ok(())
	}

	pub(crate) fn redelegate_inner(
		delegator: AccountIdOf<T>,
		src_validator: AccountIdOf<T>,
		dst_validator: AccountIdOf<T>,
		bond_amount: BalanceOf<T>,
	) -> DispatchResult {
		ensure!(!bond_amount.is_zero(), Error::<T>::AmountZero);

		let mut from_lock =
			Locks::<T>::get(&delegator, &src_validator).ok_or(Error::<T>::LockNotFound)?;
		let slice = from_lock.pick_for_bond(bond_amount).map_err(Error::<T>::from)?;
		ensure!(
			AllowedTokens::<T>::contains_key(&src_validator, slice.currency_id) &&
				AllowedTokens::<T>::contains_key(&dst_validator, slice.currency_id),
			Error::<T>::DeniedToken
		);

		let custody = Self::ensure_intermediary(&delegator);
		let token = slice.currency_id;
		let amount = slice.amount;
		// Never instruct a move of more than the engine actually holds for
		// the source validator.
		let bond_value = slice.bond_value.min(T::Staking::bonded(&custody, &src_validator));

		let mut to_lock = Locks::<T>::get(&delegator, &dst_validator).unwrap_or_default();
		to_lock.add_token(slice).map_err(Error::<T>::from)?;

		T::Staking::begin_redelegate(&custody, &src_validator, &dst_validator, bond_value)?;

		if from_lock.is_empty() {
			Locks::<T>::remove(&delegator, &src_validator);
		} else {
			Locks::<T>::insert(&delegator, &src_validator, from_lock);
		}
		Locks::<T>::insert(&delegator, &dst_validator, to_lock);

		Self::deposit_event(Event::Redelegated {
			delegator,
			src_validator,
			dst_validator,
			token,
			amount,
			bond_value,
		});
		Ok(())
	}

	pub(crate) fn undelegate_inner(
		delegator: AccountIdOf<T>,
		validator: AccountIdOf<T>,
		bond_amount: BalanceOf<T>,
	) -> DispatchResult {
		ensure!(!bond_amount.is_zero(), Error::<T>::AmountZero);

		let mut lock = Locks::<T>::get(&delegator, &validator).ok_or(Error::<T>::LockNotFound)?;
		let slice = lock.pick_for_bond(bond_amount).map_err(Error::<T>::from)?;
		ensure!(
			AllowedTokens::<T>::contains_key(&validator, slice.currency_id),
			Error::<T>::DeniedToken
		);

		let custody = Self::ensure_intermediary(&delegator);
		let token = slice.currency_id;
		let amount = slice.amount;
		let bond_value = slice.bond_value;

		let unlock_height = T::Staking::undelegate(&custody, &validator, bond_value)?;

		if lock.is_empty() {
			Locks::<T>::remove(&delegator, &validator);
		} else {
			Locks::<T>::insert(&delegator, &validator, lock);
		}
		Unlocks::<T>::try_mutate(
			(delegator.clone(), validator.clone(), unlock_height),
			|maybe_entry| -> DispatchResult {
				let entry = maybe_entry.get_or_insert_with(Default::default);
				entry.add_token(slice).map_err(Error::<T>::from)?;
				Ok(())
			},
		)?;

		Self::deposit_event(Event::Undelegated {
			delegator,
			validator,
			token,
			amount,
			bond_value,
			unlock_height,
		});
		Ok(())
	}

	pub(crate) fn cancel_unbonding_inner(
		delegator: AccountIdOf<T>,
		validator: AccountIdOf<T>,
		creation_height: BlockNumberFor<T>,
		token: CurrencyId,
		amount: BalanceOf<T>,
	) -> DispatchResult {
		ensure!(!amount.is_zero(), Error::<T>::AmountZero);
		ensure!(AllowedTokens::<T>::contains_key(&validator, token), Error::<T>::DeniedToken);

		let custody = Self::ensure_intermediary(&delegator);
		let key = (delegator.clone(), validator.clone(), creation_height);
		let entry = Unlocks::<T>::get(key.clone()).ok_or(Error::<T>::UnlockEntryNotFound)?;
		// The bond amount still outstanding is the engine's record, not ours;
		// only full-entry cancellation is supported.
		let outstanding = T::Staking::unbonding_balance(&custody, &validator, creation_height)
			.ok_or(Error::<T>::UnlockEntryNotFound)?;

		T::Staking::cancel_unbonding(&custody, &validator, creation_height, outstanding)?;

		for unlock_token in entry.tokens.into_iter() {
			Self::add_to_lock(&delegator, &validator, unlock_token)?;
		}
		Unlocks::<T>::remove(key);

		Self::deposit_event(Event::UnbondingCancelled {
			delegator,
			validator,
			creation_height,
			bond_value: outstanding,
		});
		Ok(())
	}

	pub(crate) fn withdraw_reward_inner(
		delegator: AccountIdOf<T>,
		validator: AccountIdOf<T>,
	) -> DispatchResult {
		let custody = Self::ensure_intermediary(&delegator);
		let (token, amount) = T::Rewards::withdraw_reward(&custody, &validator)?;
		if !amount.is_zero() {
			T::MultiCurrency::transfer(token, &custody, &delegator, amount, ExistenceRequirement::AllowDeath)?;
		}

		Self::deposit_event(Event::RewardWithdrawn { delegator, validator, token, amount });
		Ok(())
	}

	/// Completes a matured unbonding: burns the unbonded bond coin from
	/// custody and returns the original collateral to the delegator. Called
	/// by the runtime once the engine reports the unbonding record at
	/// `creation_height` as released.
	pub fn unlock_matured(
		delegator: &AccountIdOf<T>,
		validator: &AccountIdOf<T>,
		creation_height: BlockNumberFor<T>,
	) -> DispatchResult {
		let key = (delegator.clone(), validator.clone(), creation_height);
		let entry = Unlocks::<T>::get(key.clone()).ok_or(Error::<T>::UnlockEntryNotFound)?;
		let custody = Self::custody_account(delegator);

		log::debug!(
			target: "runtime::multi-staking",
			"releasing matured unlock for {:?} at height {:?}",
			delegator,
			creation_height,
		);

		let bond_value = entry.total_bond_value();
		T::MultiCurrency::withdraw(T::Staking::bond_token(), &custody, bond_value, ExistenceRequirement::AllowDeath)?;
		for unlock_token in entry.tokens.into_iter() {
			T::MultiCurrency::transfer(
				unlock_token.currency_id,
				&custody,
				delegator,
				unlock_token.amount,
				ExistenceRequirement::AllowDeath,
			)?;
		}
		Unlocks::<T>::remove(key);

		Self::deposit_event(Event::UnlockMatured {
			delegator: delegator.clone(),
			validator: validator.clone(),
			creation_height,
			bond_value,
		});
		Ok(())
	}
}

impl<T: Config> MultiStakingInterface<AccountIdOf<T>, BalanceOf<T>> for Pallet<T> {
	fn custody_account(delegator: &AccountIdOf<T>) -> AccountIdOf<T> {
		Pallet::<T>::custody_account(delegator)
	}

	fn is_allowed_token(validator: &AccountIdOf<T>, token: CurrencyId) -> bool {
		AllowedTokens::<T>::contains_key(validator, token)
	}

	fn locked_tokens(
		delegator: &AccountIdOf<T>,
		validator: &AccountIdOf<T>,
	) -> Vec<(CurrencyId, BalanceOf<T>)> {
		Locks::<T>::get(delegator, validator)
			.map(|lock| lock.tokens.iter().map(|t| (t.currency_id, t.amount)).collect())
			.unwrap_or_default()
	}

	fn bonded_value(delegator: &AccountIdOf<T>, validator: &AccountIdOf<T>) -> BalanceOf<T> {
		Locks::<T>::get(delegator, validator)
			.map(|lock| lock.total_bond_value())
			.unwrap_or_else(Zero::zero)
	}
}
