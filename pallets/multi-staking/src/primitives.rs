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

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use sp_core::U256;
use sp_runtime::{
	traits::{AtLeast32BitUnsigned, Zero},
	RuntimeDebug, SaturatedConversion,
};
use sp_std::vec::Vec;
use vela_primitives::CurrencyId;

/// Failures of the pure lock arithmetic, mapped to pallet errors at the
/// dispatch boundary.
#[derive(Eq, PartialEq, RuntimeDebug)]
pub enum LockError {
	InsufficientBalance,
	Overflow,
}

/// A locked collateral position in one denomination.
///
/// `bond_value` is the exact amount of bond currency minted against
/// `amount`; carrying both sides of the conversion means splitting or
/// reversing the position later never re-derives (and never re-rounds) the
/// original exchange.
#[derive(PartialEq, Eq, Clone, Encode, Decode, RuntimeDebug, TypeInfo)]
pub struct StakeToken<Balance> {
	pub currency_id: CurrencyId,
	pub amount: Balance,
	pub bond_value: Balance,
}

impl<Balance> StakeToken<Balance>
where
	Balance: AtLeast32BitUnsigned + Copy,
{
	/// Splits off the slice of this position worth `bond_amount` bond units.
	///
	/// The collateral side is reduced proportionally, rounding down, so the
	/// remainder (if any) stays in the position rather than leaking. Taking
	/// the full `bond_value` returns the position whole.
	pub fn split_bond(&mut self, bond_amount: Balance) -> Result<Self, LockError> {
		if bond_amount > self.bond_value {
			return Err(LockError::InsufficientBalance);
		}
		if bond_amount == self.bond_value {
			let slice = self.clone();
			self.amount = Zero::zero();
			self.bond_value = Zero::zero();
			return Ok(slice);
		}
		let amount_out: Balance = U256::from(self.amount.saturated_into::<u128>())
			.saturating_mul(bond_amount.saturated_into::<u128>().into())
			.checked_div(self.bond_value.saturated_into::<u128>().into())
			.ok_or(LockError::Overflow)?
			.as_u128()
			.saturated_into();
		self.amount = self.amount.checked_sub(&amount_out).ok_or(LockError::Overflow)?;
		self.bond_value = self.bond_value.checked_sub(&bond_amount).ok_or(LockError::Overflow)?;
		Ok(StakeToken { currency_id: self.currency_id, amount: amount_out, bond_value: bond_amount })
	}
}

fn merge_token<Balance>(
	tokens: &mut Vec<StakeToken<Balance>>,
	token: StakeToken<Balance>,
) -> Result<(), LockError>
where
	Balance: AtLeast32BitUnsigned + Copy,
{
	if token.amount.is_zero() && token.bond_value.is_zero() {
		return Ok(());
	}
	match tokens.iter_mut().find(|t| t.currency_id == token.currency_id) {
		Some(entry) => {
			entry.amount = entry.amount.checked_add(&token.amount).ok_or(LockError::Overflow)?;
			entry.bond_value =
				entry.bond_value.checked_add(&token.bond_value).ok_or(LockError::Overflow)?;
		},
		None => tokens.push(token),
	}
	Ok(())
}

/// The custody record of a (delegator, validator) pair: how much of which
/// collateral denomination currently backs the pair, one entry per
/// denomination. Entries with zero amount are removed, never retained.
#[derive(PartialEq, Eq, Clone, Default, Encode, Decode, RuntimeDebug, TypeInfo)]
pub struct StakeLock<Balance> {
	pub tokens: Vec<StakeToken<Balance>>,
}

impl<Balance> StakeLock<Balance>
where
	Balance: AtLeast32BitUnsigned + Copy,
{
	pub fn add_token(&mut self, token: StakeToken<Balance>) -> Result<(), LockError> {
		merge_token(&mut self.tokens, token)
	}

	/// Selects the collateral slice matching a requested bond amount.
	///
	/// The first entry (in insertion order) whose bond value covers the
	/// request is split; the slice is removed from the lock and returned.
	/// No cross-denomination splitting: a request no single entry covers
	/// fails with `InsufficientBalance`.
	pub fn pick_for_bond(&mut self, bond_amount: Balance) -> Result<StakeToken<Balance>, LockError> {
		let index = self
			.tokens
			.iter()
			.position(|t| t.bond_value >= bond_amount)
			.ok_or(LockError::InsufficientBalance)?;
		let slice = self.tokens[index].split_bond(bond_amount)?;
		if self.tokens[index].amount.is_zero() && self.tokens[index].bond_value.is_zero() {
			self.tokens.remove(index);
		}
		Ok(slice)
	}

	pub fn amount_of(&self, currency_id: CurrencyId) -> Balance {
		self.tokens
			.iter()
			.find(|t| t.currency_id == currency_id)
			.map(|t| t.amount)
			.unwrap_or_else(Zero::zero)
	}

	pub fn total_bond_value(&self) -> Balance {
		self.tokens
			.iter()
			.fold(Zero::zero(), |acc: Balance, t| acc.saturating_add(t.bond_value))
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

/// Collateral pending release while the underlying unbonding period
/// elapses, keyed in storage by (delegator, validator, creation height).
/// Undelegations landing on the same creation height merge per currency.
#[derive(PartialEq, Eq, Clone, Default, Encode, Decode, RuntimeDebug, TypeInfo)]
pub struct UnlockEntry<Balance> {
	pub tokens: Vec<StakeToken<Balance>>,
}

impl<Balance> UnlockEntry<Balance>
where
	Balance: AtLeast32BitUnsigned + Copy,
{
	pub fn add_token(&mut self, token: StakeToken<Balance>) -> Result<(), LockError> {
		merge_token(&mut self.tokens, token)
	}

	pub fn total_bond_value(&self) -> Balance {
		self.tokens
			.iter()
			.fold(Zero::zero(), |acc: Balance, t| acc.saturating_add(t.bond_value))
	}
}
