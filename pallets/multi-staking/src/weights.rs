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

//! Weight functions for `vela-multi-staking`.

#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{
	traits::Get,
	weights::{constants::RocksDbWeight, Weight},
};
use sp_std::marker::PhantomData;

/// Weight functions needed for the pallet.
pub trait WeightInfo {
	fn create_validator() -> Weight;
	fn edit_validator() -> Weight;
	fn delegate() -> Weight;
	fn redelegate() -> Weight;
	fn undelegate() -> Weight;
	fn cancel_unbonding() -> Weight;
	fn set_withdraw_address() -> Weight;
	fn withdraw_reward() -> Weight;
	fn vote() -> Weight;
	fn vote_weighted() -> Weight;
	fn set_token_rate() -> Weight;
	fn add_allowed_token() -> Weight;
}

/// Weights for the pallet using the Substrate node's recommended hardware.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn create_validator() -> Weight {
		Weight::from_parts(95_000_000, 6196)
			.saturating_add(T::DbWeight::get().reads(6))
			.saturating_add(T::DbWeight::get().writes(6))
	}
	fn edit_validator() -> Weight {
		Weight::from_parts(30_000_000, 3593).saturating_add(T::DbWeight::get().reads(1))
	}
	fn delegate() -> Weight {
		Weight::from_parts(90_000_000, 6196)
			.saturating_add(T::DbWeight::get().reads(6))
			.saturating_add(T::DbWeight::get().writes(5))
	}
	fn redelegate() -> Weight {
		Weight::from_parts(85_000_000, 6196)
			.saturating_add(T::DbWeight::get().reads(6))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn undelegate() -> Weight {
		Weight::from_parts(85_000_000, 6196)
			.saturating_add(T::DbWeight::get().reads(5))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn cancel_unbonding() -> Weight {
		Weight::from_parts(80_000_000, 6196)
			.saturating_add(T::DbWeight::get().reads(5))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn set_withdraw_address() -> Weight {
		Weight::from_parts(35_000_000, 3593)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn withdraw_reward() -> Weight {
		Weight::from_parts(65_000_000, 6196)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn vote() -> Weight {
		Weight::from_parts(35_000_000, 3593)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn vote_weighted() -> Weight {
		Weight::from_parts(40_000_000, 3593)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_token_rate() -> Weight {
		Weight::from_parts(25_000_000, 3593).saturating_add(T::DbWeight::get().writes(1))
	}
	fn add_allowed_token() -> Weight {
		Weight::from_parts(28_000_000, 3593)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
}

// For backwards compatibility and tests
impl WeightInfo for () {
	fn create_validator() -> Weight {
		Weight::from_parts(95_000_000, 6196)
			.saturating_add(RocksDbWeight::get().reads(6))
			.saturating_add(RocksDbWeight::get().writes(6))
	}
	fn edit_validator() -> Weight {
		Weight::from_parts(30_000_000, 3593).saturating_add(RocksDbWeight::get().reads(1))
	}
	fn delegate() -> Weight {
		Weight::from_parts(90_000_000, 6196)
			.saturating_add(RocksDbWeight::get().reads(6))
			.saturating_add(RocksDbWeight::get().writes(5))
	}
	fn redelegate() -> Weight {
		Weight::from_parts(85_000_000, 6196)
			.saturating_add(RocksDbWeight::get().reads(6))
			.saturating_add(RocksDbWeight::get().writes(3))
	}
	fn undelegate() -> Weight {
		Weight::from_parts(85_000_000, 6196)
			.saturating_add(RocksDbWeight::get().reads(5))
			.saturating_add(RocksDbWeight::get().writes(3))
	}
	fn cancel_unbonding() -> Weight {
		Weight::from_parts(80_000_000, 6196)
			.saturating_add(RocksDbWeight::get().reads(5))
			.saturating_add(RocksDbWeight::get().writes(3))
	}
	fn set_withdraw_address() -> Weight {
		Weight::from_parts(35_000_000, 3593)
			.saturating_add(RocksDbWeight::get().reads(1))
			.saturating_add(RocksDbWeight::get().writes(1))
	}
	fn withdraw_reward() -> Weight {
		Weight::from_parts(65_000_000, 6196)
			.saturating_add(RocksDbWeight::get().reads(3))
			.saturating_add(RocksDbWeight::get().writes(3))
	}
	fn vote() -> Weight {
		Weight::from_parts(35_000_000, 3593)
			.saturating_add(RocksDbWeight::get().reads(1))
			.saturating_add(RocksDbWeight::get().writes(1))
	}
	fn vote_weighted() -> Weight {
		Weight::from_parts(40_000_000, 3593)
			.saturating_add(RocksDbWeight::get().reads(1))
			.saturating_add(RocksDbWeight::get().writes(1))
	}
	fn set_token_rate() -> Weight {
		Weight::from_parts(25_000_000, 3593).saturating_add(RocksDbWeight::get().writes(1))
	}
	fn add_allowed_token() -> Weight {
		Weight::from_parts(28_000_000, 3593)
			.saturating_add(RocksDbWeight::get().reads(2))
			.saturating_add(RocksDbWeight::get().writes(1))
	}
}
