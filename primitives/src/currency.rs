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

//! Currency identifiers for the Vela chain.
//!
//! `VLA` is the canonical bond asset the underlying staking machinery
//! understands; every other currency is a collateral candidate.

use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use sp_runtime::RuntimeDebug;

/// The native bond currency.
pub const VLA: CurrencyId = CurrencyId::Native(TokenSymbol::VLA);
/// Registered collateral currencies.
pub const LUM: CurrencyId = CurrencyId::Token(TokenSymbol::LUM);
pub const STC: CurrencyId = CurrencyId::Token(TokenSymbol::STC);
pub const OBR: CurrencyId = CurrencyId::Token(TokenSymbol::OBR);

/// Index of a dynamically registered token.
pub type TokenId = u8;

#[derive(
	Encode,
	Decode,
	Eq,
	PartialEq,
	Copy,
	Clone,
	RuntimeDebug,
	PartialOrd,
	Ord,
	TypeInfo,
	MaxEncodedLen,
	Serialize,
	Deserialize,
)]
#[repr(u8)]
pub enum TokenSymbol {
	VLA = 0,
	LUM = 1,
	STC = 2,
	OBR = 3,
}

impl TryFrom<u8> for TokenSymbol {
	type Error = ();

	fn try_from(v: u8) -> Result<Self, Self::Error> {
		match v {
			0 => Ok(TokenSymbol::VLA),
			1 => Ok(TokenSymbol::LUM),
			2 => Ok(TokenSymbol::STC),
			3 => Ok(TokenSymbol::OBR),
			_ => Err(()),
		}
	}
}

#[derive(
	Encode,
	Decode,
	Eq,
	PartialEq,
	Copy,
	Clone,
	RuntimeDebug,
	PartialOrd,
	Ord,
	TypeInfo,
	MaxEncodedLen,
	Serialize,
	Deserialize,
)]
pub enum CurrencyId {
	/// The chain's own token.
	Native(TokenSymbol),
	/// A well-known external token.
	Token(TokenSymbol),
	/// A token registered after genesis, identified by index.
	Token2(TokenId),
}

impl CurrencyId {
	pub fn is_native(&self) -> bool {
		matches!(self, CurrencyId::Native(_))
	}

	pub fn is_token(&self) -> bool {
		matches!(self, CurrencyId::Token(_) | CurrencyId::Token2(_))
	}
}

impl Default for CurrencyId {
	fn default() -> Self {
		VLA
	}
}
