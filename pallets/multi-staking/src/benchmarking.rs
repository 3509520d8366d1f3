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

#![cfg(feature = "runtime-benchmarks")]

use crate::{Pallet as MultiStaking, *};
use frame_benchmarking::v1::{account, benchmarks, whitelisted_caller, BenchmarkError};
use frame_support::assert_ok;
use frame_system::RawOrigin;
use orml_traits::MultiCurrency;
use sp_runtime::{traits::UniqueSaturatedFrom, FixedU128, Permill};
use sp_std::vec::Vec;
use vela_primitives::{CurrencyId, TokenSymbol};

const SEED: u32 = 0;

fn collateral_token<T: Config>() -> Result<CurrencyId, BenchmarkError> {
	let origin =
		T::ControlOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
	let token = CurrencyId::Token(TokenSymbol::LUM);
	assert_ok!(MultiStaking::<T>::set_token_rate(origin, token, FixedU128::from_rational(1, 1)));
	Ok(token)
}

fn funded_account<T: Config>(name: &'static str, token: CurrencyId) -> AccountIdOf<T> {
	let who: AccountIdOf<T> = if name == "caller" { whitelisted_caller() } else { account(name, 0, SEED) };
	let amount = BalanceOf::<T>::unique_saturated_from(1_000_000u128);
	assert_ok!(T::MultiCurrency::deposit(token, &who, amount));
	who
}

fn bench_amount<T: Config>(amount: u128) -> BalanceOf<T> {
	BalanceOf::<T>::unique_saturated_from(amount)
}

fn setup_validator<T: Config>(token: CurrencyId) -> AccountIdOf<T> {
	let operator = funded_account::<T>("operator", token);
	let validator: AccountIdOf<T> = account("validator", 0, SEED);
	assert_ok!(MultiStaking::<T>::create_validator(
		RawOrigin::Signed(operator).into(),
		validator.clone(),
		Vec::new(),
		Permill::from_percent(10),
		bench_amount::<T>(1),
		token,
		bench_amount::<T>(1_000),
	));
	validator
}

benchmarks! {
	set_token_rate {
		let origin = T::ControlOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
		let token = CurrencyId::Token(TokenSymbol::LUM);
	}: _<T::RuntimeOrigin>(origin, token, FixedU128::from_rational(1, 1))

	add_allowed_token {
		let token = collateral_token::<T>()?;
		let origin = T::ControlOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
		let validator: AccountIdOf<T> = account("validator", 0, SEED);
	}: _<T::RuntimeOrigin>(origin, validator, token)

	create_validator {
		let token = collateral_token::<T>()?;
		let caller = funded_account::<T>("caller", token);
		let validator: AccountIdOf<T> = account("validator", 0, SEED);
	}: _(RawOrigin::Signed(caller), validator, Vec::new(), Permill::from_percent(10), bench_amount::<T>(1), token, bench_amount::<T>(1_000))

	delegate {
		let token = collateral_token::<T>()?;
		let validator = setup_validator::<T>(token);
		let caller = funded_account::<T>("caller", token);
	}: _(RawOrigin::Signed(caller), validator, token, bench_amount::<T>(1_000))

	undelegate {
		let token = collateral_token::<T>()?;
		let validator = setup_validator::<T>(token);
		let caller = funded_account::<T>("caller", token);
		assert_ok!(MultiStaking::<T>::delegate(
			RawOrigin::Signed(caller.clone()).into(),
			validator.clone(),
			token,
			bench_amount::<T>(1_000),
		));
	}: _(RawOrigin::Signed(caller), validator, bench_amount::<T>(400))

	redelegate {
		let token = collateral_token::<T>()?;
		let src_validator = setup_validator::<T>(token);
		let dst_operator = funded_account::<T>("dst-operator", token);
		let dst_validator: AccountIdOf<T> = account("dst-validator", 0, SEED);
		assert_ok!(MultiStaking::<T>::create_validator(
			RawOrigin::Signed(dst_operator).into(),
			dst_validator.clone(),
			Vec::new(),
			Permill::from_percent(10),
			bench_amount::<T>(1),
			token,
			bench_amount::<T>(1_000),
		));
		let caller = funded_account::<T>("caller", token);
		assert_ok!(MultiStaking::<T>::delegate(
			RawOrigin::Signed(caller.clone()).into(),
			src_validator.clone(),
			token,
			bench_amount::<T>(1_000),
		));
	}: _(RawOrigin::Signed(caller), src_validator, dst_validator, bench_amount::<T>(400))

	cancel_unbonding {
		let token = collateral_token::<T>()?;
		let validator = setup_validator::<T>(token);
		let caller = funded_account::<T>("caller", token);
		assert_ok!(MultiStaking::<T>::delegate(
			RawOrigin::Signed(caller.clone()).into(),
			validator.clone(),
			token,
			bench_amount::<T>(1_000),
		));
		assert_ok!(MultiStaking::<T>::undelegate(
			RawOrigin::Signed(caller.clone()).into(),
			validator.clone(),
			bench_amount::<T>(400),
		));
		let (_, _, creation_height) = Unlocks::<T>::iter_keys().next().ok_or(BenchmarkError::Stop("no unlock entry"))?;
	}: _(RawOrigin::Signed(caller), validator, creation_height, token, bench_amount::<T>(400))

	set_withdraw_address {
		let caller: AccountIdOf<T> = whitelisted_caller();
		let target: AccountIdOf<T> = account("target", 0, SEED);
	}: _(RawOrigin::Signed(caller), target)

	vote {
		let caller: AccountIdOf<T> = whitelisted_caller();
	}: _(RawOrigin::Signed(caller), 0u32, VoteOption::Yes)
}

frame_benchmarking::v1::impl_benchmark_test_suite!(
	MultiStaking,
	crate::mock::ExtBuilder::default().build(),
	crate::mock::Runtime
);
