//! Property-based tests for money arithmetic.
//!
//! - Scaling composes multiplicatively
//! - Equality is reflexive and currency-sensitive
//! - Addition converts through USD

use proptest::prelude::*;
use rust_decimal::Decimal;

use money_shared::{Currency, Money};

use super::calculator::Calculator;
use super::exchange::ExchangeRate;

/// Strategy to generate amounts (-1,000,000.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate small positive integer factors.
fn factor() -> impl Strategy<Value = i64> {
    1i64..10_000
}

/// Strategy to pick a currency from the built-in table.
fn known_currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::USD), Just(Currency::CHF)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Scaling twice equals scaling once by the product of the factors.
    #[test]
    fn prop_scale_composes(
        amount in amount(),
        currency in known_currency(),
        f in factor(),
        g in factor(),
    ) {
        let m = Money::new(amount, currency);
        let twice = m.scale(f).scale(g);
        prop_assert_eq!(twice.amount(), amount * Decimal::from(f) * Decimal::from(g));
        prop_assert_eq!(twice.currency(), currency);
    }

    /// Equality is reflexive.
    #[test]
    fn prop_money_equals_itself(amount in amount(), currency in known_currency()) {
        let m = Money::new(amount, currency);
        prop_assert_eq!(m, m);
    }

    /// Same amount in different currencies is never equal.
    #[test]
    fn prop_different_currency_never_equal(amount in amount()) {
        prop_assert_ne!(
            Money::new(amount, Currency::USD),
            Money::new(amount, Currency::CHF)
        );
    }

    /// Addition is commutative and always lands in USD.
    #[test]
    fn prop_add_commutes_in_usd(
        a in amount(),
        a_cur in known_currency(),
        b in amount(),
        b_cur in known_currency(),
    ) {
        let calc = Calculator::new(ExchangeRate::global());
        let left = Money::new(a, a_cur);
        let right = Money::new(b, b_cur);
        let ab = calc.add(&left, &right).unwrap();
        let ba = calc.add(&right, &left).unwrap();
        prop_assert_eq!(ab, ba);
        prop_assert_eq!(ab.currency(), Currency::USD);
    }

    /// Adding zero dollars converts the other operand to USD unchanged.
    #[test]
    fn prop_add_zero_is_conversion(a in amount(), currency in known_currency()) {
        let table = ExchangeRate::builtin();
        let calc = Calculator::new(&table);
        let m = Money::new(a, currency);
        let total = calc.add(&m, &Money::zero(Currency::USD)).unwrap();
        prop_assert_eq!(total.amount(), table.to_usd(&m).unwrap());
    }

    /// Display always shows exactly two decimals and the currency code.
    #[test]
    fn prop_display_has_two_decimals(amount in amount(), currency in known_currency()) {
        let shown = Money::new(amount, currency).scale(Decimal::new(1, 3)).to_string();
        let (number, code) = shown.split_once(' ').unwrap();
        prop_assert_eq!(code, currency.as_str());
        let (_, fraction) = number.split_once('.').unwrap();
        prop_assert_eq!(fraction.len(), 2);
    }
}
