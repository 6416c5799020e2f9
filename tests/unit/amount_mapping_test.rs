// Property-based tests for amount mapping
//
// Properties tested:
// 1. NVP amounts carry exactly the currency's number of decimals
// 2. Explicit line items that add up to amount minus tax are accepted, and
//    ITEMAMT on the wire equals their sum
// 3. Totals one minor unit off the item sum are rejected
// 4. Fractional amounts are rejected for zero-decimal currencies
// 5. Subscription summaries always show the recurring price

use paypal_digital_goods::{
    BillingPeriod, Config, Credentials, Currency, DigitalGoods, LineItem, Purchase,
    PurchaseDetails, SubscriptionDetails,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

fn period_strategy() -> impl Strategy<Value = BillingPeriod> {
    prop::sample::select(vec![
        BillingPeriod::Day,
        BillingPeriod::Week,
        BillingPeriod::SemiMonth,
        BillingPeriod::Month,
        BillingPeriod::Year,
    ])
}

fn config(currency: Currency) -> Config {
    Config::new(Credentials::new("user", "pass", "sig").unwrap())
        .with_currency(currency)
        .with_return_url("https://shop.example.com/return")
        .unwrap()
        .with_cancel_url("https://shop.example.com/cancel")
        .unwrap()
}

fn minor_units(units: i64, currency: Currency) -> Decimal {
    Decimal::new(units, currency.scale())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: wire amounts use the currency scale exactly
    #[test]
    fn test_nvp_amount_scale(
        units in 0i64..=100_000_000,
        currency in currency_strategy()
    ) {
        let amount = minor_units(units, currency);
        let rendered = currency.nvp_amount(amount);

        let decimals = rendered.split('.').nth(1).map(str::len).unwrap_or(0);
        prop_assert_eq!(decimals as u32, currency.scale());
        prop_assert_eq!(rendered.parse::<Decimal>().unwrap(), amount);
        prop_assert!(currency.validate_amount("amount", amount).is_ok());
    }

    /// Property: items adding up to amount minus tax pass and map to ITEMAMT
    #[test]
    fn test_matching_items_accepted(
        items in prop::collection::vec((0i64..=100_000, 1u32..=10), 1..5),
        tax_units in 0i64..=10_000,
        currency in currency_strategy()
    ) {
        let item_total: i64 = items.iter().map(|(units, qty)| units * *qty as i64).sum();
        prop_assume!(item_total + tax_units > 0);

        let mut details = PurchaseDetails::new(minor_units(item_total + tax_units, currency))
            .with_description("Bundle")
            .with_tax(minor_units(tax_units, currency));
        for (n, (units, qty)) in items.iter().enumerate() {
            details = details.with_item(
                LineItem::new(format!("Item {}", n), minor_units(*units, currency), *qty).unwrap(),
            );
        }

        let purchase = Purchase::new(config(currency), details).unwrap();
        let request = purchase.set_express_checkout_request().unwrap();

        let expected_item_amount = currency.nvp_amount(minor_units(item_total, currency));
        prop_assert_eq!(
            request.get("PAYMENTREQUEST_0_ITEMAMT"),
            Some(expected_item_amount.as_str())
        );
        let expected_qty = items.last().unwrap().1.to_string();
        prop_assert_eq!(
            request.get(&format!("L_PAYMENTREQUEST_0_QTY{}", items.len() - 1)),
            Some(expected_qty.as_str())
        );
        let past_last_name_key = format!("L_PAYMENTREQUEST_0_NAME{}", items.len());
        prop_assert!(request.get(&past_last_name_key).is_none());
    }

    /// Property: a total one minor unit away from the item sum is rejected
    #[test]
    fn test_mismatched_items_rejected(
        items in prop::collection::vec((1i64..=100_000, 1u32..=10), 1..5),
        currency in currency_strategy()
    ) {
        let item_total: i64 = items.iter().map(|(units, qty)| units * *qty as i64).sum();

        let mut details = PurchaseDetails::new(minor_units(item_total + 1, currency));
        for (units, qty) in &items {
            details = details.with_item(
                LineItem::new("Item", minor_units(*units, currency), *qty).unwrap(),
            );
        }

        prop_assert!(details.validate(currency).is_err());
    }

    /// Property: zero-decimal currencies reject fractional amounts
    #[test]
    fn test_fractional_zero_decimal_amounts_rejected(
        whole in 1i64..=1_000_000,
        fraction in 1i64..=99,
        currency in prop::sample::select(vec![Currency::HUF, Currency::JPY, Currency::TWD])
    ) {
        let amount = Decimal::from(whole) + Decimal::new(fraction, 2);

        prop_assert!(PurchaseDetails::new(amount).validate(currency).is_err());
        prop_assert!(SubscriptionDetails::new("Plan", amount).validate(currency).is_err());
        prop_assert!(PurchaseDetails::new(Decimal::from(whole)).validate(currency).is_ok());
    }

    /// Property: summaries start with text and always mention the recurring price
    #[test]
    fn test_subscription_summary_mentions_price(
        units in 1i64..=1_000_000,
        fee_units in 0i64..=10_000,
        period in period_strategy(),
        cycles in 0u32..=24,
        currency in currency_strategy()
    ) {
        let amount = minor_units(units, currency);
        let details = SubscriptionDetails::new("Plan", amount)
            .with_initial_amount(minor_units(fee_units, currency))
            .with_billing(period, 1, cycles);

        let summary = details.summary(currency);
        let price = format!("{} per {}", currency.format_amount(amount), period.noun());

        prop_assert!(!summary.starts_with(' '));
        prop_assert!(summary.contains(&price), "{} does not contain {}", summary, price);
        prop_assert_eq!(summary.contains("sign-up fee"), fee_units > 0);
        prop_assert_eq!(summary.ends_with(&format!("for {} {}s", cycles, period.noun())), cycles > 0);
    }
}
