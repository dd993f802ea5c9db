//! Property-style checks over sale windows, price floors and discount caps,
//! on programmatically constructed sales and vouchers.

use chrono::{DateTime, Utc};
use decimal_percentage::Percentage;
use rusty_money::{Money, iso};
use testresult::TestResult;

use flashcart::{
    countdown::Countdown,
    flash_sales::{FlashSale, SaleAdjustment, SaleWindow},
    vouchers::{Voucher, apply_voucher},
};

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap_or(DateTime::UNIX_EPOCH)
}

fn vnd(minor: i64) -> Money<'static, iso::Currency> {
    Money::from_minor(minor, iso::VND)
}

fn every_adjustment() -> [SaleAdjustment<'static>; 3] {
    [
        SaleAdjustment::AmountOff(vnd(-15_000)),
        SaleAdjustment::AmountOverride(vnd(49_000)),
        SaleAdjustment::PercentageChange(Percentage::from(-0.20)),
    ]
}

#[test]
fn zero_stock_forces_inactive_for_every_window_and_instant() {
    let instants = [
        at("2025-01-01T00:00:00Z"),
        at("2026-06-15T12:00:00Z"),
        at("2030-01-01T00:00:00Z"),
    ];

    for adjustment in every_adjustment() {
        let once = FlashSale::new(
            adjustment,
            at("2026-06-01T00:00:00Z"),
            SaleWindow::Once {
                expire: at("2026-07-01T00:00:00Z"),
            },
        );

        let looping = FlashSale::new(
            adjustment,
            at("2026-01-01T00:00:00Z"),
            SaleWindow::Loop { period_minutes: 60 },
        );

        for now in instants {
            assert!(!once.is_active(0, now), "once sale active at {now} with zero stock");
            assert!(
                !looping.is_active(0, now),
                "loop sale active at {now} with zero stock"
            );
        }
    }
}

#[test]
fn once_window_is_open_strictly_between_begin_and_expire() {
    let sale = FlashSale::new(
        SaleAdjustment::AmountOff(vnd(-1_000)),
        at("2026-06-01T00:00:00Z"),
        SaleWindow::Once {
            expire: at("2026-07-01T00:00:00Z"),
        },
    );

    let expectations = [
        ("2026-05-01T00:00:00Z", false),
        ("2026-06-01T00:00:00Z", false),
        ("2026-06-01T00:00:01Z", true),
        ("2026-06-30T23:59:59Z", true),
        ("2026-07-01T00:00:00Z", false),
        ("2026-09-01T00:00:00Z", false),
    ];

    for (instant, active) in expectations {
        assert_eq!(sale.is_active(3, at(instant)), active, "at {instant}");
    }
}

#[test]
fn loop_window_never_closes_once_begun() {
    let sale = FlashSale::new(
        SaleAdjustment::PercentageChange(Percentage::from(-0.10)),
        at("2026-01-01T00:00:00Z"),
        SaleWindow::Loop {
            period_minutes: 1_440,
        },
    );

    for instant in [
        "2026-01-01T00:00:00Z",
        "2026-01-02T00:00:00Z",
        "2027-06-15T09:30:00Z",
        "2036-01-01T00:00:00Z",
    ] {
        assert!(sale.is_active(3, at(instant)), "inactive at {instant}");
    }
}

#[test]
fn sale_prices_never_go_negative() -> TestResult {
    // The uniform floor-at-zero policy holds for all three adjustment kinds,
    // however aggressive the reduction.
    let aggressive = [
        SaleAdjustment::AmountOff(vnd(-1_000_000)),
        SaleAdjustment::AmountOverride(vnd(-5_000)),
        SaleAdjustment::PercentageChange(Percentage::from(-3.0)),
    ];

    for adjustment in aggressive {
        let sale = FlashSale::new(
            adjustment,
            at("2026-06-01T00:00:00Z"),
            SaleWindow::Loop { period_minutes: 60 },
        );

        for base in [0, 1, 999, 100_000] {
            let price = sale.sale_price(vnd(base))?;

            assert!(
                price.to_minor_units() >= 0,
                "negative sale price for base {base}"
            );
        }
    }

    Ok(())
}

#[test]
fn percentage_voucher_discount_magnitude_never_exceeds_the_cap() -> TestResult {
    let voucher = Voucher::PercentageOff {
        rate: Percentage::from(-0.50),
        max_reduce: vnd(10_000),
    };

    for subtotal in [0, 5_000, 19_999, 20_000, 20_001, 80_000, 10_000_000] {
        let outcome = apply_voucher(Some(&voucher), vnd(subtotal))?;

        assert!(
            outcome.discount.to_minor_units().abs() <= 10_000,
            "cap exceeded for subtotal {subtotal}"
        );
        assert!(
            outcome.total.to_minor_units() >= 0,
            "negative total for subtotal {subtotal}"
        );
    }

    Ok(())
}

#[test]
fn delta_vouchers_never_drive_the_total_negative() -> TestResult {
    let voucher = Voucher::AmountOff(vnd(-30_000));

    for subtotal in [0, 10_000, 29_999, 30_000, 30_001, 100_000] {
        let outcome = apply_voucher(Some(&voucher), vnd(subtotal))?;

        assert!(
            outcome.total.to_minor_units() >= 0,
            "negative total for subtotal {subtotal}"
        );
    }

    Ok(())
}

#[test]
fn countdown_to_a_loop_boundary_never_exceeds_one_period() -> TestResult {
    let sale = FlashSale::new(
        SaleAdjustment::PercentageChange(Percentage::from(-0.20)),
        at("2026-01-01T00:00:00Z"),
        SaleWindow::Loop { period_minutes: 90 },
    );

    for instant in [
        "2026-01-01T00:00:01Z",
        "2026-06-15T12:34:56Z",
        "2026-06-15T23:59:59Z",
    ] {
        let now = at(instant);
        let target = sale.next_boundary(now).ok_or("no boundary")?;
        let remaining = (target - now).num_seconds();

        assert!(remaining >= 0, "boundary in the past at {instant}");
        assert!(
            remaining <= 90 * 60,
            "boundary more than one period away at {instant}"
        );
    }

    Ok(())
}

#[test]
fn countdown_freezes_at_zero_after_expiry() {
    let sale = FlashSale::new(
        SaleAdjustment::AmountOff(vnd(-1_000)),
        at("2026-06-01T00:00:00Z"),
        SaleWindow::Once {
            expire: at("2026-07-01T00:00:00Z"),
        },
    );

    let countdown = Countdown::to_sale_boundary(&sale, at("2026-08-01T00:00:00Z"));

    assert_eq!(countdown, Some(Countdown::zero()));
}
