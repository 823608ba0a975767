//! Bank domain — the single money pipe, borrowing, and periodic penalties.
//!
//! Every wallet mutation in the game flows through `apply_money_changes` as a
//! `MoneyChangeEvent`; the handler moves the balance (negative balances are
//! allowed, overdraft is a lesson, not an error), appends a ledger entry, and
//! raises a toast. Borrowing moves in fixed steps of 50 up to a hard limit,
//! and every 4th hour charges overdraft and loan-interest fees.

use bevy::prelude::*;

use crate::shared::*;

pub struct BankPlugin;

impl Plugin for BankPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_borrow,
                handle_repay,
                apply_penalties,
                apply_money_changes,
                warn_on_first_debt,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─── Borrowing rules ──────────────────────────────────────────────────────────

/// Whether one more borrow step fits under the limit.
pub fn can_borrow(borrowed: i64) -> bool {
    borrowed + BORROW_STEP <= BORROW_LIMIT
}

/// Whether a repayment step is possible right now.
pub fn can_repay(money: i64, borrowed: i64) -> bool {
    borrowed > 0 && money >= BORROW_STEP
}

fn handle_borrow(
    mut borrow_events: EventReader<BorrowEvent>,
    mut wallet: ResMut<Wallet>,
    mut money_writer: EventWriter<MoneyChangeEvent>,
    mut advice_writer: EventWriter<AdviceEvent>,
) {
    for _ in borrow_events.read() {
        if !can_borrow(wallet.borrowed) {
            warn!(
                "[Bank] Borrow rejected: {} borrowed, limit {}",
                wallet.borrowed, BORROW_LIMIT
            );
            advice_writer.send(AdviceEvent {
                text: "Woof! That's too much borrowing. My paws can't carry more coins! 🐕"
                    .to_string(),
            });
            continue;
        }
        wallet.borrowed += BORROW_STEP;
        money_writer.send(MoneyChangeEvent {
            amount: BORROW_STEP,
            description: "Borrowed Coins".to_string(),
        });
    }
}

fn handle_repay(
    mut repay_events: EventReader<RepayEvent>,
    mut wallet: ResMut<Wallet>,
    mut money_writer: EventWriter<MoneyChangeEvent>,
    mut advice_writer: EventWriter<AdviceEvent>,
) {
    for _ in repay_events.read() {
        if wallet.borrowed <= 0 {
            continue;
        }
        if wallet.money < BORROW_STEP {
            advice_writer.send(AdviceEvent {
                text: "You need at least 50 coins to repay! 🦴".to_string(),
            });
            continue;
        }
        wallet.borrowed -= BORROW_STEP;
        money_writer.send(MoneyChangeEvent {
            amount: -BORROW_STEP,
            description: "Repaid Coins".to_string(),
        });
    }
}

// ─── Periodic penalties ───────────────────────────────────────────────────────

/// Charges the overdraft fee and loan interest on every 4th completed hour.
/// Both apply in the same hour when the player is overdrawn AND borrowed.
fn apply_penalties(
    mut hour_events: EventReader<HourTickEvent>,
    wallet: Res<Wallet>,
    mut money_writer: EventWriter<MoneyChangeEvent>,
) {
    for event in hour_events.read() {
        if event.hour % PENALTY_INTERVAL_HOURS != 0 {
            continue;
        }
        if wallet.money < 0 {
            money_writer.send(MoneyChangeEvent {
                amount: -OVERDRAFT_FEE,
                description: "Overdraft Penalty 🛑".to_string(),
            });
        }
        if wallet.borrowed > 0 {
            money_writer.send(MoneyChangeEvent {
                amount: -BORROW_INTEREST_FEE,
                description: "Loan Interest 🦴".to_string(),
            });
        }
    }
}

// ─── The money pipe ───────────────────────────────────────────────────────────

/// Applies MoneyChangeEvents to the wallet, records the ledger entry, and
/// raises a toast. Debits are never rejected here; the balance is allowed to
/// go negative so the overdraft penalty can teach its lesson.
fn apply_money_changes(
    mut money_events: EventReader<MoneyChangeEvent>,
    mut wallet: ResMut<Wallet>,
    mut ledger: ResMut<Ledger>,
    clock: Res<Clock>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for event in money_events.read() {
        wallet.money += event.amount;

        let kind = if event.amount >= 0 {
            EntryKind::Income
        } else {
            EntryKind::Expense
        };
        ledger.record(LedgerEntry {
            day: clock.day,
            kind,
            description: event.description.clone(),
            amount: event.amount.abs(),
        });

        if event.amount >= 0 {
            info!(
                "[Bank] +{} coins: {}. Balance: {}",
                event.amount, event.description, wallet.money
            );
            toast_writer.send(ToastEvent {
                message: format!("+{} {}", event.amount, event.description),
            });
        } else {
            info!(
                "[Bank] -{} coins: {}. Balance: {}",
                -event.amount, event.description, wallet.money
            );
            toast_writer.send(ToastEvent {
                message: format!("-{} {}", -event.amount, event.description),
            });
        }
    }
}

/// One-time explainer the first time the balance dips below zero.
fn warn_on_first_debt(mut wallet: ResMut<Wallet>, mut advice_writer: EventWriter<AdviceEvent>) {
    if wallet.money < 0 && !wallet.has_seen_debt_warning {
        wallet.has_seen_debt_warning = true;
        warn!("[Bank] Balance went negative: {}", wallet.money);
        advice_writer.send(AdviceEvent {
            text: "Oh no! We are in debt! Borrowing money at the Bank 🏦 is cheaper than a negative balance!"
                .to_string(),
        });
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
