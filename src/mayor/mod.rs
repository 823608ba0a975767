//! Mayor Grumpy — the random expense generator.
//!
//! Each scheduler tick has a small chance of starting an encounter: the mayor
//! walks across the garden while a fine timer counts down, then debits the
//! wallet exactly once with a random flavor reason. No second encounter can
//! start while one is in flight.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

/// A fine announced at the start of an encounter, debited when its timer
/// finishes. Taken out of the encounter on fire so it cannot fire twice.
#[derive(Debug, Clone)]
pub struct PendingFine {
    pub timer: Timer,
    pub amount: i64,
    pub reason: String,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct MayorEncounter {
    pub walking: bool,
    pub walk_timer: Timer,
    pub pending: Option<PendingFine>,
}

pub struct MayorPlugin;

impl Plugin for MayorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MayorEncounter>().add_systems(
            Update,
            (maybe_start_encounter, fire_pending_fine, finish_walk)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Fine amount in [5, 20).
pub fn roll_fine_amount(rng: &mut impl Rng) -> i64 {
    5 + rng.gen_range(0..15)
}

fn maybe_start_encounter(
    mut hour_events: EventReader<HourTickEvent>,
    mut encounter: ResMut<MayorEncounter>,
    reasons: Res<MayorReasons>,
    mut advice_writer: EventWriter<AdviceEvent>,
) {
    for _ in hour_events.read() {
        if encounter.walking {
            continue;
        }
        let mut rng = rand::thread_rng();
        if rng.gen::<f64>() >= MAYOR_CHANCE {
            continue;
        }
        if reasons.reasons.is_empty() {
            warn!("[Mayor] No fine reasons loaded, skipping encounter");
            continue;
        }

        let reason = reasons.reasons[rng.gen_range(0..reasons.reasons.len())].clone();
        let amount = roll_fine_amount(&mut rng);

        info!("[Mayor] Encounter started: {} for {} coins", reason, amount);
        advice_writer.send(AdviceEvent {
            text: format!("Oh no! Mayor Grumpy is walking in for the {}! 🐕", reason),
        });

        encounter.walking = true;
        encounter.walk_timer = Timer::from_seconds(MAYOR_WALK_SECONDS, TimerMode::Once);
        encounter.pending = Some(PendingFine {
            timer: Timer::from_seconds(MAYOR_FINE_DELAY, TimerMode::Once),
            amount,
            reason,
        });
    }
}

/// Ticks the fine timer and debits the wallet once when it finishes.
fn fire_pending_fine(
    time: Res<Time>,
    mut encounter: ResMut<MayorEncounter>,
    mut money_writer: EventWriter<MoneyChangeEvent>,
) {
    let fire = match encounter.pending.as_mut() {
        Some(fine) => fine.timer.tick(time.delta()).just_finished(),
        None => false,
    };
    if !fire {
        return;
    }

    // take() guarantees the debit happens exactly once per encounter.
    if let Some(fine) = encounter.pending.take() {
        money_writer.send(MoneyChangeEvent {
            amount: -fine.amount,
            description: format!("Mayor's {}", fine.reason),
        });
    }
}

fn finish_walk(time: Res<Time>, mut encounter: ResMut<MayorEncounter>) {
    if !encounter.walking {
        return;
    }
    if encounter.walk_timer.tick(time.delta()).just_finished() {
        encounter.walking = false;
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
