//! Clock domain — the heartbeat of the garden.
//!
//! Responsible for:
//! - Running the fixed 2-second tick timer while Playing
//! - Advancing the hour and sending HourTickEvent
//! - Rolling the day over after the last hour and sending DayEndEvent
//! - Moving Title -> Playing when the player starts the game
//!
//! The day rollover only advances the clock itself; the market rolls the new
//! day's mood/weather/event in response to DayEndEvent and relays the result
//! as NewDayEvent, so downstream domains never read half-rolled state.

use bevy::prelude::*;

use crate::shared::*;

/// Repeating wall-clock timer that drives the whole simulation.
#[derive(Resource)]
pub struct TickTimer(pub Timer);

impl Default for TickTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(TICK_SECONDS, TimerMode::Repeating))
    }
}

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickTimer>()
            .add_systems(
                Update,
                handle_start_game.run_if(in_state(GameState::Title)),
            )
            .add_systems(
                Update,
                tick_clock.run_if(in_state(GameState::Playing)),
            );
    }
}

/// What one clock tick produced: the hour that just completed (1..=8 on the
/// day it belongs to) and, on the last hour, the number of the new day.
pub struct TickOutcome {
    pub day: u32,
    pub hour: u8,
    pub new_day: Option<u32>,
}

/// Advances the clock by one tick. Pure so the rollover sequence is testable
/// without a timer.
pub fn advance_clock(clock: &mut Clock) -> TickOutcome {
    let day_ended = clock.advance_hour();
    let outcome_day = clock.day;
    let outcome_hour = clock.hour;

    let new_day = if day_ended {
        clock.roll_over();
        Some(clock.day)
    } else {
        None
    };

    TickOutcome {
        day: outcome_day,
        hour: outcome_hour,
        new_day,
    }
}

fn tick_clock(
    time: Res<Time>,
    mut timer: ResMut<TickTimer>,
    mut clock: ResMut<Clock>,
    mut hour_writer: EventWriter<HourTickEvent>,
    mut day_end_writer: EventWriter<DayEndEvent>,
) {
    timer.0.tick(time.delta());

    for _ in 0..timer.0.times_finished_this_tick() {
        let outcome = advance_clock(&mut clock);
        hour_writer.send(HourTickEvent {
            day: outcome.day,
            hour: outcome.hour,
        });

        if let Some(new_day) = outcome.new_day {
            info!("[Clock] Day {} ended, sunrise on day {}", outcome.day, new_day);
            day_end_writer.send(DayEndEvent { day: new_day });
        }
    }
}

fn handle_start_game(
    mut start_events: EventReader<StartGameEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for _ in start_events.read() {
        info!("[Clock] Game started");
        next_state.set(GameState::Playing);
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
