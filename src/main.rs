mod shared;
mod clock;
mod garden;
mod market;
mod bank;
mod mayor;
mod advisor;
mod data;

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(50))),
        )
        .add_plugins(StatesPlugin)
        .add_plugins(LogPlugin::default())
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<Clock>()
        .init_resource::<WeatherState>()
        .init_resource::<Market>()
        .init_resource::<MarketPrices>()
        .init_resource::<GardenState>()
        .init_resource::<SeedInventory>()
        .init_resource::<Wallet>()
        .init_resource::<Ledger>()
        .init_resource::<ActiveEvent>()
        .init_resource::<PlantRegistry>()
        .init_resource::<EventRegistry>()
        .init_resource::<MayorReasons>()
        // Events
        .add_event::<HourTickEvent>()
        .add_event::<DayEndEvent>()
        .add_event::<NewDayEvent>()
        .add_event::<MoneyChangeEvent>()
        .add_event::<ToastEvent>()
        .add_event::<AdviceEvent>()
        .add_event::<ChatRequestEvent>()
        .add_event::<ChatReplyEvent>()
        .add_event::<StartGameEvent>()
        .add_event::<PlantSeedEvent>()
        .add_event::<WaterPlotEvent>()
        .add_event::<HarvestEvent>()
        .add_event::<ClearPlotEvent>()
        .add_event::<BuyLandEvent>()
        .add_event::<SellLandEvent>()
        .add_event::<BuySeedEvent>()
        .add_event::<SelectSeedEvent>()
        .add_event::<BorrowEvent>()
        .add_event::<RepayEvent>()
        // Domain plugins
        .add_plugins(clock::ClockPlugin)
        .add_plugins(garden::GardenPlugin)
        .add_plugins(market::MarketPlugin)
        .add_plugins(bank::BankPlugin)
        .add_plugins(mayor::MayorPlugin)
        .add_plugins(advisor::AdvisorPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        .add_systems(Update, auto_start.run_if(in_state(GameState::Title)))
        .run();
}

/// Headless build has no title screen to click, so the run loop starts the
/// game as soon as loading finishes.
fn auto_start(mut start_writer: EventWriter<StartGameEvent>) {
    start_writer.send(StartGameEvent);
}
