//! Garden domain — planting, watering, per-tick growth, harvesting, and
//! land trading over the fixed plot grid.
//!
//! Growth is a pure transition function over a single plot; the systems
//! apply it to the whole grid on every scheduler tick and handle the
//! player intents.

use bevy::prelude::*;

use crate::market::{harvest_value, resale_value};
use crate::shared::*;

pub struct GardenPlugin;

impl Plugin for GardenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_plant_seed,
                handle_water_plot,
                handle_harvest,
                handle_clear_plot,
                handle_buy_land,
                handle_sell_land,
                grow_on_tick,
                reset_daily_flags,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─── Growth transition ────────────────────────────────────────────────────────

/// Growth speed per tick. Rain helps, storms batter the stems.
pub fn growth_speed(weather: Weather) -> f32 {
    match weather {
        Weather::Rainy => 1.8,
        Weather::Storm => 0.5,
        Weather::Sunny | Weather::Heatwave => 1.5,
    }
}

/// Stage for a given growth progress. Progress below the sprout threshold
/// leaves the plot at Seed.
pub fn stage_for_progress(progress: f32) -> GrowthStage {
    if progress >= 1.0 {
        GrowthStage::Flower
    } else if progress >= 0.6 {
        GrowthStage::Bud
    } else if progress >= 0.3 {
        GrowthStage::Sprout
    } else {
        GrowthStage::Seed
    }
}

/// Advances one plot by one tick.
///
/// Flowers stop growing and start aging (`ripe_ticks`), which drives the
/// harvest-value decay. Withered crops are inert. Rain and storm auto-water
/// the plot regardless of manual watering.
pub fn advance_plot_growth(plot: &mut Plot, plant: &PlantDef, weather: Weather) {
    if plot.is_locked || plot.plant_id.is_none() {
        return;
    }
    match plot.stage {
        GrowthStage::Flower => {
            plot.ripe_ticks += 1;
        }
        GrowthStage::Withered | GrowthStage::Empty => {}
        GrowthStage::Seed | GrowthStage::Sprout | GrowthStage::Bud => {
            let step = (1.0 / plant.growth_time as f32) * growth_speed(weather);
            plot.growth_progress += step;
            plot.stage = stage_for_progress(plot.growth_progress);
            if weather.is_wet() {
                plot.is_watered = true;
            }
        }
    }
}

// ─── Tick & day systems ───────────────────────────────────────────────────────

/// Applies the growth transition to every plot once per scheduler tick.
fn grow_on_tick(
    mut ticks: EventReader<HourTickEvent>,
    mut garden: ResMut<GardenState>,
    registry: Res<PlantRegistry>,
    weather: Res<WeatherState>,
) {
    for _ in ticks.read() {
        for plot in garden.plots.iter_mut() {
            let Some(plant_id) = plot.plant_id.clone() else {
                continue;
            };
            let Some(plant) = registry.get(&plant_id) else {
                warn!("[Garden] Plot {} holds unknown plant {}", plot.id, plant_id);
                continue;
            };
            advance_plot_growth(plot, plant, weather.current);
        }
    }
}

/// Day rollover clears the daily watering and pest flags on every plot.
/// Growth progress, stage, and ripe_ticks persist across days.
fn reset_daily_flags(mut day_end: EventReader<DayEndEvent>, mut garden: ResMut<GardenState>) {
    for _ in day_end.read() {
        for plot in garden.plots.iter_mut() {
            plot.is_watered = false;
            plot.has_pests = false;
        }
    }
}

// ─── Player intents ───────────────────────────────────────────────────────────

/// Plants the selected seed. Soft-rejects when no seed is selected or the
/// pouch for it is empty.
fn handle_plant_seed(
    mut plant_events: EventReader<PlantSeedEvent>,
    mut garden: ResMut<GardenState>,
    mut inventory: ResMut<SeedInventory>,
    mut advice_writer: EventWriter<AdviceEvent>,
) {
    for event in plant_events.read() {
        let Some(selected) = inventory.selected.clone() else {
            advice_writer.send(AdviceEvent {
                text: "Pick a seed first, then plant it! 🛍️".to_string(),
            });
            continue;
        };

        let Some(plot) = garden.plots.get_mut(event.plot_id) else {
            continue;
        };
        if plot.is_locked || plot.stage != GrowthStage::Empty {
            continue;
        }

        if !inventory.take_one(&selected) {
            advice_writer.send(AdviceEvent {
                text: "You need to buy seeds in the shop first! 🛍️".to_string(),
            });
            continue;
        }

        plot.plant_id = Some(selected);
        plot.stage = GrowthStage::Seed;
        plot.growth_progress = 0.0;
        plot.is_watered = true;
        plot.ripe_ticks = 0;
    }
}

/// Manual watering of a planted, not-yet-ripe plot.
fn handle_water_plot(mut water_events: EventReader<WaterPlotEvent>, mut garden: ResMut<GardenState>) {
    for event in water_events.read() {
        if let Some(plot) = garden.plots.get_mut(event.plot_id) {
            if !plot.is_locked && plot.plant_id.is_some() && !plot.is_watered {
                plot.is_watered = true;
            }
        }
    }
}

/// Harvests a ripe flower: credits the decayed harvest value and returns the
/// plot to Empty.
fn handle_harvest(
    mut harvest_events: EventReader<HarvestEvent>,
    mut garden: ResMut<GardenState>,
    registry: Res<PlantRegistry>,
    weather: Res<WeatherState>,
    mut money_writer: EventWriter<MoneyChangeEvent>,
) {
    for event in harvest_events.read() {
        let Some(plot) = garden.plots.get_mut(event.plot_id) else {
            continue;
        };
        if plot.is_locked || plot.stage != GrowthStage::Flower {
            continue;
        }
        let Some(plant) = plot.plant_id.as_deref().and_then(|id| registry.get(id)) else {
            continue;
        };

        let value = harvest_value(plant, plot.ripe_ticks, weather.current);
        money_writer.send(MoneyChangeEvent {
            amount: value,
            description: format!("Harvested {}", plant.name),
        });
        plot.reset();
    }
}

/// Clears a withered crop with no payment so the plot can be replanted.
fn handle_clear_plot(mut clear_events: EventReader<ClearPlotEvent>, mut garden: ResMut<GardenState>) {
    for event in clear_events.read() {
        if let Some(plot) = garden.plots.get_mut(event.plot_id) {
            if !plot.is_locked && plot.stage == GrowthStage::Withered {
                plot.reset();
            }
        }
    }
}

// ─── Land trading ─────────────────────────────────────────────────────────────

/// Unlocks the lowest-indexed locked plot at today's land price. The debit is
/// unconditional; buying land on an empty wallet is how players meet the
/// overdraft lesson.
fn handle_buy_land(
    mut buy_events: EventReader<BuyLandEvent>,
    mut garden: ResMut<GardenState>,
    market: Res<Market>,
    mut money_writer: EventWriter<MoneyChangeEvent>,
) {
    for _ in buy_events.read() {
        let Some(index) = garden.first_locked() else {
            continue;
        };
        money_writer.send(MoneyChangeEvent {
            amount: -market.land_price,
            description: "Bought Land Patch".to_string(),
        });
        garden.plots[index].is_locked = false;
    }
}

/// Sells an unlocked plot at 95% of today's land price, clearing any crop and
/// relocking it. Rejected when it would leave the garden without a single
/// unlocked plot.
fn handle_sell_land(
    mut sell_events: EventReader<SellLandEvent>,
    mut garden: ResMut<GardenState>,
    market: Res<Market>,
    mut money_writer: EventWriter<MoneyChangeEvent>,
    mut advice_writer: EventWriter<AdviceEvent>,
) {
    for event in sell_events.read() {
        let Some(plot) = garden.plots.get(event.plot_id) else {
            continue;
        };
        if plot.is_locked {
            continue;
        }
        if garden.unlocked_count() <= 1 {
            advice_writer.send(AdviceEvent {
                text: "Keep at least one patch for your dog to play on! 🐕".to_string(),
            });
            continue;
        }

        money_writer.send(MoneyChangeEvent {
            amount: resale_value(market.land_price),
            description: "Sold Land Patch".to_string(),
        });
        let plot = &mut garden.plots[event.plot_id];
        plot.reset();
        plot.is_locked = true;
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
