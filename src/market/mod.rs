//! Market domain — land/seed pricing, harvest-value decay, and the daily
//! weather/mood/event randomizer.
//!
//! The pricing formulas are pure functions; the systems glue them to the
//! shared resources once per day rollover and handle the seed-shop intents.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub mod weighted;
use weighted::weighted_pick;

/// Fixed weather table. Weights sum to 1.0.
pub const WEATHER_TABLE: [(Weather, f64); 4] = [
    (Weather::Sunny, 0.6),
    (Weather::Rainy, 0.2),
    (Weather::Heatwave, 0.1),
    (Weather::Storm, 0.1),
];

pub struct MarketPlugin;

impl Plugin for MarketPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (roll_new_day, handle_buy_seed, handle_select_seed)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─── Pricing formulas ─────────────────────────────────────────────────────────

pub fn land_price(mood: MarketMood) -> i64 {
    let mult = match mood {
        MarketMood::Happy => 1.5,
        MarketMood::Sleepy => 0.6,
        MarketMood::Normal => 1.0,
    };
    (BASE_LAND_PRICE as f64 * mult).floor() as i64
}

pub fn seed_price(plant: &PlantDef, mood: MarketMood) -> CurrentPrice {
    let (mult, is_popular, is_cheap) = match mood {
        MarketMood::Happy => (1.2, true, false),
        MarketMood::Sleepy => (0.8, false, true),
        MarketMood::Normal => (1.0, false, false),
    };
    CurrentPrice {
        seed_cost: ((plant.base_seed_cost as f64 * mult).floor() as i64).max(1),
        is_popular,
        is_cheap,
    }
}

pub fn resale_value(land_price: i64) -> i64 {
    (land_price as f64 * LAND_RESALE_RATE).floor() as i64
}

/// Value of a ripe flower after `ripe_ticks` ticks on the stem. Exponential
/// decay per tick, harsher under storm/heatwave, never below 1 coin.
pub fn harvest_value(plant: &PlantDef, ripe_ticks: u32, weather: Weather) -> i64 {
    let decay: f64 = if weather.is_harsh() { 0.80 } else { 0.95 };
    let value = plant.base_sell_price as f64 * decay.powi(ripe_ticks as i32);
    (value.floor() as i64).max(1)
}

// ─── Daily draws ──────────────────────────────────────────────────────────────

pub fn roll_mood(rng: &mut impl Rng) -> MarketMood {
    let draw: f64 = rng.gen();
    if draw < 0.3 {
        MarketMood::Happy
    } else if draw < 0.6 {
        MarketMood::Sleepy
    } else {
        MarketMood::Normal
    }
}

pub fn roll_weather(rng: &mut impl Rng) -> Weather {
    *weighted_pick(rng, &WEATHER_TABLE)
}

/// 10% daily chance of one uniformly-chosen town event.
pub fn roll_event<'a>(rng: &mut impl Rng, registry: &'a EventRegistry) -> Option<&'a GameEventDef> {
    if registry.events.is_empty() || rng.gen::<f64>() >= EVENT_CHANCE {
        return None;
    }
    let index = rng.gen_range(0..registry.events.len());
    Some(&registry.events[index])
}

/// Recomputes everything mood-derived: land price, the price trail, and the
/// per-plant seed prices with popular/cheap flags.
pub fn apply_mood(
    mood: MarketMood,
    market: &mut Market,
    prices: &mut MarketPrices,
    registry: &PlantRegistry,
) {
    market.mood = mood;
    market.land_price = land_price(mood);
    let price = market.land_price;
    market.push_price(price);

    prices.prices.clear();
    for plant in &registry.plants {
        prices
            .prices
            .insert(plant.id.clone(), seed_price(plant, mood));
    }
}

// ─── Systems ──────────────────────────────────────────────────────────────────

/// Runs the day-rollover draws: mood, weather, and the rare town event.
/// Emits NewDayEvent so downstream domains (advisor) see the rolled state.
fn roll_new_day(
    mut day_end: EventReader<DayEndEvent>,
    mut market: ResMut<Market>,
    mut prices: ResMut<MarketPrices>,
    mut weather_state: ResMut<WeatherState>,
    mut active_event: ResMut<ActiveEvent>,
    plant_registry: Res<PlantRegistry>,
    event_registry: Res<EventRegistry>,
    mut money_writer: EventWriter<MoneyChangeEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
    mut new_day_writer: EventWriter<NewDayEvent>,
) {
    for end in day_end.read() {
        let mut rng = rand::thread_rng();

        let mood = roll_mood(&mut rng);
        apply_mood(mood, &mut market, &mut prices, &plant_registry);

        weather_state.current = roll_weather(&mut rng);

        active_event.name = None;
        if let Some(event) = roll_event(&mut rng, &event_registry) {
            active_event.name = Some(event.name.clone());
            toast_writer.send(ToastEvent {
                message: event.message.clone(),
            });
            // The party is the one event with a direct side effect.
            if event.id == "party" {
                money_writer.send(MoneyChangeEvent {
                    amount: PARTY_GIFT,
                    description: "Mayor's Gift".to_string(),
                });
            }
        }

        info!(
            "[Market] Day {} — mood {:?}, land {}, weather {:?}, event {:?}",
            end.day, market.mood, market.land_price, weather_state.current, active_event.name
        );

        new_day_writer.send(NewDayEvent {
            day: end.day,
            mood,
            weather: weather_state.current,
            event_name: active_event.name.clone(),
        });
    }
}

/// Buys one seed at today's price. The debit is unconditional — overspending
/// into debt is part of the lesson, not an error.
fn handle_buy_seed(
    mut buy_events: EventReader<BuySeedEvent>,
    prices: Res<MarketPrices>,
    registry: Res<PlantRegistry>,
    mut inventory: ResMut<SeedInventory>,
    mut money_writer: EventWriter<MoneyChangeEvent>,
) {
    for event in buy_events.read() {
        let Some(plant) = registry.get(&event.plant_id) else {
            warn!("[Market] Unknown plant id: {}", event.plant_id);
            continue;
        };
        let cost = prices
            .seed_cost(&plant.id)
            .unwrap_or(plant.base_seed_cost);
        money_writer.send(MoneyChangeEvent {
            amount: -cost,
            description: format!("Bought Seed: {}", plant.name),
        });
        inventory.add(&plant.id, 1);
    }
}

fn handle_select_seed(
    mut select_events: EventReader<SelectSeedEvent>,
    registry: Res<PlantRegistry>,
    mut inventory: ResMut<SeedInventory>,
) {
    for event in select_events.read() {
        if registry.get(&event.plant_id).is_some() {
            inventory.selected = Some(event.plant_id.clone());
        } else {
            warn!("[Market] Cannot select unknown plant: {}", event.plant_id);
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
