//! Shared resources, events, and states for Coin Garden.
//!
//! This is the type contract. Every domain plugin imports from here;
//! domains otherwise touch each other only through events and the pure
//! pricing functions the market module exports.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Title,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// Day/hour world clock. `hour` counts 0..HOURS_PER_DAY within a day;
/// reaching HOURS_PER_DAY triggers the day rollover.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    pub day: u32,
    pub hour: u8,
}

impl Default for Clock {
    fn default() -> Self {
        Self { day: 1, hour: 0 }
    }
}

impl Clock {
    /// Advances one hour. Returns true when the day is over and the caller
    /// must perform the rollover.
    pub fn advance_hour(&mut self) -> bool {
        self.hour += 1;
        self.hour >= HOURS_PER_DAY
    }

    /// Starts the next day: day increments by exactly 1, hour resets to 0.
    pub fn roll_over(&mut self) {
        self.day += 1;
        self.hour = 0;
    }

    /// Whether this hour is a financial-penalty hour (every 4th hour).
    pub fn is_penalty_hour(&self) -> bool {
        self.hour % PENALTY_INTERVAL_HOURS == 0
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WEATHER & MARKET
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Storm,
    Heatwave,
}

impl Weather {
    /// Storm and heatwave spoil ripe flowers faster.
    pub fn is_harsh(self) -> bool {
        matches!(self, Weather::Storm | Weather::Heatwave)
    }

    /// Rain (and storm rain) waters every plot for free.
    pub fn is_wet(self) -> bool {
        matches!(self, Weather::Rainy | Weather::Storm)
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct WeatherState {
    pub current: Weather,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            current: Weather::Sunny,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketMood {
    Happy,
    Normal,
    Sleepy,
}

impl MarketMood {
    /// Town-news display string.
    pub fn label(self) -> &'static str {
        match self {
            MarketMood::Happy => "Super Popular! 🌟",
            MarketMood::Normal => "Just Right ⚖️",
            MarketMood::Sleepy => "Sleepy Market 😴",
        }
    }
}

/// Land market: today's price, the mood driving it, and a short price trail
/// for the town-news chart.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub land_price: i64,
    pub mood: MarketMood,
    pub price_history: Vec<i64>,
}

impl Default for Market {
    fn default() -> Self {
        Self {
            land_price: BASE_LAND_PRICE,
            mood: MarketMood::Normal,
            price_history: Vec::new(),
        }
    }
}

impl Market {
    /// Appends today's land price to the trail, keeping the last
    /// PRICE_HISTORY_CAP values.
    pub fn push_price(&mut self, price: i64) {
        self.price_history.push(price);
        let len = self.price_history.len();
        if len > PRICE_HISTORY_CAP {
            self.price_history.drain(..len - PRICE_HISTORY_CAP);
        }
    }
}

/// Per-plant derived pricing, recomputed every day from the market mood.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurrentPrice {
    pub seed_cost: i64,
    pub is_popular: bool,
    pub is_cheap: bool,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct MarketPrices {
    pub prices: HashMap<PlantId, CurrentPrice>,
}

impl MarketPrices {
    pub fn seed_cost(&self, plant_id: &str) -> Option<i64> {
        self.prices.get(plant_id).map(|p| p.seed_cost)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLANTS
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every plant in the catalog.
/// Using string IDs for data-driven flexibility.
pub type PlantId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantDef {
    pub id: PlantId,
    pub name: String,
    pub icon: String,
    pub base_seed_cost: i64,
    pub base_sell_price: i64,
    /// Ticks-to-maturity divisor: one tick adds (1/growth_time) × speed
    /// to a plot's growth progress.
    pub growth_time: u32,
}

/// Immutable plant catalog, populated once by the data plugin.
/// Kept as a Vec to preserve shop display order.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlantRegistry {
    pub plants: Vec<PlantDef>,
}

impl PlantRegistry {
    pub fn get(&self, id: &str) -> Option<&PlantDef> {
        self.plants.iter().find(|p| p.id == id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// GARDEN
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    Empty,
    Seed,
    Sprout,
    Bud,
    Flower,
    Withered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plot {
    pub id: usize,
    pub plant_id: Option<PlantId>,
    pub stage: GrowthStage,
    pub growth_progress: f32,
    pub is_watered: bool,
    pub has_pests: bool,
    pub is_locked: bool,
    /// Ticks since this plot reached Flower; drives harvest-value decay.
    pub ripe_ticks: u32,
}

impl Plot {
    pub fn new(id: usize, locked: bool) -> Self {
        Self {
            id,
            plant_id: None,
            stage: GrowthStage::Empty,
            growth_progress: 0.0,
            is_watered: false,
            has_pests: false,
            is_locked: locked,
            ripe_ticks: 0,
        }
    }

    /// Clears any crop and returns the plot to Empty. Lock state untouched.
    pub fn reset(&mut self) {
        self.plant_id = None;
        self.stage = GrowthStage::Empty;
        self.growth_progress = 0.0;
        self.ripe_ticks = 0;
    }
}

/// The fixed plot grid. Plots are created once at startup and only ever
/// reset, never destroyed.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GardenState {
    pub plots: Vec<Plot>,
}

impl Default for GardenState {
    fn default() -> Self {
        Self {
            plots: (0..MAX_GRID_SIZE)
                .map(|i| Plot::new(i, i >= INITIAL_UNLOCKED))
                .collect(),
        }
    }
}

impl GardenState {
    pub fn unlocked_count(&self) -> usize {
        self.plots.iter().filter(|p| !p.is_locked).count()
    }

    /// Lowest-indexed still-locked plot, if any land is left to buy.
    pub fn first_locked(&self) -> Option<usize> {
        self.plots.iter().position(|p| p.is_locked)
    }

    /// Plant ids of every growing crop on unlocked plots, for the advisor.
    pub fn active_plant_ids(&self) -> Vec<PlantId> {
        self.plots
            .iter()
            .filter(|p| !p.is_locked)
            .filter_map(|p| p.plant_id.clone())
            .collect()
    }
}

/// Seed counts per plant, plus the seed the player currently has selected
/// for planting.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedInventory {
    pub seeds: HashMap<PlantId, u32>,
    pub selected: Option<PlantId>,
}

impl SeedInventory {
    pub fn count(&self, plant_id: &str) -> u32 {
        self.seeds.get(plant_id).copied().unwrap_or(0)
    }

    pub fn add(&mut self, plant_id: &str, quantity: u32) {
        *self.seeds.entry(plant_id.to_string()).or_insert(0) += quantity;
    }

    /// Removes one seed if available. Returns false when the pouch is empty.
    pub fn take_one(&mut self, plant_id: &str) -> bool {
        match self.seeds.get_mut(plant_id) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WALLET & LEDGER
// ═══════════════════════════════════════════════════════════════════════

/// Money balance and the borrowing book. `money` may go negative — that is
/// the overdraft teaching mechanic, not an error state.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub money: i64,
    /// Outstanding borrowed amount, always in [0, BORROW_LIMIT].
    pub borrowed: i64,
    /// The first-ever debt entry shows a one-time explanatory warning.
    pub has_seen_debt_warning: bool,
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            money: INITIAL_MONEY,
            borrowed: 0,
            has_seen_debt_warning: false,
        }
    }
}

impl Wallet {
    pub fn is_debt(&self) -> bool {
        self.money < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub day: u32,
    pub kind: EntryKind,
    pub description: String,
    /// Absolute magnitude; direction lives in `kind`.
    pub amount: i64,
}

/// Rolling coin history: newest first, oldest evicted beyond LEDGER_CAP.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    pub entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn record(&mut self, entry: LedgerEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(LEDGER_CAP);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RANDOM EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEventDef {
    pub id: String,
    pub name: String,
    pub message: String,
}

/// Fixed event catalog, populated once by the data plugin.
#[derive(Resource, Debug, Clone, Default)]
pub struct EventRegistry {
    pub events: Vec<GameEventDef>,
}

/// The event (if any) the town woke up to today.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveEvent {
    pub name: Option<String>,
}

/// Flavor reasons the mayor invents for his little fines.
#[derive(Resource, Debug, Clone, Default)]
pub struct MayorReasons {
    pub reasons: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// One scheduler tick advanced the clock by one hour.
#[derive(Event, Debug, Clone)]
pub struct HourTickEvent {
    pub day: u32,
    pub hour: u8,
}

/// The hour counter hit its terminal value; a new day has started.
/// `day` is the NEW day number (old day + 1).
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
}

/// Emitted by the market after the daily mood/weather/event draws, so
/// downstream domains see the freshly-rolled state.
#[derive(Event, Debug, Clone)]
pub struct NewDayEvent {
    pub day: u32,
    pub mood: MarketMood,
    pub weather: Weather,
    pub event_name: Option<String>,
}

/// Every wallet mutation in the game flows through this event.
/// Positive = income, negative = expense.
#[derive(Event, Debug, Clone)]
pub struct MoneyChangeEvent {
    pub amount: i64,
    pub description: String,
}

/// Transient floating notification for the player.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
}

/// A line of coaching text from Cache the farm dog.
#[derive(Event, Debug, Clone)]
pub struct AdviceEvent {
    pub text: String,
}

/// Player question for the chat collaborator.
#[derive(Event, Debug, Clone)]
pub struct ChatRequestEvent {
    pub message: String,
}

#[derive(Event, Debug, Clone)]
pub struct ChatReplyEvent {
    pub text: String,
}

// ── Player intents ────────────────────────────────────────────────────

#[derive(Event, Debug, Clone)]
pub struct StartGameEvent;

#[derive(Event, Debug, Clone)]
pub struct PlantSeedEvent {
    pub plot_id: usize,
}

#[derive(Event, Debug, Clone)]
pub struct WaterPlotEvent {
    pub plot_id: usize,
}

#[derive(Event, Debug, Clone)]
pub struct HarvestEvent {
    pub plot_id: usize,
}

/// Clears a withered crop so the plot can be replanted.
#[derive(Event, Debug, Clone)]
pub struct ClearPlotEvent {
    pub plot_id: usize,
}

#[derive(Event, Debug, Clone)]
pub struct BuyLandEvent;

#[derive(Event, Debug, Clone)]
pub struct SellLandEvent {
    pub plot_id: usize,
}

#[derive(Event, Debug, Clone)]
pub struct BuySeedEvent {
    pub plant_id: PlantId,
}

#[derive(Event, Debug, Clone)]
pub struct SelectSeedEvent {
    pub plant_id: PlantId,
}

#[derive(Event, Debug, Clone)]
pub struct BorrowEvent;

#[derive(Event, Debug, Clone)]
pub struct RepayEvent;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const MAX_GRID_SIZE: usize = 15;
pub const INITIAL_UNLOCKED: usize = 5;
pub const INITIAL_MONEY: i64 = 60;

/// One scheduler tick = one in-game hour, every 2 wall-clock seconds.
pub const TICK_SECONDS: f32 = 2.0;
pub const HOURS_PER_DAY: u8 = 8;
pub const PENALTY_INTERVAL_HOURS: u8 = 4;

pub const BASE_LAND_PRICE: i64 = 50;
pub const LAND_RESALE_RATE: f64 = 0.95;

pub const BORROW_STEP: i64 = 50;
pub const BORROW_LIMIT: i64 = 200;
/// Fee for having a negative balance.
pub const OVERDRAFT_FEE: i64 = 5;
/// Flat fee for carrying borrowed money.
pub const BORROW_INTEREST_FEE: i64 = 2;

pub const LEDGER_CAP: usize = 10;
pub const PRICE_HISTORY_CAP: usize = 5;

/// Daily chance that a random town event happens.
pub const EVENT_CHANCE: f64 = 0.10;
/// Flat wallet credit when the mayor throws his party.
pub const PARTY_GIFT: i64 = 10;

/// Per-tick chance that Mayor Grumpy comes walking.
pub const MAYOR_CHANCE: f64 = 0.04;
/// Wall-clock seconds between the mayor appearing and the fine landing.
pub const MAYOR_FINE_DELAY: f32 = 4.0;
/// Wall-clock seconds the walk-across animation suppresses re-triggering.
pub const MAYOR_WALK_SECONDS: f32 = 8.0;

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════
