//! Advisor domain — Cache the farm dog, the game's finance coach.
//!
//! The text generator sits behind the `AdviceProvider` trait so the plugin
//! never cares where the words come from. The bundled provider is fully
//! scripted; either way the plugin substitutes a canned fallback line for any
//! empty response, so the player always hears something.

use bevy::prelude::*;

use crate::shared::*;

const FALLBACK_ADVICE: &str = "Every coin saved is a cookie for later! 🦴";
const FALLBACK_CHAT: &str = "I'm busy burying a bone! Ask me again? 🐕";

/// Everything a provider may look at when composing a line.
#[derive(Debug, Clone)]
pub struct AdviceContext {
    pub day: u32,
    pub money: i64,
    pub borrowed: i64,
    pub mood: MarketMood,
    pub weather: Weather,
    pub event_name: Option<String>,
    pub active_plants: Vec<PlantId>,
    pub is_debt: bool,
}

/// Best-effort text generator. Implementations return a line of coaching text
/// for the morning briefing and an answer for free-form questions; an empty
/// string means "nothing to say" and the plugin falls back to a stock line.
pub trait AdviceProvider: Send + Sync {
    fn advice(&self, context: &AdviceContext) -> String;
    fn chat(&self, message: &str, context: &AdviceContext) -> String;
}

#[derive(Resource)]
pub struct Advisor {
    provider: Box<dyn AdviceProvider>,
}

impl Advisor {
    pub fn new(provider: Box<dyn AdviceProvider>) -> Self {
        Self { provider }
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(Box::new(ScriptedCoach))
    }
}

pub struct AdvisorPlugin;

impl Plugin for AdvisorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Advisor>().add_systems(
            Update,
            (daily_advice, handle_chat).run_if(in_state(GameState::Playing)),
        );
    }
}

// ─── Scripted provider ────────────────────────────────────────────────────────

/// The bundled dog. Always answers, keyed on debt first, then the day's
/// event, then market mood, then a small rotation of evergreen tips.
pub struct ScriptedCoach;

const EVERGREEN_TIPS: [&str; 4] = [
    "Buy your garden patches when they are cheap! 🐾",
    "Saving a few coins every day adds up fast! 🪙",
    "Invest in seeds you can afford twice over! 🌱",
    "A good price today beats a maybe tomorrow! 🦴",
];

impl AdviceProvider for ScriptedCoach {
    fn advice(&self, context: &AdviceContext) -> String {
        if context.is_debt {
            return "Oh no! We are in debt! Borrowing money at the Bank 🏦 is cheaper than a negative balance!"
                .to_string();
        }
        if let Some(name) = &context.event_name {
            return format!("Big day: {}! Keep an eye on your coins! 🎈", name);
        }
        match context.mood {
            MarketMood::Happy => {
                "Prices are super high today. Good Deal to sell land or flowers! 🌟".to_string()
            }
            MarketMood::Sleepy => {
                "The market is sleepy and land is cheap. Time to Invest! 😴".to_string()
            }
            MarketMood::Normal => {
                let index = context.day as usize % EVERGREEN_TIPS.len();
                EVERGREEN_TIPS[index].to_string()
            }
        }
    }

    fn chat(&self, message: &str, context: &AdviceContext) -> String {
        let question = message.to_lowercase();

        if question.contains("mayor") || question.contains("grumpy") {
            "That's Mayor Grumpy! He's just a bit cranky. Keep a few coins saved for his little taxes! 🎩"
                .to_string()
        } else if question.contains("borrow") || question.contains("loan") || question.contains("debt") {
            "Borrowing at the Bank 🏦 costs a small fee, but it's way cheaper than an Overdraft! Repay when you can. 🦴"
                .to_string()
        } else if question.contains("land") {
            "Selling land is like a big trade! You get most of the Price back, so trade when land is expensive! 🏡"
                .to_string()
        } else if question.contains("seed") || question.contains("plant") {
            "Seeds are an Investment! Spend a little now, harvest more coins later! 🌱".to_string()
        } else if question.contains("weather") {
            match context.weather {
                Weather::Rainy => "Rain waters your plants for free today! 🌧️".to_string(),
                Weather::Storm => "Storms slow your plants down. Harvest ripe flowers fast! ⛈️".to_string(),
                Weather::Heatwave => "Heatwaves spoil ripe flowers quickly. Pick them now! 🥵".to_string(),
                Weather::Sunny => "Sunny and steady. A great day for gardening! ☀️".to_string(),
            }
        } else if question.contains("money") || question.contains("coin") || question.contains("save") {
            format!(
                "You have {} coins on day {}. Saving a little each day is a Good Deal! 🪙",
                context.money, context.day
            )
        } else {
            "Woof! You're a smart gardener! 🌸".to_string()
        }
    }
}

// ─── Systems ──────────────────────────────────────────────────────────────────

fn build_context(
    day: u32,
    mood: MarketMood,
    weather: Weather,
    event_name: Option<String>,
    wallet: &Wallet,
    garden: &GardenState,
) -> AdviceContext {
    AdviceContext {
        day,
        money: wallet.money,
        borrowed: wallet.borrowed,
        mood,
        weather,
        event_name,
        active_plants: garden.active_plant_ids(),
        is_debt: wallet.is_debt(),
    }
}

/// Morning briefing: one line of coaching per new day.
fn daily_advice(
    mut new_day_events: EventReader<NewDayEvent>,
    advisor: Res<Advisor>,
    wallet: Res<Wallet>,
    garden: Res<GardenState>,
    mut advice_writer: EventWriter<AdviceEvent>,
) {
    for event in new_day_events.read() {
        let context = build_context(
            event.day,
            event.mood,
            event.weather,
            event.event_name.clone(),
            &wallet,
            &garden,
        );
        let mut text = advisor.provider.advice(&context);
        if text.trim().is_empty() {
            text = FALLBACK_ADVICE.to_string();
        }
        info!("[Advisor] Day {}: {}", event.day, text);
        advice_writer.send(AdviceEvent { text });
    }
}

/// Answers free-form questions with a summary of the world as context.
fn handle_chat(
    mut chat_events: EventReader<ChatRequestEvent>,
    advisor: Res<Advisor>,
    clock: Res<Clock>,
    wallet: Res<Wallet>,
    market: Res<Market>,
    weather: Res<WeatherState>,
    garden: Res<GardenState>,
    mut reply_writer: EventWriter<ChatReplyEvent>,
) {
    for event in chat_events.read() {
        let context = build_context(
            clock.day,
            market.mood,
            weather.current,
            None,
            &wallet,
            &garden,
        );
        let mut text = advisor.provider.chat(&event.message, &context);
        if text.trim().is_empty() {
            text = FALLBACK_CHAT.to_string();
        }
        reply_writer.send(ChatReplyEvent { text });
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
