use crate::shared::*;

/// Populate the catalog of random town events.
///
/// Only "party" moves money (a flat gift applied by the market's daily roll);
/// the others are flavor the advisor can comment on.
pub fn populate_events(registry: &mut EventRegistry) {
    registry.events = vec![
        GameEventDef {
            id: "party".into(),
            name: "The Mayor's Party".into(),
            message: "The Mayor is happy today! He shared some coins for your garden! 🎈".into(),
        },
        GameEventDef {
            id: "pests".into(),
            name: "Silly Bugs".into(),
            message: "Oh no! Some silly bugs are tickling your flowers. 🐛".into(),
        },
        GameEventDef {
            id: "fair".into(),
            name: "The Town Fair".into(),
            message: "The Town Fair is here! Everyone wants beautiful flowers today! 🎀".into(),
        },
        GameEventDef {
            id: "icecream".into(),
            name: "Ice Cream Day".into(),
            message: "Yum! You spent coins on a giant ice cream cone! 🍦".into(),
        },
    ];
}

/// Flavor reasons for the mayor's random fines.
pub fn populate_mayor_reasons(reasons: &mut MayorReasons) {
    reasons.reasons = vec![
        "Grass-walking tax".into(),
        "No-hat fine".into(),
        "Puppy treat fee".into(),
        "Sunlight tax".into(),
        "Giggle license".into(),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_event_present() {
        let mut registry = EventRegistry::default();
        populate_events(&mut registry);

        let party = registry.events.iter().find(|e| e.id == "party").unwrap();
        assert_eq!(party.name, "The Mayor's Party");
    }

    #[test]
    fn test_every_event_has_a_message() {
        let mut registry = EventRegistry::default();
        populate_events(&mut registry);
        for event in &registry.events {
            assert!(!event.message.is_empty(), "{} has no message", event.id);
        }
    }
}
