use crate::shared::*;

/// Populate the PlantRegistry with the full flower catalog.
///
/// `growth_time` is the number of scheduler ticks a crop needs under the
/// baseline growth speed; cheap flowers mature fast and expensive ones pay
/// off slowly, so the catalog doubles as an investment ladder.
pub fn populate_plants(registry: &mut PlantRegistry) {
    registry.plants = vec![
        PlantDef {
            id: "daisy".into(),
            name: "Happy Daisy".into(),
            icon: "🌼".into(),
            base_seed_cost: 5,
            base_sell_price: 15,
            growth_time: 3,
        },
        PlantDef {
            id: "tulip".into(),
            name: "Pretty Tulip".into(),
            icon: "🌷".into(),
            base_seed_cost: 10,
            base_sell_price: 25,
            growth_time: 5,
        },
        PlantDef {
            id: "rose".into(),
            name: "Red Rose".into(),
            icon: "🌹".into(),
            base_seed_cost: 20,
            base_sell_price: 45,
            growth_time: 8,
        },
        PlantDef {
            id: "sunflower".into(),
            name: "Tall Sunnie".into(),
            icon: "🌻".into(),
            base_seed_cost: 15,
            base_sell_price: 35,
            growth_time: 7,
        },
        PlantDef {
            id: "orchid".into(),
            name: "Magic Orchid".into(),
            icon: "🌸".into(),
            base_seed_cost: 40,
            base_sell_price: 90,
            growth_time: 12,
        },
    ];
}
