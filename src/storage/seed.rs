// Built-in spots used when no asset is available.

use uuid::Uuid;

use crate::domain::{Review, Spot, SpotId};

const FUSHIMI_INARI: Uuid = Uuid::from_u128(0x501a_93dc_6bdb_47b1_bbe7_8d61_b44a_10ee);
const SHIRAKAWA_GO: Uuid = Uuid::from_u128(0xacf4_d3a9_4d46_4b5a_8c18_3c83_d5a6_0644);
const DOGO_ONSEN: Uuid = Uuid::from_u128(0xfa96_75ae_5947_4a49_ac14_6d07_be3a_1929);

/// The built-in seed spots.
///
/// Ids are fixed so favorites and notes survive between runs.
#[must_use]
pub fn seed_spots() -> Vec<Spot> {
    vec![
        Spot::new(SpotId::from_uuid(FUSHIMI_INARI), "Fushimi Inari Taisha")
            .with_location("Kyoto", "Japan")
            .with_description(
                "Kyoto's classic shrine, famous for the dreamlike tunnels of thousands of \
                 vermilion torii gates. Quiet in the early morning and ideal for photos.",
            )
            .with_icon("torii")
            .with_highlights(["Senbon torii", "Shrine circuit", "Early-morning hike"])
            .with_favorite(true)
            .with_rating(4.9)
            .with_tags(["History", "Shrines", "Kyoto"])
            .with_reviews(Review::samples("Fushimi Inari Taisha")),
        Spot::new(SpotId::from_uuid(SHIRAKAWA_GO), "Shirakawa-go Gassho Village")
            .with_location("Gifu", "Japan")
            .with_description(
                "A mountain village of steep thatched gassho-style farmhouses, listed as a \
                 World Heritage Site. Every season paints a different landscape.",
            )
            .with_icon("house.lodge")
            .with_highlights(["Gassho houses", "Snow scenery", "Local cuisine"])
            .with_rating(4.7)
            .with_tags(["World Heritage", "Nature", "Experiences"])
            .with_reviews(Review::samples("Shirakawa-go")),
        Spot::new(SpotId::from_uuid(DOGO_ONSEN), "Dogo Onsen Honkan")
            .with_location("Matsuyama", "Japan")
            .with_description(
                "Said to be Japan's oldest public bathhouse. Take your time with the wooden \
                 architecture and the hot-spring culture around it.",
            )
            .with_icon("water.waves")
            .with_highlights(["Hot springs", "Wooden architecture", "Onsen town stroll"])
            .with_rating(4.6)
            .with_tags(["Hot springs", "Shikoku", "Culture"])
            .with_reviews(Review::samples("Dogo Onsen")),
    ]
}
