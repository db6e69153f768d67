//! Hand-authored catalog data
//!
//! The annual collective: 12 curated retreats plus 12 generated "Elemental
//! Path" journeys, and the marketplace add-ons. Built once and shared for
//! the lifetime of the process.

use std::sync::OnceLock;

use super::{AddOn, Coordinates, Duration, Event};

#[allow(clippy::too_many_arguments)]
fn retreat(
    id: u32,
    title: &str,
    theme: &str,
    location: &str,
    duration: Duration,
    days: &str,
    price: u32,
    x: f32,
    y: f32,
    photo: &str,
    description: &str,
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        theme: theme.to_string(),
        location: location.to_string(),
        duration,
        days: days.to_string(),
        price,
        thumbnail: format!(
            "https://images.unsplash.com/{}?auto=format&fit=crop&q=80&w=800",
            photo
        ),
        poster_url: format!(
            "https://images.unsplash.com/{}?auto=format&fit=crop&q=80&w=2000",
            photo
        ),
        description: description.to_string(),
        coordinates: Coordinates { x, y },
    }
}

fn build_catalog() -> Vec<Event> {
    let mut catalog = vec![
        retreat(
            1,
            "Heart-Center Healing",
            "Emotional Release",
            "Sacred Valley, Peru",
            Duration::MacroRetreat,
            "10 Days",
            3400,
            28.0,
            65.0,
            "photo-1518173946687-a4c8a9ba336c",
            "A deep dive into shamanic medicine and ancient Quechua traditions to unlock your emotional potential.",
        ),
        retreat(
            2,
            "Desert Drum Ritual",
            "Ancestral Connection",
            "Wadi Rum, Jordan",
            Duration::MicroRetreat,
            "3 Days",
            1200,
            58.0,
            48.0,
            "photo-1547234935-80c7145ec969",
            "Sync your heartbeat with the rhythm of the desert through rhythmic entrainment and vast perspective.",
        ),
        retreat(
            3,
            "Misty Forest Awakening",
            "Mindfulness",
            "Yakushima, Japan",
            Duration::MacroRetreat,
            "7 Days",
            2800,
            82.0,
            38.0,
            "photo-1441974231531-c6227db76b6e",
            "Walk through ancient cedar forests and rediscover your connection to the Earth spirit.",
        ),
        retreat(
            4,
            "Arctic Soul Bath",
            "Resilience",
            "Lofoten, Norway",
            Duration::MicroRetreat,
            "3 Days",
            1800,
            52.0,
            15.0,
            "photo-1520520731457-9283dd14aa66",
            "Cold exposure therapy and northern lights meditation to build grit and psychological flexibility.",
        ),
        retreat(
            5,
            "Sacred Silence",
            "Deep Introspection",
            "Rishikesh, India",
            Duration::MacroRetreat,
            "14 Days",
            3100,
            72.0,
            45.0,
            "photo-1545389336-cf09bd8c9b0e",
            "A two-week vow of silence in the foothills of the Himalayas to confront internal chatter.",
        ),
        retreat(
            6,
            "Volcanic Rebirth",
            "Transformation",
            "Reykjavik, Iceland",
            Duration::MicroRetreat,
            "4 Days",
            2200,
            45.0,
            20.0,
            "photo-1517639493569-5666a7b2f494",
            "Utilize geothermal energy rituals to burn away old versions of self.",
        ),
        retreat(
            7,
            "Amazonian Genesis",
            "Plant Medicine",
            "Iquitos, Peru",
            Duration::MacroRetreat,
            "12 Days",
            3900,
            31.0,
            75.0,
            "photo-1516533075015-a3838414c3cb",
            "Authentic Ayahuasca ceremonies with Shipibo elders in the heart of the rainforest.",
        ),
        retreat(
            8,
            "Sahara Starlight",
            "Cosmic Alignment",
            "Merzouga, Morocco",
            Duration::MicroRetreat,
            "4 Days",
            1500,
            48.0,
            42.0,
            "photo-1504198266287-1659872e6590",
            "Nocturnal navigation and astronomy-based meditation in the world's most silent dunes.",
        ),
        retreat(
            9,
            "Aegean Serenity",
            "Somatic Yoga",
            "Santorini, Greece",
            Duration::MicroRetreat,
            "5 Days",
            2100,
            55.0,
            35.0,
            "photo-1570077188670-e3a8d69ac5ff",
            "Combining movement therapy with the healing frequency of Mediterranean waters.",
        ),
        retreat(
            10,
            "Celtic Mist",
            "Druidic Wisdom",
            "Isle of Skye, Scotland",
            Duration::MacroRetreat,
            "8 Days",
            2600,
            46.0,
            12.0,
            "photo-1506377247377-2a5b3b417ebb",
            "Reconnecting with ancestral lore and stone circle energy work.",
        ),
        retreat(
            11,
            "Balinese Bloom",
            "Creative Flow",
            "Ubud, Bali",
            Duration::MacroRetreat,
            "10 Days",
            3200,
            85.0,
            65.0,
            "photo-1537996194471-e657df975ab4",
            "Art therapy and water purification rituals in tropical sanctuary.",
        ),
        retreat(
            12,
            "Atacama Void",
            "Sensory Reboot",
            "San Pedro, Chile",
            Duration::MicroRetreat,
            "4 Days",
            1900,
            25.0,
            85.0,
            "photo-1447005497523-267866384074",
            "Floating in salt lagoons and high-altitude sensory deprivation sessions.",
        ),
    ];

    // Fillers for a total of 24
    for i in 0u32..12 {
        let duration = if i % 2 == 0 {
            Duration::MacroRetreat
        } else {
            Duration::MicroRetreat
        };
        catalog.push(retreat(
            i + 13,
            &format!("Elemental Path {}", i + 13),
            "Expansion",
            "Sacred Site",
            duration,
            "7 Days",
            2400,
            (10 + (i * 7) % 80) as f32,
            (10 + (i * 11) % 80) as f32,
            &format!("photo-{}", 1_500_000_000_000u64 + u64::from(i)),
            "An AI-curated journey into the deep subconscious using unique local frequencies.",
        ));
    }

    catalog
}

fn build_addons() -> Vec<AddOn> {
    vec![
        AddOn {
            id: "1".to_string(),
            title: "Deep Tissue Shamanic Massage".to_string(),
            description: "90-minute session with local lineage healers.".to_string(),
            price: 150,
            icon: "fa-hands-holding".to_string(),
        },
        AddOn {
            id: "2".to_string(),
            title: "Carbon Offset (Double)".to_string(),
            description: "Fund 200% of your journey's footprint in forest conservation.".to_string(),
            price: 45,
            icon: "fa-leaf".to_string(),
        },
        AddOn {
            id: "3".to_string(),
            title: "Virtual Pre-Integration".to_string(),
            description: "3 calls with a psychologist before you travel.".to_string(),
            price: 250,
            icon: "fa-video".to_string(),
        },
    ]
}

/// The full retreat catalog
pub fn events() -> &'static [Event] {
    static CATALOG: OnceLock<Vec<Event>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog).as_slice()
}

/// The marketplace add-ons
pub fn addons() -> &'static [AddOn] {
    static ADDONS: OnceLock<Vec<AddOn>> = OnceLock::new();
    ADDONS.get_or_init(build_addons).as_slice()
}

/// Look up a retreat by id
pub fn find_event(id: &str) -> Option<&'static Event> {
    events().iter().find(|e| e.id == id)
}

/// Look up an add-on by id
pub fn find_addon(id: &str) -> Option<&'static AddOn> {
    addons().iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_ids() {
        let catalog = events();
        assert_eq!(catalog.len(), 24);
        assert_eq!(catalog[0].id, "1");
        assert_eq!(catalog[23].id, "24");
        assert_eq!(catalog[23].title, "Elemental Path 24");
    }

    #[test]
    fn test_lookup() {
        assert_eq!(find_event("4").map(|e| e.title.as_str()), Some("Arctic Soul Bath"));
        assert!(find_event("99").is_none());
        assert_eq!(find_addon("2").map(|a| a.price), Some(45));
    }

    #[test]
    fn test_coordinates_are_percentages() {
        for event in events() {
            assert!((0.0..=100.0).contains(&event.coordinates.x));
            assert!((0.0..=100.0).contains(&event.coordinates.y));
        }
    }

    #[test]
    fn test_distinct_theme_count() {
        // 12 curated themes plus the shared "Expansion" filler theme
        assert_eq!(crate::catalog::themes(events()).len(), 13);
    }
}
