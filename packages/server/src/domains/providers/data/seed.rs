//! Fixed dataset behind the mock directory

use crate::common::utils::Coordinates;
use crate::domains::providers::models::{Address, Provider};

const LOCATIONS: &[&str] = &[
    "Detroit, MI",
    "Ann Arbor, MI",
    "Grand Rapids, MI",
    "Lansing, MI",
    "Dearborn, MI",
    "Troy, MI",
    "Southfield, MI",
    "Royal Oak, MI",
    "Novi, MI",
    "Farmington Hills, MI",
];

/// City names offered by location autocomplete
pub fn seed_locations() -> &'static [&'static str] {
    LOCATIONS
}

/// The seeded providers, both practicing in Detroit
pub fn seed_providers() -> Vec<Provider> {
    vec![
        Provider {
            id: "1".to_string(),
            name: "Dr. Sarah Johnson".to_string(),
            credentials: "PhD, Licensed Clinical Psychologist".to_string(),
            specialty: "Anxiety & Depression".to_string(),
            image_url: "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=400"
                .to_string(),
            gender: "Female".to_string(),
            rating: 4.9,
            review_count: 127,
            insurance: strings(&["Blue Cross Blue Shield", "Aetna", "Cigna"]),
            approaches: strings(&["CBT", "Mindfulness", "Solution-Focused"]),
            languages: strings(&["English", "Spanish"]),
            accepting_new_clients: true,
            price: 150.0,
            next_available: "Tomorrow, 2:00 PM".to_string(),
            location: "Detroit, MI".to_string(),
            coordinates: Coordinates::new(42.3314, -83.0458),
            address: Address {
                street: "1200 Woodward Ave, Suite 400".to_string(),
                city: "Detroit".to_string(),
                state: "MI".to_string(),
                zip: "48226".to_string(),
            },
            phone: "(313) 555-0142".to_string(),
            email: "sjohnson@example.com".to_string(),
        },
        Provider {
            id: "2".to_string(),
            name: "Dr. Michael Chen".to_string(),
            credentials: "PsyD, LMFT".to_string(),
            specialty: "Trauma & PTSD".to_string(),
            image_url: "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?w=400"
                .to_string(),
            gender: "Male".to_string(),
            rating: 4.8,
            review_count: 93,
            insurance: strings(&["United Healthcare", "Aetna", "Medicare"]),
            approaches: strings(&["EMDR", "Trauma-Focused CBT", "Psychodynamic"]),
            languages: strings(&["English", "Mandarin"]),
            accepting_new_clients: true,
            price: 175.0,
            next_available: "Friday, 10:00 AM".to_string(),
            location: "Detroit, MI".to_string(),
            coordinates: Coordinates::new(42.3486, -83.0567),
            address: Address {
                street: "3031 W Grand Blvd, Suite 210".to_string(),
                city: "Detroit".to_string(),
                state: "MI".to_string(),
                zip: "48202".to_string(),
            },
            phone: "(313) 555-0187".to_string(),
            email: "mchen@example.com".to_string(),
        },
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
