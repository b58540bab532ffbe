use crate::domain::CityTier;
use crate::ingest::normalize_city_name;
use std::collections::HashMap;

const TIER_1: &[&str] = &[
    "Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai", "Kolkata", "Pune",
];

const TIER_2: &[&str] = &[
    "Ahmedabad", "Jaipur", "Surat", "Lucknow", "Kanpur", "Nagpur", "Indore", "Thane", "Bhopal",
    "Visakhapatnam", "Patna", "Vadodara", "Coimbatore", "Chandigarh", "Madurai", "Jamshedpur",
    "Raipur", "Allahabad", "Amritsar", "Varanasi", "Agra", "Nashik", "Faridabad", "Meerut",
    "Rajkot", "Srinagar", "Ludhiana", "Ghaziabad", "Navi Mumbai", "Vijayawada",
];

const TIER_3: &[&str] = &[
    "Gwalior", "Jabalpur", "Bhubaneswar", "Mysore", "Tiruchirappalli", "Salem", "Warangal", "Kochi",
    "Thiruvananthapuram", "Dehradun", "Guwahati", "Jalandhar", "Bareilly", "Aligarh", "Gorakhpur",
    "Bokaro Steel City", "Asansol", "Dhanbad", "Hubli", "Mangalore", "Belgaum", "Tirunelveli",
    "Udaipur", "Tiruppur", "Kozhikode", "Akola", "Kurnool", "Bellary", "Patiala", "Bhagalpur",
    "Muzaffarnagar", "Latur", "Dhule", "Rohtak", "Korba", "Bhilwara", "Muzaffarpur", "Ahmednagar",
    "Mathura", "Kollam", "Avadi", "Kadapa", "Sambalpur", "Bilaspur", "Shahjahanpur", "Satara",
    "Bijapur", "Rampur", "Shivamogga", "Chandrapur", "Junagadh", "Thrissur", "Alwar", "Bardhaman",
    "Nizamabad", "Parbhani", "Tumkur", "Khammam", "Panipat", "Darbhanga", "Dewas", "Ichalkaranji",
    "Karnal", "Bathinda", "Jalna", "Eluru", "Barasat", "Purnia", "Satna", "Mau", "Sonipat",
    "Farrukhabad", "Sagar", "Rourkela", "Durg", "Imphal", "Ratlam", "Hapur", "Anantapur", "Arrah",
    "Karimnagar", "Etawah", "Bharatpur", "Begusarai", "Noida", "Gurgaon", "Greater Noida",
    "Gandhinagar", "Kalyan", "Vasai", "Aurangabad", "Solapur", "Kolhapur", "Sangli", "Malegaon",
    "Jalgaon", "Bhusawal", "Amravati", "Nanded", "Osmanabad", "Bidar", "Gulbarga", "Raichur",
    "Hospet", "Davangere", "Hassan", "Mandya", "Chitradurga", "Tumakuru", "Kolar", "Chikkaballapur",
    "Ramanagara", "Hosur", "Krishnagiri", "Dharmapuri", "Erode", "Namakkal", "Karur", "Dindigul",
    "Theni", "Virudhunagar", "Sivakasi", "Thoothukudi", "Nagercoil", "Kanyakumari",
];
/// Quick-commerce market tiers keyed by city name.
pub fn default_city_tier_map() -> HashMap<String, CityTier> {
    [
        (CityTier::Tier1, TIER_1),
        (CityTier::Tier2, TIER_2),
        (CityTier::Tier3, TIER_3),
    ]
    .into_iter()
    .flat_map(|(tier, cities)| cities.iter().map(move |city| (city.to_string(), tier)))
    .collect()
}

/// Lookup keyed by normalized city name so `" navi  MUMBAI"` finds `Navi Mumbai`.
#[derive(Debug, Clone, Default)]
pub(crate) struct TierLookup {
    tiers: HashMap<String, CityTier>,
}

impl TierLookup {
    pub(crate) fn new(map: &HashMap<String, CityTier>) -> Self {
        let tiers = map
            .iter()
            .map(|(city, tier)| (normalize_city_name(city), *tier))
            .collect();
        Self { tiers }
    }

    pub(crate) fn tier_for(&self, city: &str) -> CityTier {
        self.tiers
            .get(&normalize_city_name(city))
            .copied()
            .unwrap_or(CityTier::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_covers_every_tier() {
        let map = default_city_tier_map();
        assert_eq!(map.get("Delhi"), Some(&CityTier::Tier1));
        assert_eq!(map.get("Navi Mumbai"), Some(&CityTier::Tier2));
        assert_eq!(map.get("Kanyakumari"), Some(&CityTier::Tier3));
        assert_eq!(map.len(), TIER_1.len() + TIER_2.len() + TIER_3.len());
    }

    #[test]
    fn lookup_normalizes_names_and_defaults_to_unknown() {
        let lookup = TierLookup::new(&default_city_tier_map());
        assert_eq!(lookup.tier_for("  navi   MUMBAI "), CityTier::Tier2);
        assert_eq!(lookup.tier_for("bokaro steel city"), CityTier::Tier3);
        assert_eq!(lookup.tier_for("Atlantis"), CityTier::Unknown);
    }
}
