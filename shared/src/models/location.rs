//! Monitored city gazetteer

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::GpsCoordinates;

/// A city the weather monitor knows how to look up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitoredCity {
    pub name: &'static str,
    /// Latitude scaled by 10^4
    lat_e4: i64,
    /// Longitude scaled by 10^4
    lon_e4: i64,
}

impl MonitoredCity {
    const fn new(name: &'static str, lat_e4: i64, lon_e4: i64) -> Self {
        Self {
            name,
            lat_e4,
            lon_e4,
        }
    }

    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::new(Decimal::new(self.lat_e4, 4), Decimal::new(self.lon_e4, 4))
    }
}

/// Serializable view of a monitored city
#[derive(Debug, Clone, Serialize)]
pub struct CityInfo {
    pub name: &'static str,
    pub coordinates: GpsCoordinates,
}

impl From<&MonitoredCity> for CityInfo {
    fn from(city: &MonitoredCity) -> Self {
        Self {
            name: city.name,
            coordinates: city.coordinates(),
        }
    }
}

pub const MONITORED_CITIES: &[MonitoredCity] = &[
    MonitoredCity::new("Mumbai", 190_760, 728_777),
    MonitoredCity::new("Delhi", 287_041, 771_025),
    MonitoredCity::new("Bangalore", 129_716, 775_946),
    MonitoredCity::new("Hyderabad", 173_850, 784_867),
    MonitoredCity::new("Chennai", 130_827, 802_707),
    MonitoredCity::new("Kolkata", 225_726, 883_639),
    MonitoredCity::new("Pune", 185_204, 738_567),
    MonitoredCity::new("Ahmedabad", 230_225, 725_714),
    MonitoredCity::new("Surat", 211_702, 728_311),
    MonitoredCity::new("Jaipur", 269_124, 757_873),
    MonitoredCity::new("Lucknow", 268_467, 809_462),
    MonitoredCity::new("Kanpur", 264_499, 803_319),
    MonitoredCity::new("Nagpur", 211_458, 790_882),
    MonitoredCity::new("Visakhapatnam", 176_868, 832_185),
    MonitoredCity::new("Indore", 227_196, 758_577),
    MonitoredCity::new("Thane", 192_183, 729_781),
    MonitoredCity::new("Bhopal", 232_599, 774_126),
    MonitoredCity::new("Patna", 255_941, 851_376),
    MonitoredCity::new("Vadodara", 223_072, 731_812),
    MonitoredCity::new("Ghaziabad", 286_692, 774_538),
    MonitoredCity::new("Ludhiana", 309_010, 758_573),
    MonitoredCity::new("Coimbatore", 110_168, 769_558),
    MonitoredCity::new("Agra", 271_767, 780_081),
    MonitoredCity::new("Madurai", 99_252, 781_198),
];

/// Find a monitored city by name, ignoring ASCII case and surrounding space
pub fn find_city(name: &str) -> Option<&'static MonitoredCity> {
    let name = name.trim();
    MONITORED_CITIES
        .iter()
        .find(|city| city.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_find_city_is_case_insensitive() {
        let city = find_city("  mumbai ").unwrap();
        assert_eq!(city.name, "Mumbai");
        let coords = city.coordinates();
        assert_eq!(coords.latitude, Decimal::from_str("19.0760").unwrap());
        assert_eq!(coords.longitude, Decimal::from_str("72.8777").unwrap());
    }

    #[test]
    fn test_unknown_city() {
        assert!(find_city("Atlantis").is_none());
    }

    #[test]
    fn test_city_names_are_unique() {
        let mut names: Vec<_> = MONITORED_CITIES.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MONITORED_CITIES.len());
    }
}
