use serde::{Deserialize, Serialize};

/// Travel modes, serialized with the wire values the routing service uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Walk,
    Drive,
    Transit,
    Bicycle,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walk => "WALK",
            Self::Drive => "DRIVE",
            Self::Transit => "TRANSIT",
            Self::Bicycle => "BICYCLE",
        }
    }
}

/// An ordered pair of consecutive locations with an assigned travel mode.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from_id: String,
    pub to_id: String,
    pub mode: TravelMode,
}

impl RouteSegment {
    /// Key used for duration results, `"{from_id}-{to_id}"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.from_id, self.to_id)
    }

    pub fn references(&self, location_id: &str) -> bool {
        self.from_id == location_id || self.to_id == location_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_mode_wire_values() {
        let encoded = serde_json::to_string(&TravelMode::Transit).unwrap();
        assert_eq!(encoded, "\"TRANSIT\"");

        let decoded: TravelMode = serde_json::from_str("\"BICYCLE\"").unwrap();
        assert_eq!(decoded, TravelMode::Bicycle);
    }
}
