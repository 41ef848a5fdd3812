//! Indian states and their districts, used by the birth form's location pickers

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct District {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct State {
    pub value: &'static str,
    pub label: &'static str,
    pub districts: &'static [District],
}

macro_rules! districts {
    ($(($value:expr, $label:expr)),* $(,)?) => {
        &[$(District { value: $value, label: $label }),*]
    };
}

pub const INDIAN_STATES: &[State] = &[
    State {
        value: "maharashtra",
        label: "Maharashtra",
        districts: districts![
            ("mumbai", "Mumbai"),
            ("pune", "Pune"),
            ("nagpur", "Nagpur"),
            ("thane", "Thane"),
            ("nashik", "Nashik"),
        ],
    },
    State {
        value: "delhi",
        label: "Delhi",
        districts: districts![
            ("new-delhi", "New Delhi"),
            ("north-delhi", "North Delhi"),
            ("south-delhi", "South Delhi"),
            ("east-delhi", "East Delhi"),
            ("west-delhi", "West Delhi"),
        ],
    },
    State {
        value: "karnataka",
        label: "Karnataka",
        districts: districts![
            ("bangalore", "Bangalore"),
            ("mysore", "Mysore"),
            ("hubli", "Hubli"),
            ("mangalore", "Mangalore"),
            ("belgaum", "Belgaum"),
        ],
    },
    State {
        value: "tamil-nadu",
        label: "Tamil Nadu",
        districts: districts![
            ("chennai", "Chennai"),
            ("coimbatore", "Coimbatore"),
            ("madurai", "Madurai"),
            ("salem", "Salem"),
            ("trichy", "Trichy"),
        ],
    },
    State {
        value: "uttar-pradesh",
        label: "Uttar Pradesh",
        districts: districts![
            ("lucknow", "Lucknow"),
            ("kanpur", "Kanpur"),
            ("agra", "Agra"),
            ("varanasi", "Varanasi"),
            ("meerut", "Meerut"),
        ],
    },
    State {
        value: "andaman-nicobar",
        label: "Andaman & Nicobar Islands",
        districts: districts![
            ("south-andaman", "South Andaman"),
            ("north-middle-andaman", "North & Middle Andaman"),
            ("nicobar", "Nicobar"),
        ],
    },
    State {
        value: "chandigarh",
        label: "Chandigarh",
        districts: districts![("chandigarh", "Chandigarh")],
    },
    State {
        value: "dadra-nagar-haveli",
        label: "Dadra & Nagar Haveli and Daman & Diu",
        districts: districts![
            ("dadra-nagar-haveli", "Dadra & Nagar Haveli"),
            ("daman", "Daman"),
            ("diu", "Diu"),
        ],
    },
    State {
        value: "jammu-kashmir",
        label: "Jammu & Kashmir",
        districts: districts![
            ("srinagar", "Srinagar"),
            ("jammu", "Jammu"),
            ("anantnag", "Anantnag"),
            ("baramulla", "Baramulla"),
            ("udhampur", "Udhampur"),
        ],
    },
    State {
        value: "ladakh",
        label: "Ladakh",
        districts: districts![("leh", "Leh"), ("kargil", "Kargil")],
    },
    State {
        value: "lakshadweep",
        label: "Lakshadweep",
        districts: districts![
            ("kavaratti", "Kavaratti"),
            ("agatti", "Agatti"),
            ("amini", "Amini"),
        ],
    },
    State {
        value: "puducherry",
        label: "Puducherry",
        districts: districts![
            ("puducherry", "Puducherry"),
            ("karaikal", "Karaikal"),
            ("mahe", "Mahe"),
            ("yanam", "Yanam"),
        ],
    },
];

pub fn find_state(value: &str) -> Option<&'static State> {
    INDIAN_STATES.iter().find(|s| s.value == value)
}

impl State {
    pub fn find_district(&self, value: &str) -> Option<&'static District> {
        self.districts.iter().find(|d| d.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_lookup_returns_its_districts() {
        let state = find_state("karnataka").unwrap();
        assert_eq!(state.label, "Karnataka");
        assert_eq!(state.find_district("mysore").unwrap().label, "Mysore");
        assert!(state.find_district("mumbai").is_none());
        assert!(find_state("atlantis").is_none());
    }

    #[test]
    fn state_values_are_unique() {
        for (i, a) in INDIAN_STATES.iter().enumerate() {
            for b in &INDIAN_STATES[i + 1..] {
                assert_ne!(a.value, b.value);
            }
        }
    }
}
