use serde::{Deserialize, Deserializer, Serialize};

/// A city as listed by `GET /hotels/api/cities/`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub code: String,
    pub name: String,
}

impl City {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A hotel as listed by `GET /hotels/api/hotels/{code}`.
///
/// The backend dumps model rows as-is, so the owning city may show up as
/// `city_id` and may be numeric. Extra columns (`id`) are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Hotel {
    pub code: String,
    pub name: String,
    #[serde(default, alias = "city_id", deserialize_with = "string_or_number")]
    pub city: String,
}

impl Hotel {
    pub fn new(code: impl Into<String>, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            city: city.into(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Text(String),
        Number(i64),
    }

    Ok(match Key::deserialize(deserializer)? {
        Key::Text(s) => s,
        Key::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_ignores_extra_fields() {
        let json = r#"{"id": 4, "code": "AMS", "name": "Amsterdam"}"#;
        let city: City = serde_json::from_str(json).unwrap();
        assert_eq!(city, City::new("AMS", "Amsterdam"));
    }

    #[test]
    fn test_hotel_with_city_code() {
        let json = r#"{"city": "AMS", "code": "AMS01", "name": "Hotel 1"}"#;
        let hotel: Hotel = serde_json::from_str(json).unwrap();
        assert_eq!(hotel, Hotel::new("AMS01", "Hotel 1", "AMS"));
    }

    #[test]
    fn test_hotel_with_numeric_city_id() {
        let json = r#"{"id": 1, "city_id": 7, "code": "AMS01", "name": "Hotel 1"}"#;
        let hotel: Hotel = serde_json::from_str(json).unwrap();
        assert_eq!(hotel.city, "7");
        assert_eq!(hotel.code, "AMS01");
    }

    #[test]
    fn test_hotel_without_city() {
        let json = r#"{"code": "AMS01", "name": "Hotel 1"}"#;
        let hotel: Hotel = serde_json::from_str(json).unwrap();
        assert!(hotel.city.is_empty());
    }

    #[test]
    fn test_city_missing_name_is_an_error() {
        let json = r#"{"code": "AMS"}"#;
        assert!(serde_json::from_str::<City>(json).is_err());
    }
}
