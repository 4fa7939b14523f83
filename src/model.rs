//! User records as served by the directory endpoint.
//!
//! The endpoint returns a JSON array of camelCase objects. Decoding is done
//! per element so one bad record does not take the whole listing down:
//! see [`decode_users`].
use serde::Deserialize;
use std::collections::HashSet;

use crate::error::FetchError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub website: String,
    pub address: Address,
    pub company: Company,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    #[serde(default)]
    pub geo: Option<Geo>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

impl User {
    /// Every field of the record as `(label, value)` pairs, in display order.
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        let geo = self
            .address
            .geo
            .as_ref()
            .map(|g| format!("{}, {}", g.lat, g.lng))
            .unwrap_or_default();
        vec![
            ("Name", self.name.clone()),
            ("Username", self.username.clone()),
            ("Email", self.email.clone()),
            ("Phone", self.phone.clone()),
            ("Street", self.address.street.clone()),
            ("Suite", self.address.suite.clone()),
            ("City", self.address.city.clone()),
            ("Zipcode", self.address.zipcode.clone()),
            ("Geo", geo),
            ("Company", self.company.name.clone()),
            ("Catch Phrase", self.company.catch_phrase.clone()),
            ("Business Service", self.company.bs.clone()),
            ("Website", self.website.clone()),
        ]
    }
}

/// Decode a response body into users.
///
/// The body must be a JSON array. Elements that do not match the record
/// shape, and elements repeating an earlier `id`, are dropped with a warning.
pub fn decode_users(body: &[u8]) -> Result<Vec<User>, FetchError> {
    let raw: Vec<serde_json::Value> = serde_json::from_slice(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    let mut seen = HashSet::with_capacity(raw.len());
    let mut users = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<User>(value) {
            Ok(user) => {
                if seen.insert(user.id) {
                    users.push(user);
                } else {
                    tracing::warn!(index, id = user.id, "dropping user record with duplicate id");
                }
            }
            Err(err) => {
                tracing::warn!(index, error = %err, "dropping malformed user record");
            }
        }
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEANNE: &str = r#"{
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    }"#;

    #[test]
    fn decodes_full_record() {
        let body = format!("[{LEANNE}]");
        let users = decode_users(body.as_bytes()).unwrap();
        assert_eq!(users.len(), 1);
        let u = &users[0];
        assert_eq!(u.name, "Leanne Graham");
        assert_eq!(u.address.city, "Gwenborough");
        assert_eq!(u.company.catch_phrase, "Multi-layered client-server neural-net");
        assert_eq!(u.address.geo.as_ref().map(|g| g.lat.as_str()), Some("-37.3159"));
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let body = r#"[{"id":2,"name":"Ervin Howell","username":"Antonette","email":"Shanna@melissa.tv",
            "phone":"010-692-6593","address":{"city":"Wisokyburgh","zipcode":"90566-7771"},
            "company":{"name":"Deckow-Crist"}}]"#;
        let users = decode_users(body.as_bytes()).unwrap();
        assert_eq!(users[0].website, "");
        assert_eq!(users[0].address.street, "");
        assert!(users[0].address.geo.is_none());
        assert_eq!(users[0].company.bs, "");
    }

    #[test]
    fn drops_records_missing_required_fields() {
        let body = format!(r#"[{LEANNE}, {{"id": 7, "name": "No Address"}}]"#);
        let users = decode_users(body.as_bytes()).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 1);
    }

    #[test]
    fn drops_duplicate_ids_keeping_first() {
        let body = format!("[{LEANNE}, {LEANNE}]");
        let users = decode_users(body.as_bytes()).unwrap();
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn non_array_body_is_malformed() {
        let err = decode_users(br#"{"error":"nope"}"#).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
        let err = decode_users(b"<html>").unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[test]
    fn empty_array_is_ok() {
        assert!(decode_users(b"[]").unwrap().is_empty());
    }

    #[test]
    fn detail_fields_cover_nested_records() {
        let body = format!("[{LEANNE}]");
        let user = decode_users(body.as_bytes()).unwrap().remove(0);
        let fields = user.detail_fields();
        let get = |label: &str| {
            fields
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("City"), "Gwenborough");
        assert_eq!(get("Company"), "Romaguera-Crona");
        assert_eq!(get("Geo"), "-37.3159, 81.1496");
        assert_eq!(get("Website"), "hildegard.org");
        assert_eq!(fields.len(), 13);
    }
}
