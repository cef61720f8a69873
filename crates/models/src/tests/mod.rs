//! Serialization tests for the on-disk document shape.

use anyhow::Result;
use serde_json::{json, Value};

use crate::{Customer, Entity, Movie, Theater};

#[test]
fn customer_json_uses_camel_case_and_flat_meta() -> Result<()> {
    let mut c = Customer::new("Ann", "Lee", Some("ann@example.com".into()), None);
    c.meta.id = Some(1);
    let v: Value = serde_json::to_value(&c)?;
    let obj = v.as_object().expect("object");
    for key in ["id", "createdAt", "updatedAt", "firstName", "lastName", "email", "phoneNumber", "loyaltyPoints"] {
        assert!(obj.contains_key(key), "missing {key}");
    }
    assert_eq!(obj["id"], json!(1));
    assert_eq!(obj["phoneNumber"], Value::Null);
    assert!(!obj.contains_key("meta"));
    Ok(())
}

#[test]
fn missing_optional_keys_take_defaults() -> Result<()> {
    let movie: Movie = serde_json::from_value(json!({
        "id": 3,
        "createdAt": "2024-01-10 18:00:00",
        "updatedAt": "2024-01-10 18:00:00",
        "title": "Alien",
        "genre": "Horror",
        "durationMinutes": 117
    }))?;
    assert_eq!(movie.id(), Some(3));
    assert_eq!(movie.rating, 0.0);
    assert!(movie.director.is_none());
    assert!(movie.validate().is_ok());

    let theater: Theater = serde_json::from_value(json!({
        "id": 2,
        "createdAt": "2024-01-10 18:00:00",
        "updatedAt": "2024-01-10 18:00:00",
        "name": "Hall B",
        "capacity": 80,
        "screenType": "Standard"
    }))?;
    assert!(theater.has_wheelchair_access);
    assert!(theater.current_movie_ids().is_empty());
    Ok(())
}

#[test]
fn unknown_keys_are_ignored_and_duplicate_ids_collapsed() -> Result<()> {
    let theater: Theater = serde_json::from_value(json!({
        "id": 5,
        "createdAt": "2024-01-10 18:00:00",
        "updatedAt": "2024-01-11 09:30:00",
        "name": "Hall C",
        "capacity": 200,
        "screenType": "4DX",
        "hasWheelchairAccess": false,
        "currentMovieIds": [4, 9, 4, 1],
        "legacyField": "ignored"
    }))?;
    assert!(!theater.has_wheelchair_access);
    assert_eq!(theater.current_movie_ids(), &[4, 9, 1]);
    Ok(())
}

#[test]
fn record_survives_a_round_trip() -> Result<()> {
    let mut m = Movie::new("Arrival", "Drama", 116, Some("Denis Villeneuve".into()), None);
    m.meta.id = Some(12);
    m.rating = 8.4;
    m.description = Some("Linguist meets heptapods".into());
    let text = serde_json::to_string_pretty(&vec![m.clone()])?;
    let back: Vec<Movie> = serde_json::from_str(&text)?;
    assert_eq!(back, vec![m]);
    Ok(())
}
