use crate::helpers::{
    MockResponse, TEST_API_KEY, field_for, redlands_candidates, settings_for,
    spawn_mock_geocoder, unreachable_endpoint,
};
use claims::assert_none;
use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use geocoder_field::domain::CoordinateResult;
use geocoder_field::field::{ResolutionState, ValueChange};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

fn published(receiver: &mut UnboundedReceiver<ValueChange>) -> Vec<String> {
    let mut values = Vec::new();
    while let Ok(change) = receiver.try_recv() {
        values.push(change.detail);
    }
    values
}

#[tokio::test]
async fn known_address_publishes_first_candidate_latitude_first() {
    // Arrange
    let geocoder = spawn_mock_geocoder(vec![(
        "380 New York St, Redlands, CA",
        MockResponse::Json(redlands_candidates()),
    )])
    .await;
    let (field, mut receiver) = geocoder.field();

    // Act
    field
        .set_address("380 New York St, Redlands, CA")
        .unwrap()
        .await
        .unwrap();

    // Assert
    assert_eq!(published(&mut receiver), vec!["34.0556,-117.1956"]);
    assert_eq!(field.state(), ResolutionState::Resolved);
}

#[tokio::test]
async fn request_carries_query_fields_and_credential() {
    let geocoder = spawn_mock_geocoder(vec![]).await;
    let (field, _receiver) = geocoder.field();

    field
        .set_address("  380 New York St, Redlands, CA\t")
        .unwrap()
        .await
        .unwrap();

    let requests = geocoder.received_requests();
    assert_eq!(requests.len(), 1);
    let query = &requests[0];
    assert_eq!(query["f"], "json");
    assert_eq!(query["singleLine"], "380 New York St, Redlands, CA");
    assert_eq!(query["outFields"], "Addr_type");
    assert_eq!(query["apiKey"], TEST_API_KEY);
}

#[tokio::test]
async fn unknown_address_publishes_not_available() {
    let geocoder = spawn_mock_geocoder(vec![(
        "asdkfjasldkfj",
        MockResponse::Json(serde_json::json!({ "candidates": [] })),
    )])
    .await;
    let (field, mut receiver) = geocoder.field();

    field.set_address("asdkfjasldkfj").unwrap().await.unwrap();

    assert_eq!(published(&mut receiver), vec!["Coordinates not available"]);
    assert_eq!(field.state(), ResolutionState::NotFound);
}

#[tokio::test]
async fn network_error_publishes_geocoding_error() {
    let (field, mut receiver) = field_for(&settings_for(&unreachable_endpoint()));

    field.set_address("Main St").unwrap().await.unwrap();

    assert_eq!(published(&mut receiver), vec!["Geocoding error"]);
    assert_eq!(field.value(), Some(CoordinateResult::GeocodingError));
    assert_eq!(field.state(), ResolutionState::Failed);
}

#[tokio::test]
async fn slow_geocoder_times_out_with_geocoding_error() {
    // Arrange
    let geocoder = spawn_mock_geocoder(vec![(
        "Main St",
        MockResponse::Delayed(
            Duration::from_secs(5),
            Box::new(MockResponse::Json(redlands_candidates())),
        ),
    )])
    .await;
    let mut settings = geocoder.settings();
    settings.timeout_milliseconds = 200;
    let (field, mut receiver) = field_for(&settings);

    // Act
    field.set_address("Main St").unwrap().await.unwrap();

    // Assert
    assert_eq!(published(&mut receiver), vec!["Geocoding error"]);
    assert_eq!(field.state(), ResolutionState::Failed);
}

#[tokio::test]
async fn unusable_trailing_candidates_do_not_hide_the_first() {
    let geocoder = spawn_mock_geocoder(vec![(
        "380 New York St, Redlands, CA",
        MockResponse::Json(serde_json::json!({
            "candidates": [
                {
                    "location": { "x": -117.1956, "y": 34.0556 },
                    "score": "100",
                    "attributes": null
                },
                { "address": "New York St, Redlands, California" }
            ]
        })),
    )])
    .await;
    let (field, mut receiver) = geocoder.field();

    field
        .set_address("380 New York St, Redlands, CA")
        .unwrap()
        .await
        .unwrap();

    assert_eq!(published(&mut receiver), vec!["34.0556,-117.1956"]);
    assert_eq!(field.state(), ResolutionState::Resolved);
}

#[tokio::test]
async fn non_success_status_publishes_geocoding_error() {
    let geocoder = spawn_mock_geocoder(vec![
        ("server error", MockResponse::Status(500)),
        ("forbidden", MockResponse::Status(403)),
    ])
    .await;
    let (field, mut receiver) = geocoder.field();

    field.set_address("server error").unwrap().await.unwrap();
    field.set_address("forbidden").unwrap().await.unwrap();

    assert_eq!(
        published(&mut receiver),
        vec!["Geocoding error", "Geocoding error"]
    );
}

#[tokio::test]
async fn malformed_bodies_publish_geocoding_error() {
    let geocoder = spawn_mock_geocoder(vec![
        ("html", MockResponse::Raw("<html>Service unavailable</html>")),
        ("no candidates member", MockResponse::Json(serde_json::json!({ "results": [] }))),
        (
            "candidate without location",
            MockResponse::Json(serde_json::json!({ "candidates": [{ "address": "x" }] })),
        ),
    ])
    .await;
    let (field, mut receiver) = geocoder.field();

    for address in ["html", "no candidates member", "candidate without location"] {
        field.set_address(address).unwrap().await.unwrap();
        assert_eq!(
            published(&mut receiver),
            vec!["Geocoding error"],
            "The geocoder field did not fail for '{}'.",
            address
        );
    }
}

#[tokio::test]
async fn service_error_reported_with_200_publishes_geocoding_error() {
    let geocoder = spawn_mock_geocoder(vec![(
        "Main St",
        MockResponse::Json(serde_json::json!({
            "error": { "code": 498, "message": "Invalid Token", "details": [] }
        })),
    )])
    .await;
    let (field, mut receiver) = geocoder.field();

    field.set_address("Main St").unwrap().await.unwrap();

    assert_eq!(published(&mut receiver), vec!["Geocoding error"]);
}

#[tokio::test]
async fn blank_address_never_reaches_the_geocoder() {
    let geocoder = spawn_mock_geocoder(vec![]).await;
    let (field, mut receiver) = geocoder.field();

    for blank in ["", " ", "\n\t  "] {
        assert_none!(field.set_address(blank));
    }

    assert!(geocoder.received_requests().is_empty());
    assert!(published(&mut receiver).is_empty());
    assert_eq!(field.state(), ResolutionState::Idle);
}

#[tokio::test]
async fn resolving_the_same_address_twice_publishes_the_same_value() {
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let address = format!("12 {}, {}", street, city);
    let geocoder = spawn_mock_geocoder(vec![(
        address.as_str(),
        MockResponse::Json(serde_json::json!({
            "candidates": [{ "location": { "x": 8.5417, "y": 47.3769 } }]
        })),
    )])
    .await;
    let (field, mut receiver) = geocoder.field();

    field.set_address(&address).unwrap().await.unwrap();
    field.set_address(&address).unwrap().await.unwrap();

    assert_eq!(
        published(&mut receiver),
        vec!["47.3769,8.5417", "47.3769,8.5417"]
    );
    assert_eq!(geocoder.received_requests().len(), 2);
}
