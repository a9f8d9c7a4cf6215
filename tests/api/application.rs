use crate::helpers::{MockResponse, redlands_candidates, spawn_mock_geocoder};
use claims::assert_err;
use geocoder_field::configuration::{FieldSettings, Settings};
use geocoder_field::field::ValueChange;
use geocoder_field::startup::Application;
use tokio::io::AsyncReadExt;

#[tokio::test]
async fn application_prints_one_json_line_per_published_value() {
    // Arrange
    let geocoder = spawn_mock_geocoder(vec![(
        "380 New York St, Redlands, CA",
        MockResponse::Json(redlands_candidates()),
    )])
    .await;
    let configuration = Settings {
        geocoder: geocoder.settings(),
        field: FieldSettings::default(),
    };
    let application = Application::build(configuration).expect("Failed to build application.");
    let (output, mut reader) = tokio::io::duplex(4096);
    let input: &[u8] = b"\n   \n380 New York St, Redlands, CA\n";

    // Act
    application
        .run(input, output)
        .await
        .expect("Application failed.");
    let mut printed = String::new();
    reader.read_to_string(&mut printed).await.unwrap();

    // Assert
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 1);
    let change: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(
        change,
        serde_json::to_value(ValueChange::new("34.0556,-117.1956")).unwrap()
    );
    assert_eq!(geocoder.received_requests().len(), 1);
}

#[tokio::test]
async fn unreadable_input_still_flushes_published_values() {
    // Arrange
    let geocoder = spawn_mock_geocoder(vec![(
        "380 New York St, Redlands, CA",
        MockResponse::Json(redlands_candidates()),
    )])
    .await;
    let configuration = Settings {
        geocoder: geocoder.settings(),
        field: FieldSettings::default(),
    };
    let application = Application::build(configuration).expect("Failed to build application.");
    let (output, mut reader) = tokio::io::duplex(4096);
    let input: &[u8] = b"380 New York St, Redlands, CA\n\xff\xfe\n";

    // Act
    let result = application.run(input, output).await;
    let mut printed = String::new();
    reader.read_to_string(&mut printed).await.unwrap();

    // Assert
    assert_err!(&result);
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 1);
    let change: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(change["detail"], "34.0556,-117.1956");
}

#[tokio::test]
async fn application_applies_read_only_setting() {
    let geocoder = spawn_mock_geocoder(vec![]).await;
    let configuration = Settings {
        geocoder: geocoder.settings(),
        field: FieldSettings { read_only: true },
    };

    let application = Application::build(configuration).expect("Failed to build application.");

    assert!(application.field().is_read_only());
    assert!(!application.field().commit_edit("1,2"));
}

#[tokio::test]
async fn application_rejects_invalid_endpoint() {
    let geocoder = spawn_mock_geocoder(vec![]).await;
    let mut settings = geocoder.settings();
    settings.endpoint = "not a url".to_string();

    let result = Application::build(Settings {
        geocoder: settings,
        field: FieldSettings::default(),
    });

    assert!(result.is_err());
}
