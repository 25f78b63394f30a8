use super::*;

#[test]
fn stored_name_keeps_extension() {
    assert_eq!(stored_file_name("cat.png", 1_727_000_000_000), "1727000000000.png");
    assert_eq!(stored_file_name("archive.tar.gz", 5), "5.gz");
}

#[test]
fn stored_name_without_extension_is_bare_timestamp() {
    assert_eq!(stored_file_name("README", 42), "42");
    assert_eq!(stored_file_name("", 42), "42");
}

#[test]
fn now_ms_is_positive() {
    assert!(now_ms() > 0);
}

#[tokio::test]
async fn missing_file_maps_to_bad_request() {
    let response = UploadError::MissingFile.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn io_error_maps_to_internal_error() {
    let err = UploadError::Io(std::io::Error::other("disk full"));
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn response_uses_wire_field_names() {
    let body = serde_json::to_string(&UploadResponse {
        file_path: "/uploads/1.png".into(),
        original_name: "cat.png".into(),
    })
    .unwrap();
    assert_eq!(body, r#"{"filePath":"/uploads/1.png","originalName":"cat.png"}"#);
}
