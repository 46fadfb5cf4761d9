use super::*;

#[test]
fn new_accepts_https_endpoint() {
    let client = FinderClient::new("https://api.zoppl.com/api/fashion/find", "zoppl-test/0.1")
        .expect("expected valid client");
    assert_eq!(
        client.endpoint().as_str(),
        "https://api.zoppl.com/api/fashion/find"
    );
}

#[test]
fn new_rejects_unparsable_endpoint() {
    let result = FinderClient::new("not-a-url", "zoppl-test/0.1");
    assert!(
        matches!(result, Err(FinderError::InvalidEndpoint { .. })),
        "expected InvalidEndpoint"
    );
}

#[test]
fn new_rejects_non_http_scheme() {
    let result = FinderClient::new("ftp://example.com/find", "zoppl-test/0.1");
    assert!(
        matches!(result, Err(FinderError::InvalidEndpoint { ref reason, .. }) if reason.contains("ftp")),
        "expected InvalidEndpoint for ftp scheme"
    );
}

#[test]
fn error_message_reads_message_field() {
    assert_eq!(
        error_message(r#"{"status": false, "message": "No file selected"}"#),
        "No file selected"
    );
}

#[test]
fn error_message_defaults_when_missing_or_unparsable() {
    assert_eq!(error_message(r#"{"status": false}"#), "Server error occurred");
    assert_eq!(error_message(r#"{"message": ""}"#), "Server error occurred");
    assert_eq!(error_message("<html>502 Bad Gateway</html>"), "Server error occurred");
    assert_eq!(error_message(""), "Server error occurred");
}
