use musicadvisor::error::AdvisorError;
use musicadvisor::types::{Page, PageRequest};
use musicadvisor::utils::*;

#[test]
fn test_authorization_url() {
    let url = authorization_url(
        "https://accounts.spotify.com/authorize",
        "abc123",
        "http://localhost:8080",
    );

    assert_eq!(
        url,
        "https://accounts.spotify.com/authorize?client_id=abc123&redirect_uri=http://localhost:8080&response_type=code"
    );
}

#[test]
fn test_redirect_port() {
    assert_eq!(redirect_port("http://localhost:8080").unwrap(), 8080);
    assert_eq!(redirect_port("http://127.0.0.1:9999/callback").unwrap(), 9999);

    // Scheme defaults apply when no port is given
    assert_eq!(redirect_port("http://localhost/callback").unwrap(), 80);
    assert_eq!(redirect_port("https://example.com").unwrap(), 443);
}

#[test]
fn test_redirect_port_invalid() {
    assert!(matches!(
        redirect_port("not a uri"),
        Err(AdvisorError::InvalidRedirectUri(_))
    ));
    assert!(matches!(
        redirect_port("localhost:8080"),
        Err(AdvisorError::InvalidRedirectUri(_))
    ));
}

#[test]
fn test_basic_credentials() {
    assert_eq!(
        basic_credentials("client", "secret"),
        "Basic Y2xpZW50OnNlY3JldA=="
    );

    // Should be deterministic and depend on both halves
    assert_eq!(
        basic_credentials("client", "secret"),
        basic_credentials("client", "secret")
    );
    assert_ne!(
        basic_credentials("client", "secret"),
        basic_credentials("client", "other")
    );
}

#[test]
fn test_page_request_offset() {
    assert_eq!(PageRequest { page: 1, size: 5 }.offset(), 0);
    assert_eq!(PageRequest { page: 3, size: 5 }.offset(), 10);
}

#[test]
fn test_page_count() {
    let page = |total| Page::<u32> {
        elements: Vec::new(),
        total,
        page_number: 1,
    };

    assert_eq!(page(0).page_count(5), 0);
    assert_eq!(page(5).page_count(5), 1);
    assert_eq!(page(6).page_count(5), 2);
    assert_eq!(page(6).page_count(0), 0);
}
