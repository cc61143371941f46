use super::*;

fn remote(base: &str) -> HttpRemote {
    HttpRemote::new(base, Duration::from_secs(1)).unwrap()
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    assert_eq!(remote("http://localhost:3000/api/").base_url(), "http://localhost:3000/api");
}

#[test]
fn endpoint_paths() {
    let remote = remote("http://h");
    assert_eq!(remote.page_shapes_url("p1").unwrap().as_str(), "http://h/pages/p1/shapes");
    assert_eq!(remote.shapes_url().unwrap().as_str(), "http://h/shapes");
    assert_eq!(remote.shape_url("abc").unwrap().as_str(), "http://h/shapes/abc");
}

#[test]
fn endpoint_paths_keep_base_path() {
    let remote = remote("http://h/api/");
    assert_eq!(remote.shape_url("abc").unwrap().as_str(), "http://h/api/shapes/abc");
}

#[test]
fn ids_are_percent_encoded_as_one_segment() {
    let remote = remote("http://h/api");
    assert_eq!(remote.page_shapes_url("a/b?c#d").unwrap().as_str(), "http://h/api/pages/a%2Fb%3Fc%23d/shapes");
    assert_eq!(remote.shape_url("x y").unwrap().as_str(), "http://h/api/shapes/x%20y");
}

#[test]
fn rejects_unusable_base_urls() {
    assert!(matches!(HttpRemote::new("not a url", Duration::from_secs(1)), Err(RemoteError::InvalidBaseUrl(_))));
    assert!(matches!(HttpRemote::new("mailto:ops@example.com", Duration::from_secs(1)), Err(RemoteError::InvalidBaseUrl(_))));
}
