use super::*;

fn test_headers() -> ClientHeaders {
    ClientHeaders {
        city_id: "6".to_string(),
        pincode: "201010".to_string(),
        client_id: "web-1.0".to_string(),
        origin: "https://www.furlenco.com".to_string(),
        user_agent: "harvest-test/0.1".to_string(),
    }
}

fn test_filter() -> CatalogFilter {
    CatalogFilter {
        collection_type: "CATEGORY_RENT".to_string(),
        city: "noida".to_string(),
        collection: "bedroom-furniture-on-rent".to_string(),
    }
}

fn client_for(base: &str) -> CatalogClient {
    CatalogClient::from_parts(
        Url::parse(base).unwrap(),
        test_filter(),
        &test_headers(),
        5,
    )
    .unwrap()
}

#[test]
fn listing_url_carries_filter_query() {
    let client = client_for("https://ciago.furlenco.com/api/v1/catalogue/products");
    assert_eq!(
        client.listing_url().as_str(),
        "https://ciago.furlenco.com/api/v1/catalogue/products?collectionType=CATEGORY_RENT&city=noida&collection=bedroom-furniture-on-rent&collectionName=bedroom-furniture-on-rent"
    );
}

#[test]
fn listing_url_encodes_filter_values() {
    let mut filter = test_filter();
    filter.city = "new delhi".to_string();
    let client = CatalogClient::from_parts(
        Url::parse("https://example.com/products").unwrap(),
        filter,
        &test_headers(),
        5,
    )
    .unwrap();
    assert!(client.listing_url().as_str().contains("city=new+delhi"));
}

#[test]
fn detail_url_appends_permalink_segment() {
    let client = client_for("https://ciago.furlenco.com/api/v1/catalogue/products");
    let url = client.detail_url("hudson-queen-bed").unwrap();
    assert_eq!(
        url.as_str(),
        "https://ciago.furlenco.com/api/v1/catalogue/products/hudson-queen-bed"
    );
}

#[test]
fn detail_url_handles_trailing_slash_base() {
    let client = client_for("https://example.com/products/");
    let url = client.detail_url("oak-desk").unwrap();
    assert_eq!(url.as_str(), "https://example.com/products/oak-desk");
}

#[test]
fn detail_url_escapes_slashes_in_permalink() {
    let client = client_for("https://example.com/products");
    let url = client.detail_url("a/b c").unwrap();
    assert_eq!(url.as_str(), "https://example.com/products/a%2Fb%20c");
}

#[test]
fn detail_url_drops_base_query() {
    let client = client_for("https://example.com/products?debug=1");
    let url = client.detail_url("oak-desk").unwrap();
    assert_eq!(url.as_str(), "https://example.com/products/oak-desk");
}

#[test]
fn detail_url_rejects_non_base_url() {
    let client = client_for("mailto:ops@example.com");
    let err = client.detail_url("oak-desk").unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidUrl { .. }),
        "expected InvalidUrl, got: {err:?}"
    );
}

#[test]
fn static_headers_include_region_and_client_id() {
    let map = static_headers(&test_headers()).unwrap();
    assert_eq!(map.get("x-city-id").unwrap(), "6");
    assert_eq!(map.get("x-pincode").unwrap(), "201010");
    assert_eq!(map.get("moriarty").unwrap(), "web-1.0");
    assert_eq!(map.get("origin").unwrap(), "https://www.furlenco.com");
    assert_eq!(
        map.get("accept").unwrap(),
        "application/json, text/plain, */*"
    );
}

#[test]
fn static_headers_reject_control_characters() {
    let mut headers = test_headers();
    headers.pincode = "2010\n10".to_string();
    let err = static_headers(&headers).unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidHeader { name: "x-pincode", .. }),
        "expected InvalidHeader(x-pincode), got: {err:?}"
    );
}
