//! Provider client tests against a local mock HTTP server: schema mapping,
//! credential headers, upstream error statuses and parse failures.

use bookscout::providers::{
    AladinApi, AladinClient, AladinSearchRequest, KakaoApi, KakaoClient, KakaoSearchRequest,
    NaverApi, NaverClient, NaverSearchRequest, ProviderError, ProviderKind,
};
use mockito::Matcher;

const ALADIN_BODY: &str = r#"{
    "version": "20131101",
    "title": "알라딘 검색결과 - 어린왕자",
    "link": "http://www.aladin.co.kr/search/wsearchresult.aspx",
    "pubDate": "Wed, 06 Nov 2024 17:34:14 GMT",
    "totalResults": 145,
    "startIndex": 1,
    "query": "어린왕자",
    "searchCategoryId": 0,
    "searchCategoryName": "전체",
    "item": [{
        "title": "어린왕자",
        "author": "생텍쥐페리",
        "pubDate": "2015-10-20",
        "isbn13": "9788932917245",
        "itemId": 263468323,
        "priceSales": 10620,
        "priceStandard": 11800,
        "cover": "https://image.aladin.co.kr/product/2634/68/cover/8932917248_1.jpg",
        "publisher": "문예출판사"
    }]
}"#;

const KAKAO_BODY: &str = r#"{
    "meta": { "total_count": 100, "pageable_count": 50, "is_end": false },
    "documents": [{
        "title": "클린 코드",
        "authors": ["로버트 C. 마틴"],
        "datetime": "2013-12-24T00:00:00.000+09:00",
        "isbn": "8966260950 9788966260959",
        "price": 33000,
        "sale_price": 29700,
        "publisher": "인사이트",
        "thumbnail": "https://search1.kakaocdn.net/thumb/clean-code.jpg",
        "translators": ["박재호", "이해영"]
    }]
}"#;

const NAVER_BODY: &str = r#"{
    "lastBuildDate": "Wed, 06 Nov 2024 17:34:14 +0900",
    "total": 321,
    "start": 1,
    "display": 10,
    "items": [{
        "title": "Clean Code 클린 코드",
        "image": "https://shopping-phinf.pstatic.net/32453495618.jpg",
        "author": "로버트 C. 마틴",
        "discount": "29700",
        "publisher": "인사이트",
        "pubdate": "20131224",
        "isbn": "9788966260959",
        "description": "애자일 소프트웨어 장인 정신"
    }]
}"#;

#[tokio::test]
async fn aladin_search_maps_the_native_schema() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/ttb/api/ItemSearch.aspx")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ttbkey".into(), "test-ttb-key".into()),
            Matcher::UrlEncoded("Query".into(), "어린왕자".into()),
            Matcher::UrlEncoded("QueryType".into(), "Keyword".into()),
            Matcher::UrlEncoded("MaxResults".into(), "10".into()),
            Matcher::UrlEncoded("output".into(), "js".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ALADIN_BODY)
        .create_async()
        .await;

    let client = AladinClient::with_base_url("test-ttb-key", server.url());
    let response = client
        .search(&AladinSearchRequest::new("어린왕자"))
        .await
        .unwrap();

    assert_eq!(response.total_results, 145);
    assert_eq!(response.item.len(), 1);
    assert_eq!(response.item[0].isbn13, "9788932917245");
    mock.assert_async().await;
}

#[tokio::test]
async fn kakao_search_sends_the_kakao_ak_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v3/search/book")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "클린코드".into()),
            Matcher::UrlEncoded("target".into(), "title".into()),
        ]))
        .match_header("Authorization", "KakaoAK test-rest-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(KAKAO_BODY)
        .create_async()
        .await;

    let client = KakaoClient::with_base_url("test-rest-key", server.url());
    let response = client
        .search(&KakaoSearchRequest::new("클린코드"))
        .await
        .unwrap();

    assert_eq!(response.meta.total_count, 100);
    assert_eq!(response.documents[0].sale_price, 29700);
    mock.assert_async().await;
}

#[tokio::test]
async fn naver_search_sends_the_client_credential_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/search/book.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "클린코드".into()),
            Matcher::UrlEncoded("display".into(), "10".into()),
            Matcher::UrlEncoded("start".into(), "1".into()),
        ]))
        .match_header("X-Naver-Client-Id", "test-id")
        .match_header("X-Naver-Client-Secret", "test-secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(NAVER_BODY)
        .create_async()
        .await;

    let client = NaverClient::with_base_url("test-id", "test-secret", server.url());
    let response = client
        .search(&NaverSearchRequest::new("클린코드"))
        .await
        .unwrap();

    assert_eq!(response.total, 321);
    assert_eq!(response.items[0].isbn, "9788966260959");
    mock.assert_async().await;
}

#[tokio::test]
async fn upstream_error_status_becomes_an_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/search/book.json")
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;

    let client = NaverClient::with_base_url("id", "secret", server.url());
    let err = client
        .search(&NaverSearchRequest::new("rust"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Api {
            provider: ProviderKind::Naver,
            status: 429
        }
    ));
}

#[tokio::test]
async fn malformed_payload_becomes_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v3/search/book")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"documents": "not-a-list"}"#)
        .create_async()
        .await;

    let client = KakaoClient::with_base_url("key", server.url());
    let err = client
        .search(&KakaoSearchRequest::new("rust"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Parse(_)));
}

#[tokio::test]
async fn invalid_request_never_reaches_the_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/search/book.json")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = NaverClient::with_base_url("id", "secret", server.url());
    let err = client
        .search(&NaverSearchRequest::new("rust").display(0))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidRequest(_)));
    mock.assert_async().await;
}
