//! Integration tests against a local mock of the Kite API.
//!
//! Every endpoint is exercised end-to-end through a `wiremock` server: URL
//! and parameter construction, the auth header, `data` unwrapping, retry
//! behaviour and error mapping.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use kite_rs::auth::{Credentials, Login, StaticToken};
use kite_rs::error::KiteError;
use kite_rs::types::enums::*;
use kite_rs::types::historical::HistoricalDataRequest;
use kite_rs::types::orders::{ModifyOrderRequest, PlaceOrderRequest};
use kite_rs::{KiteClient, KiteConfig, RetryConfig};

const TOKEN: &str = "test-enctoken";
const AUTH: &str = "enctoken test-enctoken";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config_for(server: &MockServer) -> KiteConfig {
    KiteConfig::default()
        .with_root_url(format!("{}/oms", server.uri()))
        .with_api_url(server.uri())
        .with_retry(RetryConfig::fixed(Duration::from_millis(1), 5))
}

async fn setup() -> (MockServer, KiteClient) {
    init_tracing();
    let server = MockServer::start().await;
    let client = KiteClient::connect_with_config(&StaticToken(TOKEN.into()), config_for(&server))
        .await
        .expect("client should build");
    (server, client)
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"status": "success", "data": data}))
}

fn form_pairs(req: &Request) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&req.body).into_owned().collect()
}

async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

// ===================================================================
// Construction / authentication
// ===================================================================

struct FailingLogin;

impl Login for FailingLogin {
    async fn login(&self) -> kite_rs::Result<Credentials> {
        Err(KiteError::InvalidArgument("bad totp".into()))
    }
}

#[tokio::test]
async fn login_failure_is_fatal_auth_error() {
    let server = MockServer::start().await;
    let err = KiteClient::connect_with_config(&FailingLogin, config_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, KiteError::Auth(msg) if msg.contains("bad totp")));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_token_is_rejected() {
    let server = MockServer::start().await;
    let err = KiteClient::connect_with_config(&StaticToken(String::new()), config_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, KiteError::Auth(_)));
}

#[tokio::test]
async fn token_with_newline_is_invalid_argument() {
    let err = KiteClient::new("bad\ntoken").unwrap_err();
    assert!(matches!(err, KiteError::InvalidArgument(_)));
}

// ===================================================================
// Instruments
// ===================================================================

const DUMP: &str = "instrument_token,exchange_token,tradingsymbol,name,last_price,expiry,strike,tick_size,lot_size,instrument_type,segment,exchange\n\
408065,1594,INFY,\"INFOSYS\",0,,0,0.05,1,EQ,NSE,NSE\n\
12335618,48186,NIFTY24JANFUT,\"NIFTY\",21731.5,2024-01-25,0,0.05,50,FUT,NFO-FUT,NFO\n\
128083204,500325,RELIANCE,\"RELIANCE INDUSTRIES\",0,,0,0.05,1,EQ,BSE,BSE\n";

#[tokio::test]
async fn instruments_parses_dump() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/instruments"))
        .and(header("Authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_string(DUMP))
        .expect(2)
        .mount(&server)
        .await;

    let all = client.instruments(None).await.unwrap();
    assert_eq!(all.len(), DUMP.split('\n').count() - 2);

    let bse = client.instruments(Some(Exchange::BSE)).await.unwrap();
    assert_eq!(bse.len(), 1);
    assert_eq!(bse[0].name, "RELIANCE INDUSTRIES");
    assert_eq!(bse[0].instrument_token, 128083204);
}

#[tokio::test]
async fn instruments_filter_skips_malformed_rows_elsewhere() {
    let (server, client) = setup().await;
    let dump = format!("{DUMP}1,2,X,\"ACME, INC\",0,,0,0.05,1,EQ,BSE,BSE\n");
    Mock::given(method("GET"))
        .and(path("/instruments"))
        .respond_with(ResponseTemplate::new(200).set_body_string(dump))
        .mount(&server)
        .await;

    let nfo = client.instruments(Some(Exchange::NFO)).await.unwrap();
    assert!(!nfo.is_empty());
    assert!(nfo.iter().all(|i| i.exchange == "NFO"));

    let err = client.instruments(None).await.unwrap_err();
    assert!(matches!(err, KiteError::Shape(_)), "{err:?}");
}

// ===================================================================
// Historical data
// ===================================================================

#[tokio::test]
async fn historical_data_day_candle() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/instruments/historical/123/day"))
        .and(query_param("from", "2023-01-01"))
        .and(query_param("to", "2023-01-02"))
        .and(query_param("interval", "day"))
        .and(query_param("continuous", "0"))
        .and(query_param("oi", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"candles": [["2023-01-01T00:00:00+0530", 100, 105, 98, 102, 1000]]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let req = HistoricalDataRequest::new(123, "2023-01-01", "2023-01-02", Interval::Day);
    let candles = client.historical_data(&req).await.unwrap();

    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0].open, 100.0);
    assert_eq!(candles[0].close, 102.0);
    assert_eq!(candles[0].volume, 1000);
    assert_eq!(candles[0].oi, None);
    assert!(serde_json::to_value(&candles[0]).unwrap().get("oi").is_none());
}

#[tokio::test]
async fn historical_data_with_oi_flags() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/instruments/historical/12335618/5minute"))
        .and(query_param("continuous", "1"))
        .and(query_param("oi", "1"))
        .respond_with(ok(json!({"candles": [
            ["2024-01-02T09:15:00+0530", 21700, 21710, 21690, 21705, 3000, 11000000],
            ["2024-01-02T09:20:00+0530", 21705, 21720, 21700, 21715, 2500, 11002000]
        ]})))
        .expect(1)
        .mount(&server)
        .await;

    let req = HistoricalDataRequest::new(12335618, "2024-01-02 09:15:00", "2024-01-02 09:25:00", Interval::Minute5)
        .continuous(true)
        .oi(true);
    let candles = client.historical_data(&req).await.unwrap();

    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].oi, Some(11_000_000));
    assert_eq!(candles[1].oi, Some(11_002_000));
    assert!(candles[0].date < candles[1].date);
}

#[tokio::test]
async fn historical_data_rejects_short_rows() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/instruments/historical/1/day"))
        .respond_with(ok(json!({"candles": [["2023-01-01T00:00:00+0530", 1, 2, 3]]})))
        .mount(&server)
        .await;

    let req = HistoricalDataRequest::new(1, "2023-01-01", "2023-01-02", Interval::Day);
    let err = client.historical_data(&req).await.unwrap_err();
    assert!(matches!(err, KiteError::Shape(_)));
}

#[tokio::test]
async fn recent_candles_requests_a_range() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/instruments/historical/408065/minute"))
        .respond_with(ok(json!({"candles": []})))
        .expect(1)
        .mount(&server)
        .await;

    let candles = client.recent_candles(408065, Interval::Minute, 5).await.unwrap();
    assert!(candles.is_empty());

    let req = only_request(&server).await;
    let pairs: Vec<(String, String)> = req.url.query_pairs().into_owned().collect();
    let from = &pairs.iter().find(|(k, _)| k == "from").unwrap().1;
    let to = &pairs.iter().find(|(k, _)| k == "to").unwrap().1;
    assert!(from < to, "from={from} to={to}");
    assert_eq!(from.len(), "2024-01-01 00:00:00".len());
}

// ===================================================================
// Quote
// ===================================================================

#[tokio::test]
async fn quote_forwards_instruments() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/quote"))
        .and(query_param("i", "NSE:INFY"))
        .and(query_param("i", "NSE:TCS"))
        .respond_with(ok(json!({
            "NSE:INFY": {
                "instrument_token": 408065,
                "last_price": 1512.35,
                "volume": 100,
                "ohlc": {"open": 1500, "high": 1520, "low": 1495, "close": 1505},
                "depth": {"buy": [{"price": 1512.3, "quantity": 10, "orders": 2}], "sell": []}
            },
            "NSE:TCS": {"instrument_token": 2953217, "last_price": 3700.0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let quotes = client.quote(&["NSE:INFY", "NSE:TCS"]).await.unwrap();
    assert_eq!(quotes.len(), 2);
    let infy = &quotes["NSE:INFY"];
    assert_eq!(infy.last_price, 1512.35);
    assert_eq!(infy.ohlc.as_ref().unwrap().high, 1520.0);
    assert_eq!(infy.depth.as_ref().unwrap().buy[0].orders, 2);
    assert!(quotes["NSE:TCS"].depth.is_none());
}

// ===================================================================
// Margins / Profile / Orders / Positions
// ===================================================================

#[tokio::test]
async fn profile_and_margins_unwrap_data() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/user/profile"))
        .and(header("Authorization", AUTH))
        .respond_with(ok(json!({
            "user_id": "AB1234",
            "user_name": "Test User",
            "exchanges": ["NSE", "NFO"],
            "products": ["CNC", "MIS"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/oms/user/margins"))
        .respond_with(ok(json!({
            "equity": {
                "enabled": true,
                "net": 99725.05,
                "available": {"cash": 245431.6, "live_balance": 99725.05},
                "utilised": {"debits": 145706.55, "exposure": 38981.25}
            },
            "commodity": {"enabled": false, "net": 0}
        })))
        .mount(&server)
        .await;

    let profile = client.profile().await.unwrap();
    assert_eq!(profile.user_id.as_deref(), Some("AB1234"));
    assert_eq!(profile.exchanges, vec!["NSE", "NFO"]);

    let margins = client.margins().await.unwrap();
    let equity = margins.equity.unwrap();
    assert!(equity.enabled);
    assert_eq!(equity.net, 99725.05);
    assert_eq!(equity.available.unwrap().cash, 245431.6);
    assert_eq!(equity.utilised["exposure"], 38981.25);
    assert!(!margins.commodity.unwrap().enabled);
}

#[tokio::test]
async fn orders_and_positions() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/orders"))
        .respond_with(ok(json!([{
            "order_id": "151220000000000",
            "status": "OPEN",
            "tradingsymbol": "INFY",
            "exchange": "NSE",
            "transaction_type": "BUY",
            "order_type": "LIMIT",
            "quantity": 1,
            "price": 1500.0
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/oms/portfolio/positions"))
        .respond_with(ok(json!({
            "net": [{
                "tradingsymbol": "NIFTY24JANFUT",
                "exchange": "NFO",
                "instrument_token": 12335618,
                "product": "NRML",
                "quantity": -50,
                "pnl": 1250.5
            }],
            "day": []
        })))
        .mount(&server)
        .await;

    let orders = client.orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id.as_str(), "151220000000000");
    assert_eq!(orders[0].status.as_deref(), Some("OPEN"));

    let positions = client.positions().await.unwrap();
    assert_eq!(positions.net.len(), 1);
    assert_eq!(positions.net[0].quantity, -50);
    assert_eq!(positions.net[0].pnl, Some(1250.5));
    assert!(positions.day.is_empty());
}

#[tokio::test]
async fn missing_data_is_a_shape_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/user/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .mount(&server)
        .await;

    let err = client.profile().await.unwrap_err();
    assert!(matches!(err, KiteError::Shape(_)));
}

#[tokio::test]
async fn token_exception_maps_to_api_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/user/profile"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "status": "error",
            "message": "Incorrect `api_key` or `access_token`.",
            "error_type": "TokenException"
        })))
        .mount(&server)
        .await;

    match client.profile().await.unwrap_err() {
        KiteError::Api {
            status,
            error_type,
            message,
        } => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(error_type.as_deref(), Some("TokenException"));
            assert_eq!(message, "Incorrect `api_key` or `access_token`.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(!client.validate_token().await.unwrap());
}

#[tokio::test]
async fn validate_token_accepts_live_session() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/user/profile"))
        .respond_with(ok(json!({"user_id": "AB1234"})))
        .mount(&server)
        .await;

    assert!(client.validate_token().await.unwrap());
}

// ===================================================================
// Order lifecycle
// ===================================================================

#[tokio::test]
async fn place_order_sends_only_required_fields() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/oms/orders/regular"))
        .and(header("Authorization", AUTH))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .respond_with(ok(json!({"order_id": "151220000000000"})))
        .expect(1)
        .mount(&server)
        .await;

    let req = PlaceOrderRequest::new(
        Variety::REGULAR,
        Exchange::NSE,
        "INFY",
        TransactionType::BUY,
        1,
        Product::MIS,
        OrderType::MARKET,
    );
    let order_id = client.place_order(&req).await.unwrap();
    assert_eq!(order_id.as_str(), "151220000000000");

    let mut keys: Vec<String> = form_pairs(&only_request(&server).await)
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "exchange",
            "order_type",
            "product",
            "quantity",
            "tradingsymbol",
            "transaction_type",
            "variety"
        ]
    );
}

#[tokio::test]
async fn place_order_sends_set_optionals() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/oms/orders/co"))
        .respond_with(ok(json!({"order_id": 230101000000042u64})))
        .mount(&server)
        .await;

    let req = PlaceOrderRequest::new(
        Variety::CO,
        Exchange::NFO,
        "NIFTY24JANFUT",
        TransactionType::SELL,
        50,
        Product::CO,
        OrderType::SL_M,
    )
    .with_trigger_price(21800.0)
    .with_tag("hedge");
    let order_id = client.place_order(&req).await.unwrap();
    assert_eq!(order_id.as_str(), "230101000000042");

    let pairs = form_pairs(&only_request(&server).await);
    assert!(pairs.contains(&("order_type".into(), "SL-M".into())));
    assert!(pairs.contains(&("trigger_price".into(), "21800.0".into())));
    assert!(pairs.contains(&("tag".into(), "hedge".into())));
    assert!(pairs.contains(&("variety".into(), "co".into())));
    assert!(!pairs.iter().any(|(k, _)| k == "price" || k == "validity"));
}

#[tokio::test]
async fn place_order_is_not_retried() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/oms/orders/regular"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let req = PlaceOrderRequest::new(
        Variety::REGULAR,
        Exchange::NSE,
        "INFY",
        TransactionType::BUY,
        1,
        Product::CNC,
        OrderType::MARKET,
    );
    let err = client.place_order(&req).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn missing_order_id_is_a_shape_error() {
    let (server, client) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/oms/orders/regular/1"))
        .respond_with(ok(json!({})))
        .mount(&server)
        .await;

    let err = client
        .modify_order(&ModifyOrderRequest::new(Variety::REGULAR, "1").with_price(10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, KiteError::Shape(msg) if msg.contains("order_id")));
}

#[tokio::test]
async fn modify_order_sends_set_fields() {
    let (server, client) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/oms/orders/regular/151220000000000"))
        .respond_with(ok(json!({"order_id": "151220000000000"})))
        .expect(1)
        .mount(&server)
        .await;

    let req = ModifyOrderRequest::new(Variety::REGULAR, "151220000000000")
        .with_quantity(2)
        .with_price(1499.5);
    let order_id = client.modify_order(&req).await.unwrap();
    assert_eq!(order_id.as_str(), "151220000000000");

    let pairs = form_pairs(&only_request(&server).await);
    assert_eq!(
        pairs,
        vec![
            ("variety".to_string(), "regular".to_string()),
            ("order_id".to_string(), "151220000000000".to_string()),
            ("quantity".to_string(), "2".to_string()),
            ("price".to_string(), "1499.5".to_string()),
        ]
    );
}

#[tokio::test]
async fn cancel_order_without_parent_sends_empty_body() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/oms/orders/regular/151220000000000"))
        .and(body_string(""))
        .respond_with(ok(json!({"order_id": "151220000000000"})))
        .expect(1)
        .mount(&server)
        .await;

    let order_id = client
        .cancel_order(Variety::REGULAR, "151220000000000", None)
        .await
        .unwrap();
    assert_eq!(order_id.as_str(), "151220000000000");
}

#[tokio::test]
async fn cancel_order_with_parent_sends_parent_only() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/oms/orders/co/151220000000001"))
        .and(body_string("parent_order_id=151220000000000"))
        .respond_with(ok(json!({"order_id": "151220000000001"})))
        .expect(1)
        .mount(&server)
        .await;

    let order_id = client
        .cancel_order(Variety::CO, "151220000000001", Some("151220000000000"))
        .await
        .unwrap();
    assert_eq!(order_id.as_str(), "151220000000001");
}

// ===================================================================
// Transport retries
// ===================================================================

#[tokio::test]
async fn four_503s_then_success() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/user/profile"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(4)
        .expect(4)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/oms/user/profile"))
        .respond_with(ok(json!({"user_id": "AB1234"})))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client.profile().await.unwrap();
    assert_eq!(profile.user_id.as_deref(), Some("AB1234"));
}

#[tokio::test]
async fn six_503s_surface_last_response() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/orders"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(6)
        .mount(&server)
        .await;

    let session = client.session();
    let url = format!("{}/orders", client.root_url());
    let resp = session.send(session.get(&url)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(resp.text().await.unwrap(), "busy");
}

#[tokio::test]
async fn exhausted_retries_become_api_error_at_call_site() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/portfolio/positions"))
        .respond_with(ResponseTemplate::new(502))
        .expect(6)
        .mount(&server)
        .await;

    let err = client.positions().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/orders"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "message": "Invalid input",
            "error_type": "InputException"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.orders().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn retry_after_header_is_honoured() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/oms/user/margins"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/oms/user/margins"))
        .respond_with(ok(json!({"equity": null, "commodity": null})))
        .mount(&server)
        .await;

    let margins = client.margins().await.unwrap();
    assert!(margins.equity.is_none());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    init_tracing();
    // Nothing listens on port 1.
    let config = KiteConfig::default()
        .with_root_url("http://127.0.0.1:1/oms")
        .with_api_url("http://127.0.0.1:1")
        .with_retry(RetryConfig::fixed(Duration::from_millis(1), 2));
    let client = KiteClient::with_config(TOKEN, config).unwrap();

    let err = client.orders().await.unwrap_err();
    assert!(matches!(err, KiteError::Transport(ref e) if e.is_connect()), "{err:?}");
}
