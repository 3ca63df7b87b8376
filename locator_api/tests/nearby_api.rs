use locator_api::app;
use locator_api::state::AppState;
use reqwest::StatusCode;
use reqwest::header::USER_AGENT;
use serde_json::Value;
use shared::SearchConfig;
use shared::client::{ClientError, LocatorClient};
use shared::facility::FacilityTable;
use shared::geo::{Coordinate, DistanceUnit};
use shared::nearby::NearbyQuery;

const GEISEL: Coordinate = Coordinate::new(32.8801, -117.2340);

async fn spawn_server() -> String {
    let state = AppState::new(FacilityTable::bundled().unwrap(), &SearchConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    format!("http://{addr}")
}

fn ids(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn health_is_ok() -> Result<(), reqwest::Error> {
    let base = spawn_server().await;
    let res = reqwest::get(format!("{base}/health")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn nearby_sorted_by_distance() -> Result<(), reqwest::Error> {
    let base = spawn_server().await;
    let body = reqwest::get(format!(
        "{base}/v1/locations/nearby?lat=32.8801&lng=-117.2340"
    ))
    .await?
    .json::<Value>()
    .await?;

    assert_eq!(ids(&body), vec!["5", "2", "3", "1", "4"]);
    assert_eq!(body[0]["distance"].as_f64().unwrap(), 0.0);
    assert!((body[1]["distance"].as_f64().unwrap() - 2.04).abs() < 0.01);
    assert_eq!(body[0]["acceptedWaste"][0], "iClickers");
    assert!(body[0].get("links").is_none());
    Ok(())
}

#[tokio::test]
async fn nearby_honours_max_distance_and_unit() -> Result<(), reqwest::Error> {
    let base = spawn_server().await;
    let body = reqwest::get(format!(
        "{base}/v1/locations/nearby?lat=32.8801&lng=-117.2340&maxDistance=5"
    ))
    .await?
    .json::<Value>()
    .await?;
    assert_eq!(ids(&body), vec!["5", "2"]);

    // Miramar is about 10.4 km away
    let body = reqwest::get(format!(
        "{base}/v1/locations/nearby?lat=32.8801&lng=-117.2340&maxDistance=11&unit=km"
    ))
    .await?
    .json::<Value>()
    .await?;
    assert_eq!(ids(&body), vec!["5", "2", "3"]);
    Ok(())
}

#[tokio::test]
async fn nothing_nearby_is_an_empty_list() -> Result<(), reqwest::Error> {
    let base = spawn_server().await;
    let res = reqwest::get(format!(
        "{base}/v1/locations/nearby?lat=34.0522&lng=-118.2437"
    ))
    .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, Value::Array(vec![]));
    Ok(())
}

#[tokio::test]
async fn missing_coordinates_are_rejected() -> Result<(), reqwest::Error> {
    let base = spawn_server().await;
    let res = reqwest::get(format!("{base}/v1/locations/nearby?lat=32.88")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "Missing latitude or longitude parameters");
    Ok(())
}

#[tokio::test]
async fn empty_coordinates_count_as_missing() -> Result<(), reqwest::Error> {
    let base = spawn_server().await;
    for query in ["lat=&lng=-117.2", "lat=32.88&lng=", "lat=%20&lng=-117.2"] {
        let res = reqwest::get(format!("{base}/v1/locations/nearby?{query}")).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{query}");
        let body = res.json::<Value>().await?;
        assert_eq!(
            body["message"], "Missing latitude or longitude parameters",
            "{query}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn non_numeric_coordinate_names_the_parameter() -> Result<(), reqwest::Error> {
    let base = spawn_server().await;
    let res = reqwest::get(format!("{base}/v1/locations/nearby?lat=abc&lng=-117.2")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["message"].as_str().unwrap().starts_with("lat must be a number"));
    Ok(())
}

#[tokio::test]
async fn malformed_parameters_are_rejected() -> Result<(), reqwest::Error> {
    let base = spawn_server().await;
    for query in [
        "lat=abc&lng=-117.2",
        "lat=95&lng=-117.2",
        "lat=NaN&lng=-117.2",
        "lat=32.8&lng=-117.2&maxDistance=-1",
        "lat=32.8&lng=-117.2&unit=leagues",
        "lat=32.8&lng=-117.2&unit=KM",
    ] {
        let res = reqwest::get(format!("{base}/v1/locations/nearby?{query}")).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{query}");
    }
    Ok(())
}

#[tokio::test]
async fn links_follow_user_agent() -> Result<(), reqwest::Error> {
    let base = spawn_server().await;
    let http = reqwest::Client::new();
    let body = http
        .get(format!(
            "{base}/v1/locations/nearby?lat=32.7347&lng=-117.2131&limit=1"
        ))
        .header(
            USER_AGENT,
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
        )
        .send()
        .await?
        .json::<Value>()
        .await?;

    assert_eq!(ids(&body), vec!["1"]);
    let links = &body[0]["links"];
    assert_eq!(
        links["directions"],
        "https://maps.apple.com/?daddr=32.7347,-117.2131&dirflg=d"
    );
    assert_eq!(links["call"], "tel:6198891305");
    assert_eq!(links["share"], "https://maps.google.com/?q=32.7347,-117.2131");
    Ok(())
}

#[tokio::test]
async fn lists_and_fetches_locations() -> Result<(), reqwest::Error> {
    let base = spawn_server().await;
    let all = reqwest::get(format!("{base}/v1/locations"))
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(ids(&all), vec!["1", "2", "3", "4", "5"]);

    let one = reqwest::get(format!("{base}/v1/locations/3"))
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(one["name"], "Miramar Recycling Center");

    let res = reqwest::get(format!("{base}/v1/locations/42")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "no facility with id 42");
    Ok(())
}

#[tokio::test]
async fn remote_client_matches_local_filter() -> Result<(), ClientError> {
    let base = spawn_server().await;
    let client = LocatorClient::new(format!("{base}/"));
    let table = FacilityTable::bundled().unwrap();

    for query in [
        NearbyQuery::default(),
        NearbyQuery::within(5.0, DistanceUnit::Miles),
        NearbyQuery::within(20.0, DistanceUnit::Kilometers).limit(2),
        NearbyQuery::default().accepting("small appliances"),
    ] {
        let remote = client.nearby(GEISEL, &query).await?;
        let local = table.nearby(GEISEL, &query);
        assert_eq!(remote.len(), local.len());
        for (r, l) in remote.iter().zip(&local) {
            assert_eq!(r.facility, l.facility);
            assert!((r.distance - l.distance).abs() < 1e-9);
        }
    }

    assert_eq!(client.locations().await?.len(), table.len());
    Ok(())
}

#[tokio::test]
async fn remote_client_surfaces_api_errors() {
    let base = spawn_server().await;
    let client = LocatorClient::new(base);
    let err = client
        .nearby(Coordinate::new(123.0, 0.0), &NearbyQuery::default())
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(message.contains("latitude"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}
