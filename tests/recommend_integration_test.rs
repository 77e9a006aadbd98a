use anyhow::Result;
use bean_catalog::core::discovery::{count_attributes, ChartScale};
use bean_catalog::core::table::{filter_beans, sort_beans, Pagination};
use bean_catalog::{CatalogApi, CatalogClient, ClientConfig, Recommender};
use httpmock::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

/// Six beans across three color groups; only `tangerine` is orangish on
/// every swatch.
async fn start_catalog() -> MockServer {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/colors");
            then.status(200).json_body(json!({
                "total": 3,
                "data": [
                    { "colorId": "tangerine", "colorDescription": "Tangerine", "hex": ["#FF9933", "#D4A017"] },
                    { "colorId": "sunset", "colorDescription": "Sunset", "hex": ["#D4A017", "#FF0000"] },
                    { "colorId": "lime", "colorDescription": "Lime", "hex": ["#32CD32"] }
                ]
            }));
        })
        .await;

    let beans = json!([
        { "BeanId": 1, "FlavorName": "Orange Sherbet", "ColorGroup": "tangerine", "GlutenFree": true, "Kosher": true },
        { "BeanId": 2, "FlavorName": "Cherry", "ColorGroup": "sunset", "SugarFree": true },
        { "BeanId": 3, "FlavorName": "Peach", "ColorGroup": "tangerine", "Seasonal": true },
        { "BeanId": 4, "FlavorName": "Lime", "ColorGroup": "lime", "GlutenFree": true },
        { "BeanId": 5, "FlavorName": "Mango", "ColorGroup": "tangerine", "Kosher": true },
        { "BeanId": 6, "FlavorName": "Apricot", "ColorGroup": "tangerine", "GlutenFree": true }
    ]);
    let pages = beans.as_array().cloned().unwrap_or_default();

    for (offset, chunk) in pages.chunks(4).enumerate() {
        let offset = (offset * 4).to_string();
        let body = json!({ "total": 6, "data": chunk });
        server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path("/api/beans")
                    .query_param("limit", "4")
                    .query_param("offset", offset.as_str());
                then.status(200).json_body(body);
            })
            .await;
    }

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/combinations");
            then.status(200).json_body(json!({
                "total": 4,
                "data": [
                    { "CombinationId": 10, "Name": "Citrus Splash", "TagSerialized": "Orange Sherbet,Lime" },
                    { "CombinationId": 11, "Name": "Orchard", "TagSerialized": "Peach,Apricot,Mango,Cherry" },
                    { "CombinationId": 12, "Name": "Red Alert", "TagSerialized": "Cherry" },
                    { "CombinationId": 13, "Name": "Stone Fruit", "TagSerialized": "Peach,Apricot" }
                ]
            }));
        })
        .await;

    server
}

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(ClientConfig {
        base_url: server.base_url(),
        page_size: 4,
        ..ClientConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_recommendations_from_live_api() -> Result<()> {
    let server = start_catalog().await;
    let result = Recommender::new(client_for(&server)).recommend().await?;

    assert_eq!(result.beans.len(), 6);
    assert_eq!(result.preferred_colors.len(), 1);
    assert!(result.preferred_colors.contains("tangerine"));

    let preferred: Vec<i64> = result.preferred_beans.iter().map(|b| b.bean_id).collect();
    assert_eq!(preferred, vec![1, 3, 5, 6]);

    let ranked: Vec<(i64, f64)> = result
        .combinations
        .iter()
        .map(|s| (s.combination.combination_id, s.match_fraction))
        .collect();
    assert_eq!(ranked, vec![(11, 0.75), (13, 0.5), (10, 0.25)]);
    assert_eq!(result.combinations[0].match_percent(), 75);

    let orchard_beans: Vec<i64> = result
        .beans_in(&result.combinations[0])
        .iter()
        .map(|b| b.bean_id)
        .collect();
    assert_eq!(orchard_beans, vec![2, 3, 5, 6]);
    Ok(())
}

#[tokio::test]
async fn test_lottery_only_draws_recommended() -> Result<()> {
    let server = start_catalog().await;
    let result = Recommender::new(client_for(&server)).recommend().await?;

    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..20 {
        let picked = result.lottery(&mut rng).expect("non-empty recommendations");
        assert_ne!(picked.combination.combination_id, 12);
    }
    Ok(())
}

#[tokio::test]
async fn test_discovery_counts_whole_catalog() -> Result<()> {
    let server = start_catalog().await;
    let beans = client_for(&server).fetch_all_beans().await?;

    let counts = count_attributes(&beans);
    assert_eq!(counts.gluten_free, 3);
    assert_eq!(counts.sugar_free, 1);
    assert_eq!(counts.seasonal, 1);
    assert_eq!(counts.kosher, 2);

    let scale = ChartScale::for_bars(&counts.bars(), None);
    assert_eq!(scale.axis_max, 10);
    Ok(())
}

#[tokio::test]
async fn test_table_page_sort_and_filter() -> Result<()> {
    let server = start_catalog().await;
    let pagination = Pagination::new(1, 4);
    let page = client_for(&server)
        .list_beans(Some(pagination.limit()), Some(pagination.offset()))
        .await?;

    assert_eq!(page.total, 6);
    assert_eq!(pagination.page_count(page.total), 2);
    assert!(!pagination.can_next(page.total));

    let mut beans = page.data;
    sort_beans(&mut beans, "name".parse().map_err(anyhow::Error::msg)?);
    let names: Vec<&str> = beans.iter().map(|b| b.flavor_name.as_str()).collect();
    assert_eq!(names, vec!["Apricot", "Mango"]);

    let hits = filter_beans(&beans, "mAnGo");
    assert_eq!(hits.len(), 1);
    Ok(())
}
