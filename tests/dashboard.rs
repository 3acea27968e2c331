//! Dashboard flow: filter changes → state → query → store → panels

mod common;

use common::{load_catalog, MockTransport};
use serde_json::json;
use spquery::{encode_all, Client, DashboardFilterState, FilterChange, ResponseStore, YearRange};

#[test]
fn test_cascade_and_count() {
    let catalog = load_catalog();
    let state = DashboardFilterState::new(&catalog.dashboard)
        .apply_field("provinces", &json!(["1"]))
        .unwrap()
        .apply_field("communes", &json!(["10"]))
        .unwrap()
        .apply_field("collines", &json!(["100", "101"]))
        .unwrap();
    assert_eq!(state.count_active(), 4);

    let state = state.apply(FilterChange::Provinces(vec!["2".into()]));
    assert!(state.communes().is_empty());
    assert!(state.collines().is_empty());

    let state = state
        .apply(FilterChange::Provinces(vec!["1".into(), "2".into()]))
        .apply(FilterChange::Year(Some(2023)));
    assert_eq!(state.count_active(), 3);

    let state = state.apply(FilterChange::YearRange(YearRange { min: 2018, max: 2030 }));
    assert_eq!(state.count_active(), 3, "year range equal to the defaults is not a filter");

    assert_eq!(state.clear_all().count_active(), 0);
}

#[test]
fn test_state_drives_summary_query() {
    let catalog = load_catalog();
    let state = DashboardFilterState::new(&catalog.dashboard)
        .apply(FilterChange::Provinces(vec!["1".into()]))
        .apply(FilterChange::Communes(vec!["10".into()]))
        .apply(FilterChange::Year(Some(2023)));

    let fragments = encode_all(&state.to_filter_inputs()).unwrap();
    let request = catalog
        .get_entity("beneficiarySummary")
        .unwrap()
        .query_builder()
        .filters(fragments)
        .build()
        .unwrap();
    assert_eq!(
        request.payload().query,
        "{beneficiarySummary(location_Id_In: [10], year: 2023){totalBeneficiaries,activeBeneficiaries,totalAmount}}"
    );
}

#[tokio::test]
async fn test_fetch_into_store() {
    let catalog = load_catalog();
    let entity = catalog.get_entity("beneficiary").unwrap();
    let request = entity.query_builder().build().unwrap();
    let prefix = entity.dispatch.clone();

    let transport = MockTransport::new().respond(json!({
        "data": {
            "beneficiary": {
                "totalCount": 3,
                "pageInfo": {"hasNextPage": false, "hasPreviousPage": false, "startCursor": null, "endCursor": null},
                "edges": [
                    {"node": {"id": "a", "status": "ACTIVE"}},
                    {"node": {"id": "b", "status": "ACTIVE"}},
                    {"node": {"id": "c", "status": "SUSPENDED"}}
                ]
            }
        }
    }));
    let client = Client::new(transport);
    let mut store = ResponseStore::new();
    store.mount(&prefix);

    client.fetch_into(&mut store, &request).await.unwrap();

    let slice = store.slice(&prefix).unwrap();
    assert!(slice.fetched);
    assert_eq!(slice.total_count, Some(3));
    let records = slice.records();
    assert_eq!(records.len(), 3);

    let statuses: Vec<&str> = records
        .iter()
        .filter_map(|r| r["status"].as_str())
        .collect();
    assert_eq!(statuses, ["ACTIVE", "ACTIVE", "SUSPENDED"]);
    assert!(!slice.page_info.as_ref().unwrap().has_next_page);
}

#[tokio::test]
async fn test_unmounted_view_drops_response() {
    let catalog = load_catalog();
    let entity = catalog.get_entity("project").unwrap();
    let request = entity.query_builder().build().unwrap();

    let client = Client::new(MockTransport::new().respond(json!({"data": {"project": {"totalCount": 0, "edges": []}}})));
    let mut store = ResponseStore::new();

    client.fetch_into(&mut store, &request).await.unwrap();
    assert!(store.slice(&entity.dispatch).is_none());
    assert_eq!(client.transport().calls(), 1);
}

#[tokio::test]
async fn test_error_lands_in_slice() {
    let catalog = load_catalog();
    let entity = catalog.get_entity("benefitPlan").unwrap();
    let request = entity.query_builder().build().unwrap();

    let client = Client::new(MockTransport::new().respond(json!({
        "errors": [{"message": "Query failed", "extensions": {"code": "INTERNAL", "detail": "timeout"}}]
    })));
    let mut store = ResponseStore::new();
    store.mount(&entity.dispatch);

    assert!(client.fetch_into(&mut store, &request).await.is_err());
    let slice = store.slice(&entity.dispatch).unwrap();
    assert!(!slice.fetching);
    let error = slice.error.as_ref().unwrap();
    assert_eq!(error.code.as_deref(), Some("INTERNAL"));
    assert_eq!(error.detail.as_deref(), Some("timeout"));
}
