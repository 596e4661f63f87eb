//! CRUD round-trips through the storage layer.

use panel_pricing::storage::users::UserPatch;
use panel_pricing::storage::{params, places, reference, users, Database};

#[tokio::test]
async fn parameter_crud_round_trip() {
    let db = Database::connect_in_memory().await.unwrap();

    let created = params::create_parameter(&db, "up to 200", Some(0.5), None).await.unwrap();
    let fetched = params::parameter_by_id(&db, created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.ratio, Some(0.5));

    let updated =
        params::update_parameter(&db, created.id, "up to 200", Some(0.6), None).await.unwrap().unwrap();
    assert_eq!(updated.ratio, Some(0.6));
    let by_name = params::parameter_by_name(&db, "up to 200").await.unwrap().unwrap();
    assert_eq!(by_name.ratio, Some(0.6));

    assert!(params::delete_parameter(&db, created.id).await.unwrap());
    assert!(params::parameter_by_id(&db, created.id).await.unwrap().is_none());
    assert!(!params::delete_parameter(&db, created.id).await.unwrap());
}

#[tokio::test]
async fn parameters_group_by_category() {
    let db = Database::connect_in_memory().await.unwrap();

    let time = reference::create_category(&db, "time").await.unwrap();
    let target = reference::create_category(&db, "target").await.unwrap();
    params::create_parameter(&db, "overnight", Some(0.25), Some(time.id)).await.unwrap();
    params::create_parameter(&db, "one week", Some(0.10), Some(time.id)).await.unwrap();
    params::create_parameter(&db, "niche audience", Some(0.40), Some(target.id)).await.unwrap();

    let time_params = params::parameters_by_category(&db, time.id).await.unwrap();
    assert_eq!(time_params.len(), 2);
    let target_params = params::parameters_by_category(&db, target.id).await.unwrap();
    assert_eq!(target_params.len(), 1);
    assert_eq!(target_params[0].name, "niche audience");
}

#[tokio::test]
async fn user_update_is_a_partial_patch() {
    let db = Database::connect_in_memory().await.unwrap();

    let user = users::create_user(
        &db,
        &UserPatch {
            name: Some("Anna".to_string()),
            age: Some(28),
            gender: Some("Female".to_string()),
            income: Some(1_500_000),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let patched = users::update_user(
        &db,
        user.id,
        &UserPatch { income: Some(2_000_000), ..Default::default() },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(patched.income, Some(2_000_000));
    assert_eq!(patched.name, "Anna");
    assert_eq!(patched.age, Some(28));
    assert_eq!(patched.created_at, user.created_at);
}

#[tokio::test]
async fn deleting_a_user_removes_its_place_link() {
    let db = Database::connect_in_memory().await.unwrap();

    let user = users::create_user(
        &db,
        &UserPatch { name: Some("Bahrom".to_string()), ..Default::default() },
    )
    .await
    .unwrap();
    let country = places::create_country(&db, "Uzbekistan").await.unwrap();
    places::create_place(&db, Some(country.id), None, None, None, user.id).await.unwrap();

    assert!(users::delete_user(&db, user.id).await.unwrap());
    assert!(places::place_by_user(&db, user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn location_hierarchy_lists_by_parent() {
    let db = Database::connect_in_memory().await.unwrap();

    let country = places::create_country(&db, "Uzbekistan").await.unwrap();
    let region = places::create_region(&db, "Tashkent Region", Some(country.id)).await.unwrap();
    places::create_region(&db, "Samarkand Region", Some(country.id)).await.unwrap();
    places::create_city(&db, "Tashkent", Some(region.id)).await.unwrap();
    places::create_district(&db, "Yunusabad", Some(region.id)).await.unwrap();

    assert_eq!(places::regions_by_country(&db, country.id).await.unwrap().len(), 2);
    assert_eq!(places::cities_by_region(&db, region.id).await.unwrap().len(), 1);
    assert_eq!(places::districts_by_region(&db, region.id).await.unwrap().len(), 1);
    assert!(places::cities_by_region(&db, country.id + 100).await.unwrap().is_empty());
}

#[tokio::test]
async fn reference_seed_rows_are_present() {
    let db = Database::connect_in_memory().await.unwrap();

    let income = reference::list_income(&db).await.unwrap();
    assert_eq!(income.len(), 3);

    let families = reference::list_family_situations(&db).await.unwrap();
    let names: Vec<&str> = families.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Single", "Married", "Divorced", "Widow"]);
}

#[tokio::test]
async fn purchase_frequency_scopes_to_category() {
    let db = Database::connect_in_memory().await.unwrap();

    let groceries = reference::create_purchase_category(&db, "Groceries").await.unwrap();
    let electronics = reference::create_purchase_category(&db, "Electronics").await.unwrap();
    reference::create_purchase_frequency(&db, "Weekly", Some(groceries.id)).await.unwrap();
    reference::create_purchase_frequency(&db, "Monthly", Some(groceries.id)).await.unwrap();
    reference::create_purchase_frequency(&db, "Yearly", Some(electronics.id)).await.unwrap();

    let for_groceries =
        reference::purchase_frequencies_by_category(&db, groceries.id).await.unwrap();
    assert_eq!(for_groceries.len(), 2);
    assert_eq!(reference::list_purchase_frequencies(&db).await.unwrap().len(), 3);
}
