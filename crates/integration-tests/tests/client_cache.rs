//! End-to-end tests for the client data cache against a live gateway.

use market_client::{ApiClient, CatalogCache, LoadState};
use market_core::{CatalogBrowser, CategoryDraft, CategoryId, FilterCriteria, Price, ProductDraft};
use market_integration_tests::{TEST_PASSWORD, TEST_USERNAME, spawn_app};

async fn logged_in_api(base_url: &str) -> ApiClient {
    let api = ApiClient::new(base_url).expect("build client");
    api.login(TEST_USERNAME, TEST_PASSWORD)
        .await
        .expect("login");
    api
}

fn draft(category: CategoryId, name: &str, stock: u32) -> ProductDraft {
    ProductDraft {
        name: name.to_owned(),
        description: "cache test item".to_owned(),
        category,
        stock,
        price: Price::from_cents(1250).expect("price"),
        image: None,
    }
}

#[tokio::test]
async fn load_add_edit_remove_round_trip() {
    let app = spawn_app().await;
    let api = logged_in_api(&app.base_url).await;
    let mut cache = CatalogCache::new();

    cache.load(&api).await.expect("initial load");
    assert_eq!(*cache.products_state(), LoadState::Loaded);
    assert_eq!(*cache.categories_state(), LoadState::Loaded);
    assert!(cache.products().is_empty());

    let category_id = cache
        .add_category(&api, CategoryDraft { name: "Appliances".to_owned() })
        .await
        .expect("add category");

    let product_id = cache
        .add_product(&api, draft(category_id, "Kettle", 4))
        .await
        .expect("add product");
    assert_eq!(cache.products().len(), 1);
    // The mirror holds the category collapsed back to its id.
    assert_eq!(cache.products()[0].category, category_id);

    cache
        .edit_product(&api, product_id, draft(category_id, "Kettle Pro", 0))
        .await
        .expect("edit product");
    assert_eq!(cache.products()[0].name, "Kettle Pro");
    assert_eq!(cache.products()[0].stock, 0);

    // The server agrees with the mirror.
    let view = api.product(product_id).await.expect("fetch product");
    assert_eq!(view.name, "Kettle Pro");
    assert_eq!(view.category.id, category_id);

    // Removing the referenced category is rejected and it stays mirrored.
    assert!(cache.remove_category(&api, category_id).await.is_err());
    assert_eq!(cache.categories().len(), 1);

    cache
        .remove_product(&api, product_id)
        .await
        .expect("remove product");
    assert!(cache.products().is_empty());
    assert!(cache.last_error().is_none());

    cache
        .edit_category(&api, category_id, CategoryDraft { name: "Kitchen".to_owned() })
        .await
        .expect("edit category");
    assert_eq!(cache.categories()[0].name, "Kitchen");

    // Re-arming the session cookie mid-flight works against the same jar.
    api.refresh().await.expect("refresh access token");

    cache
        .remove_category(&api, category_id)
        .await
        .expect("remove category");
    assert!(cache.categories().is_empty());

    // A fresh load agrees with the mirror we maintained incrementally.
    cache.load(&api).await.expect("reload");
    assert!(cache.products().is_empty());
    assert!(cache.categories().is_empty());
}

#[tokio::test]
async fn failed_mutation_leaves_the_mirror_untouched() {
    let app = spawn_app().await;
    let api = logged_in_api(&app.base_url).await;
    let mut cache = CatalogCache::new();
    cache.load(&api).await.expect("initial load");

    let result = cache
        .add_product(&api, draft(CategoryId::generate(), "Orphan", 1))
        .await;
    assert!(result.is_err());
    assert!(cache.products().is_empty());
    assert_eq!(cache.last_error(), Some("api error (400 Bad Request): Category does not exist"));

    // The next successful operation clears the flag.
    cache
        .add_category(&api, CategoryDraft { name: "Food".to_owned() })
        .await
        .expect("add category");
    assert!(cache.last_error().is_none());
}

#[tokio::test]
async fn unauthenticated_load_sets_the_failed_state() {
    let app = spawn_app().await;
    let api = ApiClient::new(&app.base_url).expect("build client");
    let mut cache = CatalogCache::new();

    assert!(cache.load_products(&api).await.is_err());
    assert!(matches!(cache.products_state(), LoadState::Failed(_)));
    assert!(cache.last_error().is_some());
}

#[tokio::test]
async fn visible_page_clamps_after_a_deletion() {
    let app = spawn_app().await;
    let api = logged_in_api(&app.base_url).await;
    let mut cache = CatalogCache::new();
    cache.load(&api).await.expect("initial load");

    let category_id = cache
        .add_category(&api, CategoryDraft { name: "Bulk".to_owned() })
        .await
        .expect("add category");

    // Seven products with the default page size of six: page 2 holds one.
    let mut last_id = None;
    for i in 0..7 {
        let id = cache
            .add_product(&api, draft(category_id, &format!("Item {i}"), i))
            .await
            .expect("add product");
        last_id = Some(id);
    }

    let mut browser = CatalogBrowser::default();
    browser.goto(2);
    let page = cache.visible_page(&browser);
    assert_eq!(page.page, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_pages, 2);

    // Deleting that last item shrinks the set; the same request clamps to 1.
    cache
        .remove_product(&api, last_id.expect("seven products created"))
        .await
        .expect("remove product");
    let page = cache.visible_page(&browser);
    assert_eq!(page.page, 1);
    assert_eq!(page.items.len(), 6);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn applying_filter_criteria_resets_the_page() {
    let app = spawn_app().await;
    let api = logged_in_api(&app.base_url).await;
    let mut cache = CatalogCache::new();
    cache.load(&api).await.expect("initial load");

    let category_id = cache
        .add_category(&api, CategoryDraft { name: "Bulk".to_owned() })
        .await
        .expect("add category");
    for i in 0..8 {
        cache
            .add_product(&api, draft(category_id, &format!("Item {i}"), i % 2))
            .await
            .expect("add product");
    }

    let mut browser = CatalogBrowser::default();
    browser.goto(2);
    assert_eq!(cache.visible_page(&browser).page, 2);

    browser
        .apply(FilterCriteria {
            in_stock_only: true,
            ..FilterCriteria::default()
        })
        .expect("apply criteria");
    let page = cache.visible_page(&browser);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_items, 4);
}
