use std::sync::Arc;

use catalog_app::App;
use catalog_authz::{Identity, Role};
use catalog_client::{AutoConfirm, CatalogClient, DeleteOutcome, HttpCatalogApi, View};
use catalog_db::{fixtures, InMemoryProductStore, ProductStore};
use catalog_http::SessionStore;
use catalog_kernel::settings::Settings;

/// Serve a freshly seeded catalog on an ephemeral port and return its URL.
async fn serve(count: u32) -> String {
    let store = Arc::new(InMemoryProductStore::new());
    fixtures::seed(store.as_ref(), count).await.unwrap();

    let sessions = SessionStore::new();
    sessions.insert("admin", Identity::new("ana", [Role::Admin])).await;
    sessions
        .insert("customer", Identity::new("cleo", [Role::Customer]))
        .await;

    let store: Arc<dyn ProductStore> = store;
    let router = App::new(store, sessions)
        .unwrap()
        .router(&Settings::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str, session: &str) -> CatalogClient<HttpCatalogApi> {
    CatalogClient::new(HttpCatalogApi::new(base_url, Some(session)).unwrap())
}

#[tokio::test]
async fn browse_pages_over_http() {
    let base_url = serve(13).await;
    let mut client = client(&base_url, "admin");

    client.mount().await;
    assert_eq!(client.state().items.len(), 12);
    assert_eq!(client.state().last_page(), Some(2));

    client.change_page(2).await;
    let ids: Vec<u64> = client.state().items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![13]);

    let text = client.view().to_string();
    assert!(text.contains("#13 Product 13"));
    assert!(text.contains("« Previous 1 [2] (Next »)"));
}

#[tokio::test]
async fn admin_deletes_through_csrf_handshake() {
    let base_url = serve(3).await;
    let mut client = client(&base_url, "admin");
    client.mount().await;

    let outcome = client.delete(2, &mut AutoConfirm).await;

    assert_eq!(
        outcome,
        DeleteOutcome::Deleted("Producto eliminado correctamente".to_string())
    );
    let ids: Vec<u64> = client.state().items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let mut fresh = self::client(&base_url, "admin");
    fresh.mount().await;
    assert_eq!(fresh.state().pagination.as_ref().unwrap().total, 2);
}

#[tokio::test]
async fn customer_delete_is_refused() {
    let base_url = serve(3).await;
    let mut client = client(&base_url, "customer");
    client.mount().await;

    let outcome = client.delete(2, &mut AutoConfirm).await;

    assert_eq!(
        outcome,
        DeleteOutcome::Failed("You are not authorized to delete this product.".to_string())
    );
    assert_eq!(client.state().items.len(), 3);
}

#[tokio::test]
async fn deleting_a_missing_product_reports_status() {
    let base_url = serve(1).await;
    let mut client = client(&base_url, "admin");
    client.mount().await;

    let DeleteOutcome::Failed(message) = client.delete(42, &mut AutoConfirm).await else {
        panic!("expected failure");
    };
    assert!(message.starts_with("Error 404: "), "{message}");
}

#[tokio::test]
async fn unreachable_service_shows_error_view() {
    let mut client = client("http://127.0.0.1:9", "admin");
    client.mount().await;

    assert_eq!(
        client.view(),
        View::Error("Could not reach the catalog service. Please try again.".to_string())
    );
}
