//! Client delete guard over the HTTP surface
//! Run: cargo test -p barber-server --test client_delete_guard

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use barber_server::api;
use barber_server::db::models::{
    ClientCreate, Membership, MembershipPayment, MembershipType, MembershipUpdate,
};
use barber_server::db::repository::{ClientRepository, MembershipRepository};
use barber_server::utils::time;
use barber_server::{Config, ServerState};
use chrono::NaiveDate;
use chrono_tz::UTC;

async fn test_state(dir: &tempfile::TempDir) -> ServerState {
    let config = Config {
        work_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    ServerState::initialize(&config).await.unwrap()
}

fn delete_request(dni: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/api/clients/{}", dni))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn active_membership_blocks_client_delete() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;

    let clients = ClientRepository::new(state.get_db());
    let memberships = MembershipRepository::new(state.get_db());

    clients
        .create(ClientCreate {
            name: "Ana Gómez".to_string(),
            dni: "111".to_string(),
            phone: None,
            email: None,
        })
        .await
        .unwrap();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let created = memberships
        .create(Membership {
            id: None,
            client_dni: "111".to_string(),
            membership_type: MembershipType::Mensual,
            start_date: time::day_start_millis(start, UTC),
            expires_at: time::day_start_millis(
                MembershipType::Mensual.expiry_from(start),
                UTC,
            ),
            price_cents: 500_000,
            payment_method: MembershipPayment::Efectivo,
            notes: String::new(),
            is_active: true,
            created_at: None,
            updated_at: None,
        })
        .await
        .unwrap();

    let app = api::build_app(state.clone());

    // Active membership: delete is refused as a business rule violation
    let response = app.clone().oneshot(delete_request("111")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(clients.find_by_dni("111").await.unwrap().is_some());

    // Deactivate the membership and the delete goes through
    let id = created.id.unwrap().to_string();
    memberships
        .update(
            &id,
            MembershipUpdate {
                is_active: Some(false),
                notes: None,
            },
        )
        .await
        .unwrap();

    let response = app.oneshot(delete_request("111")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(clients.find_by_dni("111").await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_unknown_client_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;

    let app = api::build_app(state);
    let response = app.oneshot(delete_request("999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
