// tests/subscription_tests.rs

use concurseiro::{
    config::Config,
    quiz::SessionStore,
    repo::{Repos, seed},
    routes,
    state::AppState,
};

async fn spawn_app() -> String {
    let repos = Repos::in_memory();
    seed::load_demo_data(&repos)
        .await
        .expect("Failed to seed demo data");

    let sessions = SessionStore::new(repos.results.clone());

    let config = Config {
        port: 0,
        jwt_secret: "subscription_test_secret".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
    };

    let state = AppState {
        repos,
        sessions,
        config,
    };

    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn register_and_login(address: &str, client: &reqwest::Client) -> String {
    let email = format!("s_{}@teste.com", &uuid::Uuid::new_v4().to_string()[..8]);
    let body: serde_json::Value = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Assinante Teste",
            "email": email,
            "password": "senha123"
        }))
        .send()
        .await
        .expect("Register failed")
        .json()
        .await
        .unwrap();
    body["token"].as_str().expect("Token not found").to_string()
}

#[tokio::test]
async fn plan_catalog_lists_three_plans() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let plans: Vec<serde_json::Value> = client
        .get(format!("{}/api/assinaturas/planos", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(plans.len(), 3);
    let trimestral = plans.iter().find(|p| p["id"] == "trimestral").unwrap();
    assert_eq!(trimestral["price"], 129);
    assert_eq!(trimestral["recommended"], true);
}

#[tokio::test]
async fn get_plan_by_id() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let plan: serde_json::Value = client
        .get(format!("{}/api/assinaturas/planos/mensal", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(plan["title"], "Mensal");
    assert_eq!(plan["price"], 49);

    let missing = client
        .get(format!("{}/api/assinaturas/planos/inexistente", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn demo_user_has_a_seeded_subscription() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let login: serde_json::Value = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "email": "joao@exemplo.com",
            "password": "123456"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = login["token"].as_str().unwrap();

    let subscription: serde_json::Value = client
        .get(format!("{}/api/assinaturas/me", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(subscription["status"], "ativa");
    assert_eq!(subscription["plan"]["id"], "trimestral");
    assert_eq!(subscription["amount_paid"], 129);
}

#[tokio::test]
async fn subscription_lifecycle() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&address, &client).await;

    // No subscription yet
    let none_yet = client
        .get(format!("{}/api/assinaturas/me", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(none_yet.status().as_u16(), 404);

    // Unknown plan is 404
    let bad_plan = client
        .post(format!("{}/api/assinaturas", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "plan_id": "vitalicio",
            "payment_method": "Pix"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_plan.status().as_u16(), 404);

    // Subscribe to the yearly plan
    let created = client
        .post(format!("{}/api/assinaturas", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "plan_id": "anual",
            "payment_method": "Pix"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status().as_u16(), 201);

    let body: serde_json::Value = created.json().await.unwrap();
    assert_eq!(body["status"], "ativa");
    assert_eq!(body["amount_paid"], 399);
    assert_eq!(body["plan"]["id"], "anual");
    assert!(body["end_date"].as_str().unwrap() > body["start_date"].as_str().unwrap());

    // A second active subscription conflicts
    let duplicate = client
        .post(format!("{}/api/assinaturas", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "plan_id": "mensal",
            "payment_method": "Pix"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status().as_u16(), 409);

    // Cancel
    let canceled = client
        .delete(format!("{}/api/assinaturas/me", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(canceled.status().as_u16(), 200);
    let body: serde_json::Value = canceled.json().await.unwrap();
    assert_eq!(body["subscription"]["status"], "cancelada");

    // Canceling again finds nothing active
    let nothing_active = client
        .delete(format!("{}/api/assinaturas/me", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(nothing_active.status().as_u16(), 404);

    // The canceled subscription is still the most recent one
    let latest: serde_json::Value = client
        .get(format!("{}/api/assinaturas/me", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(latest["status"], "cancelada");

    // After canceling, subscribing again is allowed
    let resubscribed = client
        .post(format!("{}/api/assinaturas", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "plan_id": "mensal",
            "payment_method": "Boleto"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resubscribed.status().as_u16(), 201);
}

#[tokio::test]
async fn subscription_routes_require_authentication() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let me = client
        .get(format!("{}/api/assinaturas/me", address))
        .send()
        .await
        .unwrap();
    assert_eq!(me.status().as_u16(), 401);

    let create = client
        .post(format!("{}/api/assinaturas", address))
        .json(&serde_json::json!({
            "plan_id": "mensal",
            "payment_method": "Pix"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create.status().as_u16(), 401);
}
