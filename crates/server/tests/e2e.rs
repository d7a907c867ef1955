use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    root: PathBuf,
}

impl TestApp {
    fn data_file(&self, name: &str) -> PathBuf {
        self.root.join("data").join(name)
    }
}

fn config_for(root: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = root.join("data").to_string_lossy().to_string();
    cfg.storage.static_dir = root.join("public").to_string_lossy().to_string();
    cfg
}

async fn start_server_at(root: PathBuf) -> anyhow::Result<TestApp> {
    let app = server::build_app(&config_for(&root)).await;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, root })
}

async fn start_server() -> anyhow::Result<TestApp> {
    let root = std::env::temp_dir().join(format!("spendbook_e2e_{}", Uuid::new_v4()));
    tokio::fs::create_dir_all(root.join("public")).await?;
    tokio::fs::write(root.join("public").join("index.html"), "<h1>Expense Tracker</h1>").await?;
    start_server_at(root).await
}

#[tokio::test]
async fn e2e_startup_creates_default_files() -> anyhow::Result<()> {
    let app = start_server().await?;

    for (file, text) in [
        ("expenses.json", "[]"),
        ("friend_transactions.json", "[]"),
        ("received_transactions.json", "[]"),
        ("settings.json", "{}"),
    ] {
        assert_eq!(tokio::fs::read_to_string(app.data_file(file)).await?, text, "{file}");
    }

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_save_load_and_restart_keeps_data() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let expenses = json!([
        {"id": 1, "description": "Coffee", "amount": 3.25},
        {"id": 2, "description": "Train", "amount": 12}
    ]);
    let res = c.post(format!("{}/api/expenses", app.base_url)).json(&expenses).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "Expenses saved successfully");

    let settings = json!({"currency": "GBP"});
    c.post(format!("{}/api/settings", app.base_url)).json(&settings).send().await?;

    let on_disk = tokio::fs::read_to_string(app.data_file("expenses.json")).await?;
    assert_eq!(on_disk, serde_json::to_string_pretty(&expenses)?);

    // a second startup on the same directory must not reset anything
    let restarted = start_server_at(app.root.clone()).await?;
    let body = c.get(format!("{}/api/expenses", restarted.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(body, expenses);
    let body = c.get(format!("{}/api/settings", restarted.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(body, settings);

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_external_corruption_is_masked() -> anyhow::Result<()> {
    let app = start_server().await?;
    tokio::fs::write(app.data_file("friend_transactions.json"), "definitely not json").await?;
    tokio::fs::remove_file(app.data_file("settings.json")).await?;

    let c = reqwest::Client::new();
    let res = c.get(format!("{}/api/friend-transactions", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    let res = c.get(format!("{}/api/settings", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, json!({}));

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_clear_all_rewrites_files() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    c.post(format!("{}/api/received-transactions", app.base_url))
        .json(&json!([{"amount": 10}]))
        .send()
        .await?;

    let res = c.delete(format!("{}/api/clear-all", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"success": true, "message": "All data cleared successfully"})
    );

    for file in ["expenses.json", "friend_transactions.json", "received_transactions.json", "settings.json"] {
        assert_eq!(tokio::fs::read_to_string(app.data_file(file)).await?, "[]", "{file}");
    }

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_saves_leave_one_whole_payload() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let url = format!("{}/api/expenses", app.base_url);

    let a = json!((0..300).map(|i| json!({"id": i, "src": "a"})).collect::<Vec<_>>());
    let b = json!((0..50).map(|i| json!({"id": i, "src": "b", "note": "longer record"})).collect::<Vec<_>>());

    for _ in 0..10 {
        let (ra, rb) = tokio::join!(c.post(&url).json(&a).send(), c.post(&url).json(&b).send());
        assert_eq!(ra?.status(), HttpStatusCode::OK);
        assert_eq!(rb?.status(), HttpStatusCode::OK);

        let stored = c.get(&url).send().await?.json::<Value>().await?;
        assert!(stored == a || stored == b);
    }

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_static_files_served_from_root() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/index.html", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "<h1>Expense Tracker</h1>");

    let res = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/missing.js", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_dotfiles_are_not_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let public = app.root.join("public");
    tokio::fs::write(public.join(".env"), "SECRET=hunter2").await?;
    tokio::fs::create_dir_all(public.join(".git")).await?;
    tokio::fs::write(public.join(".git").join("config"), "[core]").await?;

    let c = reqwest::Client::new();
    for path in ["/.env", "/%2Eenv", "/.git/config"] {
        let res = c.get(format!("{}{}", app.base_url, path)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::NOT_FOUND, "{path}");
        assert!(!res.text().await?.contains("hunter2"), "{path}");
    }

    // regular files next to them are still served
    let res = c.get(format!("{}/index.html", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}
