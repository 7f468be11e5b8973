use anyhow::{Context, Result};
use arcade_server::config::ArcadeConfig;
use arcade_server::db::{ScoreLedger, SqliteLedger};
use arcade_server::http_server::{AppState, run_http_server_with_listener};
use reqwest::redirect::Policy;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const NEON_PONG_INDEX: &str = "<html><body>neon pong</body></html>";
pub const NEON_PONG_SCRIPT: &str = "console.log('pong');";

/// Opens a fresh ledger file at `path` and creates the table.
pub async fn test_ledger(path: &Path) -> Result<SqliteLedger> {
    let url = format!("sqlite://{}", path.display());
    let ledger = SqliteLedger::connect(&url, 5).await?;
    ledger.init().await?;
    Ok(ledger)
}

/// A portal running on an ephemeral port with its own database, games and
/// web directories inside a temp dir.
pub struct TestArcade {
    pub addr: SocketAddr,
    pub ledger: SqliteLedger,
    pub client: reqwest::Client,
    cancellation_token: CancellationToken,
    handle: JoinHandle<Result<()>>,
    _root: TempDir,
}

impl TestArcade {
    pub async fn start() -> Result<Self> {
        Self::start_with(false).await
    }

    /// Like `start`, choosing whether proxy headers name the submitter.
    pub async fn start_with(trust_proxy_headers: bool) -> Result<Self> {
        let root = tempfile::tempdir()?;

        let games_dir = root.path().join("games");
        let pong_dir = games_dir.join("neon-pong");
        std::fs::create_dir_all(&pong_dir)?;
        std::fs::write(pong_dir.join("index.html"), NEON_PONG_INDEX)?;
        std::fs::write(pong_dir.join("script.js"), NEON_PONG_SCRIPT)?;

        let web_dir = root.path().join("web");
        std::fs::create_dir_all(&web_dir)?;
        for page in ["login", "home", "scores", "admin_scores"] {
            std::fs::write(web_dir.join(format!("{page}.html")), format!("<h1>{page} page</h1>"))?;
        }

        let db_path = root.path().join("arcade.db");
        let ledger = test_ledger(&db_path).await?;

        let config = ArcadeConfig {
            http_addr: "127.0.0.1:0".to_string(),
            database_url: format!("sqlite://{}", db_path.display()),
            db_max_connections: 5,
            games_dir,
            web_dir,
            session_secret: "test-secret".to_string(),
            trust_proxy_headers,
        };
        let state = AppState::new(Arc::new(ledger.clone()), &config);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let cancellation_token = CancellationToken::new();
        let handle = tokio::spawn(run_http_server_with_listener(
            listener,
            state,
            cancellation_token.clone(),
        ));

        let client = reqwest::Client::builder().redirect(Policy::none()).build()?;

        Ok(Self {
            addr,
            ledger,
            client,
            cancellation_token,
            handle,
            _root: root,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Logs in and returns the `Cookie` header value carrying the session.
    pub async fn login(&self, username: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url("/login"))
            .form(&[("username", username)])
            .send()
            .await?;

        let set_cookie = response
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .context("login did not set a cookie")?
            .to_str()?;
        let cookie = set_cookie.split(';').next().unwrap_or_default().to_string();
        Ok(cookie)
    }

    pub async fn score_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scores")
            .fetch_one(self.ledger.pool())
            .await?;
        Ok(count)
    }

    pub async fn shutdown(self) -> Result<()> {
        self.cancellation_token.cancel();
        self.handle.await??;
        Ok(())
    }
}
