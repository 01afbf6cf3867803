use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use rolegate::{
    AuthzConfig, Principal, Requirement, Role, build_authz_state,
    axum_ext::{CurrentPrincipal, Roles, authz_with_registry},
};
use serde_json::{Value, json};
use uuid::Uuid;

/// Rolegate demo server - role-gated routes under /api/v1
#[derive(Parser)]
#[command(name = "rolegate-demo")]
#[command(about = "Demo server wiring the rolegate authorization middleware")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file (resources + principals)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AuthzConfig> {
    let Some(path) = path else {
        return demo_config();
    };
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed("ROLEGATE_").split("__"))
        .extract()
        .context("failed to load authorization configuration")
}

/// Built-in catalog used when no config file is given: the three classic
/// routes, one seeded principal per role.
fn demo_config() -> Result<AuthzConfig> {
    let mut config = AuthzConfig::default();
    for name in ["admin", "user", "subscriber"] {
        let role = Role::new(name)?;
        config
            .resources
            .insert(format!("/api/v1/{name}"), Requirement::any_of([role]));
        let id = Uuid::new_v4();
        config.principals.insert(id, vec![name.to_owned()]);
        tracing::info!(principal = %id, role = name, "seeded demo principal");
    }
    Ok(config)
}

/// Demo stand-in for the upstream authentication layer: trusts the
/// `x-principal-id` header. Real deployments establish the principal from a
/// session or validated token before authorization runs.
async fn header_authn(mut request: Request, next: Next) -> Response {
    let principal = request
        .headers()
        .get("x-principal-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(Principal::new);
    if let Some(principal) = principal {
        request.extensions_mut().insert(principal);
    }
    next.run(request).await
}

async fn whoami(
    CurrentPrincipal(principal): CurrentPrincipal,
    Roles(roles): Roles,
) -> Json<Value> {
    Json(json!({ "id": principal.id(), "roles": roles }))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_ref())?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let state = build_authz_state(&config).context("invalid authorization configuration")?;

    let app = Router::new()
        .route("/api/v1/admin", get(whoami))
        .route("/api/v1/user", get(whoami))
        .route("/api/v1/subscriber", get(whoami))
        .layer(middleware::from_fn_with_state(state, authz_with_registry))
        .layer(middleware::from_fn(header_authn));

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    tracing::info!(addr = %cli.bind, "rolegate demo listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_config_covers_all_routes() {
        let config = demo_config().unwrap();
        assert_eq!(config.resources.len(), 3);
        assert_eq!(config.principals.len(), 3);
        assert!(config.resources.contains_key("/api/v1/admin"));
        assert!(config.resources.contains_key("/api/v1/user"));
        assert!(config.resources.contains_key("/api/v1/subscriber"));
    }

    #[test]
    fn test_demo_config_builds_state() {
        assert!(build_authz_state(&demo_config().unwrap()).is_ok());
    }
}
