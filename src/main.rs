use postboard::{app, db, logging, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init("postboard=debug,axum=info,tower_http=info");

    let app_state = AppState::init().await?;

    db::migrate(&app_state.db).await?;

    app::serve(app::build_app(app_state)).await
}
