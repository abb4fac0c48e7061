use chrono::Local;
use dotenv::dotenv;
use rewise_backend::config::Config;
use rewise_backend::runner;
use rewise_backend::store::NotionClient;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let store = match NotionClient::new(&config) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to initialize Notion client: {}", e);
            std::process::exit(1);
        }
    };

    match runner::refresh_dashboard(&store, Local::now().naive_local()).await {
        Ok(true) => log::info!("✅ Dashboard updated"),
        Ok(false) => {
            log::error!("❌ Dashboard update failed");
            std::process::exit(1);
        }
        Err(e) => {
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
