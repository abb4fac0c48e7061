use chrono::Local;
use dotenv::dotenv;
use rewise_backend::config::Config;
use rewise_backend::runner::Runner;
use rewise_backend::scheduler;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Rewise v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let runner = match Runner::from_config(&config) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("Failed to initialize clients: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(schedule) = config.schedule.clone() {
        scheduler::run(schedule, runner).await;
        return;
    }

    match runner.run_quiz_cycle(Local::now().naive_local()).await {
        Ok(outcome) => {
            log::info!("✅ Quiz for '{}' ({} questions)", outcome.title, outcome.item_count);
            if !outcome.posted {
                log::warn!("⚠️ Discord post failed");
            }
            if !outcome.archived {
                log::warn!("⚠️ Quiz was not archived");
            }
            if !outcome.tracked {
                log::warn!("⚠️ Tracking ledger was not updated");
            }
        }
        Err(e) => {
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
