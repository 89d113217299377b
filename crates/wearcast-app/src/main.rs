mod error_mapping;

use anyhow::Result;

use wearcast_assistant::{local_recommendation, Scene};
use wearcast_auth::AuthRepository;
use wearcast_services::{
    evaluate_alerts, quick_suggestion, NotificationRepository, PlanRepository, SettingsRepository,
};
use wearcast_store::StoreContext;
use wearcast_weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    wearcast_core::init()?;

    let (config, _validation) = wearcast_core::Config::load_validated()?;

    // Open the persisted store and wire up the repositories
    let ctx = StoreContext::open(&config.data_dir).map_err(error_mapping::store_error)?;
    let plans = PlanRepository::new(ctx.clone());
    let notifications = NotificationRepository::new(ctx.clone());
    let settings = SettingsRepository::new(ctx.clone());
    let auth = AuthRepository::new(ctx);

    tracing::info!("Wearcast application started");

    let now = chrono::Utc::now();
    let today = now.format("%Y-%m-%d").to_string();
    let user_settings = settings.load();

    println!("Wearcast - Weather & Wardrobe Assistant");
    println!("\nConfiguration:");
    println!("  Config directory: {}", config.config_dir.display());
    println!("  Data directory: {}", config.data_dir.display());
    println!("  Weather city: {}", config.weather.default_city);
    println!("\nToday:");
    println!("  Plans today: {}", plans.today(&today).len());
    println!("  Unread notifications: {}", notifications.unread_count());
    match auth.state().user {
        Some(user) => println!("  Signed in as: {}", user.username),
        None => println!("  Signed in as: (nobody)"),
    }

    if config.weather.api_key.is_empty() {
        println!("\nWeather: not configured (set weather.api_key in config.toml)");
        return Ok(());
    }

    let client = WeatherClient::with_base_url(&config.weather.api_key, &config.weather.base_url)
        .map_err(error_mapping::weather_error)?;
    match client.fetch(&config.weather.default_city).await {
        Ok(bundle) => {
            let current = &bundle.current;
            println!("\nWeather in {}:", current.city);
            println!("  {}°C, {}, humidity {}%", current.temperature, current.weather, current.humidity);
            println!("  {}", quick_suggestion(current.temperature));

            // Threshold alerts land in the notification center like any
            // other write; each one is its own separately-failable save.
            for draft in evaluate_alerts(&user_settings, current) {
                let n = notifications.add(draft.kind, draft.title, draft.message, now);
                println!("  Alert: {}", n.title);
            }

            let recommendation = local_recommendation(
                f64::from(current.temperature),
                &current.weather,
                Scene::Casual,
            );
            if let Some(outfit) = recommendation.outfits.first() {
                println!("  Outfit: {} + {}", outfit.top.join(", "), outfit.bottom.join(", "));
            }
        }
        Err(e) => {
            let err = error_mapping::weather_error(e);
            tracing::warn!(error = %err, "weather fetch failed");
            println!("\nWeather: {}", err.user_message());
        }
    }

    Ok(())
}
