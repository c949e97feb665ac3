use product_assistant::config::{self, Credentials, Settings};
use product_assistant::logging::{LogLevel, init_logging};
use product_assistant::{Bridge, web};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env first so PRODUCT_ASSISTANT_LOG can live there too
    let dotenv = config::load_dotenv();
    init_logging(LogLevel::Info);
    if let Some(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    let credentials = Credentials::from_env();
    let settings = Settings::from_env()?;

    web::serve(Bridge::new(credentials, settings)).await?;
    Ok(())
}
