use anyhow::Context;
use planner::{
    api::routes::create_app,
    cli::{
        init::{self, InitConfig, InitResult},
        show_config, Cli, Commands,
    },
    utils::toml_config::LogFormat,
    AppState, PlannerConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the secret may come from the real environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();
    let output = cli.output();

    match cli.command {
        Some(Commands::Init {
            ref path,
            force,
            ref host,
            port,
        }) => {
            let result = init::run(
                InitConfig {
                    path: path.clone(),
                    force,
                    host: host.clone(),
                    port,
                },
                &output,
            );
            if let InitResult::Error(e) = result {
                anyhow::bail!("init failed: {}", e);
            }
            return Ok(());
        }
        Some(Commands::Config { validate }) => {
            let (config, defaulted) = PlannerConfig::read_or_default(&cli.config)?;
            if defaulted {
                output.warning(&format!(
                    "{} not found, showing defaults",
                    cli.config.display()
                ));
            }
            output.banner();
            show_config(&config, &output);
            if validate {
                match config.validate() {
                    Ok(()) => output.success("Configuration is valid"),
                    Err(e) => {
                        output.error(&e.to_string());
                        anyhow::bail!("invalid configuration");
                    }
                }
            }
            return Ok(());
        }
        None => {}
    }

    let (config, defaulted) = PlannerConfig::read_or_default(&cli.config)
        .with_context(|| format!("failed to read {}", cli.config.display()))?;

    let default_level = if cli.verbose {
        "debug"
    } else {
        config.server.log_level.as_str()
    };
    let json = config.server.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("planner={0},tower_http={0}", default_level).into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    if defaulted {
        tracing::warn!(path = %cli.config.display(), "config file not found, using defaults");
    }
    config
        .validate()
        .context("configuration rejected, is the signing secret set?")?;

    let bind_addr = config.bind_address();
    let state = AppState::from_config(&config).await?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Planner listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
