use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tollbooth_core::AppConfig;
use tollbooth_token::{JWT_ALGORITHM_NAME, SigningKey};
use tollbooth_web::{AppState, WebServer};

#[derive(Parser, Debug)]
#[command(name = "tollbooth", version, about = "Short-lived JWT session service")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, env = "TOLLBOOTH_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server (the default when no subcommand is given).
    Serve {
        /// Bind address, e.g. "0.0.0.0:8000". Overrides the config file.
        #[arg(long, env = "TOLLBOOTH_BIND")]
        bind: Option<String>,
    },

    /// Generate a fresh RSA keypair and write both PEM files.
    Keygen {
        /// Output path for the private key PEM.
        #[arg(long, default_value = "tollbooth_private.pem")]
        out: PathBuf,

        /// Output path for the public key PEM.
        #[arg(long, default_value = "tollbooth_public.pem")]
        public_out: PathBuf,

        /// RSA key size in bits.
        #[arg(long, default_value_t = 2048)]
        bits: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Some(Command::Keygen {
            out,
            public_out,
            bits,
        }) => keygen(&out, &public_out, bits),
        Some(Command::Serve { bind }) => serve(cli.config.as_deref(), bind).await,
        None => serve(cli.config.as_deref(), None).await,
    }
}

async fn serve(config_path: Option<&Path>, bind: Option<String>) -> anyhow::Result<()> {
    let mut config = AppConfig::load(config_path).context("loading configuration")?;
    if let Some(bind) = bind {
        config.web.bind = bind;
    }

    // No usable key material means the process must not serve requests.
    let key = SigningKey::load(&config.keys)
        .context("loading signing key; the server cannot start without one")?;

    tracing::info!(
        kid = %key.kid(),
        alg = JWT_ALGORITHM_NAME,
        issuer = %config.tokens.issuer,
        lifetime_secs = config.tokens.lifetime_secs,
        "signing key loaded"
    );

    let state = AppState::new(key, config.tokens.clone());
    let server = WebServer::new(config.web.clone(), state);
    server.run().await?;

    Ok(())
}

fn keygen(out: &Path, public_out: &Path, bits: usize) -> anyhow::Result<()> {
    let key = SigningKey::generate(bits).context("generating keypair")?;
    key.save_to_files(out, public_out)
        .context("writing key files")?;

    tracing::info!(
        kid = %key.kid(),
        private = %out.display(),
        public = %public_out.display(),
        "keypair written"
    );
    println!("kid: {}", key.kid());
    println!("private key: {}", out.display());
    println!("public key:  {}", public_out.display());

    Ok(())
}
