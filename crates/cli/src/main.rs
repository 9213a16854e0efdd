use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_app::App;
use shelf_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "shelf", version, about = "Personal library manager")]
struct Cli {
    /// Override the database url from configuration
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run migrations and serve the web application (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Create a user account
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Shelf settings")?;
    if let Some(url) = cli.database_url {
        settings.database.url = url;
    }
    shelf_telemetry::init(&settings.telemetry)?;

    let app = App::bootstrap(settings).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => app.serve().await,
        Command::Migrate => {
            println!("applied {} migration(s)", app.migrations_applied);
            app.shutdown().await
        }
        Command::CreateUser { username, password } => {
            let created = app.users().add(username.trim(), &password).await;
            let shutdown = app.shutdown().await;
            let user = created.with_context(|| format!("failed to create user '{username}'"))?;
            tracing::info!(user_id = user.id, "user created from cli");
            println!("created user '{}' (id {})", user.username, user.id);
            shutdown
        }
    }
}
