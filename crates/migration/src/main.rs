use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

/// Applies or inspects the ledger schema.
#[derive(Parser, Debug)]
#[command(name = "migration")]
struct Cli {
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./accountancy.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    step: Option<Step>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Step {
    /// Apply every pending migration (default).
    Up,
    /// Roll back the most recent migration.
    Down,
    /// Roll back everything, then apply again.
    Refresh,
    /// List applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.step.unwrap_or(Step::Up) {
        Step::Up => Migrator::up(&db, None).await?,
        Step::Down => Migrator::down(&db, Some(1)).await?,
        Step::Refresh => Migrator::refresh(&db).await?,
        Step::Status => Migrator::status(&db).await?,
    }

    Ok(())
}
