use accountancy::{
    Accountancy, DatabaseEntryStore, EntryDetails, LedgerEntry, Money, ProductPayment, Volumes,
};
use chrono::{DateTime, Utc};
use clap::Parser;
use migration::{Migrator, MigratorTrait};
use serde::Serialize;

use cli::{AddArgs, Cli, Command, EntriesArgs, VolumeArgs};

mod cli;
mod settings;

type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "accountancy={level},accountancy_cli={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let url = cli
        .database_url
        .clone()
        .unwrap_or_else(|| settings.database.url.clone());
    let database = connect_database(&url).await?;
    let ledger = Accountancy::builder(DatabaseEntryStore::new(database))
        .currency(settings.ledger.currency)
        .build();

    match cli.command {
        Command::Add(args) => add(&ledger, args, cli.json).await,
        Command::Entries(args) => entries(&ledger, args, cli.json).await,
        Command::Volume(args) => volume(&ledger, args, cli.json).await,
    }
}

async fn connect_database(url: &str) -> AppResult<sea_orm::DatabaseConnection> {
    tracing::info!("connecting to {url}");
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}

async fn add(
    ledger: &Accountancy<DatabaseEntryStore>,
    args: AddArgs,
    json: bool,
) -> AppResult<()> {
    let amount = Money::parse(&args.amount, ledger.currency())?;
    let details = match (args.order_id, args.customer) {
        (Some(order_id), Some(customer)) => EntryDetails::ProductPayment(ProductPayment {
            order_id,
            customer,
            payment_method: args.payment,
        }),
        _ => EntryDetails::General,
    };
    let mut entry = LedgerEntry::with_details(amount, args.description, details);
    if let Some(at) = args.at {
        entry.set_timestamp(at)?;
    }

    let posted = ledger.add_entry(entry).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&posted)?);
    } else {
        println!("{} {posted}", posted.id());
    }
    Ok(())
}

async fn entries(
    ledger: &Accountancy<DatabaseEntryStore>,
    args: EntriesArgs,
    json: bool,
) -> AppResult<()> {
    let found = match (args.kind, args.from.zip(args.to)) {
        (Some(kind), Some((from, to))) => ledger.entries_of_kind_between(kind, from, to).await?,
        (Some(kind), None) => ledger.entries_of_kind(kind).await?,
        (None, Some((from, to))) => ledger.entries_between(from, to).await?,
        (None, None) => ledger.entries().await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        for entry in &found {
            println!("{entry}");
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct VolumeRow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    total: Money,
}

fn volume_rows(volumes: &Volumes) -> Vec<VolumeRow> {
    volumes
        .iter()
        .map(|(interval, total)| VolumeRow {
            start: interval.start(),
            end: interval.end(),
            total: *total,
        })
        .collect()
}

async fn volume(
    ledger: &Accountancy<DatabaseEntryStore>,
    args: VolumeArgs,
    json: bool,
) -> AppResult<()> {
    let volumes = ledger
        .sales_volume(args.kind, args.from, args.to, args.period())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&volume_rows(&volumes))?);
        return Ok(());
    }

    for (interval, total) in &volumes {
        println!("{interval}  {total}");
    }
    let grand_total = volumes
        .values()
        .try_fold(Money::zero(ledger.currency()), |acc, total| {
            acc.checked_add(*total)
        })?;
    println!("total  {grand_total}");
    Ok(())
}
