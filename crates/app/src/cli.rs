use accountancy::{EntryKind, PaymentMethod};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "accountancy")]
#[command(about = "Append-only ledger with period reports")]
pub struct Cli {
    /// Database connection string; overrides the settings (also read from
    /// `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Post a new entry.
    Add(AddArgs),
    /// List entries, optionally filtered by kind and range.
    Entries(EntriesArgs),
    /// Sum entries of a kind per period.
    Volume(VolumeArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Signed amount in the ledger currency, e.g. `12.50`.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Posting time (RFC 3339 or `YYYY-MM-DD`); now when omitted.
    #[arg(long, value_parser = parse_instant)]
    pub at: Option<DateTime<Utc>>,
    /// Records a product payment for this order instead of a general entry.
    #[arg(long, requires = "customer")]
    pub order_id: Option<String>,
    #[arg(long, requires = "order_id")]
    pub customer: Option<String>,
    #[arg(long, value_parser = parse_payment_method, default_value = "cash")]
    pub payment: PaymentMethod,
}

#[derive(Args, Debug)]
pub struct EntriesArgs {
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<EntryKind>,
    #[arg(long, value_parser = parse_instant, requires = "to")]
    pub from: Option<DateTime<Utc>>,
    #[arg(long, value_parser = parse_instant, requires = "from")]
    pub to: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub struct VolumeArgs {
    #[arg(long, value_parser = parse_kind, default_value = "general")]
    pub kind: EntryKind,
    #[arg(long, value_parser = parse_instant)]
    pub from: DateTime<Utc>,
    #[arg(long, value_parser = parse_instant)]
    pub to: DateTime<Utc>,
    /// Bucket length in days.
    #[arg(long, default_value_t = 7)]
    pub period_days: i64,
}

impl VolumeArgs {
    pub fn period(&self) -> TimeDelta {
        TimeDelta::days(self.period_days)
    }
}

fn parse_kind(raw: &str) -> Result<EntryKind, String> {
    EntryKind::try_from(raw.trim().to_ascii_lowercase().as_str()).map_err(|err| err.to_string())
}

fn parse_payment_method(raw: &str) -> Result<PaymentMethod, String> {
    PaymentMethod::try_from(raw.trim().to_ascii_lowercase().as_str())
        .map_err(|err| err.to_string())
}

/// Accepts RFC 3339 instants or plain dates, read as midnight UTC.
fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid instant: {raw} (expected RFC 3339 or YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn instants_accept_dates_and_rfc3339() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        assert_eq!(parse_instant("2024-01-10").unwrap(), midnight);
        assert_eq!(parse_instant("2024-01-10T00:00:00Z").unwrap(), midnight);
        assert_eq!(
            parse_instant("2024-01-10T02:00:00+02:00").unwrap(),
            midnight
        );
        assert!(parse_instant("10/01/2024").is_err());
    }

    #[test]
    fn volume_command_parses() {
        let cli = Cli::try_parse_from([
            "accountancy",
            "volume",
            "--kind",
            "product_payment",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-15",
            "--period-days",
            "7",
        ])
        .unwrap();
        let Command::Volume(args) = cli.command else {
            panic!("expected volume command");
        };
        assert_eq!(args.kind, EntryKind::ProductPayment);
        assert_eq!(args.period(), TimeDelta::days(7));
    }

    #[test]
    fn payment_fields_go_together() {
        let result = Cli::try_parse_from([
            "accountancy",
            "add",
            "--amount",
            "10",
            "--order-id",
            "order-1",
        ]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["accountancy", "add", "--amount", "-2.50"]).unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(args.amount, "-2.50");
        assert_eq!(args.payment, PaymentMethod::Cash);
    }
}
