//! CLI entry point for `sqlgate`.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use sqlgate::audit::AuditRecord;
use sqlgate::authority::policy::QueryPolicy;
use sqlgate::validator;
use sqlgate::verdict::{RejectCode, Rejection, Verdict, GENERIC_REJECTION_MESSAGE};

#[derive(Parser)]
#[command(
    name = "sqlgate",
    about = "Validate machine-generated SQL before it reaches the data store"
)]
struct Cli {
    /// File holding the SQL to validate (stdin when omitted and --sql is absent)
    input: Option<PathBuf>,

    /// SQL passed directly on the command line
    #[arg(long, conflicts_with = "input")]
    sql: Option<String>,

    /// Policy JSON file with allowed_objects / denied_schemas
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Additional permitted object (repeatable); merged with --policy
    #[arg(long)]
    allow: Vec<String>,

    /// Emit the audit record as a JSON line on stdout
    #[arg(long)]
    json: bool,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Assemble the policy from file and/or --allow flags.
    let policy = match &cli.policy {
        Some(path) => match QueryPolicy::from_json_file(path) {
            Ok(policy) => policy,
            Err(e) => {
                eprintln!("Error loading policy {}: {e}", path.display());
                process::exit(2);
            }
        },
        None => QueryPolicy::new(std::iter::empty::<&str>()),
    };
    let policy = if cli.allow.is_empty() {
        policy
    } else {
        policy.with_allowed(cli.allow.iter().map(String::as_str))
    };

    // Read the query bytes.
    let raw = if let Some(sql) = cli.sql {
        sql.into_bytes()
    } else if let Some(path) = &cli.input {
        match std::fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(2);
            }
        }
    } else {
        let mut buffer = Vec::new();
        if let Err(e) = std::io::stdin().read_to_end(&mut buffer) {
            eprintln!("Error reading stdin: {e}");
            process::exit(2);
        }
        buffer
    };

    // Undecodable bytes are a rejection, not a crash: every input maps to
    // a verdict.
    let query = match String::from_utf8(raw) {
        Ok(query) => query,
        Err(_) => {
            let verdict: Verdict =
                Rejection::new(RejectCode::MalformedInput, "query is not valid UTF-8").into();
            let audit = AuditRecord::new("", &verdict);
            emit_audit(&audit, cli.json);
            eprintln!("{GENERIC_REJECTION_MESSAGE}");
            process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!(
            "Validating {} bytes against {} allowed object(s)",
            query.len(),
            policy.allowed_len()
        );
    }

    let validation = validator::run(&query, &policy);
    emit_audit(&validation.audit, cli.json);

    match validation.verdict {
        Verdict::Admitted { sql } => {
            if !cli.json {
                print!("{sql}");
            }
        }
        Verdict::Rejected { code, detail } => {
            if cli.verbose {
                eprintln!("Rejected [{code}]: {detail}");
            } else {
                eprintln!("{GENERIC_REJECTION_MESSAGE}");
            }
            process::exit(1);
        }
    }
}

/// Print the audit record as one JSON line. It goes to stderr so stdout
/// stays clean for the admitted SQL; `--json` swaps that around for
/// machine consumers.
fn emit_audit(audit: &AuditRecord, json: bool) {
    match serde_json::to_string(audit) {
        Ok(line) if json => println!("{line}"),
        Ok(line) => eprintln!("{line}"),
        Err(e) => eprintln!("Error serializing audit record: {e}"),
    }
}
