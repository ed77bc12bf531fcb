use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use api::HttpBackend;
use app::auth::{self, Credentials, SignupForm};
use app::session;
use app::transfer::{self, TransferRequest};
use app::Dashboard;
use clap::{Parser, Subcommand};
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about = "Koinsave: balances and transfers over a mock REST API", long_about = None)]
struct Args {
    /// Base URL of the mock REST API.
    #[arg(long, env = "KOINSAVE_API_URL", default_value = api::DEFAULT_BASE_URL)]
    api_url: Url,
    /// Directory holding the session.
    #[arg(long, env = "KOINSAVE_SESSION_DIR", default_value = ".koinsave")]
    session_dir: PathBuf,
    /// Per-request timeout in seconds, 0 to wait indefinitely.
    #[arg(long, env = "KOINSAVE_TIMEOUT_SECS", default_value_t = 30)]
    timeout: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and log in.
    Signup {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
    },
    /// Log in with email and password.
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show balance and recent transactions.
    Dashboard,
    /// Send money to another user by email.
    Send {
        #[arg(long, default_value = "")]
        to: String,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        amount: f64,
    },
}

#[derive(Debug)]
struct Config {
    api_url: Url,
    session_dir: PathBuf,
    timeout: Option<Duration>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            api_url: self.api_url.clone(),
            session_dir: self.session_dir.clone(),
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = args.config();
    log::debug!("{:?}", config);

    let backend = HttpBackend::new(config.api_url, config.timeout)
        .context("could not set up the http client")?;
    let store = session::Store::new(config.session_dir);

    if let Err(message) = run(args.command, &backend, &store).await {
        eprintln!("{}", message);
        std::process::exit(1);
    }
    Ok(())
}

/// Runs one command. Errors come back as the message meant for the user.
async fn run(command: Command, backend: &HttpBackend, store: &session::Store) -> Result<(), String> {
    match command {
        Command::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = SignupForm {
                name,
                email,
                password,
                confirm_password,
            };
            let user = auth::signup(backend, store, &form)
                .await
                .map_err(|e| e.to_string())?;
            println!("Welcome, {}", user.display_name());
        }
        Command::Login { email, password } => {
            let user = auth::login(backend, store, &Credentials { email, password })
                .await
                .map_err(|e| e.to_string())?;
            println!("Welcome, {}", user.display_name());
        }
        Command::Logout => {
            if auth::logout(store).map_err(|e| e.to_string())? {
                println!("Logged out");
            }
        }
        Command::Dashboard => {
            let dashboard = Dashboard::load(backend, store)
                .await
                .map_err(|e| e.to_string())?;
            print_dashboard(&dashboard);
        }
        Command::Send { to, amount } => {
            let mut dashboard = Dashboard::load(backend, store)
                .await
                .map_err(|e| e.to_string())?;
            dashboard
                .send_money(backend, store, &TransferRequest::new(to, amount))
                .await
                .map_err(|e| transfer_message(&e))?;
            println!("Money sent successfully!");
            print_dashboard(&dashboard);
        }
    }
    Ok(())
}

/// A failure past the debit leaves the sender short, so the user is told.
fn transfer_message(error: &transfer::Error) -> String {
    match error {
        transfer::Error::Failed { step, .. } if step.after_debit() => {
            format!("{}\nYour balance may already have been debited.", error)
        }
        _ => error.to_string(),
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    println!("Welcome, {}", dashboard.user.display_name());
    println!("Balance: {}", dashboard.balance());
    println!();
    println!("Recent Transactions");
    if dashboard.transactions.is_empty() {
        println!("No transactions yet");
        return;
    }
    println!("{:<10} {:>12}  {:<30} {}", "Type", "Amount", "To/From", "Date");
    for tx in &dashboard.transactions {
        println!(
            "{:<10} {:>12}  {:<30} {}",
            tx.direction.to_string(),
            tx.amount.to_string(),
            tx.counterparty().map(|e| e.as_str()).unwrap_or("-"),
            tx.date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
        );
    }
}
