use std::net::SocketAddr;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use ems::api::{set_trace_http, ApiClient};
use ems::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use ems::controllers::{
    FormPhase, FormState, LoginController, RegisterController, ResetConfirmController, ResetPasswordController,
    UsersPage,
};
use ems::models::{AppState, Severity, UserRecord};
use ems::routes::build_app;
use ems::session::{FileTokenStore, TokenStore};
use ems::utils::new_table;

fn build_client(env_file: Option<&str>) -> ApiClient {
    config::load_env_file(env_file);
    match ApiClient::new(&config::get_api_base_url(), config::get_api_timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", Paint::new("Failed to create HTTP client").red(), e);
            process::exit(1);
        }
    }
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", Paint::new("Failed to read custom stylesheet at").red(), path, e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", Paint::new("Invalid host/port format").red(), e);
            process::exit(1);
        }
    };
    let api_base = state.api.base_url().to_string();
    let app = build_app(state);
    tracing::info!(%addr, api = %api_base, "Starting EMS web server");
    println!("{} {}", Paint::new("Web server running on").green(), Paint::new(format!("http://{}", addr)).cyan());
    println!("{} {}", Paint::new("Forwarding API calls to").dim(), Paint::new(&api_base).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!("{}: {}\n{}", Paint::new(format!("Failed to bind to {}", addr)).red(), e, Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow());
            process::exit(1);
        }
    }
}

/// Print the outcome of a form controller and exit non-zero on failure.
fn report_form(state: &FormState) {
    match state.phase {
        FormPhase::Success => {
            if let Some(msg) = &state.success {
                println!("{}", Paint::new(msg).green());
            }
        }
        FormPhase::FieldError => {
            for (field, msg) in &state.field_errors {
                eprintln!("{} {}", Paint::new(format!("{}:", field)).red().bold(), msg);
            }
            process::exit(1);
        }
        _ => {
            let msg = state.error.as_deref().unwrap_or("Request failed");
            eprintln!("{}", Paint::new(msg).red());
            process::exit(1);
        }
    }
}

fn resolve_token(store: &FileTokenStore) -> String {
    if let Some(token) = config::get_env_token().or_else(|| store.read()) {
        return token;
    }
    eprintln!(
        "{} {}",
        Paint::new("Not signed in.").red(),
        Paint::new("Run `ems login <username> <password> --remember` or set EMS_TOKEN.").yellow()
    );
    process::exit(1);
}

/// Fold a users page error or banner into CLI output.
fn report_page(page: &UsersPage) {
    if let Some(err) = &page.error {
        eprintln!("{}", Paint::new(err).red());
    }
    if let Some(n) = &page.notification {
        match n.severity {
            Severity::Success => println!("{}", Paint::new(&n.message).green()),
            Severity::Error => eprintln!("{}", Paint::new(&n.message).red()),
        }
    }
    if page.session_expired {
        eprintln!("{}", Paint::new("Run `ems login` again.").yellow());
    }
}

fn print_users(users: &[UserRecord]) {
    let mut table = new_table();
    table.set_header(vec!["ID", "Username", "Email", "Roles"]);
    for u in users {
        table.add_row(vec![u.id.clone(), u.username.clone(), u.email.clone(), u.roles_display()]);
    }
    println!("\n{table}\n");
}

#[derive(Parser)]
#[command(
    name = "ems",
    author,
    version,
    about = "Employee management web front-end and CLI",
    long_about = r#"ems: the employee management front-end.

Serves the sign-in, registration, password reset and user management pages, forwarding every action to the employee management API configured with API_BASE_URL. The same actions are available from the command line.

Examples:
  1) Run the web front-end:
      ems serve --host 127.0.0.1 --port 5173
  2) Sign in from the terminal and keep the token:
      ems login jane s3cret! --remember
  3) Manage users:
      ems users list
      ems users edit 64f0c2 --roles "admin, viewer"
"#,
    after_help = "Use `ems <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Print each API request as a curl command
    #[arg(long, global = true)]
    trace_http: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration and API connectivity
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Check that API_BASE_URL is configured and that the API answers its health endpoint.")]
    CheckConfig {
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Sign in and store the session token
    #[command(long_about = "Exchange credentials for a session token. With --remember the token is written to the token file (EMS_TOKEN_FILE, default ~/.ems/token); otherwise it is printed so it can be exported as EMS_TOKEN.")]
    Login {
        /// Username or email
        username: String,
        password: String,
        /// Keep the token in the token file
        #[arg(long)]
        remember: bool,
    },
    /// Forget the stored session token
    Logout,
    /// Create an account
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Request a password reset code by email
    ResetPassword { email: String },
    /// Set a new password using the emailed reset code
    ConfirmReset {
        email: String,
        otp: String,
        new_password: String,
    },
    /// Manage users via the API
    #[command(about = "List, edit and delete users", long_about = "These commands perform the same actions as the users page; they need a token from `ems login --remember` or EMS_TOKEN.")]
    Users {
        #[command(subcommand)]
        sub: UserCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    #[command(about = "List users", long_about = "Show every user with email and roles.")]
    List,
    #[command(about = "Edit a user", long_about = "Change a user's email and/or roles. Roles are comma separated, e.g. --roles \"admin, viewer\". Omitted values keep their current setting.")]
    Edit {
        id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        roles: Option<String>,
    },
    #[command(about = "Delete a user", long_about = "Permanently delete a user. Nothing is sent unless --yes is given.")]
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }
    set_trace_http(cli.trace_http);

    let Some(command) = cli.command else {
        let state = AppState::new(build_client(None));
        start_server(state, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    };

    match command {
        Commands::Serve { host, port, env_file, stylesheet } => {
            let state = AppState::new(build_client(env_file.as_deref()));
            start_server(state, &host, port, stylesheet).await;
        }
        Commands::CheckConfig { env_file } => {
            let client = build_client(env_file.as_deref());
            println!("{} {}", Paint::new("API_BASE_URL:").bold(), client.base_url());
            match client.health().await {
                Ok(()) => {
                    println!("{}", Paint::new("Configuration looks valid (API is healthy)").green());
                }
                Err(e) => {
                    eprintln!("{}: {}", Paint::new("API health check failed").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Login { username, password, remember } => {
            let client = build_client(None);
            let mut store = FileTokenStore::new(config::get_token_file_path());
            let mut controller = LoginController::new(username, password, remember);
            controller.submit(&client, &mut store).await;
            report_form(&controller.state);
            if remember {
                println!("{} {}", Paint::new("Signed in; token saved to").green(), store.path().display());
            } else if let Some(token) = store.read() {
                println!("{}", Paint::new("Signed in. Export the token to use it:").green());
                println!("export EMS_TOKEN={}", token);
            }
        }
        Commands::Logout => {
            config::load_env_file(None);
            let mut store = FileTokenStore::new(config::get_token_file_path());
            // Spelled out: `yansi::Paint` also has a `clear` method.
            if let Err(e) = TokenStore::clear(&mut store) {
                eprintln!("{}: {}", Paint::new("Failed to remove token file").red(), e);
                process::exit(1);
            }
            println!("{}", Paint::new("Signed out").green());
        }
        Commands::Register { username, email, password } => {
            let client = build_client(None);
            let mut controller = RegisterController {
                username,
                email,
                confirm_password: password.clone(),
                password,
                ..Default::default()
            };
            controller.submit(&client).await;
            report_form(&controller.state);
        }
        Commands::ResetPassword { email } => {
            let client = build_client(None);
            let mut controller = ResetPasswordController::new(email);
            controller.submit(&client).await;
            report_form(&controller.state);
        }
        Commands::ConfirmReset { email, otp, new_password } => {
            let client = build_client(None);
            let mut controller = ResetConfirmController {
                email,
                otp,
                confirm_password: new_password.clone(),
                new_password,
                ..Default::default()
            };
            controller.submit(&client).await;
            report_form(&controller.state);
        }
        Commands::Users { sub } => {
            let client = build_client(None);
            let store = FileTokenStore::new(config::get_token_file_path());
            let token = resolve_token(&store);
            let mut page = UsersPage::new();
            match sub {
                UserCommands::List => {
                    page.refresh(&client, &token).await;
                    if page.error.is_some() {
                        report_page(&page);
                        process::exit(1);
                    }
                    if page.users.is_empty() {
                        println!("No users found.");
                        return;
                    }
                    print_users(&page.users);
                }
                UserCommands::Edit { id, email, roles } => {
                    page.refresh(&client, &token).await;
                    if page.error.is_some() {
                        report_page(&page);
                        process::exit(1);
                    }
                    if !page.open_edit(&id) {
                        eprintln!("{} '{}' {}", Paint::new("User").red(), id, Paint::new("not found").red());
                        process::exit(1);
                    }
                    if let Some(dialog) = page.editing.clone() {
                        let email = email.unwrap_or(dialog.email);
                        let roles = roles.unwrap_or(dialog.roles);
                        page.set_edit_fields(&email, &roles);
                    }
                    let saved = page.save_edit(&client, &token).await;
                    report_page(&page);
                    if !saved {
                        process::exit(1);
                    }
                    // Show the record as the API now reports it.
                    page.refresh_if_stale(&client, &token).await;
                    match page.find(&id) {
                        Some(user) => print_users(std::slice::from_ref(user)),
                        None => {
                            if let Some(err) = &page.error {
                                eprintln!("{}", Paint::new(err).red());
                            }
                        }
                    }
                }
                UserCommands::Delete { id, yes } => {
                    page.request_delete(&id);
                    if !yes {
                        page.cancel_delete();
                        eprintln!("{}", Paint::new("Not deleted: pass --yes to confirm").yellow());
                        process::exit(1);
                    }
                    let deleted = page.confirm_delete(&client, &token).await;
                    report_page(&page);
                    if !deleted {
                        process::exit(1);
                    }
                }
            }
        }
    }
}
