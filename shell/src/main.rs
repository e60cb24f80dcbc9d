use anyhow::Result;
use shell::api::ApiClient;
use shell::auth::AuthFlow;
use shell::cfg::Config;
use shell::guard::{Navigator, RouteGuard};
use shell::routes::{RouteTable, HOME, LOGIN};
use shell::session::SessionStore;
use shell::vault::{FileVault, SessionVault};
use std::io::{self, Write};
use tracing::{info, Level};

//--------------------------------------------------------------------------------------------------

const DEFAULT_SESSION_FILE: &str = "session.json";

//--------------------------------------------------------------------------------------------------
// The driver's navigation surface
//--------------------------------------------------------------------------------------------------

struct Location {
    current: String,
}

impl Navigator for Location {
    fn navigate(&mut self, path: &str) {
        self.current = path.to_string();
    }
}

//--------------------------------------------------------------------------------------------------
// Command handling
//--------------------------------------------------------------------------------------------------

fn print_help() {
    println!(
        "Commands:\n\
         \x20 login <email> <password>   authenticate and land on the role home\n\
         \x20 logout                     clear the session\n\
         \x20 go <path>                  navigate to a destination (guarded)\n\
         \x20 whoami                     show the current identity\n\
         \x20 routes                     list navigable destinations\n\
         \x20 members                    list members (from the backend)\n\
         \x20 offers                     list offers (from the backend)\n\
         \x20 refresh                    re-fetch the current profile\n\
         \x20 help                       this text\n\
         \x20 quit | exit                leave"
    );
}

fn go<V: SessionVault>(
    path: &str,
    guard: &RouteGuard,
    session: &SessionStore<V>,
    location: &mut Location,
) {
    match guard.admit(path, session, location) {
        Ok(()) => {
            location.navigate(path);
            println!("→ {}", location.current);
        }
        Err(denied) => println!("denied: {denied} (now at {})", location.current),
    }
}

//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let cfg: Config = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::File::with_name("config.local").required(false))
        .add_source(config::Environment::with_prefix("GYMSHELL").separator("__"))
        .build()?
        .try_deserialize()?;

    // Initialize tracing
    let mut fmt_sub = tracing_subscriber::fmt();
    if cfg.debug {
        fmt_sub = fmt_sub.with_max_level(Level::DEBUG);
    } else {
        fmt_sub = fmt_sub.with_max_level(Level::WARN);
    }
    fmt_sub.init();

    // Open the vault and rehydrate any previous session
    let session_file = cfg
        .session_file
        .clone()
        .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string());
    let session = SessionStore::new(FileVault::new(&session_file));
    match session.restore()? {
        Some(user) => info!("restored session for {}", user.email),
        None => info!("starting logged out"),
    }

    let api = ApiClient::new(cfg.api_base_url.clone());
    let flow = AuthFlow::new(&api, &session);
    let guard = RouteGuard::new(RouteTable::product_routes());
    let mut location = Location {
        current: HOME.to_string(),
    };

    // Interactive driver - stands in for the navigation surface
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();
    println!("gym shell connected to {}. Type 'help' for commands.", cfg.api_base_url);
    loop {
        input.clear();
        print!("{}> ", location.current);
        let _ = stdout.flush();
        match stdin.read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "login" => {
                let (Some(email), Some(password)) = (parts.next(), parts.next()) else {
                    eprintln!("usage: login <email> <password>");
                    continue;
                };
                match flow.login(email, password).await {
                    Ok(landing) => {
                        println!("welcome");
                        go(landing, &guard, &session, &mut location);
                    }
                    Err(err) => eprintln!("login failed: {err}"),
                }
            }
            "logout" => match flow.logout() {
                Ok(()) => {
                    println!("logged out");
                    location.navigate(LOGIN);
                }
                Err(err) => eprintln!("logout failed: {err}"),
            },
            "go" => {
                let Some(path) = parts.next() else {
                    eprintln!("usage: go <path>");
                    continue;
                };
                go(path, &guard, &session, &mut location);
            }
            "whoami" => match session.current() {
                Some(user) => println!("{} <{}> ({})", user.display_name(), user.email, user.role),
                None => println!("not logged in"),
            },
            "routes" => {
                for pattern in guard.table().patterns() {
                    println!("{pattern}");
                }
            }
            "members" => match api.users(session.raw_token().as_deref()).await {
                Ok(users) => {
                    for user in users {
                        println!("{:>4}  {} <{}>", user.id.unwrap_or_default(), user.display_name(), user.email);
                    }
                }
                Err(err) => eprintln!("could not list members: {err}"),
            },
            "offers" => match api.offers(session.raw_token().as_deref()).await {
                Ok(offers) => {
                    for offer in offers {
                        println!(
                            "{:>4}  {} - {} months, {:.2}",
                            offer.id.unwrap_or_default(),
                            offer.title,
                            offer.duration_months,
                            offer.price
                        );
                    }
                }
                Err(err) => eprintln!("could not list offers: {err}"),
            },
            "refresh" => match flow.refresh().await {
                Ok(user) => println!("refreshed {}", user.email),
                Err(err) => eprintln!("refresh failed: {err}"),
            },
            _ => eprintln!("unknown command {command:?} - try 'help'"),
        }
    }

    Ok(())
}

//--------------------------------------------------------------------------------------------------
