use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use rollcall_client::api::DEFAULT_API_URL;
use rollcall_client::storage::FileTokenStorage;
use rollcall_client::store::{AppStore, AuthStore};
use rollcall_client::types::{EventPatch, User};
use rollcall_client::views::{
    AttendanceForm, Dashboard, EquipmentRoster, EventForm, EventPanel, UserPanel,
};
use rollcall_client::{ApiClient, ClientError, ClientResult};
use rollcall_core::attendance::AttendanceStatus;
use rollcall_core::equipment::EquipmentType;
use rollcall_core::time_format::parse_time;
use rollcall_core::types::DbId;

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Team attendance from the terminal")]
struct Cli {
    #[arg(long, global = true, env = "ROLLCALL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Defaults to ~/.rollcall/token.
    #[arg(long, global = true, env = "ROLLCALL_TOKEN_FILE")]
    token_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ROLLCALL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ROLLCALL_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        name: String,
    },
    Logout,
    Whoami,
    /// Everyone's answers for every upcoming event.
    Dashboard,
    /// Answer for an event. Unset options keep your previous answer.
    Attend {
        event: DbId,
        /// confirmed | declined (yes | no also work)
        #[arg(long, value_parser = status_arg)]
        status: Option<AttendanceStatus>,
        #[arg(long)]
        players: Option<i32>,
        /// Comma separated: ball,pump,overboots. Pass the flag alone to clear.
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        equipment: Option<Vec<EquipmentType>>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Withdraw your answer for an event.
    Unattend { event: DbId },
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Who brings what to an event.
    Equipment { event: DbId },
}

#[derive(Subcommand)]
enum EventsCommand {
    List,
    Create {
        #[arg(long)]
        title: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        from: String,
        /// HH:MM
        #[arg(long)]
        to: String,
        #[arg(long)]
        location: String,
    },
    Update {
        id: DbId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = time_arg)]
        from: Option<NaiveTime>,
        #[arg(long, value_parser = time_arg)]
        to: Option<NaiveTime>,
        #[arg(long)]
        location: Option<String>,
    },
    Delete {
        id: DbId,
    },
}

#[derive(Subcommand)]
enum UsersCommand {
    List,
    Activate { id: DbId },
    Deactivate { id: DbId },
}

fn status_arg(value: &str) -> Result<AttendanceStatus, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "confirmed" | "yes" | "y" => Ok(AttendanceStatus::Confirmed),
        "declined" | "no" | "n" => Ok(AttendanceStatus::Declined),
        other => Err(format!("expected confirmed or declined, got '{other}'")),
    }
}

fn time_arg(value: &str) -> Result<NaiveTime, String> {
    parse_time(value).ok_or_else(|| format!("expected HH:MM, got '{value}'"))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rollcall=warn,rollcall_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let api = ApiClient::new(cli.api_url);
    let storage = FileTokenStorage::new(
        cli.token_file
            .unwrap_or_else(FileTokenStorage::default_path),
    );
    tracing::debug!(api = api.base_url(), token_file = %storage.path().display(), "Starting");
    let mut auth = AuthStore::new(api.clone(), storage);

    match cli.command {
        Commands::Login { email, password } => {
            let user = auth.login(&email, &password).await?;
            println!("Signed in as {}.", user.name);
            Ok(())
        }
        Commands::Register {
            email,
            password,
            name,
        } => {
            let user = auth.register(&email, &password, &name).await?;
            println!("Welcome, {}.", user.name);
            Ok(())
        }
        Commands::Logout => {
            auth.logout()?;
            println!("Signed out.");
            Ok(())
        }
        command => {
            let user = auth
                .load_user()
                .await?
                .cloned()
                .ok_or(ClientError::NotAuthenticated)?;
            let mut app = AppStore::new(api);
            run_signed_in(command, &user, &mut app).await
        }
    }
}

async fn run_signed_in(command: Commands, user: &User, app: &mut AppStore) -> ClientResult<()> {
    match command {
        Commands::Whoami => {
            let role = if user.is_admin { "admin" } else { "member" };
            match &user.email {
                Some(email) => println!("{} <{email}> ({role})", user.name),
                None => println!("{} ({role})", user.name),
            }
        }
        Commands::Dashboard => {
            app.refresh().await?;
            print!("{}", Dashboard::build(&app.events, &app.users, user.id));
        }
        Commands::Attend {
            event,
            status,
            players,
            equipment,
            comment,
        } => {
            app.fetch_events().await?;
            let current = app
                .event(event)
                .ok_or_else(|| ClientError::Invalid(format!("No event with id {event}")))?;
            let mut form = AttendanceForm::for_event(current, user.id);
            if let Some(status) = status {
                form.status = status;
            }
            if let Some(players) = players {
                form.set_additional_players(players);
            }
            if let Some(items) = equipment {
                for kind in EquipmentType::ALL {
                    form.set_equipment(kind, items.contains(&kind));
                }
            }
            if let Some(comment) = comment {
                form.comment = comment;
            }
            app.submit_attendance(event, &form.to_request()).await?;
            print!("{form}");
        }
        Commands::Unattend { event } => {
            app.delete_attendance(event).await?;
            println!("Answer withdrawn.");
        }
        Commands::Events { command } => run_events(command, user, app).await?,
        Commands::Users { command } => run_users(command, user, app).await?,
        Commands::Equipment { event } => {
            let summary = app.equipment(event).await?;
            print!("{}", EquipmentRoster::build(&summary));
        }
        Commands::Login { .. } | Commands::Register { .. } | Commands::Logout => {}
    }
    Ok(())
}

async fn run_events(command: EventsCommand, user: &User, app: &mut AppStore) -> ClientResult<()> {
    if !matches!(command, EventsCommand::List) {
        require_admin(user)?;
    }
    match command {
        EventsCommand::List => {
            app.fetch_events().await?;
        }
        EventsCommand::Create {
            title,
            date,
            from,
            to,
            location,
        } => {
            let form = EventForm {
                title,
                date,
                time_from: from,
                time_to: to,
                location,
            };
            let created = app.create_event(&form.validate()?).await?;
            println!("Created event {}.", created.id);
        }
        EventsCommand::Update {
            id,
            title,
            date,
            from,
            to,
            location,
        } => {
            let patch = EventPatch {
                title,
                date,
                time_from: from,
                time_to: to,
                location,
            };
            let updated = app.update_event(id, &patch).await?;
            println!("Updated event {}.", updated.id);
        }
        EventsCommand::Delete { id } => {
            app.fetch_events().await?;
            let title = EventPanel::build(&app.events).deletable(id)?.title.clone();
            app.delete_event(id).await?;
            println!("Deleted {title}.");
        }
    }
    print!("{}", EventPanel::build(&app.events));
    Ok(())
}

async fn run_users(command: UsersCommand, user: &User, app: &mut AppStore) -> ClientResult<()> {
    let activate = match command {
        UsersCommand::List => {
            app.fetch_users().await?;
            print!("{}", UserPanel::build(&app.users));
            return Ok(());
        }
        UsersCommand::Activate { id } => (id, true),
        UsersCommand::Deactivate { id } => (id, false),
    };

    require_admin(user)?;
    let (id, is_active) = activate;
    app.fetch_users().await?;
    UserPanel::build(&app.users).toggle_target(id)?;
    let changed = app.toggle_user_status(id, is_active).await?;
    let state = if changed.is_active { "active" } else { "inactive" };
    println!("{} is now {state}.", changed.name);
    Ok(())
}

fn require_admin(user: &User) -> ClientResult<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(ClientError::Invalid("Admin access required".into()))
    }
}
