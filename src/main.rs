use agtur_admin::config::Config;
use agtur_admin::logger;
use agtur_admin::routes::{RouteError, RouteForm, RouteManager};
use agtur_admin::storage::LocalStorage;
use agtur_admin::utils::datetime::{
    apply_date_mask, apply_time_mask, compose_date_time, compute_duration_label_at, compute_duration_minutes_at,
    to_storage_date_time_at, validate_date_field, validate_time_field,
};
use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;

const USAGE: &str = "\
Usage: agtur-admin <command> [args]

Commands:
  preview <dep-date> <dep-time> <arr-date> <arr-time>   Check a schedule without saving
  list                                                  List upcoming routes
  add field=value...                                    Create a route
  edit <id> field=value...                              Update a route
  toggle <id>                                           Activate/deactivate a route
  delete <id>                                           Delete a route
  count                                                 Show route totals
  init-config [path]                                    Write a default config file

Fields: origin, destination, departure_date, departure_time, arrival_date,
        arrival_time, price, bus_company, bus_type, driver_id, second_driver_id, bus_id";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        eprintln!("{}", USAGE);
        return Ok(());
    };
    let rest = &args[1..];

    match command {
        "init-config" => {
            let path = match rest.first() {
                Some(path) => PathBuf::from(path),
                None => Config::get_default_config_path()?,
            };
            return Config::generate_default_config(path);
        }
        "preview" => return preview(rest, &Config::load()?),
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            return Ok(());
        }
        "list" | "add" | "edit" | "toggle" | "delete" | "count" => {}
        other => {
            eprintln!("Unknown command: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
    }

    let config = Config::load()?;
    logger::setup_logger(&config.logging)?;

    let database_path = config.database_path()?;
    let storage = LocalStorage::new(Some(&database_path)).await?;
    let manager = RouteManager::new(storage, config);

    match run(&manager, command, rest).await {
        Err(CommandError::Usage(message)) => {
            eprintln!("{}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
        Err(CommandError::Route(RouteError::Invalid(e))) => {
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
        Err(CommandError::Route(RouteError::NotFound(id))) => {
            eprintln!("❌ Rota não encontrada: {}", id);
            std::process::exit(1);
        }
        Err(CommandError::Route(RouteError::Storage(e))) => Err(e),
        Ok(()) => Ok(()),
    }
}

/// Why a command failed: bad arguments, or the route operation itself.
#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Route(#[from] RouteError),
}

async fn run(manager: &RouteManager, command: &str, rest: &[String]) -> Result<(), CommandError> {
    let now = Local::now().naive_local();

    match command {
        "list" => {
            let routes = manager.list_upcoming(now).await?;
            if routes.is_empty() {
                println!("Nenhuma rota encontrada.");
            }
            for route in routes {
                println!("{}", route.summary_line());
            }
        }
        "add" => {
            let mut form = manager.new_form();
            apply_fields(&mut form, rest)?;
            let saved = manager.save(&form, None, now).await?;
            println!("✅ {}", saved.id);
        }
        "edit" => {
            let id = required_id(rest)?;
            let mut form = manager.edit_form(id).await?;
            apply_fields(&mut form, &rest[1..])?;
            let saved = manager.save(&form, Some(id), now).await?;
            println!("✅ {}", saved.id);
        }
        "toggle" => {
            let updated = manager.toggle_status(required_id(rest)?).await?;
            println!("✅ {} {}", updated.id, updated.status);
        }
        "delete" => {
            let id = required_id(rest)?;
            manager.delete(id).await?;
            println!("✅ {}", id);
        }
        "count" => {
            let counts = manager.counts().await?;
            println!("{} rotas ({} ativas)", counts.total, counts.active);
        }
        other => return Err(CommandError::Usage(format!("Unknown command: {}", other))),
    }
    Ok(())
}

fn required_id(rest: &[String]) -> Result<&str, CommandError> {
    rest.first()
        .map(String::as_str)
        .ok_or_else(|| CommandError::Usage("Missing route id".to_string()))
}

fn apply_fields(form: &mut RouteForm, pairs: &[String]) -> Result<(), CommandError> {
    for pair in pairs {
        let (field, value) = pair
            .split_once('=')
            .ok_or_else(|| CommandError::Usage(format!("Expected field=value, got '{}'", pair)))?;
        if !form.set_field(field, value) {
            return Err(CommandError::Usage(format!("Unknown field '{}'", field)));
        }
    }
    Ok(())
}

fn preview(rest: &[String], config: &Config) -> Result<()> {
    let [dep_date, dep_time, arr_date, arr_time] = rest else {
        anyhow::bail!("preview expects <dep-date> <dep-time> <arr-date> <arr-time>");
    };

    let now = Local::now().naive_local();
    let years = config.schedule.years();
    let (dep_date, dep_time) = (apply_date_mask(dep_date), apply_time_mask(dep_time));
    let (arr_date, arr_time) = (apply_date_mask(arr_date), apply_time_mask(arr_time));
    let departure = compose_date_time(&dep_date, &dep_time);
    let arrival = compose_date_time(&arr_date, &arr_time);

    let report = serde_json::json!({
        "departure": {
            "date": dep_date,
            "time": dep_time,
            "valid": validate_date_field(&dep_date, &years) && validate_time_field(&dep_time),
            "departure_datetime": to_storage_date_time_at(&departure, now),
        },
        "arrival": {
            "date": arr_date,
            "time": arr_time,
            "valid": validate_date_field(&arr_date, &years) && validate_time_field(&arr_time),
            "arrival_datetime": to_storage_date_time_at(&arrival, now),
        },
        "duration": compute_duration_label_at(&departure, &arrival, now),
        "duration_minutes": compute_duration_minutes_at(&departure, &arrival, now),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
