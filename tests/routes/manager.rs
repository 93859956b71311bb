use agtur_admin::config::Config;
use agtur_admin::repositories::RouteRepository;
use agtur_admin::routes::{FormMode, RouteError, RouteForm, RouteFormError, RouteManager};
use agtur_admin::storage::LocalStorage;
use chrono::{Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

async fn manager() -> RouteManager {
    let storage = LocalStorage::new(None).await.unwrap();
    RouteManager::new(storage, Config::default())
}

fn form(manager: &RouteManager, origin: &str, date: &str) -> RouteForm {
    let mut form = manager.new_form();
    form.origin = origin.to_string();
    form.destination = "Belo Horizonte".to_string();
    form.set_departure_date(date);
    form.set_departure_time("0730");
    form.set_arrival_date(date);
    form.set_arrival_time("1500");
    form.set_price("12990");
    form.set_driver("driver-1");
    form.bus_id = "bus-1".to_string();
    form
}

#[tokio::test]
async fn test_save_creates_route() {
    let manager = manager().await;
    let now = at(2025, 6, 1, 9, 0);

    let saved = manager.save(&form(&manager, "São Paulo", "10072025"), None, now).await.unwrap();
    assert_eq!(saved.departure_datetime, "2025-07-10 07:30");
    assert_eq!(saved.duration.as_deref(), Some("7h 30min"));
    assert_eq!(saved.available_seats, 42);
    assert!(saved.is_active());

    let counts = manager.counts().await.unwrap();
    assert_eq!(counts.total, 1);
    assert_eq!(counts.active, 1);
}

#[tokio::test]
async fn test_save_rejects_invalid_form() {
    let manager = manager().await;
    let result = manager.save(&manager.new_form(), None, at(2025, 6, 1, 9, 0)).await;

    assert!(matches!(result, Err(RouteError::Invalid(RouteFormError::MissingOrigin))));
    assert_eq!(manager.counts().await.unwrap().total, 0);
}

#[tokio::test]
async fn test_list_upcoming_orders_and_filters_past_routes() {
    let manager = manager().await;
    let now = at(2025, 6, 1, 9, 0);

    manager.save(&form(&manager, "Campinas", "20082025"), None, now).await.unwrap();
    manager.save(&form(&manager, "Santos", "10072025"), None, now).await.unwrap();
    manager.save(&form(&manager, "Sorocaba", "15052025"), None, now).await.unwrap();

    let upcoming = manager.list_upcoming(now).await.unwrap();
    let titles: Vec<&str> = upcoming.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Santos → Belo Horizonte", "Campinas → Belo Horizonte"]);

    let first = &upcoming[0];
    assert_eq!(first.departure.date, "10/07/2025");
    assert_eq!(first.departure.time, "07:30");
    assert_eq!(first.price, "R$ 129,90");
    assert_eq!(first.status_label, "Ativa");
    assert_eq!(first.seats, 42);
    assert_eq!(first.bus_label, "bus-1");
}

#[tokio::test]
async fn test_list_upcoming_resolves_legacy_zoned_departures() {
    let manager = manager().await;
    let now = at(2025, 6, 1, 9, 0);

    // Two hours ahead, written at -12:00: the stored wall clock sits before local `now`.
    let departure = Local
        .from_local_datetime(&(now + Duration::hours(2)))
        .single()
        .unwrap()
        .with_timezone(&FixedOffset::west_opt(12 * 3600).unwrap())
        .format("%Y-%m-%dT%H:%M%:z")
        .to_string();

    let mut upcoming = form(&manager, "Jundiaí", "01062025")
        .to_new_route(&FormMode::Create, manager.config(), now)
        .unwrap();
    upcoming.departure_datetime = departure;
    RouteRepository::create(&manager.storage().conn, &upcoming).await.unwrap();

    let mut departed = upcoming.clone();
    departed.origin = "Atibaia".to_string();
    departed.departure_datetime = "2025-05-31 20:00".to_string();
    RouteRepository::create(&manager.storage().conn, &departed).await.unwrap();

    let listed = manager.list_upcoming(now).await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Jundiaí → Belo Horizonte"]);
}

#[tokio::test]
async fn test_edit_updates_route_and_keeps_bus() {
    let manager = manager().await;
    let now = at(2025, 6, 1, 9, 0);
    let saved = manager.save(&form(&manager, "Campinas", "20082025"), None, now).await.unwrap();

    let mut edit = manager.edit_form(&saved.id).await.unwrap();
    assert_eq!(edit.departure_date, "20/08/2025");
    assert_eq!(edit.price, "129,90");

    edit.set_price("9900");
    edit.set_arrival_time("1800");
    edit.bus_id.clear();
    let updated = manager.save(&edit, Some(&saved.id), now).await.unwrap();

    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.price, 99.0);
    assert_eq!(updated.duration.as_deref(), Some("10h 30min"));
    assert_eq!(updated.bus_id.as_deref(), Some("bus-1"));
    assert_eq!(manager.counts().await.unwrap().total, 1);
}

#[tokio::test]
async fn test_edit_unknown_route_is_not_found() {
    let manager = manager().await;
    let now = at(2025, 6, 1, 9, 0);
    let result = manager.save(&form(&manager, "Campinas", "20082025"), Some("missing"), now).await;
    assert!(matches!(result, Err(RouteError::NotFound(id)) if id == "missing"));
}

#[tokio::test]
async fn test_toggle_status() {
    let manager = manager().await;
    let now = at(2025, 6, 1, 9, 0);
    let saved = manager.save(&form(&manager, "Campinas", "20082025"), None, now).await.unwrap();

    let toggled = manager.toggle_status(&saved.id).await.unwrap();
    assert_eq!(toggled.status, "inactive");
    assert_eq!(manager.counts().await.unwrap().active, 0);

    let upcoming = manager.list_upcoming(now).await.unwrap();
    assert_eq!(upcoming[0].status_label, "Inativa");

    let toggled = manager.toggle_status(&saved.id).await.unwrap();
    assert_eq!(toggled.status, "active");
}

#[tokio::test]
async fn test_delete() {
    let manager = manager().await;
    let now = at(2025, 6, 1, 9, 0);
    let saved = manager.save(&form(&manager, "Campinas", "20082025"), None, now).await.unwrap();

    manager.delete(&saved.id).await.unwrap();
    assert_eq!(manager.counts().await.unwrap().total, 0);
    assert!(matches!(manager.delete(&saved.id).await, Err(RouteError::NotFound(_))));
}
