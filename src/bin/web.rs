//! Single binary web server: the sideline page from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! ACCESS_CODE enables the access gate, ROSTER_FILE sets where roster templates are saved.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use cronos_sideline::{
    apply_drop, build_report, config::Config, config::CLEANUP_INTERVAL, config::INACTIVITY_TIMEOUT,
    config::TICK_POLL_INTERVAL, configure_match, initialize_match, reset_for_rematch, tick, write_csv,
    DropEvent, ErrorKind, JsonFileBackend, MatchError, MatchId, MatchMode, MatchSession, PlayerId,
    RosterStore, RosterTemplate, SaveOutcome, Team, TeamColors, TeamConfig, TickSchedule,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::Instant;

/// Per-match entry: session data, clock anchor, last activity time (for auto-cleanup).
struct MatchEntry {
    session: MatchSession,
    schedule: TickSchedule,
    last_activity: Instant,
}

/// In-memory state: many matches by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<MatchId, MatchEntry>>>;
type Rosters = Data<Mutex<RosterStore>>;

const ACCESS_KEY: &str = "access_granted";

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AccessBody {
    code: String,
}

/// One side of the setup form: a saved template, or a name and colors with default numbering.
#[derive(Default, Deserialize)]
struct TeamSetupBody {
    name: Option<String>,
    colors: Option<TeamColors>,
    template: Option<String>,
}

#[derive(Deserialize)]
struct ConfigureBody {
    #[serde(default)]
    mode: MatchMode,
    #[serde(default)]
    home: TeamSetupBody,
    #[serde(default)]
    away: TeamSetupBody,
}

#[derive(Deserialize)]
struct RenameBody {
    name: String,
}

/// Raw text from the edit dialog; validated by the core.
#[derive(Deserialize)]
struct RenumberBody {
    number: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    home: u32,
    away: u32,
}

#[derive(Deserialize)]
struct SaveTemplateBody {
    #[serde(flatten)]
    template: RosterTemplate,
    #[serde(default)]
    overwrite: bool,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segments: match id and player id (e.g. /api/matches/{id}/players/{player_id})
#[derive(Deserialize)]
struct MatchPlayerPath {
    id: MatchId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct TemplatePath {
    name: String,
}

fn error_json(e: &MatchError) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

/// `Some(response)` when the access gate is closed for this browser.
fn gate(session: &Session, config: &Config) -> Option<HttpResponse> {
    if config.access_code.is_none() {
        return None;
    }
    match session.get::<bool>(ACCESS_KEY) {
        Ok(Some(true)) => None,
        _ => Some(HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Access code required" }))),
    }
}

/// Run `op` on one match under the write lock and answer with the resulting state.
/// Rejected edits and drops leave the match unchanged and still return it, so the page re-renders as it was.
fn with_match<F>(state: &AppState, id: MatchId, op: F) -> HttpResponse
where
    F: FnOnce(&mut MatchSession) -> Result<(), MatchError>,
{
    with_entry(state, id, |entry| op(&mut entry.session))
}

/// Like `with_match`, with access to the whole entry (clock anchor included).
fn with_entry<F>(state: &AppState, id: MatchId, op: F) -> HttpResponse
where
    F: FnOnce(&mut MatchEntry) -> Result<(), MatchError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No match" })),
    };
    entry.last_activity = Instant::now();
    let outcome = op(entry);
    let m = &entry.session;
    match outcome {
        Ok(()) => HttpResponse::Ok().json(m),
        Err(e) => match e.kind() {
            ErrorKind::ValidationNoOp | ErrorKind::NotFound => {
                log::debug!("Ignored request on match {}: {}", id, e);
                HttpResponse::Ok().json(m)
            }
            ErrorKind::CapacityExceeded => HttpResponse::Conflict().json(error_json(&e)),
            ErrorKind::Storage => HttpResponse::InternalServerError().json(error_json(&e)),
        },
    }
}

fn resolve_team(store: &RosterStore, body: &TeamSetupBody, team: Team) -> Result<TeamConfig, MatchError> {
    let mut config = match body.template.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(name) => TeamConfig::from_template(store.load(name)?),
        None => match team {
            Team::Home => TeamConfig::named("HOME", TeamColors::home_default()),
            Team::Away => TeamConfig::named("AWAY", TeamColors::away_default()),
        },
    };
    if let Some(name) = body.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        config.side.name = name.to_string();
    }
    if let Some(colors) = &body.colors {
        config.side.colors = colors.clone();
    }
    Ok(config)
}

fn resolve_teams(rosters: &Rosters, body: &ConfigureBody) -> Result<(TeamConfig, TeamConfig), HttpResponse> {
    let store = rosters
        .lock()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))?;
    let resolve = |setup: &TeamSetupBody, team: Team| {
        resolve_team(&store, setup, team).map_err(|e| HttpResponse::NotFound().json(error_json(&e)))
    };
    Ok((resolve(&body.home, Team::Home)?, resolve(&body.away, Team::Away)?))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cronos-sideline",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Unlock the app for this browser with the configured access code.
#[post("/api/access")]
async fn api_access(session: Session, config: Data<Config>, body: Json<AccessBody>) -> HttpResponse {
    if !config.grants_access(&body.code) {
        log::info!("Rejected access attempt");
        return HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Wrong access code" }));
    }
    match session.insert(ACCESS_KEY, true) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "ok": true })),
        Err(_) => HttpResponse::InternalServerError().body("session error"),
    }
}

/// Create a match (returns it with id; client stores id for subsequent requests).
#[post("/api/matches")]
async fn api_create_match(
    state: AppState,
    rosters: Rosters,
    config: Data<Config>,
    session: Session,
    body: Json<ConfigureBody>,
) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    let (home, away) = match resolve_teams(&rosters, &body) {
        Ok(teams) => teams,
        Err(resp) => return resp,
    };
    let m = initialize_match(body.mode, home, away);
    let resp = HttpResponse::Ok().json(&m);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        m.id,
        MatchEntry {
            session: m,
            schedule: TickSchedule::default(),
            last_activity: Instant::now(),
        },
    );
    resp
}

/// Get a match by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, config: Data<Config>, session: Session, path: Path<MatchPath>) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    with_match(&state, path.id, |_| Ok(()))
}

/// Re-configure a match: new mode and squads, clock and score back to zero.
#[post("/api/matches/{id}/configure")]
async fn api_configure_match(
    state: AppState,
    rosters: Rosters,
    config: Data<Config>,
    session: Session,
    path: Path<MatchPath>,
    body: Json<ConfigureBody>,
) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    let (home, away) = match resolve_teams(&rosters, &body) {
        Ok(teams) => teams,
        Err(resp) => return resp,
    };
    with_entry(&state, path.id, |entry| {
        configure_match(&mut entry.session, body.mode, home, away);
        entry.schedule.stop();
        Ok(())
    })
}

#[post("/api/matches/{id}/clock/start")]
async fn api_clock_start(state: AppState, config: Data<Config>, session: Session, path: Path<MatchPath>) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    let now = Instant::now();
    with_entry(&state, path.id, |entry| {
        entry.session.clock.start();
        entry.schedule.start(now);
        Ok(())
    })
}

#[post("/api/matches/{id}/clock/pause")]
async fn api_clock_pause(state: AppState, config: Data<Config>, session: Session, path: Path<MatchPath>) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    with_entry(&state, path.id, |entry| {
        entry.session.clock.pause();
        entry.schedule.stop();
        Ok(())
    })
}

/// Reset for a rematch: same players, clock and playing time back to zero.
#[post("/api/matches/{id}/reset")]
async fn api_reset_match(state: AppState, config: Data<Config>, session: Session, path: Path<MatchPath>) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    with_entry(&state, path.id, |entry| {
        reset_for_rematch(&mut entry.session);
        entry.schedule.stop();
        Ok(())
    })
}

/// A finished drag: the page has already resolved the zone and the chip under the pointer.
#[post("/api/matches/{id}/drop")]
async fn api_drop(
    state: AppState,
    config: Data<Config>,
    session: Session,
    path: Path<MatchPath>,
    body: Json<DropEvent>,
) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    with_match(&state, path.id, |m| apply_drop(m, &body).map(|_| ()))
}

#[put("/api/matches/{id}/players/{player_id}/name")]
async fn api_rename_player(
    state: AppState,
    config: Data<Config>,
    session: Session,
    path: Path<MatchPlayerPath>,
    body: Json<RenameBody>,
) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    with_match(&state, path.id, |m| m.rename_player(path.player_id, &body.name))
}

#[put("/api/matches/{id}/players/{player_id}/number")]
async fn api_renumber_player(
    state: AppState,
    config: Data<Config>,
    session: Session,
    path: Path<MatchPlayerPath>,
    body: Json<RenumberBody>,
) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    with_match(&state, path.id, |m| m.renumber_player(path.player_id, &body.number))
}

#[put("/api/matches/{id}/score")]
async fn api_set_score(
    state: AppState,
    config: Data<Config>,
    session: Session,
    path: Path<MatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    with_match(&state, path.id, |m| {
        m.set_score(body.home, body.away);
        Ok(())
    })
}

/// Download the shift report as CSV.
#[get("/api/matches/{id}/report.csv")]
async fn api_report_csv(state: AppState, config: Data<Config>, session: Session, path: Path<MatchPath>) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No match" })),
    };
    let today = chrono::Local::now().date_naive();
    let report = build_report(&entry.session, today);
    let mut buf = Vec::new();
    if let Err(e) = write_csv(&report, &mut buf) {
        log::warn!("Failed to write report for match {}: {}", path.id, e);
        return HttpResponse::InternalServerError().body("report error");
    }
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"shift_report_{}.csv\"", today.format("%Y-%m-%d")),
        ))
        .body(buf)
}

#[get("/api/templates")]
async fn api_list_templates(rosters: Rosters, config: Data<Config>, session: Session) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    match rosters.lock() {
        Ok(store) => HttpResponse::Ok().json(store.list()),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[get("/api/templates/{name}")]
async fn api_get_template(
    rosters: Rosters,
    config: Data<Config>,
    session: Session,
    path: Path<TemplatePath>,
) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    let store = match rosters.lock() {
        Ok(store) => store,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match store.load(&path.name) {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => HttpResponse::NotFound().json(error_json(&e)),
    }
}

/// Save a roster template. An existing name answers `confirm_overwrite` unless `overwrite` is set.
#[post("/api/templates")]
async fn api_save_template(
    rosters: Rosters,
    config: Data<Config>,
    session: Session,
    body: Json<SaveTemplateBody>,
) -> HttpResponse {
    if let Some(denied) = gate(&session, &config) {
        return denied;
    }
    let mut store = match rosters.lock() {
        Ok(store) => store,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let SaveTemplateBody { template, overwrite } = body.into_inner();
    let name = template.name.clone();
    match store.save(template, overwrite) {
        Ok(outcome) => {
            if outcome != SaveOutcome::ConfirmOverwrite {
                log::info!("Saved roster template '{}'", name.trim());
            }
            HttpResponse::Ok().json(serde_json::json!({ "outcome": outcome, "templates": store.list() }))
        }
        Err(e) => match e.kind() {
            ErrorKind::CapacityExceeded => HttpResponse::Conflict().json(error_json(&e)),
            ErrorKind::Storage => HttpResponse::InternalServerError().json(error_json(&e)),
            _ => HttpResponse::BadRequest().json(error_json(&e)),
        },
    }
}

fn open_roster_store(config: &Config) -> RosterStore {
    let backend = JsonFileBackend::new(config.roster_file.clone());
    match RosterStore::open(Box::new(backend)) {
        Ok(store) => {
            log::info!(
                "Loaded {} roster template(s) from {}",
                store.len(),
                config.roster_file.display()
            );
            store
        }
        Err(e) => {
            // Leave the unreadable file alone; saves only live in memory this run.
            log::warn!("{}; roster templates will not be persisted", e);
            RosterStore::in_memory()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    if config.access_code.is_some() {
        log::info!("Access gate enabled");
    }

    let key = match &config.session_key {
        Some(bytes) => Key::from(bytes.as_slice()),
        None => Key::generate(),
    };
    let rosters = Data::new(Mutex::new(open_roster_store(&config)));
    let state = Data::new(RwLock::new(HashMap::<MatchId, MatchEntry>::new()));
    let config = Data::new(config);

    // Match clock: each running match ticks once per whole second since its own start
    let state_ticker = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(TICK_POLL_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let mut g = match state_ticker.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let now = Instant::now();
            for entry in g.values_mut() {
                let due = entry.schedule.ticks_due(entry.session.clock.running, now);
                for _ in 0..due {
                    tick(&mut entry.session);
                }
            }
        }
    });

    // Background task: every 30 minutes, remove matches inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive match(es) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), key.clone()))
            .app_data(state.clone())
            .app_data(rosters.clone())
            .app_data(config.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_access)
            .service(api_create_match)
            .service(api_get_match)
            .service(api_configure_match)
            .service(api_clock_start)
            .service(api_clock_pause)
            .service(api_reset_match)
            .service(api_drop)
            .service(api_rename_player)
            .service(api_renumber_player)
            .service(api_set_score)
            .service(api_report_csv)
            .service(api_list_templates)
            .service(api_get_template)
            .service(api_save_template)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
