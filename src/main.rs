//! Command-line shell over the session state. One subcommand per user action;
//! the heavy lifting lives in the library.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, TimeZone, Utc};

use wombos_lib::guidance::{GeminiClient, DAILY_FALLBACK, ORACLE_FALLBACK};
use wombos_lib::profile::{ProfileAction, ProfileUpdate};
use wombos_lib::services::today::build_today_overview;
use wombos_lib::state::{AuthRoute, SessionState};
use wombos_lib::store::ProfileStore;
use wombos_lib::types::{Archetype, CycleInfo, EnergyRequired, GuidanceKind, SoilState, TaskCategory};

const USAGE: &str = "wombos — cyclical operating system

USAGE:
    wombos <command> [args]

COMMANDS:
    status                                Today's overview
    signup <name> <email>                 Create a fresh profile
    onboard <YYYY-MM-DD> <len> [wound..]  Set cycle info + wounds, finish onboarding
    checkin <soil-state> <energy> [note]  Record a nervous-system check-in
    pillar <n>                            Toggle pillar n (1-based) for today
    task add <name>                       Add a task for the current phase
    task list [phase|all]                 List tasks, optionally filtered
    task done <id>                        Toggle a task's completion
    journal <text>                        Add a journal entry
    guidance [--save]                     Generate today's guidance
    oracle <question> [--save]            Ask the oracle
    wounds                                List the root-wound catalog
    export [path]                         Export the profile blob
    logout                                End the session and clear data

Soil states: parched, flooded, frozen, depleted, nutrient-dense";

fn open_session() -> Result<SessionState, String> {
    // WOMBOS_DIR overrides the state directory for scripted use
    match std::env::var("WOMBOS_DIR") {
        Ok(dir) if !dir.is_empty() => Ok(SessionState::with_store(ProfileStore::at(PathBuf::from(dir)))),
        _ => SessionState::new(),
    }
}

fn require_login(state: &SessionState) -> Result<(), String> {
    if state.is_logged_in() {
        return Ok(());
    }
    state.set_auth_route(AuthRoute::Signup);
    Err("No profile loaded. Run: wombos signup <name> <email>".to_string())
}

fn parse_date(value: &str) -> Result<chrono::DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD.", value))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("Invalid date '{}'", value))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

fn print_status(state: &SessionState) -> Result<(), String> {
    let profile = state.profile().ok_or("No profile loaded")?;
    let overview = build_today_overview(&profile, Utc::now());

    println!("{} — day {} of {}", overview.date, overview.cycle_day, overview.cycle_length);
    println!("{} ({})", overview.phase_label, overview.season);
    println!("  energy: {}", overview.phase_energy);
    println!("  superpower: {}", overview.superpower);
    println!("  focus: {}", overview.focus);
    println!();
    println!("Soil: {} (energy {}/10)", overview.soil_state.label(), overview.energy_level);
    println!("  {}", overview.soil_guidance);
    if !overview.checked_in_today {
        println!("  (no check-in yet today — how's your soil?)");
    }
    println!();
    println!("Pillars ({}/{} today):", overview.pillars_completed, overview.pillars.len());
    for (i, pillar) in overview.pillars.iter().enumerate() {
        let mark = if pillar.completed { "x" } else { " " };
        println!("  {:>2}. [{}] {}", i + 1, mark, pillar.name);
    }

    if !overview.recommended_practices.is_empty() {
        println!();
        println!("Body wisdom for this phase:");
        for practice in &overview.recommended_practices {
            println!("  - {} ({} min)", practice.name, practice.duration);
        }
    }
    if !overview.recommended_protocols.is_empty() {
        println!();
        println!("Protocols for your soil:");
        for protocol in &overview.recommended_protocols {
            println!("  - {} [{}]: {}", protocol.name, protocol.herb, protocol.purpose);
        }
    }
    if !overview.phase_tasks.is_empty() {
        println!();
        println!("Aligned tasks:");
        for task in &overview.phase_tasks {
            let mark = if task.completed { "x" } else { " " };
            println!("  [{}] {} ({})", mark, task.name, task.id);
        }
    }
    if !overview.tending.is_empty() {
        println!();
        println!("Tending:");
        for wound in &overview.tending {
            println!("  {} — \"{}\"", wound.name, wound.affirmation);
        }
    }
    if let Some(text) = state.guidance.current() {
        println!();
        println!("Guidance: {}", text);
    }
    Ok(())
}

async fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");

    let state = open_session()?;

    match command {
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
        }

        "status" => {
            require_login(&state)?;
            print_status(&state)?;
        }

        "signup" => {
            let (name, email) = match (args.get(1), args.get(2)) {
                (Some(name), Some(email)) => (name.clone(), email.clone()),
                _ => return Err("Usage: wombos signup <name> <email>".to_string()),
            };
            if state.is_logged_in() {
                return Err("A profile already exists. Run `wombos logout` first.".to_string());
            }
            let profile = state.signup(&name, &email)?;
            println!("Welcome, {}. Next: wombos onboard <YYYY-MM-DD> <cycle-length>", profile.name);
        }

        "onboard" => {
            require_login(&state)?;
            let (date, length) = match (args.get(1), args.get(2)) {
                (Some(date), Some(length)) => (date, length),
                _ => return Err("Usage: wombos onboard <YYYY-MM-DD> <cycle-length> [wound-id..]".to_string()),
            };
            let last_period_start = parse_date(date)?;
            let cycle_length: u32 = length
                .parse()
                .map_err(|_| format!("Invalid cycle length '{}'", length))?;
            let wounds: Vec<String> = args[3..].to_vec();

            let update = ProfileUpdate {
                cycle_info: Some(CycleInfo {
                    last_period_start,
                    cycle_length,
                }),
                active_root_wounds: (!wounds.is_empty()).then_some(wounds),
                ..Default::default()
            };
            state.dispatch(ProfileAction::Update(update))?;
            let profile = state.dispatch(ProfileAction::CompleteOnboarding)?;
            let overview = build_today_overview(&profile, Utc::now());
            println!(
                "Your space is ready. Day {} — {}.",
                overview.cycle_day, overview.phase_label
            );
        }

        "checkin" => {
            require_login(&state)?;
            let (soil, energy) = match (args.get(1), args.get(2)) {
                (Some(soil), Some(energy)) => (soil, energy),
                _ => return Err("Usage: wombos checkin <soil-state> <energy 1-10> [note]".to_string()),
            };
            let soil_state = SoilState::parse(soil)
                .ok_or_else(|| format!("Unknown soil state '{}'", soil))?;
            let energy_level: u8 = energy
                .parse()
                .map_err(|_| format!("Invalid energy level '{}'", energy))?;
            let notes = (args.len() > 3).then(|| args[3..].join(" "));

            let profile = state.dispatch(ProfileAction::CheckIn {
                soil_state,
                energy_level,
                notes,
            })?;
            let latest = &profile.daily_check_ins[0];
            println!(
                "Recorded: {} at energy {}/10 (day {}, {}).",
                latest.soil_state.label(),
                latest.energy_level,
                latest.cycle_day,
                latest.phase.label()
            );
            println!("{}", latest.soil_state.guidance());
        }

        "pillar" => {
            require_login(&state)?;
            let n: usize = args
                .get(1)
                .and_then(|v| v.parse().ok())
                .ok_or("Usage: wombos pillar <n> (1-based, see `wombos status`)")?;
            if n == 0 {
                return Err("Pillars are numbered from 1.".to_string());
            }
            let profile = state.dispatch(ProfileAction::TogglePillar { index: n - 1 })?;
            let today = wombos_lib::util::date_key(Utc::now());
            println!(
                "{} — {}/{} pillars complete today.",
                profile.pillar_names[n - 1],
                wombos_lib::pillars::completed_count(&profile.pillar_completions, &today),
                profile.pillar_count()
            );
        }

        "task" => {
            require_login(&state)?;
            match args.get(1).map(String::as_str) {
                Some("add") => {
                    let name = args[2..].join(" ");
                    let profile = state.profile().ok_or("No profile loaded")?;
                    let overview = build_today_overview(&profile, Utc::now());
                    let profile = state.dispatch(ProfileAction::AddTask {
                        name,
                        phases: vec![overview.phase],
                        energy_required: EnergyRequired::Medium,
                        category: TaskCategory::Business,
                    })?;
                    let task = profile.tasks.last().ok_or("Task not recorded")?;
                    println!("Added '{}' for {} ({}).", task.name, overview.phase_label, task.id);
                }
                Some("list") => {
                    let profile = state.profile().ok_or("No profile loaded")?;
                    let filter = match args.get(2).map(String::as_str) {
                        None | Some("all") => wombos_lib::matcher::PhaseFilter::All,
                        Some(phase) => {
                            let phase = Archetype::parse(phase)
                                .ok_or_else(|| format!("Unknown phase '{}'", phase))?;
                            wombos_lib::matcher::PhaseFilter::Phase(phase)
                        }
                    };
                    let tasks = wombos_lib::matcher::tasks_for(&profile.tasks, filter);
                    if tasks.is_empty() {
                        println!("No tasks aligned with this filter yet.");
                    }
                    for task in tasks {
                        let mark = if task.completed { "x" } else { " " };
                        println!("  [{}] {} ({})", mark, task.name, task.id);
                    }
                }
                Some("done") => {
                    let id = args.get(2).ok_or("Usage: wombos task done <id>")?;
                    let profile = state.dispatch(ProfileAction::ToggleTask { id: id.clone() })?;
                    let task = profile
                        .tasks
                        .iter()
                        .find(|t| &t.id == id)
                        .ok_or("Task not found after toggle")?;
                    println!(
                        "{} — {}",
                        task.name,
                        if task.completed { "complete" } else { "reopened" }
                    );
                }
                _ => return Err("Usage: wombos task <add|list|done> ...".to_string()),
            }
        }

        "journal" => {
            require_login(&state)?;
            let content = args[1..].join(" ");
            let profile = state.dispatch(ProfileAction::AddJournalEntry { content })?;
            let entry = &profile.journal_entries[0];
            println!("Chronicled (day {}, {}).", entry.cycle_day, entry.phase.label());
        }

        "guidance" => {
            require_login(&state)?;
            let save = args.iter().any(|a| a == "--save");
            let text = match GeminiClient::from_env() {
                Ok(client) => state.refresh_guidance(&client).await?,
                Err(e) => {
                    log::warn!("Guidance provider unavailable: {}", e);
                    DAILY_FALLBACK.to_string()
                }
            };
            println!("{}", text);
            if save {
                state.dispatch(ProfileAction::SaveGuidance {
                    prompt: text,
                    kind: GuidanceKind::Daily,
                })?;
                println!("(saved to past wisdom)");
            }
        }

        "oracle" => {
            require_login(&state)?;
            let save = args.iter().any(|a| a == "--save");
            let question = args[1..]
                .iter()
                .filter(|a| *a != "--save")
                .cloned()
                .collect::<Vec<_>>()
                .join(" ");
            if question.trim().is_empty() {
                return Err("Usage: wombos oracle <question>".to_string());
            }
            let answer = match GeminiClient::from_env() {
                Ok(client) => state.ask_oracle(&client, &question).await?,
                Err(e) => {
                    log::warn!("Guidance provider unavailable: {}", e);
                    ORACLE_FALLBACK.to_string()
                }
            };
            println!("{}", answer);
            if save {
                state.dispatch(ProfileAction::SaveGuidance {
                    prompt: answer,
                    kind: GuidanceKind::Requested,
                })?;
                println!("(saved to past wisdom)");
            }
        }

        "wounds" => {
            for wound in wombos_lib::presets::root_wounds() {
                println!("{:<16} {} — \"{}\"", wound.id, wound.description, wound.affirmation);
            }
        }

        "export" => {
            require_login(&state)?;
            let profile = state.profile().ok_or("No profile loaded")?;
            let dest = args
                .get(1)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(format!("wombos_data_{}.json", profile.name)));
            state.export(&dest)?;
            println!("Exported to {}", dest.display());
        }

        "logout" | "clear" => {
            state.logout()?;
            println!("Session ended. All local data cleared.");
        }

        other => {
            return Err(format!("Unknown command '{}'. Run `wombos help`.", other));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
