// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `haven shell` command implementation.
//!
//! Interactive REPL driving the session controller: registration gate,
//! screen navigation, journaling, health tracking, and the AI assistant.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use haven_config::model::HavenConfig;
use haven_core::{HavenError, RecordStore, ScreenId};
use haven_gemini::GeminiGateway;
use haven_profile::{HealthService, JournalService, ProfileDraft, find_activity};
use haven_session::{AppState, SessionController};
use haven_storage::SqliteRecordStore;

/// Runs the `haven shell` interactive REPL.
pub async fn run_shell(config: HavenConfig) -> Result<(), HavenError> {
    let store = SqliteRecordStore::new(config.storage.clone());
    store.initialize().await?;
    let store: Arc<dyn RecordStore> = Arc::new(store);

    let gateway = GeminiGateway::new(config.gemini.clone())?;
    let mut controller = SessionController::new(store.clone());
    let journal = JournalService::new(store.clone());
    let health = HealthService::new(store.clone());

    let mut rl = DefaultEditor::new()
        .map_err(|e| HavenError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "haven shell".bold().green());
    match controller.startup().await? {
        AppState::Shell(_) => println!("Welcome back. Type {} for commands.\n", "help".yellow()),
        AppState::Gate => println!(
            "No profile on this device. Type {} or {} to begin, {} for commands.\n",
            "register".yellow(),
            "login <email|national-id>".yellow(),
            "help".yellow()
        ),
    }

    loop {
        let prompt = match controller.state() {
            AppState::Gate => format!("{}> ", "haven(gate)".red()),
            AppState::Shell(screen) => format!("{}> ", format!("haven:{screen}").green()),
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);
                if trimmed == "quit" || trimmed == "exit" {
                    break;
                }

                match handle_command(
                    &mut controller,
                    &journal,
                    &health,
                    &gateway,
                    &mut rl,
                    trimmed,
                )
                .await
                {
                    Ok(()) => {}
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    store.shutdown().await?;
    println!("{}", "goodbye".dimmed());
    Ok(())
}

async fn handle_command(
    controller: &mut SessionController,
    journal: &JournalService,
    health: &HealthService,
    gateway: &GeminiGateway,
    rl: &mut DefaultEditor,
    input: &str,
) -> Result<(), HavenError> {
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (input, ""),
    };

    match command {
        "help" => print_help(),
        "register" => register_interactive(controller, rl).await?,
        "login" => {
            if rest.is_empty() {
                println!("usage: login <email|national-id>");
            } else {
                let profile = controller.sign_in(rest).await?;
                println!("Welcome back, {}.", profile.name.bold());
            }
        }
        "whoami" => match controller.profiles().current().await? {
            Some(p) => {
                println!("{} <{}>", p.name.bold(), p.email);
                println!("points: {}  badges: {}", p.points, p.badges.join(", "));
            }
            None => println!("no registered profile"),
        },
        "nav" => {
            let screen: ScreenId = rest.parse().map_err(|_| {
                HavenError::Validation(format!("unknown screen {rest:?}, try `screens`"))
            })?;
            controller.navigate(screen)?;
        }
        "screens" => {
            use strum::IntoEnumIterator;
            for screen in ScreenId::iter() {
                println!("  {screen}");
            }
        }
        "theme" => println!("theme: {}", controller.toggle_theme()),
        "chat" => {
            require_shell(controller)?;
            if rest.is_empty() {
                println!("usage: chat <message>");
            } else {
                let key = api_key_override(controller).await;
                let reply = gateway.converse(rest, key.as_deref()).await;
                println!("{}", reply.cyan());
            }
        }
        "log" => {
            require_shell(controller)?;
            if rest == "show" {
                let text = journal.read().await?;
                if text.is_empty() {
                    println!("journal is empty");
                } else {
                    println!("{text}");
                }
            } else if rest.is_empty() {
                println!("usage: log <text> | log show");
            } else {
                journal.append(rest).await?;
                println!("{}", "entry secured".dimmed());
            }
        }
        "insight" => {
            require_shell(controller)?;
            let text = journal.read().await?;
            if text.is_empty() {
                println!("journal is empty; nothing to analyze");
            } else {
                let key = api_key_override(controller).await;
                let insight = gateway.analyze_narrative(&text, key.as_deref()).await;
                println!("sentiment: {}", insight.sentiment.bold());
                println!("emotions:  {}", insight.emotions.join(", "));
                for line in &insight.encouragement {
                    println!("  {}", line.cyan());
                }
            }
        }
        "health" => handle_health(controller, health, rest).await?,
        "cycle" => {
            require_shell(controller)?;
            if rest == "list" {
                for day in health.cycle_days().await? {
                    println!("  {day}");
                }
            } else if rest.is_empty() {
                println!("usage: cycle <YYYY-MM-DD> | cycle list");
            } else {
                let marked = health.toggle_cycle_day(rest).await?;
                println!("{rest}: {}", if marked { "marked" } else { "unmarked" });
            }
        }
        "image" | "video" => {
            require_shell(controller)?;
            if rest.is_empty() {
                println!("usage: {command} <path>");
            } else {
                analyze_media(controller, gateway, command, rest).await?;
            }
        }
        "report" => {
            require_shell(controller)?;
            let narrative = journal.read().await?;
            if narrative.is_empty() {
                println!("journal is empty; record testimony with `log` first");
            } else {
                let key = api_key_override(controller).await;
                match gateway
                    .build_case_report(&narrative, None, None, key.as_deref())
                    .await
                {
                    Some(report) => {
                        println!("{}", "POLICE LIAISON REPORT".bold());
                        println!("{}\n", report.case_summary);
                        print_section("Forensic highlights", &report.forensic_highlights);
                        print_section("Recommended questions", &report.police_questions);
                        print_section("Legal provisions", &report.legal_provisions);
                    }
                    None => println!("report generation unavailable right now; try again later"),
                }
            }
        }
        "wellness" => {
            require_shell(controller)?;
            if rest.is_empty() || rest == "list" {
                for activity in haven_profile::ACTIVITIES {
                    println!("  {:<10} {} (+{} pts)", activity.slug, activity.label, activity.points);
                }
            } else {
                let activity = find_activity(rest).ok_or_else(|| {
                    HavenError::Validation(format!("unknown activity {rest:?}"))
                })?;
                let profile = controller
                    .profiles()
                    .award_points(activity.points, activity.slug)
                    .await?;
                println!(
                    "{} complete: +{} pts (total {})",
                    activity.label,
                    activity.points,
                    profile.points.to_string().bold()
                );
            }
        }
        "privacy" => handle_privacy(controller, rest).await?,
        "apikey" => {
            require_shell(controller)?;
            if rest.is_empty() {
                println!("usage: apikey <key> | apikey clear");
            } else {
                let key = if rest == "clear" { String::new() } else { rest.to_string() };
                controller
                    .profiles()
                    .update(haven_profile::ProfileUpdate {
                        custom_api_key: Some(key),
                        ..Default::default()
                    })
                    .await?;
                println!("{}", "gateway credential updated".dimmed());
            }
        }
        "wipe-archives" => {
            require_shell(controller)?;
            if confirm(rl, "This permanently deletes the health log and cycle days.")? {
                health.wipe_archives().await?;
                println!("{}", "archives wiped".dimmed());
            }
        }
        "logout" => {
            if confirm(rl, "Logout wipes every local record, including the journal.")? {
                controller.logout().await?;
                println!("{}", "all local records wiped".dimmed());
            }
        }
        _ => println!("unknown command {command:?}, try `help`"),
    }
    Ok(())
}

async fn handle_health(
    controller: &SessionController,
    health: &HealthService,
    rest: &str,
) -> Result<(), HavenError> {
    require_shell(controller)?;
    let (sub, args) = match rest.split_once(char::is_whitespace) {
        Some((s, a)) => (s, a.trim()),
        None => (rest, ""),
    };
    match sub {
        "add" => {
            // health add <date> <site> <observation> [notes...]
            let mut parts = args.splitn(4, char::is_whitespace);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(date), Some(site), Some(observation)) => {
                    let notes = parts.next().unwrap_or("");
                    let entry = health.add_entry(date, site, observation, notes).await?;
                    println!("recorded {}", entry.id.dimmed());
                }
                _ => println!("usage: health add <YYYY-MM-DD> <site> <observation> [notes]"),
            }
        }
        "list" => {
            let entries = health.list_entries().await?;
            if entries.is_empty() {
                println!("no health entries");
            }
            for entry in entries {
                println!(
                    "  {} {} {}/{} {}",
                    entry.id.dimmed(),
                    entry.date,
                    entry.site,
                    entry.observation,
                    entry.notes
                );
            }
        }
        "delete" => {
            if args.is_empty() {
                println!("usage: health delete <id>");
            } else {
                health.delete_entry(args).await?;
                println!("{}", "deleted".dimmed());
            }
        }
        _ => println!("usage: health add|list|delete"),
    }
    Ok(())
}

async fn handle_privacy(
    controller: &mut SessionController,
    rest: &str,
) -> Result<(), HavenError> {
    require_shell(controller)?;
    let mut parts = rest.split_whitespace();
    let (flag, value) = (parts.next().unwrap_or(""), parts.next().unwrap_or(""));
    let enabled = match value {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    };

    let Some(enabled) = enabled else {
        match controller.profiles().current().await? {
            Some(p) => {
                let s = &p.privacy_settings;
                println!("police:    {}", on_off(s.share_analysis_with_police));
                println!("guardian:  {}", on_off(s.share_analysis_with_guardian));
                println!("anonymous: {}", on_off(s.anonymous_mode_default));
                println!("usage: privacy <police|guardian|anonymous> <on|off>");
            }
            None => println!("no registered profile"),
        }
        return Ok(());
    };

    let mut update = haven_profile::PrivacyUpdate::default();
    match flag {
        "police" => update.share_analysis_with_police = Some(enabled),
        "guardian" => update.share_analysis_with_guardian = Some(enabled),
        "anonymous" => update.anonymous_mode_default = Some(enabled),
        _ => {
            println!("unknown flag {flag:?}, expected police|guardian|anonymous");
            return Ok(());
        }
    }
    controller
        .profiles()
        .update(haven_profile::ProfileUpdate {
            privacy: Some(update),
            ..Default::default()
        })
        .await?;
    println!("{}", "privacy settings updated".dimmed());
    Ok(())
}

async fn analyze_media(
    controller: &SessionController,
    gateway: &GeminiGateway,
    kind: &str,
    path: &str,
) -> Result<(), HavenError> {
    let bytes = std::fs::read(path)
        .map_err(|e| HavenError::Validation(format!("cannot read {path:?}: {e}")))?;
    let mime = guess_mime(path, kind);
    debug!(path, mime, size = bytes.len(), "analyzing media");
    let key = api_key_override(controller).await;

    if kind == "image" {
        match gateway.analyze_image(&bytes, mime, key.as_deref()).await {
            Some(findings) => {
                println!("{}", findings.findings);
                print_section("Preservation steps", &findings.recommendations);
            }
            None => println!("image analysis unavailable (oversized media or gateway failure)"),
        }
    } else {
        match gateway.analyze_video(&bytes, mime, key.as_deref()).await {
            Some(insight) => {
                println!("{}\n", insight.summary);
                for card in &insight.flashcards {
                    println!("  {} -- {}", card.title.bold(), card.description);
                }
            }
            None => println!("video analysis unavailable (oversized media or gateway failure)"),
        }
    }
    Ok(())
}

async fn register_interactive(
    controller: &mut SessionController,
    rl: &mut DefaultEditor,
) -> Result<(), HavenError> {
    println!("{}", "New profile. Fields marked * are required.".dimmed());
    let draft = ProfileDraft {
        name: ask(rl, "legal name*")?,
        email: ask(rl, "email*")?,
        gender: ask(rl, "gender")?,
        age: ask(rl, "age")?.parse().unwrap_or(0),
        profession: ask(rl, "profession")?,
        contact: ask(rl, "contact number*")?,
        parent_contact: ask(rl, "parent contact")?,
        guardian_name: ask(rl, "guardian name*")?,
        guardian_contact: ask(rl, "guardian contact*")?,
        peer_name: ask(rl, "peer name")?,
        peer_contact: ask(rl, "peer contact")?,
        national_id: ask(rl, "national id (12 digits)*")?,
        secondary_id: Some(ask(rl, "secondary id")?).filter(|s| !s.is_empty()),
        photo: None,
    };

    let profile = controller.register(draft).await?;
    println!(
        "Registered {}. You start with {} points and the {} badge.",
        profile.name.bold(),
        profile.points,
        profile.badges.join(", ").yellow()
    );
    Ok(())
}

/// Resolves the per-profile gateway credential override, if any.
async fn api_key_override(controller: &SessionController) -> Option<String> {
    controller
        .profiles()
        .current()
        .await
        .ok()
        .flatten()
        .and_then(|p| p.custom_api_key)
}

fn require_shell(controller: &SessionController) -> Result<(), HavenError> {
    if controller.state().is_gated() {
        Err(HavenError::Validation(
            "register or login first".to_string(),
        ))
    } else {
        Ok(())
    }
}

fn ask(rl: &mut DefaultEditor, label: &str) -> Result<String, HavenError> {
    rl.readline(&format!("  {label}: "))
        .map(|s| s.trim().to_string())
        .map_err(|e| HavenError::Internal(format!("input aborted: {e}")))
}

fn confirm(rl: &mut DefaultEditor, warning: &str) -> Result<bool, HavenError> {
    println!("{}", warning.yellow());
    let answer = ask(rl, "type `yes` to confirm")?;
    Ok(answer.eq_ignore_ascii_case("yes"))
}

fn guess_mime(path: &str, kind: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
        .as_str()
    {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        _ if kind == "image" => "image/jpeg",
        _ => "video/mp4",
    }
}

fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}

fn print_section(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}", title.bold());
    for item in items {
        println!("  - {item}");
    }
}

fn print_help() {
    println!("commands:");
    println!("  register / login <email|national-id>   pass the gate");
    println!("  whoami                                 profile, points, badges");
    println!("  nav <screen> / screens                 navigate the shell");
    println!("  chat <message>                         talk to the assistant");
    println!("  log <text> / log show                  incident journal");
    println!("  insight                                analyze the journal");
    println!("  health add|list|delete                 health observations");
    println!("  cycle <YYYY-MM-DD> / cycle list        cycle tracking");
    println!("  image <path> / video <path>            evidence analysis");
    println!("  report                                 police liaison report");
    println!("  wellness [slug]                        activities and points");
    println!("  privacy [flag on|off]                  privacy settings");
    println!("  apikey <key|clear>                     gateway credential");
    println!("  theme                                  toggle light/dark");
    println!("  wipe-archives / logout / quit");
}
