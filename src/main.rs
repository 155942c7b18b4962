use clap::Parser;
use quick_notes::app::render;
use quick_notes::core::AuthEvent;
use quick_notes::utils::error::ErrorSeverity;
use quick_notes::utils::{logger, validation::Validate};
use quick_notes::{AppConfig, CliConfig, Command, NotesError, Overrides, RestNotesApp};
use std::io::{BufRead, Write};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let file = match AppConfig::load_file(cli.config.as_deref()) {
        Ok(file) => file,
        Err(e) => fail(&e),
    };

    let overrides = Overrides {
        url: cli.url.clone(),
        anon_key: cli.anon_key.clone(),
        session_dir: cli.session_dir.clone(),
    };
    let config = match AppConfig::resolve(file, overrides) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level.as_deref());
    }
    tracing::debug!("CLI config: {:?}", cli.command);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        fail(&e);
    }

    match run(cli.command, &config).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            fail(&e)
        }
    }
}

async fn run(command: Command, config: &AppConfig) -> quick_notes::Result<String> {
    let mut app = RestNotesApp::connect(config).await?;

    match command {
        Command::List { json } => {
            let notes = app.list().await?;
            if json {
                Ok(serde_json::to_string_pretty(notes)?)
            } else {
                Ok(render::note_list(notes))
            }
        }
        Command::Add { title, content } => {
            let note = app.add(&title, &content).await?;
            Ok(format!("Added note #{}", note.id))
        }
        Command::Edit { id, title, content } => {
            let note = app.edit(id, title.as_deref(), content.as_deref()).await?;
            Ok(format!("Saved note #{}", note.id))
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this note?")? {
                return Ok("Cancelled".to_string());
            }
            let note = app.delete(id).await?;
            Ok(format!("Deleted note #{}", note.id))
        }
        Command::Move { from, to } => {
            let written = app.move_to(from, to).await?;
            Ok(format!("Saved order of {} notes", written))
        }
        Command::Signup { email, password } => {
            let password = password_or_prompt(password)?;
            match app.sign_up(&email, &password).await? {
                AuthEvent::SignedUp => Ok("Check your email for the confirmation link!".to_string()),
                _ => Ok(format!("Signed up and logged in as {}", email)),
            }
        }
        Command::Login { email, password } => {
            let password = password_or_prompt(password)?;
            app.sign_in(&email, &password).await?;
            Ok(format!("Logged in as {}", email))
        }
        Command::Logout => {
            app.sign_out().await?;
            Ok("Logged out".to_string())
        }
        Command::Whoami => Ok(match app.session().current() {
            Some(session) => session.user.email.unwrap_or(session.user.id),
            None => "Not logged in".to_string(),
        }),
    }
}

fn confirm(question: &str) -> quick_notes::Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn password_or_prompt(password: Option<String>) -> quick_notes::Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(prompt("Password: ")?.trim_end_matches(['\r', '\n']).to_string()),
    }
}

fn prompt(message: &str) -> quick_notes::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{}", message)?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// 依錯誤嚴重程度決定退出碼
fn fail(e: &NotesError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
