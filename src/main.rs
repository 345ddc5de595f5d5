use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use aura_onboarding::config::OnboardingConfig;
use aura_onboarding::onboarding::catalog::QUESTIONS;
use aura_onboarding::onboarding::{
    ColorKey, EntryRoute, Gender, LookingFor, QuestionKey, SessionUser, WizardController,
    WizardView, resolve_entry,
};
use aura_onboarding::store::{LibSqlBackend, ProfileStore};

/// One line of terminal input.
enum Command {
    Name(String),
    Birthday(NaiveDate),
    Gender(Gender),
    Looking(LookingFor),
    Bio(String),
    Color(ColorKey),
    Answer(QuestionKey, usize),
    Next,
    Back,
    Finish,
    Status,
    Help,
    Quit,
}

fn parse_command(line: &str) -> anyhow::Result<Command> {
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let cmd = match verb {
        "name" => Command::Name(rest.to_string()),
        "birthday" => Command::Birthday(
            NaiveDate::parse_from_str(rest, "%Y-%m-%d").context("birthday must be YYYY-MM-DD")?,
        ),
        "gender" => Command::Gender(rest.parse().map_err(anyhow::Error::msg)?),
        "looking" => Command::Looking(rest.parse().map_err(anyhow::Error::msg)?),
        "bio" => Command::Bio(rest.to_string()),
        "color" => Command::Color(rest.parse().map_err(anyhow::Error::msg)?),
        "answer" => {
            let (key, choice) = rest
                .split_once(' ')
                .context("usage: answer <question> <1|2>")?;
            let question: QuestionKey = key.parse().map_err(anyhow::Error::msg)?;
            let choice: usize = choice.trim().parse().context("choice must be 1 or 2")?;
            if !(1..=2).contains(&choice) {
                bail!("choice must be 1 or 2");
            }
            Command::Answer(question, choice - 1)
        }
        "next" => Command::Next,
        "back" => Command::Back,
        "finish" => Command::Finish,
        "status" => Command::Status,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(cmd)
}

/// Apply a command. Returns `false` when the user asked to quit.
async fn apply(wizard: &mut WizardController, cmd: Command) -> aura_onboarding::Result<bool> {
    match cmd {
        Command::Name(name) => wizard.set_display_name(name)?,
        Command::Birthday(date) => wizard.set_birthday(Some(date))?,
        Command::Gender(g) => wizard.set_gender(g)?,
        Command::Looking(l) => wizard.set_looking_for(l)?,
        Command::Bio(bio) => wizard.set_bio(bio)?,
        Command::Color(key) => {
            let outcome = wizard.toggle_color(key)?;
            eprintln!("   {key}: {outcome:?}");
        }
        Command::Answer(question, choice) => {
            wizard.set_answer(question, question.spec().options[choice])?
        }
        Command::Next => {
            wizard.next()?;
        }
        Command::Back => {
            wizard.back()?;
        }
        Command::Finish => {
            let traits = wizard.finish().await?;
            let labels: Vec<&str> = traits.iter().map(|t| t.label()).collect();
            eprintln!("   Your aura: {}", labels.join(", "));
        }
        Command::Status => {
            let draft = serde_json::to_string_pretty(wizard.draft()).unwrap_or_default();
            eprintln!("{draft}");
        }
        Command::Help => print_help(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn print_help() {
    eprintln!("   name <text> | birthday <YYYY-MM-DD> | gender <Woman|Man|Non-binary|Other>");
    eprintln!("   looking <Women|Men|Everyone> | bio <text> | color <key>");
    eprintln!("   answer <question> <1|2> | next | back | finish | status | quit");
}

fn print_view(view: &WizardView) {
    let Some(step) = view.step else {
        return;
    };
    eprintln!(
        "\n── Step {} of {} ({}%) ── {}",
        step + 1,
        view.total_steps,
        view.progress_percent,
        view.title.unwrap_or_default()
    );
    eprintln!("   {}", view.subtitle.unwrap_or_default());
    match step {
        1 => {
            let genders: Vec<&str> = Gender::ALL.iter().map(|g| g.label()).collect();
            let looking: Vec<&str> = LookingFor::ALL.iter().map(|l| l.label()).collect();
            eprintln!("   I am a… {}", genders.join(" / "));
            eprintln!("   Looking for… {}", looking.join(" / "));
        }
        3 => {
            for color in ColorKey::ALL {
                eprintln!("   {:<7} {:<8} {}", color.key(), color.label(), color.meaning());
            }
        }
        4 => {
            for q in &QUESTIONS {
                eprintln!("   {:<14} {} 1) {}  2) {}", q.key.as_str(), q.prompt, q.options[0], q.options[1]);
            }
        }
        _ => {}
    }
    if let Some(error) = &view.error {
        eprintln!("   ⚠ {error}");
    }
    if let Some(action) = view.primary_action {
        let hint = if view.can_proceed { "ready" } else { "incomplete" };
        eprintln!("   [{action}] ({hint})");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = OnboardingConfig::from_env()?;

    eprintln!("✨ Aura onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path.display());

    let store: Arc<dyn ProfileStore> = Arc::new(LibSqlBackend::new_local(&config.db_path).await?);

    let user = SessionUser::new(config.profile_id.unwrap_or_else(Uuid::new_v4));
    // Normally created at sign-up.
    store.ensure_profile(user.id).await?;
    eprintln!("   Profile: {}", user.id);

    if resolve_entry(store.as_ref(), user).await? == EntryRoute::Home {
        eprintln!("   Onboarding already completed.");
        return Ok(());
    }

    let mut wizard = WizardController::new(user, Arc::clone(&store));
    print_help();
    print_view(&wizard.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let keep_going = match parse_command(line) {
            Ok(cmd) => match apply(&mut wizard, cmd).await {
                Ok(keep_going) => keep_going,
                Err(e) => {
                    eprintln!("   {e}");
                    true
                }
            },
            Err(e) => {
                eprintln!("   {e:#}");
                true
            }
        };
        if !keep_going {
            break;
        }

        if wizard.state().is_terminal() {
            eprintln!("   Profile saved. Welcome in.");
            break;
        }
        print_view(&wizard.view());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_answer_choice() {
        match parse_command("answer social 2").unwrap() {
            Command::Answer(q, choice) => {
                assert_eq!(q, QuestionKey::Social);
                assert_eq!(choice, 1);
            }
            _ => panic!("expected answer"),
        }
        assert!(parse_command("answer social 3").is_err());
        assert!(parse_command("answer social").is_err());
    }

    #[test]
    fn parses_fields() {
        assert!(matches!(
            parse_command("gender non-binary").unwrap(),
            Command::Gender(Gender::NonBinary)
        ));
        assert!(matches!(
            parse_command("birthday 1990-02-28").unwrap(),
            Command::Birthday(_)
        ));
        assert!(parse_command("birthday yesterday").is_err());
        assert!(parse_command("dance").is_err());
    }
}
