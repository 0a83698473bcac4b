//! Subcommand implementations.

use crate::cli::{CascadeArgs, EnrollArgs, Entity, LoginArgs, RoutineArgs};
use anyhow::{anyhow, bail, Context};
use campus_common::{CampusConfig, FileTokenStore};
use campus_core::models::{Credentials, NewEnrollment};
use campus_core::selector::presets::enrollment;
use campus_core::submit::guarded;
use campus_core::{
    Choice, HierarchicalSelector, Navigator, Outcome, ReferenceCache, Route, SessionManager,
    SessionStatus, SignInOutcome, SubmitGuard,
};
use campus_http::ApiClient;
use std::sync::Arc;
use tracing::{info, warn};

/// A terminal has no router; navigation is reported in the log.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        match route {
            Route::Landing => warn!("Session ended; run `campus login` to sign in again"),
            other => info!("Continue at {}", other),
        }
    }
}

pub fn connect(api_url: Option<String>) -> anyhow::Result<SessionManager> {
    let mut config = CampusConfig::load();
    if let Some(url) = api_url {
        config.api_base_url = url;
    }
    info!("Backend: {}", config.api_base_url);

    let client = ApiClient::with_config(config.client_config())
        .context("failed to build HTTP client")?;
    let store = Arc::new(FileTokenStore::at_default_location());
    Ok(SessionManager::new(client, store, Arc::new(LogNavigator)))
}

pub async fn run_login(manager: &SessionManager, args: &LoginArgs) -> anyhow::Result<()> {
    let credentials = Credentials::new(&args.email, &args.password);
    match manager.sign_in(&credentials).await? {
        SignInOutcome::SignedIn(user) => {
            println!(
                "Signed in as {} ({})",
                user.display_name(),
                user.role.join(", ")
            );
            Ok(())
        }
        SignInOutcome::Rejected(message) => bail!(message),
    }
}

pub fn run_logout(manager: &SessionManager) -> anyhow::Result<()> {
    manager.logout()?;
    println!("Logged out");
    Ok(())
}

pub async fn run_whoami(manager: &SessionManager) -> anyhow::Result<()> {
    manager.bootstrap().await;
    let session = manager.session();
    match (session.status(), session.user) {
        (SessionStatus::Authenticated, Some(user)) => {
            println!("{}", user.display_name());
            if let Some(email) = &user.email {
                println!("  email: {}", email);
            }
            println!("  roles: {}", user.role.join(", "));
            println!("  home:  {}", manager.landing_route());
        }
        (SessionStatus::Anonymous, _) => println!("Not signed in"),
        _ => println!("Signed in, but the profile could not be loaded"),
    }
    Ok(())
}

pub async fn run_list(manager: &SessionManager, entity: Entity) -> anyhow::Result<()> {
    let cache = ReferenceCache::new(manager.api());
    let choices = match entity {
        Entity::Years => Choice::all(&cache.years().await?),
        Entity::Departments => Choice::all(&cache.departments().await?),
        Entity::Classes => Choice::all(&cache.classes().await?),
        Entity::Sections => Choice::all(&cache.sections().await?),
        Entity::Subjects => Choice::all(&cache.subjects().await?),
        Entity::Teachers => Choice::all(&cache.teachers().await?),
        Entity::ExamTypes => Choice::all(&cache.exam_types().await?),
        Entity::ExamSlots => Choice::all(&cache.exam_slots().await?),
        Entity::Days => Choice::all(&cache.days().await?),
        Entity::Slots => Choice::all(&cache.slots().await?),
        Entity::Students => Choice::all(&cache.api().students().await?),
    };
    print_choices(&choices.iter().collect::<Vec<_>>(), None);
    Ok(())
}

pub async fn run_cascade(manager: &SessionManager, args: &CascadeArgs) -> anyhow::Result<()> {
    let cache = ReferenceCache::new(manager.api());
    let mut chain = enrollment::chain()?;
    chain.load_records(enrollment::DEPARTMENT, &cache.departments().await?)?;
    chain.load_records(enrollment::CLASS, &cache.classes().await?)?;
    chain.load_records(enrollment::SECTION, &cache.sections().await?)?;

    for (level, value, name) in [
        (enrollment::DEPARTMENT, args.department, "department"),
        (enrollment::CLASS, args.class, "class"),
        (enrollment::SECTION, args.section, "section"),
    ] {
        if let Some(id) = value {
            if !chain.pick(level, id)? {
                bail!("{} {} is not available here", name, id);
            }
        }
    }

    let level = deepest_enabled(&chain)
        .ok_or_else(|| anyhow!("no options available for this selection"))?;
    println!("{:?}:", chain.kind(level)?);
    print_choices(&chain.options_for(level)?, chain.selected(level));
    Ok(())
}

fn deepest_enabled(chain: &HierarchicalSelector) -> Option<usize> {
    [enrollment::SECTION, enrollment::CLASS, enrollment::DEPARTMENT]
        .into_iter()
        .find(|&level| chain.is_enabled(level))
}

pub async fn run_routine(manager: &SessionManager, args: &RoutineArgs) -> anyhow::Result<()> {
    let api = manager.api();
    let teacher_id = match args.teacher {
        Some(id) => id,
        None => {
            manager.bootstrap().await;
            let user = manager
                .require_user()
                .context("pass --teacher or run `campus login`")?;
            let user_id = user
                .id
                .ok_or_else(|| anyhow!("profile has no user id"))?;
            api.teacher_by_user(&user_id).await?.id
        }
    };

    let routines = api.teacher_routine(teacher_id, args.year).await?;
    if routines.is_empty() {
        println!("No classes scheduled");
    }
    for routine in &routines {
        println!("{}", routine.describe());
    }
    Ok(())
}

pub async fn run_enroll(manager: &SessionManager, args: &EnrollArgs) -> anyhow::Result<()> {
    let form = NewEnrollment {
        student_id: args.student,
        year_id: args.year,
        class_id: args.class,
        section_id: args.section,
        admission_date: args.admission_date.clone(),
        status: args.status.clone(),
    };

    let api = manager.api();
    let guard = SubmitGuard::new();
    let outcome = guarded(&guard, api.enroll(&form)).await;
    report(outcome)
}

fn report(outcome: Outcome) -> anyhow::Result<()> {
    let notice = outcome.notice().unwrap_or_default();
    match outcome {
        Outcome::Saved(_) => {
            println!("{}", notice);
            Ok(())
        }
        Outcome::Invalid(errors) => {
            for error in errors.iter() {
                eprintln!("  {}: {}", error.field, error.message);
            }
            bail!("the form has errors")
        }
        Outcome::Deauthorized => bail!("not signed in or session expired"),
        _ => bail!(notice),
    }
}

fn print_choices(choices: &[&Choice], selected: Option<i64>) {
    for choice in choices {
        let mark = if Some(choice.id) == selected { "*" } else { " " };
        println!("{}{}\t{}", mark, choice.id, choice.label);
    }
}
