//! Subcommand implementations.

use anyhow::{Context, Result, bail};
use sessionkit_config::{ProfileId, Property, properties_info_list};
use sessionkit_ssh::classify_ssh_args;

use super::{Commands, RuntimeOptions, SessionsAction};
use crate::manager::SessionManager;
use crate::session::recording::RecordingFactory;
use crate::shortcut::KeySequence;

/// Run a subcommand
pub fn run(options: &RuntimeOptions, command: Commands) -> Result<()> {
    match command {
        Commands::List => list_profiles(options),
        Commands::Show { profile } => {
            let (mut manager, _) = open_manager(options);
            show_profile(&mut manager, &profile)
        }
        Commands::Apply { profile, change } => {
            let (mut manager, factory) = open_manager(options);
            apply_profile(&mut manager, &factory, profile.as_deref(), change.as_deref())
        }
        Commands::SetDefault { profile } => {
            let (mut manager, _) = open_manager(options);
            let id = find_profile(&mut manager, &profile)?;
            manager.set_default_profile(id)?;
            println!("Default profile is now {}", display_name(&manager, id));
            Ok(())
        }
        Commands::Favorite { profile, remove } => {
            let (mut manager, _) = open_manager(options);
            let id = find_profile(&mut manager, &profile)?;
            manager.set_favorite(id, !remove);
            manager.save_settings()?;
            Ok(())
        }
        Commands::Shortcut { profile, key } => {
            let (mut manager, _) = open_manager(options);
            let id = find_profile(&mut manager, &profile)?;
            let key = key
                .map(|text| KeySequence::parse(&text))
                .transpose()
                .context("Invalid key sequence")?;
            manager.set_shortcut(id, key);
            manager.save_settings()?;
            Ok(())
        }
        Commands::Properties => {
            for line in properties_info_list() {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Sessions { action } => run_sessions(options, action),
        Commands::Ssh { format, args } => describe_ssh(&args, format.as_deref()),
    }
}

fn run_sessions(options: &RuntimeOptions, action: SessionsAction) -> Result<()> {
    let state_file = options.session_state_file();
    match action {
        SessionsAction::Save { profiles, change } => {
            let (mut manager, _) = open_manager(options);
            let ids = profiles
                .iter()
                .map(|name| find_profile(&mut manager, name).map(Some))
                .collect::<Result<Vec<_>>>()?;
            let ids = if ids.is_empty() { vec![None] } else { ids };
            for id in ids {
                let session = manager.create_session(id)?;
                if let Some(change) = change.as_deref() {
                    manager.session_profile_command_received(session, change)?;
                }
            }
            let state = manager.save_sessions();
            state_file.save(&state)?;
            println!(
                "Saved {} sessions to {}",
                state.sessions.len(),
                state_file.path().display()
            );
            manager.close_all();
            Ok(())
        }
        SessionsAction::Restore { clear } => {
            let Some(state) = state_file.load()? else {
                println!("No saved sessions in {}", state_file.path().display());
                return Ok(());
            };
            let (mut manager, factory) = open_manager(options);
            for session in manager.restore_sessions(&state) {
                let settings = factory
                    .session(session)
                    .context("Session backend was not recorded")?;
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
            manager.close_all();
            if clear {
                state_file.clear()?;
            }
            Ok(())
        }
        SessionsAction::Clear => state_file.clear(),
    }
}

/// Manager backed by recording sessions, plus the factory to inspect them
fn open_manager(options: &RuntimeOptions) -> (SessionManager, RecordingFactory) {
    let factory = RecordingFactory::new();
    let manager = SessionManager::new(options.manager_options(), Box::new(factory.clone()));
    (manager, factory)
}

/// Print every profile in menu order, marking the default and favorites
pub fn list_profiles(options: &RuntimeOptions) -> Result<()> {
    let (mut manager, _) = open_manager(options);
    manager.load_all_profiles();

    let default = manager.default_profile();
    let profiles = manager.profiles();
    let sorted = manager.sort_profiles(&profiles);
    if sorted.is_empty() {
        println!(
            "No profiles in {}",
            manager.locations().save_dir.display()
        );
    }
    for id in sorted {
        let marker = if id == default { "*" } else { " " };
        let favorite = if manager.is_favorite(id) { "+" } else { " " };
        let shortcut = manager
            .shortcut(id)
            .map(|key| format!("  [{key}]"))
            .unwrap_or_default();
        println!(
            "{marker}{favorite} {}{shortcut}",
            display_name(&manager, id)
        );
    }
    Ok(())
}

fn show_profile(manager: &mut SessionManager, name: &str) -> Result<()> {
    let id = find_profile(manager, name)?;
    let profile = manager
        .profile(id)
        .context("Profile disappeared while loading")?;

    println!("{}", display_name(manager, id));
    for property in Property::ALL.iter().copied() {
        let Some(value) = manager.property(id, property) else {
            continue;
        };
        let origin = if profile.is_set(property) { "" } else { "  (inherited)" };
        println!("  {:<28} {}{}", property.name(), value, origin);
    }
    Ok(())
}

fn apply_profile(
    manager: &mut SessionManager,
    factory: &RecordingFactory,
    name: Option<&str>,
    change: Option<&str>,
) -> Result<()> {
    let profile = name.map(|name| find_profile(manager, name)).transpose()?;
    let session = manager.create_session(profile)?;
    if let Some(change) = change {
        manager.session_profile_command_received(session, change)?;
    }

    let settings = factory
        .session(session)
        .context("Session backend was not recorded")?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    if let Some(title) = manager.remote_title(session) {
        println!("Remote title: {title}");
    }
    manager.close_all();
    Ok(())
}

fn describe_ssh(args: &[String], format: Option<&str>) -> Result<()> {
    let info = classify_ssh_args(args);
    match format {
        Some(format) => println!("{}", info.format(format)),
        None => println!("{}", serde_json::to_string_pretty(&info)?),
    }
    Ok(())
}

/// Resolve a profile by name among the available profiles, else by file
fn find_profile(manager: &mut SessionManager, name: &str) -> Result<ProfileId> {
    manager.load_all_profiles();
    if let Some(id) = manager
        .profiles()
        .into_iter()
        .find(|id| manager.profile_name(*id) == Some(name))
    {
        return Ok(id);
    }
    match manager.load_profile(name) {
        Some(id) => Ok(id),
        None => bail!("Profile {name:?} not found"),
    }
}

fn display_name(manager: &SessionManager, id: ProfileId) -> String {
    manager.profile_name(id).unwrap_or("(unnamed)").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sessions_save_restore_clear() {
        let temp = tempdir().unwrap();
        let options = RuntimeOptions {
            profiles_dir: Some(temp.path().join("profiles")),
            settings: Some(temp.path().join("sessionkit.yaml")),
            sessions_file: Some(temp.path().join("last_session.yaml")),
            log_level: None,
        };
        let state_file = options.session_state_file();

        run(
            &options,
            Commands::Sessions {
                action: SessionsAction::Save {
                    profiles: Vec::new(),
                    change: Some("Icon=saved".to_string()),
                },
            },
        )
        .unwrap();
        let state = state_file.load().unwrap().unwrap();
        assert_eq!(state.sessions.len(), 1);
        assert_eq!(
            state.sessions[0].overrides.get("Icon").and_then(|v| v.as_str()),
            Some("saved")
        );

        run(
            &options,
            Commands::Sessions {
                action: SessionsAction::Restore { clear: true },
            },
        )
        .unwrap();
        assert!(!state_file.path().exists());

        // Nothing left to restore
        run(
            &options,
            Commands::Sessions {
                action: SessionsAction::Restore { clear: false },
            },
        )
        .unwrap();
    }
}
