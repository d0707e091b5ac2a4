//! Entry point for the blockwatch TUI. Parses args, resolves the backend and runs the App.

use blockwatch::app::App;
use blockwatch::logging;
use blockwatch::profiles::{load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile};
use blockwatch::target::{Target, DEFAULT_PORT};
use std::env;
use std::io::{self, Write};

#[derive(Debug, Default)]
struct ParsedArgs {
    url: Option<String>,
    profile: Option<String>,
    port: Option<u16>,
    save: bool,
    dry_run: bool,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--profile NAME|-P NAME] [--save] [--port PORT|-p PORT] [--dry-run] [HOST[:PORT] | ws://HOST:PORT]"
    )
}

fn parse_port(v: &str) -> Result<u16, String> {
    v.parse::<u16>()
        .map_err(|_| format!("invalid port '{v}'"))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "blockwatch".into());
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage(&prog)),
            "--profile" | "-P" => parsed.profile = it.next(),
            "--port" | "-p" => {
                let v = it.next().ok_or_else(|| usage(&prog))?;
                parsed.port = Some(parse_port(&v)?);
            }
            "--save" => parsed.save = true,
            "--dry-run" => parsed.dry_run = true,
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        parsed.profile = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--port=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    parsed.port = Some(parse_port(v)?);
                }
            }
            _ => {
                if parsed.url.is_none() {
                    parsed.url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    logging::init_from_env()?;

    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
    };

    // Raw address plus the profile name to store it under, if any
    let (raw, save_as): (String, Option<String>) = match req.resolve(&profiles_file) {
        ResolveProfile::Direct(u) => (u, parsed.profile.clone()),
        ResolveProfile::Loaded(u) => (u, None),
        ResolveProfile::PromptSelect(names) => {
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let Some(name) = line
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|idx| *idx >= 1 && *idx <= names.len())
                .map(|idx| &names[idx - 1])
            else {
                return Ok(());
            };
            match profiles_file.profiles.get(name) {
                Some(entry) => (entry.url.clone(), None),
                None => return Ok(()),
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter address (HOST[:PORT] or ws://HOST:PORT): ")?;
            if url.trim().is_empty() {
                return Ok(());
            }
            (url.trim().to_string(), Some(name))
        }
        ResolveProfile::None => {
            eprintln!("No address provided and no profiles to select.");
            eprintln!("{}", usage("blockwatch"));
            return Ok(());
        }
    };

    let target = Target::parse(&raw, parsed.port.unwrap_or(DEFAULT_PORT))?;

    if let Some(name) = save_as {
        let url = target.url.to_string();
        let mut profiles_mut = profiles_file.clone();
        let write = match profiles_mut.profiles.get(&name) {
            // New profile: auto-save immediately
            None => true,
            Some(entry) if entry.url == url => false,
            Some(_) => {
                parsed.save
                    || prompt_yes_no(&format!("Overwrite existing profile '{name}'? [y/N]: "))
            }
        };
        if write {
            profiles_mut.profiles.insert(name, ProfileEntry { url });
            if let Err(e) = save_profiles(&profiles_mut) {
                eprintln!("could not save profiles: {e}");
            }
        }
    }

    if parsed.dry_run {
        println!("{target}");
        return Ok(());
    }

    let mut app = App::new(target);
    app.run().await
}

fn prompt_yes_no(prompt: &str) -> bool {
    match prompt_string(prompt) {
        Ok(line) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
