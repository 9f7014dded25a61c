use std::{env, env::VarError};

/// There's no real CLI for the servers, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Be explicit about which envars to print, so as to avoid accidentally exposing secrets
    const DISPLAY_ENVS: [&str; 12] = [
        "RUST_LOG",
        "RMS_AUTH_HOST",
        "RMS_AUTH_PORT",
        "RMS_API_HOST",
        "RMS_API_PORT",
        "RMS_DATABASE_URL",
        "RMS_DB_MAX_CONNECTIONS",
        "RMS_RUN_MIGRATIONS",
        "RMS_TOKEN_LIFETIME",
        "RMS_AUTH_SERVICE_URL",
        "RMS_AUTH_TIMEOUT_MS",
        "RMS_ALLOW_EXPLICIT_CUSTOMER_ID",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
