use std::path::PathBuf;

use dotlaunch::config::load_cfg;
use dotlaunch::paths::{PATH_DATA, SETTINGS_FILE};
use dotlaunch::{LaunchRequest, Outcome, RuntimeInventory, RuntimePolicy, prepare_launch};
use tracing_subscriber::EnvFilter;

static USAGE_TEXT: &str = r#"
Usage: dotlaunch [OPTIONS]

Options:
    --assembly <path>     Primary managed assembly of the game to prepare
    --game-dir <path>     Directory to patch (defaults to the assembly's directory)
    --config <path>       Settings file (defaults to <data dir>/settings.json)
    --runtime <version>   Pin an exact runtime version, e.g. 8.0.11
    --major <n>           Prefer the newest runtime of this major version
    --direct              Build a direct-host plan with explicit TPA/NSP lists
    --trace               Enable host tracing in the plan
    --renderer <id>       Renderer environment (native, gl4es, gl4es+angle, mobileglues, angle, zink, dxvk)
    --list-runtimes       List installed runtimes and exit
    --verbose             Debug logging (RUST_LOG overrides)
"#;

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let index = args.iter().position(|arg| arg == flag)?;
    match args.get(index + 1) {
        Some(value) if !value.starts_with("--") => Some(value.clone()),
        _ => {
            eprintln!("{} requires a value", flag);
            eprintln!("{}", USAGE_TEXT);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        std::process::exit(0);
    }

    init_logging(args.iter().any(|arg| arg == "--verbose"));

    let config_path = arg_value(&args, "--config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PATH_DATA.join(SETTINGS_FILE));
    let mut cfg = load_cfg(&config_path);
    tracing::debug!("Settings loaded from {}", config_path.display());

    if let Some(version) = arg_value(&args, "--runtime") {
        cfg.runtime = RuntimePolicy::pinned(&version);
    }
    if let Some(major) = arg_value(&args, "--major") {
        match major.parse::<u32>() {
            Ok(major) => cfg.runtime.preferred_major = Some(major),
            Err(_) => {
                eprintln!("--major expects a number, got '{}'", major);
                std::process::exit(1);
            }
        }
    }
    if args.iter().any(|arg| arg == "--direct") {
        cfg.direct_host = true;
    }
    if args.iter().any(|arg| arg == "--trace") {
        cfg.verbose_trace = true;
    }
    if let Some(renderer) = arg_value(&args, "--renderer") {
        cfg.renderer = Some(renderer);
    }

    if args.iter().any(|arg| arg == "--list-runtimes") {
        let inventory = RuntimeInventory::new(cfg.shared_runtime_root());
        let installed = inventory.list_installed();
        if installed.is_empty() {
            eprintln!("No runtimes installed in {}", inventory.shared_root().display());
            std::process::exit(1);
        }
        for inst in installed {
            println!("{}\t{}", inst.full_version, inst.root_path.display());
        }
        std::process::exit(0);
    }

    let Some(assembly) = arg_value(&args, "--assembly") else {
        eprintln!("{}", USAGE_TEXT);
        std::process::exit(1);
    };

    let mut request = LaunchRequest::new(assembly);
    if let Some(game_dir) = arg_value(&args, "--game-dir") {
        request = request.with_game_dir(game_dir);
    }

    let outcome = prepare_launch(&cfg, &request);
    let code = outcome.code();

    match &outcome {
        Outcome::Fatal(e) => {
            eprintln!("Launch aborted: {}", e);
        }
        Outcome::Complete(prepared) | Outcome::Degraded { value: prepared, .. } => {
            if !outcome.skipped().is_empty() {
                eprintln!("Skipped: {}", outcome.skipped().join(", "));
            }
            let env = match prepared.plan.host_env() {
                Ok(env) => env,
                Err(e) => {
                    eprintln!("Launch aborted: {}", e);
                    std::process::exit(e.code());
                }
            };
            let props = prepared.plan.runtime_properties().unwrap_or_default();
            let report = serde_json::json!({
                "plan": prepared.plan,
                "env": env,
                "runtime_properties": props,
                "patched": prepared.apply.patched_count(),
                "entry_points": prepared.hooks.entry_points,
            });
            match serde_json::to_string_pretty(&report) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Failed to render plan: {}", e),
            }
        }
    }

    std::process::exit(code);
}
