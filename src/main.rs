use clap::Parser;
use dev_directory::app::{render, shell};
use dev_directory::config::toml_config::TomlConfig;
use dev_directory::config::{AddArgs, Command, ListArgs};
use dev_directory::utils::error::ErrorSeverity;
use dev_directory::utils::{logger, validation::Validate};
use dev_directory::{
    AddOutcome, CliConfig, DeveloperDraft, DirectoryController, DirectoryError,
    DirectorySettings, FetchState, HttpDirectoryStore,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 設定檔必須在日誌初始化前讀取，因為日誌格式可能來自設定檔
    let file_config = match config.config.as_ref().map(TomlConfig::from_file).transpose() {
        Ok(file_config) => file_config,
        Err(e) => exit_with(&e),
    };
    let logging = file_config.as_ref().map(|f| f.logging.clone()).unwrap_or_default();
    let log_format = config.log_format.or(logging.format).unwrap_or_default();
    let verbose = config.verbose || logging.verbose.unwrap_or(false);
    logger::init_logger(log_format, verbose);

    tracing::info!("Starting devdir");
    if verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Some(file_config) = &file_config {
        if let Err(e) = file_config.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            exit_with(&e);
        }
    }

    let settings = DirectorySettings::resolve(
        config.api_url.clone(),
        config.timeout_seconds,
        file_config.as_ref(),
    );
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }
    tracing::info!("Using directory service at {}", settings.base_url);

    let store = match HttpDirectoryStore::new(&settings) {
        Ok(store) => store,
        Err(e) => exit_with(&e),
    };
    let mut controller = DirectoryController::new(store);

    let result = match config.command {
        Command::List(args) => run_list(&mut controller, args).await,
        Command::Add(args) => run_add(&mut controller, args).await,
        Command::Shell => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run_shell(&mut controller, input, tokio::io::stdout())
                .await
                .map(|_| 0)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(
                "❌ devdir failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            exit_with(&e)
        }
    }
}

async fn run_list(
    controller: &mut DirectoryController<HttpDirectoryStore>,
    args: ListArgs,
) -> dev_directory::Result<i32> {
    controller.mount().await;
    controller.set_role_filter(args.role);
    controller.set_search_term(args.search);
    print_notifications(controller);

    if args.json {
        println!("{}", serde_json::to_string_pretty(controller.visible())?);
    } else {
        print!(
            "{}",
            render::render_list(controller.visible(), controller.filter(), controller.fetch_state())
        );
    }

    Ok(match controller.fetch_state() {
        FetchState::Error(_) => 2,
        _ => 0,
    })
}

async fn run_add(
    controller: &mut DirectoryController<HttpDirectoryStore>,
    args: AddArgs,
) -> dev_directory::Result<i32> {
    let draft = DeveloperDraft {
        name: args.name,
        role: args.role,
        tech_stack: args.tech_stack,
        experience: args.experience,
    };

    let outcome = controller.add_developer(&draft).await;
    print_notifications(controller);

    match outcome {
        AddOutcome::Added(created) => {
            if let Some(created) = created {
                tracing::info!("📁 Stored developer {} as {}", created.name, created.id);
            }
            print!(
                "{}",
                render::render_list(controller.visible(), controller.filter(), controller.fetch_state())
            );
            Ok(0)
        }
        AddOutcome::Invalid(errors) => {
            eprint!("{}", render::render_form(&draft, &errors));
            Ok(1)
        }
        AddOutcome::Rejected(_) => Ok(1),
    }
}

fn print_notifications(controller: &mut DirectoryController<HttpDirectoryStore>) {
    for notification in controller.take_notifications() {
        eprintln!("{}", render::render_notification(&notification));
    }
}

fn exit_with(e: &DirectoryError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
