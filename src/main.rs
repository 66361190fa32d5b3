use chrono::Local;
use clap::Parser;
use contact_intake::core::export::submissions_to_csv;
use contact_intake::core::report;
use contact_intake::core::{ConfigProvider, NewSubmission, ServiceOption, BUDGET_OPTIONS};
use contact_intake::utils::error::ErrorSeverity;
use contact_intake::utils::{logger, validation::Validate};
use contact_intake::{
    AccessGate, AdminConsole, AdminDashboard, AdminScreen, CliConfig, Command, Field,
    FileStateStore, FormController, FormStatus, IntakeError, RestSubmissionStore,
    StaticSecretAuthenticator, SubmissionClient, TomlConfig,
};

type Console = AdminConsole<StaticSecretAuthenticator, FileStateStore, RestSubmissionStore>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting contact-intake CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(file_config) => run(&file_config, &cli.command).await,
            Err(e) => Err(e),
        },
        None => run(&cli, &cli.command).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(
    config: &C,
    command: &Command,
) -> contact_intake::Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }

    let client = SubmissionClient::new(RestSubmissionStore::from_config(config));
    let console: Console = AdminConsole::new(
        AccessGate::new(
            StaticSecretAuthenticator::new(config.admin_secret()),
            FileStateStore::new(config.state_dir().to_string()),
        ),
        AdminDashboard::new(client.clone()),
    );

    match command {
        Command::Submit {
            name,
            email,
            company,
            service,
            budget,
            message,
        } => {
            // One-shot process: the success display and reset are skipped.
            let mut form = FormController::new(client);
            form.set_field(Field::Name, name.as_str());
            form.set_field(Field::Email, email.as_str());
            form.set_field(Field::Company, company.clone().unwrap_or_default());
            form.set_field(Field::Service, service.as_str());
            form.set_field(Field::Budget, budget.clone().unwrap_or_default());
            form.set_field(Field::Message, message.as_str());

            let status = form.submit().await.clone();
            println!("{}", report::render_form_outcome(&form));

            match status {
                FormStatus::Success => Ok(()),
                FormStatus::Error => Err(IntakeError::ClientError {
                    message: form.submit_error().unwrap_or("Failed to submit form").to_string(),
                }),
                _ => Err(IntakeError::ValidationError {
                    message: format!("{} field(s) need attention", form.errors().len()),
                }),
            }
        }
        Command::Options => {
            println!("Services:");
            for option in ServiceOption::ALL {
                println!("  {}", option);
            }
            println!("Budgets:");
            for budget in BUDGET_OPTIONS {
                println!("  {}", budget);
            }
            Ok(())
        }
        Command::Login { password } => {
            let screen = console.login(password, &Local::now()).await?;
            println!("{}", report::render_admin_screen(&screen, &Local));
            match screen {
                AdminScreen::LoginPrompt { error: Some(error) } => {
                    Err(IntakeError::ValidationError { message: error })
                }
                _ => Ok(()),
            }
        }
        Command::Logout => {
            console.logout().await?;
            println!("Logged out");
            Ok(())
        }
        Command::Dashboard => {
            let screen = console.open(&Local::now()).await;
            println!("{}", report::render_admin_screen(&screen, &Local));
            require_unlocked(&screen)
        }
        Command::Export { output } => {
            if !console.gate().is_unlocked().await {
                println!("{}", report::render_login_prompt(None));
                return Err(locked_error());
            }

            let submissions = client
                .list_all()
                .await
                .map_err(|e| IntakeError::ClientError { message: e.message })?;
            let csv = submissions_to_csv(&submissions)?;
            std::fs::write(output, csv)?;

            tracing::info!("📁 Exported {} submissions to {}", submissions.len(), output);
            println!("✅ Exported {} submissions to {}", submissions.len(), output);
            Ok(())
        }
        Command::Check {
            with_test_submission,
        } => check_connection(&client, *with_test_submission).await,
    }
}

fn locked_error() -> IntakeError {
    IntakeError::ValidationError {
        message: "Admin access is locked; run `login` first".to_string(),
    }
}

fn require_unlocked(screen: &AdminScreen) -> contact_intake::Result<()> {
    match screen {
        AdminScreen::LoginPrompt { .. } => Err(locked_error()),
        AdminScreen::Dashboard(_) => Ok(()),
    }
}

async fn check_connection(
    client: &SubmissionClient<RestSubmissionStore>,
    with_test_submission: bool,
) -> contact_intake::Result<()> {
    println!("Testing connection to {}...", client.store().table_url());

    match client.list_all().await {
        Ok(rows) => println!("✅ Connection successful! Found {} submissions.", rows.len()),
        Err(e) => {
            println!("❌ Connection failed: {}", e);
            return Err(IntakeError::ClientError { message: e.message });
        }
    }

    if with_test_submission {
        let test_data = NewSubmission {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            company: Some("Test Company".to_string()),
            service: ServiceOption::WebsiteDevelopment.label().to_string(),
            budget: Some(BUDGET_OPTIONS[0].to_string()),
            message: "This is a test submission to verify the database connection.".to_string(),
        };

        match client.submit(&test_data).await {
            Ok(_) => println!("✅ Test submission successful! Check your admin dashboard."),
            Err(e) => {
                println!("❌ Submission failed: {}", e);
                return Err(IntakeError::ClientError { message: e.message });
            }
        }
    }

    Ok(())
}
