use clap::Parser;
use zuora_objects::core::api::redact_session;
use zuora_objects::utils::error::{ErrorSeverity, Result};
use zuora_objects::utils::{logger, validation::Validate};
use zuora_objects::{Api, CliArgs, SubscribeRequest};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting zuora-subscribe");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    match run(&args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!(
                "❌ Subscribe failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

/// Returns false when the request was rejected, locally or remotely.
async fn run(args: &CliArgs) -> Result<bool> {
    let file = args.load_request()?;
    file.validate()?;
    let api = Api::from_settings(&file.api)?;

    if args.dry_run {
        let mut request = file.to_request()?;
        if !report_invalid(&mut request) {
            return Ok(false);
        }
        let envelope = api.envelope("subscribe", |xml| request.compose(xml))?;
        println!("{}", redact_session(&envelope));
        return Ok(true);
    }

    let mut request = file.resolve_request(&api).await?;
    if !report_invalid(&mut request) {
        return Ok(false);
    }

    let result = request.create(&api).await?;
    if result.success {
        println!("✅ Subscribed");
        println!(
            "   account:      {} ({})",
            result.account_id.as_deref().unwrap_or("-"),
            result.account_number.as_deref().unwrap_or("-")
        );
        println!(
            "   subscription: {} ({})",
            result.subscription_id.as_deref().unwrap_or("-"),
            result.subscription_number.as_deref().unwrap_or("-")
        );
        if let Some(invoice) = &result.invoice_number {
            println!("   invoice:      {}", invoice);
        }
        Ok(true)
    } else {
        for message in request.errors().full_messages() {
            eprintln!("❌ {}", message);
        }
        Ok(false)
    }
}

fn report_invalid(request: &mut SubscribeRequest) -> bool {
    if request.validate() {
        return true;
    }
    tracing::warn!("Request failed validation with {} error(s)", request.errors().len());
    for message in request.errors().full_messages() {
        eprintln!("❌ {}", message);
    }
    false
}
