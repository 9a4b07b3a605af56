use anyhow::{Context, Result};
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal::domains::auth::{gate, sign_in, SignInForm};
use portal::{
    fetch_school_profile, AuthService, AuthState, Config, GateDecision, PortalDeps,
    RegistrationWizard, RegistrationWorkflow, Route, WizardState, REGIONS,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,portal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let term = Term::stdout();
    print_banner(&term)?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(endpoint = %config.appwrite_endpoint, "configuration loaded");
    let deps = PortalDeps::from_config(&config).context("Failed to build provider client")?;
    let auth = AuthService::new(deps.identity.clone());

    // Resolve the session cookie (if any) before showing the menu.
    println!("{}", "Checking session...".bright_yellow());
    auth.initialize().await;
    print_session_line(&auth);

    loop {
        println!();
        let options = vec![
            "🔑 Sign in",
            "🏫 Register a school",
            "📊 Dashboard",
            "👤 Who am I?",
            "🚪 Sign out",
            "🛑 Exit",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact_on(&term)?;

        match selection {
            0 => run_sign_in(&auth).await?,
            1 => run_registration(&deps, &auth).await?,
            2 => show_dashboard(&deps, &auth).await?,
            3 => print_session_line(&auth),
            4 => {
                auth.logout().await;
                println!("{}", "Signed out.".bright_blue());
            }
            5 => {
                println!("{}", "👋 Goodbye!".bright_blue());
                break;
            }
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!(
        "{}",
        "╔════════════════════════════════════════╗".bright_cyan()
    );
    println!(
        "{}",
        "║        USRA Member Portal CLI          ║".bright_cyan()
    );
    println!(
        "{}",
        "╚════════════════════════════════════════╝".bright_cyan()
    );
    println!();
    Ok(())
}

fn print_session_line(auth: &AuthService) {
    match auth.state() {
        AuthState::Unknown => println!("{}", "Session: still resolving".bright_yellow()),
        AuthState::Anonymous => println!("{}", "Session: not signed in".bright_yellow()),
        AuthState::Authenticated(identity) => println!(
            "{} {} <{}>",
            "Signed in as".bright_green(),
            identity.name.bold(),
            identity.email
        ),
    }
}

async fn run_sign_in(auth: &AuthService) -> Result<()> {
    let theme = ColorfulTheme::default();
    let form = SignInForm {
        email: Input::with_theme(&theme)
            .with_prompt("School email")
            .interact_text()?,
        password: Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()?,
    };

    match sign_in(auth, &form).await {
        Ok(route) => {
            println!("{}", "✓ Signed in.".bright_green());
            println!("→ {}", route.path().bright_cyan());
        }
        Err(err) => println!("{} {}", "✗".bright_red(), err.display_message().red()),
    }
    Ok(())
}

async fn run_registration(deps: &PortalDeps, auth: &AuthService) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut wizard = RegistrationWizard::new();

    // Step 1: school information.
    println!();
    println!("{}", "Step 1 of 3: School information".bold());
    {
        let form = wizard.form_mut();
        form.school_name = Input::with_theme(&theme)
            .with_prompt("School name")
            .interact_text()?;
        form.center_number = Input::with_theme(&theme)
            .with_prompt("Center number")
            .interact_text()?;
        form.school_email = Input::with_theme(&theme)
            .with_prompt("School email")
            .interact_text()?;
        form.school_phone1 = Input::with_theme(&theme)
            .with_prompt("School phone")
            .interact_text()?;
        let region = Select::with_theme(&theme)
            .with_prompt("Region")
            .items(&REGIONS)
            .default(0)
            .interact()?;
        form.region = REGIONS[region].to_string();
        form.district = Input::with_theme(&theme)
            .with_prompt("District")
            .interact_text()?;
    }
    if let Err(err) = wizard.next() {
        println!("{} {}", "✗".bright_red(), err.to_string().red());
        return Ok(());
    }

    // Step 2: representative.
    println!();
    println!("{}", "Step 2 of 3: Representative".bold());
    {
        let form = wizard.form_mut();
        form.admin_full_name = Input::with_theme(&theme)
            .with_prompt("Full name")
            .interact_text()?;
        form.nin = Input::with_theme(&theme)
            .with_prompt("NIN")
            .interact_text()?;
        form.role = Input::with_theme(&theme)
            .with_prompt("Role at the school")
            .interact_text()?;
        form.contact1 = Input::with_theme(&theme)
            .with_prompt("Phone contact")
            .interact_text()?;
        form.password = Password::with_theme(&theme)
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?;
    }
    if let Err(err) = wizard.next() {
        println!("{} {}", "✗".bright_red(), err.to_string().red());
        return Ok(());
    }

    // Step 3: review & submit.
    println!();
    println!("{}", "Step 3 of 3: Review & submit".bold());
    let form = wizard.form();
    println!("  {} {}", "School:".bold(), form.school_name);
    println!("  {} {}", "Email:".bold(), form.school_email);
    println!("  {} {}, {}", "Location:".bold(), form.district, form.region);
    println!("  {} {}", "Representative:".bold(), form.admin_full_name);
    wizard.form_mut().terms_accept = Confirm::with_theme(&theme)
        .with_prompt("Accept the terms and conditions?")
        .default(false)
        .interact()?;

    let cmd = match wizard.begin_submit() {
        Ok(cmd) => cmd,
        Err(err) => {
            println!("{} {}", "✗".bright_red(), err.display_message().red());
            return Ok(());
        }
    };

    println!("{}", "Submitting registration...".bright_yellow());
    let workflow = RegistrationWorkflow::new(deps.clone(), auth.clone());
    match workflow.submit(cmd).await {
        Ok(receipt) => {
            wizard.submit_succeeded();
            println!(
                "{}",
                "✓ Registration successful! Redirecting to your dashboard..."
                    .bright_green()
                    .bold()
            );
            tokio::time::sleep(receipt.redirect_after).await;
            println!("→ {}", receipt.redirect.path().bright_cyan());
        }
        Err(err) => {
            let message = err.display_message();
            wizard.submit_failed(&message);
            println!("{} {}", "✗".bright_red(), message.red());
            if matches!(wizard.state(), WizardState::Failed { .. }) {
                println!("{}", "You can review your details and try again.".yellow());
            }
        }
    }
    Ok(())
}

async fn show_dashboard(deps: &PortalDeps, auth: &AuthService) -> Result<()> {
    // The dashboard route is gated the same way the site gates it.
    match gate::decide(Route::Dashboard, &auth.state()) {
        GateDecision::ShowPlaceholder => {
            println!("{}", "Loading...".bright_yellow());
            return Ok(());
        }
        GateDecision::RedirectToSignIn { .. } => {
            println!(
                "{} {}",
                "Not signed in,".yellow(),
                format!("redirecting to {}", Route::SignIn.path()).yellow()
            );
            return Ok(());
        }
        GateDecision::Render => {}
    }

    match fetch_school_profile(deps, auth).await {
        Ok(Some(profile)) => {
            println!();
            println!("{}", profile.fields.school_name.bold().bright_cyan());
            println!("  Center number: {}", profile.fields.center_number);
            println!(
                "  {}, {} Region",
                profile.fields.district, profile.fields.region
            );
            println!("  Email: {}", profile.fields.school_email);
            println!("  Phone: {}", profile.fields.school_phone1);
            println!(
                "  Representative: {} ({})",
                profile.fields.admin_full_name, profile.fields.role
            );
        }
        Ok(None) => println!(
            "{}",
            "No school profile found for this account.".yellow()
        ),
        Err(err) => println!("{} {}", "✗".bright_red(), err.to_string().red()),
    }
    Ok(())
}
