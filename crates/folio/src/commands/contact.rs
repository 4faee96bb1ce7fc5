use anyhow::{Context, Result};
use colored::Colorize;
use inquire::Text;
use inquire::validator::Validation;
use std::io::IsTerminal;
use tracing::debug;

use crate::config::Config;
use crate::contact::{self, ContactForm, Field, validate_on_submit};

pub struct ContactArgs {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub recipient: Option<String>,
    pub open: bool,
}

/// Validate a message, print its mailto link and optionally open it.
pub fn run(args: ContactArgs, quiet: bool) -> Result<()> {
    let recipient = resolve_recipient(args.recipient.as_deref(), &Config::load_or_default())?;

    let form = if std::io::stdin().is_terminal() {
        assemble_form(&args, prompt)?
    } else {
        assemble_form(&args, |_| Ok(String::new()))?
    };

    let url = build_link(&form, &recipient)?;
    println!("{url}");

    if args.open {
        open_url(&url)?;
        if !quiet {
            eprintln!("{}", contact::SUCCESS_NOTICE.green());
        }
    }
    Ok(())
}

/// `--recipient`, then the configured default, then the built-in address.
pub fn resolve_recipient(flag: Option<&str>, config: &Config) -> Result<String> {
    let recipient = flag
        .or_else(|| config.recipient())
        .unwrap_or(contact::DEFAULT_RECIPIENT);
    if !contact::is_valid_email(recipient) {
        anyhow::bail!("Invalid recipient: {recipient}");
    }
    Ok(recipient.to_string())
}

/// Fill the form from the arguments, asking `fill` for anything missing.
pub fn assemble_form(
    args: &ContactArgs,
    mut fill: impl FnMut(Field) -> Result<String>,
) -> Result<ContactForm> {
    let mut form = ContactForm::default();
    for &field in Field::all() {
        let given = match field {
            Field::Name => &args.name,
            Field::Email => &args.email,
            Field::Subject => &args.subject,
            Field::Message => &args.message,
        };
        *form.value_mut(field) = match given {
            Some(value) => value.clone(),
            None => fill(field)?,
        };
    }
    Ok(form)
}

/// Validate `form` and return its mailto link, reporting every failing field.
pub fn build_link(form: &ContactForm, recipient: &str) -> Result<String> {
    match form.validate() {
        Ok(submission) => Ok(submission.mailto(recipient)),
        Err(errors) => {
            for (field, error) in &errors {
                eprintln!("  {} {error}", format!("{}:", field.label()).red());
            }
            debug!(count = errors.len(), "contact: validation failed");
            anyhow::bail!(contact::SUBMIT_FAILED)
        }
    }
}

fn prompt(field: Field) -> Result<String> {
    let value = Text::new(&format!("{}:", field.label()))
        .with_validator(move |input: &str| {
            Ok(match validate_on_submit(field, input) {
                Ok(()) => Validation::Valid,
                Err(e) => Validation::Invalid(e.to_string().into()),
            })
        })
        .prompt()
        .with_context(|| format!("Failed to read {}", field.label().to_lowercase()))?;
    Ok(value)
}

fn open_url(url: &str) -> Result<()> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    debug!("Opening mail client with {opener}");
    std::process::Command::new(opener)
        .arg(url)
        .spawn()
        .with_context(|| format!("Failed to launch {opener}"))?;
    Ok(())
}
