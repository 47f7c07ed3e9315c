use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::achievements;
use crate::detect;
use crate::error::{ServiceError, ServiceResult};
use crate::ledger::SavingsLedger;
use crate::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};
use crate::selector::select_questions;
use crate::session::{Answer, Session};
use crate::types::{Decision, InputType, Question, Settings, WishlistItem};

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the checkout questionnaire for a price
    Ask {
        /// Price ("24.99", "$24.99") or pasted page text containing one
        price: String,
        /// Item title to log to the wishlist if you skip the purchase
        #[arg(long)]
        title: Option<String>,
        /// Item URL to log alongside the title
        #[arg(long)]
        url: Option<String>,
    },
    /// Record a skipped purchase directly
    Save {
        /// Amount you did not spend
        amount: f64,
        /// Item title to log to the wishlist
        #[arg(long)]
        title: Option<String>,
        /// Item URL to log alongside the title
        #[arg(long)]
        url: Option<String>,
    },
    /// Show savings total, points, streak and achievements
    Stats,
    /// List the items you skipped
    Wishlist,
    /// Check whether a URL looks like a checkout page
    Check { url: String },
    /// Open an interactive settings editor
    Config,
    /// Print version information
    Version,
}

pub async fn run(cli: Cli, ledger: &SavingsLedger) -> ServiceResult<()> {
    match cli.command {
        Command::Ask { price, title, url } => run_ask(ledger, &price, title, url).await,
        Command::Save { amount, title, url } => run_save(ledger, amount, title, url).await,
        Command::Stats => run_stats(ledger).await,
        Command::Wishlist => run_wishlist(ledger).await,
        Command::Check { url } => {
            if detect::is_checkout_url(&url) {
                println!("{} looks like a checkout page", url.yellow());
            } else {
                println!("{url} does not look like a checkout page");
            }
            Ok(())
        }
        Command::Config => run_config(ledger).await,
        Command::Version => {
            println!("{PKG_NAME} {PKG_VERSION}");
            println!("{PKG_DESCRIPTION}");
            Ok(())
        }
    }
}

/// Accept a bare number, a `$`-prefixed amount, or any text containing one.
fn parse_price(input: &str) -> ServiceResult<f64> {
    if let Ok(value) = input.trim().trim_start_matches('$').parse::<f64>() {
        if value.is_finite() && value >= 0.0 {
            return Ok(value);
        }
    }
    detect::find_price(input).ok_or_else(|| ServiceError::PriceNotFound(input.to_string()))
}

async fn run_ask(
    ledger: &SavingsLedger,
    raw_price: &str,
    title: Option<String>,
    url: Option<String>,
) -> ServiceResult<()> {
    let price = parse_price(raw_price)?;
    let settings = ledger.get_settings().await?;
    let questions = select_questions(price, &mut rand::rng());
    tracing::debug!(price, count = questions.len(), "questionnaire selected");

    let mut session = Session::new(questions);
    if session.is_empty() {
        println!("Nothing to ask at this price. Proceed.");
        return Ok(());
    }

    println!();
    println!("{}", "Pause for a moment.".bold());
    println!("Let's think about this {} purchase.", money(price, &settings));
    println!();

    let total = session.len();
    while let Some(question) = session.current().cloned() {
        let prompt = format!(
            "[{}/{}] {}",
            session.index() + 1,
            total,
            question.render(price, &settings.currency)
        );
        let answer = collect_answer(&question, &prompt)?;
        session.answer(&answer)?;
    }

    let decision = session.decision();
    print_decision(decision, session.score());

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What will you do?")
        .items(&["Skip it and bank the savings", "Buy anyway"])
        .default(match decision {
            Decision::Buy => 1,
            _ => 0,
        })
        .interact()?;
    if choice == 0 {
        if let Some(title) = title {
            let item = WishlistItem {
                title,
                price,
                url: url.unwrap_or_default(),
                date: String::new(),
            };
            ledger.add_to_wishlist(item).await?;
        }
        let outcome = ledger.record_saving(price).await?;
        print_outcome(&outcome, price, &settings);
    }
    Ok(())
}

fn collect_answer(question: &Question, prompt: &str) -> ServiceResult<Answer> {
    let theme = ColorfulTheme::default();
    match question.input_type {
        InputType::Buttons => {
            let index = Select::with_theme(&theme)
                .with_prompt(prompt)
                .items(&["Yes", "Neutral", "No"])
                .default(1)
                .interact()?;
            Ok(Answer::Choice(match index {
                0 => 1,
                1 => 0,
                _ => -1,
            }))
        }
        InputType::Number => {
            let unit = question.unit.as_deref().unwrap_or("amount");
            let value: f64 = Input::with_theme(&theme)
                .with_prompt(format!("{prompt} ({unit})"))
                .validate_with(|v: &f64| {
                    if v.is_finite() {
                        Ok(())
                    } else {
                        Err("enter a number")
                    }
                })
                .interact_text()?;
            Ok(Answer::Numeric(value))
        }
        InputType::Text => {
            let hint = question.placeholder.as_deref().unwrap_or("Type here...");
            let value: String = Input::with_theme(&theme)
                .with_prompt(format!("{prompt} ({hint})"))
                .interact_text()?;
            Ok(Answer::Text(value))
        }
        InputType::Scale => {
            let label = question.scale_label.as_deref().unwrap_or("1-10");
            let value: u8 = Input::with_theme(&theme)
                .with_prompt(format!("{prompt} ({label})"))
                .validate_with(|v: &u8| {
                    if (1..=10).contains(v) {
                        Ok(())
                    } else {
                        Err("enter a value from 1 to 10")
                    }
                })
                .interact_text()?;
            Ok(Answer::Scale(value))
        }
    }
}

fn print_decision(decision: Decision, score: i32) {
    let label = match decision {
        Decision::Buy => decision.label().green().bold(),
        Decision::Wait => decision.label().magenta().bold(),
        Decision::Skip => decision.label().red().bold(),
    };
    println!();
    println!("Recommendation: {label}");
    println!("{}", decision.message());
    println!();
    tracing::debug!(score, decision = decision.label(), "questionnaire complete");
}

fn print_outcome(outcome: &crate::ledger::SaveOutcome, amount: f64, settings: &Settings) {
    println!(
        "{} {} banked, +{} points, streak {}",
        "Saved!".green().bold(),
        money(amount, settings),
        outcome.points_earned,
        outcome.new_streak
    );
    for rule in &outcome.unlocked {
        println!(
            "{} {} ({})",
            "Achievement unlocked:".yellow(),
            rule.name.bold(),
            rule.description
        );
    }
}

async fn run_save(
    ledger: &SavingsLedger,
    amount: f64,
    title: Option<String>,
    url: Option<String>,
) -> ServiceResult<()> {
    let settings = ledger.get_settings().await?;
    if let Some(title) = title {
        let item = WishlistItem {
            title,
            price: amount,
            url: url.unwrap_or_default(),
            date: String::new(),
        };
        ledger.add_to_wishlist(item).await?;
    }
    let outcome = ledger.record_saving(amount).await?;
    print_outcome(&outcome, amount, &settings);
    Ok(())
}

async fn run_stats(ledger: &SavingsLedger) -> ServiceResult<()> {
    let settings = ledger.get_settings().await?;
    let total = ledger.get_total_saved().await?;
    let stats = ledger.get_stats().await?;

    println!("Total saved:   {}", money(total, &settings).green().bold());
    println!("Points:        {}", stats.total_points);
    println!("Streak:        {} day(s)", stats.current_streak);
    println!("Items skipped: {}", stats.items_saved);
    println!(
        "Allowance:     {} / month",
        money(settings.monthly_allowance, &settings)
    );
    if stats.achievements.is_empty() {
        println!("Achievements:  none yet");
    } else {
        let names: Vec<&str> = stats
            .achievements
            .iter()
            .filter_map(|id| achievements::find(id).map(|r| r.name))
            .collect();
        println!("Achievements:  {}", names.join(", "));
    }
    Ok(())
}

async fn run_wishlist(ledger: &SavingsLedger) -> ServiceResult<()> {
    let settings = ledger.get_settings().await?;
    let items = ledger.get_wishlist().await?;
    if items.is_empty() {
        println!("No items skipped yet.");
        return Ok(());
    }
    println!("{} item(s), most recent first:", items.len());
    for item in items.iter().rev() {
        let title = if item.title.is_empty() {
            "Unknown Item"
        } else {
            &item.title
        };
        println!(
            "  {} {} {}",
            money(item.price, &settings).red(),
            title.bold(),
            item.url.dimmed()
        );
    }
    Ok(())
}

async fn run_config(ledger: &SavingsLedger) -> ServiceResult<()> {
    let theme = ColorfulTheme::default();
    let current = ledger.get_settings().await?;
    let monthly_allowance: f64 = Input::with_theme(&theme)
        .with_prompt("Monthly allowance")
        .default(current.monthly_allowance)
        .validate_with(|v: &f64| {
            if v.is_finite() && *v >= 0.0 {
                Ok(())
            } else {
                Err("enter a non-negative number")
            }
        })
        .interact_text()?;
    let currency: String = Input::with_theme(&theme)
        .with_prompt("Currency symbol")
        .default(current.currency.clone())
        .interact_text()?;
    let settings = Settings {
        monthly_allowance,
        currency,
    };
    ledger.save_settings(&settings).await?;
    println!("Settings saved.");
    Ok(())
}

fn money(amount: f64, settings: &Settings) -> String {
    format!("{}{amount:.2}", settings.currency)
}
