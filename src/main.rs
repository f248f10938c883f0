mod api;
mod cli;
mod form;
mod models;
mod session;
mod store;
mod ui;

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser};

use api::{ApiClient, ApiError, Attachment};
use cli::{Cli, Commands};
use models::{TaskCategory, TaskFields, TaskStatus};
use session::Session;
use store::TaskFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let session = Session::new();
    let base_url = ApiClient::base_url_from_env();

    match cli.command {
        Some(Commands::Login { username }) => {
            let password = prompt_password("Password: ")?;
            let client = ApiClient::new(&base_url, None);
            let token = run_network(client.login(&username, &password))?;
            session.save_token(&token)?;
            println!("Logged in as '{}'.", username);
        }
        Some(Commands::Register { username }) => {
            let password = prompt_password("Password: ")?;
            let client = ApiClient::new(&base_url, None);
            let message = run_network(client.register(&username, &password))?;
            println!("{}", message);
        }
        Some(Commands::Logout) => {
            session.clear()?;
            println!("Logged out.");
        }
        Some(Commands::Whoami) => match session.username() {
            Some(name) => println!("{}", name),
            None => println!("Not logged in."),
        },
        Some(Commands::List {
            status,
            search,
            category,
        }) => {
            let status = match status {
                Some(raw) => match TaskStatus::parse(&raw) {
                    Some(s) => Some(s),
                    None => {
                        println!("Invalid status. Valid statuses are: to-do, in-progress, completed");
                        return Ok(());
                    }
                },
                None => None,
            };
            let category = match category {
                Some(raw) => match TaskCategory::parse(&raw) {
                    Some(c) => Some(c),
                    None => {
                        println!("Invalid category. Valid categories are: work, personal");
                        return Ok(());
                    }
                },
                None => None,
            };

            let client = ApiClient::new(&base_url, session.token());
            // Status narrowing happens server-side; search and category are
            // applied client-side like the board does.
            let tasks = run_network(client.list_tasks(status))?;
            let filter = TaskFilter {
                status: None,
                search: search.unwrap_or_default(),
                category,
            };

            println!("Tasks:");
            println!("------");
            for task in tasks.iter().filter(|t| filter.matches(t)) {
                println!(
                    "{} | {} | Due: {} | {} | {}{}",
                    task.id,
                    task.name,
                    task.date,
                    task.task_status,
                    task.task_category,
                    if task.file_url.is_some() { " | [img]" } else { "" }
                );
            }
        }
        Some(Commands::Add {
            name,
            date,
            description,
            status,
            category,
            file,
        }) => {
            if name.trim().is_empty() || description.trim().is_empty() {
                println!("Error: name and description must not be empty.");
                return Ok(());
            }
            if NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").is_err() {
                println!("Invalid date '{}'. Expected YYYY-MM-DD.", date);
                return Ok(());
            }
            let status = match status {
                Some(raw) => match TaskStatus::parse(&raw) {
                    Some(s) => s,
                    None => {
                        println!("Invalid status. Valid statuses are: to-do, in-progress, completed");
                        return Ok(());
                    }
                },
                None => TaskStatus::ToDo,
            };
            let category = match category {
                Some(raw) => match TaskCategory::parse(&raw) {
                    Some(c) => c,
                    None => {
                        println!("Invalid category. Valid categories are: work, personal");
                        return Ok(());
                    }
                },
                None => TaskCategory::Work,
            };
            let attachment = match load_cli_attachment(file.as_deref()) {
                Ok(att) => att,
                Err(msg) => {
                    println!("{}", msg);
                    return Ok(());
                }
            };

            let fields = TaskFields {
                name,
                date: date.trim().to_string(),
                description,
                task_status: status,
                task_category: category,
            };
            let client = ApiClient::new(&base_url, session.token());
            let task = run_network(client.create_task(&fields, attachment))?;
            println!("Task '{}' created successfully! (id: {})", task.name, task.id);
        }
        Some(Commands::Edit {
            id,
            name,
            date,
            description,
            status,
            category,
            file,
        }) => {
            let client = ApiClient::new(&base_url, session.token());
            let tasks = run_network(client.list_tasks(None))?;
            let Some(existing) = tasks.iter().find(|t| t.id == id) else {
                println!("Task '{}' not found.", id);
                return Ok(());
            };

            let status = match status {
                Some(raw) => match TaskStatus::parse(&raw) {
                    Some(s) => s,
                    None => {
                        println!("Invalid status. Valid statuses are: to-do, in-progress, completed");
                        return Ok(());
                    }
                },
                None => existing.task_status,
            };
            let category = match category {
                Some(raw) => match TaskCategory::parse(&raw) {
                    Some(c) => c,
                    None => {
                        println!("Invalid category. Valid categories are: work, personal");
                        return Ok(());
                    }
                },
                None => existing.task_category,
            };
            let date = date.unwrap_or_else(|| existing.date.clone());
            if NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").is_err() {
                println!("Invalid date '{}'. Expected YYYY-MM-DD.", date);
                return Ok(());
            }
            let attachment = match load_cli_attachment(file.as_deref()) {
                Ok(att) => att,
                Err(msg) => {
                    println!("{}", msg);
                    return Ok(());
                }
            };

            let fields = TaskFields {
                name: name.unwrap_or_else(|| existing.name.clone()),
                date: date.trim().to_string(),
                description: description.unwrap_or_else(|| existing.description.clone()),
                task_status: status,
                task_category: category,
            };
            run_network(client.update_task(&id, &fields, attachment))?;
            println!("Task '{}' updated.", id);
        }
        Some(Commands::Status { id, status }) => {
            let Some(status) = TaskStatus::parse(&status) else {
                println!("Invalid status. Valid statuses are: to-do, in-progress, completed");
                return Ok(());
            };
            let client = ApiClient::new(&base_url, session.token());
            run_network(client.update_task_status(&id, status))?;
            println!("Task '{}' status updated to '{}'", id, status);
        }
        Some(Commands::Delete { id }) => {
            let client = ApiClient::new(&base_url, session.token());
            run_network(client.delete_task(&id))?;
            println!("Task '{}' deleted.", id);
        }
        Some(Commands::Completions { shell }) => {
            use clap_complete::{generate, Shell};
            let shell = shell.to_lowercase();
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "elvish" => Shell::Elvish,
                "powershell" => Shell::PowerShell,
                _ => {
                    println!("Unsupported shell: {}", shell);
                    return Ok(());
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "taskbuddy", &mut std::io::stdout());
        }
        Some(Commands::Tui) | None => {
            let client = ApiClient::new(&base_url, session.token());
            ui::run_tui(client, session)?;
        }
    }

    Ok(())
}

fn run_network<T>(fut: impl std::future::Future<Output = Result<T, ApiError>>) -> Result<T> {
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(fut)?)
}

fn load_cli_attachment(path: Option<&str>) -> Result<Option<Attachment>, String> {
    match path {
        Some(p) => form::load_attachment(Path::new(p)).map(Some),
        None => Ok(None),
    }
}

fn prompt_password(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
