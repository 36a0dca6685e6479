use devbuddy_core::models::{CategoryUpdate, NewCategory};
use devbuddy_core::{Category, TasksService};

use crate::cli::CategoryCommands;
use crate::commands::common::{format_category_lines, normalize_identifier, print_json, print_lines};
use crate::error::CliError;

pub fn run_category(command: CategoryCommands, tasks: &TasksService) -> Result<(), CliError> {
    match command {
        CategoryCommands::List { json } => {
            let categories = tasks.get_categories()?;
            if json {
                print_json(&categories)?;
            } else {
                print_lines(&format_category_lines(&categories));
            }
        }
        CategoryCommands::Add {
            name,
            id,
            appearance,
            json,
        } => {
            let category = tasks.create_category(NewCategory {
                id,
                name,
                description: appearance.description,
                color: appearance.color,
                icon: appearance.icon,
            })?;
            print_category(&category, json)?;
        }
        CategoryCommands::Update {
            id,
            name,
            appearance,
            json,
        } => {
            let id = normalize_identifier(&id, "Category ID")?;
            let category = tasks.update_category(
                &id,
                CategoryUpdate {
                    name,
                    description: appearance.description,
                    color: appearance.color,
                    icon: appearance.icon,
                },
            )?;
            print_category(&category, json)?;
        }
        CategoryCommands::Delete { id } => {
            let id = normalize_identifier(&id, "Category ID")?;
            tasks.delete_category(&id)?;
            println!("{id}");
        }
    }

    Ok(())
}

fn print_category(category: &Category, as_json: bool) -> Result<(), CliError> {
    if as_json {
        print_json(category)
    } else {
        println!("{}", category.id);
        Ok(())
    }
}
