use devbuddy_core::models::{NewNotebook, NotebookUpdate};
use devbuddy_core::{Notebook, NotesService};

use crate::cli::NotebookCommands;
use crate::commands::common::{format_notebook_lines, normalize_identifier, print_json, print_lines};
use crate::error::CliError;

pub fn run_notebook(command: NotebookCommands, notes: &NotesService) -> Result<(), CliError> {
    match command {
        NotebookCommands::List { json } => {
            let notebooks = notes.get_notebooks()?;
            if json {
                print_json(&notebooks)?;
            } else {
                print_lines(&format_notebook_lines(&notebooks));
            }
        }
        NotebookCommands::Add {
            name,
            id,
            appearance,
            json,
        } => {
            let notebook = notes.create_notebook(NewNotebook {
                id,
                name: Some(name),
                description: appearance.description,
                color: appearance.color,
                icon: appearance.icon,
            })?;
            print_notebook(&notebook, json)?;
        }
        NotebookCommands::Update {
            id,
            name,
            appearance,
            json,
        } => {
            let id = normalize_identifier(&id, "Notebook ID")?;
            let notebook = notes.update_notebook(
                &id,
                NotebookUpdate {
                    name,
                    description: appearance.description,
                    color: appearance.color,
                    icon: appearance.icon,
                },
            )?;
            print_notebook(&notebook, json)?;
        }
        NotebookCommands::Delete { id } => {
            let id = normalize_identifier(&id, "Notebook ID")?;
            notes.delete_notebook(&id)?;
            println!("{id}");
        }
    }

    Ok(())
}

fn print_notebook(notebook: &Notebook, as_json: bool) -> Result<(), CliError> {
    if as_json {
        print_json(notebook)
    } else {
        println!("{}", notebook.id);
        Ok(())
    }
}
