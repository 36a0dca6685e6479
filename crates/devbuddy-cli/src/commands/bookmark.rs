use devbuddy_core::models::{
    BookmarkCategory, BookmarkCategoryUpdate, BookmarkUpdate, NewBookmark, NewBookmarkCategory,
};
use devbuddy_core::{BookmarksService, Error};

use crate::cli::{BookmarkCategoryCommands, BookmarkCommands};
use crate::commands::common::{
    format_bookmark, format_bookmark_lines, normalize_identifier, print_json, print_lines,
};
use crate::error::CliError;

pub fn run_bookmark(
    command: BookmarkCommands,
    bookmarks: &BookmarksService,
) -> Result<(), CliError> {
    match command {
        BookmarkCommands::List { json } => {
            let listed = bookmarks.get_all_bookmarks()?;
            if json {
                print_json(&listed)?;
            } else {
                print_lines(&format_bookmark_lines(&listed));
            }
        }
        BookmarkCommands::Show { id, json } => {
            let id = normalize_identifier(&id, "Bookmark ID")?;
            let entry = bookmarks
                .get_bookmark(&id)?
                .ok_or_else(|| CliError::from(Error::BookmarkNotFound(id)))?;
            if json {
                print_json(&entry)?;
            } else {
                println!("[{}] {}", entry.category, format_bookmark(&entry.bookmark));
            }
        }
        BookmarkCommands::Add {
            category,
            name,
            url,
            id,
            icon,
            description,
        } => {
            let category = normalize_identifier(&category, "Bookmark category ID")?;
            let bookmark = bookmarks.add_bookmark(
                &category,
                NewBookmark {
                    id,
                    name: Some(name),
                    url: Some(url),
                    icon,
                    description,
                },
            )?;
            println!("{}", bookmark.id);
        }
        BookmarkCommands::Update {
            category,
            id,
            name,
            url,
            icon,
            description,
        } => {
            let category = normalize_identifier(&category, "Bookmark category ID")?;
            let id = normalize_identifier(&id, "Bookmark ID")?;
            let bookmark = bookmarks.update_bookmark(
                &category,
                &id,
                BookmarkUpdate {
                    name,
                    url,
                    icon,
                    description,
                },
            )?;
            println!("{}", format_bookmark(&bookmark));
        }
        BookmarkCommands::Delete { category, id } => {
            let category = normalize_identifier(&category, "Bookmark category ID")?;
            let id = normalize_identifier(&id, "Bookmark ID")?;
            bookmarks.delete_bookmark(&category, &id)?;
            println!("{id}");
        }
        BookmarkCommands::Category { command } => run_bookmark_category(command, bookmarks)?,
    }

    Ok(())
}

fn run_bookmark_category(
    command: BookmarkCategoryCommands,
    bookmarks: &BookmarksService,
) -> Result<(), CliError> {
    match command {
        BookmarkCategoryCommands::List { json } => {
            let document = bookmarks.get_bookmarks()?;
            if json {
                print_json(&document.categories)?;
            } else {
                print_lines(&format_bookmark_category_lines(&document.categories));
            }
        }
        BookmarkCategoryCommands::Add {
            name,
            id,
            icon,
            color,
        } => {
            let category = bookmarks.add_category(NewBookmarkCategory {
                id,
                name: Some(name),
                icon,
                color,
            })?;
            println!("{}", category.id);
        }
        BookmarkCategoryCommands::Update {
            id,
            name,
            icon,
            color,
        } => {
            let id = normalize_identifier(&id, "Bookmark category ID")?;
            let category =
                bookmarks.update_category(&id, BookmarkCategoryUpdate { name, icon, color })?;
            println!("{}", category.id);
        }
        BookmarkCategoryCommands::Delete { id } => {
            let id = normalize_identifier(&id, "Bookmark category ID")?;
            bookmarks.delete_category(&id)?;
            println!("{id}");
        }
    }

    Ok(())
}

pub fn format_bookmark_category_lines(categories: &[BookmarkCategory]) -> Vec<String> {
    categories
        .iter()
        .map(|category| {
            format!(
                "{:<14}  {:<20}  {} bookmark(s)",
                category.id,
                category.name,
                category.bookmarks.len()
            )
        })
        .collect()
}
