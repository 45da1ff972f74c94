use chardex::api::ChardexApi;
use chardex::error::{ChardexError, Result};
use chardex::model::{
    Character, CharacterStatus, FavoriteCharacter, FilterCriteria, Gender, Note, NoteDraft,
};
use chardex::repo::favorites::{
    filter_favorites, group_by_status, sort_favorites, statistics, FavoriteSortKey,
};
use chardex::sort::{SortDirection, SortKey, SortSpec};
use chardex::store::Store;
use chrono::SecondsFormat;
use clap::Parser;
use colored::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands, FavCommands, NoteCommands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => {}
        Err(e) if e.is_aborted() => {
            eprintln!("{}", "Cancelled.".dimmed());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "chardex=debug" } else { "chardex=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

/// A Ctrl-C anywhere cancels the in-flight request instead of killing the
/// process mid-write.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });
    cancel
}

async fn run(cli: Cli) -> Result<()> {
    let mut api = ChardexApi::open()?;
    api.hydrate().await;
    let cancel = cancel_on_ctrl_c();

    match cli.command {
        Some(Commands::List {
            search,
            status,
            species,
            gender,
            kind,
            page,
            sort,
            desc,
        }) => {
            let filters = build_filters(search, status, species, gender, kind, page)?;
            let spec = SortSpec::new(
                SortKey::parse(&sort),
                if desc { SortDirection::Desc } else { SortDirection::Asc },
            );
            handle_list(&api, &filters, spec, &cancel).await
        }
        Some(Commands::Show { id }) => handle_show(&api, id, &cancel).await,
        Some(Commands::Fav(command)) => handle_fav(&mut api, command, &cancel).await,
        Some(Commands::Note(command)) => handle_note(&mut api, command),
        None => {
            handle_list(&api, &FilterCriteria::default(), SortSpec::default(), &cancel).await
        }
    }
}

fn build_filters(
    search: Option<String>,
    status: Option<String>,
    species: Option<String>,
    gender: Option<String>,
    kind: Option<String>,
    page: u32,
) -> Result<FilterCriteria> {
    let status = match status {
        Some(value) => Some(CharacterStatus::parse(&value).ok_or_else(|| {
            ChardexError::Validation(vec![format!(
                "Unknown status '{}' (expected alive, dead, or unknown)",
                value
            )])
        })?),
        None => None,
    };
    let gender = match gender {
        Some(value) => Some(Gender::parse(&value).ok_or_else(|| {
            ChardexError::Validation(vec![format!(
                "Unknown gender '{}' (expected female, male, genderless, or unknown)",
                value
            )])
        })?),
        None => None,
    };
    Ok(FilterCriteria {
        name: search,
        status,
        species,
        kind,
        gender,
        page: page.max(1),
    })
}

async fn handle_list(
    api: &ChardexApi<Arc<Store>>,
    filters: &FilterCriteria,
    spec: SortSpec,
    cancel: &CancellationToken,
) -> Result<()> {
    let page = api.browse(filters, spec, cancel).await?;
    if page.results.is_empty() {
        println!("No characters found.");
        return Ok(());
    }

    for character in &page.results {
        let marker = if api.favorites().is_favorite(character.id) {
            "★".yellow()
        } else {
            " ".normal()
        };
        println!(
            "{} {:>4}  {:<28} {:<9} {}",
            marker,
            character.id.to_string().dimmed(),
            character.name.bold(),
            status_colored(character.status),
            character.species
        );
    }
    println!(
        "{}",
        format!(
            "Page {} of {} ({} characters)",
            filters.page, page.info.pages, page.info.count
        )
        .dimmed()
    );
    Ok(())
}

async fn handle_show(
    api: &ChardexApi<Arc<Store>>,
    id: u32,
    cancel: &CancellationToken,
) -> Result<()> {
    let character = api.character(id, cancel).await?;
    print_character(&character, api.favorites().is_favorite(id));

    let notes = api.notes().notes_for(id);
    if !notes.is_empty() {
        println!("\n{}", format!("Notes ({})", notes.len()).bold());
        for note in &notes {
            print_note(note);
        }
    }
    Ok(())
}

async fn handle_fav(
    api: &mut ChardexApi<Arc<Store>>,
    command: FavCommands,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        FavCommands::Add { id } => {
            if api.favorites().is_favorite(id) {
                println!("Already a favorite.");
                return Ok(());
            }
            let character = api.character(id, cancel).await?;
            let name = character.name.clone();
            api.favorites_mut().add(&character);
            println!("{}", format!("Added {} to favorites.", name).green());
        }
        FavCommands::Remove { id } => {
            if !api.favorites().is_favorite(id) {
                println!("Not a favorite.");
                return Ok(());
            }
            api.favorites_mut().remove(id);
            println!("{}", "Removed from favorites.".green());
        }
        FavCommands::List { sort, filter, group } => {
            let mut favorites = api.favorite_list();
            if let Some(term) = filter {
                favorites = filter_favorites(&favorites, &term);
            }
            favorites = sort_favorites(&favorites, parse_favorite_sort(&sort));

            if favorites.is_empty() {
                println!("No favorites.");
                return Ok(());
            }
            if group {
                for (status, members) in group_by_status(&favorites) {
                    println!("{}", status_colored(status).bold());
                    for favorite in &members {
                        print_favorite(favorite);
                    }
                }
            } else {
                for favorite in &favorites {
                    print_favorite(favorite);
                }
            }
        }
        FavCommands::Stats => {
            let stats = statistics(&api.favorite_list());
            println!("Total: {}", stats.total);
            for (status, count) in &stats.by_status {
                println!("  {:<9} {}", status, count);
            }
            if !stats.by_species.is_empty() {
                println!("Species:");
                for (species, count) in &stats.by_species {
                    println!("  {:<20} {}", species, count);
                }
            }
            if let Some(fav) = &stats.most_recent {
                println!("Most recent: {}", fav.name);
            }
            if let Some(fav) = &stats.oldest {
                println!("Oldest: {}", fav.name);
            }
        }
        FavCommands::Export { format, output } => {
            let rendered = match format.as_str() {
                "json" => api.export_favorites_json()?,
                "csv" => api.export_favorites_csv(),
                other => {
                    return Err(ChardexError::Validation(vec![format!(
                        "Unknown export format '{}' (expected json or csv)",
                        other
                    )]))
                }
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("{}", format!("Exported to {}.", path.display()).green());
                }
                None => println!("{}", rendered),
            }
        }
        FavCommands::Clear => {
            api.favorites_mut().clear();
            println!("{}", "Favorites cleared.".green());
        }
    }
    Ok(())
}

fn handle_note(api: &mut ChardexApi<Arc<Store>>, command: NoteCommands) -> Result<()> {
    match command {
        NoteCommands::Add {
            character_id,
            title,
            content,
            tags,
        } => {
            let note = api.add_note(character_id, &NoteDraft::new(title, content, tags))?;
            println!("{}", format!("Note {} added.", note.id).green());
        }
        NoteCommands::List { character_id } => {
            let notes = match character_id {
                Some(id) => api.notes().notes_for(id),
                None => api.notes().state().notes.clone(),
            };
            if notes.is_empty() {
                println!("No notes.");
                return Ok(());
            }
            for note in &notes {
                print_note(note);
            }
        }
        NoteCommands::Edit {
            note_id,
            title,
            content,
            tags,
        } => {
            api.notes_mut()
                .update(&note_id, &NoteDraft::new(title, content, tags))?;
            println!("{}", "Note updated.".green());
        }
        NoteCommands::Delete { note_id } => {
            if api.notes_mut().delete(&note_id) {
                println!("{}", "Note deleted.".green());
            } else {
                println!("No such note.");
            }
        }
        NoteCommands::Clear => {
            api.notes_mut().clear();
            println!("{}", "Notes cleared.".green());
        }
    }
    Ok(())
}

fn parse_favorite_sort(value: &str) -> FavoriteSortKey {
    match value {
        "name" => FavoriteSortKey::Name,
        "status" => FavoriteSortKey::Status,
        _ => FavoriteSortKey::AddedAt,
    }
}

fn status_colored(status: CharacterStatus) -> ColoredString {
    match status {
        CharacterStatus::Alive => status.to_string().green(),
        CharacterStatus::Dead => status.to_string().red(),
        CharacterStatus::Unknown => status.to_string().dimmed(),
    }
}

fn print_character(character: &Character, favorited: bool) {
    let marker = if favorited { " ★".yellow() } else { "".normal() };
    println!("{}{}", character.name.bold(), marker);
    println!("--------------------------------");
    println!("Id:       {}", character.id);
    println!("Status:   {}", status_colored(character.status));
    println!("Species:  {}", character.species);
    if !character.kind.is_empty() {
        println!("Type:     {}", character.kind);
    }
    println!("Gender:   {}", character.gender);
    println!("Origin:   {}", character.origin.name);
    println!("Location: {}", character.location.name);
    println!("Episodes: {}", character.episode.len());
}

fn print_favorite(favorite: &FavoriteCharacter) {
    println!(
        "  {:>4}  {:<28} {:<9} {:<12} {}",
        favorite.id.to_string().dimmed(),
        favorite.name.bold(),
        status_colored(favorite.status),
        favorite.species,
        favorite
            .added_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .dimmed()
    );
}

fn print_note(note: &Note) {
    let tags = if note.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", note.tags.join(", "))
    };
    println!(
        "  {} {}{}",
        note.id.dimmed(),
        note.title.bold(),
        tags.cyan()
    );
    println!("    character {} · {}", note.character_id, note.content);
}
