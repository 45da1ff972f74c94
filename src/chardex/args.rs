use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "chardex")]
#[command(about = "Explore the Rick and Morty character catalog with local favorites and notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the remote catalog
    #[command(alias = "ls")]
    List {
        /// Search by character name
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by status (alive, dead, unknown)
        #[arg(long)]
        status: Option<String>,

        /// Filter by species
        #[arg(long)]
        species: Option<String>,

        /// Filter by gender (female, male, genderless, unknown)
        #[arg(long)]
        gender: Option<String>,

        /// Filter by subtype
        #[arg(long = "type")]
        kind: Option<String>,

        /// Page to fetch
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Sort key (name, id, created, status, species)
        #[arg(long, default_value = "name")]
        sort: String,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Show one character in full
    #[command(alias = "v")]
    Show {
        /// Character id
        id: u32,
    },

    /// Manage favorites
    #[command(subcommand)]
    Fav(FavCommands),

    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommands),
}

#[derive(Subcommand, Debug)]
pub enum FavCommands {
    /// Fetch a character and add it to favorites
    Add {
        /// Character id
        id: u32,
    },

    /// Remove a character from favorites
    #[command(alias = "rm")]
    Remove {
        /// Character id
        id: u32,
    },

    /// List favorites
    #[command(alias = "ls")]
    List {
        /// Sort key (added, name, status)
        #[arg(long, default_value = "added")]
        sort: String,

        /// Filter by a name/species/status search term
        #[arg(short, long)]
        filter: Option<String>,

        /// Group the listing by status
        #[arg(long)]
        group: bool,
    },

    /// Show favorites statistics
    Stats,

    /// Export favorites
    Export {
        /// Output format (json, csv)
        #[arg(long, default_value = "json")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Remove all favorites
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Add a note to a character
    Add {
        /// Character id
        character_id: u32,

        /// Note title
        #[arg(short, long)]
        title: String,

        /// Note content
        #[arg(short, long)]
        content: String,

        /// Tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List notes, optionally for one character
    #[command(alias = "ls")]
    List {
        /// Character id
        character_id: Option<u32>,
    },

    /// Replace a note's title, content, and tags
    Edit {
        /// Note id
        note_id: String,

        /// Note title
        #[arg(short, long)]
        title: String,

        /// Note content
        #[arg(short, long)]
        content: String,

        /// Tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note id
        note_id: String,
    },

    /// Remove all notes
    Clear,
}
