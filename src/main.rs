mod cli;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "codeleap-feed", version, about = "CodeLeap Network — terminal feed client")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a magic sign-in link for your email
    Login {
        email: String,
        username: String,
    },
    /// Complete sign-in by pasting the redirect link from your email
    Callback {
        /// Full redirect URL (carries the username and access token)
        url: String,
    },
    /// Sign out and clear the cached username
    Logout,
    /// Show the feed
    Feed {
        /// Filter posts by title or content substring
        #[arg(long)]
        query: Option<String>,
    },
    /// Create a post
    Post {
        title: String,
        content: String,
    },
    /// Edit one of your posts
    Edit {
        id: i64,
        title: String,
        content: String,
    },
    /// Delete one of your posts
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Like (or unlike) a post — session-local only
    Like {
        id: i64,
    },
    /// Comment on a post — session-local only
    Comment {
        id: i64,
        text: String,
    },
    /// Show the signed-in principal and cached username
    Whoami,
}

fn main() {
    codeleap_feed::tracing_init::init_file_tracing();

    let app = App::parse();
    let result = match app.command {
        Commands::Login { email, username } => cli::login::run(&email, &username),
        Commands::Callback { url } => cli::callback::run(&url),
        Commands::Logout => cli::logout::run(),
        Commands::Feed { query } => cli::feed::run(query.as_deref()),
        Commands::Post { title, content } => cli::post::create(&title, &content),
        Commands::Edit { id, title, content } => cli::post::edit(id, &title, &content),
        Commands::Delete { id, yes } => cli::post::delete(id, yes),
        Commands::Like { id } => cli::social::like(id),
        Commands::Comment { id, text } => cli::social::comment(id, &text),
        Commands::Whoami => cli::whoami::run(),
    };
    result.unwrap_or_else(|e| eprintln!("Error: {:#}", e));
}
