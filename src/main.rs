use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use gitx::areas::repository::Repository;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "GITX_LOG";

#[derive(Parser)]
#[command(
    name = "gitx",
    version = "0.1.0",
    about = "A minimal version control tool",
    long_about = "gitx stages file snapshots, commits them into a content-addressed \
    object store and publishes the latest commit of a branch to GitHub.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages files matching the given paths or glob patterns. \
        Directories are added recursively and ignored files are skipped."
    )]
    Add {
        #[arg(index = 1, required = true, help = "Paths or glob patterns to stage")]
        patterns: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the whole index into a new commit on the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "branch",
        about = "Show or rename the current branch",
        long_about = "Without arguments this command prints the current branch. \
        With -M it renames the current branch."
    )]
    Branch {
        #[arg(short = 'M', long = "move", help = "Rename the current branch")]
        new_name: Option<String>,
    },
    #[command(
        name = "remote",
        about = "Manage named remotes",
        long_about = "Without a subcommand this command lists the configured remotes."
    )]
    Remote {
        #[command(subcommand)]
        action: Option<RemoteCommands>,
    },
    #[command(
        name = "auth",
        about = "Store the GitHub access token",
        long_about = "This command stores the access token used to authenticate push requests."
    )]
    Auth {
        #[arg(index = 1, help = "The access token")]
        token: String,
    },
    #[command(
        name = "config",
        about = "Set or show a configuration value",
        long_about = "This command sets a configuration value, or prints it when no value is given. \
        The only supported key is `author`."
    )]
    Config {
        #[arg(index = 1, help = "The configuration key")]
        key: String,
        #[arg(index = 2, help = "The new value")]
        value: Option<String>,
    },
    #[command(
        name = "push",
        about = "Publish the latest commit to a remote",
        long_about = "This command publishes the latest commit of the current branch to a GitHub remote. \
        When the repository cannot take a batch commit, files are written one by one."
    )]
    Push {
        #[arg(short = 'u', long = "set-upstream", help = "Track the remote branch")]
        set_upstream: bool,
        #[arg(index = 1, default_value = "origin", help = "The remote name")]
        remote: String,
        #[arg(index = 2, help = "The remote branch, defaults to the current branch")]
        branch: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content or type of an object",
        long_about = "This command prints an object of the object database. \
        It requires the SHA of the object and exactly one of -p or -t.",
        group(ArgGroup::new("mode").required(true).args(["pretty", "show_type"]))
    )]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object type")]
        show_type: bool,
        #[arg(index = 1)]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command hashes a file and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
}

#[derive(Subcommand)]
enum RemoteCommands {
    #[command(name = "add", about = "Add a named remote")]
    Add {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        url: String,
    },
    #[command(name = "remove", about = "Remove a named remote")]
    Remove {
        #[arg(index = 1)]
        name: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn open_current_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => open_current_repository()?,
            };

            repository.init().await?
        }
        Commands::Add { patterns } => {
            let mut repository = open_current_repository()?;

            repository.add(patterns).await?
        }
        Commands::Commit { message } => {
            let mut repository = open_current_repository()?;

            repository.commit(message.as_str()).await?;
        }
        Commands::Branch { new_name } => {
            let mut repository = open_current_repository()?;

            match new_name {
                Some(new_name) => repository.rename_branch(new_name)?,
                None => repository.show_branch()?,
            }
        }
        Commands::Remote { action } => {
            let mut repository = open_current_repository()?;

            match action {
                Some(RemoteCommands::Add { name, url }) => repository.add_remote(name, url)?,
                Some(RemoteCommands::Remove { name }) => repository.remove_remote(name)?,
                None => repository.list_remotes()?,
            }
        }
        Commands::Auth { token } => {
            let mut repository = open_current_repository()?;

            repository.auth(token)?
        }
        Commands::Config { key, value } => {
            let mut repository = open_current_repository()?;

            repository.config_value(key, value.as_deref())?
        }
        Commands::Push {
            set_upstream,
            remote,
            branch,
        } => {
            let mut repository = open_current_repository()?;

            repository
                .push(remote, branch.as_deref(), *set_upstream)
                .await?;
        }
        Commands::CatFile {
            pretty,
            show_type,
            sha,
        } => {
            let mut repository = open_current_repository()?;

            // the argument group guarantees exactly one mode
            repository.cat_file(sha, *show_type && !*pretty)?
        }
        Commands::HashObject { write, file } => {
            let mut repository = open_current_repository()?;

            repository.hash_object(file, *write)?
        }
    }

    Ok(())
}
