//! Native command line: widget preview and catalogue management.
//!
//! Catalogue commands load the configured library snapshot, apply one change
//! as [`AppConfig::user`] and save it back. Uploaded bytes go to a
//! [`DirBlobStore`] under the data directory.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use edushare_core::storage::{self, DirBlobStore, FileStorage};
use edushare_core::{
    CatalogError, FolderId, Library, NewResource, Rating, ResourceId, SearchQuery, SortOrder,
    Storage, StorageError,
};
use thiserror::Error;

use crate::config::AppConfig;
use crate::preview;

/// Command line errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Invalid position: {0:?}")]
    InvalidPosition(String),
    #[error("Invalid id: {0:?}")]
    InvalidId(String),
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Missing {0}")]
    MissingArgument(&'static str),
    #[error("Unexpected argument: {0:?}")]
    UnexpectedArgument(String),
    #[error("Rating widget could not be mounted")]
    NotMounted,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub const USAGE: &str = "\
Usage:
  edushare rate [--initial N] [POSITION...]   preview the rating widget
  edushare search [TERMS...] [--author A] [--subject S] [--sort rating]
  edushare upload FILE [--title T] [--author A] [--subject S] [--description D] [--folder ID]
  edushare review RESOURCE RATING [COMMENT...]
  edushare delete RESOURCE
  edushare folder create NAME [--parent ID]
  edushare folder delete ID
  edushare ls [FOLDER]
  edushare help";

/// A parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Rate {
        initial: Option<String>,
        positions: Vec<i64>,
    },
    Search(SearchQuery),
    Upload {
        path: PathBuf,
        resource: NewResource,
    },
    Review {
        resource: ResourceId,
        rating: Rating,
        comment: String,
    },
    Delete(ResourceId),
    CreateFolder {
        name: String,
        parent: Option<FolderId>,
    },
    DeleteFolder(FolderId),
    List(Option<FolderId>),
    Help,
}

fn parse_id(raw: &str) -> Result<ResourceId, CliError> {
    ResourceId::parse_str(raw.trim()).map_err(|_| CliError::InvalidId(raw.to_string()))
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: String) -> Result<String, CliError> {
    args.next().ok_or(CliError::MissingValue(flag))
}

fn required(
    args: &mut impl Iterator<Item = String>,
    name: &'static str,
) -> Result<String, CliError> {
    args.next().ok_or(CliError::MissingArgument(name))
}

fn no_more(args: &mut impl Iterator<Item = String>) -> Result<(), CliError> {
    match args.next() {
        Some(extra) => Err(CliError::UnexpectedArgument(extra)),
        None => Ok(()),
    }
}

impl Command {
    /// Parse arguments (without the program name).
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(command) = args.next() else {
            return Ok(Self::Help);
        };

        match command.as_str() {
            "rate" => {
                let mut initial = None;
                let mut positions = Vec::new();
                while let Some(arg) = args.next() {
                    if arg == "--initial" {
                        initial = Some(flag_value(&mut args, arg)?);
                    } else {
                        // Integers off the scale are the preview's to skip.
                        let position = arg
                            .parse::<i64>()
                            .map_err(|_| CliError::InvalidPosition(arg.clone()))?;
                        positions.push(position);
                    }
                }
                Ok(Self::Rate { initial, positions })
            }
            "search" => {
                let mut terms = Vec::new();
                let mut author = String::new();
                let mut subject = String::new();
                let mut sort = SortOrder::Relevance;
                while let Some(arg) = args.next() {
                    match arg.as_str() {
                        "--author" => author = flag_value(&mut args, arg)?,
                        "--subject" => subject = flag_value(&mut args, arg)?,
                        "--sort" => sort = SortOrder::from_param(&flag_value(&mut args, arg)?),
                        _ => terms.push(arg),
                    }
                }
                let query = SearchQuery::title(&terms.join(" "))
                    .author(&author)
                    .subject(&subject)
                    .sort(sort);
                Ok(Self::Search(query))
            }
            "upload" => {
                let mut path = None;
                let mut resource = NewResource::default();
                while let Some(arg) = args.next() {
                    match arg.as_str() {
                        "--title" => resource.title = flag_value(&mut args, arg)?,
                        "--author" => resource.author = flag_value(&mut args, arg)?,
                        "--subject" => resource.subject = flag_value(&mut args, arg)?,
                        "--description" => resource.description = flag_value(&mut args, arg)?,
                        "--folder" => {
                            resource.folder = Some(parse_id(&flag_value(&mut args, arg)?)?);
                        }
                        _ if path.is_none() => path = Some(PathBuf::from(arg)),
                        _ => return Err(CliError::UnexpectedArgument(arg)),
                    }
                }
                let path = path.ok_or(CliError::MissingArgument("FILE"))?;
                resource.filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Ok(Self::Upload { path, resource })
            }
            "review" => {
                let resource = parse_id(&required(&mut args, "RESOURCE")?)?;
                // Read like the review form: unparseable counts as 0, then clamped.
                let rating = Rating::from_form(&required(&mut args, "RATING")?);
                let comment = args.collect::<Vec<_>>().join(" ");
                Ok(Self::Review {
                    resource,
                    rating,
                    comment,
                })
            }
            "delete" => {
                let resource = parse_id(&required(&mut args, "RESOURCE")?)?;
                no_more(&mut args)?;
                Ok(Self::Delete(resource))
            }
            "folder" => match required(&mut args, "folder action")?.as_str() {
                "create" => {
                    let mut name = Vec::new();
                    let mut parent = None;
                    while let Some(arg) = args.next() {
                        if arg == "--parent" {
                            parent = Some(parse_id(&flag_value(&mut args, arg)?)?);
                        } else {
                            name.push(arg);
                        }
                    }
                    Ok(Self::CreateFolder {
                        name: name.join(" "),
                        parent,
                    })
                }
                "delete" => {
                    let folder = parse_id(&required(&mut args, "ID")?)?;
                    no_more(&mut args)?;
                    Ok(Self::DeleteFolder(folder))
                }
                other => Err(CliError::UnknownCommand(format!("folder {}", other))),
            },
            "ls" => {
                let folder = args.next().map(|raw| parse_id(&raw)).transpose()?;
                no_more(&mut args)?;
                Ok(Self::List(folder))
            }
            "help" | "--help" | "-h" => Ok(Self::Help),
            other => Err(CliError::UnknownCommand(other.to_string())),
        }
    }
}

/// The configured library snapshot, loaded for one command.
struct Workspace {
    storage: FileStorage,
    id: String,
    library: Library,
}

impl Workspace {
    /// Load the configured library, treating a missing snapshot as empty.
    fn open(config: &AppConfig) -> Result<Self, CliError> {
        let storage = FileStorage::new(config.libraries_dir()?)?;
        let library = match pollster::block_on(storage.load(&config.library_id)) {
            Ok(library) => library,
            Err(StorageError::NotFound(id)) => {
                log::info!(
                    "No library '{}' in {}, starting empty",
                    id,
                    storage.base_path().display()
                );
                Library::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            storage,
            id: config.library_id.clone(),
            library,
        })
    }

    fn save(&self) -> Result<(), CliError> {
        pollster::block_on(self.storage.save(&self.id, &self.library))?;
        Ok(())
    }
}

fn uploads(config: &AppConfig) -> Result<DirBlobStore, CliError> {
    Ok(DirBlobStore::new(config.uploads_dir()?)?)
}

fn score(average: Option<f64>) -> String {
    average
        .map(|a| format!("{:.2}", a))
        .unwrap_or_else(|| "-".to_string())
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// Run a command, writing its report to `out`.
pub fn run(command: &Command, config: &AppConfig, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Rate { initial, positions } => {
            let preview = preview::run(&config.widget, initial.as_deref(), positions)
                .ok_or(CliError::NotMounted)?;
            writeln!(out, "{}", preview.row)?;
            if preview.field_value.is_empty() {
                writeln!(out, "{} = (unset)", config.widget.field_id)?;
            } else {
                writeln!(out, "{} = {}", config.widget.field_id, preview.field_value)?;
            }
        }
        Command::Search(query) => {
            let library = Workspace::open(config)?.library;
            let results = library.search(query);
            if results.is_empty() {
                writeln!(out, "No resources found.")?;
            }
            for resource in results {
                let average = library.average_rating(resource.id);
                writeln!(
                    out,
                    "{} {:>5}  {}  ({} / {})",
                    preview::average_row(average),
                    score(average),
                    resource.title,
                    or_placeholder(&resource.author, "unknown"),
                    or_placeholder(&resource.subject, "general"),
                )?;
            }
        }
        Command::Upload { path, resource } => {
            let bytes = fs::read(path)?;
            let mut workspace = Workspace::open(config)?;
            let blobs = uploads(config)?;
            let stored = pollster::block_on(storage::upload(
                &mut workspace.library,
                &blobs,
                config.user,
                resource.clone(),
                bytes,
            ))?;
            workspace.save()?;
            writeln!(out, "Uploaded '{}' as {} ({})", stored.title, stored.filename, stored.id)?;
        }
        Command::Review {
            resource,
            rating,
            comment,
        } => {
            let mut workspace = Workspace::open(config)?;
            workspace
                .library
                .submit_review(config.user, *resource, *rating, comment)?;
            workspace.save()?;
            let title = &workspace.library.resource(*resource)?.title;
            let average = workspace.library.average_rating(*resource);
            writeln!(out, "Rated '{}' {}, average {}", title, rating, score(average))?;
        }
        Command::Delete(resource) => {
            let mut workspace = Workspace::open(config)?;
            let blobs = uploads(config)?;
            let removed = pollster::block_on(storage::remove_resource(
                &mut workspace.library,
                &blobs,
                config.user,
                *resource,
            ))?;
            workspace.save()?;
            writeln!(out, "Deleted '{}'", removed.title)?;
        }
        Command::CreateFolder { name, parent } => {
            let mut workspace = Workspace::open(config)?;
            let id = workspace.library.create_folder(config.user, name, *parent)?;
            workspace.save()?;
            writeln!(out, "Created folder '{}' ({})", name.trim(), id)?;
        }
        Command::DeleteFolder(folder) => {
            let mut workspace = Workspace::open(config)?;
            let removed = workspace.library.delete_folder(config.user, *folder)?;
            workspace.save()?;
            writeln!(out, "Deleted folder '{}'", removed.name)?;
        }
        Command::List(folder) => {
            let workspace = Workspace::open(config)?;
            let library = &workspace.library;
            let listing = library.listing(config.user, *folder)?;

            let path: Vec<&str> = listing.breadcrumbs.iter().map(|f| f.name.as_str()).collect();
            writeln!(out, "/{}", path.join("/"))?;
            for child in &listing.folders {
                writeln!(out, "  {}/  {}", child.name, child.id)?;
            }
            for resource in &listing.resources {
                let average = library.average_rating(resource.id);
                writeln!(
                    out,
                    "  {} {:>5}  {}  {}",
                    preview::average_row(average),
                    score(average),
                    resource.title,
                    resource.id
                )?;
            }
            if listing.folders.is_empty() && listing.resources.is_empty() {
                writeln!(out, "  (empty)")?;
            }
        }
        Command::Help => writeln!(out, "{}", USAGE)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edushare_core::UserId;
    use std::path::Path;
    use tempfile::tempdir;

    fn user() -> UserId {
        UserId::from_u128(0x5eed)
    }

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            data_dir: Some(dir.to_path_buf()),
            user: user(),
            ..AppConfig::default()
        }
    }

    fn output(command: &Command, config: &AppConfig) -> String {
        let mut out = Vec::new();
        run(command, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn exec(line: &str, config: &AppConfig) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(&Command::parse(args(line))?, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn stored(config: &AppConfig) -> Library {
        Workspace::open(config).unwrap().library
    }

    fn source_file(dir: &Path, name: &str, bytes: &[u8]) -> String {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(
            Command::parse(args("rate --initial 3 5 8")).unwrap(),
            Command::Rate {
                initial: Some("3".to_string()),
                positions: vec![5, 8],
            }
        );
        assert!(matches!(
            Command::parse(args("rate five")),
            Err(CliError::InvalidPosition(_))
        ));
        assert!(matches!(
            Command::parse(args("rate --initial")),
            Err(CliError::MissingValue(_))
        ));
    }

    #[test]
    fn test_rate_skips_positions_off_the_scale() {
        let command = Command::parse(args("rate -1 300 4")).unwrap();
        assert_eq!(
            command,
            Command::Rate {
                initial: None,
                positions: vec![-1, 300, 4],
            }
        );

        let text = output(&command, &AppConfig::default());
        assert_eq!(text, format!("{}\nrating = 4\n", preview::star_row(4)));
    }

    #[test]
    fn test_parse_search() {
        let Command::Search(query) =
            Command::parse(args("search linear algebra --author strang --sort rating")).unwrap()
        else {
            panic!("Expected search command");
        };
        assert_eq!(query.q, "linear algebra");
        assert_eq!(query.author, "strang");
        assert_eq!(query.sort, SortOrder::Rating);
    }

    #[test]
    fn test_parse_catalogue_commands() {
        let folder = UserId::from_u128(7);

        let Command::Upload { path, resource } = Command::parse(args(&format!(
            "upload /tmp/notes.pdf --title Notes --subject Maths --folder {}",
            folder
        )))
        .unwrap() else {
            panic!("Expected upload command");
        };
        assert_eq!(path, PathBuf::from("/tmp/notes.pdf"));
        assert_eq!(resource.filename, "notes.pdf");
        assert_eq!(resource.title, "Notes");
        assert_eq!(resource.subject, "Maths");
        assert_eq!(resource.folder, Some(folder));

        assert_eq!(
            Command::parse(args(&format!("review {} 42 great notes", folder))).unwrap(),
            Command::Review {
                resource: folder,
                rating: Rating::MAX,
                comment: "great notes".to_string(),
            }
        );
        assert_eq!(
            Command::parse(args("folder create Week 1")).unwrap(),
            Command::CreateFolder {
                name: "Week 1".to_string(),
                parent: None,
            }
        );
        assert_eq!(Command::parse(args("ls")).unwrap(), Command::List(None));

        assert!(matches!(
            Command::parse(args("review not-an-id 5")),
            Err(CliError::InvalidId(_))
        ));
        assert!(matches!(
            Command::parse(args("upload")),
            Err(CliError::MissingArgument("FILE"))
        ));
        assert!(matches!(
            Command::parse(args("folder rename x")),
            Err(CliError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_parse_help_and_unknown() {
        assert_eq!(Command::parse(Vec::new()).unwrap(), Command::Help);
        assert_eq!(Command::parse(args("--help")).unwrap(), Command::Help);
        assert!(matches!(
            Command::parse(args("serve")),
            Err(CliError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_rate_output() {
        let config = AppConfig::default();
        let text = output(&Command::parse(args("rate 6 3")).unwrap(), &config);
        assert_eq!(text, format!("{}\nrating = 3\n", preview::star_row(3)));

        let text = output(&Command::parse(args("rate --initial 2")).unwrap(), &config);
        assert_eq!(text, format!("{}\nrating = (unset)\n", preview::star_row(2)));
    }

    #[test]
    fn test_search_missing_library_is_empty() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let text = output(&Command::Search(SearchQuery::default()), &config);
        assert_eq!(text, "No resources found.\n");
    }

    #[test]
    fn test_search_stored_library() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let mut library = Library::new();
        let alice = user();
        let low = library
            .add_resource(alice, NewResource::new("a.pdf").title("Algebra Basics"))
            .unwrap()
            .id;
        let high = library
            .add_resource(
                alice,
                NewResource::new("b.pdf").title("Algebra Advanced").author("Noether"),
            )
            .unwrap()
            .id;
        library.submit_review(alice, low, Rating::new(2).unwrap(), "").unwrap();
        library.submit_review(alice, high, Rating::new(9).unwrap(), "").unwrap();

        let storage = FileStorage::new(config.libraries_dir().unwrap()).unwrap();
        pollster::block_on(storage.save(&config.library_id, &library)).unwrap();

        let query = SearchQuery::title("algebra").sort(SortOrder::Rating);
        let text = output(&Command::Search(query), &config);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Algebra Advanced"));
        assert!(lines[0].contains("9.00"));
        assert!(lines[0].contains("Noether"));
        assert!(lines[1].contains("Algebra Basics"));
        assert!(lines[1].contains("unknown"));
    }

    #[test]
    fn test_upload_stores_bytes_and_snapshot() {
        let dir = tempdir().unwrap();
        let config = config_in(&dir.path().join("data"));
        let file = source_file(dir.path(), "Lecture 1.pdf", b"%PDF-1.7");

        let command = Command::Upload {
            path: PathBuf::from(&file),
            resource: NewResource::new("Lecture 1.pdf").title("Limits").author("Cauchy"),
        };
        let text = output(&command, &config);
        assert!(text.starts_with("Uploaded 'Limits' as "));

        let library = stored(&config);
        assert_eq!(library.resources().len(), 1);
        let resource = &library.resources()[0];
        assert_eq!(resource.uploader, user());
        assert!(resource.filename.ends_with("_Lecture_1.pdf"));

        let on_disk = config.uploads_dir().unwrap().join(&resource.filename);
        assert_eq!(fs::read(on_disk).unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn test_upload_rejected_type_saves_nothing() {
        let dir = tempdir().unwrap();
        let config = config_in(&dir.path().join("data"));
        let file = source_file(dir.path(), "setup.exe", b"MZ");

        let result = exec(&format!("upload {}", file), &config);
        assert!(matches!(
            result,
            Err(CliError::Storage(StorageError::Catalog(CatalogError::FileTypeNotAllowed(_))))
        ));
        assert!(stored(&config).resources().is_empty());
        assert!(
            fs::read_dir(config.uploads_dir().unwrap())
                .map(|entries| entries.count() == 0)
                .unwrap_or(true)
        );
    }

    #[test]
    fn test_review_upserts_and_reports_average() {
        let dir = tempdir().unwrap();
        let config = config_in(&dir.path().join("data"));
        let file = source_file(dir.path(), "deck.pptx", b"deck");
        exec(&format!("upload {} --title Deck", file), &config).unwrap();
        let id = stored(&config).resources()[0].id;

        let text = exec(&format!("review {} 6 solid intro", id), &config).unwrap();
        assert_eq!(text, "Rated 'Deck' 6, average 6.00\n");

        let bob = AppConfig {
            user: UserId::from_u128(0xb0b),
            ..config.clone()
        };
        exec(&format!("review {} 9", id), &bob).unwrap();
        let text = exec(&format!("review {} 42", id), &config).unwrap();
        assert_eq!(text, "Rated 'Deck' 10, average 9.50\n");

        let library = stored(&config);
        assert_eq!(library.reviews_for(id).count(), 2);
        assert_eq!(library.average_rating(id), Some(9.5));

        assert!(matches!(
            exec(&format!("review {} 5", UserId::from_u128(1)), &config),
            Err(CliError::Catalog(CatalogError::ResourceNotFound(_)))
        ));
    }

    #[test]
    fn test_delete_removes_file_and_reviews() {
        let dir = tempdir().unwrap();
        let config = config_in(&dir.path().join("data"));
        let file = source_file(dir.path(), "notes.md", b"# notes");
        exec(&format!("upload {}", file), &config).unwrap();
        let resource = stored(&config).resources()[0].clone();
        exec(&format!("review {} 7", resource.id), &config).unwrap();

        let intruder = AppConfig {
            user: UserId::from_u128(0xbad),
            ..config.clone()
        };
        assert!(matches!(
            exec(&format!("delete {}", resource.id), &intruder),
            Err(CliError::Storage(StorageError::Catalog(CatalogError::Forbidden)))
        ));
        assert_eq!(stored(&config).resources().len(), 1);

        let text = exec(&format!("delete {}", resource.id), &config).unwrap();
        assert_eq!(text, "Deleted 'Untitled'\n");

        let library = stored(&config);
        assert!(library.resources().is_empty());
        assert_eq!(library.reviews_for(resource.id).count(), 0);
        assert!(!config.uploads_dir().unwrap().join(&resource.filename).exists());
    }

    #[test]
    fn test_folders_and_listing() {
        let dir = tempdir().unwrap();
        let config = config_in(&dir.path().join("data"));

        assert_eq!(exec("ls", &config).unwrap(), "/\n  (empty)\n");

        exec("folder create Algebra", &config).unwrap();
        let algebra = stored(&config).listing(user(), None).unwrap().folders[0].id;
        exec(&format!("folder create Week 1 --parent {}", algebra), &config).unwrap();

        let file = source_file(dir.path(), "sheet.pdf", b"sheet");
        exec(&format!("upload {} --title Sheet --folder {}", file, algebra), &config).unwrap();

        let text = exec(&format!("ls {}", algebra), &config).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "/Algebra");
        assert!(lines[1].starts_with("  Week 1/  "));
        assert!(lines[2].contains("Sheet"));
        assert!(lines[2].contains(" -  "));

        // The root lists the folder but not the upload filed inside it.
        let root = exec("ls", &config).unwrap();
        assert!(root.contains("Algebra/"));
        assert!(!root.contains("Sheet"));

        assert!(matches!(
            exec(&format!("folder delete {}", algebra), &config),
            Err(CliError::Catalog(CatalogError::FolderNotEmpty))
        ));

        let other = AppConfig {
            user: UserId::from_u128(0xb0b),
            ..config.clone()
        };
        assert!(matches!(
            exec(&format!("ls {}", algebra), &other),
            Err(CliError::Catalog(CatalogError::FolderNotFound(_)))
        ));

        let week = stored(&config).listing(user(), Some(algebra)).unwrap().folders[0].id;
        let text = exec(&format!("folder delete {}", week), &config).unwrap();
        assert_eq!(text, "Deleted folder 'Week 1'\n");
        assert!(stored(&config).folder(user(), week).is_err());
    }
}
