use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use mime_db::{registry, MalformedTableError, MediaTypeRecord, MediaTypeRegistry, Source};

const LIST_HEADER_TYPE: &str = "TYPE";
const LIST_HEADER_SOURCE: &str = "SOURCE";
const LIST_HEADER_EXTENSIONS: &str = "EXTENSIONS";

const ABSENT_LABEL: &str = "-";

pub fn main() -> ExitCode {
    env_logger::init();

    let args = Cli::parse();

    // check validates its own file, so --db is only read by the commands below
    match args.command {
        Commands::Get(subargs) => do_get(args.db, subargs),
        Commands::List(subargs) => do_list(args.db, subargs),
        Commands::Dump(subargs) => do_dump(args.db, subargs),
        Commands::Check(subargs) => do_check(subargs),
    }
}

enum Table {
    Builtin(&'static MediaTypeRegistry),
    Loaded(MediaTypeRegistry),
}

impl Table {
    fn registry(&self) -> &MediaTypeRegistry {
        match self {
            Table::Builtin(registry) => *registry,
            Table::Loaded(registry) => registry,
        }
    }
}

fn load_table(path: Option<PathBuf>) -> Result<Table, MalformedTableError> {
    match path {
        Some(path) => MediaTypeRegistry::load_from_file(path).map(Table::Loaded),
        None => Ok(Table::Builtin(registry())),
    }
}

fn do_get(db: Option<PathBuf>, args: GetArgs) -> ExitCode {
    let table = match load_table(db) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Unable to load media type table: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let Some(record) = table.registry().get(&args.media_type) else {
        eprintln!("Media type '{}' is not in the table", args.media_type);
        return ExitCode::FAILURE;
    };

    if args.json {
        match serde_json::to_string_pretty(record) {
            Ok(s) => println!("{}", s),
            Err(err) => {
                eprintln!("Unable to serialize record: {}", err);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("{}", args.media_type);
    println!("  source:       {}", record.source.map_or(ABSENT_LABEL, |s| s.as_str()));
    println!("  charset:      {}", record.charset.as_deref().unwrap_or(ABSENT_LABEL));
    println!(
        "  compressible: {}",
        record.compressible.map_or(ABSENT_LABEL.to_owned(), |c| c.to_string()),
    );
    println!("  extensions:   {}", format_extensions(record));

    ExitCode::SUCCESS
}

fn do_list(db: Option<PathBuf>, args: ListArgs) -> ExitCode {
    let table = match load_table(db) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Unable to load media type table: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let wanted = args.source.map(SourceArg::into_source);
    let rows: Vec<(&str, &MediaTypeRecord)> = table.registry().entries()
        .filter(|(_, record)| wanted.map_or(true, |w| record.source == w))
        .collect();

    let max_type_len = rows.iter().map(|(t, _)| t.chars().count())
        .max().unwrap_or(0)
        .max(LIST_HEADER_TYPE.chars().count());
    let max_source_len = LIST_HEADER_SOURCE.chars().count()
        .max(Source::Apache.as_str().len());

    println!(
        "{: <type_width$}   {: <source_width$}   {}",
        LIST_HEADER_TYPE,
        LIST_HEADER_SOURCE,
        LIST_HEADER_EXTENSIONS,
        type_width = max_type_len,
        source_width = max_source_len,
    );
    println!("{}", "-".repeat(max_type_len + max_source_len + LIST_HEADER_EXTENSIONS.len() + 6));
    for (media_type, record) in rows {
        println!(
            "{: <type_width$}   {: <source_width$}   {}",
            media_type,
            record.source.map_or(ABSENT_LABEL, |s| s.as_str()),
            format_extensions(record),
            type_width = max_type_len,
            source_width = max_source_len,
        );
    }

    ExitCode::SUCCESS
}

fn do_dump(db: Option<PathBuf>, args: DumpArgs) -> ExitCode {
    let table = match load_table(db) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Unable to load media type table: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let registry = table.registry();
    let dumped = if args.pretty {
        registry.to_json_pretty()
    } else {
        registry.to_json()
    };

    match dumped {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Unable to serialize table: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn do_check(args: CheckArgs) -> ExitCode {
    match MediaTypeRegistry::load_from_file(&args.source_path) {
        Ok(registry) => {
            println!("{}: {} media types", args.source_path.display(), registry.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {}", args.source_path.display(), err);
            ExitCode::FAILURE
        }
    }
}

fn format_extensions(record: &MediaTypeRecord) -> String {
    match &record.extensions {
        Some(exts) => exts.join(", "),
        None => ABSENT_LABEL.to_owned(),
    }
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Use this table instead of the embedded one
    #[arg(short = 'd', long = "db", value_name = "file", global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Get(GetArgs),
    List(ListArgs),
    Dump(DumpArgs),
    Check(CheckArgs),
}

#[derive(Args)]
struct GetArgs {
    #[arg(value_name = "media type")]
    media_type: String,
    #[arg(long = "json")]
    json: bool,
}

#[derive(Args)]
struct ListArgs {
    #[arg(short = 's', long = "source", value_name = "source")]
    source: Option<SourceArg>,
}

#[derive(Args)]
struct DumpArgs {
    #[arg(short = 'p', long = "pretty")]
    pretty: bool,
}

#[derive(Args)]
struct CheckArgs {
    #[arg(value_name = "file")]
    source_path: PathBuf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum SourceArg {
    Iana,
    Apache,
    Nginx,
    None,
}

impl SourceArg {
    fn into_source(self) -> Option<Source> {
        match self {
            SourceArg::Iana => Some(Source::Iana),
            SourceArg::Apache => Some(Source::Apache),
            SourceArg::Nginx => Some(Source::Nginx),
            SourceArg::None => None,
        }
    }
}
