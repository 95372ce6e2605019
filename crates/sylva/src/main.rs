use anyhow::Context as _;
use camino::Utf8PathBuf;
use clap::Parser as _;
use sylva_db::{File, RootDatabase, check_file};
use sylva_errors::Renderer;
use sylva_parse::{DEFAULT_MAX_DEPTH, ParseOptions};
use sylva_yellow::RedElement;
use text_size::TextSize;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(clap::Parser)]
#[command(version, about = "Error-tolerant JSON checker")]
enum Options {
    /// Report diagnostics. Exits with an error when any are errors.
    Check(Input),
    /// Print the syntax tree.
    Tree(Input),
    /// Print the leaf covering a byte offset.
    Locate {
        #[command(flatten)]
        input: Input,
        offset: u32,
    },
}

#[derive(clap::Args)]
struct Input {
    path: Utf8PathBuf,
    /// Maps and lists nested deeper than this are skipped.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,
}

impl Input {
    fn load(self, db: &RootDatabase) -> anyhow::Result<File> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read `{}`", self.path))?;
        u32::try_from(text.len())
            .with_context(|| format!("`{}` is larger than 4 GiB", self.path))?;

        tracing::debug!(path = %self.path, len = text.len(), "loaded");
        let options = ParseOptions::default().with_max_depth(self.max_depth);
        Ok(File::new(db, self.path, text, options))
    }
}

/// Values beat punctuation, which beats background.
fn leaf_priority(leaf: &RedElement<'_>) -> u8 {
    match leaf {
        RedElement::Value(_) => 2,
        RedElement::Punctuation(_) => 1,
        _ => 0,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SYLVA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let db = RootDatabase::default();

    match Options::parse() {
        Options::Check(input) => {
            let file = input.load(&db)?;
            let renderer = Renderer::styled();
            let path = file.path(&db).as_str();
            let text = file.text(&db);

            let diagnostics = check_file(&db, file);
            for diagnostic in diagnostics {
                eprintln!("{}", diagnostic.render(&renderer, path, text));
            }

            let errors = diagnostics.iter().filter(|diagnostic| diagnostic.is_error()).count();
            if errors > 0 {
                anyhow::bail!("`{path}` has {errors} error(s)");
            }
            Ok(())
        }
        Options::Tree(input) => {
            let file = input.load(&db)?;
            print!("{}", file.parse(&db).debug_tree());
            Ok(())
        }
        Options::Locate { input, offset } => {
            let file = input.load(&db)?;
            let parse = file.parse(&db);
            let tree = parse.syntax();

            let offset = TextSize::new(offset);
            let leaf = tree
                .leaf_at_offset(offset)
                .pick_best(leaf_priority)
                .with_context(|| format!("offset {offset:?} is past the end of the text"))?;

            let position = file.line_index(&db).line_col(leaf.range().start());
            println!(
                "{leaf:?} {:?} at {}:{}",
                &parse.text()[leaf.range()],
                position.line + 1,
                position.col + 1
            );
            for ancestor in leaf.ancestors() {
                println!("  in {ancestor:?}");
            }
            Ok(())
        }
    }
}
