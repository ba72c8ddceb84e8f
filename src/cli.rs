use std::{fmt, num::NonZeroUsize, path::PathBuf};

mod list;
mod show;
mod terminal;

use clap::ArgAction;
use list::List;
use show::Show;
use terminal::Colorize;
use tour_guide::{
    Config, FontScale, Intent, IntentHandler, Ports, Spot, ThemeColorStyle, ThemeSettings,
};
use tracing::instrument;
use uuid::Uuid;

/// A spot or checklist item, named by id or by 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reference {
    Position(NonZeroUsize),
    Id(Uuid),
}

impl Reference {
    fn find<T>(self, items: &[T], id_of: impl Fn(&T) -> Uuid) -> Option<&T> {
        match self {
            Self::Position(position) => items.get(position.get() - 1),
            Self::Id(id) => items.iter().find(|item| id_of(item) == id),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(position) => write!(f, "#{position}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Parse a reference from the command line.
///
/// Positive integers are positions; anything else must be a UUID.
fn parse_reference(s: &str) -> Result<Reference, String> {
    let s = s.trim();
    if let Ok(position) = s.parse::<NonZeroUsize>() {
        return Ok(Reference::Position(position));
    }
    s.parse::<Uuid>()
        .map(Reference::Id)
        .map_err(|_| format!("'{s}' is neither a list position nor an id"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory holding `config.toml` and the saved data
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let guide = Guide::open(self.root).await;
        self.command
            .unwrap_or_else(|| Command::List(List::default()))
            .run(&guide)
            .await?;
        guide.report_effect().await;
        Ok(())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List the spots (default)
    List(List),

    /// Show a spot with its reviews, note and checklist
    Show(Show),

    /// Add a spot to, or remove it from, the favorites
    Favorite(Favorite),

    /// Replace the note kept for a spot
    Note(Note),

    /// Tick or untick a checklist item
    Check(Check),

    /// Append an item to a spot's checklist
    AddItem(AddItem),

    /// Show or change the display theme
    Theme(Theme),
}

impl Command {
    async fn run(self, guide: &Guide) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(guide)?,
            Self::Show(command) => command.run(guide)?,
            Self::Favorite(command) => command.run(guide).await?,
            Self::Note(command) => command.run(guide).await?,
            Self::Check(command) => command.run(guide).await?,
            Self::AddItem(command) => command.run(guide).await?,
            Self::Theme(command) => command.run(guide).await,
        }
        Ok(())
    }
}

/// The intent handler for one invocation, with spots already loaded.
pub struct Guide {
    handler: IntentHandler,
}

impl Guide {
    async fn open(root: PathBuf) -> Self {
        let config = Config::load_or_default(&root);
        let handler = IntentHandler::new(Ports::file_backed(&root, &config));
        handler.handle(Intent::LoadSpots).await;

        if let Some(message) = handler.state().error_message {
            eprintln!("{}", format!("⚠️  {message}").warning());
        }
        Self { handler }
    }

    const fn handler(&self) -> &IntentHandler {
        &self.handler
    }

    fn spot(&self, reference: Reference) -> anyhow::Result<Spot> {
        let state = self.handler.state();
        reference
            .find(&state.spots, |spot| spot.id().as_uuid())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Spot {reference} not found"))
    }

    async fn report_effect(&self) {
        if let Some(effect) = self.handler.take_effect().await {
            println!("{}", effect.message().success());
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Favorite {
    /// The spot's id or list position
    #[clap(value_parser = parse_reference)]
    spot: Reference,
}

impl Favorite {
    #[instrument(skip(guide))]
    async fn run(self, guide: &Guide) -> anyhow::Result<()> {
        let spot = guide.spot(self.spot)?;
        guide
            .handler()
            .handle(Intent::ToggleFavorite(spot.id()))
            .await;
        tracing::info!("Toggled favorite for {}", spot.name());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Note {
    /// The spot's id or list position
    #[clap(value_parser = parse_reference)]
    spot: Reference,

    /// The new note. An empty string clears it.
    text: String,
}

impl Note {
    #[instrument(skip(guide))]
    async fn run(self, guide: &Guide) -> anyhow::Result<()> {
        let spot = guide.spot(self.spot)?;
        guide
            .handler()
            .handle(Intent::UpdateNote {
                spot: spot.id(),
                text: self.text,
            })
            .await;

        println!("{}", format!("✅ Saved note for {}", spot.name()).success());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Check {
    /// The spot's id or list position
    #[clap(value_parser = parse_reference)]
    spot: Reference,

    /// The checklist item's id or position
    #[clap(value_parser = parse_reference)]
    item: Reference,
}

impl Check {
    #[instrument(skip(guide))]
    async fn run(self, guide: &Guide) -> anyhow::Result<()> {
        let spot = guide.spot(self.spot)?;
        let content = guide.handler().state().content_for(&spot);
        let Some(item) = self.item.find(&content.checklist, |item| item.id) else {
            anyhow::bail!("Checklist item {} not found for {}", self.item, spot.name());
        };
        let (id, title) = (item.id, item.title.clone());

        guide
            .handler()
            .handle(Intent::ToggleChecklistItem {
                spot: spot.id(),
                item: id,
            })
            .await;

        let completed = guide
            .handler()
            .state()
            .content_for(&spot)
            .checklist
            .iter()
            .any(|item| item.id == id && item.completed);
        let mark = if completed { "[x]" } else { "[ ]" };
        println!("{mark} {title}");
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct AddItem {
    /// The spot's id or list position
    #[clap(value_parser = parse_reference)]
    spot: Reference,

    /// Title of the new item
    title: String,
}

impl AddItem {
    #[instrument(skip(guide))]
    async fn run(self, guide: &Guide) -> anyhow::Result<()> {
        let spot = guide.spot(self.spot)?;
        if self.title.trim().is_empty() {
            println!("{}", "Nothing to add".dim());
            return Ok(());
        }

        guide
            .handler()
            .handle(Intent::AddChecklistItem {
                spot: spot.id(),
                title: self.title,
            })
            .await;

        let count = guide.handler().state().content_for(&spot).checklist.len();
        println!(
            "{}",
            format!("✅ {} now has {count} checklist items", spot.name()).success()
        );
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Theme {
    /// Colour style: system, light, dark or dusk
    #[arg(long)]
    style: Option<ThemeColorStyle>,

    /// Font scale: standard, relaxed or large
    #[arg(long)]
    font: Option<FontScale>,
}

impl Theme {
    #[instrument(skip(guide))]
    async fn run(self, guide: &Guide) {
        if let Some(style) = self.style {
            guide.handler().handle(Intent::SetThemeStyle(style)).await;
        }
        if let Some(scale) = self.font {
            guide.handler().handle(Intent::SetFontScale(scale)).await;
        }

        let ThemeSettings {
            color_style,
            font_scale,
        } = guide.handler().state().theme_settings;
        println!("{}", "Theme".dim());
        println!("  Style: {} {}", color_style.title().info(), color_style.detail().dim());
        println!("  Font:  {} {}", font_scale.title().info(), font_scale.detail().dim());
    }
}
