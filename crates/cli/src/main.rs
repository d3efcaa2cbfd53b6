use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use placement::{
    find_gaps, Edge, Gap, Item, ItemId, ItemKind, Millis, PlacementConfig, PlacementEngine,
    Timeline, TrackId,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "placement-cli")]
#[command(about = "Timeline placement CLI - Resolve item positions against a scene file")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Placement config JSON (missing fields use defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Ignore snap targets
    #[arg(long, global = true)]
    no_snap: bool,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the free intervals of one track, or of every track
    Gaps {
        /// Scene file (a JSON timeline)
        #[arg(short, long)]
        scene: PathBuf,

        /// Track ID
        #[arg(short, long)]
        track: Option<Uuid>,
    },

    /// Resolve where an existing item lands when dropped at a time
    Resolve {
        /// Scene file (a JSON timeline)
        #[arg(short, long)]
        scene: PathBuf,

        /// Item ID
        #[arg(short, long)]
        item: Uuid,

        /// Requested start in milliseconds
        #[arg(long, allow_negative_numbers = true)]
        at: Millis,

        /// Destination track (defaults to the item's own track)
        #[arg(short, long)]
        track: Option<Uuid>,

        /// Apply the result and print the updated scene
        #[arg(long)]
        commit: bool,

        /// Write the output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how far an item edge can be dragged
    Bounds {
        /// Scene file (a JSON timeline)
        #[arg(short, long)]
        scene: PathBuf,

        /// Item ID
        #[arg(short, long)]
        item: Uuid,

        /// Edge being dragged
        #[arg(long, value_enum)]
        edge: EdgeArg,

        /// Drag the edge to this time and print the resulting placement
        #[arg(long, allow_negative_numbers = true)]
        to: Option<Millis>,
    },

    /// Insert a new item near the playhead
    Insert {
        /// Scene file (a JSON timeline)
        #[arg(short, long)]
        scene: PathBuf,

        /// Track ID
        #[arg(short, long)]
        track: Uuid,

        /// Duration in milliseconds
        #[arg(short, long)]
        duration: Millis,

        /// Item kind
        #[arg(long, value_enum, default_value = "video")]
        kind: KindArg,

        /// Playhead position (defaults to the scene's playhead)
        #[arg(long)]
        playhead: Option<Millis>,

        /// Longest duration the item's source media allows
        #[arg(long)]
        max_duration: Option<Millis>,

        /// Write the output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EdgeArg {
    Left,
    Right,
}

impl From<EdgeArg> for Edge {
    fn from(edge: EdgeArg) -> Self {
        match edge {
            EdgeArg::Left => Edge::Left,
            EdgeArg::Right => Edge::Right,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Video,
    Audio,
    Image,
}

impl From<KindArg> for ItemKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Video => ItemKind::Video,
            KindArg::Audio => ItemKind::Audio,
            KindArg::Image => ItemKind::Image,
        }
    }
}

#[derive(Serialize)]
struct TrackGaps {
    track: TrackId,
    name: String,
    gaps: Vec<Gap>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let engine = load_engine(cli.config.as_deref(), cli.no_snap)?;

    match cli.command {
        Commands::Gaps { scene, track } => gaps_command(&scene, track.map(TrackId)),
        Commands::Resolve {
            scene,
            item,
            at,
            track,
            commit,
            output,
        } => resolve_command(
            &engine,
            &scene,
            ItemId(item),
            at,
            track.map(TrackId),
            commit,
            output,
        ),
        Commands::Bounds {
            scene,
            item,
            edge,
            to,
        } => bounds_command(&engine, &scene, ItemId(item), edge.into(), to),
        Commands::Insert {
            scene,
            track,
            duration,
            kind,
            playhead,
            max_duration,
            output,
        } => insert_command(
            &engine,
            &scene,
            TrackId(track),
            duration,
            kind.into(),
            playhead,
            max_duration,
            output,
        ),
    }
}

fn load_engine(path: Option<&Path>, no_snap: bool) -> Result<PlacementEngine> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {:?}", path))?;
            PlacementConfig::from_json(&json)
                .with_context(|| format!("Invalid config {:?}", path))?
        }
        None => PlacementConfig::default(),
    };
    if no_snap {
        config.snap_enabled = false;
    }
    debug!(?config, "placement config");
    Ok(PlacementEngine::new(config))
}

fn load_scene(path: &Path) -> Result<Timeline> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene {:?}", path))?;
    let timeline: Timeline =
        serde_json::from_str(&json).with_context(|| format!("Invalid scene {:?}", path))?;

    for track in &timeline.tracks {
        if let Err(e) = track.validate() {
            warn!("Track '{}' is already inconsistent: {}", track.name, e);
        }
    }
    info!(
        "Loaded scene with {} tracks ({}ms)",
        timeline.tracks.len(),
        timeline.total_duration
    );
    Ok(timeline)
}

fn emit<T: Serialize>(value: &T, output: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Written to: {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn gaps_command(scene: &Path, track: Option<TrackId>) -> Result<()> {
    let timeline = load_scene(scene)?;

    let tracks = match track {
        Some(id) => vec![timeline.track(id)?],
        None => timeline.tracks.iter().collect(),
    };

    let report: Vec<TrackGaps> = tracks
        .into_iter()
        .map(|track| TrackGaps {
            track: track.id,
            name: track.name.clone(),
            gaps: find_gaps(&track.items),
        })
        .collect();

    emit(&report, None)
}

fn resolve_command(
    engine: &PlacementEngine,
    scene: &Path,
    item_id: ItemId,
    at: Millis,
    track: Option<TrackId>,
    commit: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let timeline = load_scene(scene)?;
    let (source, item) = timeline.find_item(item_id)?;
    let target = track.unwrap_or(source.id);
    let others = timeline.track(target)?.others(item_id);
    let targets = timeline.snap_targets(Some(item_id));

    let placement = engine.resolve(
        item,
        at,
        &others,
        timeline.total_duration,
        Some(targets.as_slice()),
    );
    info!(
        "Item {} requested at {}ms resolved to [{}, {})",
        item_id,
        at,
        placement.start_time,
        placement.end_time()
    );
    if placement.forced_overlap {
        warn!("Gap is narrower than the minimum duration; the item overlaps its neighbour");
    }

    if commit {
        let next = timeline
            .commit(item_id, target, placement)
            .context("Placement cannot be committed")?;
        emit(&next, output)
    } else {
        emit(&placement, output)
    }
}

fn bounds_command(
    engine: &PlacementEngine,
    scene: &Path,
    item_id: ItemId,
    edge: Edge,
    to: Option<Millis>,
) -> Result<()> {
    let timeline = load_scene(scene)?;
    let (track, item) = timeline.find_item(item_id)?;
    let others = track.others(item_id);

    match to {
        Some(candidate) => {
            let targets = timeline.snap_targets(Some(item_id));
            let placement = engine.resize(
                item,
                &others,
                edge,
                candidate,
                timeline.total_duration,
                Some(targets.as_slice()),
            );
            emit(&placement, None)
        }
        None => {
            let bounds = engine.resize_bounds(item, &others, edge, timeline.total_duration);
            emit(&bounds, None)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn insert_command(
    engine: &PlacementEngine,
    scene: &Path,
    track_id: TrackId,
    duration: Millis,
    kind: ItemKind,
    playhead: Option<Millis>,
    max_duration: Option<Millis>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut timeline = load_scene(scene)?;
    if let Some(playhead) = playhead {
        timeline = timeline.set_playhead(playhead);
    }

    let mut item = Item::new(kind, track_id, timeline.playhead, duration);
    if let Some(max) = max_duration {
        item = item.with_max_duration(max);
    }
    let item_id = item.id;

    let next = timeline
        .insert_at_playhead(engine, track_id, item)
        .context("Item cannot be inserted")?;
    let (_, placed) = next.find_item(item_id)?;
    info!(
        "Inserted item {} at [{}, {})",
        item_id,
        placed.start_time,
        placed.end_time()
    );

    emit(&next, output)
}
