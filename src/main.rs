use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

mod config;
mod export;
mod math;
mod scene_graph;
mod tools;
mod watch;

#[cfg(test)]
mod fixtures;

use config::{ExportConfig, ExportOverrides, ToolConfig};
use export::schema::{DimensionStrategy, ExportScope, PositionStrategy, SchemaPreset, ValueLayout};
use scene_graph::{load_scene, write_snapshot, AttributeValue, LoadedScene, ObjectId, SceneFormat};
use tools::ensure_attributes::EnsureMode;
use tools::merge::{MergeOutcome, SELECT_AT_LEAST_TWO};

#[derive(Parser, Debug)]
#[command(name = "level-exporter")]
#[command(about = "Export scene snapshots to level JSON and tidy their game attributes", long_about = None)]
struct Cli {
    /// JSON file with a default preset, export overrides and attribute profiles
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene snapshot (.json) or glTF file (.gltf, .glb)
    #[arg(value_name = "SCENE")]
    scene: PathBuf,

    /// Object to act on; repeat for several. Defaults to the selection
    /// stored in the snapshot
    #[arg(short, long = "select", value_name = "NAME")]
    select: Vec<String>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Where to write the edited snapshot (default: overwrite SCENE)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Level file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum)]
    scope: Option<ExportScope>,

    #[arg(long, value_enum)]
    position: Option<PositionStrategy>,

    #[arg(long, value_enum)]
    dimensions: Option<DimensionStrategy>,

    /// Write min_x..max_z
    #[arg(long)]
    bounds: Option<bool>,

    /// Write the Euler rotation
    #[arg(long)]
    rotation: Option<bool>,

    /// Write `visible`
    #[arg(long)]
    visible: Option<bool>,

    /// Write 2D outlines for outline types
    #[arg(long)]
    vertices: Option<bool>,

    /// Number of indexed values; 0 writes a single `value`
    #[arg(long, value_name = "COUNT")]
    value_slots: Option<u8>,

    /// Object type that gets an outline; repeat for several
    #[arg(long = "vertex-type", value_name = "TYPE")]
    vertex_types: Vec<String>,

    /// Spaces per indentation level
    #[arg(long)]
    indent: Option<usize>,
}

impl ExportArgs {
    fn overrides(&self) -> ExportOverrides {
        ExportOverrides {
            output: self.output.clone(),
            scope: self.scope,
            position: self.position,
            dimensions: self.dimensions,
            bounds: self.bounds,
            rotation: self.rotation,
            values: self.value_slots.map(ValueLayout::from_slots),
            visible: self.visible,
            vertices: self.vertices,
            vertex_types: (!self.vertex_types.is_empty()).then(|| self.vertex_types.clone()),
            indent: self.indent,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write one level record per mesh object
    Export {
        #[command(flatten)]
        scene: SceneArgs,

        #[command(flatten)]
        export: ExportArgs,

        #[arg(long, value_enum)]
        preset: Option<SchemaPreset>,

        /// Export again every time SCENE changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Give every mesh object the attributes of a profile
    Ensure {
        #[command(flatten)]
        scene: SceneArgs,

        #[command(flatten)]
        output: OutputArgs,

        #[arg(short, long, default_value = "graphics")]
        profile: String,

        #[arg(short, long, value_enum, default_value_t = EnsureMode::FillMissing)]
        mode: EnsureMode,
    },

    /// Fix the spelling of gameObjectType on the selection (or all meshes)
    Rename {
        #[command(flatten)]
        scene: SceneArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Join the selected meshes into the first selected one
    Merge {
        #[command(flatten)]
        scene: SceneArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Set one attribute on the selected objects
    Set {
        #[command(flatten)]
        scene: SceneArgs,

        #[command(flatten)]
        output: OutputArgs,

        key: String,

        /// `true`/`false`, a number, or any other text
        value: AttributeValue,
    },
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tool_config = match &cli.config {
        Some(path) => ToolConfig::load(path)?,
        None => ToolConfig::default(),
    };

    match cli.command {
        Command::Export {
            scene,
            export,
            preset,
            watch,
        } => {
            let config = tool_config.export_config(preset, &export.overrides());
            log::debug!("Export settings: {:?}", config);

            if watch {
                if let Err(e) = run_export(&scene, &config) {
                    log::error!("Export failed: {:#}", e);
                }
                watch::watch_file(&scene.scene, || run_export(&scene, &config))?;
            } else {
                run_export(&scene, &config)?;
            }
        }

        Command::Ensure {
            scene,
            output,
            profile,
            mode,
        } => {
            let attribute_profile = tool_config.profile(&profile)?;
            let mut loaded = load_scene(&scene.scene)?;

            let report =
                tools::ensure_attributes::ensure_attributes(&mut loaded.scene, &attribute_profile, mode);
            println!(
                "Checked {} mesh objects with profile {}: {} added, {} reset, {} removed",
                report.objects, profile, report.added, report.reset, report.removed
            );

            if report.changed() {
                save_scene(&loaded, &output)?;
            }
        }

        Command::Rename { scene, output } => {
            let mut loaded = load_scene(&scene.scene)?;
            let mut targets = selection(&loaded, &scene);
            if targets.is_empty() {
                targets = loaded.scene.mesh_object_ids();
            }

            let report = tools::rename_types::rename_types(&mut loaded.scene, &targets);
            for rename in &report.renamed {
                println!("{}: {} -> {}", rename.object, rename.from, rename.to);
            }
            if !report.skipped.is_empty() {
                println!(
                    "Skipped (gameObjectType is not a string): {}",
                    report.skipped.join(", ")
                );
            }

            save_scene(&loaded, &output)?;
        }

        Command::Merge { scene, output } => {
            let mut loaded = load_scene(&scene.scene)?;
            let targets = selection(&loaded, &scene);

            match tools::merge::union_selected(&mut loaded.scene, &targets)? {
                MergeOutcome::Skipped => println!("{}", SELECT_AT_LEAST_TWO),
                MergeOutcome::Merged { base, removed } => {
                    println!("Merged {} into {}", removed.join(", "), base);
                    println!("Union completed. Remaining object: {}", base);
                    save_scene(&loaded, &output)?;
                }
            }
        }

        Command::Set {
            scene,
            output,
            key,
            value,
        } => {
            let mut loaded = load_scene(&scene.scene)?;
            let targets = selection(&loaded, &scene);
            if targets.is_empty() {
                bail!("No objects selected");
            }

            let updated = tools::set_attribute::set_attribute(&mut loaded.scene, &targets, &key, &value);
            println!("Set {} = {} on {}", key, value, updated.join(", "));

            save_scene(&loaded, &output)?;
        }
    }

    Ok(())
}

fn run_export(args: &SceneArgs, config: &ExportConfig) -> Result<()> {
    let loaded = load_scene(&args.scene)?;
    let selected = selection(&loaded, args);

    let level = export::export_level(&loaded.scene, &selected, config);
    if level.is_empty() {
        log::warn!("No mesh objects to export in {}", args.scene.display());
    }
    level.write(&config.output, &config.fields, config.indent)?;

    println!(
        "Exported {} objects to {}",
        level.len(),
        config.output.display()
    );

    Ok(())
}

/// `--select` names if given, else the selection stored in the snapshot.
fn selection(loaded: &LoadedScene, args: &SceneArgs) -> Vec<ObjectId> {
    if args.select.is_empty() {
        loaded.scene.resolve_selection(&loaded.selection)
    } else {
        loaded.scene.resolve_selection(&args.select)
    }
}

fn save_scene(loaded: &LoadedScene, output: &OutputArgs) -> Result<()> {
    let path: &Path = match (&output.output, loaded.format) {
        (Some(path), _) => path,
        (None, SceneFormat::Snapshot) => &loaded.path,
        (None, SceneFormat::Gltf) => bail!(
            "{} is a glTF file; pass --output to save the edited scene as a snapshot",
            loaded.path.display()
        ),
    };

    let snapshot = loaded.scene.to_snapshot(&loaded.selection);
    write_snapshot(&snapshot, path)
        .with_context(|| format!("Failed to save scene to {}", path.display()))?;

    log::info!("Saved scene to {}", path.display());

    Ok(())
}
