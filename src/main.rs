use clap::{Parser, Subcommand};
use lightbox_gal::viewer::script::{self, ScriptLine};
use lightbox_gal::viewer::{EventLoop, FsSource, Viewer, ViewerOptions};
use lightbox_gal::{config, output, render, scan};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lightbox-gal")]
#[command(about = "Manifest builder and headless lightbox viewer for image galleries")]
#[command(long_about = "\
Manifest builder and headless lightbox viewer for image galleries

Drop images into the gallery directory and run lightbox-gal with no
arguments to (re)write its manifest. The viewer loads that manifest exactly
as the page does and can be driven by a script.

Project structure:

  ./
  ├── gallery.toml                 # Optional config
  └── assets/
      └── tole/                    # Gallery directory
          ├── manifest.json        # Written by the builder
          ├── img1.jpg             # jpg, jpeg, png, webp, gif, avif
          ├── img2.PNG             # Extension match ignores case
          └── img10.webp           # Natural order: img2 before img10

Script steps (one per line, # starts a comment):
  click thumb <i> | click prev|next|close|backdrop|dialog
  key Escape|ArrowLeft|ArrowRight
  touch <start_x> <end_x>
  frame | wait <ms> | settle

Run 'lightbox-gal gen-config' to generate a documented gallery.toml.")]
#[command(version)]
struct Cli {
    /// Project root holding gallery.toml and the assets directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the gallery manifest (the default)
    Manifest,
    /// Load the manifest in the headless viewer and run a script
    View {
        /// Script file; reads stdin when omitted
        #[arg(long)]
        script: Option<PathBuf>,
        /// Print the rendered page after the script
        #[arg(long)]
        html: bool,
    },
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Manifest) {
        Command::Manifest => {
            let config = config::load_config(&cli.root)?;
            let summary = scan::run(&config, &cli.root)?;
            output::print_build_summary(&summary);
        }
        Command::View { script, html } => {
            let config = config::load_config(&cli.root)?;
            let steps = read_script(script.as_deref())?;

            let mut viewer = Viewer::new(ViewerOptions::from_config(&config));
            // A failed load leaves the inline error in place; the session still runs
            let result = viewer.load(&FsSource::new(cli.root.clone()));
            output::print_load_result(&viewer, &result);

            let mut event_loop = EventLoop::new(viewer);
            if !steps.is_empty() {
                println!();
            }
            for ScriptLine { text, step, .. } in &steps {
                script::apply(&mut event_loop, step);
                output::print_step(text, &event_loop);
            }

            if html {
                println!("{}", render::render_document(event_loop.viewer().document()).into_string());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn read_script(path: Option<&Path>) -> Result<Vec<ScriptLine>, Box<dyn std::error::Error>> {
    let source = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(script::parse_script(&source)?)
}
